//! Domain models for the donor registry.
//!
//! This module contains the record types, the closed blood type and urgency
//! enumerations, storage configuration, and form validation.

mod blood_type;
pub use blood_type::{BloodType, UnknownBloodType};

mod urgency;
pub use urgency::{UnknownUrgency, Urgency};

mod donor;
pub use donor::{DONOR_FIELDS, Donor};

mod request;
pub use request::{BloodRequest, REQUEST_FIELDS};

mod config;
pub use config::{Config, ConfigError};

/// Field validation and the registration pipeline.
pub mod validation;
pub use validation::{DonorForm, RequestForm, ValidationError};
