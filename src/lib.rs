//! Plain-text Blood Donor Registry
//!
//! Donors and blood requests are stored as delimited text files in a
//! directory, alongside a log of verified donor names.

pub mod domain;
pub use domain::{
    BloodRequest, BloodType, Config, Donor, DonorForm, RequestForm, Urgency, ValidationError,
};

/// Filesystem storage for donors, requests and verified names.
pub mod storage;
pub use storage::{StorageError, Store};

pub mod matcher;
pub use matcher::DonorQuery;

pub mod verifier;
pub use verifier::Verifier;

mod registry;
pub use registry::{DonorRegistration, Error, Registry};
