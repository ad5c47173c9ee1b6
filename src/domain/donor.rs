use serde::Serialize;

use crate::domain::BloodType;

/// A registered blood donor.
///
/// Donors are immutable once stored. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donor {
    /// Full name, letters and spaces only.
    pub name: String,
    /// Age in years, between 16 and 100.
    pub age: u8,
    /// The donor's blood group.
    #[serde(rename = "blood")]
    pub blood_type: BloodType,
    /// Free-text location, usually a hospital or city.
    pub location: String,
    /// A 10-digit phone number or a Gmail address.
    pub contact: String,
}

/// The fields a donor row is stored with, in column order.
pub const DONOR_FIELDS: [&str; 5] = ["name", "age", "blood", "location", "contact"];
