use serde::Serialize;

use crate::domain::{BloodType, Urgency};

/// A request for blood of a given type.
///
/// Requests are only ever written; nothing in the registry reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BloodRequest {
    /// Name of the patient the blood is for.
    pub name: String,
    /// The blood group needed.
    #[serde(rename = "blood")]
    pub blood_type: BloodType,
    /// Hospital or city where the blood is needed.
    pub location: String,
    /// How soon it is needed.
    pub urgency: Urgency,
}

/// The fields a request row is stored with, in column order.
pub const REQUEST_FIELDS: [&str; 4] = ["name", "blood", "location", "urgency"];
