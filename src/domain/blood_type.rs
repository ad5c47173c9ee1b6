use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodType {
    /// A positive
    APositive,
    /// A negative
    ANegative,
    /// B positive
    BPositive,
    /// B negative
    BNegative,
    /// AB positive
    AbPositive,
    /// AB negative
    AbNegative,
    /// O positive
    OPositive,
    /// O negative
    ONegative,
}

impl BloodType {
    /// Every blood type, in the order they are offered to users.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// The canonical label, e.g. `"AB-"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    /// Labels are matched exactly. `"a+"` is not a blood type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == s)
            .ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a label is not one of the eight blood types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood type '{0}' (expected one of A+, A-, B+, B-, AB+, AB-, O+, O-)")]
pub struct UnknownBloodType(String);
