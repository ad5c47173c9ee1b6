use std::{fmt, str::FromStr};

use serde::Serialize;

/// How urgently a blood request needs to be fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Urgency {
    /// Can wait.
    Low,
    /// Needed soon.
    Medium,
    /// Needed today.
    High,
    /// Life-threatening.
    Critical,
}

impl Urgency {
    /// Every urgency level, least urgent first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// The stored label, e.g. `"Critical"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownUrgency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|urgency| urgency.as_str() == s)
            .ok_or_else(|| UnknownUrgency(s.to_string()))
    }
}

/// Error returned when a label is not one of the urgency levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown urgency '{0}' (expected one of Low, Medium, High, Critical)")]
pub struct UnknownUrgency(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_labels() {
        assert_eq!("Low".parse(), Ok(Urgency::Low));
        assert_eq!("Critical".parse(), Ok(Urgency::Critical));
    }

    #[test]
    fn rejects_other_spellings() {
        assert!("critical".parse::<Urgency>().is_err());
        assert!("Urgent".parse::<Urgency>().is_err());
    }

    #[test]
    fn levels_are_ordered_by_urgency() {
        assert!(Urgency::Low < Urgency::Critical);
        assert!(Urgency::Medium < Urgency::High);
    }
}
