//! Donor search by blood type and location.
//!
//! Blood types are compared for exact equality. Compatibility between groups
//! (an O- donor giving to an A+ patient, say) is not modelled.

use crate::{
    domain::{BloodType, Donor},
    storage::{DonorRecords, StorageError, Store},
};

/// What to search the donor collection for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorQuery {
    blood_type: BloodType,
    /// Lower-cased location filter. Empty matches every location.
    location: String,
}

impl DonorQuery {
    /// Builds a query for donors of `blood_type` whose location contains
    /// `location_filter`, ignoring case.
    #[must_use]
    pub fn new(blood_type: BloodType, location_filter: &str) -> Self {
        Self {
            blood_type,
            location: location_filter.trim().to_lowercase(),
        }
    }

    /// The blood type being searched for.
    #[must_use]
    pub const fn blood_type(&self) -> BloodType {
        self.blood_type
    }

    /// Whether a single donor satisfies the query.
    #[must_use]
    pub fn matches(&self, donor: &Donor) -> bool {
        donor.blood_type == self.blood_type
            && (self.location.is_empty()
                || donor.location.to_lowercase().contains(&self.location))
    }
}

/// The donors matching a [`DonorQuery`], in store order.
///
/// Read failures are passed through; the sequence ends after the first one.
pub struct Matches {
    records: DonorRecords,
    query: DonorQuery,
}

impl Iterator for Matches {
    type Item = Result<Donor, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .find(|result| result.as_ref().map_or(true, |donor| self.query.matches(donor)))
    }
}

/// Scans the store for donors matching `query`.
///
/// No matches is an empty sequence, not an error.
///
/// # Errors
///
/// Returns an error if the donor collection cannot be opened. Errors in
/// individual rows are yielded by the returned iterator.
pub fn find_donors(store: &Store, query: DonorQuery) -> Result<Matches, StorageError> {
    Ok(Matches {
        records: store.read_all_donors()?,
        query,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::Config;

    fn donor(name: &str, blood_type: BloodType, location: &str) -> Donor {
        Donor {
            name: name.to_string(),
            age: 25,
            blood_type,
            location: location.to_string(),
            contact: "1234567890".to_string(),
        }
    }

    fn seeded_store(donors: &[Donor]) -> (TempDir, Store) {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path().to_path_buf(), Config::default());
        store.ensure_initialized().unwrap();
        for donor in donors {
            store.append_donor(donor).unwrap();
        }
        (tmp, store)
    }

    fn search(store: &Store, blood_type: BloodType, location: &str) -> Vec<Donor> {
        find_donors(store, DonorQuery::new(blood_type, location))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn filters_by_exact_blood_type_in_append_order() {
        let first = donor("Ann", BloodType::OPositive, "North");
        let other = donor("Ben", BloodType::ONegative, "North");
        let third = donor("Cat", BloodType::APositive, "South");
        let fourth = donor("Dan", BloodType::OPositive, "South");
        let (_tmp, store) = seeded_store(&[
            first.clone(),
            other,
            third,
            fourth.clone(),
        ]);

        assert_eq!(search(&store, BloodType::OPositive, ""), vec![first, fourth]);
    }

    #[test]
    fn location_is_a_case_insensitive_substring() {
        let general = donor("Ann", BloodType::BPositive, "Springfield General");
        let (_tmp, store) = seeded_store(&[
            general.clone(),
            donor("Ben", BloodType::BPositive, "Shelbyville"),
        ]);

        assert_eq!(
            search(&store, BloodType::BPositive, "springfield"),
            vec![general]
        );
    }

    #[test]
    fn o_negative_is_not_treated_as_universal() {
        let (_tmp, store) = seeded_store(&[donor("Ann", BloodType::ONegative, "Here")]);

        assert!(search(&store, BloodType::APositive, "").is_empty());
    }

    #[test]
    fn no_matches_is_empty_not_an_error() {
        let (_tmp, store) = seeded_store(&[]);

        assert!(search(&store, BloodType::AbNegative, "anywhere").is_empty());
    }

    #[test]
    fn read_errors_pass_through() {
        let (_tmp, store) = seeded_store(&[donor("Ann", BloodType::APositive, "Here")]);
        std::fs::write(
            store.donors_path(),
            "name,age,blood,location,contact\nAnn,25,A+,Here,1234567890\nbroken\n",
        )
        .unwrap();

        let result: Result<Vec<_>, _> = find_donors(&store, DonorQuery::new(BloodType::ONegative, ""))
            .unwrap()
            .collect();

        assert!(matches!(result, Err(StorageError::Parse(_))));
    }

    #[test]
    fn query_matches_without_a_store() {
        let query = DonorQuery::new(BloodType::AbPositive, "  CITY ");

        assert!(query.matches(&donor("Ann", BloodType::AbPositive, "Inner city")));
        assert!(!query.matches(&donor("Ann", BloodType::AbNegative, "Inner city")));
        assert!(!query.matches(&donor("Ann", BloodType::AbPositive, "Village")));
    }
}
