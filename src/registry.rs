//! The operations a front end needs: register, request, search and verify.

use std::path::PathBuf;

use crate::{
    domain::{BloodRequest, BloodType, Donor, DonorForm, RequestForm, ValidationError},
    matcher::{self, DonorQuery},
    storage::{StorageError, Store},
    verifier::Verifier,
};

/// A failure of a registry operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was rejected. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store could not be read or written. The record is not considered
    /// saved.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The outcome of a successful donor registration.
#[derive(Debug)]
pub struct DonorRegistration {
    /// The donor as stored.
    pub donor: Donor,

    /// Set when the donor was saved but their name could not be added to the
    /// verified-name log. The registration still stands.
    pub log_warning: Option<StorageError>,
}

/// A donor registry backed by a [`Store`].
#[derive(Debug, Clone)]
pub struct Registry {
    store: Store,
}

impl Registry {
    /// Opens the registry at `root`, creating any missing collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open(root: PathBuf) -> Result<Self, StorageError> {
        Self::with_store(Store::open(root))
    }

    /// Wraps an existing store, creating any missing collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn with_store(store: Store) -> Result<Self, StorageError> {
        store.ensure_initialized()?;
        Ok(Self { store })
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Validates and stores a donor, then adds their name to the
    /// verified-name log.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the form is rejected, or a storage error
    /// if the donor row cannot be written. Failing to extend the log is not an
    /// error; see [`DonorRegistration::log_warning`].
    pub fn register_donor(&self, form: &DonorForm) -> Result<DonorRegistration, Error> {
        let donor = form.validate()?;
        self.store.append_donor(&donor)?;

        let log_warning = self.store.append_verified_name(&donor.name).err();
        if let Some(error) = &log_warning {
            tracing::debug!("Donor '{}' saved but not logged: {error}", donor.name);
        }

        Ok(DonorRegistration { donor, log_warning })
    }

    /// Validates and stores a blood request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the form is rejected, or a storage error
    /// if the request row cannot be written.
    pub fn submit_request(&self, form: &RequestForm) -> Result<BloodRequest, Error> {
        let request = form.validate()?;
        self.store.append_request(&request)?;
        Ok(request)
    }

    /// All donors of `blood_type` whose location contains `location_filter`,
    /// ignoring case, in the order they registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the donor collection cannot be read or contains a
    /// malformed row. No partial result is returned.
    pub fn find_donors(
        &self,
        blood_type: BloodType,
        location_filter: &str,
    ) -> Result<Vec<Donor>, StorageError> {
        matcher::find_donors(&self.store, DonorQuery::new(blood_type, location_filter))?.collect()
    }

    /// Access to the verified-name log.
    #[must_use]
    pub const fn verifier(&self) -> Verifier<'_> {
        Verifier::new(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn setup_registry() -> (TempDir, Registry) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let registry = Registry::open(tmp.path().join("data")).unwrap();
        (tmp, registry)
    }

    fn donor_form(name: &str, blood_type: &str, location: &str) -> DonorForm {
        DonorForm {
            name: name.to_string(),
            age: "30".to_string(),
            blood_type: blood_type.to_string(),
            location: location.to_string(),
            contact: "9876543210".to_string(),
        }
    }

    #[test]
    fn registered_donor_is_the_last_donor_read() {
        let (_tmp, registry) = setup_registry();
        registry
            .register_donor(&donor_form("Ann", "A+", "North"))
            .unwrap();

        let registration = registry
            .register_donor(&donor_form("Ben Ng", "AB-", "Ward 9, South"))
            .unwrap();

        let last = registry
            .store()
            .read_all_donors()
            .unwrap()
            .last()
            .unwrap()
            .unwrap();
        assert_eq!(last, registration.donor);
        assert!(registration.log_warning.is_none());
    }

    #[test]
    fn registration_verifies_the_donor() {
        let (_tmp, registry) = setup_registry();

        registry
            .register_donor(&donor_form("Frank Castle", "O+", "Queens"))
            .unwrap();

        assert!(registry.verifier().is_verified("frank castle").unwrap());
    }

    #[test]
    fn invalid_donor_is_not_written() {
        let (_tmp, registry) = setup_registry();
        let before = fs::read_to_string(registry.store().donors_path()).unwrap();

        let error = registry
            .register_donor(&DonorForm {
                age: "15".to_string(),
                ..donor_form("Kid", "A+", "Here")
            })
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Validation(ValidationError::InvalidAge)
        ));
        let after = fs::read_to_string(registry.store().donors_path()).unwrap();
        assert_eq!(before, after);
        assert!(!registry.verifier().is_verified("Kid").unwrap());
    }

    #[test]
    fn log_failure_is_only_a_warning() {
        let (_tmp, registry) = setup_registry();
        fs::remove_file(registry.store().verified_names_path()).unwrap();

        let registration = registry
            .register_donor(&donor_form("Gina", "B-", "East"))
            .unwrap();

        assert!(matches!(
            registration.log_warning,
            Some(StorageError::Io { .. })
        ));
        assert_eq!(
            registry.find_donors(BloodType::BNegative, "").unwrap(),
            vec![registration.donor]
        );
    }

    #[test]
    fn donor_write_failure_is_an_error() {
        let (_tmp, registry) = setup_registry();
        fs::remove_file(registry.store().donors_path()).unwrap();

        let error = registry
            .register_donor(&donor_form("Hal", "A-", "West"))
            .unwrap_err();

        assert!(matches!(error, Error::Storage(StorageError::Io { .. })));
        assert!(!registry.verifier().is_verified("Hal").unwrap());
    }

    #[test]
    fn find_returns_only_the_requested_type_in_order() {
        let (_tmp, registry) = setup_registry();
        for (name, blood_type) in [("Ann", "O+"), ("Ben", "O-"), ("Cat", "A+"), ("Dan", "O+")] {
            registry
                .register_donor(&donor_form(name, blood_type, "Town"))
                .unwrap();
        }

        let names: Vec<_> = registry
            .find_donors(BloodType::OPositive, "")
            .unwrap()
            .into_iter()
            .map(|donor| donor.name)
            .collect();

        assert_eq!(names, vec!["Ann", "Dan"]);
    }

    #[test]
    fn find_filters_location_ignoring_case() {
        let (_tmp, registry) = setup_registry();
        registry
            .register_donor(&donor_form("Ann", "B+", "Springfield General"))
            .unwrap();
        registry
            .register_donor(&donor_form("Ben", "B+", "Shelbyville"))
            .unwrap();

        let found = registry.find_donors(BloodType::BPositive, "springfield").unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location, "Springfield General");
    }

    #[test]
    fn submitted_request_is_appended() {
        let (_tmp, registry) = setup_registry();

        let request = registry
            .submit_request(&RequestForm {
                name: "Patient".to_string(),
                blood_type: "A-".to_string(),
                location: "County".to_string(),
                urgency: "Medium".to_string(),
            })
            .unwrap();

        assert_eq!(request.blood_type, BloodType::ANegative);
        let content = fs::read_to_string(registry.store().requests_path()).unwrap();
        assert!(content.ends_with("Patient,A-,County,Medium\n"));
    }

    #[test]
    fn reopening_preserves_data() {
        let (tmp, registry) = setup_registry();
        registry
            .register_donor(&donor_form("Ann", "O-", "Here"))
            .unwrap();
        drop(registry);

        let reopened = Registry::open(tmp.path().join("data")).unwrap();

        assert_eq!(reopened.find_donors(BloodType::ONegative, "").unwrap().len(), 1);
        assert_eq!(
            reopened.store().read_verified_names().unwrap(),
            vec!["Alice", "Bob", "Ann"]
        );
    }
}
