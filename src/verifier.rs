//! Name lookups against the verified-name log.
//!
//! Verification is a two-step protocol: check first, and only add a name
//! when the caller decides to. Nothing here adds a name on its own.

use crate::{
    Error,
    domain::validation::validate_log_entry,
    storage::{StorageError, Store},
};

/// Checks and extends the verified-name log of a [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a> {
    store: &'a Store,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier over `store`.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Whether `name` appears in the log, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    pub fn is_verified(&self, name: &str) -> Result<bool, StorageError> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(false);
        }
        Ok(self
            .store
            .read_verified_names()?
            .iter()
            .any(|entry| entry.to_lowercase() == wanted))
    }

    /// Appends `name` to the log.
    ///
    /// Adding a name that is already present writes a duplicate line, which
    /// does not change the outcome of [`Self::is_verified`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or spans lines, or a
    /// storage error if the log cannot be written.
    pub fn add_verified(&self, name: &str) -> Result<(), Error> {
        let name = validate_log_entry(name)?;
        self.store.append_verified_name(name)?;
        Ok(())
    }
}
