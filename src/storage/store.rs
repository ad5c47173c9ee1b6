//! A filesystem backed store of donors, requests and verified names.
//!
//! Every operation opens the file it needs, does its work and closes it
//! again. No handles are kept between calls.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::{BloodRequest, Config, DONOR_FIELDS, Donor, REQUEST_FIELDS},
    storage::{
        StorageError, append,
        records::{self, DonorRecords},
    },
};

/// The names the verified-name log is seeded with when it is first created.
pub const SEED_NAMES: [&str; 2] = ["Alice", "Bob"];

/// A filesystem backed record store.
#[derive(Debug, Clone)]
pub struct Store {
    /// The directory the collections are kept in.
    root: PathBuf,
    config: Config,
}

impl Store {
    /// Creates a store rooted at `root`, using the file names in `config`.
    ///
    /// Nothing is touched on disk until an operation is called.
    #[must_use]
    pub const fn new(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// Creates a store rooted at `root`, reading file names from
    /// `root/config.toml` if it exists.
    ///
    /// A missing or unreadable config file falls back to the default names.
    #[must_use]
    pub fn open(root: PathBuf) -> Self {
        let config = load_config(&root);
        Self::new(root, config)
    }

    /// The storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file names in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the donor collection.
    #[must_use]
    pub fn donors_path(&self) -> PathBuf {
        self.root.join(self.config.donors())
    }

    /// Path of the request collection.
    #[must_use]
    pub fn requests_path(&self) -> PathBuf {
        self.root.join(self.config.requests())
    }

    /// Path of the verified-name log.
    #[must_use]
    pub fn verified_names_path(&self) -> PathBuf {
        self.root.join(self.config.verified_names())
    }

    /// Creates the storage root and any collection that does not exist yet.
    ///
    /// New donor and request collections get their header row. A new
    /// verified-name log is seeded with [`SEED_NAMES`]. Existing files are
    /// left untouched, so this is safe to call on every start.
    ///
    /// Returns the paths of the files that were created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a missing file cannot be created.
    pub fn ensure_initialized(&self) -> Result<Vec<PathBuf>, StorageError> {
        fs::create_dir_all(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let seed = SEED_NAMES.join("\n") + "\n";
        let collections = [
            (self.donors_path(), records::encode_row(DONOR_FIELDS)),
            (self.requests_path(), records::encode_row(REQUEST_FIELDS)),
            (self.verified_names_path(), Ok(seed.into_bytes())),
        ];

        let mut created = Vec::new();
        for (path, content) in collections {
            let content = content.map_err(|e| StorageError::io(&path, e))?;
            if append::create_new(&path, &content).map_err(|e| StorageError::io(&path, e))? {
                tracing::debug!("Created {}", path.display());
                created.push(path);
            }
        }

        Ok(created)
    }

    /// Appends one donor row.
    ///
    /// # Errors
    ///
    /// Returns an error if the donor collection is missing or cannot be
    /// written. A failed append leaves no partial row behind.
    pub fn append_donor(&self, donor: &Donor) -> Result<(), StorageError> {
        let path = self.donors_path();
        let row = records::encode_donor(donor).map_err(|e| StorageError::io(&path, e))?;
        append::append(&path, &row).map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!("Appended donor '{}' to {}", donor.name, path.display());
        Ok(())
    }

    /// Appends one request row.
    ///
    /// # Errors
    ///
    /// Returns an error if the request collection is missing or cannot be
    /// written. A failed append leaves no partial row behind.
    pub fn append_request(&self, request: &BloodRequest) -> Result<(), StorageError> {
        let path = self.requests_path();
        let row = records::encode_request(request).map_err(|e| StorageError::io(&path, e))?;
        append::append(&path, &row).map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!("Appended request for '{}' to {}", request.name, path.display());
        Ok(())
    }

    /// Reads the donor collection lazily, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be opened or its header is
    /// wrong. Errors in individual rows are yielded by the iterator, which
    /// stops after the first one.
    pub fn read_all_donors(&self) -> Result<DonorRecords, StorageError> {
        DonorRecords::open(&self.donors_path())
    }

    /// Appends one name to the verified-name log.
    ///
    /// The name is written as given; callers are expected to pass a single
    /// trimmed line.
    ///
    /// # Errors
    ///
    /// Returns an error if the log is missing or cannot be written.
    pub fn append_verified_name(&self, name: &str) -> Result<(), StorageError> {
        let path = self.verified_names_path();
        append::append(&path, format!("{name}\n").as_bytes())
            .map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!("Appended '{name}' to {}", path.display());
        Ok(())
    }

    /// Reads every name in the verified-name log, in order.
    ///
    /// Lines are trimmed and blank lines skipped. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    pub fn read_verified_names(&self) -> Result<Vec<String>, StorageError> {
        let path = self.verified_names_path();
        let content = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    if !path.exists() {
        return Config::default();
    }
    Config::load(&path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        Config::default()
    })
}
