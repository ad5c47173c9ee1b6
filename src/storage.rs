mod append;
mod error;
mod records;
mod store;

pub use error::{ParseError, ParseErrorKind, StorageError};
pub use records::DonorRecords;
pub use store::{SEED_NAMES, Store};
