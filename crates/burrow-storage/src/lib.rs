//! Persistence gateways for the record store.
//!
//! [`CsvFileGateway`] keeps the record set in a single flat CSV file that is
//! replaced atomically on every write-back. [`InMemoryGateway`] keeps it in
//! memory, for tests and throwaway stores.

pub mod csv_file;
pub mod memory;

pub use burrow_core::{Record, RecordGateway, StorageError};
pub use csv_file::CsvFileGateway;
pub use memory::InMemoryGateway;
