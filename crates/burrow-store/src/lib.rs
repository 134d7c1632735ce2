//! The Burrow record store.
//!
//! [`RecordStore`] owns the authoritative, ordered set of short-code
//! records. It is loaded once from a [`RecordGateway`] at bootstrap, and every
//! mutation is written back through the gateway before it becomes visible.
//!
//! ```rust,no_run
//! use burrow_generator::RandomGenerator;
//! use burrow_storage::CsvFileGateway;
//! use burrow_store::{RecordStore, StoreSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RecordStore::bootstrap(
//!     StoreSettings::default(),
//!     CsvFileGateway::new("urls.csv"),
//!     RandomGenerator::new(),
//! )
//! .await?;
//!
//! let code = store.create("https://example.com", "2999-01-01", None).await?;
//! assert_eq!(store.resolve(&code).await?, "https://example.com");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod settings;
pub mod store;

pub use burrow_core::{Record, RecordGateway, ShortCode};
pub use error::StoreError;
pub use settings::StoreSettings;
pub use store::RecordStore;
