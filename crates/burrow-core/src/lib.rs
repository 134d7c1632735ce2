//! Core types and traits for the Burrow short-code store.
//!
//! This crate provides the record model and the collaborator contracts
//! (clock, expiry calendar, persistence gateway) shared by the storage
//! backends and the record store.

pub mod clock;
pub mod error;
pub mod expiry;
pub mod gateway;
pub mod record;
pub mod shortcode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ExpiryError, StorageError};
pub use expiry::ExpiryCalendar;
pub use gateway::RecordGateway;
pub use record::Record;
pub use shortcode::ShortCode;
