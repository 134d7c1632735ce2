use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A stored short-code record.
///
/// Field order is the durable column order: `target`, `code`, `expiry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The URL the code resolves to.
    pub target: String,
    /// The lookup key. Immutable once the record is created.
    pub code: ShortCode,
    /// Expiry date rendered by the store's [`ExpiryCalendar`](crate::ExpiryCalendar).
    pub expiry: String,
}

impl Record {
    pub fn new(target: impl Into<String>, code: ShortCode, expiry: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            code,
            expiry: expiry.into(),
        }
    }
}
