use crate::error::StorageError;
use crate::record::Record;
use async_trait::async_trait;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The durable side of the record store.
///
/// A gateway only ever moves the whole record set: it is read once at
/// startup and replaced wholesale on every write-back.
#[async_trait]
pub trait RecordGateway: Send + Sync + 'static {
    /// Reads every stored record, in stored order.
    ///
    /// A backend that has never been written to returns an empty set.
    async fn load(&self) -> Result<Vec<Record>>;

    /// Replaces the stored record set with `records`.
    ///
    /// Either the whole new set becomes visible or the previous one is left
    /// intact; implementations must not leave a partial write behind.
    async fn write_all(&self, records: &[Record]) -> Result<()>;
}
