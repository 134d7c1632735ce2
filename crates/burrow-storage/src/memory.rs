use async_trait::async_trait;
use burrow_core::gateway::{RecordGateway, Result};
use burrow_core::{Record, StorageError};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    writes: usize,
    fail_loads: bool,
    fail_writes: bool,
}

/// In-memory implementation of [`RecordGateway`].
///
/// Clones share the same state, so a test can keep a handle to inspect what
/// the store wrote back and to inject load or write failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that loads the given records.
    pub fn with_records(records: Vec<Record>) -> Self {
        let gateway = Self::new();
        gateway.state.lock().records = records;
        gateway
    }

    /// Returns the last written (or seeded) record set.
    pub fn snapshot(&self) -> Vec<Record> {
        self.state.lock().records.clone()
    }

    /// Returns how many write-backs have succeeded.
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    pub fn fail_loads(&self, fail: bool) {
        self.state.lock().fail_loads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

#[async_trait]
impl RecordGateway for InMemoryGateway {
    async fn load(&self) -> Result<Vec<Record>> {
        let state = self.state.lock();
        if state.fail_loads {
            return Err(StorageError::Load("injected load failure".to_string()));
        }
        Ok(state.records.clone())
    }

    async fn write_all(&self, records: &[Record]) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StorageError::Write("injected write failure".to_string()));
        }
        state.records = records.to_vec();
        state.writes += 1;
        Ok(())
    }
}
