use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per practice table name.
///
/// Everything that creates, replaces or drops a physical table holds the guard for that name until
/// it is done, so two requests can never race on the same table.
#[derive(Debug, Default)]
pub struct TableLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, table_name: &str) -> OwnedMutexGuard<()> {
        // the map shard must not stay locked across the await
        let mutex = self
            .locks
            .entry(table_name.to_owned())
            .or_default()
            .value()
            .clone();

        trace!(table_name, "waiting for table lock");
        mutex.lock_owned().await
    }

    /// Drops the mutex of a name nobody holds or waits for.
    pub fn forget(&self, table_name: &str) {
        self.locks
            .remove_if(table_name, |_, mutex| Arc::strong_count(mutex) == 1);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}
