use std::fmt;

use crate::io::local_store::{LocalStore, StoreError};
use crate::io::remote::RemoteClient;
use crate::model::record::Record;
use crate::ops::merge::{MergePolicy, merge_with};
use crate::ops::project_ops::{self, ActionError};

/// What the status indicator shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing attempted yet
    Checking,
    Syncing,
    /// Online, remote replica matches the working set
    Synced,
    /// Offline, working set came from the local cache
    LocalMode,
    /// Offline, working set was written to the local cache
    SavedLocally,
}

impl SyncStatus {
    pub fn is_online(self) -> bool {
        self == SyncStatus::Synced
    }

    /// Stable identifier for JSON output
    pub fn key(self) -> &'static str {
        match self {
            SyncStatus::Checking => "checking",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Synced => "synced",
            SyncStatus::LocalMode => "local_mode",
            SyncStatus::SavedLocally => "saved_locally",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Checking => write!(f, "Checking..."),
            SyncStatus::Syncing => write!(f, "Syncing..."),
            SyncStatus::Synced => write!(f, "Online (Synced)"),
            SyncStatus::LocalMode => write!(f, "Offline (Local Mode)"),
            SyncStatus::SavedLocally => write!(f, "Offline (Saved Locally)"),
        }
    }
}

/// Receives status transitions and the one failure users must see.
pub trait StatusSink {
    fn status_changed(&mut self, status: SyncStatus);

    /// The offline cache could not be written; unsynced edits exist only in memory.
    fn local_write_failed(&mut self, error: &StoreError);
}

/// The working set and the two replicas it is persisted to.
///
/// All calls block on the current thread; there is no background sync.
pub struct Session<R, L, S> {
    records: Vec<Record>,
    remote: R,
    store: L,
    sink: S,
    policy: MergePolicy,
    status: SyncStatus,
}

impl<R: RemoteClient, L: LocalStore, S: StatusSink> Session<R, L, S> {
    pub fn new(remote: R, store: L, sink: S) -> Self {
        Session {
            records: Vec::new(),
            remote,
            store,
            sink,
            policy: MergePolicy::default(),
            status: SyncStatus::Checking,
        }
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    fn set_status(&mut self, status: SyncStatus) {
        if status != self.status {
            tracing::info!(%status, "sync status changed");
        }
        self.status = status;
        self.sink.status_changed(status);
    }

    /// Replace the working set from the remote replica, folding in any
    /// local-only records. Falls back to the local cache when offline.
    pub fn load(&mut self) -> SyncStatus {
        self.set_status(SyncStatus::Syncing);
        match self.remote.fetch() {
            Ok(remote) => {
                let local = self.store.read();
                let merged = merge_with(remote, local, self.policy);
                self.records = merged.records;
                if merged.changed {
                    tracing::info!(count = self.records.len(), "merged offline projects into remote set");
                    return self.save();
                }
                self.set_status(SyncStatus::Synced);
            }
            Err(e) => {
                tracing::warn!("remote unavailable, using offline cache: {}", e);
                self.records = self.store.read();
                self.set_status(SyncStatus::LocalMode);
            }
        }
        self.status
    }

    /// Persist the working set: remote first, local cache if that fails.
    pub fn save(&mut self) -> SyncStatus {
        match self.remote.push(&self.records) {
            Ok(()) => {
                self.set_status(SyncStatus::Synced);
                if let Err(e) = self.store.clear() {
                    tracing::warn!("{}", e);
                }
            }
            Err(e) => {
                tracing::warn!("remote unavailable, saving locally: {}", e);
                if let Err(e) = self.store.write(&self.records) {
                    tracing::error!("{}", e);
                    self.sink.local_write_failed(&e);
                }
                self.set_status(SyncStatus::SavedLocally);
            }
        }
        self.status
    }

    // -----------------------------------------------------------------------
    // Mutating actions; each one saves.
    // -----------------------------------------------------------------------

    pub fn add(&mut self, name: &str) -> Result<usize, ActionError> {
        let idx = project_ops::add_project(&mut self.records, name)?;
        self.save();
        Ok(idx)
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool, ActionError> {
        let completed = project_ops::toggle_project(&mut self.records, index)?;
        self.save();
        Ok(completed)
    }

    pub fn delete(&mut self, index: usize) -> Result<Record, ActionError> {
        let removed = project_ops::delete_project(&mut self.records, index)?;
        self.save();
        Ok(removed)
    }

    pub fn break_down(&mut self, index: usize, parts: &[String]) -> Result<Record, ActionError> {
        let original = project_ops::break_down_project(&mut self.records, index, parts)?;
        self.save();
        Ok(original)
    }
}
