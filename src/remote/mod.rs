//! Remote store collaborator: CRUD over the `users` collection plus snapshot subscriptions.
//!
//! The state container never talks to a remote directly; the dispatchers and the
//! sync bridge go through [`RemoteStore`]. [`MemoryRemote`] is the in-process
//! adapter used by the binary and by tests.
//!
use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::RemoteError;
use crate::model::{NewUser, UserId, UserPatch, UserRecord};

pub mod memory;
pub mod persist;

pub use memory::MemoryRemote;

/// Operations the remote document collection offers.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert a record; the remote assigns and returns its id.
    async fn insert(&self, user: NewUser) -> Result<UserId, RemoteError>;

    /// Overwrite the fields present in `fields` on the record with `id`.
    async fn update(&self, id: &UserId, fields: UserPatch) -> Result<(), RemoteError>;

    /// Remove the record with `id`.
    async fn delete(&self, id: &UserId) -> Result<(), RemoteError>;

    /// Current contents of the collection, in collection order.
    async fn list_all(&self) -> Result<Vec<UserRecord>, RemoteError>;

    /// Open a subscription. The first snapshot is the current collection; every
    /// change afterwards pushes the full collection again.
    fn subscribe(&self) -> Result<SnapshotFeed, RemoteError>;
}

/// Receiving end of a subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SnapshotFeed {
    rx: watch::Receiver<Vec<UserRecord>>,
}

impl SnapshotFeed {
    /// Wrap a watch receiver so that the value it currently holds is delivered first.
    pub fn new(mut rx: watch::Receiver<Vec<UserRecord>>) -> Self {
        rx.mark_changed();
        Self { rx }
    }

    /// Wait for the next snapshot. Returns `None` once the remote has gone away.
    ///
    /// Snapshots are full state, so when several changes land before the caller
    /// polls again only the latest is returned.
    pub async fn next(&mut self) -> Option<Vec<UserRecord>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
