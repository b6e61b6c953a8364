//! In-process remote store.
//!
//! Holds the collection behind an async mutex, assigns v4 uuids on insert and
//! publishes the whole collection on a watch channel after every successful
//! write. With a data path, each write is persisted on the blocking pool before
//! it is committed; the lock stays held meanwhile so files land in commit order.
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::{Mutex as AsyncMutex, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{RemoteStore, SnapshotFeed, persist};
use crate::error::{Operation, RemoteError};
use crate::model::{NewUser, UserId, UserPatch, UserRecord};

pub struct MemoryRemote {
    users: AsyncMutex<Vec<UserRecord>>,
    snapshots: watch::Sender<Vec<UserRecord>>,
    data_path: Option<PathBuf>,
    faults: Mutex<HashMap<Operation, String>>,
}

impl MemoryRemote {
    /// Empty, memory-only collection.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Memory-only collection seeded with `users`.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let (snapshots, _) = watch::channel(users.clone());
        Self {
            users: AsyncMutex::new(users),
            snapshots,
            data_path: None,
            faults: Mutex::new(HashMap::new()),
        }
    }

    /// Collection backed by a JSON file: loaded now, rewritten after every write.
    pub fn open(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        let users = persist::load(&path)?;
        info!(path = %path.display(), count = users.len(), "loaded users collection");
        let mut remote = Self::with_users(users);
        remote.data_path = Some(path);
        Ok(remote)
    }

    /// Make the next call of `operation` fail with `message`.
    pub fn fail_next(&self, operation: Operation, message: impl Into<String>) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.insert(operation, message.into());
        }
    }

    /// Number of open snapshot feeds.
    pub fn subscriber_count(&self) -> usize {
        self.snapshots.receiver_count()
    }

    fn take_fault(&self, operation: Operation) -> Result<(), RemoteError> {
        let mut faults = self
            .faults
            .lock()
            .map_err(|_| RemoteError::new(operation, "fault table lock poisoned"))?;
        match faults.remove(&operation) {
            Some(message) => {
                warn!(%operation, %message, "injected remote failure");
                Err(RemoteError::new(operation, message))
            }
            None => Ok(()),
        }
    }

    /// Apply `change` to a copy of the collection, persist it, then commit and publish.
    async fn write<R>(
        &self,
        operation: Operation,
        change: impl FnOnce(&mut Vec<UserRecord>) -> Result<R, RemoteError>,
    ) -> Result<R, RemoteError> {
        self.take_fault(operation)?;
        let mut users = self.users.lock().await;
        let mut next = users.clone();
        let out = change(&mut next)?;
        if let Some(path) = &self.data_path {
            let path = path.clone();
            let snapshot = next.clone();
            tokio::task::spawn_blocking(move || persist::save(&path, &snapshot))
                .await
                .map_err(|e| RemoteError::new(operation, e.to_string()))?
                .map_err(|e| RemoteError::new(operation, e.to_string()))?;
        }
        *users = next.clone();
        drop(users);
        self.snapshots.send_replace(next);
        Ok(out)
    }
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    #[tracing::instrument(skip(self, user), fields(name = %user.name))]
    async fn insert(&self, user: NewUser) -> Result<UserId, RemoteError> {
        let id = UserId::new(Uuid::new_v4().simple().to_string());
        let assigned = id.clone();
        self.write(Operation::Insert, move |users| {
            users.push(user.into_record(assigned));
            Ok(())
        })
        .await?;
        debug!(%id, "inserted");
        Ok(id)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update(&self, id: &UserId, fields: UserPatch) -> Result<(), RemoteError> {
        self.write(Operation::Update, |users| {
            let rec = users.iter_mut().find(|u| &u.id == id).ok_or_else(|| {
                RemoteError::new(Operation::Update, format!("no document with id {id}"))
            })?;
            rec.apply(&fields);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &UserId) -> Result<(), RemoteError> {
        // Deleting a missing document succeeds.
        self.write(Operation::Delete, |users| {
            users.retain(|u| &u.id != id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<UserRecord>, RemoteError> {
        self.take_fault(Operation::ListAll)?;
        Ok(self.users.lock().await.clone())
    }

    fn subscribe(&self) -> Result<SnapshotFeed, RemoteError> {
        self.take_fault(Operation::Subscribe)?;
        debug!(subscribers = self.subscriber_count() + 1, "subscribe");
        Ok(SnapshotFeed::new(self.snapshots.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_distinct_ids_in_order() {
        let remote = MemoryRemote::new();
        let a = remote.insert(NewUser::from_form("Ann", "").unwrap()).await.unwrap();
        let b = remote.insert(NewUser::from_form("Ann", "").unwrap()).await.unwrap();
        assert_ne!(a, b);
        let all = remote.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a);
        assert_eq!(all[1].id, b);
    }

    #[tokio::test]
    async fn update_unknown_id_fails_and_leaves_collection() {
        let remote = MemoryRemote::with_users(vec![UserRecord::new(UserId::new("1"), "Ann", None)]);
        let err = remote
            .update(&UserId::new("9"), UserPatch { name: Some("X".into()), email: None })
            .await
            .unwrap_err();
        assert_eq!(err.operation, Operation::Update);
        assert_eq!(remote.list_all().await.unwrap()[0].name, "Ann");
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let remote = MemoryRemote::new();
        remote.delete(&UserId::new("nope")).await.unwrap();
    }

    #[tokio::test]
    async fn injected_fault_fires_once() {
        let remote = MemoryRemote::new();
        remote.fail_next(Operation::Insert, "permission denied");
        let err = remote.insert(NewUser::from_form("Ann", "").unwrap()).await.unwrap_err();
        assert_eq!(err.to_string(), "insert failed: permission denied");
        assert!(remote.list_all().await.unwrap().is_empty());
        remote.insert(NewUser::from_form("Ann", "").unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn feed_starts_with_current_state_then_follows_writes() {
        let remote = MemoryRemote::with_users(vec![UserRecord::new(UserId::new("1"), "Ann", None)]);
        let mut feed = remote.subscribe().unwrap();
        assert_eq!(remote.subscriber_count(), 1);
        assert_eq!(feed.next().await.unwrap().len(), 1);

        remote.delete(&UserId::new("1")).await.unwrap();
        assert!(feed.next().await.unwrap().is_empty());

        drop(feed);
        assert_eq!(remote.subscriber_count(), 0);
    }
}
