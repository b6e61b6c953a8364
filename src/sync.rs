//! Synchronization bridge: forwards every remote snapshot into the store as a full replace.
//!
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::RemoteError;
use crate::remote::RemoteStore;
use crate::store::{Action, ActionSender};

/// Live subscription. Detaches on [`unsubscribe`](SyncHandle::unsubscribe) or drop.
#[derive(Debug)]
pub struct SyncHandle {
    task: Option<JoinHandle<()>>,
    actions: ActionSender,
}

/// Open a subscription on `remote` and forward each snapshot as [`Action::SyncUsers`].
///
/// Must be called from within a tokio runtime. Sends [`Action::SubscriptionOpened`]
/// before the first snapshot and [`Action::SubscriptionClosed`] if the remote
/// ends the feed.
pub fn attach(remote: &dyn RemoteStore, actions: &ActionSender) -> Result<SyncHandle, RemoteError> {
    let mut feed = remote.subscribe()?;
    let _ = actions.send(Action::SubscriptionOpened);
    let tx = actions.clone();
    let task = tokio::spawn(async move {
        while let Some(records) = feed.next().await {
            debug!(count = records.len(), "snapshot");
            if tx.send(Action::SyncUsers(records)).is_err() {
                break;
            }
        }
        debug!("snapshot feed ended");
        let _ = tx.send(Action::SubscriptionClosed);
    });
    info!("subscribed to users collection");
    Ok(SyncHandle {
        task: Some(task),
        actions: actions.clone(),
    })
}

impl SyncHandle {
    pub fn is_attached(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop forwarding and release the remote feed. No snapshot is forwarded after
    /// this returns.
    pub async fn unsubscribe(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            let _ = self.actions.send(Action::SubscriptionClosed);
            info!("unsubscribed from users collection");
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = self.actions.send(Action::SubscriptionClosed);
        }
    }
}
