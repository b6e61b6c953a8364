//! Action dispatchers: one remote call each, reported to the store as pending/fulfilled/rejected.
//!
//! Dispatchers do not validate input, retry, or time out. A failure is sent to the
//! store as a rejected action and returned to the caller.
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::model::{NewUser, UserId, UserPatch, UserRecord, UserUpdate};
use crate::remote::RemoteStore;
use crate::store::{Action, ActionSender, Phase};

#[derive(Clone)]
pub struct Dispatcher {
    remote: Arc<dyn RemoteStore>,
    actions: ActionSender,
}

impl Dispatcher {
    pub fn new(remote: Arc<dyn RemoteStore>, actions: ActionSender) -> Self {
        Self { remote, actions }
    }

    pub fn remote(&self) -> &dyn RemoteStore {
        self.remote.as_ref()
    }

    pub fn actions(&self) -> &ActionSender {
        &self.actions
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, RemoteError> {
        self.emit(Action::FetchUsers(Phase::Pending));
        let result = self.remote.list_all().await;
        self.settle(result, Action::FetchUsers)
    }

    #[tracing::instrument(skip(self, user), fields(name = %user.name))]
    pub async fn add_user(&self, user: NewUser) -> Result<UserRecord, RemoteError> {
        self.emit(Action::AddUser(Phase::Pending));
        let result = self
            .remote
            .insert(user.clone())
            .await
            .map(|id| user.into_record(id));
        self.settle(result, Action::AddUser)
    }

    #[tracing::instrument(skip(self, fields))]
    pub async fn update_user(&self, id: UserId, fields: UserPatch) -> Result<UserUpdate, RemoteError> {
        self.emit(Action::UpdateUser(Phase::Pending));
        let result = self
            .remote
            .update(&id, fields.clone())
            .await
            .map(|()| UserUpdate { id, patch: fields });
        self.settle(result, Action::UpdateUser)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<UserId, RemoteError> {
        self.emit(Action::DeleteUser(id.clone(), Phase::Pending));
        let result = self.remote.delete(&id).await;
        self.settle(result, |phase| Action::DeleteUser(id.clone(), phase))?;
        Ok(id)
    }

    fn emit(&self, action: Action) {
        if self.actions.send(action).is_err() {
            debug!("store detached; dropping action");
        }
    }

    fn settle<T: Clone>(
        &self,
        result: Result<T, RemoteError>,
        wrap: impl FnOnce(Phase<T>) -> Action,
    ) -> Result<T, RemoteError> {
        match &result {
            Ok(value) => self.emit(wrap(Phase::Fulfilled(value.clone()))),
            Err(err) => {
                warn!(%err, "remote call failed");
                self.emit(wrap(Phase::Rejected(err.to_string())));
            }
        }
        result
    }
}
