//! The closed set of state transitions the store accepts.
use tokio::sync::mpsc;

use crate::model::{UserId, UserRecord, UserUpdate};

/// Lifecycle of an async dispatcher call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Full collection pushed by the remote.
    SyncUsers(Vec<UserRecord>),
    SetEditingUser(Option<UserRecord>),
    FetchUsers(Phase<Vec<UserRecord>>),
    AddUser(Phase<UserRecord>),
    UpdateUser(Phase<UserUpdate>),
    /// The target id travels with every phase so a settlement can be matched
    /// to the row that was confirmed.
    DeleteUser(UserId, Phase<()>),
    SubscriptionOpened,
    SubscriptionClosed,
}

impl Action {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        use Phase::*;
        match self {
            Action::SyncUsers(_) => "users/syncUsers",
            Action::SetEditingUser(_) => "users/setEditingUser",
            Action::FetchUsers(Pending) => "users/fetchUsers/pending",
            Action::FetchUsers(Fulfilled(_)) => "users/fetchUsers/fulfilled",
            Action::FetchUsers(Rejected(_)) => "users/fetchUsers/rejected",
            Action::AddUser(Pending) => "users/addUser/pending",
            Action::AddUser(Fulfilled(_)) => "users/addUser/fulfilled",
            Action::AddUser(Rejected(_)) => "users/addUser/rejected",
            Action::UpdateUser(Pending) => "users/updateUser/pending",
            Action::UpdateUser(Fulfilled(_)) => "users/updateUser/fulfilled",
            Action::UpdateUser(Rejected(_)) => "users/updateUser/rejected",
            Action::DeleteUser(_, Pending) => "users/deleteUser/pending",
            Action::DeleteUser(_, Fulfilled(())) => "users/deleteUser/fulfilled",
            Action::DeleteUser(_, Rejected(_)) => "users/deleteUser/rejected",
            Action::SubscriptionOpened => "users/subscriptionOpened",
            Action::SubscriptionClosed => "users/subscriptionClosed",
        }
    }
}

pub type ActionSender = mpsc::UnboundedSender<Action>;
pub type ActionReceiver = mpsc::UnboundedReceiver<Action>;

/// Queue that carries actions from async tasks to the thread that owns the store.
pub fn action_channel() -> (ActionSender, ActionReceiver) {
    mpsc::unbounded_channel()
}
