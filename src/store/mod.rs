//! State container: the cached user list plus request status, mutated only through [`Action`]s.
//!
//! The store is owned by the UI thread. Async work reports back by sending
//! actions over an [`ActionSender`]; the owner applies them with [`Store::drain`],
//! so transitions never interleave.
//!
//! While a subscription is attached (`live`), snapshots are the only thing that
//! rewrites `list`. Fulfilled fetch/add/update/delete transitions then only touch
//! status, error and the edited record, and the next snapshot brings the list
//! in line with the remote.
pub mod action;

use tracing::debug;

use crate::model::UserRecord;

pub use action::{Action, ActionReceiver, ActionSender, Phase, action_channel};

/// Request status of the last remote operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Succeeded => "succeeded",
            Status::Failed => "failed",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersState {
    pub list: Vec<UserRecord>,
    pub status: Status,
    pub error: Option<String>,
    pub editing_user: Option<UserRecord>,
    pub live: bool,
}

/// Apply one action to `state`. Every action leaves `status` at a defined value.
pub fn reduce(state: &mut UsersState, action: Action) {
    match action {
        Action::SyncUsers(records) => {
            if let Some(editing) = &state.editing_user {
                if !records.iter().any(|u| u.id == editing.id) {
                    state.editing_user = None;
                }
            }
            state.list = records;
            state.status = Status::Succeeded;
        }
        Action::SetEditingUser(user) => {
            state.editing_user = user;
        }
        Action::FetchUsers(phase) => match phase {
            Phase::Pending => {
                state.status = Status::Loading;
                state.error = None;
            }
            Phase::Fulfilled(records) => {
                state.status = Status::Succeeded;
                if !state.live {
                    state.list = records;
                }
            }
            Phase::Rejected(message) => reject(state, message),
        },
        Action::AddUser(phase) => match phase {
            Phase::Pending => state.error = None,
            // The record shows up with the next snapshot.
            Phase::Fulfilled(_) => state.status = Status::Succeeded,
            Phase::Rejected(message) => reject(state, message),
        },
        Action::UpdateUser(phase) => match phase {
            Phase::Pending => state.error = None,
            Phase::Fulfilled(update) => {
                state.status = Status::Succeeded;
                state.editing_user = None;
                if !state.live {
                    if let Some(rec) = state.list.iter_mut().find(|u| u.id == update.id) {
                        rec.apply(&update.patch);
                    }
                }
            }
            Phase::Rejected(message) => reject(state, message),
        },
        Action::DeleteUser(id, phase) => match phase {
            Phase::Pending => state.error = None,
            Phase::Fulfilled(()) => {
                state.status = Status::Succeeded;
                if state.editing_user.as_ref().is_some_and(|u| u.id == id) {
                    state.editing_user = None;
                }
                if !state.live {
                    state.list.retain(|u| u.id != id);
                }
            }
            Phase::Rejected(message) => reject(state, message),
        },
        Action::SubscriptionOpened => state.live = true,
        Action::SubscriptionClosed => state.live = false,
    }
}

fn reject(state: &mut UsersState, message: String) {
    state.status = Status::Failed;
    state.error = Some(message);
}

/// Explicitly constructed store; one per mounted UI.
#[derive(Debug, Default)]
pub struct Store {
    state: UsersState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UsersState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.kind(), "dispatch");
        reduce(&mut self.state, action);
    }

    /// Apply every action currently queued on `rx`; returns them in the order applied.
    pub fn drain(&mut self, rx: &mut ActionReceiver) -> Vec<Action> {
        let mut applied = Vec::new();
        while let Ok(action) = rx.try_recv() {
            self.dispatch(action.clone());
            applied.push(action);
        }
        applied
    }
}
