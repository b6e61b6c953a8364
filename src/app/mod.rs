//! Application state types and entry glue.
//!
//! [`AppState`] owns the store and the transient UI state (search text, add
//! form, edit draft, pending delete, toast). Async work is spawned on the tokio
//! runtime and reports back through the store's action channel, which
//! [`AppState::pump`] drains once per tick on the UI thread.
//!
pub mod keymap;
pub mod theme;
pub mod toast;
pub mod update;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::dispatch::Dispatcher;
use crate::model::{NewUser, UserId, UserPatch, UserRecord};
use crate::remote::RemoteStore;
use crate::search::filter_users;
use crate::store::{Action, ActionReceiver, Phase, Store, UsersState, action_channel};
use crate::sync::{self, SyncHandle};

pub use keymap::{KeyAction, Keymap};
pub use theme::Theme;
pub use toast::{DEFAULT_TOAST_TTL, Toast, ToastVariant};

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Add,
    Edit,
}

/// Which text field of a two-field form has focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Email,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        }
    }
}

/// The "new user" form.
#[derive(Clone, Debug, Default)]
pub struct AddForm {
    pub name: String,
    pub email: String,
    pub field: FormField,
}

impl AddForm {
    /// Submit is disabled while the trimmed name is empty.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.field = FormField::Name;
    }
}

/// Local draft for the row being edited; committed only on save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub field: FormField,
}

impl EditDraft {
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email_or_empty().to_string(),
            field: FormField::Name,
        }
    }

    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }
}

/// UI settings resolved from config files and the command line.
#[derive(Clone, Debug)]
pub struct UiSettings {
    pub theme: Theme,
    pub keymap: Keymap,
    pub toast_ttl: Duration,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::mocha(),
            keymap: Keymap::default(),
            toast_ttl: DEFAULT_TOAST_TTL,
        }
    }
}

pub struct AppState {
    pub started_at: Instant,
    store: Store,
    actions_rx: ActionReceiver,
    dispatcher: Dispatcher,
    runtime: Handle,
    subscription: Option<SyncHandle>,
    pub input_mode: InputMode,
    pub search_query: String,
    pub add_form: AddForm,
    pub edit_draft: Option<EditDraft>,
    pub pending_delete: Option<UserId>,
    pub toast: Toast,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_help: bool,
}

impl AppState {
    /// Build the UI state around a fresh store. Async work is spawned on `runtime`.
    pub fn new(remote: Arc<dyn RemoteStore>, runtime: Handle, settings: UiSettings) -> Self {
        let (tx, actions_rx) = action_channel();
        Self {
            started_at: Instant::now(),
            store: Store::new(),
            actions_rx,
            dispatcher: Dispatcher::new(remote, tx),
            runtime,
            subscription: None,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            add_form: AddForm::default(),
            edit_draft: None,
            pending_delete: None,
            toast: Toast::new(settings.toast_ttl),
            selected_index: 0,
            rows_per_page: 10,
            theme: settings.theme,
            keymap: settings.keymap,
            show_help: false,
        }
    }

    pub fn state(&self) -> &UsersState {
        self.store.state()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Attach the snapshot subscription. If the remote refuses, fall back to a one-off fetch.
    pub fn mount(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let _guard = self.runtime.enter();
        match sync::attach(self.dispatcher.remote(), self.dispatcher.actions()) {
            Ok(handle) => self.subscription = Some(handle),
            Err(err) => {
                warn!(%err, "live updates unavailable; loading once");
                self.refresh();
            }
        }
    }

    /// Detach the subscription. In-flight dispatcher calls keep running.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            info!("detached from users collection");
        }
    }

    pub fn is_live(&self) -> bool {
        self.state().live
    }

    /// Records matching the current search text, in list order.
    pub fn filtered(&self) -> Vec<&UserRecord> {
        filter_users(&self.state().list, &self.search_query)
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.filtered().get(self.selected_index).copied()
    }

    /// Apply queued actions, react to settled calls, and advance the toast timer.
    /// Returns how many actions were applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let applied = self.store.drain(&mut self.actions_rx);
        for action in &applied {
            self.react(action, now);
        }
        self.reconcile();
        self.toast.tick(now);
        applied.len()
    }

    fn react(&mut self, action: &Action, now: Instant) {
        match action {
            Action::AddUser(Phase::Fulfilled(_)) => {
                self.toast.show(ToastVariant::Success, "User added successfully", now);
                self.add_form.clear();
            }
            Action::UpdateUser(Phase::Fulfilled(_)) => {
                self.toast.show(ToastVariant::Success, "User updated successfully", now);
            }
            Action::DeleteUser(id, phase) => {
                if matches!(phase, Phase::Fulfilled(())) {
                    self.toast.show(ToastVariant::Success, "User deleted successfully", now);
                }
                if !matches!(phase, Phase::Pending) && self.pending_delete.as_ref() == Some(id) {
                    self.pending_delete = None;
                }
            }
            // Still holding a handle means the remote ended the feed, not unmount.
            Action::SubscriptionClosed if self.subscription.is_some() => {
                self.subscription = None;
                warn!("remote ended the users subscription");
                self.toast.show(ToastVariant::Info, "Live updates stopped", now);
            }
            _ => {}
        }
    }

    /// Bring transient UI state back in line with the store after actions were applied.
    fn reconcile(&mut self) {
        let editing = self.state().editing_user.as_ref().map(|u| u.id.clone());
        let draft_stale = match (&self.edit_draft, &editing) {
            (Some(draft), Some(id)) => &draft.id != id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if draft_stale {
            self.edit_draft = None;
        }
        if self.input_mode == InputMode::Edit && self.edit_draft.is_none() {
            self.input_mode = InputMode::Normal;
        }

        if let Some(id) = &self.pending_delete {
            if !self.state().list.iter().any(|u| &u.id == id) {
                self.pending_delete = None;
            }
        }

        let len = self.filtered().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(fut);
    }

    /// Reload the whole list from the remote.
    pub fn refresh(&mut self) {
        let d = self.dispatcher.clone();
        self.spawn(async move {
            let _ = d.fetch_users().await;
        });
    }

    /// Submit the add form. Does nothing (and returns `false`) when the trimmed name is empty.
    pub fn submit_add(&mut self) -> bool {
        let Some(user) = NewUser::from_form(&self.add_form.name, &self.add_form.email) else {
            return false;
        };
        let d = self.dispatcher.clone();
        self.spawn(async move {
            let _ = d.add_user(user).await;
        });
        true
    }

    /// Start editing the selected row.
    pub fn begin_edit(&mut self) {
        let Some(user) = self.selected_user().cloned() else {
            return;
        };
        self.edit_draft = Some(EditDraft::from_user(&user));
        self.store.dispatch(Action::SetEditingUser(Some(user)));
        self.input_mode = InputMode::Edit;
    }

    /// Commit the edit draft. Does nothing (and returns `false`) when the trimmed name is empty.
    pub fn save_edit(&mut self) -> bool {
        let Some(draft) = &self.edit_draft else {
            return false;
        };
        let Some(patch) = UserPatch::from_draft(&draft.name, &draft.email) else {
            return false;
        };
        let id = draft.id.clone();
        let d = self.dispatcher.clone();
        self.spawn(async move {
            let _ = d.update_user(id, patch).await;
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.store.dispatch(Action::SetEditingUser(None));
        self.edit_draft = None;
        self.input_mode = InputMode::Normal;
    }

    /// Put `id` into confirm-pending state. Ignored (returns `false`) while another
    /// row is already pending.
    pub fn request_delete(&mut self, id: UserId) -> bool {
        match &self.pending_delete {
            Some(pending) if pending != &id => false,
            _ => {
                self.pending_delete = Some(id);
                true
            }
        }
    }

    /// Delete the pending row. The pending id is cleared once the call settles.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.clone() else {
            return false;
        };
        let d = self.dispatcher.clone();
        self.spawn(async move {
            let _ = d.delete_user(id).await;
        });
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let next = self.selected_index.saturating_add_signed(delta);
        self.selected_index = next.min(len - 1);
    }

    pub fn page(&mut self, pages: isize) {
        let step = self.rows_per_page.max(1) as isize;
        self.move_selection(pages.saturating_mul(step));
    }
}

/// Directory holding `theme.conf` and `keybinds.conf`.
///
/// `$XDG_CONFIG_HOME/user-directory`, else `$HOME/.config/user-directory`.
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })?;
    Some(base.join("user-directory"))
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
