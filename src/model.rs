//! User record types shared by the remote store, the state container and the UI.
//!
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by the remote store on insert.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as stored in the `users` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRecord {
    pub fn new(id: UserId, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }

    /// Overwrite the fields present in `patch`. An empty email clears it.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = if email.is_empty() { None } else { Some(email.clone()) };
        }
    }

    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// Payload for inserting a new user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewUser {
    /// Build from raw form input. Returns `None` when the trimmed name is empty.
    pub fn from_form(name: &str, email: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let email = email.trim();
        Some(Self {
            name: name.to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        })
    }

    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Partial field replace for an existing user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Full replace of both fields from an edit draft, trimmed.
    /// Returns `None` when the trimmed name is empty.
    pub fn from_draft(name: &str, email: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: Some(name.to_string()),
            email: Some(email.trim().to_string()),
        })
    }
}

/// Result of a confirmed update: the id plus the fields that were written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: UserId,
    pub patch: UserPatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_from_form_trims_and_drops_blank_email() {
        let u = NewUser::from_form("  Ann  ", "   ").unwrap();
        assert_eq!(u.name, "Ann");
        assert_eq!(u.email, None);
        assert!(NewUser::from_form(" \t ", "a@x.com").is_none());
    }

    #[test]
    fn apply_patch_overwrites_only_present_fields() {
        let mut rec = UserRecord::new(UserId::new("1"), "Ann", Some("a@x.com".into()));
        rec.apply(&UserPatch { name: Some("Anna".into()), email: None });
        assert_eq!(rec.name, "Anna");
        assert_eq!(rec.email.as_deref(), Some("a@x.com"));

        rec.apply(&UserPatch { name: None, email: Some(String::new()) });
        assert_eq!(rec.email, None);
    }

    #[test]
    fn record_serializes_without_missing_email() {
        let rec = UserRecord::new(UserId::new("abc"), "Bob", None);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"id":"abc","name":"Bob"}"#);
    }
}
