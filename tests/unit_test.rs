// Unit tests for user-directory
// These tests work with the public API only

#[cfg(test)]
mod store_tests {
    use user_directory::model::{UserId, UserPatch, UserRecord, UserUpdate};
    use user_directory::store::{Action, Phase, Status, Store, UsersState};

    fn user(id: &str, name: &str, email: Option<&str>) -> UserRecord {
        UserRecord::new(UserId::new(id), name, email.map(|s| s.to_string()))
    }

    #[test]
    fn test_initial_state() {
        let store = Store::new();
        assert_eq!(store.state(), &UsersState::default());
        assert_eq!(store.state().status, Status::Idle);
        assert!(!store.state().live);
    }

    #[test]
    fn test_list_is_always_the_last_snapshot() {
        let snapshots = vec![
            vec![user("1", "Ann", None)],
            vec![],
            vec![user("2", "Bob", None), user("1", "Ann", None)],
            vec![user("3", "Cid", Some("c@x.com"))],
        ];
        let mut store = Store::new();
        for snap in snapshots {
            store.dispatch(Action::SyncUsers(snap.clone()));
            assert_eq!(store.state().list, snap);
        }
    }

    #[test]
    fn test_update_overwrites_only_named_fields() {
        let mut store = Store::new();
        store.dispatch(Action::SyncUsers(vec![
            user("1", "Ann", Some("a@x.com")),
            user("2", "Bob", None),
        ]));
        store.dispatch(Action::SetEditingUser(Some(user("2", "Bob", None))));
        store.dispatch(Action::UpdateUser(Phase::Fulfilled(UserUpdate {
            id: UserId::new("2"),
            patch: UserPatch {
                name: None,
                email: Some("bob@x.com".into()),
            },
        })));
        assert_eq!(store.state().list[1], user("2", "Bob", Some("bob@x.com")));
        assert_eq!(store.state().list[0], user("1", "Ann", Some("a@x.com")));
        assert!(store.state().editing_user.is_none());
    }

    #[test]
    fn test_update_for_unknown_id_only_changes_status() {
        let mut store = Store::new();
        store.dispatch(Action::SyncUsers(vec![user("1", "Ann", None)]));
        store.dispatch(Action::UpdateUser(Phase::Fulfilled(UserUpdate {
            id: UserId::new("9"),
            patch: UserPatch {
                name: Some("Zed".into()),
                email: None,
            },
        })));
        assert_eq!(store.state().list, vec![user("1", "Ann", None)]);
        assert_eq!(store.state().status, Status::Succeeded);
    }

    #[test]
    fn test_delete_removes_every_entry_with_id() {
        let mut store = Store::new();
        store.dispatch(Action::SyncUsers(vec![
            user("5", "Eve", None),
            user("7", "Gus", None),
        ]));
        store.dispatch(Action::SetEditingUser(Some(user("5", "Eve", None))));
        store.dispatch(Action::DeleteUser(UserId::new("5"), Phase::Fulfilled(())));
        assert!(store.state().list.iter().all(|u| u.id != UserId::new("5")));
        assert!(store.state().editing_user.is_none());
    }

    #[test]
    fn test_set_editing_user_is_not_validated() {
        let mut store = Store::new();
        store.dispatch(Action::SetEditingUser(Some(user("404", "Ghost", None))));
        assert_eq!(store.state().editing_user.as_ref().unwrap().name, "Ghost");
        store.dispatch(Action::SetEditingUser(None));
        assert!(store.state().editing_user.is_none());
    }

    #[test]
    fn test_action_kinds_are_namespaced() {
        assert_eq!(Action::SyncUsers(vec![]).kind(), "users/syncUsers");
        assert_eq!(
            Action::DeleteUser(UserId::new("5"), Phase::Rejected("x".into())).kind(),
            "users/deleteUser/rejected"
        );
    }
}

#[cfg(test)]
mod search_tests {
    use user_directory::model::{UserId, UserRecord};
    use user_directory::search::filter_users;

    #[test]
    fn test_search_case_does_not_matter() {
        let users = vec![
            UserRecord::new(UserId::new("1"), "Ann", Some("a@x.com".into())),
            UserRecord::new(UserId::new("2"), "Bob", Some("b@x.com".into())),
        ];
        let upper: Vec<_> = filter_users(&users, "Ann");
        let lower: Vec<_> = filter_users(&users, "ann");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].name, "Ann");
    }

    #[test]
    fn test_search_matches_inside_words() {
        let users = vec![UserRecord::new(
            UserId::new("1"),
            "Marianne",
            Some("m@example.org".into()),
        )];
        assert_eq!(filter_users(&users, "IAN").len(), 1);
        assert_eq!(filter_users(&users, "example").len(), 1);
        assert!(filter_users(&users, "bob").is_empty());
    }
}

#[cfg(test)]
mod model_tests {
    use user_directory::model::{NewUser, UserPatch};

    #[test]
    fn test_blank_names_are_rejected_by_forms() {
        assert!(NewUser::from_form("   ", "a@x.com").is_none());
        assert!(UserPatch::from_draft("\t", "").is_none());
    }

    #[test]
    fn test_draft_is_a_full_trimmed_replace() {
        let patch = UserPatch::from_draft(" Ann ", "  ").unwrap();
        assert_eq!(patch.name.as_deref(), Some("Ann"));
        assert_eq!(patch.email.as_deref(), Some(""));
    }
}

#[cfg(test)]
mod app_tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use user_directory::app::{AppState, InputMode, UiSettings};
    use user_directory::model::{UserId, UserRecord};
    use user_directory::remote::{MemoryRemote, RemoteStore};

    fn seeded() -> Arc<MemoryRemote> {
        Arc::new(MemoryRemote::with_users(vec![
            UserRecord::new(UserId::new("5"), "Eve", None),
            UserRecord::new(UserId::new("7"), "Gus", None),
        ]))
    }

    async fn settle(app: &mut AppState) {
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.pump(Instant::now());
        }
    }

    #[tokio::test]
    async fn test_single_pending_delete() {
        let remote = seeded();
        let mut app = AppState::new(remote, tokio::runtime::Handle::current(), UiSettings::default());
        app.mount();
        settle(&mut app).await;

        assert!(app.request_delete(UserId::new("5")));
        assert_eq!(app.pending_delete, Some(UserId::new("5")));

        // Another row cannot enter confirm state while 5 is pending.
        assert!(!app.request_delete(UserId::new("7")));
        assert_eq!(app.pending_delete, Some(UserId::new("5")));

        app.cancel_delete();
        assert!(app.request_delete(UserId::new("7")));
        assert_eq!(app.pending_delete, Some(UserId::new("7")));
    }

    #[tokio::test]
    async fn test_late_delete_keeps_newer_pending_row() {
        let remote = seeded();
        let mut app = AppState::new(
            remote.clone(),
            tokio::runtime::Handle::current(),
            UiSettings::default(),
        );
        app.mount();
        settle(&mut app).await;

        assert!(app.request_delete(UserId::new("5")));
        assert!(app.confirm_delete());
        app.cancel_delete();
        assert!(app.request_delete(UserId::new("7")));

        // The delete of 5 settles after 7 became pending.
        settle(&mut app).await;
        assert!(app.state().list.iter().all(|u| u.id != UserId::new("5")));
        assert_eq!(app.pending_delete, Some(UserId::new("7")));
    }

    #[tokio::test]
    async fn test_whitespace_name_does_not_dispatch() {
        let remote = seeded();
        let mut app = AppState::new(
            remote.clone(),
            tokio::runtime::Handle::current(),
            UiSettings::default(),
        );
        app.mount();
        settle(&mut app).await;
        let before = app.state().list.clone();

        app.add_form.name = "    ".into();
        app.add_form.email = "x@y.z".into();
        assert!(!app.add_form.can_submit());
        assert!(!app.submit_add());
        settle(&mut app).await;

        assert_eq!(app.state().list, before);
        assert_eq!(remote.list_all().await.unwrap().len(), 2);
        assert!(!app.toast.show);
    }

    #[tokio::test]
    async fn test_edit_mode_ends_when_record_disappears() {
        let remote = seeded();
        let mut app = AppState::new(
            remote.clone(),
            tokio::runtime::Handle::current(),
            UiSettings::default(),
        );
        app.mount();
        settle(&mut app).await;

        app.begin_edit();
        assert_eq!(app.input_mode, InputMode::Edit);
        let editing = app.state().editing_user.clone().unwrap();

        // Another session deletes it.
        remote.delete(&editing.id).await.unwrap();
        settle(&mut app).await;

        assert!(app.state().editing_user.is_none());
        assert!(app.edit_draft.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
