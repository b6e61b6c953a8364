use crate::model::UserRecord;

/// Records whose name or email contains `query`, ignoring case. An empty query keeps everything.
pub fn filter_users<'a>(users: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    let q = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&q) || u.email_or_empty().to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::UserId;

	fn mk_user(id: &str, name: &str, email: Option<&str>) -> UserRecord {
		UserRecord::new(UserId::new(id), name, email.map(|s| s.to_string()))
	}

	#[test]
	fn search_matches_name_or_email_ignoring_case() {
		let users = vec![
			mk_user("1", "Ann", Some("a@x.com")),
			mk_user("2", "Bob", Some("b@x.com")),
		];
		for q in ["Ann", "ann", "ANN"] {
			let hits = filter_users(&users, q);
			assert_eq!(hits.len(), 1);
			assert_eq!(hits[0].name, "Ann");
		}
		let hits = filter_users(&users, "B@X");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].name, "Bob");
	}

	#[test]
	fn search_empty_query_keeps_order() {
		let users = vec![mk_user("2", "Bob", None), mk_user("1", "Ann", None)];
		let hits = filter_users(&users, "");
		assert_eq!(hits.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), ["Bob", "Ann"]);
	}

	#[test]
	fn search_missing_email_does_not_match_email_query() {
		let users = vec![mk_user("1", "Cid", None)];
		assert!(filter_users(&users, "@").is_empty());
	}

	#[test]
	fn search_is_idempotent() {
		let users = vec![
			mk_user("1", "Ann", Some("a@x.com")),
			mk_user("2", "Bob", Some("b@x.com")),
		];
		let once: Vec<UserRecord> = filter_users(&users, "a").into_iter().cloned().collect();
		let twice: Vec<UserRecord> = filter_users(&once, "a").into_iter().cloned().collect();
		assert_eq!(once, twice);
	}
}
