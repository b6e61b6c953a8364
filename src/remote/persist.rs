//! JSON file backing for [`MemoryRemote`](super::MemoryRemote).
//!
//! Format: `{ "users": [ { "id": "...", "name": "...", "email": "..." } ] }`.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Context, Result};
use crate::model::UserRecord;

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// Read the collection from `path`. A missing file is an empty collection.
pub fn load(path: &Path) -> Result<Vec<UserRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path).with_ctx(|| format!("read {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: DataFile =
        serde_json::from_str(&raw).with_ctx(|| format!("parse {}", path.display()))?;
    Ok(file.users)
}

/// Write the collection to `path`, replacing it via a sibling temp file.
pub fn save(path: &Path, users: &[UserRecord]) -> Result<()> {
    let file = DataFile {
        users: users.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).with_ctx(|| "encode users".to_string())?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, json).with_ctx(|| format!("write {}", Path::new(&tmp).display()))?;
    std::fs::rename(&tmp, path).with_ctx(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir().join(format!("udir_{}_{}_{}.json", tag, std::process::id(), nonce))
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = temp_path("missing");
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let path = temp_path("order");
        let users = vec![
            UserRecord::new(UserId::new("b"), "Bob", None),
            UserRecord::new(UserId::new("a"), "Ann", Some("a@x.com".into())),
        ];
        save(&path, &users).unwrap();
        assert_eq!(load(&path).unwrap(), users);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn garbage_file_reports_path() {
        let path = temp_path("garbage");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().starts_with("parse "));
        let _ = std::fs::remove_file(&path);
    }
}
