//! Command line arguments and the wiring they drive (remote, config files).
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::app::{Keymap, Theme, UiSettings, config_dir};
use crate::remote::{MemoryRemote, RemoteStore};

#[derive(Debug, Parser)]
#[command(
    name = "user-directory",
    version,
    about = "TUI to list, search, create, edit and delete user records"
)]
pub struct Args {
    /// JSON file backing the users collection; without it data lives in memory only.
    #[arg(long, env = "USER_DIRECTORY_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, env = "USER_DIRECTORY_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the UI).
    #[arg(long, env = "USER_DIRECTORY_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `user_directory=debug`.
    #[arg(long, env = "USER_DIRECTORY_LOG", default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    /// How long a notification stays visible.
    #[arg(long, default_value_t = 2800, value_name = "MS")]
    pub toast_ms: u64,
}

impl Args {
    pub fn resolved_config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone().or_else(config_dir)
    }

    /// Theme and keymap from the config directory, written with defaults when missing.
    pub fn ui_settings(&self) -> UiSettings {
        let toast_ttl = Duration::from_millis(self.toast_ms);
        let Some(dir) = self.resolved_config_dir() else {
            warn!("no config directory; using built-in theme and keybinds");
            return UiSettings {
                toast_ttl,
                ..UiSettings::default()
            };
        };
        if let Err(err) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), %err, "could not create config directory");
        }
        info!(dir = %dir.display(), "config directory");
        UiSettings {
            theme: Theme::load_or_init(&dir.join("theme.conf")),
            keymap: Keymap::load_or_init(&dir.join("keybinds.conf")),
            toast_ttl,
        }
    }

    /// The remote store the UI talks to.
    pub fn open_remote(&self) -> crate::Result<Arc<dyn RemoteStore>> {
        let remote = match &self.data {
            Some(path) => MemoryRemote::open(path)?,
            None => MemoryRemote::new(),
        };
        Ok(Arc::new(remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["user-directory"]).unwrap();
        assert_eq!(args.toast_ms, 2800);
        assert!(args.data.is_none());
    }

    #[test]
    fn explicit_flags() {
        let args = Args::try_parse_from([
            "user-directory",
            "--data",
            "/tmp/users.json",
            "--config-dir",
            "/tmp/udir",
            "--toast-ms",
            "500",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.data.as_deref(), Some(std::path::Path::new("/tmp/users.json")));
        assert_eq!(args.resolved_config_dir(), Some(PathBuf::from("/tmp/udir")));
        assert_eq!(args.toast_ms, 500);
        assert_eq!(args.log_level, "debug");
    }
}
