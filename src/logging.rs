//! Tracing setup.
//!
//! The TUI owns stdout, so events go to a log file when one is given and are
//! discarded otherwise. `filter` uses `EnvFilter` syntax (`info`,
//! `user_directory=debug`, ...).
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result, simple_error};

pub fn init(filter: &str, log_file: Option<&Path>) -> Result<()> {
    let env_filter =
        EnvFilter::try_new(filter).with_ctx(|| format!("invalid log filter {filter:?}"))?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let res = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_ctx(|| format!("open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };
    res.map_err(|e| simple_error(format!("init logging: {e}")))
}
