//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - User record types (`model`)
//! - Remote store seam and the in-process adapter (`remote`)
//! - State container: actions, reducer, store (`store`)
//! - Snapshot subscription bridge (`sync`)
//! - Async action dispatchers (`dispatch`)
//! - Search filter (`search`)
//! - Application state and update loop (`app`)
//! - UI rendering (`ui`)
//! - Command line, logging and error types (`cli`, `logging`, `error`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod model;
pub mod remote;
pub mod search;
pub mod store;
pub mod sync;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, RemoteError, Result};
