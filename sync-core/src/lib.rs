//! # sync-core
//!
//! Pure logic for SyncLog (no I/O, instant tests).
//!
//! This crate implements the bounded sync history of a profile without any
//! disk I/O. Reading and writing log files is done by `sync-cli`, which
//! hands XML text to and from [`SyncLog`].
//!
//! ## Design Philosophy
//!
//! A log owns plain values only:
//! - Appending is infallible; eviction and promotion are pure comparisons
//! - The last successful result is a separate owned copy, not a pointer
//!   into the window
//! - Loading replays results through the same `append` used at runtime

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;

pub use config::{ConfigError, LogConfig, OrderingPolicy, MAX_LOG_ENTRIES};
pub use log::{SyncLog, ATTR_NAME, TAG_SYNC_LOG};
pub use synclog_types::{
    DocumentError, Element, ItemCounts, MajorCode, MinorCode, SyncResults, TargetResults,
};
