//! # sync-types
//!
//! Record and document types for SyncLog.
//!
//! This crate provides the foundational types used across all SyncLog crates:
//! - [`SyncResults`], [`TargetResults`], [`ItemCounts`] - Outcome of one sync attempt
//! - [`MajorCode`], [`MinorCode`] - Status codes
//! - [`Element`] - Document tree used for persistence, with an XML codec
//! - [`DocumentError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codes;
mod document;
mod error;
mod results;

pub use codes::{MajorCode, MinorCode};
pub use document::Element;
pub use error::DocumentError;
pub use results::{ItemCounts, SyncResults, TargetResults, TAG_SYNC_RESULTS, TAG_TARGET};
