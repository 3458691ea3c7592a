//! CLI command implementations.

pub mod last_success;
pub mod list;
pub mod record;
pub mod show;
