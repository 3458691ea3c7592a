//! Status codes attached to a sync result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DocumentError;

/// Overall outcome of a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(i32)]
pub enum MajorCode {
    /// Outcome not known (attempt never finished)
    #[default]
    Invalid = -1,
    /// Sync finished
    Success = 0,
    /// Sync failed, see the minor code
    Failed = 1,
    /// Sync was cancelled
    Cancelled = 2,
}

impl MajorCode {
    /// Numeric value used in the persisted form.
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for MajorCode {
    type Error = DocumentError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(MajorCode::Invalid),
            0 => Ok(MajorCode::Success),
            1 => Ok(MajorCode::Failed),
            2 => Ok(MajorCode::Cancelled),
            _ => Err(DocumentError::InvalidMajorCode(value)),
        }
    }
}

impl fmt::Display for MajorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MajorCode::Invalid => "invalid",
            MajorCode::Success => "success",
            MajorCode::Failed => "failed",
            MajorCode::Cancelled => "cancelled",
        };
        f.pad(name)
    }
}

/// Detailed reason for a sync outcome.
///
/// Minor codes are an open set: plugins may report values this crate does
/// not name, and those must survive a save/load cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorCode(u32);

impl MinorCode {
    /// No error.
    pub const NO_ERROR: Self = Self(0);
    /// Some items failed, the rest synced.
    pub const ITEM_FAILURES: Self = Self(1);
    /// Unexpected internal failure.
    pub const INTERNAL_ERROR: Self = Self(401);
    /// Remote rejected the credentials.
    pub const AUTHENTICATION_FAILURE: Self = Self(402);
    /// Local storage could not be accessed.
    pub const DATABASE_FAILURE: Self = Self(403);
    /// Aborted by the user.
    pub const ABORTED: Self = Self(501);
    /// Connection to the remote failed.
    pub const CONNECTION_ERROR: Self = Self(502);
    /// Remote sent data that could not be understood.
    pub const INVALID_MESSAGE: Self = Self(503);
    /// Requested sync type is not supported by the remote.
    pub const UNSUPPORTED_SYNC_TYPE: Self = Self(504);
    /// Requested storage type is not supported by the remote.
    pub const UNSUPPORTED_STORAGE_TYPE: Self = Self(505);
    /// Skipped because the battery is low.
    pub const LOW_BATTERY_POWER: Self = Self(601);
    /// Skipped because the device is in power saving mode.
    pub const POWER_SAVING_MODE: Self = Self(602);
    /// Skipped because the device is offline.
    pub const OFFLINE_MODE: Self = Self(603);
    /// Skipped because a backup is running.
    pub const BACKUP_IN_PROGRESS: Self = Self(604);
    /// Skipped because memory is low.
    pub const LOW_MEMORY: Self = Self(605);

    /// Create a minor code from its numeric value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the numeric value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Human-readable name for well-known codes.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::NO_ERROR => "no error",
            Self::ITEM_FAILURES => "item failures",
            Self::INTERNAL_ERROR => "internal error",
            Self::AUTHENTICATION_FAILURE => "authentication failure",
            Self::DATABASE_FAILURE => "database failure",
            Self::ABORTED => "aborted",
            Self::CONNECTION_ERROR => "connection error",
            Self::INVALID_MESSAGE => "invalid message",
            Self::UNSUPPORTED_SYNC_TYPE => "unsupported sync type",
            Self::UNSUPPORTED_STORAGE_TYPE => "unsupported storage type",
            Self::LOW_BATTERY_POWER => "low battery power",
            Self::POWER_SAVING_MODE => "power saving mode",
            Self::OFFLINE_MODE => "offline mode",
            Self::BACKUP_IN_PROGRESS => "backup in progress",
            Self::LOW_MEMORY => "low memory",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u32> for MinorCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for MinorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_code_from_value() {
        assert_eq!(MajorCode::try_from(0).unwrap(), MajorCode::Success);
        assert_eq!(MajorCode::try_from(-1).unwrap(), MajorCode::Invalid);
        assert_eq!(MajorCode::try_from(2).unwrap(), MajorCode::Cancelled);
        assert!(matches!(
            MajorCode::try_from(7),
            Err(DocumentError::InvalidMajorCode(7))
        ));
    }

    #[test]
    fn major_code_value_matches_discriminant() {
        for code in [
            MajorCode::Invalid,
            MajorCode::Success,
            MajorCode::Failed,
            MajorCode::Cancelled,
        ] {
            assert_eq!(MajorCode::try_from(code.value()).unwrap(), code);
        }
    }

    #[test]
    fn unknown_minor_code_has_no_name() {
        let code = MinorCode::new(9999);
        assert_eq!(code.name(), None);
        assert_eq!(code.to_string(), "9999");
    }

    #[test]
    fn minor_code_display() {
        assert_eq!(MinorCode::CONNECTION_ERROR.to_string(), "connection error (502)");
        assert_eq!(MinorCode::default(), MinorCode::NO_ERROR);
    }

    #[test]
    fn major_code_serde_is_kebab_case() {
        let json = serde_json::to_string(&MajorCode::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let minor = serde_json::to_string(&MinorCode::LOW_MEMORY).unwrap();
        assert_eq!(minor, "605");
    }
}
