//! Sync results - the record of one synchronization attempt.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{DocumentError, Element, MajorCode, MinorCode};

/// Element name of a persisted [`SyncResults`].
pub const TAG_SYNC_RESULTS: &str = "syncresults";
/// Element name of a persisted [`TargetResults`].
pub const TAG_TARGET: &str = "target";

const TAG_LOCAL: &str = "local";
const TAG_REMOTE: &str = "remote";
const ATTR_TIME: &str = "time";
const ATTR_MAJOR_CODE: &str = "majorcode";
const ATTR_MINOR_CODE: &str = "minorcode";
const ATTR_SCHEDULED: &str = "scheduled";
const ATTR_NAME: &str = "name";
const ATTR_ADDED: &str = "added";
const ATTR_DELETED: &str = "deleted";
const ATTR_MODIFIED: &str = "modified";

/// Number of items changed on one side of a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemCounts {
    /// Items added.
    pub added: u32,
    /// Items deleted.
    pub deleted: u32,
    /// Items modified.
    pub modified: u32,
}

impl ItemCounts {
    /// Create item counts.
    pub fn new(added: u32, deleted: u32, modified: u32) -> Self {
        Self {
            added,
            deleted,
            modified,
        }
    }

    /// Total number of changed items.
    pub fn total(&self) -> u64 {
        u64::from(self.added) + u64::from(self.deleted) + u64::from(self.modified)
    }

    fn to_element(self, tag: &str) -> Element {
        Element::new(tag)
            .with_attribute(ATTR_ADDED, self.added.to_string())
            .with_attribute(ATTR_DELETED, self.deleted.to_string())
            .with_attribute(ATTR_MODIFIED, self.modified.to_string())
    }

    fn from_element(element: &Element) -> Result<Self, DocumentError> {
        Ok(Self {
            added: parse_optional(element, ATTR_ADDED)?.unwrap_or(0),
            deleted: parse_optional(element, ATTR_DELETED)?.unwrap_or(0),
            modified: parse_optional(element, ATTR_MODIFIED)?.unwrap_or(0),
        })
    }
}

/// Per-storage outcome of a sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResults {
    /// Storage name (e.g. `hcalendar`).
    pub target_name: String,
    /// Changes applied to the local storage.
    pub local: ItemCounts,
    /// Changes applied to the remote storage.
    pub remote: ItemCounts,
}

impl TargetResults {
    /// Create target results.
    pub fn new(target_name: impl Into<String>, local: ItemCounts, remote: ItemCounts) -> Self {
        Self {
            target_name: target_name.into(),
            local,
            remote,
        }
    }

    /// Convert to a `target` element.
    pub fn to_element(&self) -> Element {
        Element::new(TAG_TARGET)
            .with_attribute(ATTR_NAME, self.target_name.as_str())
            .with_child(self.local.to_element(TAG_LOCAL))
            .with_child(self.remote.to_element(TAG_REMOTE))
    }

    /// Read from a `target` element. Missing counts read as zero.
    pub fn from_element(element: &Element) -> Result<Self, DocumentError> {
        expect_tag(element, TAG_TARGET)?;
        let target_name = require(element, ATTR_NAME)?.to_string();
        let local = match element.child(TAG_LOCAL) {
            Some(e) => ItemCounts::from_element(e)?,
            None => ItemCounts::default(),
        };
        let remote = match element.child(TAG_REMOTE) {
            Some(e) => ItemCounts::from_element(e)?,
            None => ItemCounts::default(),
        };
        Ok(Self {
            target_name,
            local,
            remote,
        })
    }
}

/// Outcome of one sync attempt.
///
/// Results are ordered by [`SyncResults::cmp_recency`], which looks only at
/// the sync time. Equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncResults {
    /// When the sync finished. `None` if it never produced a time.
    pub sync_time: Option<DateTime<Utc>>,
    /// Overall outcome.
    pub major_code: MajorCode,
    /// Detailed reason.
    pub minor_code: MinorCode,
    /// Whether the attempt was started by the scheduler.
    #[serde(default)]
    pub scheduled: bool,
    /// Per-storage item counts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetResults>,
}

impl SyncResults {
    /// Create a result with no target details.
    pub fn new(
        sync_time: Option<DateTime<Utc>>,
        major_code: MajorCode,
        minor_code: MinorCode,
    ) -> Self {
        Self {
            sync_time,
            major_code,
            minor_code,
            scheduled: false,
            targets: Vec::new(),
        }
    }

    /// Mark whether the attempt was scheduled.
    pub fn with_scheduled(mut self, scheduled: bool) -> Self {
        self.scheduled = scheduled;
        self
    }

    /// Add per-storage results.
    pub fn with_target(mut self, target: TargetResults) -> Self {
        self.targets.push(target);
        self
    }

    /// A sync counts as successful only if it finished without error and
    /// recorded when it happened.
    pub fn is_successful(&self) -> bool {
        self.major_code == MajorCode::Success
            && self.minor_code == MinorCode::NO_ERROR
            && self.sync_time.is_some()
    }

    /// Compare by sync time. A missing time is older than any recorded time.
    pub fn cmp_recency(&self, other: &Self) -> Ordering {
        self.sync_time.cmp(&other.sync_time)
    }

    /// Convert to a `syncresults` element.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(TAG_SYNC_RESULTS);
        if let Some(time) = self.sync_time {
            element.set_attribute(
                ATTR_TIME,
                time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            );
        }
        element.set_attribute(ATTR_MAJOR_CODE, self.major_code.value().to_string());
        element.set_attribute(ATTR_MINOR_CODE, self.minor_code.value().to_string());
        if self.scheduled {
            element.set_attribute(ATTR_SCHEDULED, "true");
        }
        for target in &self.targets {
            element.push_child(target.to_element());
        }
        element
    }

    /// Read from a `syncresults` element.
    pub fn from_element(element: &Element) -> Result<Self, DocumentError> {
        expect_tag(element, TAG_SYNC_RESULTS)?;

        let sync_time = match element.attribute(ATTR_TIME) {
            Some(raw) => Some(parse_time(raw).ok_or_else(|| invalid(element, ATTR_TIME, raw))?),
            None => None,
        };

        let major: i32 = parse_required(element, ATTR_MAJOR_CODE)?;
        let major_code = MajorCode::try_from(major)?;
        let minor_code = MinorCode::new(parse_optional(element, ATTR_MINOR_CODE)?.unwrap_or(0));
        let scheduled = parse_optional(element, ATTR_SCHEDULED)?.unwrap_or(false);

        let targets = element
            .children_named(TAG_TARGET)
            .map(TargetResults::from_element)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sync_time,
            major_code,
            minor_code,
            scheduled,
            targets,
        })
    }
}

/// Parse a time written by [`SyncResults::to_element`].
///
/// Years outside `0000..=9999` are written with a sign and more than four
/// digits, which RFC 3339 parsing rejects. Those are read by parsing the
/// rest of the timestamp against a leap year and then moving it to the
/// written year.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    let sign = raw.chars().next().filter(|c| *c == '+' || *c == '-')?;
    let (year, rest) = raw[1..].split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let year = if sign == '-' { -year } else { year };

    let time = DateTime::parse_from_rfc3339(&format!("2000-{}", rest)).ok()?;
    time.with_year(year).map(|t| t.with_timezone(&Utc))
}

fn expect_tag(element: &Element, tag: &str) -> Result<(), DocumentError> {
    if element.name() == tag {
        Ok(())
    } else {
        Err(DocumentError::UnexpectedElement {
            expected: tag.to_string(),
            actual: element.name().to_string(),
        })
    }
}

fn require<'a>(element: &'a Element, attribute: &str) -> Result<&'a str, DocumentError> {
    element
        .attribute(attribute)
        .ok_or_else(|| DocumentError::MissingAttribute {
            element: element.name().to_string(),
            attribute: attribute.to_string(),
        })
}

fn parse_required<T: std::str::FromStr>(
    element: &Element,
    attribute: &str,
) -> Result<T, DocumentError> {
    let raw = require(element, attribute)?;
    raw.trim().parse().map_err(|_| invalid(element, attribute, raw))
}

fn parse_optional<T: std::str::FromStr>(
    element: &Element,
    attribute: &str,
) -> Result<Option<T>, DocumentError> {
    match element.attribute(attribute) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(element, attribute, raw)),
        None => Ok(None),
    }
}

fn invalid(element: &Element, attribute: &str, value: &str) -> DocumentError {
    DocumentError::InvalidAttribute {
        element: element.name().to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}
