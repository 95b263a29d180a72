//! Wire records for the active event list.
//!
//! One [`EventRecord`] per active event, carrying the event's wire name and
//! which categories its policy row covers. Readers in other processes use
//! the flags directly; they do not rebuild table associations from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::RecordError;
use crate::event::EventName;
use crate::policy::PolicyTable;

/// Per-category presence flags for one event.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFlags {
    pub enable: bool,
    pub pre_enable: bool,
    #[serde(rename = "override")]
    pub override_: bool,
    pub no_entry: bool,
    pub warning: bool,
    pub user_disable: bool,
    pub soft_disable: bool,
    pub immediate_disable: bool,
    pub permanent: bool,
}

impl CategoryFlags {
    /// Flags for `event` as classified by `table`. Unknown events get none.
    #[must_use]
    pub fn for_event(table: &PolicyTable, event: EventName) -> Self {
        let mut flags = Self::default();
        for category in Category::ALL {
            flags.set(category, table.has_category(event, category));
        }
        flags
    }

    /// Reads one flag.
    #[must_use]
    pub const fn get(&self, category: Category) -> bool {
        match category {
            Category::Enable => self.enable,
            Category::PreEnable => self.pre_enable,
            Category::Override => self.override_,
            Category::NoEntry => self.no_entry,
            Category::Warning => self.warning,
            Category::UserDisable => self.user_disable,
            Category::SoftDisable => self.soft_disable,
            Category::ImmediateDisable => self.immediate_disable,
            Category::Permanent => self.permanent,
        }
    }

    /// Writes one flag.
    pub fn set(&mut self, category: Category, value: bool) {
        let slot = match category {
            Category::Enable => &mut self.enable,
            Category::PreEnable => &mut self.pre_enable,
            Category::Override => &mut self.override_,
            Category::NoEntry => &mut self.no_entry,
            Category::Warning => &mut self.warning,
            Category::UserDisable => &mut self.user_disable,
            Category::SoftDisable => &mut self.soft_disable,
            Category::ImmediateDisable => &mut self.immediate_disable,
            Category::Permanent => &mut self.permanent,
        };
        *slot = value;
    }

    /// Categories whose flag is set, in taxonomy order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.get(*c))
    }
}

/// One active event as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event wire name. Kept as text so readers tolerate names they do not know.
    pub name: String,
    /// Categories the sender's table associates with the event.
    pub flags: CategoryFlags,
}

impl EventRecord {
    /// Builds the record for `event` against `table`.
    #[must_use]
    pub fn new(table: &PolicyTable, event: EventName) -> Self {
        Self {
            name: event.as_str().to_string(),
            flags: CategoryFlags::for_event(table, event),
        }
    }

    /// Parses the wire name.
    pub fn event(&self) -> Result<EventName, RecordError> {
        self.name.parse().map_err(|_| RecordError::UnknownEvent {
            name: self.name.clone(),
        })
    }
}

/// A timestamped copy of one cycle's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    /// Wall-clock capture time.
    pub captured_at: DateTime<Utc>,
    /// Number of resets the sending event set had seen.
    pub cycle: u64,
    /// [`PolicyTable::fingerprint`] of the sender.
    pub table_fingerprint: String,
    /// Active events in insertion order.
    pub records: Vec<EventRecord>,
}

impl EventSnapshot {
    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(|e| RecordError::SerializationFailed {
            message: e.to_string(),
        })
    }

    /// Deserializes from JSON.
    pub fn from_json(s: &str) -> Result<Self, RecordError> {
        serde_json::from_str(s).map_err(|e| RecordError::DeserializationFailed {
            message: e.to_string(),
        })
    }

    /// Fails unless the snapshot was produced with a table laid out like `table`.
    pub fn verify_fingerprint(&self, table: &PolicyTable) -> Result<(), RecordError> {
        if self.table_fingerprint == table.fingerprint() {
            Ok(())
        } else {
            Err(RecordError::FingerprintMismatch {
                expected: table.fingerprint().to_string(),
                actual: self.table_fingerprint.clone(),
            })
        }
    }

    /// Returns true if any record flags `category`.
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.records.iter().any(|r| r.flags.get(category))
    }
}
