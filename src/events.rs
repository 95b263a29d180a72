//! Per-loop event state.
//!
//! An [`EventSet`] holds the events asserted during the current control
//! cycle, the sticky subset that survives every reset, and how many
//! consecutive cycles each known event has been active. It is owned by the
//! control-loop thread; other threads only ever see copied records.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use crate::alert::Alert;
use crate::category::Category;
use crate::context::AlertContext;
use crate::error::{ArbiterResult, RecordError};
use crate::event::EventName;
use crate::policy::PolicyTable;
use crate::records::{EventRecord, EventSnapshot};
use crate::resolver;

/// Active events plus debounce counters for one control loop.
#[derive(Debug, Clone)]
pub struct EventSet {
    table: Arc<PolicyTable>,
    active: Vec<EventName>,
    sticky: Vec<EventName>,
    persistence: HashMap<EventName, u32>,
    cycle: u64,
}

impl EventSet {
    /// Creates an empty set bound to `table`.
    #[must_use]
    pub fn new(table: Arc<PolicyTable>) -> Self {
        if table.is_empty() {
            warn!("event set bound to an empty policy table, every event classifies as no categories");
        }
        let persistence = table.events().map(|e| (e, 0)).collect();
        Self {
            table,
            active: Vec::new(),
            sticky: Vec::new(),
            persistence,
            cycle: 0,
        }
    }

    /// Rebuilds an active list from another process's records.
    ///
    /// Only the names are used. The resulting set classifies through
    /// `table`, not through the flags carried by the records, and its
    /// persistence counters all start at zero. Names this build does not
    /// know are skipped, as in [`add_from_records`](Self::add_from_records).
    #[must_use]
    pub fn from_records(table: Arc<PolicyTable>, records: &[EventRecord]) -> Self {
        let mut set = Self::new(table);
        set.add_from_records(records);
        set
    }

    /// The shared policy table.
    #[must_use]
    pub fn table(&self) -> &Arc<PolicyTable> {
        &self.table
    }

    /// Asserts `event` for this cycle. Sticky events are re-asserted by every
    /// [`reset`](Self::reset) until the set is dropped.
    pub fn add(&mut self, event: EventName, sticky: bool) {
        if !self.table.contains(event) {
            debug!("event {event} has no policy row, it classifies as no categories");
        }
        self.active.push(event);
        if sticky {
            self.sticky.push(event);
        }
    }

    /// Appends the events named by `records` as non-sticky.
    ///
    /// Records whose name does not parse (e.g. from a sender with a newer
    /// event list) are skipped; the rest are appended in order. Returns the
    /// number skipped.
    pub fn add_from_records(&mut self, records: &[EventRecord]) -> usize {
        let mut skipped = 0;
        for record in records {
            match record.event() {
                Ok(event) => self.add(event, false),
                Err(err) => {
                    debug!("skipping record: {err}");
                    skipped += 1;
                }
            }
        }
        skipped
    }

    /// Like [`add_from_records`](Self::add_from_records) but rejects the batch
    /// if any name does not parse. Nothing is appended on error.
    pub fn try_add_from_records(&mut self, records: &[EventRecord]) -> Result<(), RecordError> {
        let events = records
            .iter()
            .map(EventRecord::event)
            .collect::<Result<Vec<_>, _>>()?;
        for event in events {
            self.add(event, false);
        }
        Ok(())
    }

    /// Ends the cycle: advances persistence for every known event that was
    /// active and zeroes the rest, then restores the sticky list.
    pub fn reset(&mut self) {
        let present: HashSet<EventName> = self.active.iter().copied().collect();
        for (event, count) in &mut self.persistence {
            *count = if present.contains(event) {
                count.saturating_add(1)
            } else {
                0
            };
        }
        self.active.clone_from(&self.sticky);
        self.cycle += 1;
    }

    /// Returns true if any active event has an association for `category`.
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.active
            .iter()
            .any(|e| self.table.has_category(*e, category))
    }

    /// Number of active entries, duplicates included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.active.len()
    }

    /// Alias for [`count`](Self::count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns true if nothing is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active events in insertion order.
    #[must_use]
    pub fn names(&self) -> &[EventName] {
        &self.active
    }

    /// Returns true if `event` is active.
    #[must_use]
    pub fn contains(&self, event: EventName) -> bool {
        self.active.contains(&event)
    }

    /// Consecutive completed cycles `event` has been active. Zero for events
    /// without a policy row.
    #[must_use]
    pub fn persistence(&self, event: EventName) -> u32 {
        self.persistence.get(&event).copied().unwrap_or(0)
    }

    /// Number of resets so far.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Resolves alerts for `categories`. See [`resolver::resolve`].
    pub fn create_alerts(&self, categories: &[Category], ctx: &AlertContext) -> ArbiterResult<Vec<Alert>> {
        resolver::resolve(self, categories, ctx)
    }

    /// One record per active entry, flags computed now.
    #[must_use]
    pub fn to_records(&self) -> Vec<EventRecord> {
        self.active
            .iter()
            .map(|e| EventRecord::new(&self.table, *e))
            .collect()
    }

    /// Copies the current records out for another thread or process.
    #[must_use]
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            captured_at: Utc::now(),
            cycle: self.cycle,
            table_fingerprint: self.table.fingerprint().to_string(),
            records: self.to_records(),
        }
    }
}
