//! The policy table.
//!
//! An immutable map from event to the alerts it raises per category. It is
//! built once at process start and shared read-only (typically behind an
//! `Arc`) by every event set and resolver in the process.

mod factories;
mod standard;

use std::collections::BTreeMap;
use std::fmt;

use crate::alert::Alert;
use crate::category::Category;
use crate::context::{AlertContext, ContextError};
use crate::error::ValidationError;
use crate::event::EventName;

pub use factories::escalate_soft_disable;

/// Signature of a dynamic alert: context and consecutive active cycles in,
/// alert out.
pub type AlertFactory = dyn Fn(&AlertContext, u32) -> Result<Alert, ContextError> + Send + Sync;

/// What a table slot holds for one category.
pub enum AlertSlot {
    /// Pre-built alert, used as is.
    Fixed(Alert),
    /// Alert built from runtime context on every resolution.
    Dynamic(Box<AlertFactory>),
}

impl AlertSlot {
    /// Wraps a closure as a dynamic slot.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&AlertContext, u32) -> Result<Alert, ContextError> + Send + Sync + 'static,
    {
        Self::Dynamic(Box::new(f))
    }

    /// Produces the alert for this slot.
    pub fn build(&self, ctx: &AlertContext, consecutive_cycles: u32) -> Result<Alert, ContextError> {
        match self {
            Self::Fixed(alert) => Ok(alert.clone()),
            Self::Dynamic(factory) => factory(ctx, consecutive_cycles),
        }
    }

    /// Returns true for pre-built slots.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl fmt::Debug for AlertSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(alert) => f.debug_tuple("Fixed").field(alert).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<Alert> for AlertSlot {
    fn from(alert: Alert) -> Self {
        Self::Fixed(alert)
    }
}

/// One event's category associations. May be empty.
#[derive(Debug, Default)]
pub struct PolicyRow {
    slots: BTreeMap<Category, AlertSlot>,
}

impl PolicyRow {
    /// A row with no alerts: the event is recorded but silent.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a slot.
    #[must_use]
    pub fn with(mut self, category: Category, slot: impl Into<AlertSlot>) -> Self {
        self.slots.insert(category, slot.into());
        self
    }

    /// Adds (or replaces) a dynamic slot.
    #[must_use]
    pub fn with_dynamic<F>(self, category: Category, f: F) -> Self
    where
        F: Fn(&AlertContext, u32) -> Result<Alert, ContextError> + Send + Sync + 'static,
    {
        self.with(category, AlertSlot::dynamic(f))
    }

    /// Slot for `category`, if any.
    #[must_use]
    pub fn slot(&self, category: Category) -> Option<&AlertSlot> {
        self.slots.get(&category)
    }

    /// Returns true if the row associates anything with `category`.
    #[must_use]
    pub fn has(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    /// Categories present, in taxonomy order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.slots.keys().copied()
    }

    /// Returns true if the row has no alerts.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Immutable event → category → alert map.
#[derive(Debug)]
pub struct PolicyTable {
    rows: BTreeMap<EventName, PolicyRow>,
    fingerprint: String,
}

impl PolicyTable {
    /// Starts an empty table.
    #[must_use]
    pub fn builder() -> PolicyTableBuilder {
        PolicyTableBuilder::default()
    }

    /// Row for `event`, or `None` if the table does not know it.
    #[must_use]
    pub fn row(&self, event: EventName) -> Option<&PolicyRow> {
        self.rows.get(&event)
    }

    /// Returns true if `event` has a row (possibly silent).
    #[must_use]
    pub fn contains(&self, event: EventName) -> bool {
        self.rows.contains_key(&event)
    }

    /// Returns true if `event` has an association for `category`.
    ///
    /// Events without a row have no categories.
    #[must_use]
    pub fn has_category(&self, event: EventName, category: Category) -> bool {
        self.row(event).is_some_and(|row| row.has(category))
    }

    /// Slot for `(event, category)`.
    #[must_use]
    pub fn slot(&self, event: EventName, category: Category) -> Option<&AlertSlot> {
        self.row(event).and_then(|row| row.slot(category))
    }

    /// All known events, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = EventName> + '_ {
        self.rows.keys().copied()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hex blake3 digest of the table's event/category layout.
    ///
    /// Two processes with the same fingerprint classify every event the
    /// same way. Alert text is not part of the digest.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn compute_fingerprint(rows: &BTreeMap<EventName, PolicyRow>) -> String {
        let mut hasher = blake3::Hasher::new();
        for (event, row) in rows {
            hasher.update(event.as_str().as_bytes());
            hasher.update(b":");
            for category in row.categories() {
                hasher.update(category.as_str().as_bytes());
                hasher.update(b",");
            }
            hasher.update(b";");
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Collects rows for a [`PolicyTable`].
#[derive(Debug, Default)]
pub struct PolicyTableBuilder {
    rows: BTreeMap<EventName, PolicyRow>,
    duplicate: Option<EventName>,
}

impl PolicyTableBuilder {
    /// Adds a row. Declaring the same event twice fails at [`build`](Self::build).
    #[must_use]
    pub fn row(mut self, event: EventName, row: PolicyRow) -> Self {
        if self.rows.insert(event, row).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(event);
        }
        self
    }

    /// Adds a silent row.
    #[must_use]
    pub fn silent(self, event: EventName) -> Self {
        self.row(event, PolicyRow::silent())
    }

    /// Freezes the table.
    pub fn build(self) -> Result<PolicyTable, ValidationError> {
        if let Some(event) = self.duplicate {
            return Err(ValidationError::DuplicateRow { event });
        }
        let fingerprint = PolicyTable::compute_fingerprint(&self.rows);
        Ok(PolicyTable {
            rows: self.rows,
            fingerprint,
        })
    }
}
