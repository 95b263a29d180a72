//! # alertarb - Event and Alert Arbitration for a Vehicle Control Loop
//!
//! Monitors raise named conditions ("events") each control cycle. An
//! immutable policy table classifies every event into categories (may the
//! system engage, must it disengage, what should the driver see), and the
//! resolver turns the active events into concrete, debounced alerts.
//!
//! ## Core Concepts
//!
//! - **EventName**: closed set of condition identifiers with stable wire names
//! - **Category**: the nine-way taxonomy the engagement state machine reacts to
//! - **PolicyTable**: event → category → fixed or context-built [`Alert`]
//! - **EventSet**: active and sticky events plus per-event persistence counters
//! - **resolve**: filters by activation delay and stamps each alert's origin
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use alertarb::{AlertContext, ArbiterConfig, Category, EventName, EventSet, PolicyTable};
//!
//! let table = Arc::new(PolicyTable::standard(&ArbiterConfig::default())?);
//! let mut events = EventSet::new(Arc::clone(&table));
//!
//! // once per cycle
//! events.add(EventName::Overheat, false);
//! if events.has_category(Category::NoEntry) {
//!     let alerts = events.create_alerts(&[Category::NoEntry], &AlertContext::default())?;
//!     let shown = alertarb::select_highest(&alerts);
//! }
//! events.reset();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod alert;
pub mod category;
pub mod error;
pub mod event;
pub mod time;

// Table, state and resolution
pub mod config;
pub mod context;
pub mod events;
pub mod policy;
pub mod resolver;
pub mod text;

// Outbound data
pub mod records;
pub mod telemetry;

pub use alert::{
    Alert, AlertPresets, AlertSize, AlertStatus, AlertStyle, AudibleAlert, Priority, VisualAlert,
};
pub use category::Category;
pub use config::ArbiterConfig;
pub use context::{AlertContext, CarParams, ContextError, LiveState, SpeedFormat};
pub use error::{
    ArbiterError, ArbiterResult, FactoryError, RecordError, TelemetryError, ValidationError,
};
pub use event::EventName;
pub use events::EventSet;
pub use policy::{escalate_soft_disable, AlertFactory, AlertSlot, PolicyRow, PolicyTable, PolicyTableBuilder};
pub use records::{CategoryFlags, EventRecord, EventSnapshot};
pub use resolver::{resolve, select_highest, select_per_category};
pub use telemetry::{TelemetryPublisher, TelemetryReceiver};
pub use text::{Locale, Template, TextCatalog};
pub use time::DT_CTRL;
