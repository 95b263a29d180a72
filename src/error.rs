//! Error types for alertarb.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the exact condition. Nothing on the per-cycle path fails during normal
//! operation; the variants below cover construction problems, broken
//! runtime context handed to alert factories, and malformed inbound records.

use thiserror::Error;

use crate::category::Category;
use crate::event::EventName;

/// Validation errors raised while building configuration, catalogs and tables.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Soft-disable escalation window {value}s must be finite and greater than zero")]
    InvalidEscalationWindow {
        value: f64,
    },

    #[error("Telemetry queue capacity must be greater than zero")]
    ZeroQueueCapacity,

    #[error("Text catalog '{locale}' has no entry for key '{key}'")]
    MissingText {
        locale: String,
        key: String,
    },

    #[error("Text catalog '{locale}' could not be parsed: {reason}")]
    MalformedCatalog {
        locale: String,
        reason: String,
    },

    #[error("Policy table already has a row for event '{event}'")]
    DuplicateRow {
        event: EventName,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Errors raised by a dynamic alert factory.
///
/// These indicate a caller or configuration defect (the context handed to
/// `resolve` is missing something a factory needs), never a vehicle condition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactoryError {
    #[error("Alert factory for '{event}/{category}' needs live state field '{field}'")]
    MissingLiveState {
        event: EventName,
        category: Category,
        field: &'static str,
    },
}

/// Errors decoding records published by another process.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Unknown event name in record: '{name}'")]
    UnknownEvent {
        name: String,
    },

    #[error("Failed to serialize snapshot: {message}")]
    SerializationFailed {
        message: String,
    },

    #[error("Failed to deserialize snapshot: {message}")]
    DeserializationFailed {
        message: String,
    },

    #[error("Snapshot was produced with policy table {actual}, expected {expected}")]
    FingerprintMismatch {
        expected: String,
        actual: String,
    },
}

/// Errors handing snapshots to a telemetry consumer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Telemetry channel disconnected")]
    Disconnected,

    #[error("Timed out after {duration_ms}ms waiting for a snapshot")]
    Timeout {
        duration_ms: u64,
    },
}

/// Top-level error type for alertarb.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArbiterError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl ArbiterError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a factory error.
    #[must_use]
    pub const fn is_factory(&self) -> bool {
        matches!(self, Self::Factory(_))
    }

    /// Returns true if this is a record error.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns true if this is a telemetry error.
    #[must_use]
    pub const fn is_telemetry(&self) -> bool {
        matches!(self, Self::Telemetry(_))
    }

    /// Returns true if the control loop must stop and restart.
    ///
    /// A factory failure means an alert could not be built, which would
    /// otherwise hide a condition from the driver.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Factory(_) | Self::Internal { .. } => true,
            Self::Validation(_) | Self::Record(_) => false,
            Self::Telemetry(e) => matches!(e, TelemetryError::Disconnected),
        }
    }
}

/// Result type alias for alertarb operations.
pub type ArbiterResult<T> = Result<T, ArbiterError>;
