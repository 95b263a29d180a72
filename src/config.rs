//! Arbiter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArbiterError, ArbiterResult, ValidationError};
use crate::text::Locale;

/// Engine configuration.
///
/// The control period itself is not configurable; see [`crate::time::DT_CTRL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Language of alert text.
    pub locale: Locale,
    /// A soft-disable condition younger than this escalates to an
    /// immediate-disable alert.
    pub soft_disable_escalation_secs: f64,
    /// Max queued telemetry snapshots before new ones are dropped.
    pub telemetry_queue_capacity: usize,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            soft_disable_escalation_secs: 0.5,
            telemetry_queue_capacity: 64,
        }
    }
}

impl ArbiterConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(s: &str) -> ArbiterResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ValidationError::InvalidConfig {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ArbiterResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ArbiterError::Validation(ValidationError::InvalidConfig {
                reason: format!("read {}: {e}", path.display()),
            })
        })?;
        Self::from_json(&raw)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> ArbiterResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArbiterError::internal(format!("serialize config: {e}")))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.soft_disable_escalation_secs.is_finite() || self.soft_disable_escalation_secs <= 0.0 {
            return Err(ValidationError::InvalidEscalationWindow {
                value: self.soft_disable_escalation_secs,
            });
        }
        if self.telemetry_queue_capacity == 0 {
            return Err(ValidationError::ZeroQueueCapacity);
        }
        Ok(())
    }
}
