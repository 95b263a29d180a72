//! Runtime context for dynamic alerts.
//!
//! Some alerts depend on live values: a speed threshold, a calibration
//! percentage, a branch name. The caller assembles an [`AlertContext`]
//! each cycle; the resolver hands it to every dynamic factory together
//! with the number of consecutive cycles the event has been active.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::text::TextCatalog;

/// m/s to km/h.
pub const MS_TO_KPH: f64 = 3.6;
/// m/s to mph.
pub const MS_TO_MPH: f64 = 2.236_936;
/// Minimum speed at which calibration makes progress (15 mph), m/s.
pub const MIN_SPEED_FILTER: f64 = 15.0 / MS_TO_MPH;

/// Static vehicle parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarParams {
    /// Car brand identifier, e.g. `"honda"`.
    pub car_name: String,
    /// Lowest speed engagement is allowed at, m/s.
    pub min_enable_speed: f64,
    /// Lowest speed steering is available at, m/s.
    pub min_steer_speed: f64,
}

/// Snapshot of live values read by dynamic alerts.
///
/// Fields are optional because not every service has published by the
/// time a factory needs them; a factory that requires a missing field
/// fails with [`ContextError::MissingLiveState`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiveState {
    /// Calibration progress, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_percent: Option<u8>,
    /// Debug joystick axes, `[gas/brake, steer]` in -1..1.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joystick_axes: Vec<f64>,
    /// Short software branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// True when running from a recorded drive.
    #[serde(default)]
    pub replay: bool,
}

/// Everything a dynamic alert may read, except the cycle count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertContext {
    /// Static vehicle parameters.
    pub car: CarParams,
    /// Live snapshot.
    pub live: LiveState,
    /// Show metric units.
    pub metric: bool,
}

impl AlertContext {
    /// Creates a context.
    #[must_use]
    pub fn new(car: CarParams, live: LiveState, metric: bool) -> Self {
        Self { car, live, metric }
    }
}

/// A dynamic alert could not read what it needs from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// A required live-state field was not set.
    MissingLiveState {
        /// Field name.
        field: &'static str,
    },
}

/// Localized speed formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedFormat {
    kph: String,
    mph: String,
}

impl SpeedFormat {
    /// Loads the unit labels from `catalog`.
    pub fn new(catalog: &TextCatalog) -> Result<Self, ValidationError> {
        Ok(Self {
            kph: catalog.owned("unit.kph")?,
            mph: catalog.owned("unit.mph")?,
        })
    }

    /// Formats `speed_ms` as a whole number in the preferred unit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn display(&self, speed_ms: f64, metric: bool) -> String {
        let (factor, unit) = if metric {
            (MS_TO_KPH, &self.kph)
        } else {
            (MS_TO_MPH, &self.mph)
        };
        let speed = (speed_ms * factor).round() as i64;
        format!("{speed} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use crate::text::Locale;

    use super::*;

    fn format(locale: Locale) -> SpeedFormat {
        SpeedFormat::new(&TextCatalog::embedded(locale).unwrap()).unwrap()
    }

    #[test]
    fn display_speed_metric_and_imperial() {
        let f = format(Locale::En);
        assert_eq!(f.display(10.0, true), "36 km/h");
        assert_eq!(f.display(10.0, false), "22 mph");
    }

    #[test]
    fn display_speed_uses_locale_units() {
        assert_eq!(format(Locale::Ru).display(10.0, true), "36 км/ч");
    }

    #[test]
    fn min_speed_filter_is_fifteen_mph() {
        assert_eq!(format(Locale::En).display(MIN_SPEED_FILTER, false), "15 mph");
    }

    #[test]
    fn live_state_deserializes_with_defaults() {
        let live: LiveState = serde_json::from_str(r#"{"calibration_percent": 42}"#).unwrap();
        assert_eq!(live.calibration_percent, Some(42));
        assert!(live.joystick_axes.is_empty());
        assert!(!live.replay);
    }
}
