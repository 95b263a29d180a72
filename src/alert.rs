//! Alert values.
//!
//! An [`Alert`] describes one driver-facing notification. Alerts are plain
//! values: the policy table holds prototypes, and every resolution returns
//! a fresh copy stamped with the event and category it was resolved for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ValidationError;
use crate::event::EventName;
use crate::text::TextCatalog;
use crate::time::duration_cycles;

/// How urgent the alert looks.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertStatus {
    Normal,
    UserPrompt,
    Critical,
}

/// How much screen the alert takes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSize {
    None,
    Small,
    Mid,
    Full,
}

/// Alert priority. Higher variants win arbitration.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Lowest,
    Lower,
    Low,
    Mid,
    High,
    Highest,
}

/// Visual cue requested from the vehicle HUD.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualAlert {
    None,
    Fcw,
    SteerRequired,
    BrakePressed,
    WrongGear,
    SeatbeltUnbuckled,
    SpeedTooHigh,
    Ldw,
}

/// Sound requested from the audio renderer.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudibleAlert {
    None,
    Engage,
    Disengage,
    Refuse,
    WarningSoft,
    WarningImmediate,
    Prompt,
    PromptRepeat,
    PromptDistracted,
}

/// The fixed presentation of an alert: everything except text and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertStyle {
    /// Status.
    pub status: AlertStatus,
    /// Size.
    pub size: AlertSize,
    /// Priority.
    pub priority: Priority,
    /// Visual cue.
    pub visual: VisualAlert,
    /// Audible cue.
    pub audible: AudibleAlert,
}

impl AlertStyle {
    /// Creates a style.
    #[must_use]
    pub const fn new(
        status: AlertStatus,
        size: AlertSize,
        priority: Priority,
        visual: VisualAlert,
        audible: AudibleAlert,
    ) -> Self {
        Self {
            status,
            size,
            priority,
            visual,
            audible,
        }
    }
}

/// One driver-facing notification.
///
/// `duration_cycles` is derived from a seconds duration once, at
/// construction. `alert_type` and `resolved_category` are only set on the
/// copies returned by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    text1: String,
    text2: String,
    status: AlertStatus,
    size: AlertSize,
    priority: Priority,
    visual: VisualAlert,
    audible: AudibleAlert,
    duration_cycles: u32,
    repeat_rate: f64,
    activation_delay_secs: f64,
    alert_type: String,
    resolved_category: Option<Category>,
}

impl Alert {
    /// Creates an alert shown for `duration_secs` once active.
    #[must_use]
    pub fn new(
        text1: impl Into<String>,
        text2: impl Into<String>,
        style: AlertStyle,
        duration_secs: f64,
    ) -> Self {
        Self {
            text1: text1.into(),
            text2: text2.into(),
            status: style.status,
            size: style.size,
            priority: style.priority,
            visual: style.visual,
            audible: style.audible,
            duration_cycles: duration_cycles(duration_secs),
            repeat_rate: 0.0,
            activation_delay_secs: 0.0,
            alert_type: String::new(),
            resolved_category: None,
        }
    }

    /// Sets the audio repeat rate.
    #[must_use]
    pub fn with_repeat_rate(mut self, rate: f64) -> Self {
        self.repeat_rate = rate;
        self
    }

    /// Sets how long the condition must persist before the alert surfaces.
    #[must_use]
    pub fn with_activation_delay(mut self, secs: f64) -> Self {
        self.activation_delay_secs = secs;
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the display duration.
    #[must_use]
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_cycles = duration_cycles(secs);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy stamped with the event and category it resolved for.
    #[must_use]
    pub(crate) fn resolved(&self, event: EventName, category: Category) -> Self {
        Self {
            alert_type: format!("{event}/{category}"),
            resolved_category: Some(category),
            ..self.clone()
        }
    }

    /// Primary text.
    #[must_use]
    pub fn text1(&self) -> &str {
        &self.text1
    }

    /// Secondary text.
    #[must_use]
    pub fn text2(&self) -> &str {
        &self.text2
    }

    /// Status.
    #[must_use]
    pub const fn status(&self) -> AlertStatus {
        self.status
    }

    /// Size.
    #[must_use]
    pub const fn size(&self) -> AlertSize {
        self.size
    }

    /// Priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Visual cue.
    #[must_use]
    pub const fn visual(&self) -> VisualAlert {
        self.visual
    }

    /// Audible cue.
    #[must_use]
    pub const fn audible(&self) -> AudibleAlert {
        self.audible
    }

    /// Display duration in control cycles.
    #[must_use]
    pub const fn duration_cycles(&self) -> u32 {
        self.duration_cycles
    }

    /// Audio repeat rate. Passed through untouched to the audio consumer.
    #[must_use]
    pub const fn repeat_rate(&self) -> f64 {
        self.repeat_rate
    }

    /// Minimum continuous presence before the alert surfaces, in seconds.
    #[must_use]
    pub const fn activation_delay_secs(&self) -> f64 {
        self.activation_delay_secs
    }

    /// `"<event>/<category>"`, or empty on an unresolved prototype.
    #[must_use]
    pub fn alert_type(&self) -> &str {
        &self.alert_type
    }

    /// Category this copy was resolved for.
    #[must_use]
    pub const fn resolved_category(&self) -> Option<Category> {
        self.resolved_category
    }

    /// True if `self` beats `other` in arbitration.
    ///
    /// Only priority is compared; equal priorities never outrank each other.
    #[must_use]
    pub fn outranks(&self, other: &Alert) -> bool {
        self.priority > other.priority
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {:?} {:?} {:?}",
            self.text1, self.text2, self.priority, self.visual, self.audible
        )
    }
}

/// Named alert shapes with localized fixed titles.
#[derive(Debug, Clone)]
pub struct AlertPresets {
    no_entry_title: String,
    take_control: String,
    user_soft_disable_title: String,
    startup_hint: String,
}

impl AlertPresets {
    /// Loads the preset titles from `catalog`.
    pub fn new(catalog: &TextCatalog) -> Result<Self, ValidationError> {
        Ok(Self {
            no_entry_title: catalog.owned("preset.no_entry_title")?,
            take_control: catalog.owned("preset.take_control")?,
            user_soft_disable_title: catalog.owned("preset.user_soft_disable_title")?,
            startup_hint: catalog.owned("preset.startup_hint")?,
        })
    }

    /// Engagement refused.
    #[must_use]
    pub fn no_entry(&self, text2: impl Into<String>) -> Alert {
        self.no_entry_with_visual(text2, VisualAlert::None)
    }

    /// Engagement refused, with a HUD cue.
    #[must_use]
    pub fn no_entry_with_visual(&self, text2: impl Into<String>, visual: VisualAlert) -> Alert {
        Alert::new(
            self.no_entry_title.clone(),
            text2,
            AlertStyle::new(
                AlertStatus::Normal,
                AlertSize::Mid,
                Priority::Low,
                visual,
                AudibleAlert::Refuse,
            ),
            3.0,
        )
    }

    /// Disengagement after a grace period.
    #[must_use]
    pub fn soft_disable(&self, text2: impl Into<String>) -> Alert {
        Alert::new(
            self.take_control.clone(),
            text2,
            AlertStyle::new(
                AlertStatus::UserPrompt,
                AlertSize::Full,
                Priority::Mid,
                VisualAlert::SteerRequired,
                AudibleAlert::WarningSoft,
            ),
            2.0,
        )
    }

    /// Soft disable for a condition the driver caused.
    #[must_use]
    pub fn user_soft_disable(&self, text2: impl Into<String>) -> Alert {
        Alert {
            text1: self.user_soft_disable_title.clone(),
            ..self.soft_disable(text2)
        }
    }

    /// Disengage now.
    #[must_use]
    pub fn immediate_disable(&self, text2: impl Into<String>) -> Alert {
        Alert::new(
            self.take_control.clone(),
            text2,
            AlertStyle::new(
                AlertStatus::Critical,
                AlertSize::Full,
                Priority::Highest,
                VisualAlert::SteerRequired,
                AudibleAlert::WarningImmediate,
            ),
            4.0,
        )
    }

    /// Sound-only engage/disengage chime.
    #[must_use]
    pub fn engagement(&self, audible: AudibleAlert) -> Alert {
        Alert::new(
            "",
            "",
            AlertStyle::new(
                AlertStatus::Normal,
                AlertSize::None,
                Priority::Mid,
                VisualAlert::None,
                audible,
            ),
            0.2,
        )
    }

    /// Quiet banner shown in every state. Small when there is no second line.
    #[must_use]
    pub fn normal_permanent(&self, text1: impl Into<String>, text2: impl Into<String>) -> Alert {
        let text2 = text2.into();
        let size = if text2.is_empty() {
            AlertSize::Small
        } else {
            AlertSize::Mid
        };
        Alert::new(
            text1,
            text2,
            AlertStyle::new(
                AlertStatus::Normal,
                size,
                Priority::Lower,
                VisualAlert::None,
                AudibleAlert::None,
            ),
            0.2,
        )
    }

    /// Startup banner with the standard safety hint.
    #[must_use]
    pub fn startup(&self, text1: impl Into<String>) -> Alert {
        self.startup_with(text1, self.startup_hint.clone(), AlertStatus::Normal)
    }

    /// Startup banner with custom second line and status.
    #[must_use]
    pub fn startup_with(
        &self,
        text1: impl Into<String>,
        text2: impl Into<String>,
        status: AlertStatus,
    ) -> Alert {
        Alert::new(
            text1,
            text2,
            AlertStyle::new(
                status,
                AlertSize::Mid,
                Priority::Lower,
                VisualAlert::None,
                AudibleAlert::None,
            ),
            10.0,
        )
    }
}
