//! The standard policy table.
//!
//! Every known event and the alerts it raises. Rows without entries are
//! deliberate: those events are recorded and published but never shown.

use log::info;

use crate::alert::{Alert, AlertPresets, AlertSize, AlertStatus, AlertStyle, AudibleAlert, Priority, VisualAlert};
use crate::category::Category::{
    Enable, ImmediateDisable, NoEntry, Override, Permanent, PreEnable, SoftDisable, UserDisable, Warning,
};
use crate::config::ArbiterConfig;
use crate::context::SpeedFormat;
use crate::error::ValidationError;
use crate::event::EventName as E;
use crate::text::TextCatalog;

use super::{factories, PolicyRow, PolicyTable};

const fn style(
    status: AlertStatus,
    size: AlertSize,
    priority: Priority,
    visual: VisualAlert,
    audible: AudibleAlert,
) -> AlertStyle {
    AlertStyle::new(status, size, priority, visual, audible)
}

impl PolicyTable {
    /// Builds the full table with text from the configured locale.
    pub fn standard(config: &ArbiterConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let catalog = TextCatalog::embedded(config.locale)?;
        let table = Self::standard_with_catalog(&catalog, config.soft_disable_escalation_secs)?;
        info!(
            "policy table built: locale={} texts={} events={} fingerprint={}",
            config.locale,
            catalog.len(),
            table.len(),
            table.fingerprint()
        );
        Ok(table)
    }

    /// Builds the full table from an explicit catalog.
    #[allow(clippy::too_many_lines)]
    pub fn standard_with_catalog(c: &TextCatalog, escalation_secs: f64) -> Result<Self, ValidationError> {
        let p = AlertPresets::new(c)?;
        let speed = SpeedFormat::new(c)?;
        let t = |key: &str| c.owned(key);

        let soft = |key: &str| -> Result<PolicyRow, ValidationError> {
            let text = t(key)?;
            Ok(PolicyRow::silent()
                .with(SoftDisable, factories::soft_disable(&p, text.clone(), escalation_secs))
                .with(NoEntry, p.no_entry(text)))
        };
        let user_soft = |key: &str| -> Result<PolicyRow, ValidationError> {
            let text = t(key)?;
            Ok(PolicyRow::silent()
                .with(SoftDisable, factories::user_soft_disable(&p, text.clone(), escalation_secs))
                .with(NoEntry, p.no_entry(text)))
        };
        let disengage = || p.engagement(AudibleAlert::Disengage);
        let camera_error = || -> Result<PolicyRow, ValidationError> {
            Ok(PolicyRow::silent().with(
                Permanent,
                p.normal_permanent(t("camera_error")?, "")
                    .with_duration(1.0)
                    .with_activation_delay(30.0),
            ))
        };
        let hardware = |key: &str| -> Result<PolicyRow, ValidationError> {
            Ok(PolicyRow::silent().with(Permanent, p.normal_permanent(t(key)?, t("hardware_issue")?)))
        };

        let builder = PolicyTable::builder()
            // ---- silent ----
            .silent(E::StockFcw)
            .silent(E::CruiseMismatch)
            .silent(E::LocalizerMalfunction)
            .silent(E::NoGps)
            // ---- shown in every state ----
            .row(
                E::JoystickDebug,
                PolicyRow::silent()
                    .with(
                        Warning,
                        factories::joystick(&p, t("joystick.title")?, c.template("joystick.axes")?),
                    )
                    .with(Permanent, p.normal_permanent(t("joystick_debug.permanent")?, "")),
            )
            .row(
                E::ControlsInitializing,
                PolicyRow::silent().with(NoEntry, p.no_entry(t("controls_initializing")?)),
            )
            .row(E::Startup, PolicyRow::silent().with(Permanent, p.startup(t("startup")?)))
            .row(
                E::StartupMaster,
                PolicyRow::silent().with(Permanent, factories::startup_master(&p, t("startup_master.title")?)),
            )
            .row(
                E::StartupNoControl,
                PolicyRow::silent().with(Permanent, p.startup(t("startup_no_control")?)),
            )
            .row(
                E::StartupNoCar,
                PolicyRow::silent().with(Permanent, p.startup(t("startup_no_car")?)),
            )
            .row(
                E::StartupNoFw,
                PolicyRow::silent().with(
                    Permanent,
                    p.startup_with(t("startup_no_fw.title")?, t("startup_no_fw.hint")?, AlertStatus::UserPrompt),
                ),
            )
            .row(
                E::DashcamMode,
                PolicyRow::silent().with(
                    Permanent,
                    p.normal_permanent(t("dashcam_mode")?, "").with_priority(Priority::Lowest),
                ),
            )
            .row(
                E::InvalidLkasSetting,
                PolicyRow::silent().with(
                    Permanent,
                    p.normal_permanent(t("invalid_lkas_setting.title")?, t("invalid_lkas_setting.hint")?),
                ),
            )
            .row(
                E::CarUnrecognized,
                PolicyRow::silent().with(
                    Permanent,
                    p.normal_permanent(t("car_unrecognized.title")?, t("car_unrecognized.hint")?)
                        .with_priority(Priority::Lowest),
                ),
            )
            .row(
                E::StockAeb,
                PolicyRow::silent()
                    .with(
                        Permanent,
                        Alert::new(
                            t("brake_now")?,
                            t("stock_aeb.hint")?,
                            style(
                                AlertStatus::Critical,
                                AlertSize::Full,
                                Priority::Highest,
                                VisualAlert::Fcw,
                                AudibleAlert::None,
                            ),
                            2.0,
                        ),
                    )
                    .with(NoEntry, p.no_entry(t("stock_aeb.no_entry")?)),
            )
            .row(
                E::Fcw,
                PolicyRow::silent().with(
                    Permanent,
                    Alert::new(
                        t("brake_now")?,
                        t("fcw.hint")?,
                        style(
                            AlertStatus::Critical,
                            AlertSize::Full,
                            Priority::Highest,
                            VisualAlert::Fcw,
                            AudibleAlert::WarningSoft,
                        ),
                        2.0,
                    ),
                ),
            )
            .row(
                E::Ldw,
                PolicyRow::silent().with(
                    Permanent,
                    Alert::new(
                        t("ldw")?,
                        "",
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::Ldw,
                            AudibleAlert::Prompt,
                        ),
                        3.0,
                    ),
                ),
            )
            // ---- shown while engaged ----
            .row(E::VehicleModelInvalid, soft("vehicle_model_invalid")?)
            .row(
                E::SteerTempUnavailableSilent,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("steer_temp_unavailable_silent")?,
                        "",
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::SteerRequired,
                            AudibleAlert::Prompt,
                        ),
                        1.0,
                    ),
                ),
            )
            .row(
                E::PreDriverDistracted,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("pay_attention")?,
                        "",
                        style(
                            AlertStatus::Normal,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::PromptDriverDistracted,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("pay_attention")?,
                        t("driver_distracted")?,
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Mid,
                            Priority::Mid,
                            VisualAlert::SteerRequired,
                            AudibleAlert::PromptDistracted,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::DriverDistracted,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("disengage_immediately")?,
                        t("driver_distracted")?,
                        style(
                            AlertStatus::Critical,
                            AlertSize::Full,
                            Priority::High,
                            VisualAlert::SteerRequired,
                            AudibleAlert::WarningImmediate,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::PreDriverUnresponsive,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("pre_driver_unresponsive")?,
                        "",
                        style(
                            AlertStatus::Normal,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::SteerRequired,
                            AudibleAlert::None,
                        ),
                        0.1,
                    )
                    .with_repeat_rate(0.75),
                ),
            )
            .row(
                E::PromptDriverUnresponsive,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("touch_steering_wheel")?,
                        t("driver_unresponsive")?,
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Mid,
                            Priority::Mid,
                            VisualAlert::SteerRequired,
                            AudibleAlert::PromptDistracted,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::DriverUnresponsive,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("disengage_immediately")?,
                        t("driver_unresponsive")?,
                        style(
                            AlertStatus::Critical,
                            AlertSize::Full,
                            Priority::High,
                            VisualAlert::SteerRequired,
                            AudibleAlert::WarningImmediate,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::ManualRestart,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("manual_restart.title")?,
                        t("manual_restart.hint")?,
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Mid,
                            Priority::Low,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.2,
                    ),
                ),
            )
            .row(
                E::ResumeRequired,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("resume_required.title")?,
                        t("resume_required.hint")?,
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Mid,
                            Priority::Low,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.2,
                    ),
                ),
            )
            .row(
                E::BelowSteerSpeed,
                PolicyRow::silent().with(
                    Warning,
                    factories::below_steer_speed(c.template("below_steer_speed")?, speed.clone()),
                ),
            )
            .row(E::PreLaneChangeLeft, lane_change_prompt(t("pre_lane_change_left")?))
            .row(E::PreLaneChangeRight, lane_change_prompt(t("pre_lane_change_right")?))
            .row(
                E::LaneChangeBlocked,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("lane_change_blocked")?,
                        "",
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::None,
                            AudibleAlert::Prompt,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::LaneChange,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("lane_change")?,
                        "",
                        style(
                            AlertStatus::Normal,
                            AlertSize::Small,
                            Priority::Low,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::SteerSaturated,
                PolicyRow::silent().with(
                    Warning,
                    Alert::new(
                        t("steer_saturated.title")?,
                        t("steer_saturated.hint")?,
                        style(
                            AlertStatus::UserPrompt,
                            AlertSize::Mid,
                            Priority::Low,
                            VisualAlert::SteerRequired,
                            AudibleAlert::PromptRepeat,
                        ),
                        1.0,
                    ),
                ),
            )
            .row(E::FanMalfunction, hardware("fan_malfunction")?)
            .row(E::CameraMalfunction, hardware("camera_malfunction")?)
            .row(E::GpsMalfunction, hardware("gps_malfunction")?)
            // ---- engagement transitions ----
            .row(
                E::PcmEnable,
                PolicyRow::silent().with(Enable, p.engagement(AudibleAlert::Engage)),
            )
            .row(
                E::ButtonEnable,
                PolicyRow::silent().with(Enable, p.engagement(AudibleAlert::Engage)),
            )
            .row(E::PcmDisable, PolicyRow::silent().with(UserDisable, disengage()))
            .row(E::ButtonCancel, PolicyRow::silent().with(UserDisable, disengage()))
            .row(
                E::BrakeHold,
                PolicyRow::silent()
                    .with(UserDisable, disengage())
                    .with(NoEntry, p.no_entry(t("brake_hold")?)),
            )
            .row(
                E::ParkBrake,
                PolicyRow::silent()
                    .with(UserDisable, disengage())
                    .with(NoEntry, p.no_entry(t("park_brake")?)),
            )
            .row(
                E::PedalPressed,
                PolicyRow::silent()
                    .with(UserDisable, disengage())
                    .with(
                        NoEntry,
                        p.no_entry_with_visual(t("pedal_pressed")?, VisualAlert::BrakePressed),
                    ),
            )
            .row(
                E::PedalPressedPreEnable,
                PolicyRow::silent().with(
                    PreEnable,
                    Alert::new(
                        t("pedal_pressed_pre_enable")?,
                        "",
                        style(
                            AlertStatus::Normal,
                            AlertSize::Small,
                            Priority::Lowest,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.1,
                    )
                    .with_activation_delay(1.0),
                ),
            )
            .row(
                E::GasPressedOverride,
                PolicyRow::silent().with(
                    Override,
                    Alert::new(
                        "",
                        "",
                        style(
                            AlertStatus::Normal,
                            AlertSize::None,
                            Priority::Lowest,
                            VisualAlert::None,
                            AudibleAlert::None,
                        ),
                        0.1,
                    ),
                ),
            )
            .row(
                E::WrongCarMode,
                PolicyRow::silent().with(UserDisable, disengage()).with(
                    NoEntry,
                    factories::wrong_car_mode(
                        &p,
                        t("wrong_car_mode.cruise_off")?,
                        t("wrong_car_mode.main_switch_off")?,
                    ),
                ),
            )
            .row(
                E::WrongCruiseMode,
                PolicyRow::silent()
                    .with(UserDisable, disengage())
                    .with(NoEntry, p.no_entry(t("wrong_cruise_mode")?)),
            )
            .row(E::SteerTempUnavailable, soft("steer_temp_unavailable")?)
            .row(
                E::OutOfSpace,
                PolicyRow::silent()
                    .with(Permanent, p.normal_permanent(t("out_of_space")?, ""))
                    .with(NoEntry, p.no_entry(t("out_of_space")?)),
            )
            .row(
                E::BelowEngageSpeed,
                PolicyRow::silent().with(
                    NoEntry,
                    factories::below_engage_speed(&p, c.template("below_engage_speed")?, speed.clone()),
                ),
            )
            .row(
                E::SensorDataInvalid,
                PolicyRow::silent()
                    .with(
                        Permanent,
                        Alert::new(
                            t("sensor_data_invalid")?,
                            t("reboot_device")?,
                            style(
                                AlertStatus::Normal,
                                AlertSize::Mid,
                                Priority::Lower,
                                VisualAlert::None,
                                AudibleAlert::None,
                            ),
                            0.2,
                        )
                        .with_activation_delay(1.0),
                    )
                    .with(NoEntry, p.no_entry(t("sensor_data_invalid")?)),
            )
            .row(
                E::SoundsUnavailable,
                PolicyRow::silent()
                    .with(Permanent, p.normal_permanent(t("sounds_unavailable")?, t("reboot_device")?))
                    .with(NoEntry, p.no_entry(t("sounds_unavailable")?)),
            )
            .row(
                E::TooDistracted,
                PolicyRow::silent().with(NoEntry, p.no_entry(t("too_distracted")?)),
            )
            .row(
                E::Overheat,
                soft("overheat")?.with(Permanent, p.normal_permanent(t("overheat")?, "")),
            )
            .row(E::WrongGear, user_soft("wrong_gear")?)
            .row(
                E::CalibrationInvalid,
                soft("calibration_invalid.detail")?.with(
                    Permanent,
                    p.normal_permanent(t("calibration_invalid.title")?, t("calibration_invalid.hint")?),
                ),
            )
            .row(
                E::CalibrationIncomplete,
                soft("calibration_incomplete")?.with(
                    Permanent,
                    factories::calibration_incomplete(
                        c.template("calibration_incomplete.title")?,
                        c.template("calibration_incomplete.hint")?,
                        speed,
                    ),
                ),
            )
            .row(E::DoorOpen, user_soft("door_open")?)
            .row(E::SeatbeltNotLatched, user_soft("seatbelt_not_latched")?)
            .row(E::EspDisabled, soft("esp_disabled")?)
            .row(E::LowBattery, soft("low_battery")?)
            .row(E::CommIssue, soft("comm_issue")?)
            .row(
                E::ProcessNotRunning,
                PolicyRow::silent().with(NoEntry, p.no_entry(t("system_malfunction")?)),
            )
            .row(E::RadarFault, soft("radar_fault")?)
            .row(E::ModeldLagging, soft("modeld_lagging")?)
            .row(E::PosenetInvalid, soft("posenet_invalid")?)
            .row(E::DeviceFalling, soft("device_falling")?)
            .row(
                E::LowMemory,
                soft("low_memory")?.with(
                    Permanent,
                    p.normal_permanent(t("low_memory.title")?, t("reboot_device")?),
                ),
            )
            .row(
                E::HighCpuUsage,
                PolicyRow::silent().with(NoEntry, p.no_entry(t("system_malfunction")?)),
            )
            .row(
                E::AccFaulted,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("acc_faulted")?))
                    .with(Permanent, p.normal_permanent(t("acc_faulted")?, ""))
                    .with(NoEntry, p.no_entry(t("acc_faulted")?)),
            )
            .row(
                E::ControlsMismatch,
                PolicyRow::silent().with(ImmediateDisable, p.immediate_disable(t("controls_mismatch")?)),
            )
            .row(E::RoadCameraError, camera_error()?)
            .row(E::DriverCameraError, camera_error()?)
            .row(E::WideRoadCameraError, camera_error()?)
            .row(
                E::UsbError,
                soft("usb_error")?.with(Permanent, p.normal_permanent(t("usb_error")?, "")),
            )
            .row(
                E::CanError,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("can_error")?))
                    .with(
                        Permanent,
                        Alert::new(
                            t("can_error")?,
                            "",
                            style(
                                AlertStatus::Normal,
                                AlertSize::Small,
                                Priority::Low,
                                VisualAlert::None,
                                AudibleAlert::None,
                            ),
                            1.0,
                        )
                        .with_activation_delay(1.0),
                    )
                    .with(NoEntry, p.no_entry(t("can_error")?)),
            )
            .row(
                E::SteerUnavailable,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("steer_unavailable")?))
                    .with(Permanent, p.normal_permanent(t("steer_unavailable.permanent")?, ""))
                    .with(NoEntry, p.no_entry(t("steer_unavailable")?)),
            )
            .row(
                E::BrakeUnavailable,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("brake_unavailable")?))
                    .with(Permanent, p.normal_permanent(t("brake_unavailable")?, ""))
                    .with(NoEntry, p.no_entry(t("brake_unavailable")?)),
            )
            .row(
                E::ReverseGear,
                PolicyRow::silent()
                    .with(
                        Permanent,
                        Alert::new(
                            t("reverse_gear.title")?,
                            "",
                            style(
                                AlertStatus::Normal,
                                AlertSize::Full,
                                Priority::Lowest,
                                VisualAlert::None,
                                AudibleAlert::None,
                            ),
                            0.2,
                        )
                        .with_activation_delay(0.5),
                    )
                    .with(UserDisable, p.immediate_disable(t("reverse_gear")?))
                    .with(NoEntry, p.no_entry(t("reverse_gear")?)),
            )
            .row(
                E::CruiseDisabled,
                PolicyRow::silent().with(ImmediateDisable, p.immediate_disable(t("cruise_disabled")?)),
            )
            .row(
                E::PlannerError,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("planner_error")?))
                    .with(NoEntry, p.no_entry(t("planner_error")?)),
            )
            .row(
                E::RelayMalfunction,
                PolicyRow::silent()
                    .with(ImmediateDisable, p.immediate_disable(t("relay_malfunction")?))
                    .with(
                        Permanent,
                        p.normal_permanent(t("relay_malfunction")?, t("relay_malfunction.hint")?),
                    )
                    .with(NoEntry, p.no_entry(t("relay_malfunction")?)),
            )
            .row(
                E::NoTarget,
                PolicyRow::silent()
                    .with(ImmediateDisable, disengaged(t("disengaged")?, t("no_target.hint")?))
                    .with(NoEntry, p.no_entry(t("no_target.no_entry")?)),
            )
            .row(
                E::SpeedTooLow,
                PolicyRow::silent().with(ImmediateDisable, disengaged(t("disengaged")?, t("speed_too_low")?)),
            )
            .row(
                E::SpeedTooHigh,
                PolicyRow::silent()
                    .with(
                        Warning,
                        Alert::new(
                            t("speed_too_high.title")?,
                            t("speed_too_high.hint")?,
                            style(
                                AlertStatus::UserPrompt,
                                AlertSize::Mid,
                                Priority::High,
                                VisualAlert::SteerRequired,
                                AudibleAlert::PromptRepeat,
                            ),
                            4.0,
                        ),
                    )
                    .with(NoEntry, p.no_entry(t("speed_too_high.no_entry")?)),
            )
            .row(
                E::LowSpeedLockout,
                PolicyRow::silent()
                    .with(Permanent, p.normal_permanent(t("low_speed_lockout.permanent")?, ""))
                    .with(NoEntry, p.no_entry(t("low_speed_lockout.no_entry")?)),
            )
            .row(
                E::LkasDisabled,
                PolicyRow::silent()
                    .with(Permanent, p.normal_permanent(t("lkas_disabled.permanent")?, ""))
                    .with(NoEntry, p.no_entry(t("lkas_disabled.no_entry")?)),
            );

        builder.build()
    }
}

fn lane_change_prompt(text: String) -> PolicyRow {
    PolicyRow::silent().with(
        Warning,
        Alert::new(
            text,
            "",
            style(
                AlertStatus::Normal,
                AlertSize::Small,
                Priority::Low,
                VisualAlert::None,
                AudibleAlert::None,
            ),
            0.1,
        )
        .with_repeat_rate(0.75),
    )
}

fn disengaged(text1: String, text2: String) -> Alert {
    Alert::new(
        text1,
        text2,
        style(
            AlertStatus::Normal,
            AlertSize::Mid,
            Priority::High,
            VisualAlert::None,
            AudibleAlert::Disengage,
        ),
        3.0,
    )
}

#[cfg(test)]
mod tests {
    use crate::category::Category;
    use crate::context::AlertContext;
    use crate::event::EventName;
    use crate::text::Locale;

    use super::*;

    fn table(locale: Locale) -> PolicyTable {
        PolicyTable::standard(&ArbiterConfig {
            locale,
            ..ArbiterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn every_event_has_a_row() {
        let t = table(Locale::En);
        assert_eq!(t.len(), EventName::ALL.len());
        for e in EventName::ALL {
            assert!(t.contains(*e), "missing row for {e}");
        }
    }

    #[test]
    fn both_locales_build_the_same_layout() {
        assert_eq!(table(Locale::En).fingerprint(), table(Locale::Ru).fingerprint());
    }

    #[test]
    fn silent_rows_stay_silent() {
        let t = table(Locale::En);
        for e in [
            EventName::StockFcw,
            EventName::CruiseMismatch,
            EventName::LocalizerMalfunction,
            EventName::NoGps,
        ] {
            assert!(t.row(e).unwrap().is_silent(), "{e}");
            for c in Category::ALL {
                assert!(!t.has_category(e, c), "{e}/{c}");
            }
        }
    }

    #[test]
    fn soft_disable_family_has_no_entry_too() {
        let t = table(Locale::En);
        for e in [
            EventName::Overheat,
            EventName::CommIssue,
            EventName::DoorOpen,
            EventName::VehicleModelInvalid,
        ] {
            assert!(t.has_category(e, Category::SoftDisable), "{e}");
            assert!(t.has_category(e, Category::NoEntry), "{e}");
        }
    }

    #[test]
    fn engagement_rows() {
        let t = table(Locale::En);
        assert!(t.has_category(EventName::ButtonEnable, Category::Enable));
        assert!(t.has_category(EventName::ButtonCancel, Category::UserDisable));
        assert!(t.has_category(EventName::PedalPressedPreEnable, Category::PreEnable));
        assert!(t.has_category(EventName::GasPressedOverride, Category::Override));
    }

    #[test]
    fn overheat_no_entry_text_is_localized() {
        let ctx = AlertContext::default();
        let en = table(Locale::En);
        let ru = table(Locale::Ru);
        let en_alert = en.slot(EventName::Overheat, Category::NoEntry).unwrap().build(&ctx, 1).unwrap();
        let ru_alert = ru.slot(EventName::Overheat, Category::NoEntry).unwrap().build(&ctx, 1).unwrap();
        assert_eq!(en_alert.text1(), "openpilot Unavailable");
        assert_eq!(en_alert.text2(), "System Overheated");
        assert_eq!(ru_alert.text2(), "Перегрев");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = PolicyTable::standard(&ArbiterConfig {
            soft_disable_escalation_secs: -0.5,
            ..ArbiterConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEscalationWindow { .. }));
    }

    #[test]
    fn incomplete_catalog_is_rejected() {
        let catalog = TextCatalog::from_json(Locale::En, r#"{"preset.no_entry_title": "x"}"#).unwrap();
        let err = PolicyTable::standard_with_catalog(&catalog, 0.5).unwrap_err();
        assert!(matches!(err, ValidationError::MissingText { .. }));
    }
}
