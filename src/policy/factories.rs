//! Dynamic alerts whose text or severity depends on runtime context.

use crate::alert::{Alert, AlertPresets, AlertSize, AlertStatus, AlertStyle, AudibleAlert, Priority, VisualAlert};
use crate::context::{ContextError, SpeedFormat, MIN_SPEED_FILTER};
use crate::text::Template;
use crate::time::required_cycles;

use super::AlertSlot;

/// True while a soft-disable condition is younger than `window_secs`.
///
/// A condition that has only just appeared has no grace period left to
/// spend, so every soft-disable factory shows the immediate-disable alert
/// instead. The age is counted the same way as activation delays.
#[must_use]
pub fn escalate_soft_disable(consecutive_cycles: u32, window_secs: f64) -> bool {
    consecutive_cycles < required_cycles(window_secs)
}

pub(super) fn soft_disable(presets: &AlertPresets, text2: String, window_secs: f64) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |_, cycles| {
        Ok(if escalate_soft_disable(cycles, window_secs) {
            presets.immediate_disable(text2.clone())
        } else {
            presets.soft_disable(text2.clone())
        })
    })
}

pub(super) fn user_soft_disable(presets: &AlertPresets, text2: String, window_secs: f64) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |_, cycles| {
        Ok(if escalate_soft_disable(cycles, window_secs) {
            presets.immediate_disable(text2.clone())
        } else {
            presets.user_soft_disable(text2.clone())
        })
    })
}

pub(super) fn startup_master(presets: &AlertPresets, title: String) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |ctx, _| {
        let branch = if ctx.live.replay {
            "replay".to_string()
        } else {
            ctx.live.branch.clone().unwrap_or_default()
        };
        Ok(presets.startup_with(title.clone(), branch, AlertStatus::UserPrompt))
    })
}

pub(super) fn below_engage_speed(presets: &AlertPresets, template: Template, speed: SpeedFormat) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |ctx, _| {
        let shown = speed.display(ctx.car.min_enable_speed, ctx.metric);
        Ok(presets.no_entry(template.render(&[("speed", &shown)])))
    })
}

pub(super) fn below_steer_speed(template: Template, speed: SpeedFormat) -> AlertSlot {
    AlertSlot::dynamic(move |ctx, _| {
        let shown = speed.display(ctx.car.min_steer_speed, ctx.metric);
        Ok(Alert::new(
            template.render(&[("speed", &shown)]),
            "",
            AlertStyle::new(
                AlertStatus::UserPrompt,
                AlertSize::Small,
                Priority::Mid,
                VisualAlert::SteerRequired,
                AudibleAlert::Prompt,
            ),
            0.4,
        ))
    })
}

pub(super) fn calibration_incomplete(title: Template, hint: Template, speed: SpeedFormat) -> AlertSlot {
    AlertSlot::dynamic(move |ctx, _| {
        let percent = ctx
            .live
            .calibration_percent
            .ok_or(ContextError::MissingLiveState {
                field: "calibration_percent",
            })?;
        let min_speed = speed.display(MIN_SPEED_FILTER, ctx.metric);
        Ok(Alert::new(
            title.render(&[("percent", &percent.to_string())]),
            hint.render(&[("speed", &min_speed)]),
            AlertStyle::new(
                AlertStatus::Normal,
                AlertSize::Mid,
                Priority::Lowest,
                VisualAlert::None,
                AudibleAlert::None,
            ),
            0.2,
        ))
    })
}

pub(super) fn wrong_car_mode(presets: &AlertPresets, cruise_off: String, main_switch_off: String) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |ctx, _| {
        let text = if ctx.car.car_name == "honda" {
            &main_switch_off
        } else {
            &cruise_off
        };
        Ok(presets.no_entry(text.clone()))
    })
}

#[allow(clippy::cast_possible_truncation)]
pub(super) fn joystick(presets: &AlertPresets, title: String, axes: Template) -> AlertSlot {
    let presets = presets.clone();
    AlertSlot::dynamic(move |ctx, _| {
        let (gas, steer) = match ctx.live.joystick_axes.as_slice() {
            [gas, steer, ..] => (*gas, *steer),
            _ => (0.0, 0.0),
        };
        let gas = ((gas * 100.0).round() as i64).to_string();
        let steer = ((steer * 100.0).round() as i64).to_string();
        Ok(presets.normal_permanent(title.clone(), axes.render(&[("gas", &gas), ("steer", &steer)])))
    })
}

#[cfg(test)]
mod tests {
    use crate::context::{AlertContext, CarParams, LiveState};
    use crate::text::{Locale, TextCatalog};

    use super::*;

    fn catalog() -> TextCatalog {
        TextCatalog::embedded(Locale::En).unwrap()
    }

    fn presets() -> AlertPresets {
        AlertPresets::new(&catalog()).unwrap()
    }

    fn speed() -> SpeedFormat {
        SpeedFormat::new(&catalog()).unwrap()
    }

    #[test]
    fn escalation_window_boundary() {
        assert!(escalate_soft_disable(1, 0.5));
        assert!(escalate_soft_disable(49, 0.5));
        assert!(!escalate_soft_disable(50, 0.5));
        assert!(!escalate_soft_disable(500, 0.5));
    }

    #[test]
    fn soft_disable_escalates_while_young() {
        let slot = soft_disable(&presets(), "Overheat".to_string(), 0.5);
        let ctx = AlertContext::default();

        let young = slot.build(&ctx, 1).unwrap();
        assert_eq!(young.priority(), Priority::Highest);
        assert_eq!(young.audible(), AudibleAlert::WarningImmediate);

        let settled = slot.build(&ctx, 50).unwrap();
        assert_eq!(settled.priority(), Priority::Mid);
        assert_eq!(settled.audible(), AudibleAlert::WarningSoft);
        assert_eq!(settled.text2(), "Overheat");
    }

    #[test]
    fn user_soft_disable_uses_gentler_title() {
        let slot = user_soft_disable(&presets(), "Door Open".to_string(), 0.5);
        let settled = slot.build(&AlertContext::default(), 100).unwrap();
        assert_eq!(settled.text1(), "openpilot will disengage");
        let young = slot.build(&AlertContext::default(), 2).unwrap();
        assert_eq!(young.text1(), "TAKE CONTROL IMMEDIATELY");
    }

    #[test]
    fn startup_master_shows_branch_or_replay() {
        let slot = startup_master(&presets(), "Untested".to_string());
        let mut ctx = AlertContext::default();
        ctx.live.branch = Some("devel".to_string());
        assert_eq!(slot.build(&ctx, 1).unwrap().text2(), "devel");
        assert_eq!(slot.build(&ctx, 1).unwrap().status(), AlertStatus::UserPrompt);

        ctx.live.replay = true;
        assert_eq!(slot.build(&ctx, 1).unwrap().text2(), "replay");
    }

    #[test]
    fn below_engage_speed_formats_threshold() {
        let slot = below_engage_speed(&presets(), catalog().template("below_engage_speed").unwrap(), speed());
        let car = CarParams {
            min_enable_speed: 10.0,
            ..CarParams::default()
        };
        let metric = AlertContext::new(car.clone(), LiveState::default(), true);
        assert_eq!(slot.build(&metric, 1).unwrap().text2(), "Speed Below 36 km/h");
        let imperial = AlertContext::new(car, LiveState::default(), false);
        assert_eq!(slot.build(&imperial, 1).unwrap().text2(), "Speed Below 22 mph");
    }

    #[test]
    fn calibration_requires_percentage() {
        let c = catalog();
        let slot = calibration_incomplete(
            c.template("calibration_incomplete.title").unwrap(),
            c.template("calibration_incomplete.hint").unwrap(),
            speed(),
        );
        let mut ctx = AlertContext::default();
        assert_eq!(
            slot.build(&ctx, 1).unwrap_err(),
            ContextError::MissingLiveState {
                field: "calibration_percent"
            }
        );

        ctx.live.calibration_percent = Some(42);
        let alert = slot.build(&ctx, 1).unwrap();
        assert_eq!(alert.text1(), "Calibration in Progress: 42%");
        assert_eq!(alert.text2(), "Drive Above 15 mph");
    }

    #[test]
    fn wrong_car_mode_is_brand_specific() {
        let slot = wrong_car_mode(&presets(), "Cruise off".to_string(), "Main off".to_string());
        let mut ctx = AlertContext::default();
        ctx.car.car_name = "mitsubishi".to_string();
        assert_eq!(slot.build(&ctx, 1).unwrap().text2(), "Cruise off");
        ctx.car.car_name = "honda".to_string();
        assert_eq!(slot.build(&ctx, 1).unwrap().text2(), "Main off");
    }

    #[test]
    fn joystick_reads_axes() {
        let slot = joystick(&presets(), "Joystick Mode".to_string(), catalog().template("joystick.axes").unwrap());
        let mut ctx = AlertContext::default();
        assert_eq!(slot.build(&ctx, 1).unwrap().text2(), "Gas: 0%, Steer: 0%");

        ctx.live.joystick_axes = vec![0.5, -0.25];
        let alert = slot.build(&ctx, 1).unwrap();
        assert_eq!(alert.text1(), "Joystick Mode");
        assert_eq!(alert.text2(), "Gas: 50%, Steer: -25%");
    }
}
