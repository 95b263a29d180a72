//! Alert resolution.
//!
//! Turns the active events of an [`EventSet`] into concrete alerts for the
//! requested categories, applying activation-delay debounce. The resolver
//! only classifies and filters; choosing among competing alerts is left to
//! the caller, with [`select_highest`] and [`select_per_category`] as the
//! usual policies.

use std::collections::BTreeMap;

use log::{error, trace};

use crate::alert::Alert;
use crate::category::Category;
use crate::context::{AlertContext, ContextError};
use crate::error::{ArbiterResult, FactoryError};
use crate::event::EventName;
use crate::events::EventSet;
use crate::time::required_cycles;

/// Resolves every active event against `categories`.
///
/// Duplicated active entries are resolved independently. An alert is
/// included once its event has been active for at least its activation
/// delay, counting the current cycle. Results keep active-list order, then
/// category request order.
///
/// # Errors
///
/// Returns [`FactoryError`] when a dynamic alert cannot be built from `ctx`.
/// The error means the caller handed over an incomplete context and should
/// be treated as fatal.
pub fn resolve(events: &EventSet, categories: &[Category], ctx: &AlertContext) -> ArbiterResult<Vec<Alert>> {
    let table = events.table();
    let mut alerts = Vec::new();

    for &event in events.names() {
        let Some(row) = table.row(event) else {
            continue;
        };
        let consecutive = events.persistence(event).saturating_add(1);

        for &category in categories {
            let Some(slot) = row.slot(category) else {
                continue;
            };
            let alert = slot.build(ctx, consecutive).map_err(|e| {
                let err = factory_error(event, category, e);
                error!("{err}");
                err
            })?;

            if consecutive < required_cycles(alert.activation_delay_secs()) {
                continue;
            }

            let alert = alert.resolved(event, category);
            trace!("resolved {} after {consecutive} cycles: {alert}", alert.alert_type());
            alerts.push(alert);
        }
    }

    Ok(alerts)
}

fn factory_error(event: EventName, category: Category, err: ContextError) -> FactoryError {
    match err {
        ContextError::MissingLiveState { field } => FactoryError::MissingLiveState {
            event,
            category,
            field,
        },
    }
}

/// Highest-priority alert. Among equal priorities the earliest wins.
#[must_use]
pub fn select_highest(alerts: &[Alert]) -> Option<&Alert> {
    let mut best: Option<&Alert> = None;
    for alert in alerts {
        match best {
            Some(current) if !alert.outranks(current) => {}
            _ => best = Some(alert),
        }
    }
    best
}

/// Highest-priority alert per resolved category.
///
/// Alerts that were never resolved carry no category and are skipped.
#[must_use]
pub fn select_per_category(alerts: &[Alert]) -> BTreeMap<Category, &Alert> {
    let mut best: BTreeMap<Category, &Alert> = BTreeMap::new();
    for alert in alerts {
        let Some(category) = alert.resolved_category() else {
            continue;
        };
        best.entry(category)
            .and_modify(|current| {
                if alert.outranks(current) {
                    *current = alert;
                }
            })
            .or_insert(alert);
    }
    best
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::alert::{AlertSize, AlertStatus, AlertStyle, AudibleAlert, Priority, VisualAlert};
    use crate::error::ArbiterError;
    use crate::policy::{PolicyRow, PolicyTable};

    use super::*;

    fn alert(text: &str, priority: Priority, delay: f64) -> Alert {
        Alert::new(
            text,
            "",
            AlertStyle::new(
                AlertStatus::Normal,
                AlertSize::Small,
                priority,
                VisualAlert::None,
                AudibleAlert::None,
            ),
            1.0,
        )
        .with_activation_delay(delay)
    }

    fn table() -> Arc<PolicyTable> {
        Arc::new(
            PolicyTable::builder()
                .row(
                    EventName::Overheat,
                    PolicyRow::silent()
                        .with(Category::NoEntry, alert("hot", Priority::Low, 0.0))
                        .with(Category::Permanent, alert("hot later", Priority::Lower, 0.03)),
                )
                .row(
                    EventName::CanError,
                    PolicyRow::silent().with(Category::NoEntry, alert("can", Priority::High, 0.0)),
                )
                .row(
                    EventName::CalibrationIncomplete,
                    PolicyRow::silent().with_dynamic(Category::Permanent, |ctx, _| {
                        ctx.live
                            .calibration_percent
                            .map(|p| alert(&format!("{p}%"), Priority::Lowest, 0.0))
                            .ok_or(ContextError::MissingLiveState {
                                field: "calibration_percent",
                            })
                    }),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn stamps_type_and_category() {
        let mut set = EventSet::new(table());
        set.add(EventName::Overheat, false);
        let alerts = resolve(&set, &[Category::NoEntry], &AlertContext::default()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type(), "overheat/noEntry");
        assert_eq!(alerts[0].resolved_category(), Some(Category::NoEntry));
    }

    #[test]
    fn table_values_stay_unstamped() {
        let table = table();
        let mut set = EventSet::new(Arc::clone(&table));
        set.add(EventName::Overheat, false);
        let _ = resolve(&set, &[Category::NoEntry], &AlertContext::default()).unwrap();
        let slot = table.slot(EventName::Overheat, Category::NoEntry).unwrap();
        let raw = slot.build(&AlertContext::default(), 1).unwrap();
        assert_eq!(raw.alert_type(), "");
        assert_eq!(raw.resolved_category(), None);
    }

    #[test]
    fn debounce_boundary_is_inclusive() {
        let mut set = EventSet::new(table());
        let ctx = AlertContext::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            set.add(EventName::Overheat, false);
            seen.push(!resolve(&set, &[Category::Permanent], &ctx).unwrap().is_empty());
            set.reset();
        }
        assert_eq!(seen, vec![false, false, true, true]);
    }

    #[test]
    fn duplicates_resolve_independently() {
        let mut set = EventSet::new(table());
        set.add(EventName::Overheat, false);
        set.add(EventName::Overheat, false);
        let alerts = resolve(&set, &[Category::NoEntry], &AlertContext::default()).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0], alerts[1]);
    }

    #[test]
    fn order_is_active_then_requested() {
        let mut set = EventSet::new(table());
        set.add(EventName::CanError, false);
        set.add(EventName::Overheat, false);
        set.reset();
        set.add(EventName::CanError, false);
        set.add(EventName::Overheat, false);
        set.reset();
        set.add(EventName::CanError, false);
        set.add(EventName::Overheat, false);
        let alerts = resolve(
            &set,
            &[Category::Permanent, Category::NoEntry],
            &AlertContext::default(),
        )
        .unwrap();
        let tags: Vec<_> = alerts.iter().map(Alert::alert_type).collect();
        assert_eq!(tags, vec!["canError/noEntry", "overheat/permanent", "overheat/noEntry"]);
    }

    #[test]
    fn nothing_requested_nothing_returned() {
        let mut set = EventSet::new(table());
        set.add(EventName::Overheat, false);
        assert!(resolve(&set, &[], &AlertContext::default()).unwrap().is_empty());
        assert!(resolve(&set, &[Category::Enable], &AlertContext::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_events_are_skipped() {
        let mut set = EventSet::new(table());
        set.add(EventName::Fcw, false);
        assert!(resolve(&set, &Category::ALL, &AlertContext::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn factory_failure_propagates_with_location() {
        let mut set = EventSet::new(table());
        set.add(EventName::CalibrationIncomplete, false);
        let err = resolve(&set, &[Category::Permanent], &AlertContext::default()).unwrap_err();
        assert!(err.is_factory());
        assert!(err.is_fatal());
        assert_eq!(
            err,
            ArbiterError::Factory(FactoryError::MissingLiveState {
                event: EventName::CalibrationIncomplete,
                category: Category::Permanent,
                field: "calibration_percent",
            })
        );

        let mut ctx = AlertContext::default();
        ctx.live.calibration_percent = Some(7);
        let alerts = resolve(&set, &[Category::Permanent], &ctx).unwrap();
        assert_eq!(alerts[0].text1(), "7%");
    }

    #[test]
    fn select_highest_prefers_priority_then_first() {
        let a = alert("a", Priority::Low, 0.0);
        let b = alert("b", Priority::High, 0.0);
        let c = alert("c", Priority::High, 0.0);
        let alerts = vec![a.clone(), b, c];
        assert_eq!(select_highest(&alerts).unwrap().text1(), "b");
        assert_eq!(select_highest(&alerts).unwrap().text1(), "b");
        assert_eq!(select_highest(&[a]).unwrap().text1(), "a");
        assert!(select_highest(&[]).is_none());
    }

    #[test]
    fn select_per_category_groups_resolved() {
        let mut set = EventSet::new(table());
        set.add(EventName::Overheat, false);
        set.add(EventName::CanError, false);
        let alerts = resolve(&set, &[Category::NoEntry], &AlertContext::default()).unwrap();
        let best = select_per_category(&alerts);
        assert_eq!(best.len(), 1);
        assert_eq!(best[&Category::NoEntry].text1(), "can");

        let unresolved = [alert("raw", Priority::Highest, 0.0)];
        assert!(select_per_category(&unresolved).is_empty());
    }
}
