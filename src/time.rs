//! Control-cycle time.
//!
//! The control loop ticks at a fixed period. Every duration inside the
//! engine is expressed in cycles of that period; this module is the single
//! place that converts seconds to cycles.

/// Control loop period in seconds.
pub const DT_CTRL: f64 = 0.01;

/// Tolerance for treating a seconds/period ratio as a whole number.
///
/// `0.07 / 0.01` evaluates to `7.000000000000001`; without this, a delay
/// that is an exact multiple of the period would need one extra cycle.
const CYCLE_EPSILON: f64 = 1e-9;

/// Converts a display duration to whole cycles, rounding to nearest.
///
/// Negative and non-finite durations convert to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn duration_cycles(secs: f64) -> u32 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs / DT_CTRL).round() as u32
}

/// Number of consecutive active cycles needed to cover `secs`.
///
/// This is `ceil(secs / DT_CTRL)`, i.e. the smallest `n` with
/// `n * DT_CTRL >= secs`. Ratios within [`CYCLE_EPSILON`] of an integer are
/// snapped to it. The tolerance only absorbs floating-point error in the
/// division (`0.07 / 0.01 == 7.000000000000001`); it is not a grace period,
/// and delays are expected to be whole multiples of [`DT_CTRL`] or clearly
/// apart from one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn required_cycles(secs: f64) -> u32 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    let ratio = secs / DT_CTRL;
    let nearest = ratio.round();
    if (ratio - nearest).abs() < CYCLE_EPSILON {
        nearest as u32
    } else {
        ratio.ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rounds_to_nearest_cycle() {
        assert_eq!(duration_cycles(3.0), 300);
        assert_eq!(duration_cycles(0.2), 20);
        assert_eq!(duration_cycles(0.1), 10);
        assert_eq!(duration_cycles(0.004), 0);
        assert_eq!(duration_cycles(0.006), 1);
    }

    #[test]
    fn duration_clamps_bad_input() {
        assert_eq!(duration_cycles(-1.0), 0);
        assert_eq!(duration_cycles(f64::NAN), 0);
    }

    #[test]
    fn required_cycles_is_ceiling() {
        assert_eq!(required_cycles(0.0), 0);
        assert_eq!(required_cycles(0.001), 1);
        assert_eq!(required_cycles(0.015), 2);
        assert_eq!(required_cycles(0.5), 50);
        assert_eq!(required_cycles(300.0), 30_000);
    }

    #[test]
    fn required_cycles_snaps_exact_multiples() {
        assert_eq!(required_cycles(0.03), 3);
        assert_eq!(required_cycles(0.07), 7);
        assert_eq!(required_cycles(1.0), 100);
    }

    #[test]
    fn required_cycles_rounds_up_real_fractions() {
        assert_eq!(required_cycles(0.0301), 4);
        assert_eq!(required_cycles(0.0299), 3);
    }
}
