//! Property-based tests for orbit math using proptest.
//!
//! These cover the range guarantee of angle normalization, the
//! tightest-future-occurrence contract of anomaly-to-epoch conversion, and
//! radius/anomaly inverse consistency.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::normalize_angle;
use crate::test_utils::fixtures;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Normalization must land in [0, 2π) for any finite input, including
    /// large negative angles.
    #[test]
    fn prop_normalize_angle_in_range(theta in -1.0e6f64..1.0e6) {
        let normalized = normalize_angle(theta);
        prop_assert!(
            (0.0..TAU).contains(&normalized),
            "normalize_angle({}) = {} out of [0, 2π)",
            theta, normalized
        );
    }

    /// For periodic orbits and any `after`, the returned epoch is the
    /// tightest occurrence at or after `after`.
    #[test]
    fn prop_epoch_tightest_future_occurrence(
        pe_fraction in 0.05f64..0.95,
        nu_turns in 0.0f64..1.0,
        after_periods in -2.0f64..3.0,
        eccentricity in 0.0f64..0.8,
    ) {
        let orbit = fixtures::elliptical_orbit(800_000.0, eccentricity, pe_fraction);
        let now = 10_000.0;
        let after = now + after_periods * orbit.period;

        let epoch = orbit.epoch_at_true_anomaly(nu_turns * TAU, now, after);

        prop_assert!(
            epoch >= after,
            "epoch {} earlier than after {}", epoch, after
        );
        prop_assert!(
            epoch - orbit.period < after,
            "epoch {} not the tightest occurrence past {} (period {})",
            epoch, after, orbit.period
        );
    }

    /// Radius at an outbound-leg anomaly converts back to the same anomaly.
    #[test]
    fn prop_radius_anomaly_roundtrip(
        eccentricity in 0.05f64..0.9,
        nu in 0.05f64..3.0,
    ) {
        let orbit = fixtures::elliptical_orbit(800_000.0, eccentricity, 0.5);
        let radius = orbit.radius_at_true_anomaly(nu);
        let back = orbit.true_anomaly_at_radius(radius);
        prop_assert!(
            (back - nu).abs() < 1e-8,
            "anomaly roundtrip drifted: {} -> r={} -> {}",
            nu, radius, back
        );
    }
}
