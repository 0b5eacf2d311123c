//! Test utilities for the maneuver planning engine.
//!
//! Provides fixtures that build internally consistent orbital element
//! snapshots, so event-solver and editor tests do not have to derive
//! semi-axes, period, and apsis timings by hand.

use std::f64::consts::TAU;

use crate::orbit::Orbit;
use crate::types::{BodyId, ReferenceBody};

/// Fixtures for reference bodies and element snapshots.
pub mod fixtures {
    use super::*;

    /// Gravitational parameter used to derive fixture periods (m³/s²).
    pub const GM_HOME: f64 = 3.5316e12;

    /// Home body with an atmosphere (radius 600 km, atmosphere 70 km).
    pub fn home_body() -> ReferenceBody {
        ReferenceBody {
            id: BodyId(1),
            name: "Home".into(),
            radius: 600_000.0,
            atmosphere_depth: 70_000.0,
        }
    }

    /// Airless moon of the home body.
    pub fn airless_moon() -> ReferenceBody {
        ReferenceBody {
            id: BodyId(2),
            name: "Gray".into(),
            radius: 200_000.0,
            atmosphere_depth: 0.0,
        }
    }

    /// Build a consistent elliptical snapshot from periapsis radius,
    /// eccentricity, plane angles, and the fraction of a period remaining
    /// until the next periapsis passage.
    pub fn build_orbit(
        body: ReferenceBody,
        periapsis_radius: f64,
        eccentricity: f64,
        inclination_deg: f64,
        lan_deg: f64,
        argument_of_periapsis_deg: f64,
        pe_fraction: f64,
    ) -> Orbit {
        assert!((0.0..1.0).contains(&eccentricity));
        assert!(pe_fraction > 0.0 && pe_fraction <= 1.0);

        let a = periapsis_radius / (1.0 - eccentricity);
        let period = TAU * (a.powi(3) / GM_HOME).sqrt();
        let time_to_periapsis = pe_fraction * period;
        let mut time_to_apoapsis = time_to_periapsis - period / 2.0;
        if time_to_apoapsis <= 0.0 {
            time_to_apoapsis += period;
        }

        Orbit {
            body,
            inclination_deg,
            lan_deg,
            argument_of_periapsis_deg,
            eccentricity,
            semi_major_axis: a,
            semi_minor_axis: a * (1.0 - eccentricity * eccentricity).sqrt(),
            semi_latus_rectum: a * (1.0 - eccentricity * eccentricity),
            period,
            apoapsis_radius: a * (1.0 + eccentricity),
            periapsis_radius,
            time_to_apoapsis,
            time_to_periapsis,
        }
    }

    /// Equatorial elliptical orbit around the home body.
    pub fn elliptical_orbit(periapsis_radius: f64, eccentricity: f64, pe_fraction: f64) -> Orbit {
        build_orbit(
            home_body(),
            periapsis_radius,
            eccentricity,
            0.0,
            0.0,
            0.0,
            pe_fraction,
        )
    }

    /// Mildly eccentric orbit in an arbitrary plane.
    pub fn oriented_orbit(
        inclination_deg: f64,
        lan_deg: f64,
        argument_of_periapsis_deg: f64,
    ) -> Orbit {
        build_orbit(
            home_body(),
            800_000.0,
            0.1,
            inclination_deg,
            lan_deg,
            argument_of_periapsis_deg,
            0.25,
        )
    }

    /// Mildly eccentric orbit with the given plane, periapsis at the node.
    pub fn inclined_orbit(inclination_deg: f64, lan_deg: f64) -> Orbit {
        oriented_orbit(inclination_deg, lan_deg, 0.0)
    }

    /// Hyperbolic flyby snapshot: non-periodic, negative apoapsis marker.
    pub fn hyperbolic_orbit(periapsis_radius: f64, eccentricity: f64) -> Orbit {
        assert!(eccentricity > 1.0);
        let a = periapsis_radius / (1.0 - eccentricity);
        Orbit {
            body: home_body(),
            inclination_deg: 0.0,
            lan_deg: 0.0,
            argument_of_periapsis_deg: 0.0,
            eccentricity,
            semi_major_axis: a,
            semi_minor_axis: a.abs() * (eccentricity * eccentricity - 1.0).sqrt(),
            semi_latus_rectum: a * (1.0 - eccentricity * eccentricity),
            period: 0.0,
            apoapsis_radius: a * (1.0 + eccentricity),
            periapsis_radius,
            time_to_apoapsis: -1.0,
            time_to_periapsis: 500.0,
        }
    }

    /// Orbit dipping into the home body's atmosphere: periapsis below the
    /// 670 km boundary, apoapsis above it.
    pub fn atmosphere_skimming_orbit() -> Orbit {
        let rp = 650_000.0;
        let ra = 800_000.0;
        let eccentricity = (ra - rp) / (ra + rp);
        build_orbit(home_body(), rp, eccentricity, 0.0, 0.0, 0.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixture_orbit_is_consistent() {
        let orbit = fixtures::elliptical_orbit(800_000.0, 0.2, 0.3);
        assert_relative_eq!(
            orbit.periapsis_radius,
            orbit.semi_major_axis * (1.0 - orbit.eccentricity),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            orbit.apoapsis_radius,
            orbit.semi_major_axis * (1.0 + orbit.eccentricity),
            max_relative = 1e-12
        );
        assert!(orbit.is_periodic());
        assert!(orbit.time_to_apoapsis > 0.0);
        assert!(orbit.time_to_apoapsis <= orbit.period);
    }

    #[test]
    fn test_skimming_orbit_straddles_atmosphere() {
        let orbit = fixtures::atmosphere_skimming_orbit();
        let boundary = orbit.body.atmosphere_radius();
        assert!(orbit.periapsis_radius < boundary);
        assert!(orbit.apoapsis_radius > boundary);
    }

    #[test]
    fn test_hyperbolic_fixture_markers() {
        let orbit = fixtures::hyperbolic_orbit(700_000.0, 1.5);
        assert!(orbit.semi_major_axis < 0.0);
        assert!(orbit.apoapsis_radius < 0.0);
        assert!(orbit.semi_latus_rectum > 0.0);
        assert!(!orbit.is_periodic());
    }
}
