//! Common fixtures for integration tests.

use std::f64::consts::TAU;

use flightplan::orbit::Orbit;
use flightplan::trajectory::{Patch, Trajectory};
use flightplan::types::{BodyId, ReferenceBody, VesselId};

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
#[allow(dead_code)]
pub fn airless_moon() -> ReferenceBody {
    ReferenceBody {
        id: BodyId(2),
        name: "Gray".into(),
        radius: 200_000.0,
        atmosphere_depth: 0.0,
    }
}

/// Consistent equatorial elliptical snapshot around the home body.
pub fn elliptical_orbit(periapsis_radius: f64, eccentricity: f64, pe_fraction: f64) -> Orbit {
    let a = periapsis_radius / (1.0 - eccentricity);
    let period = TAU * (a.powi(3) / GM_HOME).sqrt();
    let time_to_periapsis = pe_fraction * period;
    let mut time_to_apoapsis = time_to_periapsis - period / 2.0;
    if time_to_apoapsis <= 0.0 {
        time_to_apoapsis += period;
    }

    Orbit {
        body: home_body(),
        inclination_deg: 0.0,
        lan_deg: 0.0,
        argument_of_periapsis_deg: 0.0,
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

/// Trajectory for one vessel flying a single non-final patch of the
/// given orbit.
pub fn single_patch_trajectory(orbit: Orbit) -> Trajectory {
    Trajectory::new(
        VesselId(1),
        vec![Patch {
            orbit,
            end_epoch: f64::MAX,
            active: true,
            is_final: true,
        }],
    )
}
