//! Orbital element snapshots and anomaly/epoch math.
//!
//! The [`Orbit`] type is a read-only snapshot supplied by the host's
//! trajectory solver. Angles arrive in degrees (the host's convention) and
//! are converted to radians before any trigonometric use.

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::types::{DEG_TO_RAD, ReferenceBody};

#[cfg(test)]
mod proptest_orbit;

/// Osculating orbital elements around a single reference body.
///
/// `period <= 0.0` marks a non-periodic (hyperbolic/parabolic) trajectory:
/// orbit-relative epoch arithmetic is undefined there and every caller is
/// expected to guard with [`Orbit::is_periodic`] first.
#[derive(Clone, Debug)]
pub struct Orbit {
    pub body: ReferenceBody,
    /// Inclination in degrees.
    pub inclination_deg: f64,
    /// Longitude of the ascending node in degrees.
    pub lan_deg: f64,
    /// Argument of periapsis in degrees.
    pub argument_of_periapsis_deg: f64,
    /// Eccentricity (dimensionless).
    pub eccentricity: f64,
    /// Semi-major axis in meters (negative for hyperbolic orbits).
    pub semi_major_axis: f64,
    /// Semi-minor axis in meters.
    pub semi_minor_axis: f64,
    /// Semi-latus rectum in meters.
    pub semi_latus_rectum: f64,
    /// Orbital period in seconds, `<= 0` when non-periodic.
    pub period: f64,
    /// Apoapsis radius from the body center in meters, negative for
    /// hyperbolic orbits (the host's "no apoapsis" marker).
    pub apoapsis_radius: f64,
    /// Periapsis radius from the body center in meters.
    pub periapsis_radius: f64,
    /// Seconds until the next apoapsis passage, `<= 0` when not ahead.
    pub time_to_apoapsis: f64,
    /// Seconds until the next periapsis passage.
    pub time_to_periapsis: f64,
}

impl Orbit {
    /// Whether orbit-relative epoch arithmetic ("+1 orbit") is defined.
    pub fn is_periodic(&self) -> bool {
        self.period > 0.0
    }

    /// Inclination in radians.
    pub fn inclination(&self) -> f64 {
        self.inclination_deg * DEG_TO_RAD
    }

    /// Longitude of the ascending node in radians.
    pub fn lan(&self) -> f64 {
        self.lan_deg * DEG_TO_RAD
    }

    /// Argument of periapsis in radians.
    pub fn argument_of_periapsis(&self) -> f64 {
        self.argument_of_periapsis_deg * DEG_TO_RAD
    }

    /// Apoapsis altitude above the body surface; negative marker values
    /// stay negative (hyperbolic orbits).
    pub fn apoapsis_altitude(&self) -> f64 {
        if self.apoapsis_radius < 0.0 {
            self.apoapsis_radius
        } else {
            self.apoapsis_radius - self.body.radius
        }
    }

    /// Periapsis altitude above the body surface.
    pub fn periapsis_altitude(&self) -> f64 {
        self.periapsis_radius - self.body.radius
    }

    /// Unit normal of the orbital plane: (sin i cos Ω, sin i sin Ω, cos i).
    pub fn plane_normal(&self) -> DVec3 {
        let i = self.inclination();
        let lan = self.lan();
        DVec3::new(i.sin() * lan.cos(), i.sin() * lan.sin(), i.cos())
    }

    /// Orbital radius at the given true anomaly: r = p / (1 + e cos ν).
    pub fn radius_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        self.semi_latus_rectum / (1.0 + self.eccentricity * true_anomaly.cos())
    }

    /// True anomaly at which the orbit crosses the given radius.
    ///
    /// Returns the crossing in [0, π] (outbound leg); the symmetric inbound
    /// crossing is 2π minus the result. Meaningless when the radius is not
    /// between periapsis and apoapsis.
    pub fn true_anomaly_at_radius(&self, radius: f64) -> f64 {
        let cos_nu = (self.semi_latus_rectum / radius - 1.0) / self.eccentricity;
        cos_nu.clamp(-1.0, 1.0).acos()
    }

    /// Eccentric anomaly from true anomaly.
    ///
    /// E = 2 atan2(√(1−e) sin(ν/2), √(1+e) cos(ν/2)), the inverse of the
    /// usual tangent half-angle expansion.
    pub fn eccentric_from_true(&self, true_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let half = true_anomaly / 2.0;
        let y = (1.0 - e).sqrt() * half.sin();
        let x = (1.0 + e).sqrt() * half.cos();
        2.0 * y.atan2(x)
    }

    /// Mean anomaly from true anomaly, normalized to [0, 2π).
    pub fn mean_from_true(&self, true_anomaly: f64) -> f64 {
        let e_anomaly = self.eccentric_from_true(true_anomaly);
        normalize_angle(e_anomaly - self.eccentricity * e_anomaly.sin())
    }

    /// Absolute epoch of the next occurrence of the given true anomaly at
    /// or after `after`.
    ///
    /// The periapsis passage is anchored on `time_to_periapsis` relative to
    /// `now`, converted through the mean anomaly, then advanced by whole
    /// periods so the result `e` satisfies `e >= after` and
    /// `e - period < after` (tightest future occurrence).
    ///
    /// Precondition: the orbit is periodic. Callers must check
    /// [`Orbit::is_periodic`]; there is no meaningful answer otherwise.
    pub fn epoch_at_true_anomaly(&self, true_anomaly: f64, now: f64, after: f64) -> f64 {
        debug_assert!(self.is_periodic(), "epoch arithmetic on non-periodic orbit");
        let mean_motion = TAU / self.period;
        let previous_periapsis = now + self.time_to_periapsis - self.period;
        let raw = previous_periapsis + self.mean_from_true(true_anomaly) / mean_motion;
        after + (raw - after).rem_euclid(self.period)
    }
}

/// Normalize an angle into [0, 2π).
pub fn normalize_angle(theta: f64) -> f64 {
    theta.rem_euclid(TAU)
}
