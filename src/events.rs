//! Orbital event solver: future epochs for apsides, plane crossings,
//! atmosphere boundaries, and sphere-of-influence transitions.
//!
//! All functions here are pure computations over element snapshots. None
//! retry or produce error values: applicability preconditions (same
//! reference body, periodic orbit, atmosphere present) surface as `Option`
//! where the original control disabled itself, and as documented
//! preconditions otherwise.

use std::f64::consts::{PI, TAU};

use crate::orbit::{Orbit, normalize_angle};
use crate::trajectory::Patch;
use crate::types::{BodyId, DEG_TO_RAD, RAD_TO_DEG};

/// Safety margin subtracted from a patch's end epoch when offering a
/// transition target, so a warp settles before the SOI handover instant.
pub const SOI_WARP_MARGIN: f64 = 10.0;

/// Epoch of the next apoapsis passage, if one lies ahead.
pub fn next_apoapsis(orbit: &Orbit, now: f64) -> Option<f64> {
    (orbit.time_to_apoapsis > 0.0).then(|| now + orbit.time_to_apoapsis)
}

/// Epoch of the next periapsis passage, if one lies ahead.
pub fn next_periapsis(orbit: &Orbit, now: f64) -> Option<f64> {
    (orbit.time_to_periapsis > 0.0).then(|| now + orbit.time_to_periapsis)
}

/// True anomaly of the ascending node of `orbit` relative to `target`.
///
/// Both orbits must circle the same reference body; for mismatched bodies
/// the function returns 0.0 and callers are expected to have checked body
/// identity first.
///
/// The plane normals are built from inclination and LAN, their cross
/// product gives the line of nodes, and its celestial longitude is
/// converted to a true anomaly by subtracting (ω + Ω). The half-turn
/// correction chosen by the sign of the cross product's x component is
/// empirically derived; changing the branch silently swaps AN and DN on
/// some geometries, so it is preserved exactly.
pub fn ascending_node_true_anomaly(orbit: &Orbit, target: &Orbit) -> f64 {
    let mut an_ta = 0.0;
    if orbit.body.id == target.body.id {
        let a = orbit.plane_normal();
        let b = target.plane_normal();
        let c = a.cross(b);

        // Celestial longitude of the crossover line.
        let lon = normalize_angle(c.y.atan2(c.x));

        // Angular separation of the planes, in degrees.
        let theta = a.dot(b).clamp(-1.0, 1.0).acos() * RAD_TO_DEG;

        let half_turn = if c.x < 0.0 { PI / 2.0 } else { 3.0 * PI / 2.0 };
        let raw =
            lon - (orbit.argument_of_periapsis_deg + orbit.lan_deg) * DEG_TO_RAD + half_turn;

        // Which of the two crossings did we find?
        an_ta = if theta > 0.0 { raw } else { raw + PI };
    }
    an_ta
}

/// True anomaly of the descending node: the ascending node plus half a turn.
pub fn descending_node_true_anomaly(orbit: &Orbit, target: &Orbit) -> f64 {
    ascending_node_true_anomaly(orbit, target) + PI
}

/// Epoch of the next ascending-node crossing relative to `target`.
///
/// `None` when the orbits circle different bodies or `orbit` is
/// non-periodic.
pub fn ascending_node_epoch(orbit: &Orbit, target: &Orbit, now: f64) -> Option<f64> {
    if orbit.body.id != target.body.id || !orbit.is_periodic() {
        return None;
    }
    let an_ta = ascending_node_true_anomaly(orbit, target);
    Some(orbit.epoch_at_true_anomaly(an_ta, now, now))
}

/// Epoch of the next descending-node crossing relative to `target`.
pub fn descending_node_epoch(orbit: &Orbit, target: &Orbit, now: f64) -> Option<f64> {
    if orbit.body.id != target.body.id || !orbit.is_periodic() {
        return None;
    }
    let dn_ta = descending_node_true_anomaly(orbit, target);
    Some(orbit.epoch_at_true_anomaly(dn_ta, now, now))
}

/// True anomalies at which an orbit pierces the atmosphere boundary.
#[derive(Clone, Copy, Debug)]
pub struct AtmosphereCrossing {
    /// Outbound crossing, climbing away from periapsis.
    pub exit_true_anomaly: f64,
    /// Inbound crossing, the symmetric point on the other side of periapsis.
    pub entry_true_anomaly: f64,
}

/// Atmosphere crossing anomalies, when the orbit actually pierces the
/// boundary: the body has an atmosphere, periapsis altitude lies below it,
/// and apoapsis altitude lies above it (or is the negative hyperbolic
/// marker).
pub fn atmosphere_crossing(orbit: &Orbit) -> Option<AtmosphereCrossing> {
    let depth = orbit.body.atmosphere_depth;
    if depth <= 0.0 {
        return None;
    }
    let pe_alt = orbit.periapsis_altitude();
    let ap_alt = orbit.apoapsis_altitude();
    if pe_alt < depth && (ap_alt > depth || ap_alt < 0.0) {
        let nu = orbit.true_anomaly_at_radius(orbit.body.atmosphere_radius());
        Some(AtmosphereCrossing {
            exit_true_anomaly: nu,
            entry_true_anomaly: TAU - nu,
        })
    } else {
        None
    }
}

/// Epoch of the next atmosphere exit, for periodic orbits that pierce the
/// boundary.
pub fn atmosphere_exit_epoch(orbit: &Orbit, now: f64) -> Option<f64> {
    let crossing = atmosphere_crossing(orbit)?;
    orbit
        .is_periodic()
        .then(|| orbit.epoch_at_true_anomaly(crossing.exit_true_anomaly, now, now))
}

/// Epoch of the next atmosphere entry, for periodic orbits that pierce the
/// boundary.
pub fn atmosphere_entry_epoch(orbit: &Orbit, now: f64) -> Option<f64> {
    let crossing = atmosphere_crossing(orbit)?;
    orbit
        .is_periodic()
        .then(|| orbit.epoch_at_true_anomaly(crossing.entry_true_anomaly, now, now))
}

/// One upcoming sphere-of-influence handover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoiTransition {
    /// Body whose sphere of influence is entered.
    pub body: BodyId,
    /// Warp target epoch, a safety margin before the exact handover.
    pub epoch: f64,
}

/// Walk the patch chain and offer one transition per hop.
///
/// The walk stops at the first final patch, the first inactive patch or
/// successor, or immediately for a landed vessel.
pub fn soi_transitions(patches: &[Patch], landed: bool) -> Vec<SoiTransition> {
    let mut transitions = Vec::new();
    if landed {
        return transitions;
    }
    for pair in patches.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.is_final || !current.active || !next.active {
            break;
        }
        transitions.push(SoiTransition {
            body: next.orbit.body.id,
            epoch: current.end_epoch - SOI_WARP_MARGIN,
        });
    }
    transitions
}
