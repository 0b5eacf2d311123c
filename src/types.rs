//! Shared types and constants for the maneuver planning engine.

use bevy::prelude::*;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// One minute in epoch seconds
pub const ONE_MINUTE: f64 = 60.0;

/// One hour in epoch seconds
pub const ONE_HOUR: f64 = 60.0 * 60.0;

/// One day in epoch seconds
pub const ONE_DAY: f64 = 24.0 * ONE_HOUR;

/// One Julian year in epoch seconds
pub const ONE_YEAR: f64 = 365.25 * ONE_DAY;

/// Current absolute simulation epoch, in seconds.
///
/// Owned by the host: advanced by the time-acceleration drive (see
/// [`crate::warp`]) or by whatever clock the host runs. Everything else in
/// the engine only reads it.
#[derive(Resource, Clone, Debug, Default)]
pub struct UniversalTime {
    /// Seconds since the simulation epoch origin.
    pub current: f64,
}

impl UniversalTime {
    /// Create a clock starting at a specific epoch.
    pub fn at(epoch: f64) -> Self {
        Self { current: epoch }
    }
}

/// Opaque identity of a vessel, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VesselId(pub u64);

/// Opaque identity of a celestial body, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Reference body parameters relevant to event solving.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceBody {
    pub id: BodyId,
    pub name: String,
    /// Surface radius in meters.
    pub radius: f64,
    /// Atmosphere depth above the surface in meters, 0 for airless bodies.
    pub atmosphere_depth: f64,
}

impl ReferenceBody {
    /// Radius of the atmosphere boundary from the body center.
    pub fn atmosphere_radius(&self) -> f64 {
        self.radius + self.atmosphere_depth
    }

    /// Whether the body has an atmosphere at all.
    pub fn has_atmosphere(&self) -> bool {
        self.atmosphere_depth > 0.0
    }
}

/// Format a value for display with metric prefixes, falling back to
/// scientific notation outside the comfortable range.
pub fn format_metric(value: f64) -> String {
    if value > 1e12 || (value < 1e-2 && value > 0.0) {
        format!("{value:.6e} ")
    } else if value > 1e7 {
        format!("{:.2} M", value / 1e6)
    } else if value > 1e4 {
        format!("{:.2} k", value / 1e3)
    } else {
        format!("{value:.2} ")
    }
}

/// Format a signed duration in seconds as a y/d/h/m/s breakdown.
pub fn format_duration(seconds: f64) -> String {
    let mut result = String::new();
    let mut value = seconds;
    if value < 0.0 {
        result.push('-');
        value = value.abs();
    }
    if value > ONE_YEAR {
        let years = (value / ONE_YEAR) as i64;
        value -= years as f64 * ONE_YEAR;
        result.push_str(&format!("{years} y, "));
    }
    if value > ONE_DAY {
        let days = (value / ONE_DAY) as i64;
        value -= days as f64 * ONE_DAY;
        result.push_str(&format!("{days} d, "));
    }
    if value > ONE_HOUR {
        let hours = (value / ONE_HOUR) as i64;
        value -= hours as f64 * ONE_HOUR;
        result.push_str(&format!("{hours} h, "));
    }
    if value > ONE_MINUTE {
        let mins = (value / ONE_MINUTE) as i64;
        value -= mins as f64 * ONE_MINUTE;
        result.push_str(&format!("{mins} m, "));
    }
    result.push_str(&format!("{value:.2} s"));
    result
}
