//! Warp-to scheduling over the coarse time-acceleration primitive.
//!
//! The accelerator jumps toward a requested epoch at discrete rates with
//! no exact-arrival guarantee; the [`WarpScheduler`] treats it as
//! untrusted and runs a fixed-tick watchdog that cancels the acceleration
//! once the target has been overshot past a small tolerance.

use bevy::prelude::*;

use crate::types::UniversalTime;

/// Discrete time-acceleration rate ladder; index 0 is normal time.
pub const WARP_RATES: [f64; 8] = [
    1.0, 5.0, 10.0, 50.0, 100.0, 1000.0, 10_000.0, 100_000.0,
];

/// Overshoot tolerance in seconds before the watchdog forces the rate to
/// zero.
pub const WARP_SETTLE_TOLERANCE: f64 = 1.0;

/// The coarse time-acceleration primitive.
///
/// A stand-in with the same surface the host's accelerator exposes:
/// a settable rate index and a jump-to-epoch request. The drive system
/// advances [`UniversalTime`] in steps of the selected rate and only backs
/// the ladder off near the target, so it can overshoot fine-grained
/// targets. That overshoot is what the scheduler's watchdog corrects for.
#[derive(Resource, Clone, Debug, Default)]
pub struct TimeAccelerator {
    rate_index: usize,
    target: Option<f64>,
}

impl TimeAccelerator {
    /// Set the rate ladder index. Index 0 drops out of acceleration and
    /// abandons any jump target. Safe to call repeatedly.
    pub fn set_rate(&mut self, index: usize, _instant: bool) {
        self.rate_index = index.min(WARP_RATES.len() - 1);
        if self.rate_index == 0 {
            self.target = None;
        }
    }

    /// Request a jump toward an epoch at the top ladder rate.
    pub fn warp_to(&mut self, epoch: f64) {
        self.target = Some(epoch);
        self.rate_index = WARP_RATES.len() - 1;
    }

    /// Current rate ladder index; 0 while not accelerating.
    pub fn rate_index(&self) -> usize {
        self.rate_index
    }

    /// Current acceleration factor.
    pub fn current_rate(&self) -> f64 {
        WARP_RATES[self.rate_index]
    }

    /// The in-flight jump target, if any.
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Advance the clock one drive step of `dt` real seconds.
    pub fn step(&mut self, clock: &mut UniversalTime, dt: f64) {
        let Some(target) = self.target else {
            return;
        };
        let remaining = target - clock.current;
        if remaining <= 0.0 {
            self.set_rate(0, true);
            return;
        }
        // Back off the ladder when a full step at this rate would blow far
        // past the target. One notch per tick keeps the approach coarse.
        if self.rate_index > 1 && self.current_rate() * dt > remaining * 4.0 {
            self.rate_index -= 1;
        }
        clock.current += self.current_rate() * dt;
    }
}

/// Warp-to request state: target epoch plus the watchdog that retires it.
#[derive(Resource, Clone, Debug, Default)]
pub struct WarpScheduler {
    /// Target epoch of the in-flight warp; 0.0 while idle.
    warp_end: f64,
}

impl WarpScheduler {
    /// Engage a warp toward an epoch.
    ///
    /// Cancels any existing acceleration before issuing the jump, so
    /// re-engaging while already warping simply replaces the target.
    pub fn engage(&mut self, accel: &mut TimeAccelerator, epoch: f64) {
        accel.set_rate(0, true);
        accel.warp_to(epoch);
        self.warp_end = epoch;
        info!("warp engaged toward epoch {epoch:.1}");
    }

    /// Cancel the warp and drop to normal time. Idempotent: a no-op when
    /// already idle.
    pub fn cancel(&mut self, accel: &mut TimeAccelerator) {
        accel.set_rate(0, true);
        self.warp_end = 0.0;
    }

    /// Whether no warp request is pending.
    pub fn is_idle(&self) -> bool {
        self.warp_end == 0.0
    }

    /// The pending target epoch, if a warp is in flight.
    pub fn target(&self) -> Option<f64> {
        (self.warp_end > 0.0).then_some(self.warp_end)
    }

    /// Fixed-tick watchdog.
    ///
    /// Forces the rate to zero once the clock has run past the target by
    /// more than [`WARP_SETTLE_TOLERANCE`] while the accelerator is still
    /// engaged, and retires the request when the accelerator has already
    /// dropped to normal time on its own.
    pub fn watch(&mut self, accel: &mut TimeAccelerator, now: f64) {
        // Workaround to ensure the warp actually stops when it should.
        if self.warp_end > 0.0 && now > self.warp_end + WARP_SETTLE_TOLERANCE && accel.rate_index() > 0
        {
            accel.set_rate(0, true);
            self.warp_end = 0.0;
            info!("warp overshot target; acceleration cancelled");
        }
        // If the warp stopped on its own, retire the request.
        if accel.rate_index() == 0 && self.warp_end > 0.0 {
            self.warp_end = 0.0;
        }
    }
}

/// Advance simulation time while a jump request is in flight.
fn drive_time_acceleration(
    mut accel: ResMut<TimeAccelerator>,
    mut clock: ResMut<UniversalTime>,
    time: Res<Time>,
) {
    let dt = time.delta_secs_f64();
    accel.step(&mut clock, dt);
}

/// Overshoot watchdog on the physics cadence.
fn warp_watchdog(
    mut scheduler: ResMut<WarpScheduler>,
    mut accel: ResMut<TimeAccelerator>,
    clock: Res<UniversalTime>,
) {
    scheduler.watch(&mut accel, clock.current);
}

/// Plugin providing the simulation clock, the coarse accelerator, and the
/// warp-to scheduler.
pub struct WarpPlugin;

impl Plugin for WarpPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UniversalTime>()
            .init_resource::<TimeAccelerator>()
            .init_resource::<WarpScheduler>()
            .add_systems(Update, drive_time_acceleration)
            .add_systems(FixedUpdate, warp_watchdog);
    }
}
