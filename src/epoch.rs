//! Pending warp-target epoch shaped by the operator before engaging.

use bevy::prelude::*;

use crate::orbit::Orbit;
use crate::types::{ONE_DAY, ONE_HOUR, ONE_MINUTE, ONE_YEAR};

/// Nudge step ladders per granularity, fine to coarse.
pub const EPOCH_STEPS: [[f64; 4]; 3] = [
    [0.01, 0.1, 1.0, 10.0],
    [ONE_MINUTE, 10.0 * ONE_MINUTE, ONE_HOUR, ONE_DAY],
    [10.0 * ONE_DAY, 100.0 * ONE_DAY, ONE_YEAR, 10.0 * ONE_YEAR],
];

/// Lead times selectable ahead of a maneuver node, shortest first.
pub const MANEUVER_LEAD_TIMES: [f64; 4] = [ONE_MINUTE, 10.0 * ONE_MINUTE, ONE_HOUR, ONE_DAY];

/// The warp-target epoch being shaped, with a granularity setting that
/// picks which nudge ladder the four adjustment slots map to.
#[derive(Resource, Clone, Debug, Default)]
pub struct EpochSelector {
    epoch: f64,
    granularity: usize,
}

impl EpochSelector {
    /// The pending target epoch.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Overwrite the pending target, typically from a solver result.
    pub fn set(&mut self, epoch: f64) {
        self.epoch = epoch;
    }

    /// Reset to the default offset ahead of the current time.
    pub fn reset_to_offset(&mut self, now: f64) {
        self.epoch = now + 10.0 * ONE_MINUTE;
    }

    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Switch to the next finer ladder; clamped at the finest.
    pub fn finer(&mut self) {
        self.granularity = self.granularity.saturating_sub(1);
    }

    /// Switch to the next coarser ladder; clamped at the coarsest.
    pub fn coarser(&mut self) {
        self.granularity = (self.granularity + 1).min(EPOCH_STEPS.len() - 1);
    }

    /// The four step sizes of the active ladder.
    pub fn step_sizes(&self) -> [f64; 4] {
        EPOCH_STEPS[self.granularity]
    }

    /// Move the pending target by one slot of the active ladder.
    pub fn nudge(&mut self, slot: usize, forward: bool) {
        let Some(step) = self.step_sizes().get(slot).copied() else {
            return;
        };
        if forward {
            self.epoch += step;
        } else {
            self.epoch -= step;
        }
    }

    /// Pull a past target back to the present.
    pub fn clamp_to_now(&mut self, now: f64) {
        if self.epoch < now {
            self.epoch = now;
        }
    }

    /// Shift the target by whole revolutions of a periodic orbit.
    /// A no-op for non-periodic orbits.
    pub fn plus_orbits(&mut self, orbits: i32, orbit: &Orbit) {
        if !orbit.is_periodic() {
            return;
        }
        self.epoch += f64::from(orbits) * orbit.period;
    }

    /// Aim ahead of a maneuver node by one of [`MANEUVER_LEAD_TIMES`].
    ///
    /// Only applies when the node is at least that far in the future, so
    /// the resulting target never lands in the past.
    pub fn lead_before_node(&mut self, node_epoch: f64, lead_index: usize, now: f64) {
        let Some(lead) = MANEUVER_LEAD_TIMES.get(lead_index).copied() else {
            return;
        };
        if node_epoch - now >= lead {
            self.epoch = node_epoch - lead;
        }
    }
}
