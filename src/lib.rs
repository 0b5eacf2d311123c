//! Flightplan - Maneuver & Warp Planning Engine
//!
//! A library crate for planning maneuvers over host-supplied patched-conic
//! trajectories: an orbital event solver, a maneuver plan model with
//! save/restore, and a warp-to scheduler with an overshoot watchdog.

use bevy::prelude::*;

pub mod editor;
pub mod epoch;
pub mod events;
pub mod orbit;
pub mod plan;
pub mod trajectory;
pub mod types;
pub mod warp;

#[cfg(test)]
pub mod test_utils;

/// Umbrella plugin wiring the whole planning engine into an app.
pub struct FlightPlanPlugin;

impl Plugin for FlightPlanPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((editor::EditorPlugin, warp::WarpPlugin))
            .init_resource::<epoch::EpochSelector>();
    }
}
