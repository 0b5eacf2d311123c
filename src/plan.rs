//! Saved maneuver plans: frozen snapshots of the live node set.
//!
//! A [`ManeuverPlan`] is a value type captured from the live sequence and
//! used only for later wholesale restoration; it never tracks the live
//! nodes it was copied from. The [`SavedPlans`] collection is engine-owned
//! and only ever changes in response to explicit operator actions.

use bevy::math::DVec3;
use bevy::prelude::*;
use thiserror::Error;

use crate::trajectory::ManeuverNode;

/// One frozen maneuver record: delta-v (x radial, y normal, z prograde)
/// at an absolute epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoredManeuver {
    pub delta_v: DVec3,
    pub epoch: f64,
}

/// An ordered snapshot of all live maneuver nodes at the time of saving.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManeuverPlan {
    maneuvers: Vec<StoredManeuver>,
}

impl ManeuverPlan {
    /// Build a plan from explicit records.
    pub fn new(maneuvers: Vec<StoredManeuver>) -> Self {
        Self { maneuvers }
    }

    /// Snapshot the live node set in order.
    pub fn capture(nodes: &[ManeuverNode]) -> Self {
        Self {
            maneuvers: nodes
                .iter()
                .map(|node| StoredManeuver {
                    delta_v: node.delta_v,
                    epoch: node.epoch,
                })
                .collect(),
        }
    }

    /// The records in original node order.
    pub fn maneuvers(&self) -> &[StoredManeuver] {
        &self.maneuvers
    }

    pub fn len(&self) -> usize {
        self.maneuvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maneuvers.is_empty()
    }

    /// Aggregate delta-v: the sum of per-record magnitudes.
    pub fn total_delta_v(&self) -> f64 {
        self.maneuvers.iter().map(|m| m.delta_v.length()).sum()
    }

    /// Epoch of the plan's first maneuver, used for display ordering.
    pub fn first_epoch(&self) -> Option<f64> {
        self.maneuvers.first().map(|m| m.epoch)
    }
}

/// Insertion-ordered collection of saved plans, keyed only by position.
#[derive(Resource, Clone, Debug, Default)]
pub struct SavedPlans {
    plans: Vec<ManeuverPlan>,
}

impl SavedPlans {
    /// Append a plan. Plans are only ever added by an explicit store action.
    pub fn store(&mut self, plan: ManeuverPlan) {
        self.plans.push(plan);
    }

    /// Delete one plan by index; a no-op out of range.
    pub fn remove(&mut self, index: usize) {
        if index < self.plans.len() {
            self.plans.remove(index);
        }
    }

    /// Delete every saved plan.
    pub fn clear(&mut self) {
        self.plans.clear();
    }

    pub fn plans(&self) -> &[ManeuverPlan] {
        &self.plans
    }

    pub fn get(&self, index: usize) -> Option<&ManeuverPlan> {
        self.plans.get(index)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Failure to decode persisted plan text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanCodecError {
    #[error("malformed maneuver record `{0}`: expected 4 comma-separated fields")]
    MalformedRecord(String),
    #[error("invalid number `{0}` in maneuver record")]
    InvalidNumber(String),
}

/// Marker line for a plan with no maneuvers, so empty plans keep their
/// slot across a persistence round trip.
const EMPTY_PLAN_MARKER: &str = "-";

/// Encode plans for host persistence: one plan per line, records separated
/// by `;`, fields `radial,normal,prograde,epoch`. An empty plan encodes to
/// the [`EMPTY_PLAN_MARKER`] line.
pub fn encode_plans(plans: &[ManeuverPlan]) -> String {
    plans
        .iter()
        .map(|plan| {
            if plan.is_empty() {
                return EMPTY_PLAN_MARKER.to_string();
            }
            plan.maneuvers()
                .iter()
                .map(|m| {
                    format!("{:e},{:e},{:e},{:e}", m.delta_v.x, m.delta_v.y, m.delta_v.z, m.epoch)
                })
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode plans persisted by [`encode_plans`]. Blank lines are skipped.
pub fn decode_plans(text: &str) -> Result<Vec<ManeuverPlan>, PlanCodecError> {
    let mut plans = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == EMPTY_PLAN_MARKER {
            plans.push(ManeuverPlan::default());
            continue;
        }
        let mut maneuvers = Vec::new();
        for record in line.split(';') {
            let fields: Vec<&str> = record.split(',').collect();
            if fields.len() != 4 {
                return Err(PlanCodecError::MalformedRecord(record.to_string()));
            }
            let mut values = [0.0; 4];
            for (value, field) in values.iter_mut().zip(&fields) {
                *value = field
                    .parse::<f64>()
                    .map_err(|_| PlanCodecError::InvalidNumber(field.to_string()))?;
            }
            maneuvers.push(StoredManeuver {
                delta_v: DVec3::new(values[0], values[1], values[2]),
                epoch: values[3],
            });
        }
        plans.push(ManeuverPlan::new(maneuvers));
    }
    Ok(plans)
}
