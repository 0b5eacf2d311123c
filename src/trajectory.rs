//! Live trajectory state shared with the host's patched-conic solver.
//!
//! The host owns this data: it materializes maneuver nodes into actual
//! trajectory segments and refreshes the patch chain every time it
//! re-converges. The engine only reads snapshots and issues the mutation
//! requests defined here, on the same single logical thread as the host's
//! tick, so there is no internal locking.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::orbit::Orbit;
use crate::types::VesselId;

/// A live maneuver node: a delta-v vector (x radial, y normal, z prograde)
/// applied at an absolute epoch.
#[derive(Clone, Debug, Default)]
pub struct ManeuverNode {
    pub delta_v: DVec3,
    pub epoch: f64,
}

impl ManeuverNode {
    /// Magnitude of the node's velocity change.
    pub fn magnitude(&self) -> f64 {
        self.delta_v.length()
    }
}

/// One patched-conic segment of the predicted trajectory.
#[derive(Clone, Debug)]
pub struct Patch {
    pub orbit: Orbit,
    /// Epoch at which this patch hands over to its successor.
    pub end_epoch: f64,
    /// Whether the host considers the patch part of the active prediction.
    pub active: bool,
    /// Terminal patch: no successor follows.
    pub is_final: bool,
}

/// The active vessel's trajectory: consecutive conic patches plus the
/// ordered live maneuver nodes.
#[derive(Resource, Clone, Debug)]
pub struct Trajectory {
    pub vessel: VesselId,
    pub landed: bool,
    patches: Vec<Patch>,
    nodes: Vec<ManeuverNode>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            vessel: VesselId(0),
            landed: false,
            patches: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl Trajectory {
    /// Create a trajectory for a vessel from its current patch chain.
    pub fn new(vessel: VesselId, patches: Vec<Patch>) -> Self {
        Self {
            vessel,
            landed: false,
            patches,
            nodes: Vec::new(),
        }
    }

    /// The orbit of the currently flown patch, if any.
    pub fn current_orbit(&self) -> Option<&Orbit> {
        self.patches.first().map(|patch| &patch.orbit)
    }

    /// The full patch chain in flight order.
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Replace the patch chain after the host re-converges the prediction.
    pub fn set_patches(&mut self, patches: Vec<Patch>) {
        self.patches = patches;
    }

    /// Insert a new zero-burn node at the given epoch, returning its index.
    pub fn add_node(&mut self, epoch: f64) -> usize {
        self.nodes.push(ManeuverNode {
            delta_v: DVec3::ZERO,
            epoch,
        });
        self.nodes.len() - 1
    }

    /// Re-apply a node's full delta-v vector and epoch in one step.
    ///
    /// Partial-axis updates are never applied independently; callers always
    /// pass the complete vector together with the epoch. Out-of-range
    /// indices are a no-op.
    pub fn update_node(&mut self, index: usize, delta_v: DVec3, epoch: f64) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.delta_v = delta_v;
            node.epoch = epoch;
        }
    }

    /// Remove one node; a no-op for out-of-range indices.
    pub fn remove_node(&mut self, index: usize) {
        if index < self.nodes.len() {
            self.nodes.remove(index);
        }
    }

    /// The live nodes in order.
    pub fn nodes(&self) -> &[ManeuverNode] {
        &self.nodes
    }

    /// One node by index.
    pub fn node(&self, index: usize) -> Option<&ManeuverNode> {
        self.nodes.get(index)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// Space-center facility levels gating maneuver-node creation.
///
/// Node editing requires both the tracking station and mission control to
/// be built out at all.
#[derive(Resource, Clone, Debug)]
pub struct Facilities {
    pub tracking_station_level: u32,
    pub mission_control_level: u32,
}

impl Default for Facilities {
    fn default() -> Self {
        Self {
            tracking_station_level: 1,
            mission_control_level: 1,
        }
    }
}

impl Facilities {
    /// Whether creating maneuver nodes is currently permitted.
    pub fn node_editing_allowed(&self) -> bool {
        self.tracking_station_level > 0 && self.mission_control_level > 0
    }
}
