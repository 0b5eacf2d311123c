//! Maneuver editor control logic.
//!
//! Orchestrates creation, selection, deletion, and incremental editing of
//! the live maneuver nodes. The presentation layer calls these operations
//! on its own tick; the editor never touches the trajectory except through
//! the mutator surface in [`crate::trajectory`], and every delta-v edit
//! re-applies the full vector together with the node's epoch.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::plan::{ManeuverPlan, SavedPlans};
use crate::trajectory::{Facilities, Trajectory};
use crate::types::{ONE_MINUTE, VesselId};

/// Step-size ladder for incremental delta-v edits, in m/s.
pub const STEP_SIZES: [f64; 6] = [0.01, 0.1, 1.0, 10.0, 100.0, 1000.0];

/// Ladder index selected on startup (1 m/s).
pub const DEFAULT_STEP_INDEX: usize = 2;

/// New nodes and epoch resets land this far past "now".
pub const DEFAULT_NODE_OFFSET: f64 = 10.0 * ONE_MINUTE;

/// Delta-v axis in the maneuver frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Radial,
    Normal,
    Prograde,
}

impl Axis {
    fn component_mut(self, v: &mut DVec3) -> &mut f64 {
        match self {
            Axis::Radial => &mut v.x,
            Axis::Normal => &mut v.y,
            Axis::Prograde => &mut v.z,
        }
    }
}

/// Editor state: which live node is selected, the current step size, and
/// the lifecycle flags the host drives explicitly.
#[derive(Resource, Clone, Debug)]
pub struct ManeuverEditor {
    selected: Option<usize>,
    tracked_vessel: Option<VesselId>,
    step_index: usize,
    layout_dirty: bool,
    visible: bool,
    suspended: bool,
}

impl Default for ManeuverEditor {
    fn default() -> Self {
        Self {
            selected: None,
            tracked_vessel: None,
            step_index: DEFAULT_STEP_INDEX,
            layout_dirty: false,
            visible: false,
            suspended: false,
        }
    }
}

impl ManeuverEditor {
    /// Index of the selected live node, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Re-validate the selection against the live node set.
    ///
    /// Clears the selection when no nodes remain; falls back to index 0
    /// when the vessel changed or the tracked node no longer exists.
    pub fn sync_selection(&mut self, trajectory: &Trajectory) {
        if !trajectory.has_nodes() {
            if self.selected.take().is_some() {
                self.layout_dirty = true;
            }
            return;
        }
        let vessel_changed = self.tracked_vessel != Some(trajectory.vessel);
        let stale = match self.selected {
            Some(index) => index >= trajectory.node_count(),
            None => true,
        };
        if vessel_changed || stale {
            self.selected = Some(0);
            self.tracked_vessel = Some(trajectory.vessel);
        }
    }

    /// Cycle the selection forward, wrapping past the last node.
    pub fn select_next(&mut self, trajectory: &Trajectory) {
        self.sync_selection(trajectory);
        if let Some(index) = self.selected {
            self.selected = Some((index + 1) % trajectory.node_count());
        }
    }

    /// Cycle the selection backward, wrapping past the first node.
    pub fn select_prev(&mut self, trajectory: &Trajectory) {
        self.sync_selection(trajectory);
        if let Some(index) = self.selected {
            let count = trajectory.node_count();
            self.selected = Some((index + count - 1) % count);
        }
    }

    /// Create a node at now + [`DEFAULT_NODE_OFFSET`] and select it.
    ///
    /// A no-op returning `None` when the facility gate denies node editing.
    pub fn create_node(
        &mut self,
        trajectory: &mut Trajectory,
        facilities: &Facilities,
        now: f64,
    ) -> Option<usize> {
        if !facilities.node_editing_allowed() {
            return None;
        }
        let index = trajectory.add_node(now + DEFAULT_NODE_OFFSET);
        self.selected = Some(index);
        self.tracked_vessel = Some(trajectory.vessel);
        info!("created maneuver node {} at +{}s", index, DEFAULT_NODE_OFFSET);
        Some(index)
    }

    /// Delete the selected node, if any.
    ///
    /// Removal shifts the indices of every following node, so the old
    /// index would silently point at a different node. The selection
    /// always falls back to the first remaining node instead.
    pub fn delete_selected(&mut self, trajectory: &mut Trajectory) {
        if let Some(index) = self.selected {
            trajectory.remove_node(index);
            if trajectory.has_nodes() {
                self.selected = Some(0);
            }
            info!("deleted maneuver node {index}");
        }
        self.sync_selection(trajectory);
    }

    /// Delete every live node, removing index 0 until the sequence is
    /// empty (order-independent: each removal shifts the indices).
    pub fn delete_all(&mut self, trajectory: &mut Trajectory) {
        while trajectory.has_nodes() {
            trajectory.remove_node(0);
        }
        self.sync_selection(trajectory);
    }

    /// Currently selected step size in m/s.
    pub fn step_size(&self) -> f64 {
        STEP_SIZES[self.step_index]
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Select a step size from the ladder; out-of-range indices are ignored.
    pub fn set_step_index(&mut self, index: usize) {
        if index < STEP_SIZES.len() {
            self.step_index = index;
        }
    }

    fn apply_edit(&self, trajectory: &mut Trajectory, edit: impl FnOnce(&mut DVec3)) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(node) = trajectory.node(index) else {
            return;
        };
        let (mut delta_v, epoch) = (node.delta_v, node.epoch);
        edit(&mut delta_v);
        trajectory.update_node(index, delta_v, epoch);
    }

    /// Add the current step to one axis of the selected node.
    pub fn increment(&mut self, trajectory: &mut Trajectory, axis: Axis) {
        let step = self.step_size();
        self.apply_edit(trajectory, |dv| *axis.component_mut(dv) += step);
    }

    /// Subtract the current step from one axis of the selected node.
    pub fn decrement(&mut self, trajectory: &mut Trajectory, axis: Axis) {
        let step = self.step_size();
        self.apply_edit(trajectory, |dv| *axis.component_mut(dv) -= step);
    }

    /// Zero one axis of the selected node exactly.
    pub fn zero_axis(&mut self, trajectory: &mut Trajectory, axis: Axis) {
        self.apply_edit(trajectory, |dv| *axis.component_mut(dv) = 0.0);
    }

    /// Move the selected node's epoch to now + [`DEFAULT_NODE_OFFSET`].
    pub fn reset_epoch(&mut self, trajectory: &mut Trajectory, now: f64) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(node) = trajectory.node(index) else {
            return;
        };
        let delta_v = node.delta_v;
        trajectory.update_node(index, delta_v, now + DEFAULT_NODE_OFFSET);
    }

    /// Shift the selected node's epoch by whole orbits.
    ///
    /// A no-op when the current orbit is non-periodic, and for backward
    /// shifts that would not leave the node at least that many periods in
    /// the future.
    pub fn nudge_orbits(&mut self, trajectory: &mut Trajectory, orbits: i32, now: f64) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(period) = trajectory.current_orbit().map(|orbit| orbit.period) else {
            return;
        };
        if period <= 0.0 {
            return;
        }
        let Some(node) = trajectory.node(index) else {
            return;
        };
        let shift = orbits as f64 * period;
        if orbits < 0 && node.epoch - now <= -shift {
            return;
        }
        let (delta_v, epoch) = (node.delta_v, node.epoch);
        trajectory.update_node(index, delta_v, epoch + shift);
    }

    /// Snapshot the live node set into the saved collection.
    ///
    /// Leaves the live nodes untouched. Returns false when there is
    /// nothing to store.
    pub fn store_plan(&self, trajectory: &Trajectory, saved: &mut SavedPlans) -> bool {
        if !trajectory.has_nodes() {
            return false;
        }
        saved.store(ManeuverPlan::capture(trajectory.nodes()));
        info!("stored plan of {} maneuvers", trajectory.node_count());
        true
    }

    /// Replace the live node set wholesale with a saved plan's records.
    pub fn restore_plan(&mut self, trajectory: &mut Trajectory, plan: &ManeuverPlan) {
        self.delete_all(trajectory);
        for maneuver in plan.maneuvers() {
            let index = trajectory.add_node(maneuver.epoch);
            trajectory.update_node(index, maneuver.delta_v, maneuver.epoch);
        }
        self.sync_selection(trajectory);
        info!("restored plan of {} maneuvers", plan.len());
    }

    /// Seconds until the selected node, for display.
    pub fn time_to_selected(&self, trajectory: &Trajectory, now: f64) -> Option<f64> {
        let node = trajectory.node(self.selected?)?;
        Some(node.epoch - now)
    }

    /// Delta-v magnitude of the selected node, for display.
    pub fn selected_delta_v(&self, trajectory: &Trajectory) -> Option<f64> {
        Some(trajectory.node(self.selected?)?.magnitude())
    }

    /// Whether the presentation layer must recompute its layout.
    pub fn layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Acknowledge a layout recomputation.
    pub fn clear_layout_dirty(&mut self) {
        self.layout_dirty = false;
    }

    // Lifecycle transitions, driven explicitly by the host.

    pub fn become_visible(&mut self) {
        self.visible = true;
        self.layout_dirty = true;
    }

    pub fn become_hidden(&mut self) {
        self.visible = false;
        self.layout_dirty = true;
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible and not suspended: the presentation layer should draw and
    /// accept edits.
    pub fn is_active(&self) -> bool {
        self.visible && !self.suspended
    }
}

/// Re-validate the selection once per presentation tick.
fn sync_editor_selection(mut editor: ResMut<ManeuverEditor>, trajectory: Res<Trajectory>) {
    editor.sync_selection(&trajectory);
}

/// Plugin providing the maneuver editor and its backing resources.
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ManeuverEditor>()
            .init_resource::<Trajectory>()
            .init_resource::<Facilities>()
            .init_resource::<SavedPlans>()
            .add_systems(Update, sync_editor_selection);
    }
}
