//! ECS systems and plugin for line topology editing.

use bevy::prelude::*;

use crate::config::{EDIT_LOG_CAPACITY, VALIDATION_INTERVAL_TICKS};
use crate::segment_chain::Segment;

use super::state::TransitLines;
use super::types::*;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Ring buffer of the last [`EDIT_LOG_CAPACITY`] edits and their outcomes,
/// so callers can see why an edit was refused without polling the registry.
#[derive(Resource, Debug, Clone, Default)]
pub struct LineEditLog {
    entries: Vec<(LineEditRequest, EditOutcome)>,
}

impl LineEditLog {
    /// Record an edit. If the buffer is full the oldest entry is evicted.
    pub fn push(&mut self, request: LineEditRequest, outcome: EditOutcome) {
        if self.entries.len() >= EDIT_LOG_CAPACITY {
            self.entries.remove(0);
        }
        self.entries.push((request, outcome));
    }

    /// Return the last `n` entries (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> &[(LineEditRequest, EditOutcome)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lines that failed to linearize during the last validation pass.
/// Integration tests assert this stays empty.
#[derive(Resource, Debug, Clone, Default)]
pub struct TopologyViolations {
    pub broken_lines: Vec<LineId>,
}

/// Throttle for `validate_line_topology`.
#[derive(Resource, Default)]
pub struct TopologyValidationTimer {
    pub counter: u32,
}

impl TopologyValidationTimer {
    pub const INTERVAL: u32 = VALIDATION_INTERVAL_TICKS;

    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter % Self::INTERVAL == 0
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Applies every queued [`LineEditRequest`] in arrival order.
pub fn apply_line_edits(
    mut requests: EventReader<LineEditRequest>,
    mut lines: ResMut<TransitLines>,
    mut log: ResMut<LineEditLog>,
) {
    for request in requests.read() {
        let outcome = EditOutcome::from(apply_single(request, &mut lines));
        if let EditOutcome::Rejected(e) = &outcome {
            warn!("Rejected edit on {}: {}", request.line(), e);
        }
        log.push(request.clone(), outcome);
    }
}

fn apply_single(request: &LineEditRequest, lines: &mut TransitLines) -> Result<(), LineError> {
    match *request {
        LineEditRequest::InsertSegment {
            line,
            up,
            down,
            distance,
        } => {
            let segment = Segment::from_parts(up, down, distance)?;
            lines.insert_segment(line, segment)
        }
        LineEditRequest::RemoveStop { line, stop } => lines.remove_stop(line, stop),
    }
}

pub fn tick_validation_timer(mut timer: ResMut<TopologyValidationTimer>) {
    timer.tick();
}

/// Re-linearizes every line on the validation interval and records lines
/// whose segments no longer form a single path.
pub fn validate_line_topology(
    timer: Res<TopologyValidationTimer>,
    lines: Res<TransitLines>,
    mut violations: ResMut<TopologyViolations>,
) {
    if !timer.should_run() {
        return;
    }

    violations.broken_lines.clear();
    for line in lines.iter() {
        if let Err(e) = line.stops() {
            warn!(
                "Invariant violation: {} '{}' with {} segments: {}",
                line.id(),
                line.name(),
                line.chain().len(),
                e
            );
            violations.broken_lines.push(line.id());
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Registers the line registry, edit event, edit log, and validation systems.
pub struct TransitLinesPlugin;

impl Plugin for TransitLinesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransitLines>()
            .init_resource::<LineEditLog>()
            .init_resource::<TopologyViolations>()
            .init_resource::<TopologyValidationTimer>()
            .add_event::<LineEditRequest>()
            .add_systems(
                Update,
                (
                    apply_line_edits,
                    tick_validation_timer,
                    validate_line_topology,
                )
                    .chain(),
            );
    }
}
