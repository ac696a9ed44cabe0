//! Unit tests for the line registry and the edit/validation systems.

use bevy::prelude::*;

use crate::config::EDIT_LOG_CAPACITY;
use crate::segment_chain::{Segment, SegmentChain, Span, StopId, TopologyError};

use super::*;

const A: StopId = StopId(1);
const B: StopId = StopId(2);
const C: StopId = StopId(3);
const D: StopId = StopId(4);

fn seg(up: StopId, down: StopId, distance: i64) -> Segment {
    Segment::new(up, down, Span::of(distance).unwrap()).unwrap()
}

fn registry_with_line() -> (TransitLines, LineId) {
    let mut lines = TransitLines::default();
    let id = lines.create_line("Green", "bg-green-600", seg(A, C, 10)).unwrap();
    (lines, id)
}

// =============================================================================
// Line aggregate
// =============================================================================

#[test]
fn test_line_requires_name_and_color() {
    assert_eq!(
        TransitLine::new(LineId(0), "  ", "red", seg(A, B, 1)).unwrap_err(),
        LineError::EmptyName
    );
    assert_eq!(
        TransitLine::new(LineId(0), "Red", "", seg(A, B, 1)).unwrap_err(),
        LineError::EmptyColor
    );
}

#[test]
fn test_line_update_keeps_topology() {
    let mut line = TransitLine::new(LineId(0), "Red", "red", seg(A, B, 4)).unwrap();
    line.update("Crimson", "dark-red").unwrap();

    assert_eq!(line.name(), "Crimson");
    assert_eq!(line.color(), "dark-red");
    assert_eq!(line.stops().unwrap(), vec![A, B]);

    assert_eq!(line.update("", "red"), Err(LineError::EmptyName));
    assert_eq!(line.name(), "Crimson");
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_create_line_assigns_sequential_ids() {
    let mut lines = TransitLines::default();
    let first = lines.create_line("Green", "green", seg(A, B, 3)).unwrap();
    let second = lines.create_line("Blue", "blue", seg(C, D, 3)).unwrap();

    assert_eq!(first, LineId(0));
    assert_eq!(second, LineId(1));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines.line_by_name("Blue").map(TransitLine::id), Some(second));
}

#[test]
fn test_create_line_rejects_duplicate_name() {
    let (mut lines, _) = registry_with_line();
    assert_eq!(
        lines.create_line("Green", "lime", seg(C, D, 1)),
        Err(LineError::DuplicateName("Green".to_string()))
    );
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_invalid_line_does_not_consume_id() {
    let mut lines = TransitLines::default();
    assert!(lines.create_line("", "red", seg(A, B, 1)).is_err());
    assert_eq!(lines.create_line("Red", "red", seg(A, B, 1)), Ok(LineId(0)));
}

#[test]
fn test_update_line() {
    let (mut lines, green) = registry_with_line();
    let blue = lines.create_line("Blue", "blue", seg(C, D, 2)).unwrap();

    lines.update_line(green, "Green", "emerald").unwrap();
    assert_eq!(lines.line(green).unwrap().color(), "emerald");

    assert_eq!(
        lines.update_line(blue, "Green", "blue"),
        Err(LineError::DuplicateName("Green".to_string()))
    );
    assert_eq!(
        lines.update_line(LineId(42), "Other", "grey"),
        Err(LineError::UnknownLine(LineId(42)))
    );
}

#[test]
fn test_registry_edits_delegate_to_chain() {
    let (mut lines, id) = registry_with_line();

    lines.insert_segment(id, seg(A, B, 4)).unwrap();
    lines.insert_segment(id, seg(C, D, 5)).unwrap();
    assert_eq!(lines.ordered_stops(id).unwrap(), vec![A, B, C, D]);

    lines.remove_stop(id, C).unwrap();
    assert_eq!(lines.ordered_stops(id).unwrap(), vec![A, B, D]);
    assert_eq!(lines.line(id).unwrap().chain().total_span(), 15);

    assert_eq!(
        lines.insert_segment(id, seg(A, D, 1)),
        Err(LineError::Topology(
            TopologyError::BothEndpointsAlreadyLinked { up: A, down: D }
        ))
    );
}

#[test]
fn test_registry_unknown_line() {
    let (mut lines, _) = registry_with_line();
    let ghost = LineId(7);

    assert_eq!(
        lines.insert_segment(ghost, seg(C, D, 1)),
        Err(LineError::UnknownLine(ghost))
    );
    assert_eq!(lines.remove_stop(ghost, A), Err(LineError::UnknownLine(ghost)));
    assert_eq!(lines.ordered_stops(ghost), Err(LineError::UnknownLine(ghost)));
}

#[test]
fn test_lines_serving_and_remove_line() {
    let (mut lines, green) = registry_with_line();
    let blue = lines.create_line("Blue", "blue", seg(C, D, 2)).unwrap();

    assert_eq!(lines.lines_serving(C), vec![green, blue]);
    assert_eq!(lines.lines_serving(A), vec![green]);
    assert!(lines.lines_serving(B).is_empty());

    assert!(lines.remove_line(green));
    assert!(!lines.remove_line(green));
    assert_eq!(lines.lines_serving(C), vec![blue]);
}

#[test]
fn test_line_error_display_and_source() {
    let err = LineError::from(TopologyError::StopNotInChain { stop: B });
    let msg = format!("{err}");
    assert!(msg.contains("stop #2"), "got: {msg}");
    assert!(std::error::Error::source(&err).is_some());

    let msg = LineError::DuplicateName("Green".to_string()).to_string();
    assert!(msg.contains("'Green'"), "got: {msg}");
    assert!(std::error::Error::source(&LineError::EmptyName).is_none());
}

// =============================================================================
// Edit log
// =============================================================================

#[test]
fn test_edit_log_evicts_oldest() {
    let mut log = LineEditLog::default();
    for i in 0..(EDIT_LOG_CAPACITY + 3) {
        log.push(
            LineEditRequest::RemoveStop {
                line: LineId(0),
                stop: StopId(i as u32),
            },
            EditOutcome::Applied,
        );
    }

    assert_eq!(log.len(), EDIT_LOG_CAPACITY);
    let (oldest, _) = &log.last_n(EDIT_LOG_CAPACITY)[0];
    assert_eq!(
        *oldest,
        LineEditRequest::RemoveStop {
            line: LineId(0),
            stop: StopId(3),
        }
    );

    log.clear();
    assert!(log.is_empty());
}

// =============================================================================
// Systems
// =============================================================================

fn lines_test_app() -> (App, LineId) {
    let mut app = App::new();
    app.add_plugins(TransitLinesPlugin);
    let id = app
        .world_mut()
        .resource_mut::<TransitLines>()
        .create_line("Green", "green", seg(A, C, 10))
        .unwrap();
    (app, id)
}

#[test]
fn test_system_applies_edits_in_order() {
    let (mut app, id) = lines_test_app();

    app.world_mut().send_event(LineEditRequest::InsertSegment {
        line: id,
        up: Some(A),
        down: Some(B),
        distance: 3,
    });
    app.world_mut().send_event(LineEditRequest::RemoveStop { line: id, stop: B });
    app.world_mut().send_event(LineEditRequest::InsertSegment {
        line: id,
        up: Some(C),
        down: Some(D),
        distance: 2,
    });
    app.update();

    let lines = app.world().resource::<TransitLines>();
    assert_eq!(lines.ordered_stops(id).unwrap(), vec![A, C, D]);
    assert_eq!(lines.line(id).unwrap().chain().total_span(), 12);

    let log = app.world().resource::<LineEditLog>();
    assert_eq!(log.len(), 3);
    assert!(log.last_n(3).iter().all(|(_, outcome)| outcome.is_applied()));
}

#[test]
fn test_system_records_rejected_edits() {
    let (mut app, id) = lines_test_app();

    app.world_mut().send_event(LineEditRequest::InsertSegment {
        line: id,
        up: None,
        down: Some(B),
        distance: 3,
    });
    app.world_mut().send_event(LineEditRequest::RemoveStop { line: id, stop: A });
    app.world_mut().send_event(LineEditRequest::RemoveStop {
        line: LineId(99),
        stop: A,
    });
    app.update();

    let log = app.world().resource::<LineEditLog>();
    let errors: Vec<Option<&LineError>> =
        log.last_n(3).iter().map(|(_, outcome)| outcome.error()).collect();
    assert_eq!(
        errors,
        vec![
            Some(&LineError::Topology(TopologyError::MissingEndpoint)),
            Some(&LineError::Topology(TopologyError::ChainTooSmall {
                segments: 1
            })),
            Some(&LineError::UnknownLine(LineId(99))),
        ]
    );

    let lines = app.world().resource::<TransitLines>();
    assert_eq!(lines.ordered_stops(id).unwrap(), vec![A, C]);
}

#[test]
fn test_validation_flags_broken_lines() {
    let (mut app, id) = lines_test_app();

    // Only healthy lines on the first pass.
    app.world_mut()
        .resource_mut::<TopologyValidationTimer>()
        .counter = TopologyValidationTimer::INTERVAL - 1;
    app.update();
    assert!(app
        .world()
        .resource::<TopologyViolations>()
        .broken_lines
        .is_empty());

    {
        let mut lines = app.world_mut().resource_mut::<TransitLines>();
        let line = lines.lines.iter_mut().find(|l| l.id == id).unwrap();
        line.chain = SegmentChain::from_segments_unchecked(vec![seg(A, B, 1), seg(C, D, 1)]);
    }
    app.world_mut()
        .resource_mut::<TopologyValidationTimer>()
        .counter = 2 * TopologyValidationTimer::INTERVAL - 1;
    app.update();

    assert_eq!(
        app.world().resource::<TopologyViolations>().broken_lines,
        vec![id]
    );
}

#[test]
fn test_validation_skips_between_intervals() {
    let (mut app, id) = lines_test_app();
    {
        let mut lines = app.world_mut().resource_mut::<TransitLines>();
        lines.lines[0].chain = SegmentChain::from_segments_unchecked(Vec::new());
    }
    // Counter 0 -> 1 after tick: not a validation tick.
    app.update();
    assert!(app
        .world()
        .resource::<TopologyViolations>()
        .broken_lines
        .is_empty());
    assert_eq!(
        app.world().resource::<TransitLines>().ordered_stops(id),
        Err(LineError::Topology(TopologyError::DisconnectedChain))
    );
}
