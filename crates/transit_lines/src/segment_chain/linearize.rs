//! Recover the stop order of a line from its unordered segment set.
//!
//! The walk starts at the only stop that departs but is never arrived at
//! (the upstream terminus) and follows `up -> down` links until it reaches a
//! stop with no departing segment. Runs in O(n) using a map keyed by the
//! upstream stop.

use std::collections::{HashMap, HashSet};

use super::error::TopologyError;
use super::types::{Segment, StopId};

/// Ordered stops from upstream terminus to downstream terminus.
///
/// Returns `DisconnectedChain` if the segments are empty, branch, contain a
/// cycle, or fall apart into more than one piece. For `n` valid segments the
/// result always has `n + 1` stops.
pub fn ordered_stops(segments: &[Segment]) -> Result<Vec<StopId>, TopologyError> {
    let mut next_by_up: HashMap<StopId, StopId> = HashMap::with_capacity(segments.len());
    let mut downs: HashSet<StopId> = HashSet::with_capacity(segments.len());

    for segment in segments {
        // A stop departing twice (or arriving twice) is a branch.
        if next_by_up.insert(segment.up(), segment.down()).is_some()
            || !downs.insert(segment.down())
        {
            return Err(TopologyError::DisconnectedChain);
        }
    }

    let mut starts = segments
        .iter()
        .map(Segment::up)
        .filter(|up| !downs.contains(up));
    let start = match (starts.next(), starts.next()) {
        (Some(start), None) => start,
        _ => return Err(TopologyError::DisconnectedChain),
    };

    let mut stops = Vec::with_capacity(segments.len() + 1);
    stops.push(start);
    let mut current = start;
    while let Some(&next) = next_by_up.get(&current) {
        if stops.len() > segments.len() {
            return Err(TopologyError::DisconnectedChain);
        }
        stops.push(next);
        current = next;
    }

    // A detached cycle is never reached from the start.
    if stops.len() != segments.len() + 1 {
        return Err(TopologyError::DisconnectedChain);
    }

    Ok(stops)
}
