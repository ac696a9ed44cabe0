// ---------------------------------------------------------------------------
// TopologyError: validation failures for spans, segments, and chains
// ---------------------------------------------------------------------------

use std::fmt;

use super::types::{Span, StopId};

/// Why a topology value or edit was rejected.
///
/// Every variant is a recoverable validation failure. When a chain operation
/// returns one of these the chain is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// A span distance was zero, negative, or out of range.
    InvalidDistance { distance: i64 },
    /// A segment was built without one of its stops.
    MissingEndpoint,
    /// A segment was built with the same stop at both ends.
    SameEndpoints { stop: StopId },
    /// Both stops of the new segment are already on the line; adding it
    /// would create a shortcut or a cycle.
    BothEndpointsAlreadyLinked { up: StopId, down: StopId },
    /// Neither stop of the new segment is on the line; adding it would
    /// leave a gap.
    NeitherEndpointLinked { up: StopId, down: StopId },
    /// The new segment is not strictly shorter than the segment it splits.
    SpanTooLarge { requested: Span, available: Span },
    /// The line is already at its minimum number of segments.
    ChainTooSmall { segments: usize },
    /// The stop to remove is not served by the line.
    StopNotInChain { stop: StopId },
    /// The segments do not form a single simple path.
    DisconnectedChain,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::InvalidDistance { distance } => {
                write!(f, "Invalid distance {distance}: must be a positive integer")
            }
            TopologyError::MissingEndpoint => {
                write!(f, "Segment is missing an up or down stop")
            }
            TopologyError::SameEndpoints { stop } => {
                write!(f, "Segment starts and ends at the same {stop}")
            }
            TopologyError::BothEndpointsAlreadyLinked { up, down } => write!(
                f,
                "Both {up} and {down} are already on the line"
            ),
            TopologyError::NeitherEndpointLinked { up, down } => write!(
                f,
                "Neither {up} nor {down} is on the line"
            ),
            TopologyError::SpanTooLarge {
                requested,
                available,
            } => write!(
                f,
                "Span {requested} does not fit inside the existing span {available}"
            ),
            TopologyError::ChainTooSmall { segments } => write!(
                f,
                "Line has only {segments} segment(s) and cannot lose another"
            ),
            TopologyError::StopNotInChain { stop } => {
                write!(f, "{stop} is not on the line")
            }
            TopologyError::DisconnectedChain => {
                write!(f, "Segments do not form a single connected path")
            }
        }
    }
}

impl std::error::Error for TopologyError {}
