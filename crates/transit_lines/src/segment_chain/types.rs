//! Value types for line topology: stop identities, spans, and segments.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::TopologyError;

// =============================================================================
// Stop
// =============================================================================

/// Opaque identity of a stop served by a line.
///
/// Stops are owned by whoever manages stations; a chain only copies their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopId(pub u32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop #{}", self.0)
    }
}

// =============================================================================
// Span
// =============================================================================

/// Strictly positive distance between two adjacent stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Span(u32);

impl Span {
    /// Validate a raw distance. Zero, negative, and out-of-range values are
    /// rejected with `InvalidDistance`.
    pub fn of(distance: i64) -> Result<Self, TopologyError> {
        match u32::try_from(distance) {
            Ok(d) if d > 0 => Ok(Self(d)),
            _ => Err(TopologyError::InvalidDistance { distance }),
        }
    }

    pub fn distance(self) -> u32 {
        self.0
    }

    /// `self - other`. Fails with `InvalidDistance` unless the result stays positive.
    pub fn minus(self, other: Span) -> Result<Span, TopologyError> {
        Span::of(i64::from(self.0) - i64::from(other.0))
    }

    /// `self + other`, used when two segments are merged over a removed stop.
    pub fn plus(self, other: Span) -> Result<Span, TopologyError> {
        Span::of(i64::from(self.0) + i64::from(other.0))
    }

    pub fn is_less_than_or_equal(self, other: Span) -> bool {
        self <= other
    }
}

impl TryFrom<i64> for Span {
    type Error = TopologyError;

    fn try_from(distance: i64) -> Result<Self, Self::Error> {
        Span::of(distance)
    }
}

impl From<Span> for i64 {
    fn from(span: Span) -> Self {
        i64::from(span.0)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Segment
// =============================================================================

/// Wire shape of a segment. Endpoints are optional so that a missing stop is
/// reported as `MissingEndpoint` instead of a generic parse failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawSegment {
    up: Option<StopId>,
    down: Option<StopId>,
    distance: i64,
}

/// Directed edge from an upstream stop to a downstream stop.
///
/// Segments are values: shrinking or merging returns a new segment and
/// leaves the original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSegment", into = "RawSegment")]
pub struct Segment {
    up: StopId,
    down: StopId,
    span: Span,
}

impl Segment {
    /// Build a segment between two distinct stops.
    pub fn new(up: StopId, down: StopId, span: Span) -> Result<Self, TopologyError> {
        if up == down {
            return Err(TopologyError::SameEndpoints { stop: up });
        }
        Ok(Self { up, down, span })
    }

    /// Build a segment from unvalidated collaborator input.
    pub fn from_parts(
        up: Option<StopId>,
        down: Option<StopId>,
        distance: i64,
    ) -> Result<Self, TopologyError> {
        let (Some(up), Some(down)) = (up, down) else {
            return Err(TopologyError::MissingEndpoint);
        };
        Self::new(up, down, Span::of(distance)?)
    }

    /// Join `upstream` (a -> b) and `downstream` (b -> c) into a -> c,
    /// summing their spans.
    pub fn merge(upstream: Segment, downstream: Segment) -> Result<Self, TopologyError> {
        if upstream.down != downstream.up {
            return Err(TopologyError::DisconnectedChain);
        }
        Self::new(
            upstream.up,
            downstream.down,
            upstream.span.plus(downstream.span)?,
        )
    }

    pub fn up(&self) -> StopId {
        self.up
    }

    pub fn down(&self) -> StopId {
        self.down
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn matches_either_endpoint(&self, stop: StopId) -> bool {
        self.up == stop || self.down == stop
    }

    /// A new segment `(self.up, new_up)` was inserted at the head of this
    /// one; keep the downstream remainder `(new_up, self.down)`.
    pub fn shrink_from_up(&self, new_up: StopId, consumed: Span) -> Result<Self, TopologyError> {
        let span = self.remaining_after(consumed)?;
        Self::new(new_up, self.down, span)
    }

    /// A new segment `(new_down, self.down)` was inserted at the tail of
    /// this one; keep the upstream remainder `(self.up, new_down)`.
    pub fn shrink_from_down(
        &self,
        new_down: StopId,
        consumed: Span,
    ) -> Result<Self, TopologyError> {
        let span = self.remaining_after(consumed)?;
        Self::new(self.up, new_down, span)
    }

    fn remaining_after(&self, consumed: Span) -> Result<Span, TopologyError> {
        if self.span.is_less_than_or_equal(consumed) {
            return Err(TopologyError::SpanTooLarge {
                requested: consumed,
                available: self.span,
            });
        }
        self.span.minus(consumed)
    }
}

impl TryFrom<RawSegment> for Segment {
    type Error = TopologyError;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        Segment::from_parts(raw.up, raw.down, raw.distance)
    }
}

impl From<Segment> for RawSegment {
    fn from(segment: Segment) -> Self {
        RawSegment {
            up: Some(segment.up),
            down: Some(segment.down),
            distance: segment.span.into(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.up, self.down, self.span)
    }
}
