//! `SegmentChain`: the segment set of one line and its insert/remove rules.

use bevy::log::debug;
use serde::Serialize;

use crate::config::MIN_SEGMENTS_PER_LINE;

use super::error::TopologyError;
use super::linearize;
use super::types::{Segment, StopId};

/// The segments of one line. Order inside the set carries no meaning; use
/// [`SegmentChain::ordered_stops`] to walk the line.
///
/// After every successful mutation the set is non-empty and forms a single
/// simple path: each stop touches one segment (terminus) or two (interior),
/// and every span is positive. Failed mutations leave the set untouched.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentChain {
    segments: Vec<Segment>,
}

impl SegmentChain {
    /// A new line always starts as a single segment.
    pub fn new(initial: Segment) -> Self {
        Self {
            segments: vec![initial],
        }
    }

    /// Rebuild a chain from a set of segments supplied by a collaborator.
    /// The set must be non-empty and already form one simple path.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, TopologyError> {
        if segments.len() < MIN_SEGMENTS_PER_LINE {
            return Err(TopologyError::ChainTooSmall {
                segments: segments.len(),
            });
        }
        linearize::ordered_stops(&segments)?;
        Ok(Self { segments })
    }

    /// Wrap segments without any validation, for exercising the invariant
    /// checks on deliberately broken chains.
    #[cfg(test)]
    pub(crate) fn from_segments_unchecked(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false` for a chain built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains_stop(&self, stop: StopId) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.matches_either_endpoint(stop))
    }

    /// Stops from upstream terminus to downstream terminus, recomputed on
    /// every call.
    pub fn ordered_stops(&self) -> Result<Vec<StopId>, TopologyError> {
        linearize::ordered_stops(&self.segments)
    }

    /// `(upstream terminus, downstream terminus)`.
    pub fn termini(&self) -> Result<(StopId, StopId), TopologyError> {
        let stops = self.ordered_stops()?;
        match (stops.first(), stops.last()) {
            (Some(&first), Some(&last)) => Ok((first, last)),
            _ => Err(TopologyError::DisconnectedChain),
        }
    }

    /// Sum of all spans along the line.
    pub fn total_span(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| u64::from(segment.span().distance()))
            .sum()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Add a segment that shares exactly one stop with the line.
    ///
    /// If the shared stop already has a segment on the side the new one
    /// occupies, that segment is split: it keeps the remainder of its span
    /// and its far stop, and the new segment's other stop becomes its near
    /// stop. Otherwise the new segment extends a terminus.
    pub fn insert(&mut self, segment: Segment) -> Result<(), TopologyError> {
        let up_linked = self.contains_stop(segment.up());
        let down_linked = self.contains_stop(segment.down());

        match (up_linked, down_linked) {
            (true, true) => {
                return Err(TopologyError::BothEndpointsAlreadyLinked {
                    up: segment.up(),
                    down: segment.down(),
                })
            }
            (false, false) => {
                return Err(TopologyError::NeitherEndpointLinked {
                    up: segment.up(),
                    down: segment.down(),
                })
            }
            _ => {}
        }

        // Compute the split before touching the set so a failure leaves it intact.
        let split = if down_linked {
            self.position(|existing| existing.down() == segment.down())
                .map(|index| {
                    self.segments[index]
                        .shrink_from_down(segment.up(), segment.span())
                        .map(|shrunk| (index, shrunk))
                })
                .transpose()?
        } else {
            self.position(|existing| existing.up() == segment.up())
                .map(|index| {
                    self.segments[index]
                        .shrink_from_up(segment.down(), segment.span())
                        .map(|shrunk| (index, shrunk))
                })
                .transpose()?
        };

        if let Some((index, shrunk)) = split {
            debug!(
                "Split segment {} into {} and {}",
                self.segments[index], segment, shrunk
            );
            self.segments[index] = shrunk;
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Take a stop off the line.
    ///
    /// Removing an interior stop merges its arriving and departing segments
    /// into one spanning both distances; removing a terminus drops its only
    /// segment.
    pub fn remove(&mut self, stop: StopId) -> Result<(), TopologyError> {
        if self.segments.len() <= MIN_SEGMENTS_PER_LINE {
            return Err(TopologyError::ChainTooSmall {
                segments: self.segments.len(),
            });
        }

        let departing = self.position(|segment| segment.up() == stop);
        let arriving = self.position(|segment| segment.down() == stop);

        let merged = match (arriving, departing) {
            (None, None) => return Err(TopologyError::StopNotInChain { stop }),
            (Some(a), Some(d)) => Some(Segment::merge(self.segments[a], self.segments[d])?),
            _ => None,
        };

        // Highest index first so swap_remove never moves the other target.
        let mut doomed: Vec<usize> = [arriving, departing].into_iter().flatten().collect();
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        for index in doomed {
            self.segments.swap_remove(index);
        }

        if let Some(merged) = merged {
            debug!("Merged segments over {} into {}", stop, merged);
            self.segments.push(merged);
        }
        Ok(())
    }

    fn position(&self, predicate: impl Fn(&Segment) -> bool) -> Option<usize> {
        self.segments.iter().position(predicate)
    }
}
