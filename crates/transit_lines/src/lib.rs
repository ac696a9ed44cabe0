//! Transit line topology.
//!
//! A transit line is a chain of point-to-point segments between stops that
//! must always form one simple path: no branches, no cycles, no gaps.
//!
//! - [`segment_chain`]: the value types (`StopId`, `Span`, `Segment`), the
//!   `SegmentChain` aggregate with insertion/removal, and the path
//!   linearizer that recovers the stop order.
//! - [`lines`]: named lines owning one chain each, the `TransitLines`
//!   registry resource, and the ECS plugin that applies queued edits.

pub mod config;
pub mod lines;
pub mod segment_chain;

pub use lines::{
    EditOutcome, LineEditLog, LineEditRequest, LineError, LineId, TopologyViolations,
    TransitLine, TransitLines, TransitLinesPlugin,
};
pub use segment_chain::{Segment, SegmentChain, Span, StopId, TopologyError};
