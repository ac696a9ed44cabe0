//! Segment topology of a single transit line.
//!
//! ## Data model
//! - `StopId`: opaque identity of a stop
//! - `Span`: strictly positive distance between adjacent stops
//! - `Segment`: directed `up -> down` edge carrying a span
//! - `SegmentChain`: the unordered segment set of one line, always a single
//!   simple path
//!
//! ## Editing
//! - Inserting a segment that shares its up stop with an existing segment
//!   splits that segment from the head; sharing the down stop splits from
//!   the tail. Sharing a terminus on the open side just extends the line.
//! - Removing an interior stop merges the two segments around it.
//!
//! Ordering is never stored; `linearize::ordered_stops` recovers it.

mod chain;
mod error;
pub mod linearize;
mod types;


pub use chain::SegmentChain;
pub use error::TopologyError;
pub use types::{Segment, Span, StopId};
