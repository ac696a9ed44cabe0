//! Named transit lines and their ECS integration.
//!
//! ## Data model
//! - `TransitLine`: id, name, color, and the `SegmentChain` it runs over
//! - `TransitLines`: resource holding every line; the only writer of chains
//! - `LineEditRequest`: event carrying an insert/remove edit for one line
//! - `LineEditLog`: ring buffer of recent edits and their outcomes
//!
//! Edits are applied by `apply_line_edits` in `Update`; a throttled
//! `validate_line_topology` pass re-checks every line afterwards.

mod state;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use state::TransitLines;
pub use systems::{
    apply_line_edits, tick_validation_timer, validate_line_topology, LineEditLog,
    TopologyValidationTimer, TopologyViolations, TransitLinesPlugin,
};
pub use types::*;
