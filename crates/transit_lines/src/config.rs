/// A line must always keep at least this many segments; removals that would
/// go below it are rejected.
pub const MIN_SEGMENTS_PER_LINE: usize = 1;

/// Number of `(request, outcome)` pairs retained by the edit log.
pub const EDIT_LOG_CAPACITY: usize = 64;

/// Topology validation runs once every this many `Update` ticks.
pub const VALIDATION_INTERVAL_TICKS: u32 = 60;
