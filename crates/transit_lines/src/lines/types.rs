//! Line aggregate, line-level errors, and the edit request/outcome values
//! exchanged with the ECS layer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::segment_chain::{Segment, SegmentChain, StopId, TopologyError};

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a transit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line #{}", self.0)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by line management on top of [`TopologyError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Line name was empty or whitespace.
    EmptyName,
    /// Line color was empty or whitespace.
    EmptyColor,
    /// Another line already uses this name.
    DuplicateName(String),
    /// No line with this id exists.
    UnknownLine(LineId),
    /// The edit was rejected by the line's segment chain.
    Topology(TopologyError),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::EmptyName => write!(f, "Line name must not be empty"),
            LineError::EmptyColor => write!(f, "Line color must not be empty"),
            LineError::DuplicateName(name) => {
                write!(f, "A line named '{name}' already exists")
            }
            LineError::UnknownLine(id) => write!(f, "No such line: {id}"),
            LineError::Topology(e) => write!(f, "Topology error: {e}"),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LineError::Topology(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TopologyError> for LineError {
    fn from(e: TopologyError) -> Self {
        LineError::Topology(e)
    }
}

// =============================================================================
// Line
// =============================================================================

/// A named, colored line and the segments it runs over.
#[derive(Debug, Clone, Serialize)]
pub struct TransitLine {
    pub(crate) id: LineId,
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) chain: SegmentChain,
}

impl TransitLine {
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Segment,
    ) -> Result<Self, LineError> {
        let name = name.into();
        let color = color.into();
        validate_label(&name, &color)?;
        Ok(Self {
            id,
            name,
            color,
            chain: SegmentChain::new(initial),
        })
    }

    /// Rename or recolor the line. Its segments are left as they are.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), LineError> {
        let name = name.into();
        let color = color.into();
        validate_label(&name, &color)?;
        self.name = name;
        self.color = color;
        Ok(())
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// Stops from upstream terminus to downstream terminus.
    pub fn stops(&self) -> Result<Vec<StopId>, TopologyError> {
        self.chain.ordered_stops()
    }
}

fn validate_label(name: &str, color: &str) -> Result<(), LineError> {
    if name.trim().is_empty() {
        return Err(LineError::EmptyName);
    }
    if color.trim().is_empty() {
        return Err(LineError::EmptyColor);
    }
    Ok(())
}

// =============================================================================
// Edit requests
// =============================================================================

/// A topology edit queued by a collaborator (UI tool, agent, replay) and
/// applied by `apply_line_edits`.
///
/// Insertions carry raw values; they are validated into a `Segment` when the
/// request is applied.
#[derive(Event, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEditRequest {
    InsertSegment {
        line: LineId,
        up: Option<StopId>,
        down: Option<StopId>,
        distance: i64,
    },
    RemoveStop {
        line: LineId,
        stop: StopId,
    },
}

impl LineEditRequest {
    pub fn line(&self) -> LineId {
        match self {
            LineEditRequest::InsertSegment { line, .. } | LineEditRequest::RemoveStop { line, .. } => {
                *line
            }
        }
    }
}

/// Result of applying one [`LineEditRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected(LineError),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    pub fn error(&self) -> Option<&LineError> {
        match self {
            EditOutcome::Rejected(e) => Some(e),
            EditOutcome::Applied => None,
        }
    }
}

impl From<Result<(), LineError>> for EditOutcome {
    fn from(result: Result<(), LineError>) -> Self {
        match result {
            Ok(()) => EditOutcome::Applied,
            Err(e) => EditOutcome::Rejected(e),
        }
    }
}
