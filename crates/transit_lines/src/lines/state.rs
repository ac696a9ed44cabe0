//! `TransitLines` resource: the registry of every line and its segment chain.

use bevy::prelude::*;

use crate::segment_chain::{Segment, StopId};

use super::types::*;

/// The source of truth for line topology.
///
/// Each line owns its chain exclusively. Systems get write access through
/// `ResMut<TransitLines>`, so edits to one line never interleave.
#[derive(Resource, Debug, Clone, Default)]
pub struct TransitLines {
    /// All lines, in creation order.
    pub(crate) lines: Vec<TransitLine>,
    /// Auto-incrementing line ID counter.
    pub(crate) next_line_id: u32,
}

impl TransitLines {
    // -------------------------------------------------------------------------
    // Line management
    // -------------------------------------------------------------------------

    /// Create a line running over a single initial segment.
    /// Names must be non-blank and unique across lines.
    pub fn create_line(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Segment,
    ) -> Result<LineId, LineError> {
        let name = name.into();
        if self.line_by_name(&name).is_some() {
            return Err(LineError::DuplicateName(name));
        }

        let id = LineId(self.next_line_id);
        let line = TransitLine::new(id, name, color, initial)?;
        self.next_line_id += 1;

        info!("Created {} '{}' over {}", id, line.name, initial);
        self.lines.push(line);
        Ok(id)
    }

    /// Remove a line and its segments. Returns `false` if no such line.
    pub fn remove_line(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        let removed = self.lines.len() < before;
        if removed {
            info!("Removed {}", id);
        }
        removed
    }

    /// Rename or recolor a line.
    pub fn update_line(
        &mut self,
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), LineError> {
        let name = name.into();
        if self.lines.iter().any(|l| l.id != id && l.name == name) {
            return Err(LineError::DuplicateName(name));
        }
        self.line_mut(id)?.update(name, color)
    }

    // -------------------------------------------------------------------------
    // Topology edits
    // -------------------------------------------------------------------------

    /// Add a segment to a line, extending it or splitting one of its segments.
    pub fn insert_segment(&mut self, id: LineId, segment: Segment) -> Result<(), LineError> {
        self.line_mut(id)?.chain.insert(segment)?;
        Ok(())
    }

    /// Take a stop off a line, merging the segments on either side of it.
    pub fn remove_stop(&mut self, id: LineId, stop: StopId) -> Result<(), LineError> {
        self.line_mut(id)?.chain.remove(stop)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn line(&self, id: LineId) -> Option<&TransitLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn line_by_name(&self, name: &str) -> Option<&TransitLine> {
        self.lines.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stops of a line from upstream terminus to downstream terminus.
    pub fn ordered_stops(&self, id: LineId) -> Result<Vec<StopId>, LineError> {
        let line = self.line(id).ok_or(LineError::UnknownLine(id))?;
        Ok(line.stops()?)
    }

    /// Ids of every line that calls at `stop`.
    pub fn lines_serving(&self, stop: StopId) -> Vec<LineId> {
        self.lines
            .iter()
            .filter(|l| l.chain.contains_stop(stop))
            .map(|l| l.id)
            .collect()
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut TransitLine, LineError> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LineError::UnknownLine(id))
    }
}
