//! Diagnostic knowledge dumps.
//!
//! A [`KnowledgeReport`] is a row-major listing of what the engine has
//! resolved about hazards and the goal, plus an ASCII rendering for
//! console inspection. It is a read-only view for humans and tests,
//! not a wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::grid::{CellPos, GridDims};
use crate::knowledge::KnowledgeGrid;

/// Hazard and goal resolution for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCell {
    /// The cell position.
    pub pos: CellPos,
    /// The hazard domain at that cell.
    pub hazard: Domain,
    /// The goal domain at that cell.
    pub goal: Domain,
}

/// Row-major dump of hazard/goal knowledge for the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeReport {
    dims: GridDims,
    cells: Vec<ReportCell>,
}

impl KnowledgeReport {
    /// Builds a report from a knowledge snapshot.
    #[must_use]
    pub fn from_knowledge(knowledge: &KnowledgeGrid) -> Self {
        let cells = knowledge
            .iter()
            .map(|(pos, beliefs)| ReportCell {
                pos,
                hazard: beliefs.hazard,
                goal: beliefs.goal,
            })
            .collect();
        Self {
            dims: knowledge.dims(),
            cells,
        }
    }

    /// The grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[ReportCell] {
        &self.cells
    }

    /// Cells whose hazard domain is fixed to true.
    pub fn known_hazards(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.hazard == Domain::True)
            .map(|cell| cell.pos)
    }

    /// The located goal cell, if the engine has pinned it.
    #[must_use]
    pub fn located_goal(&self) -> Option<CellPos> {
        self.cells
            .iter()
            .find(|cell| cell.goal == Domain::True)
            .map(|cell| cell.pos)
    }
}

fn glyph(domain: Domain, known: char) -> char {
    match domain {
        Domain::True => known,
        Domain::False => '-',
        Domain::Unknown => '?',
    }
}

impl fmt::Display for KnowledgeReport {
    /// Renders one two-glyph code per cell: hazard then goal, with
    /// `-` for known-absent and `?` for unresolved.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows() {
            for col in 0..self.dims.cols() {
                if col > 0 {
                    write!(f, " ")?;
                }
                let cell = self.cells[self.dims.index_of(CellPos::new(row, col))];
                write!(f, "{}{}", glyph(cell.hazard, 'H'), glyph(cell.goal, 'G'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attribute;

    #[test]
    fn test_report_row_major_order() {
        let knowledge = KnowledgeGrid::new(GridDims::new(2, 2).unwrap());
        let report = KnowledgeReport::from_knowledge(&knowledge);
        let positions: Vec<CellPos> = report.cells().iter().map(|cell| cell.pos).collect();
        assert_eq!(
            positions,
            vec![
                CellPos::new(0, 0),
                CellPos::new(0, 1),
                CellPos::new(1, 0),
                CellPos::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_report_reflects_resolutions() {
        let mut knowledge = KnowledgeGrid::new(GridDims::new(3, 3).unwrap());
        knowledge
            .narrow(CellPos::new(1, 1), Attribute::Hazard, true)
            .unwrap();
        knowledge
            .narrow(CellPos::new(2, 2), Attribute::Goal, true)
            .unwrap();

        let report = KnowledgeReport::from_knowledge(&knowledge);
        let hazards: Vec<CellPos> = report.known_hazards().collect();
        assert_eq!(hazards, vec![CellPos::new(1, 1)]);
        assert_eq!(report.located_goal(), Some(CellPos::new(2, 2)));
    }

    #[test]
    fn test_report_display() {
        let mut knowledge = KnowledgeGrid::new(GridDims::new(2, 2).unwrap());
        knowledge
            .narrow(CellPos::new(0, 0), Attribute::Hazard, false)
            .unwrap();
        knowledge
            .narrow(CellPos::new(0, 0), Attribute::Goal, false)
            .unwrap();
        knowledge
            .narrow(CellPos::new(1, 0), Attribute::Hazard, true)
            .unwrap();
        knowledge
            .narrow(CellPos::new(1, 1), Attribute::Goal, true)
            .unwrap();

        let report = KnowledgeReport::from_knowledge(&knowledge);
        let rendered = format!("{report}");
        assert_eq!(rendered, "-- ??\nH? ?G\n");
    }
}
