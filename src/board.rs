//! Ground-truth world scaffold.
//!
//! The [`Board`] holds what the agent never sees: where the hazards
//! and the goal really are. It derives percepts from adjacency,
//! validates and applies moves, and reports win or loss. The inference
//! core and the navigator only ever receive positions and percepts;
//! nothing in this module leaks into their reasoning.
//!
//! Scenario generation keeps the original game's placement rules: the
//! goal never lands on the start cell or either of its neighbors, a
//! hazard never lands on an occupied cell or a cell adjacent to the
//! start, and any hazard that makes the board unreachable by a
//! down/right-only walk from the start is re-rolled.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SeerError, SeerResult, ValidationError};
use crate::grid::{CellPos, GridDims, Move};
use crate::percept::PerceptSet;

/// Placement retries per hazard before generation gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 4096;

/// Static parameters for scenario generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Hazard cells to place.
    pub hazards: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            hazards: 5,
        }
    }
}

impl ScenarioConfig {
    /// Builds validated grid dimensions for this scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDimensions`] if a side is
    /// zero or the grid is too small to host a goal away from the
    /// start, and [`ValidationError::TooManyHazards`] if the hazard
    /// count exceeds the cells actually available for placement.
    pub fn validate(&self) -> Result<GridDims, ValidationError> {
        let dims = GridDims::new(self.rows, self.cols)?;
        // The goal must land somewhere with row + col > 1.
        if (self.rows - 1) + (self.cols - 1) < 2 {
            return Err(ValidationError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let capacity = self.placement_capacity(dims);
        if self.hazards > capacity {
            return Err(ValidationError::TooManyHazards {
                requested: self.hazards,
                capacity,
            });
        }
        Ok(dims)
    }

    /// Cells a hazard may occupy: everything except the start cell,
    /// the cells adjacent to it, and the goal cell.
    fn placement_capacity(&self, dims: GridDims) -> usize {
        let mut excluded = 2; // start cell and the goal cell
        if self.cols > 1 {
            excluded += 1;
        }
        if self.rows > 1 {
            excluded += 1;
        }
        dims.cell_count().saturating_sub(excluded)
    }
}

/// Result of applying one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The agent moved onto an empty cell.
    Continue,
    /// The agent reached the goal.
    Win,
    /// The agent stepped onto a hazard.
    Loss,
}

impl Outcome {
    /// Returns true if the session is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// The real board: hazard and goal placement plus the agent position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    dims: GridDims,
    goal: CellPos,
    hazards: HashSet<CellPos>,
    agent: CellPos,
}

impl Board {
    /// The fixed entry cell.
    pub const START: CellPos = CellPos::new(0, 0);

    /// Generates a random scenario.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation failures, and reports an
    /// internal error if hazard placement exhausts its retry budget
    /// (a hazard count that dense has no solvable arrangement left to
    /// find in reasonable time).
    pub fn generate<R: Rng + ?Sized>(config: ScenarioConfig, rng: &mut R) -> SeerResult<Self> {
        let dims = config.validate()?;

        let goal = loop {
            let pos = CellPos::new(
                rng.gen_range(0..dims.rows()),
                rng.gen_range(0..dims.cols()),
            );
            if pos.row + pos.col > 1 {
                break pos;
            }
        };

        let mut hazards: HashSet<CellPos> = HashSet::with_capacity(config.hazards);
        for _ in 0..config.hazards {
            let mut attempts = 0;
            loop {
                attempts += 1;
                if attempts > MAX_PLACEMENT_ATTEMPTS {
                    return Err(SeerError::internal(
                        "hazard placement exhausted its retry budget",
                    ));
                }
                let pos = CellPos::new(
                    rng.gen_range(0..dims.rows()),
                    rng.gen_range(0..dims.cols()),
                );
                if pos == Self::START
                    || pos.row + pos.col == 1
                    || pos == goal
                    || hazards.contains(&pos)
                {
                    continue;
                }
                hazards.insert(pos);
                if is_solvable(dims, goal, &hazards) {
                    break;
                }
                // This placement walls the goal off; undo and re-roll.
                hazards.remove(&pos);
            }
        }

        debug!(%dims, %goal, hazards = hazards.len(), "scenario generated");
        Ok(Self {
            dims,
            goal,
            hazards,
            agent: Self::START,
        })
    }

    /// Builds a board from an explicit layout, for fixtures and
    /// replays.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] for out-of-grid
    /// placements and [`ValidationError::InvalidLayout`] if the goal
    /// or a hazard sits on the start cell or the goal collides with a
    /// hazard.
    pub fn with_layout(
        dims: GridDims,
        goal: CellPos,
        hazards: impl IntoIterator<Item = CellPos>,
    ) -> Result<Self, ValidationError> {
        if !dims.contains(goal) {
            return Err(ValidationError::InvalidCoordinate { cell: goal, dims });
        }
        let mut placed = HashSet::new();
        for hazard in hazards {
            if !dims.contains(hazard) {
                return Err(ValidationError::InvalidCoordinate { cell: hazard, dims });
            }
            placed.insert(hazard);
        }
        if goal == Self::START {
            return Err(ValidationError::InvalidLayout {
                reason: "goal placed on the start cell".to_string(),
            });
        }
        if placed.contains(&Self::START) {
            return Err(ValidationError::InvalidLayout {
                reason: "hazard placed on the start cell".to_string(),
            });
        }
        if placed.contains(&goal) {
            return Err(ValidationError::InvalidLayout {
                reason: "hazard placed on the goal cell".to_string(),
            });
        }
        Ok(Self {
            dims,
            goal,
            hazards: placed,
            agent: Self::START,
        })
    }

    /// The grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Where the agent currently stands.
    #[must_use]
    pub const fn agent_position(&self) -> CellPos {
        self.agent
    }

    /// The goal cell.
    #[must_use]
    pub const fn goal(&self) -> CellPos {
        self.goal
    }

    /// The hazard cells, in no particular order.
    pub fn hazards(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.hazards.iter().copied()
    }

    /// Number of placed hazards.
    #[must_use]
    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    /// The percepts present at `pos`.
    ///
    /// WARN if some neighbor holds a hazard, GLOW if some neighbor
    /// holds the goal.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] for out-of-grid
    /// positions.
    pub fn percepts_at(&self, pos: CellPos) -> Result<PerceptSet, ValidationError> {
        if !self.dims.contains(pos) {
            return Err(ValidationError::InvalidCoordinate {
                cell: pos,
                dims: self.dims,
            });
        }
        let warn = self
            .dims
            .neighbors(pos)
            .any(|neighbor| self.hazards.contains(&neighbor));
        let glow = self.dims.neighbors(pos).any(|neighbor| neighbor == self.goal);
        Ok(PerceptSet::new(warn, glow))
    }

    /// The percepts at the agent's current cell.
    #[must_use]
    pub fn current_percepts(&self) -> PerceptSet {
        // The agent position is maintained in-grid by `apply`.
        self.percepts_at(self.agent).unwrap_or(PerceptSet::EMPTY)
    }

    /// Applies one move, advancing the agent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalMove`] if the step would
    /// leave the grid; the agent does not move.
    pub fn apply(&mut self, mv: Move) -> Result<Outcome, ValidationError> {
        let Some(destination) = mv.apply(self.agent, self.dims) else {
            return Err(ValidationError::IllegalMove {
                from: self.agent,
                mv,
            });
        };
        self.agent = destination;
        if self.hazards.contains(&destination) {
            Ok(Outcome::Loss)
        } else if destination == self.goal {
            Ok(Outcome::Win)
        } else {
            Ok(Outcome::Continue)
        }
    }
}

/// Down/right-only reachability of the goal from the start.
///
/// Understates true four-directional connectivity; kept for parity
/// with the original placement behavior.
fn is_solvable(dims: GridDims, goal: CellPos, hazards: &HashSet<CellPos>) -> bool {
    fn walk(dims: GridDims, goal: CellPos, hazards: &HashSet<CellPos>, from: CellPos) -> bool {
        if from == goal {
            return true;
        }
        if hazards.contains(&from) {
            return false;
        }
        let down = CellPos::new(from.row + 1, from.col);
        let right = CellPos::new(from.row, from.col + 1);
        (dims.contains(down) && walk(dims, goal, hazards, down))
            || (dims.contains(right) && walk(dims, goal, hazards, right))
    }
    walk(dims, goal, hazards, Board::START)
}

impl fmt::Display for Board {
    /// Renders `A` for the agent, `G` for the goal, `H` for hazards,
    /// `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows() {
            for col in 0..self.dims.cols() {
                let pos = CellPos::new(row, col);
                let glyph = if pos == self.agent {
                    'A'
                } else if pos == self.goal {
                    'G'
                } else if self.hazards.contains(&pos) {
                    'H'
                } else {
                    '.'
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
