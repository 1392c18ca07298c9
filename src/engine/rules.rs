//! The fixed rule set relating a cell's sensory flags to its
//! neighbors' hazard and goal domains.
//!
//! Rules are pure: they read the knowledge store and return the values
//! they force, without writing anything. The engine applies the writes
//! and decides what to revisit. Boundary cells evaluate over their
//! existing neighbors only; no rule ever references an out-of-grid
//! position.

use crate::domain::{Attribute, Domain};
use crate::error::{InferenceError, SeerResult};
use crate::grid::CellPos;
use crate::knowledge::KnowledgeGrid;

/// A value some rule forces onto one cell's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Forced {
    pub cell: CellPos,
    pub attribute: Attribute,
    pub value: bool,
}

/// Evaluates every rule anchored at `cell` against the current
/// knowledge and collects the forced values.
pub(crate) fn evaluate(knowledge: &KnowledgeGrid, cell: CellPos) -> SeerResult<Vec<Forced>> {
    let mut forced = Vec::new();
    let beliefs = knowledge.beliefs(cell);
    apply_warn(knowledge, cell, beliefs.warn, &mut forced)?;
    apply_glow(knowledge, cell, beliefs.glow, &mut forced)?;
    Ok(forced)
}

/// Warn rules: a warning means at least one neighbor holds a hazard,
/// its absence means none does.
fn apply_warn(
    knowledge: &KnowledgeGrid,
    cell: CellPos,
    warn: Domain,
    forced: &mut Vec<Forced>,
) -> SeerResult<()> {
    let dims = knowledge.dims();
    match warn {
        Domain::Unknown => Ok(()),
        Domain::False => {
            for neighbor in dims.neighbors(cell) {
                forced.push(Forced {
                    cell: neighbor,
                    attribute: Attribute::Hazard,
                    value: false,
                });
            }
            Ok(())
        }
        Domain::True => {
            let mut open = None;
            let mut open_count = 0usize;
            let mut satisfied = false;
            for neighbor in dims.neighbors(cell) {
                match knowledge.beliefs(neighbor).hazard {
                    Domain::True => satisfied = true,
                    Domain::Unknown => {
                        open_count += 1;
                        open.get_or_insert(neighbor);
                    }
                    Domain::False => {}
                }
            }
            if satisfied {
                return Ok(());
            }
            match open_count {
                // Every candidate was eliminated, which re-narrows the
                // warning itself against its fixed value.
                0 => Err(InferenceError::Contradiction {
                    cell,
                    attribute: Attribute::Warn,
                    fixed: true,
                    attempted: false,
                }
                .into()),
                1 => {
                    if let Some(neighbor) = open {
                        forced.push(Forced {
                            cell: neighbor,
                            attribute: Attribute::Hazard,
                            value: true,
                        });
                    }
                    Ok(())
                }
                // More than one open neighbor pins nothing.
                _ => Ok(()),
            }
        }
    }
}

/// Glow rules: a glow means exactly one neighbor is the goal, its
/// absence means none is. Since the board carries a single goal, a
/// glow also rules the goal out everywhere beyond the glowing cell and
/// its neighbors.
fn apply_glow(
    knowledge: &KnowledgeGrid,
    cell: CellPos,
    glow: Domain,
    forced: &mut Vec<Forced>,
) -> SeerResult<()> {
    let dims = knowledge.dims();
    match glow {
        Domain::Unknown => Ok(()),
        Domain::False => {
            for neighbor in dims.neighbors(cell) {
                forced.push(Forced {
                    cell: neighbor,
                    attribute: Attribute::Goal,
                    value: false,
                });
            }
            Ok(())
        }
        Domain::True => {
            let mut open = Vec::new();
            let mut located = 0usize;
            for neighbor in dims.neighbors(cell) {
                match knowledge.beliefs(neighbor).goal {
                    Domain::True => located += 1,
                    Domain::Unknown => open.push(neighbor),
                    Domain::False => {}
                }
            }
            match located {
                0 if open.is_empty() => {
                    return Err(InferenceError::Contradiction {
                        cell,
                        attribute: Attribute::Glow,
                        fixed: true,
                        attempted: false,
                    }
                    .into());
                }
                0 if open.len() == 1 => forced.push(Forced {
                    cell: open[0],
                    attribute: Attribute::Goal,
                    value: true,
                }),
                0 => {}
                1 => {
                    // Exactly one neighbor is the goal, so the other
                    // open candidates are not.
                    for neighbor in open {
                        forced.push(Forced {
                            cell: neighbor,
                            attribute: Attribute::Goal,
                            value: false,
                        });
                    }
                }
                _ => {
                    return Err(InferenceError::Contradiction {
                        cell,
                        attribute: Attribute::Glow,
                        fixed: true,
                        attempted: false,
                    }
                    .into());
                }
            }
            // Goal-elsewhere exclusion over the rest of the grid.
            for pos in dims.positions() {
                if pos != cell && !pos.is_adjacent(cell) {
                    forced.push(Forced {
                        cell: pos,
                        attribute: Attribute::Goal,
                        value: false,
                    });
                }
            }
            Ok(())
        }
    }
}
