//! The navigation policy.
//!
//! The navigator owns the exploration history and the queued move
//! list; it reads knowledge snapshots but never writes them. Per
//! request it emits exactly one move. When the queue is empty it picks
//! a target from the latest snapshot (located goal first, then the
//! nearest safe frontier cell, then the nearest still-unknown one) and
//! plans the whole path to it; a planned path runs to completion and
//! is never reordered or cancelled.

mod visited;

pub use visited::VisitedSet;

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::Domain;
use crate::error::{NavigationError, SeerError, SeerResult};
use crate::grid::{CellPos, GridDims, Move};
use crate::knowledge::{CellBeliefs, KnowledgeGrid};

/// Where the navigator currently is in its decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// No queued moves, no decision in flight.
    Idle,
    /// Picking a target from the latest snapshot.
    SelectingTarget,
    /// Synthesizing the move sequence to the chosen target.
    PlanningPath,
    /// Draining queued moves, one per request.
    Executing,
}

/// The navigation policy: one per session.
#[derive(Debug, Clone)]
pub struct Navigator {
    visited: VisitedSet,
    queue: VecDeque<Move>,
    phase: NavPhase,
}

impl Navigator {
    /// Creates an idle navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visited: VisitedSet::new(),
            queue: VecDeque::new(),
            phase: NavPhase::Idle,
        }
    }

    /// Records that the agent physically occupies `pos`.
    ///
    /// Returns true if the cell was new to the history.
    pub fn record_visit(&mut self, pos: CellPos) -> bool {
        self.visited.insert(pos)
    }

    /// The exploration history.
    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// The current decision phase.
    #[must_use]
    pub const fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Moves still queued from the last planned path.
    #[must_use]
    pub fn queued_moves(&self) -> usize {
        self.queue.len()
    }

    /// Emits the next move, planning a fresh path first if the queue
    /// has drained.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NoReachableTarget`] or
    /// [`NavigationError::PathUnavailable`] from the planning stage;
    /// both are fatal for the session. A failed planning attempt
    /// leaves the navigator idle with an empty queue.
    pub fn next_move(&mut self, current: CellPos, knowledge: &KnowledgeGrid) -> SeerResult<Move> {
        if self.queue.is_empty() {
            self.phase = NavPhase::SelectingTarget;
            let target = match self.select_target(current, knowledge) {
                Ok(target) => target,
                Err(err) => {
                    self.phase = NavPhase::Idle;
                    return Err(err.into());
                }
            };

            self.phase = NavPhase::PlanningPath;
            let path = match self.plan_path(knowledge.dims(), current, target) {
                Ok(path) => path,
                Err(err) => {
                    self.phase = NavPhase::Idle;
                    return Err(err.into());
                }
            };
            debug!(%current, %target, steps = path.len(), "path planned");
            self.queue.extend(path);
        }

        let mv = self
            .queue
            .pop_front()
            .ok_or_else(|| SeerError::internal("planned path was empty"))?;
        self.phase = if self.queue.is_empty() {
            NavPhase::Idle
        } else {
            NavPhase::Executing
        };
        Ok(mv)
    }

    /// Picks the next target cell from a knowledge snapshot.
    ///
    /// Priority: a cell known to hold the goal; else the nearest
    /// frontier cell with `hazard` known false; else the nearest
    /// frontier cell whose `hazard` is still unknown. Distance is
    /// Manhattan from `current`, with ties broken by row-major scan
    /// order. Deterministic for unchanged state.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NoReachableTarget`] when the
    /// frontier is empty or every frontier cell is a known hazard.
    pub fn select_target(
        &self,
        current: CellPos,
        knowledge: &KnowledgeGrid,
    ) -> Result<CellPos, NavigationError> {
        for (pos, beliefs) in knowledge.iter() {
            if beliefs.goal == Domain::True {
                return Ok(pos);
            }
        }

        let frontier: Vec<(CellPos, CellBeliefs)> = knowledge
            .iter()
            .filter(|(pos, _)| self.visited.is_frontier(*pos))
            .collect();

        closest(&frontier, current, |beliefs| beliefs.hazard == Domain::False)
            .or_else(|| closest(&frontier, current, |beliefs| beliefs.hazard.is_unknown()))
            .ok_or(NavigationError::NoReachableTarget)
    }

    /// Synthesizes the move sequence from `current` to `target`.
    ///
    /// Greedy walk: while not adjacent to `target`, step to the
    /// visited neighbor minimizing Manhattan distance to it
    /// (first-found tie-break), then step onto `target` itself. The
    /// walk assumes the visited region is simply connected from the
    /// entry cell; a step cap of the cell count turns a violated
    /// assumption into an error instead of an endless loop.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::PathUnavailable`] if no visited
    /// neighbor exists at some step or the cap is exceeded.
    pub fn plan_path(
        &self,
        dims: GridDims,
        current: CellPos,
        target: CellPos,
    ) -> Result<Vec<Move>, NavigationError> {
        let stalled = NavigationError::PathUnavailable {
            from: current,
            target,
        };
        let cap = dims.cell_count();
        let mut moves = Vec::new();
        let mut path_pos = current;

        while path_pos.manhattan(target) != 1 {
            if moves.len() >= cap {
                return Err(stalled);
            }
            let mut best: Option<(CellPos, usize)> = None;
            for candidate in self.visited.visited_neighbors(path_pos) {
                let distance = candidate.manhattan(target);
                if best.map_or(true, |(_, held)| distance < held) {
                    best = Some((candidate, distance));
                }
            }
            let Some((next, _)) = best else {
                return Err(stalled);
            };
            let Some(mv) = Move::toward(path_pos, next) else {
                return Err(stalled);
            };
            moves.push(mv);
            path_pos = next;
        }

        let Some(final_move) = Move::toward(path_pos, target) else {
            return Err(stalled);
        };
        moves.push(final_move);
        Ok(moves)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest admissible frontier cell, scanning in row-major order so
/// equal distances keep the earliest cell.
fn closest(
    frontier: &[(CellPos, CellBeliefs)],
    current: CellPos,
    admit: impl Fn(CellBeliefs) -> bool,
) -> Option<CellPos> {
    let mut best: Option<(CellPos, usize)> = None;
    for (pos, beliefs) in frontier {
        if !admit(*beliefs) {
            continue;
        }
        let distance = current.manhattan(*pos);
        if best.map_or(true, |(_, held)| distance < held) {
            best = Some((*pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attribute;

    fn dims() -> GridDims {
        GridDims::new(5, 5).unwrap()
    }

    fn knowledge() -> KnowledgeGrid {
        KnowledgeGrid::new(dims())
    }

    fn navigator_at_origin() -> Navigator {
        let mut navigator = Navigator::new();
        navigator.record_visit(CellPos::new(0, 0));
        navigator
    }

    #[test]
    fn test_select_target_prefers_located_goal() {
        let mut knowledge = knowledge();
        knowledge
            .narrow(CellPos::new(3, 3), Attribute::Goal, true)
            .unwrap();

        let navigator = navigator_at_origin();
        let target = navigator
            .select_target(CellPos::new(0, 0), &knowledge)
            .unwrap();
        assert_eq!(target, CellPos::new(3, 3));
    }

    #[test]
    fn test_select_target_row_major_tie_break() {
        let mut knowledge = knowledge();
        knowledge
            .narrow(CellPos::new(0, 1), Attribute::Hazard, false)
            .unwrap();
        knowledge
            .narrow(CellPos::new(1, 0), Attribute::Hazard, false)
            .unwrap();

        let navigator = navigator_at_origin();
        // Both frontier cells are safe at distance 1; (0,1) wins the
        // row-major tie, and repeated calls agree.
        for _ in 0..3 {
            let target = navigator
                .select_target(CellPos::new(0, 0), &knowledge)
                .unwrap();
            assert_eq!(target, CellPos::new(0, 1));
        }
    }

    #[test]
    fn test_select_target_prefers_safe_over_closer_risky() {
        let mut navigator = Navigator::new();
        navigator.record_visit(CellPos::new(0, 0));
        navigator.record_visit(CellPos::new(0, 1));
        navigator.record_visit(CellPos::new(0, 2));

        let mut knowledge = knowledge();
        // Only the far frontier cell is known safe.
        knowledge
            .narrow(CellPos::new(0, 3), Attribute::Hazard, false)
            .unwrap();

        let target = navigator
            .select_target(CellPos::new(0, 0), &knowledge)
            .unwrap();
        assert_eq!(target, CellPos::new(0, 3));
    }

    #[test]
    fn test_select_target_risky_fallback() {
        let navigator = navigator_at_origin();
        let knowledge = knowledge();

        // No safe knowledge at all: the nearest unknown frontier cell
        // is accepted as a calculated risk.
        let target = navigator
            .select_target(CellPos::new(0, 0), &knowledge)
            .unwrap();
        assert_eq!(target, CellPos::new(0, 1));
    }

    #[test]
    fn test_select_target_no_reachable_target() {
        let navigator = navigator_at_origin();
        let mut knowledge = knowledge();
        knowledge
            .narrow(CellPos::new(0, 1), Attribute::Hazard, true)
            .unwrap();
        knowledge
            .narrow(CellPos::new(1, 0), Attribute::Hazard, true)
            .unwrap();

        let err = navigator
            .select_target(CellPos::new(0, 0), &knowledge)
            .unwrap_err();
        assert!(matches!(err, NavigationError::NoReachableTarget));
    }

    #[test]
    fn test_plan_path_adjacent_target_is_single_move() {
        let navigator = navigator_at_origin();
        let path = navigator
            .plan_path(dims(), CellPos::new(0, 0), CellPos::new(0, 1))
            .unwrap();
        assert_eq!(path, vec![Move::Right]);

        let down = navigator
            .plan_path(dims(), CellPos::new(0, 0), CellPos::new(1, 0))
            .unwrap();
        assert_eq!(down, vec![Move::Down]);
    }

    #[test]
    fn test_plan_path_walks_visited_region() {
        let mut navigator = Navigator::new();
        for col in 0..4 {
            navigator.record_visit(CellPos::new(0, col));
        }

        // From the far end of the visited row back toward a frontier
        // cell below the entry.
        let path = navigator
            .plan_path(dims(), CellPos::new(0, 3), CellPos::new(1, 0))
            .unwrap();
        assert_eq!(path, vec![Move::Left, Move::Left, Move::Left, Move::Down]);
    }

    #[test]
    fn test_plan_path_unreachable_without_visited_neighbors() {
        let navigator = navigator_at_origin();
        let err = navigator
            .plan_path(dims(), CellPos::new(0, 0), CellPos::new(4, 4))
            .unwrap_err();
        assert!(matches!(err, NavigationError::PathUnavailable { .. }));
    }

    #[test]
    fn test_next_move_drains_one_per_call() {
        let mut navigator = Navigator::new();
        navigator.record_visit(CellPos::new(0, 0));
        navigator.record_visit(CellPos::new(0, 1));

        let mut knowledge = knowledge();
        knowledge
            .narrow(CellPos::new(0, 2), Attribute::Hazard, false)
            .unwrap();

        // Agent sits at (0,0); the only safe frontier cell is (0,2),
        // two steps away through (0,1).
        let first = navigator.next_move(CellPos::new(0, 0), &knowledge).unwrap();
        assert_eq!(first, Move::Right);
        assert_eq!(navigator.phase(), NavPhase::Executing);
        assert_eq!(navigator.queued_moves(), 1);

        let second = navigator.next_move(CellPos::new(0, 1), &knowledge).unwrap();
        assert_eq!(second, Move::Right);
        assert_eq!(navigator.phase(), NavPhase::Idle);
        assert_eq!(navigator.queued_moves(), 0);
    }

    #[test]
    fn test_next_move_failure_leaves_navigator_idle() {
        let mut navigator = Navigator::new();
        navigator.record_visit(CellPos::new(0, 0));

        let mut knowledge = knowledge();
        knowledge
            .narrow(CellPos::new(0, 1), Attribute::Hazard, true)
            .unwrap();
        knowledge
            .narrow(CellPos::new(1, 0), Attribute::Hazard, true)
            .unwrap();

        let err = navigator
            .next_move(CellPos::new(0, 0), &knowledge)
            .unwrap_err();
        assert!(err.is_navigation());
        assert_eq!(navigator.phase(), NavPhase::Idle);
        assert_eq!(navigator.queued_moves(), 0);
    }
}
