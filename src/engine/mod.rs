//! The inference engine.
//!
//! Owns the knowledge store, accepts observations, and runs worklist
//! fixed-point propagation over the fixed rule set. The worklist is
//! seeded by every cell an observation touches; popping a cell
//! re-evaluates the rules anchored at it and at each of its neighbors,
//! and any cell whose domain actually narrows is pushed back on. The
//! lattice is finite and narrowing-only, so propagation always
//! terminates, and a call with an empty worklist does zero work.

mod rules;

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::Attribute;
use crate::error::{SeerError, SeerResult, ValidationError};
use crate::grid::{CellPos, GridDims};
use crate::knowledge::{CellBeliefs, KnowledgeGrid};
use crate::percept::Observation;

/// Work performed by one [`InferenceEngine::propagate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationStats {
    /// Cells popped off the worklist.
    pub cells_processed: usize,
    /// Domains moved from `Unknown` to a fixed value.
    pub domains_narrowed: usize,
}

impl PropagationStats {
    /// Returns true if the call performed no work at all.
    #[must_use]
    pub const fn is_noop(self) -> bool {
        self.cells_processed == 0 && self.domains_narrowed == 0
    }
}

/// The inference engine: one per session.
///
/// # Examples
///
/// ```
/// use gridseer::{CellPos, Domain, GridDims, InferenceEngine, Observation};
///
/// let dims = GridDims::new(5, 5).unwrap();
/// let mut engine = InferenceEngine::new(dims);
///
/// engine
///     .declare_observation(Observation::empty(CellPos::new(0, 0)))
///     .unwrap();
/// engine.propagate().unwrap();
///
/// // An empty percept set clears the neighbors' hazard domains.
/// let beliefs = engine.query_cell(CellPos::new(0, 1)).unwrap();
/// assert_eq!(beliefs.hazard, Domain::False);
/// ```
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    knowledge: KnowledgeGrid,
    pending: VecDeque<CellPos>,
    queued: HashSet<CellPos>,
}

impl InferenceEngine {
    /// Creates an engine over a fully unknown knowledge store.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            knowledge: KnowledgeGrid::new(dims),
            pending: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    /// The grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.knowledge.dims()
    }

    /// Declares the percepts sensed at an occupied cell.
    ///
    /// Fixes `warn` and `glow` to the sensed flags, and `hazard` and
    /// `goal` to false: the agent standing on the cell means it holds
    /// neither. Declaring the same cell again with identical percepts
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidCoordinate`] if `cell` is outside
    ///   the grid; nothing is touched.
    /// - [`crate::InferenceError::Contradiction`] if the percepts
    ///   conflict with a previous declaration for the same cell.
    pub fn declare_observation(&mut self, observation: Observation) -> SeerResult<()> {
        let Observation { cell, percepts } = observation;
        if !self.dims().contains(cell) {
            return Err(SeerError::Validation(ValidationError::InvalidCoordinate {
                cell,
                dims: self.dims(),
            }));
        }
        debug!(%cell, %percepts, "observation declared");

        let mut changed = false;
        changed |= self
            .knowledge
            .narrow(cell, Attribute::Warn, percepts.warn)?
            .changed();
        changed |= self
            .knowledge
            .narrow(cell, Attribute::Glow, percepts.glow)?
            .changed();
        changed |= self
            .knowledge
            .narrow(cell, Attribute::Hazard, false)?
            .changed();
        changed |= self
            .knowledge
            .narrow(cell, Attribute::Goal, false)?
            .changed();

        if changed {
            self.enqueue(cell);
        }
        Ok(())
    }

    /// Runs rule propagation to a fixed point.
    ///
    /// Idempotent: a second call with no intervening observation pops
    /// nothing and leaves the snapshot digest unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InferenceError::Contradiction`] if a rule
    /// forces a domain against its fixed value.
    pub fn propagate(&mut self) -> SeerResult<PropagationStats> {
        let mut stats = PropagationStats::default();
        while let Some(cell) = self.pending.pop_front() {
            self.queued.remove(&cell);
            stats.cells_processed += 1;

            // Rules mentioning this cell: its own sensory rules, and
            // those of each neighbor it participates in.
            self.step(cell, &mut stats)?;
            let neighbors: Vec<CellPos> = self.dims().neighbors(cell).collect();
            for neighbor in neighbors {
                self.step(neighbor, &mut stats)?;
            }
        }
        if !stats.is_noop() {
            debug!(
                cells = stats.cells_processed,
                narrowed = stats.domains_narrowed,
                "propagation reached fixed point"
            );
        }
        Ok(stats)
    }

    fn step(&mut self, cell: CellPos, stats: &mut PropagationStats) -> SeerResult<()> {
        let forced = rules::evaluate(&self.knowledge, cell)?;
        for f in forced {
            if self.knowledge.narrow(f.cell, f.attribute, f.value)?.changed() {
                stats.domains_narrowed += 1;
                trace!(cell = %f.cell, attribute = %f.attribute, value = f.value, "domain narrowed");
                self.enqueue(f.cell);
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, cell: CellPos) {
        if self.queued.insert(cell) {
            self.pending.push_back(cell);
        }
    }

    /// Reads the belief record for one cell.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] for out-of-grid
    /// positions.
    pub fn query_cell(&self, pos: CellPos) -> SeerResult<CellBeliefs> {
        Ok(self.knowledge.get(pos)?)
    }

    /// Returns an independent snapshot of the whole knowledge store.
    #[must_use]
    pub fn query_all(&self) -> KnowledgeGrid {
        self.knowledge.clone()
    }

    /// Stable digest of the current knowledge snapshot.
    #[must_use]
    pub fn digest(&self) -> blake3::Hash {
        self.knowledge.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::error::InferenceError;
    use crate::percept::PerceptSet;

    fn engine() -> InferenceEngine {
        InferenceEngine::new(GridDims::new(5, 5).unwrap())
    }

    #[test]
    fn test_observation_fixes_own_cell() {
        let mut engine = engine();
        let cell = CellPos::new(2, 2);
        engine
            .declare_observation(Observation::new(cell, PerceptSet::warn_only()))
            .unwrap();
        engine.propagate().unwrap();

        let beliefs = engine.query_cell(cell).unwrap();
        assert_eq!(beliefs.warn, Domain::True);
        assert_eq!(beliefs.glow, Domain::False);
        assert_eq!(beliefs.hazard, Domain::False);
        assert_eq!(beliefs.goal, Domain::False);
    }

    #[test]
    fn test_observation_out_of_grid_has_no_effect() {
        let mut engine = engine();
        let before = engine.digest();
        let err = engine
            .declare_observation(Observation::empty(CellPos::new(9, 9)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(engine.digest(), before);
    }

    #[test]
    fn test_reobservation_same_percepts_is_noop() {
        let mut engine = engine();
        let cell = CellPos::new(1, 1);
        engine
            .declare_observation(Observation::empty(cell))
            .unwrap();
        engine.propagate().unwrap();
        let digest = engine.digest();

        engine
            .declare_observation(Observation::empty(cell))
            .unwrap();
        let stats = engine.propagate().unwrap();
        assert!(stats.is_noop());
        assert_eq!(engine.digest(), digest);
    }

    #[test]
    fn test_reobservation_contradictory_percepts_fails() {
        let mut engine = engine();
        let cell = CellPos::new(1, 1);
        engine
            .declare_observation(Observation::empty(cell))
            .unwrap();

        let err = engine
            .declare_observation(Observation::new(cell, PerceptSet::glow_only()))
            .unwrap_err();
        assert!(matches!(
            err,
            SeerError::Inference(InferenceError::Contradiction {
                attribute: Attribute::Glow,
                ..
            })
        ));
    }

    #[test]
    fn test_propagate_on_fresh_engine_is_noop() {
        let mut engine = engine();
        let stats = engine.propagate().unwrap();
        assert!(stats.is_noop());
    }

    #[test]
    fn test_propagation_cascades_through_neighbors() {
        let mut engine = engine();
        // A warning at (0,1) with (0,0) and (0,2) eliminated leaves
        // (1,1) as the only hazard candidate.
        engine
            .declare_observation(Observation::new(CellPos::new(0, 1), PerceptSet::warn_only()))
            .unwrap();
        engine
            .declare_observation(Observation::empty(CellPos::new(0, 0)))
            .unwrap();
        engine
            .declare_observation(Observation::empty(CellPos::new(0, 2)))
            .unwrap();
        engine.propagate().unwrap();

        // (0,0) and (0,2) are clear, and warn-false at both removed
        // their own neighbors; only (1,1) can carry the hazard.
        assert_eq!(
            engine.query_cell(CellPos::new(1, 1)).unwrap().hazard,
            Domain::True
        );
    }

    #[test]
    fn test_query_all_is_detached() {
        let mut engine = engine();
        let snapshot = engine.query_all();
        engine
            .declare_observation(Observation::empty(CellPos::new(0, 0)))
            .unwrap();
        engine.propagate().unwrap();

        assert!(snapshot.get(CellPos::new(0, 0)).unwrap().is_fully_unknown());
    }
}
