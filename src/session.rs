//! Agent sessions.
//!
//! A [`Session`] wires exactly one inference engine and one navigator
//! together for the lifetime of a game. Each turn the surrounding loop
//! hands it the agent's position and the percepts sensed there, and it
//! answers with a single move. Sessions are strictly sequential; no
//! state is shared between them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::engine::InferenceEngine;
use crate::grid::{CellPos, GridDims, Move};
use crate::knowledge::KnowledgeGrid;
use crate::navigator::Navigator;
use crate::percept::{Observation, PerceptSet};
use crate::report::KnowledgeReport;
use crate::error::SeerResult;

/// Unique identifier for one agent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One exploration session over a fixed-size grid.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    turns: u64,
    engine: InferenceEngine,
    navigator: Navigator,
}

impl Session {
    /// Creates a fresh session for the given grid.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        let id = SessionId::new();
        debug!(session = %id, %dims, "session created");
        Self {
            id,
            started_at: Utc::now(),
            turns: 0,
            engine: InferenceEngine::new(dims),
            navigator: Navigator::new(),
        }
    }

    /// The session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// When the session was created.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Turns decided so far.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// The grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.engine.dims()
    }

    /// Read access to the inference engine.
    #[must_use]
    pub const fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Read access to the navigator.
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Decides one move from the agent's position and the percepts
    /// sensed there.
    ///
    /// Declares the observation, propagates to a fixed point, then
    /// lets the navigator emit the next queued move (planning a fresh
    /// path if none remain).
    ///
    /// # Errors
    ///
    /// Surfaces engine and navigator errors verbatim; validation
    /// errors leave the session untouched, everything else ends it.
    pub fn next_move(&mut self, position: CellPos, percepts: PerceptSet) -> SeerResult<Move> {
        self.engine
            .declare_observation(Observation::new(position, percepts))?;
        self.navigator.record_visit(position);
        self.engine.propagate()?;

        let snapshot = self.engine.query_all();
        let mv = self.navigator.next_move(position, &snapshot)?;

        self.turns += 1;
        debug!(session = %self.id, turn = self.turns, %position, %mv, "move decided");
        Ok(mv)
    }

    /// Snapshot of the full knowledge store.
    #[must_use]
    pub fn knowledge(&self) -> KnowledgeGrid {
        self.engine.query_all()
    }

    /// The on-demand diagnostic board dump.
    #[must_use]
    pub fn report(&self) -> KnowledgeReport {
        KnowledgeReport::from_knowledge(&self.engine.query_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDims {
        GridDims::new(5, 5).unwrap()
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_first_turn_from_origin() {
        let mut session = Session::new(dims());
        let mv = session
            .next_move(CellPos::new(0, 0), PerceptSet::EMPTY)
            .unwrap();
        // Both frontier cells are safe at distance 1; the row-major
        // tie-break picks (0,1).
        assert_eq!(mv, Move::Right);
        assert_eq!(session.turns(), 1);
    }

    #[test]
    fn test_invalid_position_leaves_session_untouched() {
        let mut session = Session::new(dims());
        let digest = session.engine().digest();

        let err = session
            .next_move(CellPos::new(5, 5), PerceptSet::EMPTY)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_fatal());
        assert_eq!(session.turns(), 0);
        assert_eq!(session.engine().digest(), digest);
        assert!(session.navigator().visited().is_empty());
    }

    #[test]
    fn test_report_matches_engine_state() {
        let mut session = Session::new(dims());
        session
            .next_move(CellPos::new(0, 0), PerceptSet::EMPTY)
            .unwrap();

        let report = session.report();
        let origin = report
            .cells()
            .iter()
            .find(|cell| cell.pos == CellPos::new(0, 0))
            .copied()
            .unwrap();
        assert_eq!(origin.hazard, crate::domain::Domain::False);
        assert_eq!(origin.goal, crate::domain::Domain::False);
    }
}
