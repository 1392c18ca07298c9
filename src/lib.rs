//! # Gridseer
//!
//! Gridseer is an autonomous exploration agent for partially
//! observable rectangular grids. The grid hides hazard cells and a
//! single goal cell; the agent senses only two local flags on the cell
//! it occupies (a warning for adjacent hazards, a glow for the
//! adjacent goal) and must reason its way to the goal.
//!
//! ## Core Concepts
//!
//! - **Domain**: a tri-state belief (`False`/`True`/`Unknown`) held
//!   for one boolean attribute of one cell; domains only ever narrow
//! - **Inference Engine**: accepts per-cell observations and runs
//!   worklist constraint propagation over a fixed rule set
//! - **Navigator**: owns the exploration history, picks targets from
//!   knowledge snapshots, and plans one move sequence at a time
//! - **Session**: one engine plus one navigator, deciding one move per
//!   turn
//!
//! ## Usage
//!
//! ```rust
//! use gridseer::{Board, CellPos, GridDims, Outcome, Session};
//!
//! let dims = GridDims::new(5, 5).unwrap();
//! // A fixture board: goal at (0,2), no hazards.
//! let mut board = Board::with_layout(dims, CellPos::new(0, 2), []).unwrap();
//! let mut session = Session::new(dims);
//!
//! loop {
//!     let position = board.agent_position();
//!     let percepts = board.current_percepts();
//!     let mv = session.next_move(position, percepts).unwrap();
//!     if board.apply(mv).unwrap() == Outcome::Win {
//!         break;
//!     }
//! }
//! assert!(session.turns() <= 25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod domain;
pub mod error;
pub mod grid;
pub mod knowledge;
pub mod percept;

// Inference and navigation
pub mod engine;
pub mod navigator;

// Session wiring and diagnostics
pub mod report;
pub mod session;

// World scaffold
pub mod board;

// Re-export primary types at crate root for convenience
pub use board::{Board, Outcome, ScenarioConfig};
pub use domain::{Attribute, Domain, DomainConflict, Narrowing};
pub use engine::{InferenceEngine, PropagationStats};
pub use error::{InferenceError, NavigationError, SeerError, SeerResult, ValidationError};
pub use grid::{CellPos, GridDims, Move};
pub use knowledge::{CellBeliefs, KnowledgeGrid};
pub use navigator::{NavPhase, Navigator, VisitedSet};
pub use percept::{Observation, Percept, PerceptSet};
pub use report::{KnowledgeReport, ReportCell};
pub use session::{Session, SessionId};
