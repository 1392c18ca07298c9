//! Sensory percepts revealed by occupying a cell.
//!
//! A cell reveals at most two flags: a warning (some neighbor holds a
//! hazard) and a glow (the goal is in some neighbor). The agent never
//! senses anything about cells it has not stood on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::CellPos;

/// A single sensory flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Percept {
    /// A hazard occupies at least one adjacent cell.
    Warn,
    /// The goal occupies an adjacent cell.
    Glow,
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Glow => write!(f, "glow"),
        }
    }
}

/// The subset of percepts present at one cell, possibly empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerceptSet {
    /// Whether the warning flag is present.
    pub warn: bool,
    /// Whether the glow flag is present.
    pub glow: bool,
}

impl PerceptSet {
    /// No percepts at all.
    pub const EMPTY: Self = Self {
        warn: false,
        glow: false,
    };

    /// Creates a percept set from its two flags.
    #[must_use]
    pub const fn new(warn: bool, glow: bool) -> Self {
        Self { warn, glow }
    }

    /// Only the warning flag.
    #[must_use]
    pub const fn warn_only() -> Self {
        Self::new(true, false)
    }

    /// Only the glow flag.
    #[must_use]
    pub const fn glow_only() -> Self {
        Self::new(false, true)
    }

    /// Both flags.
    #[must_use]
    pub const fn both() -> Self {
        Self::new(true, true)
    }

    /// Returns true if the given percept is present.
    #[must_use]
    pub const fn contains(self, percept: Percept) -> bool {
        match percept {
            Percept::Warn => self.warn,
            Percept::Glow => self.glow,
        }
    }

    /// Returns true if no percept is present.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.warn && !self.glow
    }
}

impl fmt::Display for PerceptSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.warn, self.glow) {
            (false, false) => write!(f, "{{}}"),
            (true, false) => write!(f, "{{warn}}"),
            (false, true) => write!(f, "{{glow}}"),
            (true, true) => write!(f, "{{warn, glow}}"),
        }
    }
}

impl From<Percept> for PerceptSet {
    fn from(percept: Percept) -> Self {
        match percept {
            Percept::Warn => Self::warn_only(),
            Percept::Glow => Self::glow_only(),
        }
    }
}

/// A one-time assertion tying the sensed percepts to an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The cell the agent stands on.
    pub cell: CellPos,
    /// The percepts actually sensed there.
    pub percepts: PerceptSet,
}

impl Observation {
    /// Creates an observation for `cell` with the given percepts.
    #[must_use]
    pub const fn new(cell: CellPos, percepts: PerceptSet) -> Self {
        Self { cell, percepts }
    }

    /// An observation with no percepts.
    #[must_use]
    pub const fn empty(cell: CellPos) -> Self {
        Self::new(cell, PerceptSet::EMPTY)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.percepts, self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percept_set_contains() {
        let set = PerceptSet::warn_only();
        assert!(set.contains(Percept::Warn));
        assert!(!set.contains(Percept::Glow));
        assert!(!set.is_empty());
        assert!(PerceptSet::EMPTY.is_empty());
    }

    #[test]
    fn test_percept_set_display() {
        assert_eq!(format!("{}", PerceptSet::EMPTY), "{}");
        assert_eq!(format!("{}", PerceptSet::warn_only()), "{warn}");
        assert_eq!(format!("{}", PerceptSet::glow_only()), "{glow}");
        assert_eq!(format!("{}", PerceptSet::both()), "{warn, glow}");
    }

    #[test]
    fn test_observation_display() {
        let obs = Observation::new(CellPos::new(0, 1), PerceptSet::warn_only());
        assert_eq!(format!("{obs}"), "{warn} at (0,1)");
    }

    #[test]
    fn test_percept_set_from_percept() {
        assert_eq!(PerceptSet::from(Percept::Glow), PerceptSet::glow_only());
        assert_eq!(PerceptSet::from(Percept::Warn), PerceptSet::warn_only());
    }
}
