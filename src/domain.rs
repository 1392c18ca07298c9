//! Tri-state belief domains.
//!
//! Every boolean attribute of every cell carries a [`Domain`]: `False`,
//! `True`, or `Unknown` (consistent with both truth values given the
//! observations so far). Domains only ever narrow. `Unknown` may become
//! `False` or `True`; a fixed value never changes again. Attempting to
//! narrow a fixed domain to the opposite value is a [`DomainConflict`],
//! which the engine surfaces as a contradiction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The belief held for one boolean attribute of one cell.
///
/// # Examples
///
/// ```
/// use gridseer::{Domain, Narrowing};
///
/// let mut domain = Domain::Unknown;
/// assert_eq!(domain.narrow(true), Ok(Narrowing::Narrowed));
/// assert_eq!(domain, Domain::True);
///
/// // Narrowing to the same value is a no-op.
/// assert_eq!(domain.narrow(true), Ok(Narrowing::Unchanged));
///
/// // Narrowing to the opposite value is a conflict.
/// assert!(domain.narrow(false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// The attribute is known to be absent.
    False,
    /// The attribute is known to be present.
    True,
    /// Both truth values remain consistent with the observations.
    Unknown,
}

impl Domain {
    /// Returns true once the domain has been fixed to `False` or `True`.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns true while the domain is still open.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The fixed truth value, if any.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::False => Some(false),
            Self::True => Some(true),
            Self::Unknown => None,
        }
    }

    /// The domain fixed to a known truth value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// Narrows the domain to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainConflict`] if the domain is already fixed to the
    /// opposite value.
    pub fn narrow(&mut self, value: bool) -> Result<Narrowing, DomainConflict> {
        match (*self, value) {
            (Self::Unknown, _) => {
                *self = Self::from_bool(value);
                Ok(Narrowing::Narrowed)
            }
            (Self::True, true) | (Self::False, false) => Ok(Narrowing::Unchanged),
            (Self::True, false) => Err(DomainConflict {
                fixed: true,
                attempted: false,
            }),
            (Self::False, true) => Err(DomainConflict {
                fixed: false,
                attempted: true,
            }),
        }
    }

    /// Stable single-byte encoding used for snapshot digests.
    #[must_use]
    pub(crate) const fn as_byte(self) -> u8 {
        match self {
            Self::False => 0,
            Self::True => 1,
            Self::Unknown => 2,
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::False => write!(f, "false"),
            Self::True => write!(f, "true"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of a successful narrowing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    /// The domain was already fixed to the requested value.
    Unchanged,
    /// The domain moved from `Unknown` to a fixed value.
    Narrowed,
}

impl Narrowing {
    /// Returns true if the narrowing changed the domain.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Narrowed)
    }
}

/// An attempt to narrow a domain against its fixed value.
///
/// Carries no position or attribute; the knowledge store attaches that
/// context when it converts the conflict into a contradiction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainConflict {
    /// The value the domain is fixed to.
    pub fixed: bool,
    /// The value the narrowing attempted to force.
    pub attempted: bool,
}

/// The four belief attributes tracked per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// A hazard occupies the cell.
    Hazard,
    /// The goal occupies the cell.
    Goal,
    /// The cell carries the warning percept.
    Warn,
    /// The cell carries the glow percept.
    Glow,
}

impl Attribute {
    /// All attributes, in snapshot encoding order.
    pub const ALL: [Self; 4] = [Self::Hazard, Self::Goal, Self::Warn, Self::Glow];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hazard => write!(f, "hazard"),
            Self::Goal => write!(f, "goal"),
            Self::Warn => write!(f, "warn"),
            Self::Glow => write!(f, "glow"),
        }
    }
}
