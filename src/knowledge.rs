//! The per-cell knowledge store.
//!
//! A [`KnowledgeGrid`] owns one [`CellBeliefs`] record per cell in a
//! row-major array. It stores and bounds-checks; all reasoning lives in
//! the engine. Snapshots are plain value copies (`Clone`), and a blake3
//! digest over the domain bytes gives cheap, stable snapshot equality.

use serde::{Deserialize, Serialize};

use crate::domain::{Attribute, Domain, Narrowing};
use crate::error::{InferenceError, SeerError, SeerResult, ValidationError};
use crate::grid::{CellPos, GridDims};

/// The four belief domains held for a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBeliefs {
    /// Whether a hazard occupies the cell.
    pub hazard: Domain,
    /// Whether the goal occupies the cell.
    pub goal: Domain,
    /// Whether the cell carries the warning percept.
    pub warn: Domain,
    /// Whether the cell carries the glow percept.
    pub glow: Domain,
}

impl CellBeliefs {
    /// Reads the domain for one attribute.
    #[must_use]
    pub const fn get(self, attribute: Attribute) -> Domain {
        match attribute {
            Attribute::Hazard => self.hazard,
            Attribute::Goal => self.goal,
            Attribute::Warn => self.warn,
            Attribute::Glow => self.glow,
        }
    }

    /// Returns true while every domain is still open.
    #[must_use]
    pub const fn is_fully_unknown(self) -> bool {
        self.hazard.is_unknown()
            && self.goal.is_unknown()
            && self.warn.is_unknown()
            && self.glow.is_unknown()
    }

    fn get_mut(&mut self, attribute: Attribute) -> &mut Domain {
        match attribute {
            Attribute::Hazard => &mut self.hazard,
            Attribute::Goal => &mut self.goal,
            Attribute::Warn => &mut self.warn,
            Attribute::Glow => &mut self.glow,
        }
    }
}

/// Owned, value-semantics store of belief domains for a whole grid.
///
/// Created once per session with every domain `Unknown`, mutated only
/// through observation and propagation, and never resized. Cloning
/// yields an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGrid {
    dims: GridDims,
    cells: Vec<CellBeliefs>,
}

impl KnowledgeGrid {
    /// Creates a store for `dims` with every domain `Unknown`.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![CellBeliefs::default(); dims.cell_count()],
        }
    }

    /// The grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Reads the belief record at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] for out-of-grid
    /// positions.
    pub fn get(&self, pos: CellPos) -> Result<CellBeliefs, ValidationError> {
        if !self.dims.contains(pos) {
            return Err(ValidationError::InvalidCoordinate {
                cell: pos,
                dims: self.dims,
            });
        }
        Ok(self.cells[self.dims.index_of(pos)])
    }

    /// Reads the belief record at an in-grid position.
    ///
    /// Internal fast path for the engine, which only produces in-grid
    /// positions.
    pub(crate) fn beliefs(&self, pos: CellPos) -> CellBeliefs {
        self.cells[self.dims.index_of(pos)]
    }

    /// Narrows one domain, attaching cell and attribute context to any
    /// conflict.
    pub(crate) fn narrow(
        &mut self,
        pos: CellPos,
        attribute: Attribute,
        value: bool,
    ) -> SeerResult<Narrowing> {
        if !self.dims.contains(pos) {
            return Err(SeerError::Validation(ValidationError::InvalidCoordinate {
                cell: pos,
                dims: self.dims,
            }));
        }
        let index = self.dims.index_of(pos);
        self.cells[index]
            .get_mut(attribute)
            .narrow(value)
            .map_err(|conflict| {
                SeerError::Inference(InferenceError::Contradiction {
                    cell: pos,
                    attribute,
                    fixed: conflict.fixed,
                    attempted: conflict.attempted,
                })
            })
    }

    /// Iterates every cell in row-major order with its position.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, CellBeliefs)> + '_ {
        self.dims
            .positions()
            .map(move |pos| (pos, self.cells[self.dims.index_of(pos)]))
    }

    /// Stable content digest of the snapshot.
    ///
    /// Two stores with identical dimensions and identical domains
    /// produce identical digests, so digest equality is snapshot
    /// equality.
    #[must_use]
    pub fn digest(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.dims.rows() as u64).to_le_bytes());
        hasher.update(&(self.dims.cols() as u64).to_le_bytes());
        for cell in &self.cells {
            for attribute in Attribute::ALL {
                hasher.update(&[cell.get(attribute).as_byte()]);
            }
        }
        hasher.finalize()
    }
}
