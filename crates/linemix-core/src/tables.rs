//! Read-only 4-D coupling-coefficient tables.
//!
//! The fitted parameterization provides, per branch pair, a
//! reference-temperature log-rate surface (W0) and a temperature-scaling
//! exponent surface (B0), both indexed by
//! `(lower_band, upper_band, j_row, j_col)`. The lookup sits behind the
//! [`CouplingSurface`] trait so bounds checking stays centralized and the
//! backing store (dense array, sparse map) can change without touching the
//! kernels.

use crate::branch::BranchPair;
use crate::error::LineMixingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest vibrational band index any table addresses.
pub const MAX_BAND_INDEX: u32 = 9;
/// Largest rotational quantum number any table addresses.
pub const MAX_ROTATIONAL_QUANTUM: u32 = 130;

pub trait CouplingSurface {
    /// Value at `(lower_band, upper_band, j_row, j_col)`, or `None` when the
    /// backend does not cover that cell.
    fn value(&self, lower_band: u32, upper_band: u32, j_row: u32, j_col: u32) -> Option<f64>;
}

/// Dense row-major backend. The two leading dimensions cover vibrational
/// band indices, the two trailing ones rotational quantum numbers; backends
/// smaller than the global bounds are legal and simply reject lookups
/// outside their extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseCouplingSurface {
    band_dimension: usize,
    rotational_dimension: usize,
    values: Vec<f64>,
}

impl DenseCouplingSurface {
    pub fn zeros(band_dimension: usize, rotational_dimension: usize) -> Self {
        let len = band_dimension * band_dimension * rotational_dimension * rotational_dimension;
        Self {
            band_dimension,
            rotational_dimension,
            values: vec![0.0; len],
        }
    }

    pub fn band_dimension(&self) -> usize {
        self.band_dimension
    }

    pub fn rotational_dimension(&self) -> usize {
        self.rotational_dimension
    }

    pub fn set(
        &mut self,
        lower_band: u32,
        upper_band: u32,
        j_row: u32,
        j_col: u32,
        value: f64,
    ) -> Result<(), LineMixingError> {
        let offset = self.offset(lower_band, upper_band, j_row, j_col).ok_or(
            LineMixingError::TableLookupOutOfBounds {
                lower_band,
                upper_band,
                j_row,
                j_col,
            },
        )?;
        self.values[offset] = value;
        Ok(())
    }

    fn offset(&self, lower_band: u32, upper_band: u32, j_row: u32, j_col: u32) -> Option<usize> {
        let (a, b) = (lower_band as usize, upper_band as usize);
        let (row, col) = (j_row as usize, j_col as usize);
        if a >= self.band_dimension
            || b >= self.band_dimension
            || row >= self.rotational_dimension
            || col >= self.rotational_dimension
        {
            return None;
        }
        Some(
            ((a * self.band_dimension + b) * self.rotational_dimension + row)
                * self.rotational_dimension
                + col,
        )
    }
}

impl CouplingSurface for DenseCouplingSurface {
    fn value(&self, lower_band: u32, upper_band: u32, j_row: u32, j_col: u32) -> Option<f64> {
        self.offset(lower_band, upper_band, j_row, j_col)
            .map(|offset| self.values[offset])
    }
}

/// Sparse backend: unlisted cells read as zero, which leaves the scaled rate
/// at `exp(0) = 1` for an admissible pair. Covers the full global bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseCouplingSurface {
    entries: BTreeMap<(u32, u32, u32, u32), f64>,
}

impl SparseCouplingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lower_band: u32, upper_band: u32, j_row: u32, j_col: u32, value: f64) {
        self.entries
            .insert((lower_band, upper_band, j_row, j_col), value);
    }
}

impl CouplingSurface for SparseCouplingSurface {
    fn value(&self, lower_band: u32, upper_band: u32, j_row: u32, j_col: u32) -> Option<f64> {
        if lower_band > MAX_BAND_INDEX
            || upper_band > MAX_BAND_INDEX
            || j_row > MAX_ROTATIONAL_QUANTUM
            || j_col > MAX_ROTATIONAL_QUANTUM
        {
            return None;
        }
        Some(
            self.entries
                .get(&(lower_band, upper_band, j_row, j_col))
                .copied()
                .unwrap_or(0.0),
        )
    }
}

/// The nine W0 (reference-temperature log-rate) and nine B0
/// (temperature-scaling exponent) surfaces of one fitted table family,
/// addressed by branch pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingTableSet<S> {
    reference_rate_log: [S; BranchPair::COUNT],
    temperature_exponent: [S; BranchPair::COUNT],
}

impl<S> CouplingTableSet<S> {
    pub fn new(
        reference_rate_log: [S; BranchPair::COUNT],
        temperature_exponent: [S; BranchPair::COUNT],
    ) -> Self {
        Self {
            reference_rate_log,
            temperature_exponent,
        }
    }

    pub fn reference_rate_log(&self, pair: BranchPair) -> &S {
        &self.reference_rate_log[pair.index()]
    }

    pub fn reference_rate_log_mut(&mut self, pair: BranchPair) -> &mut S {
        &mut self.reference_rate_log[pair.index()]
    }

    pub fn temperature_exponent(&self, pair: BranchPair) -> &S {
        &self.temperature_exponent[pair.index()]
    }

    pub fn temperature_exponent_mut(&mut self, pair: BranchPair) -> &mut S {
        &mut self.temperature_exponent[pair.index()]
    }
}

impl CouplingTableSet<DenseCouplingSurface> {
    pub fn zeros(band_dimension: usize, rotational_dimension: usize) -> Self {
        Self::new(
            std::array::from_fn(|_| {
                DenseCouplingSurface::zeros(band_dimension, rotational_dimension)
            }),
            std::array::from_fn(|_| {
                DenseCouplingSurface::zeros(band_dimension, rotational_dimension)
            }),
        )
    }
}

impl Default for CouplingTableSet<SparseCouplingSurface> {
    fn default() -> Self {
        Self::new(
            std::array::from_fn(|_| SparseCouplingSurface::new()),
            std::array::from_fn(|_| SparseCouplingSurface::new()),
        )
    }
}

impl<S: CouplingSurface> CouplingTableSet<S> {
    /// Power-law temperature scaling applied in log space:
    /// `exp(w0 - b0 * logt)` with `logt = ln(296 / T)`.
    pub fn scaled_rate(
        &self,
        pair: BranchPair,
        lower_band: u32,
        upper_band: u32,
        j_row: u32,
        j_col: u32,
        logt: f64,
    ) -> Result<f64, LineMixingError> {
        let out_of_bounds = || LineMixingError::TableLookupOutOfBounds {
            lower_band,
            upper_band,
            j_row,
            j_col,
        };
        let w0 = self.reference_rate_log[pair.index()]
            .value(lower_band, upper_band, j_row, j_col)
            .ok_or_else(out_of_bounds)?;
        let b0 = self.temperature_exponent[pair.index()]
            .value(lower_band, upper_band, j_row, j_col)
            .ok_or_else(out_of_bounds)?;
        Ok((w0 - b0 * logt).exp())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CouplingTableIoError {
    #[error("failed to read coupling tables '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse coupling tables '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode coupling tables: {0}")]
    Encode(serde_json::Error),
    #[error("failed to write coupling tables '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn load_coupling_tables(
    path: impl AsRef<Path>,
) -> Result<CouplingTableSet<DenseCouplingSurface>, CouplingTableIoError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| CouplingTableIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| CouplingTableIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_coupling_tables(
    path: impl AsRef<Path>,
    tables: &CouplingTableSet<DenseCouplingSurface>,
) -> Result<(), CouplingTableIoError> {
    let path = path.as_ref();
    let encoded = serde_json::to_string(tables).map_err(CouplingTableIoError::Encode)?;
    fs::write(path, encoded).map_err(|source| CouplingTableIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}
