//! Collisional line-mixing kernels for rotational-vibrational spectral bands.
//!
//! Builds the collisional relaxation matrix `W` for the lines of one
//! molecular band from fitted, branch-resolved coupling tables, and derives
//! the first-order line-mixing coefficients that correct a Lorentzian-sum
//! absorption model for coupling between nearby lines. The fitted tables
//! follow the (W0, B0) parameterization of doi:10.1016/j.jqsrt.2014.09.017.

pub mod band;
pub mod branch;
pub mod error;
pub mod mixing;
pub mod relaxation;
pub mod selection;
pub mod tables;
pub mod wigner;

pub use band::{
    BandMixingInput, VibrationalQuanta, band_first_order_coefficients, band_supports_line_mixing,
    group_lines_by_band,
};
pub use branch::{Branch, BranchPair};
pub use error::LineMixingError;
pub use mixing::{MixingCoefficientInput, first_order_mixing_coefficients};
pub use relaxation::{RelaxationMatrix, RelaxationMatrixInput, build_relaxation_matrix};
pub use selection::SpinStatisticsFilter;
pub use tables::{
    CouplingSurface, CouplingTableIoError, CouplingTableSet, DenseCouplingSurface,
    MAX_BAND_INDEX, MAX_ROTATIONAL_QUANTUM, SparseCouplingSurface, load_coupling_tables,
    save_coupling_tables,
};
pub use wigner::{rigid_rotor_dipole_matrix_element, wigner_3j};
