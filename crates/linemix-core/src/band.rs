//! Per-band driver over the relaxation-matrix and mixing-coefficient
//! kernels.
//!
//! The fitted coupling tables only cover low vibrational indices and
//! adjacent band pairs; everything outside that range gets zero
//! coefficients. Lines are processed in descending intensity order, the
//! ordering the tables were fitted against, and the results are scattered
//! back to the caller's order and scaled by pressure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LineMixingError, check_length};
use crate::mixing::{MixingCoefficientInput, first_order_mixing_coefficients};
use crate::relaxation::{RelaxationMatrixInput, build_relaxation_matrix};
use crate::tables::{CouplingSurface, CouplingTableSet};

/// Largest vibrational index covered by the fitted tables.
const MAX_FITTED_BAND_INDEX: u32 = 8;

/// Whether the fitted tables cover the given band pair.
pub fn band_supports_line_mixing(initial_band: u32, final_band: u32) -> bool {
    initial_band <= MAX_FITTED_BAND_INDEX
        && final_band <= MAX_FITTED_BAND_INDEX
        && initial_band.abs_diff(final_band) <= 1
}

/// Vibrational quantum numbers identifying one state of a linear molecule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VibrationalQuanta {
    pub v1: u32,
    pub v2: u32,
    pub l2: u32,
    pub v3: u32,
}

/// Groups line indices by their (upper, lower) vibrational state pair.
///
/// Each value is the list of line indices belonging to that band, in input
/// order, ready to drive one [`band_first_order_coefficients`] call per band.
pub fn group_lines_by_band(
    upper_state: &[VibrationalQuanta],
    lower_state: &[VibrationalQuanta],
) -> Result<BTreeMap<(VibrationalQuanta, VibrationalQuanta), Vec<usize>>, LineMixingError> {
    check_length("lower_state", upper_state.len(), lower_state.len())?;
    let mut bands: BTreeMap<_, Vec<usize>> = BTreeMap::new();
    for (index, (&upper, &lower)) in upper_state.iter().zip(lower_state).enumerate() {
        bands.entry((upper, lower)).or_default().push(index);
    }
    Ok(bands)
}

/// Per-line inputs for one band, in the caller's own line order.
#[derive(Debug, Clone)]
pub struct BandMixingInput<'a> {
    /// Temperature [K].
    pub temperature: f64,
    /// Total pressure [atm]; scales the final coefficients.
    pub pressure: f64,
    /// HITRAN local isotopologue id.
    pub isotopologue: u32,
    pub initial_band: u32,
    pub final_band: u32,
    /// Lower-state rotational quantum numbers.
    pub j_initial: &'a [u32],
    /// Upper-state rotational quantum numbers.
    pub j_final: &'a [u32],
    /// Line center positions.
    pub position: &'a [f64],
    /// Transition dipole strengths.
    pub dipole_magnitude: &'a [f64],
    /// Pressure-broadened half-widths.
    pub half_width: &'a [f64],
    /// Relative lower-state populations, strictly positive.
    pub population: &'a [f64],
    /// Sum-rule weights.
    pub weight: &'a [f64],
}

impl BandMixingInput<'_> {
    pub fn line_count(&self) -> usize {
        self.j_initial.len()
    }

    fn validate_lengths(&self) -> Result<(), LineMixingError> {
        let n = self.j_initial.len();
        if n == 0 {
            return Err(LineMixingError::EmptyLineSet);
        }
        check_length("j_final", n, self.j_final.len())?;
        check_length("position", n, self.position.len())?;
        check_length("dipole_magnitude", n, self.dipole_magnitude.len())?;
        check_length("half_width", n, self.half_width.len())?;
        check_length("population", n, self.population.len())?;
        check_length("weight", n, self.weight.len())?;
        Ok(())
    }
}

/// Computes pressure-scaled first-order mixing coefficients for one band,
/// returned in the caller's line order.
///
/// Bands outside the fitted range get an all-zero vector rather than an
/// error, so callers can sweep a whole line list without special-casing.
pub fn band_first_order_coefficients<S: CouplingSurface>(
    input: &BandMixingInput<'_>,
    tables: &CouplingTableSet<S>,
) -> Result<Vec<f64>, LineMixingError> {
    input.validate_lengths()?;
    let n = input.line_count();

    if !band_supports_line_mixing(input.initial_band, input.final_band) {
        debug!(
            initial_band = input.initial_band,
            final_band = input.final_band,
            lines = n,
            "band outside the fitted table range, coefficients set to zero"
        );
        return Ok(vec![0.0; n]);
    }

    // Strongest lines first; ties keep the caller's relative order.
    let intensity: Vec<f64> = (0..n)
        .map(|i| input.position[i] * input.population[i] * input.dipole_magnitude[i].powi(2))
        .collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by(|&a, &b| intensity[b].total_cmp(&intensity[a]).then(a.cmp(&b)));

    let gather_u32 = |source: &[u32]| -> Vec<u32> { order.iter().map(|&k| source[k]).collect() };
    let gather_f64 = |source: &[f64]| -> Vec<f64> { order.iter().map(|&k| source[k]).collect() };

    let j_initial = gather_u32(input.j_initial);
    let j_final = gather_u32(input.j_final);
    let position = gather_f64(input.position);
    let dipole_magnitude = gather_f64(input.dipole_magnitude);
    let half_width = gather_f64(input.half_width);
    let population = gather_f64(input.population);
    let weight = gather_f64(input.weight);

    let w = build_relaxation_matrix(
        &RelaxationMatrixInput {
            temperature: input.temperature,
            isotopologue: input.isotopologue,
            initial_band: input.initial_band,
            final_band: input.final_band,
            j_initial: &j_initial,
            j_final: &j_final,
            half_width: &half_width,
            population: &population,
            weight: &weight,
        },
        tables,
    )?;
    let sorted_y = first_order_mixing_coefficients(
        &MixingCoefficientInput {
            isotopologue: input.isotopologue,
            dipole_magnitude: &dipole_magnitude,
            j_initial: &j_initial,
            position: &position,
        },
        &w,
    )?;

    let mut y = vec![0.0; n];
    for (k, &line) in order.iter().enumerate() {
        y[line] = sorted_y[k] * input.pressure;
    }
    debug!(
        initial_band = input.initial_band,
        final_band = input.final_band,
        lines = n,
        "computed first-order mixing coefficients"
    );
    Ok(y)
}
