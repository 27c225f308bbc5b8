//! Relaxation-matrix construction for one rotational-vibrational band.
//!
//! The matrix couples every pair of lines through branch-resolved fitted
//! rates, enforces detailed balance through the state populations, and is
//! renormalized so the weighted column sums satisfy the collisional sum
//! rule. Diagonal entries carry the pressure-broadened half-widths.

use crate::branch::{Branch, BranchPair};
use crate::error::{LineMixingError, check_length};
use crate::selection::SpinStatisticsFilter;
use crate::tables::{CouplingSurface, CouplingTableSet, MAX_BAND_INDEX, MAX_ROTATIONAL_QUANTUM};
use faer::Mat;

pub type RelaxationMatrix = Mat<f64>;

/// Reference temperature of the fitted coupling tables [K].
const REFERENCE_TEMPERATURE: f64 = 296.0;

/// Column-oriented per-line inputs for one band.
///
/// `initial_band`/`final_band` are the vibrational indices (`l2`) shared by
/// every line in the call; the per-line slices must all have one length.
#[derive(Debug, Clone)]
pub struct RelaxationMatrixInput<'a> {
    /// Temperature [K].
    pub temperature: f64,
    /// HITRAN local isotopologue id; selects the spin-statistics rule.
    pub isotopologue: u32,
    pub initial_band: u32,
    pub final_band: u32,
    /// Lower-state rotational quantum numbers.
    pub j_initial: &'a [u32],
    /// Upper-state rotational quantum numbers.
    pub j_final: &'a [u32],
    /// Pressure-broadened half-widths; become the matrix diagonal.
    pub half_width: &'a [f64],
    /// Relative state populations, strictly positive.
    pub population: &'a [f64],
    /// Sum-rule weights; only the magnitude enters the renormalization.
    pub weight: &'a [f64],
}

impl RelaxationMatrixInput<'_> {
    pub fn line_count(&self) -> usize {
        self.j_initial.len()
    }

    fn validate(&self) -> Result<(), LineMixingError> {
        let n = self.j_initial.len();
        if n == 0 {
            return Err(LineMixingError::EmptyLineSet);
        }
        if !(self.temperature > 0.0) {
            return Err(LineMixingError::NonPositiveTemperature(self.temperature));
        }
        check_length("j_final", n, self.j_final.len())?;
        check_length("half_width", n, self.half_width.len())?;
        check_length("population", n, self.population.len())?;
        check_length("weight", n, self.weight.len())?;
        for value in [self.initial_band, self.final_band] {
            if value > MAX_BAND_INDEX {
                return Err(LineMixingError::BandIndexOutOfRange {
                    value,
                    bound: MAX_BAND_INDEX,
                });
            }
        }
        for (index, (&ji, &jf)) in self.j_initial.iter().zip(self.j_final).enumerate() {
            for value in [ji, jf] {
                if value > MAX_ROTATIONAL_QUANTUM {
                    return Err(LineMixingError::RotationalQuantumOutOfRange {
                        index,
                        value,
                        bound: MAX_ROTATIONAL_QUANTUM,
                    });
                }
            }
        }
        for (index, &value) in self.population.iter().enumerate() {
            if !(value > 0.0) {
                return Err(LineMixingError::NonPositivePopulation { index, value });
            }
        }
        Ok(())
    }
}

/// Builds the n-by-n relaxation matrix `W` for the supplied line set.
///
/// Off-diagonal entries are population-scaled collisional transfer rates,
/// made non-positive (they are loss terms) and renormalized so the weighted
/// sums over each column's upper triangle balance the lower triangle plus
/// diagonal. `W[i][j] / W[j][i]` equals `population[i] / population[j]` for
/// every coupled pair; the renormalization rescales both partners by the
/// same factor, so the ratio survives it.
pub fn build_relaxation_matrix<S: CouplingSurface>(
    input: &RelaxationMatrixInput<'_>,
    tables: &CouplingTableSet<S>,
) -> Result<RelaxationMatrix, LineMixingError> {
    input.validate()?;
    let n = input.line_count();

    let lower_band = input.initial_band.min(input.final_band);
    let upper_band = input.initial_band.max(input.final_band);
    // The tables are fitted for the downward band direction. When the caller
    // supplies an upward pair the per-line arrays swap roles for ordering,
    // branch classification, and table indexing; the spin-statistics parity
    // check keeps reading the caller's original lower-state array.
    let (j_lower, j_upper) = if input.initial_band <= input.final_band {
        (input.j_initial, input.j_final)
    } else {
        (input.j_final, input.j_initial)
    };

    let logt = (REFERENCE_TEMPERATURE / input.temperature).ln();
    let filter = SpinStatisticsFilter::for_isotopologue(input.isotopologue);

    let mut w = RelaxationMatrix::zeros(n, n);
    for i in 0..n {
        let row_branch = Branch::classify(j_lower[i], j_upper[i]);
        for j in 0..n {
            if j_lower[j] > j_lower[i] {
                continue;
            }
            if !filter.allows(input.j_initial[i], input.j_initial[j]) {
                continue;
            }
            let pair = BranchPair::new(row_branch, Branch::classify(j_lower[j], j_upper[j]));
            let rate =
                tables.scaled_rate(pair, lower_band, upper_band, j_lower[i], j_lower[j], logt)?;
            w[(j, i)] = rate;
            w[(i, j)] = rate * input.population[i] / input.population[j];
        }
    }

    // Off-diagonal entries are loss contributions regardless of the raw
    // sign; the diagonal carries the pressure-broadened half-width.
    for i in 0..n {
        for j in 0..n {
            if i != j {
                w[(i, j)] = -w[(i, j)].abs();
            }
        }
        w[(i, i)] = input.half_width[i];
    }

    for i in 0..n {
        let mut sum_lower = 0.0;
        let mut sum_upper = 0.0;
        for j in 0..n {
            if !filter.allows(input.j_initial[i], input.j_initial[j]) {
                continue;
            }
            let term = input.weight[j].abs() * w[(j, i)];
            if j > i {
                sum_lower += term;
            } else {
                sum_upper += term;
            }
        }
        if sum_lower == 0.0 {
            for j in (i + 1)..n {
                w[(j, i)] = 0.0;
                w[(i, j)] = 0.0;
            }
        } else {
            let scale = -sum_upper / sum_lower;
            for j in (i + 1)..n {
                w[(j, i)] *= scale;
                w[(i, j)] = w[(j, i)] * input.population[i] / input.population[j];
            }
        }
    }

    Ok(w)
}
