//! First-order line-mixing coefficients.
//!
//! Combines the relaxation matrix with relative dipole strengths and line
//! separations into one correction coefficient per line, following equation
//! 6 of doi:10.1016/j.jqsrt.2004.11.011.

use crate::error::{LineMixingError, check_length};
use crate::relaxation::RelaxationMatrix;
use crate::selection::SpinStatisticsFilter;

/// Floor on the line separation entering the 1/dv factor.
///
/// Separations below this magnitude are replaced by the (positive) floor
/// itself; the sign of a near-zero negative separation is not preserved.
/// This mirrors the reference kernel's singularity guard exactly.
const SEPARATION_EPSILON: f64 = 1.0e-4;

#[derive(Debug, Clone)]
pub struct MixingCoefficientInput<'a> {
    /// HITRAN local isotopologue id; selects the spin-statistics rule.
    pub isotopologue: u32,
    /// Transition dipole strengths; used via absolute value, must be
    /// non-zero since every line's strength divides its partners'.
    pub dipole_magnitude: &'a [f64],
    /// Lower-state rotational quantum numbers (caller's original view).
    pub j_initial: &'a [u32],
    /// Line center positions.
    pub position: &'a [f64],
}

impl MixingCoefficientInput<'_> {
    pub fn line_count(&self) -> usize {
        self.j_initial.len()
    }

    fn validate(&self) -> Result<(), LineMixingError> {
        let n = self.j_initial.len();
        if n == 0 {
            return Err(LineMixingError::EmptyLineSet);
        }
        check_length("dipole_magnitude", n, self.dipole_magnitude.len())?;
        check_length("position", n, self.position.len())?;
        for (index, &value) in self.dipole_magnitude.iter().enumerate() {
            if value == 0.0 {
                return Err(LineMixingError::ZeroDipoleMagnitude { index });
            }
        }
        Ok(())
    }
}

/// Computes the first-order mixing coefficient vector `Y` from a built
/// relaxation matrix.
///
/// `Y[i]` sums `2 * |d_j| / |d_i| * W[j][i] / (v_i - v_j)` over every
/// partner line `j` permitted by the spin-statistics rule, with the
/// separation clamped away from zero. The values carry no inherent
/// normalization; callers scale by pressure.
pub fn first_order_mixing_coefficients(
    input: &MixingCoefficientInput<'_>,
    w: &RelaxationMatrix,
) -> Result<Vec<f64>, LineMixingError> {
    input.validate()?;
    let n = input.line_count();
    if w.nrows() != n || w.ncols() != n {
        return Err(LineMixingError::MatrixShapeMismatch {
            rows: w.nrows(),
            cols: w.ncols(),
            expected: n,
        });
    }

    let filter = SpinStatisticsFilter::for_isotopologue(input.isotopologue);
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut total = 0.0;
        for j in 0..n {
            if j == i {
                continue;
            }
            if !filter.allows(input.j_initial[i], input.j_initial[j]) {
                continue;
            }
            let mut dv = input.position[i] - input.position[j];
            if dv.abs() < SEPARATION_EPSILON {
                dv = SEPARATION_EPSILON;
            }
            total += 2.0 * input.dipole_magnitude[j].abs() / input.dipole_magnitude[i].abs()
                * w[(j, i)]
                / dv;
        }
        y[i] = total;
    }
    Ok(y)
}
