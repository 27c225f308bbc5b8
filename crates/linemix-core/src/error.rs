/// Domain violations detected at the boundary of the line-mixing kernels.
///
/// Every variant is deterministic for a given input set; there is no retry
/// concept and no partially-built matrix is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineMixingError {
    #[error("line set must contain at least one line")]
    EmptyLineSet,
    #[error("temperature must be positive, got {0}")]
    NonPositiveTemperature(f64),
    #[error("array '{field}' has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("population must be positive, got {value} for line {index}")]
    NonPositivePopulation { index: usize, value: f64 },
    #[error("dipole magnitude must be non-zero for line {index}")]
    ZeroDipoleMagnitude { index: usize },
    #[error("rotational quantum number {value} for line {index} exceeds bound {bound}")]
    RotationalQuantumOutOfRange { index: usize, value: u32, bound: u32 },
    #[error("vibrational band index {value} exceeds bound {bound}")]
    BandIndexOutOfRange { value: u32, bound: u32 },
    #[error(
        "coupling table lookup out of bounds at (lower_band={lower_band}, upper_band={upper_band}, j_row={j_row}, j_col={j_col})"
    )]
    TableLookupOutOfBounds {
        lower_band: u32,
        upper_band: u32,
        j_row: u32,
        j_col: u32,
    },
    #[error("relaxation matrix is {rows}x{cols}, expected {expected}x{expected}")]
    MatrixShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
    },
}

pub(crate) fn check_length(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), LineMixingError> {
    if expected == actual {
        Ok(())
    } else {
        Err(LineMixingError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LineMixingError, check_length};

    #[test]
    fn check_length_reports_field_and_sizes() {
        assert_eq!(check_length("position", 3, 3), Ok(()));
        assert_eq!(
            check_length("position", 3, 2),
            Err(LineMixingError::LengthMismatch {
                field: "position",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn error_messages_name_the_offending_line() {
        let error = LineMixingError::NonPositivePopulation {
            index: 4,
            value: -0.25,
        };
        assert_eq!(
            error.to_string(),
            "population must be positive, got -0.25 for line 4"
        );
    }
}
