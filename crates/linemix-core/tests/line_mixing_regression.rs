//! End-to-end regression values for the relaxation-matrix and mixing
//! pipelines, pinned against hand-computed results for a small fixture.

use linemix_core::{
    BandMixingInput, Branch, BranchPair, CouplingTableSet, MixingCoefficientInput,
    RelaxationMatrixInput, SparseCouplingSurface, band_first_order_coefficients,
    build_relaxation_matrix, first_order_mixing_coefficients,
};

fn assert_scalar_close(label: &str, expected: f64, actual: f64) {
    assert!(
        (actual - expected).abs() <= 1.0e-12,
        "{label} expected={expected:.15e} actual={actual:.15e}"
    );
}

fn three_line_tables() -> CouplingTableSet<SparseCouplingSurface> {
    let mut tables = CouplingTableSet::<SparseCouplingSurface>::default();
    let rr = BranchPair::new(Branch::R, Branch::R);
    let rp = BranchPair::new(Branch::R, Branch::P);
    tables
        .reference_rate_log_mut(rr)
        .insert(0, 1, 6, 4, 0.5_f64.ln());
    tables
        .reference_rate_log_mut(rp)
        .insert(0, 1, 6, 2, 0.2_f64.ln());
    tables
        .reference_rate_log_mut(rp)
        .insert(0, 1, 4, 2, 0.3_f64.ln());
    tables
}

fn three_line_relaxation_input() -> RelaxationMatrixInput<'static> {
    RelaxationMatrixInput {
        temperature: 296.0,
        isotopologue: 1,
        initial_band: 0,
        final_band: 1,
        j_initial: &[6, 4, 2],
        j_final: &[7, 5, 1],
        half_width: &[0.07, 0.06, 0.05],
        population: &[0.5, 0.3, 0.2],
        weight: &[1.0, 0.8, 0.6],
    }
}

#[test]
fn relaxation_matrix_matches_pinned_values() {
    let input = three_line_relaxation_input();
    let w = build_relaxation_matrix(&input, &three_line_tables()).expect("build");

    let expected = [
        [0.07, -0.112_179_487_179_487_18, -0.067_307_692_307_692_3],
        [-0.067_307_692_307_692_3, 0.06, 0.160_448_717_948_717_94],
        [-0.026_923_076_923_076_92, 0.106_965_811_965_811_96, 0.05],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            assert_scalar_close(&format!("W[{i}][{j}]"), value, w[(i, j)]);
        }
    }

    // Diagonal entries are the half-widths; coupled off-diagonal pairs obey
    // detailed balance through the population ratios.
    for i in 0..3 {
        assert_scalar_close(&format!("diagonal {i}"), input.half_width[i], w[(i, i)]);
        for j in 0..3 {
            if i == j || w[(j, i)] == 0.0 {
                continue;
            }
            assert_scalar_close(
                &format!("balance ({i},{j})"),
                input.population[i] / input.population[j],
                w[(i, j)] / w[(j, i)],
            );
        }
    }
}

#[test]
fn mixing_coefficients_match_pinned_values() {
    let w = build_relaxation_matrix(&three_line_relaxation_input(), &three_line_tables())
        .expect("build");
    let input = MixingCoefficientInput {
        isotopologue: 1,
        dipole_magnitude: &[1.0, 0.5, 0.25],
        j_initial: &[6, 4, 2],
        position: &[1000.0, 1000.3, 1001.0],
    };

    let y = first_order_mixing_coefficients(&input, &w).expect("coefficients");
    assert_scalar_close("y[0]", 0.237_820_512_820_512_8, y[0]);
    assert_scalar_close("y[1]", -1.648_534_798_534_798_6, y[1]);
    assert_scalar_close("y[2]", 0.378_388_278_388_278_4, y[2]);
}

#[test]
fn pipeline_is_bitwise_deterministic_across_runs() {
    let tables = three_line_tables();
    let band_input = BandMixingInput {
        temperature: 250.0,
        pressure: 0.8,
        isotopologue: 1,
        initial_band: 0,
        final_band: 1,
        j_initial: &[6, 4, 2],
        j_final: &[7, 5, 1],
        position: &[1000.0, 1000.3, 1001.0],
        dipole_magnitude: &[1.0, 0.5, 0.25],
        half_width: &[0.07, 0.06, 0.05],
        population: &[0.5, 0.3, 0.2],
        weight: &[1.0, 0.8, 0.6],
    };

    let first = band_first_order_coefficients(&band_input, &tables).expect("first run");
    let second = band_first_order_coefficients(&band_input, &tables).expect("second run");
    for (index, (a, b)) in first.iter().zip(&second).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "y[{index}] differs between runs");
    }
}

#[test]
fn single_line_band_has_width_diagonal_and_zero_coefficient() {
    let tables = CouplingTableSet::<SparseCouplingSurface>::default();
    let input = BandMixingInput {
        temperature: 296.0,
        pressure: 1.0,
        isotopologue: 1,
        initial_band: 0,
        final_band: 1,
        j_initial: &[4],
        j_final: &[5],
        position: &[1012.5],
        dipole_magnitude: &[0.4],
        half_width: &[0.08],
        population: &[1.0],
        weight: &[1.0],
    };

    let y = band_first_order_coefficients(&input, &tables).expect("coefficients");
    assert_eq!(y, vec![0.0]);

    let w = build_relaxation_matrix(
        &RelaxationMatrixInput {
            temperature: input.temperature,
            isotopologue: input.isotopologue,
            initial_band: input.initial_band,
            final_band: input.final_band,
            j_initial: input.j_initial,
            j_final: input.j_final,
            half_width: input.half_width,
            population: input.population,
            weight: input.weight,
        },
        &tables,
    )
    .expect("build");
    assert_scalar_close("W[0][0]", 0.08, w[(0, 0)]);
}
