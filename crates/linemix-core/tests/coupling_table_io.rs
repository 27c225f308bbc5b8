//! Persistence round-trip for the dense coupling tables.

use linemix_core::{
    Branch, BranchPair, CouplingTableIoError, CouplingTableSet, DenseCouplingSurface,
    load_coupling_tables, save_coupling_tables,
};

fn populated_tables() -> CouplingTableSet<DenseCouplingSurface> {
    let mut tables = CouplingTableSet::<DenseCouplingSurface>::zeros(2, 16);
    let rr = BranchPair::new(Branch::R, Branch::R);
    let pq = BranchPair::new(Branch::P, Branch::Q);
    tables
        .reference_rate_log_mut(rr)
        .set(0, 1, 6, 4, -0.35)
        .expect("cell in extent");
    tables
        .temperature_exponent_mut(rr)
        .set(0, 1, 6, 4, 0.72)
        .expect("cell in extent");
    tables
        .reference_rate_log_mut(pq)
        .set(1, 1, 12, 3, 0.15)
        .expect("cell in extent");
    tables
}

#[test]
fn dense_tables_survive_a_save_load_round_trip() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("coupling_tables.json");

    let original = populated_tables();
    save_coupling_tables(&path, &original).expect("save");
    let restored = load_coupling_tables(&path).expect("load");

    assert_eq!(restored, original);

    let rr = BranchPair::new(Branch::R, Branch::R);
    let logt = (296.0_f64 / 220.0).ln();
    let expected = original.scaled_rate(rr, 0, 1, 6, 4, logt).expect("rate");
    let actual = restored.scaled_rate(rr, 0, 1, 6, 4, logt).expect("rate");
    assert_eq!(expected.to_bits(), actual.to_bits());
}

#[test]
fn malformed_table_files_report_a_parse_error() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("coupling_tables.json");
    std::fs::write(&path, "{ not json").expect("write fixture");

    let error = load_coupling_tables(&path).expect_err("parse must fail");
    assert!(matches!(error, CouplingTableIoError::Parse { .. }));
}

#[test]
fn missing_table_files_report_a_read_error() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("does_not_exist.json");

    let error = load_coupling_tables(&path).expect_err("read must fail");
    assert!(matches!(error, CouplingTableIoError::Read { .. }));
}
