use std::io::Write;

use breakthrough_core::AnalysisParameters;

#[test]
fn defaults_match_the_bench_calibration() {
    let params = AnalysisParameters::default();
    assert_eq!(params.std_flow, 500.0);
    assert_eq!(params.flow_constant, 0.000_000_745);
    assert_eq!(params.reference_ppm, 10_800.0);
    assert_eq!(params.unit_scale, 1e-6);
    assert_eq!(params.molar_mass_nh3, 17.0);
    assert_eq!(params.flow_threshold_sccm, 4.0);
    assert_eq!(params.ppm_threshold, 20.0);
    assert_eq!(params.blank_time_s, 6.0);
}

#[test]
fn toml_overrides_a_subset_and_keeps_remaining_defaults() {
    let params = AnalysisParameters::from_toml_str(
        "blank_time_s = 4.0\nppm_threshold = 15.0\n",
    )
    .expect("constants parse failed");

    assert_eq!(params.blank_time_s, 4.0);
    assert_eq!(params.ppm_threshold, 15.0);
    assert_eq!(params.std_flow, 500.0);
    assert_eq!(params.molar_mass_nh3, 17.0);
}

#[test]
fn load_reads_a_constants_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "flow_threshold_sccm = 2.5").expect("write constants");

    let params = AnalysisParameters::load(file.path()).expect("load failed");
    assert_eq!(params.flow_threshold_sccm, 2.5);
    assert_eq!(params.blank_time_s, 6.0);
}

#[test]
fn unknown_keys_fall_back_to_defaults() {
    // Unknown keys are ignored, so a typo in a constants file leaves the
    // corresponding default in place.
    let params = AnalysisParameters::from_toml_str("std_flw = 9.9\n").expect("parse failed");
    assert_eq!(params.std_flow, 500.0);
}

#[test]
fn reference_molar_rate_combines_flow_constants() {
    let params = AnalysisParameters::default();
    let expected = 500.0 * 0.000_000_745 * 10_800.0 * 1e-6;
    assert!((params.reference_molar_rate() - expected).abs() < 1e-18);
}
