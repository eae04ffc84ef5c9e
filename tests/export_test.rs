use aweighting::design::design_filter;
use aweighting::export::FILTER_TYPE;
use aweighting::simulation::impulse;
use aweighting::{CoefficientExport, RealtimeFilter, WeightingError};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("aweighting_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_json_round_trip_is_exact() {
    for fs in [44100.0, 48000.0, 96000.0] {
        let designed = design_filter(fs).unwrap();
        let record = CoefficientExport::from_coefficients(&designed.coefficients);
        let parsed = CoefficientExport::from_json(&record.to_json().unwrap()).unwrap();

        assert_eq!(parsed, record);
        assert_eq!(parsed.to_coefficients().unwrap(), designed.coefficients);
    }
}

#[test]
fn test_file_round_trip_binds_realtime_filter() {
    let designed = design_filter(48000.0).unwrap();
    let path = temp_path("export");
    CoefficientExport::from_coefficients(&designed.coefficients)
        .write(&path)
        .unwrap();

    let record = CoefficientExport::read(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(record.filter_type, FILTER_TYPE);
    assert_eq!(record.sample_rate, 48000);
    assert_eq!(record.order, 6);

    let mut from_file = RealtimeFilter::new();
    from_file
        .bind(&record.numerator_coeffs, &record.denominator_coeffs)
        .unwrap();
    let mut direct = RealtimeFilter::new();
    direct.bind_coefficients(&designed.coefficients);

    for x in impulse(256) {
        assert_eq!(from_file.process(x).unwrap(), direct.process(x).unwrap());
    }
}

#[test]
fn test_read_missing_file() {
    let result = CoefficientExport::read(temp_path("does_not_exist"));
    assert!(matches!(result, Err(WeightingError::Export(_))));
}

#[test]
fn test_tampered_record_rejected() {
    let designed = design_filter(48000.0).unwrap();
    let mut record = CoefficientExport::from_coefficients(&designed.coefficients);
    record.denominator_coeffs[0] = 2.0;
    assert!(matches!(
        record.to_coefficients(),
        Err(WeightingError::InvalidCoefficients(_))
    ));
}
