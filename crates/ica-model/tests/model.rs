//! Tests for ica-model spec serialization and loading.

use std::io::Write;

use ica_model::{
    NormalizationSpec, NumericColumns, NumericFormat, ParseMode, Preset, SpecError,
};

#[test]
fn spec_serializes_with_snake_case_tags() {
    let spec = NormalizationSpec::new("IN022")
        .with_column("Ano", "ano")
        .with_integer_field("ano")
        .with_numeric_fields(["IN022"]);
    insta::assert_json_snapshot!(spec, @r#"
    {
      "columns": [
        {
          "source": "Ano",
          "target": "ano"
        }
      ],
      "integer_fields": [
        "ano"
      ],
      "numeric": {
        "named": [
          "IN022"
        ]
      },
      "categorical_fields": [],
      "target": "IN022",
      "numeric_format": {
        "decimal_separator": ","
      },
      "parse_mode": "strict"
    }
    "#);
}

#[test]
fn presets_round_trip_through_json() {
    for preset in Preset::ALL {
        let spec = preset.spec();
        let json = spec.to_json_pretty().expect("serialize spec");
        let round = NormalizationSpec::from_json_str(&json).expect("parse spec");
        assert_eq!(round, spec, "{}", preset.name());
    }
}

#[test]
fn minimal_json_fills_defaults() {
    let json = r#"{
        "target": "IN022",
        "columns": [{"source": "Consumo", "target": "IN022"}],
        "numeric_format": {"decimal_separator": ",", "thousands_separator": "."},
        "parse_mode": "lenient"
    }"#;
    let spec = NormalizationSpec::from_json_str(json).expect("parse spec");
    assert_eq!(spec.numeric, NumericColumns::Named(Vec::new()));
    assert_eq!(spec.numeric_format, NumericFormat::grouped());
    assert_eq!(spec.parse_mode, ParseMode::Lenient);
    assert!(spec.sentinel_filter.is_none());
}

#[test]
fn positional_json_uses_offset_object() {
    let json = r#"{"target": "IN022", "numeric": {"positional": {"offset": 10}}}"#;
    let spec = NormalizationSpec::from_json_str(json).expect("parse spec");
    assert_eq!(spec.numeric, NumericColumns::Positional { offset: 10 });
}

#[test]
fn from_json_str_validates() {
    let json = r#"{
        "target": "IN022",
        "columns": [{"source": "Consumo", "target": "consumo"}]
    }"#;
    let err = NormalizationSpec::from_json_str(json).unwrap_err();
    assert!(matches!(err, SpecError::UnknownField { .. }));
    assert_eq!(err.to_string(), "target field 'IN022' is not an output column");
}

#[test]
fn from_json_str_reports_malformed_json() {
    let err = NormalizationSpec::from_json_str("{\"target\": ").unwrap_err();
    assert!(matches!(err, SpecError::Json(_)));
}

#[test]
fn from_json_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let json = Preset::WaterConsumptionGrouped
        .spec()
        .to_json_pretty()
        .expect("serialize spec");
    write!(file, "{json}").expect("write spec");

    let spec = NormalizationSpec::from_json_path(file.path()).expect("load spec");
    assert_eq!(spec, Preset::WaterConsumptionGrouped.spec());
}

#[test]
fn from_json_path_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");
    let err = NormalizationSpec::from_json_path(&path).unwrap_err();
    assert!(matches!(err, SpecError::Io { .. }));
}
