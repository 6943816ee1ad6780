use super::*;
use crate::models::{ResidualFileDto, ResidueCategory};

#[test]
fn app_error_keeps_code_and_context() {
    let error = AppError::new("residue_app_not_found", "application not found")
        .with_context("appName", "Slack");
    assert_eq!(error.code, "residue_app_not_found");
    assert_eq!(error.context.len(), 1);
    assert_eq!(error.context[0].key, "appName");
}

#[test]
fn result_ext_rewrites_code_and_preserves_cause() {
    let result: Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "denied",
    ));
    let error = result
        .with_code("log_dir_create_failed", "could not create log dir")
        .expect_err("error expected");
    assert_eq!(error.code, "log_dir_create_failed");
    assert!(error.causes.iter().any(|cause| cause.contains("denied")));
}

#[test]
fn from_anyhow_falls_back_to_internal_error() {
    let error = AppError::from_anyhow(anyhow::anyhow!("boom"));
    assert_eq!(error.code, "internal_error");
}

#[test]
fn from_anyhow_round_trips_app_error() {
    let original = AppError::new("stat_failed", "stat failed");
    let error = AppError::from_anyhow(anyhow::Error::new(original));
    assert_eq!(error.code, "stat_failed");
}

#[test]
fn error_payload_serializes_camel_case() {
    let error = AppError::new("read_dir_failed", "listing failed").with_cause("io oops");
    let value = serde_json::to_value(&error).expect("serialize");
    assert_eq!(value["code"], "read_dir_failed");
    assert_eq!(value["causes"][0], "io oops");
}

#[test]
fn residual_file_dto_serializes_snake_case_category() {
    let dto = ResidualFileDto {
        path: "/tmp/Slack".to_string(),
        category: ResidueCategory::Preferences,
        size_bytes: 42,
        match_reason: "exact_name".to_string(),
    };
    let value = serde_json::to_value(&dto).expect("serialize");
    assert_eq!(value["category"], "preferences");
    assert_eq!(value["sizeBytes"], 42);
    assert_eq!(value["matchReason"], "exact_name");
}
