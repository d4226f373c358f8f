//! End-to-end pipeline tests for resume2pdf.
//!
//! These run the real `generate()` pipeline against a throwaway directory,
//! substituting stub commands (`true`, `false`, a missing binary) for the
//! `resumed` renderer. No network, no browser, no real renderer needed —
//! everything the crate itself is responsible for is exercised hermetically.

use resume2pdf::pipeline::stages;
use resume2pdf::{generate, PipelineConfig, Resume2PdfError};
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Canonical 2-space-pretty resume content, the shape the pipeline itself
/// writes. Using it as input makes the success path byte-exact.
fn resume_with_pdf_url() -> String {
    serde_json::to_string_pretty(&serde_json::json!({
        "basics": {
            "pdfUrl": "https://x/y.pdf",
            "name": "A"
        },
        "work": []
    }))
    .unwrap()
}

fn resume_without_pdf_url() -> String {
    serde_json::to_string_pretty(&serde_json::json!({
        "basics": { "name": "A" }
    }))
    .unwrap()
}

fn config_in(dir: &Path, renderer: &str) -> PipelineConfig {
    PipelineConfig::builder()
        .resume_path(dir.join("resume.json"))
        .renderer_command(renderer)
        .build()
        .expect("valid config")
}

/// The pipeline's exit invariant: no backup, no stash, document byte-identical.
fn assert_clean_state(config: &PipelineConfig, original: &str, context: &str) {
    assert_eq!(
        std::fs::read_to_string(&config.resume_path).unwrap(),
        original,
        "[{context}] document must be byte-for-byte its original content"
    );
    assert!(
        !config.backup_path.exists(),
        "[{context}] backup file must not survive the run"
    );
    assert!(
        !config.stash_path.exists(),
        "[{context}] stash file must not survive the run"
    );
}

// ── Success paths ────────────────────────────────────────────────────────────

#[test]
fn successful_run_with_field_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    let original = resume_with_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    let report = generate(&config).expect("pipeline should succeed");

    assert_eq!(report.removed_field.as_deref(), Some("https://x/y.pdf"));
    assert_clean_state(&config, &original, "success-with-field");
}

#[test]
fn successful_run_restores_field_to_its_original_slot() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    // pdfUrl leads a multi-key basics: appending it back, or letting the
    // removal swap unrelated keys around, both change the bytes
    let original = serde_json::to_string_pretty(&serde_json::json!({
        "basics": {
            "pdfUrl": "https://x/y.pdf",
            "name": "A",
            "email": "a@x"
        },
        "work": []
    }))
    .unwrap();
    std::fs::write(&config.resume_path, &original).unwrap();

    generate(&config).expect("pipeline should succeed");

    assert_clean_state(&config, &original, "success-field-position");
}

#[test]
fn successful_run_without_field_never_creates_a_stash() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    let original = resume_without_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    let report = generate(&config).expect("pipeline should succeed");

    assert_eq!(report.removed_field, None, "no field, nothing removed");
    assert_clean_state(&config, &original, "success-without-field");
}

#[test]
fn report_serialises_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    std::fs::write(&config.resume_path, resume_with_pdf_url()).unwrap();

    let report = generate(&config).unwrap();
    let json = serde_json::to_string_pretty(&report).expect("report must serialise");
    assert!(json.contains("https://x/y.pdf"));
    assert!(json.contains("render_duration_ms"));
}

// ── Failure paths ────────────────────────────────────────────────────────────

#[test]
fn renderer_failure_rolls_back_to_original() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "false");
    let original = resume_with_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    let err = generate(&config).expect_err("false exits non-zero");
    assert!(
        matches!(err, Resume2PdfError::RendererFailed { .. }),
        "got: {err}"
    );
    assert_clean_state(&config, &original, "renderer-failure");
}

#[test]
fn missing_renderer_binary_rolls_back_to_original() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "resume2pdf-no-such-renderer");
    let original = resume_with_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    let err = generate(&config).expect_err("spawn must fail");
    assert!(
        matches!(err, Resume2PdfError::RendererSpawnFailed { .. }),
        "got: {err}"
    );
    assert_clean_state(&config, &original, "missing-renderer");
}

#[test]
fn invalid_json_document_rolls_back_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    // backup succeeds (byte copy), field removal then fails to parse
    let original = "{ this is not json";
    std::fs::write(&config.resume_path, original).unwrap();

    let err = generate(&config).expect_err("parse must fail");
    assert!(
        matches!(err, Resume2PdfError::InvalidDocument { .. }),
        "got: {err}"
    );
    assert_clean_state(&config, original, "invalid-json");
}

#[test]
fn missing_document_fails_before_any_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");

    let err = generate(&config).expect_err("no document to render");
    assert!(
        matches!(err, Resume2PdfError::DocumentNotFound { .. }),
        "got: {err}"
    );
    assert!(!config.backup_path.exists());
    assert!(!config.stash_path.exists());
}

// ── Interrupt path ───────────────────────────────────────────────────────────

/// The CLI's signal handler runs `stages::rollback` and exits; delivering a
/// real signal to the test process would kill the harness, so this pins the
/// equivalent guarantee: rollback from the field-removed state restores the
/// original document and sweeps the temp files.
#[test]
fn rollback_after_field_removal_restores_original() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    let original = resume_with_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    stages::backup(&config).unwrap();
    stages::remove_field(&config).unwrap();
    assert!(config.stash_path.exists(), "precondition: mid-pipeline state");

    stages::rollback(&config);

    assert_clean_state(&config, &original, "interrupt-rollback");
}

/// Rollback must be idempotent: the handler may race a pipeline that
/// already completed.
#[test]
fn rollback_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "true");
    let original = resume_with_pdf_url();
    std::fs::write(&config.resume_path, &original).unwrap();

    generate(&config).unwrap();
    stages::rollback(&config);
    stages::rollback(&config);

    assert_clean_state(&config, &original, "post-run-rollback");
}
