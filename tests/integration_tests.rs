use analyst_eval::core::evaluator::evaluate_with_config;
use analyst_eval::core::presets::{QuestionPreset, COURT_QUESTION_KEYS};
use analyst_eval::domain::model::RunState;
use analyst_eval::{
    Band, CliConfig, EvaluationReport, Evaluator, HttpSubmissionSource, LocalStorage,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

const PLOT: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

fn cli_config(api_url: String, output_path: &str, question_file: String) -> CliConfig {
    CliConfig {
        api_url,
        question_file,
        preset: None,
        output_path: output_path.to_string(),
        report_file: "evaluation_results.json".to_string(),
        timeout_secs: 5,
        health_check: false,
        json_logs: false,
        verbose: false,
    }
}

fn read_report(output_path: &str) -> EvaluationReport {
    let full_path = std::path::Path::new(output_path).join("evaluation_results.json");
    assert!(full_path.exists());
    let data = std::fs::read(full_path).unwrap();
    serde_json::from_slice(&data).unwrap()
}

#[tokio::test]
async fn test_end_to_end_full_marks_with_question_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let question_path = temp_dir.path().join("question.txt");
    std::fs::write(&question_path, QuestionPreset::Films.text()).unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/")
            .body_contains("filename=\"question.txt\"")
            .body_contains("List_of_highest-grossing_films");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([1, "Titanic", 0.485782, PLOT]));
    });

    let config = cli_config(
        server.url("/api/"),
        &output_path,
        question_path.to_str().unwrap().to_string(),
    );
    let report = evaluate_with_config(&config).await;

    api_mock.assert();
    assert!(report.success);
    assert_eq!(report.score, 20);
    assert_eq!(report.max_score, 20);
    assert_eq!(report.percentage, 100.0);
    assert_eq!(report.band, Some(Band::Excellent));
    assert_eq!(report.details, "Evaluation completed successfully");

    let saved = read_report(&output_path);
    assert_eq!(saved, report);
    assert_eq!(saved.response, Some(json!([1, "Titanic", 0.485782, PLOT])));
}

#[tokio::test]
async fn test_end_to_end_partial_score_written_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200)
            .json_body(json!([2, "Unknown", 0.9, PLOT]));
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Films);
    let report = evaluate_with_config(&config).await;

    assert!(report.success);
    assert_eq!(report.score, 8);
    assert_eq!(report.band, Some(Band::NeedsWork));

    let raw: serde_json::Value = serde_json::from_slice(
        &std::fs::read(temp_dir.path().join("evaluation_results.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["score"], 8);
    assert_eq!(raw["max_score"], 20);
    assert_eq!(raw["percentage"], 40.0);
    assert_eq!(raw["band"], "needs work");
    assert_eq!(raw["criteria"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_end_to_end_server_error_scores_zero() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(500).body("{\"detail\": \"Analysis failed\"}");
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Films);
    let report = evaluate_with_config(&config).await;

    api_mock.assert();
    assert!(!report.success);
    assert_eq!(report.score, 0);
    assert!(report.details.starts_with("API request failed: API returned status 500"));
    assert!(report.response.is_none());
    assert_eq!(read_report(&output_path), report);
}

#[tokio::test]
async fn test_end_to_end_missing_question_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(json!([]));
    });

    let config = cli_config(
        server.url("/api/"),
        &output_path,
        temp_dir.path().join("absent.txt").to_str().unwrap().to_string(),
    );
    let report = evaluate_with_config(&config).await;

    api_mock.assert_hits(0);
    assert!(!report.success);
    assert!(report.details.starts_with("API request failed: IO error"));
}

#[tokio::test]
async fn test_end_to_end_structural_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(json!([1, "Titanic", 0.485782]));
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Films);
    let report = evaluate_with_config(&config).await;

    assert!(!report.success);
    assert_eq!(report.score, 0);
    assert_eq!(
        report.details,
        "Failed structural validation - not a 4-element array (array has 3 elements, expected 4)"
    );
    assert_eq!(report.response, Some(json!([1, "Titanic", 0.485782])));
}

#[tokio::test]
async fn test_end_to_end_court_object_is_unscored() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut answer = serde_json::Map::new();
    answer.insert(COURT_QUESTION_KEYS[0].to_string(), json!("33_10"));
    answer.insert(COURT_QUESTION_KEYS[1].to_string(), json!(0.5));
    answer.insert(COURT_QUESTION_KEYS[2].to_string(), json!(PLOT));

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/")
            .body_contains("filename=\"court_question.txt\"");
        then.status(200).json_body(serde_json::Value::Object(answer));
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Court);
    let report = evaluate_with_config(&config).await;

    api_mock.assert();
    assert!(!report.success);
    assert_eq!(report.score, 0);
    assert!(report.details.contains("not scored by the 4-element rubric"));
    assert!(report.details.contains("3/3 expected answers present, plot data URI: true"));
}

#[tokio::test]
async fn test_end_to_end_health_check_failure_skips_evaluation() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let health_mock = server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(503);
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(json!([1, "Titanic", 0.485782, PLOT]));
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Films);
    config.health_check = true;
    let report = evaluate_with_config(&config).await;

    health_mock.assert();
    api_mock.assert_hits(0);
    assert!(!report.success);
    assert!(report.details.starts_with("API health check failed: API returned status 503"));
    assert_eq!(read_report(&output_path), report);
}

#[tokio::test]
async fn test_end_to_end_health_check_then_evaluate() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let health_mock = server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200).json_body(json!({"status": "healthy"}));
    });
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(json!([1, "Titanic", 0.485782, PLOT]));
    });

    let mut config = cli_config(server.url("/api/"), &output_path, String::new());
    config.preset = Some(QuestionPreset::Films);
    config.health_check = true;
    let report = evaluate_with_config(&config).await;

    health_mock.assert();
    api_mock.assert();
    assert_eq!(report.score, 20);
}

#[tokio::test]
async fn test_evaluator_over_http_source() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(json!([1, "Avatar", 0.485782, PLOT]));
    });

    let source = HttpSubmissionSource::new(
        server.url("/api/"),
        QuestionPreset::Films.source(),
        Duration::from_secs(5),
    )
    .unwrap();
    let mut evaluator = Evaluator::new(
        source,
        LocalStorage::new(output_path.clone()),
        "evaluation_results.json".to_string(),
    );

    assert_eq!(evaluator.state(), RunState::Pending);
    let report = evaluator.run().await;
    assert_eq!(evaluator.state(), RunState::Complete);
    assert_eq!(report.score, 16);
    assert_eq!(report.band, Some(Band::Good));
    assert_eq!(read_report(&output_path), report);
}
