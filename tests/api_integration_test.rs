// API integration tests that verify HTTP endpoints
// Tests the actual Axum router with real HTTP requests

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::fixture_tables;
use http_body_util::BodyExt; // For `.collect()`
use precip_qa_service::api::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt; // For `oneshot`

fn router_with_fixture() -> axum::Router {
    create_router(AppState {
        tables: Some(Arc::new(fixture_tables())),
    })
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = router_with_fixture();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_ask_against_preloaded_snapshot() {
    let app = router_with_fixture();

    let request_body = serde_json::json!({
        "question": "Compare the precipitation amount of state Uttar Pradesh and state \
                     Maharashtra in the second week of Nov 2025 in a table format."
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    let table = json["table"].as_array().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0]["State"], "Uttar Pradesh");
    assert_eq!(table[0]["Week Start"], "2025-11-08");
    assert_eq!(table[0]["Total Precipitation"], 7.0);
    assert_eq!(table[1]["State"], "Maharashtra");
    assert!(json["answer"]
        .as_str()
        .unwrap()
        .contains("Maharashtra had the higher total"));
}

#[tokio::test]
async fn test_ask_unrecognized_question_still_ok() {
    let app = router_with_fixture();

    let request_body = serde_json::json!({ "question": "asdkjasd random text" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Parse failure is a valid answer, not an HTTP error
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(json["table"].as_array().unwrap().is_empty());
    assert!(json["answer"].as_str().unwrap().contains("could not"));
}

#[tokio::test]
async fn test_ask_without_preloaded_snapshot_is_unavailable() {
    let app = create_router(AppState { tables: None });

    let request_body = serde_json::json!({ "question": "anything" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> (String, String) {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                ));
                body.push_str("Content-Type: text/csv\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n"
                ));
            }
        }
        body.push_str("\r\n");
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    (content_type, body)
}

const DAILY_CSV: &str = "\
Date,State,District,Daily Precipitation
2025-11-08,Uttar Pradesh,Lucknow,3.0
2025-11-09,Maharashtra,Mumbai,8.0
";

const MONTHLY_CSV: &str = "\
Year,Month,State,District,Monthly Precipitation
2001,8,Maharashtra,Pune,210.0
";

#[tokio::test]
async fn test_ask_upload_with_csv_tables() {
    // No preloaded snapshot; the uploaded tables alone are queried
    let app = create_router(AppState { tables: None });

    let (content_type, body) = multipart_body(&[
        (
            "question",
            None,
            "Compare the precipitation amount of state Uttar Pradesh and state Maharashtra \
             in the second week of Nov 2025 in a table format.",
        ),
        ("daily", Some("daily.csv"), DAILY_CSV),
        ("monthly", Some("monthly.csv"), MONTHLY_CSV),
    ]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask/upload")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    let table = json["table"].as_array().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0]["Total Precipitation"], 3.0);
    assert_eq!(table[1]["Total Precipitation"], 8.0);
}

#[tokio::test]
async fn test_ask_upload_without_question_is_bad_request() {
    let app = create_router(AppState { tables: None });

    let (content_type, body) = multipart_body(&[
        ("daily", Some("daily.csv"), DAILY_CSV),
        ("monthly", Some("monthly.csv"), MONTHLY_CSV),
    ]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask/upload")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ask_upload_without_tables_is_bad_request() {
    let app = create_router(AppState { tables: None });

    let (content_type, body) = multipart_body(&[("question", None, "anything")]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ask/upload")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
