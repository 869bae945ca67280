//! Integration tests for the gateway HTTP API.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use rstest::rstest;
use serde_json::{json, Value};
use spam_filter_gateway::api::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
use spam_filter_gateway::test_util::{test_state, RecordingClassifier};
use spam_filter_gateway::{app, AppState};
use tower::ServiceExt;

fn spy_app() -> (Router, Arc<RecordingClassifier>) {
    let classifier = Arc::new(RecordingClassifier::new());
    (app(test_state(classifier.clone())), classifier)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOW_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
}

fn assert_json(response: &Response) {
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_health_endpoint() {
    let classifier = Arc::new(RecordingClassifier::failing("classifier unreachable"));
    let app = app(test_state(classifier.clone()));

    let response = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);
    assert_eq!(body_json(response).await, json!({"status": "healthy"}));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_predict_passes_verdict_through() {
    let (app, classifier) = spy_app();

    let response = send(
        &app,
        Method::POST,
        "/api/predict",
        Some(r#"{"email_text": " Congratulations, you won! "}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);
    assert_eq!(
        body_json(response).await,
        json!({"is_spam": true, "confidence": 0.5, "label": " Congratulations, you won! "})
    );
    assert_eq!(classifier.inputs(), vec![" Congratulations, you won! ".to_string()]);
}

#[tokio::test]
async fn test_predict_without_content_type() {
    let (app, classifier) = spy_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict")
        .body(Body::from(r#"{"email_text": "hello"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["label"], "hello");
    assert_eq!(classifier.calls(), 1);
}

#[rstest]
#[case(r#"{"email_text": ""}"#)]
#[case(r#"{"email_text": "   \n\t  "}"#)]
#[case(r#"{}"#)]
#[case(r#"{"email_text": null}"#)]
#[case("null")]
#[tokio::test]
async fn test_blank_text_never_reaches_classifier(#[case] body: &str) {
    let (app, classifier) = spy_app();

    let response = send(&app, Method::POST, "/api/predict", Some(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);
    assert_eq!(body_json(response).await["error"], "Email text cannot be empty");
    assert_eq!(classifier.calls(), 0);
}

#[rstest]
#[case("not json at all")]
#[case(r#"{"email_text": "#)]
#[case(r#"{"email_text": ["a", "b"]}"#)]
#[case("")]
#[tokio::test]
async fn test_malformed_body_never_reaches_classifier(#[case] body: &str) {
    let (app, classifier) = spy_app();

    let response = send(&app, Method::POST, "/api/predict", Some(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(
        body_json(response).await,
        json!({"is_spam": false, "confidence": 0.0, "label": "", "error": "Invalid request body"})
    );
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_preflight() {
    let (app, classifier) = spy_app();

    let response = send(&app, Method::OPTIONS, "/api/predict", Some("{garbage")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_json(&response);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(classifier.calls(), 0);
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[case(Method::PATCH)]
#[case(Method::HEAD)]
#[tokio::test]
async fn test_other_methods_not_allowed(#[case] method: Method) {
    let (app, classifier) = spy_app();

    let response = send(&app, method, "/api/predict", Some(r#"{"email_text": "hi"}"#)).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_method_not_allowed_body() {
    let (app, _) = spy_app();

    let response = send(&app, Method::GET, "/api/predict", None).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_json(&response);
    assert_eq!(body_json(response).await["error"], "Method not allowed");
}

#[rstest]
#[case(Method::POST)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[tokio::test]
async fn test_health_other_methods_not_allowed(#[case] method: Method) {
    let (app, _) = spy_app();

    let response = send(&app, method, "/api/health", None).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    assert_json(&response);
    assert_eq!(body_json(response).await["error"], "Method not allowed");
}

#[tokio::test]
async fn test_classifier_failure_is_server_error() {
    let classifier = Arc::new(RecordingClassifier::failing("exit status: 1"));
    let app = app(test_state(classifier.clone()));

    let response = send(&app, Method::POST, "/api/predict", Some(r#"{"email_text": "hi"}"#)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert_json(&response);
    assert_eq!(body_json(response).await["error"], "prediction failed: exit status: 1");
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn test_static_assets_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Spam Filter</h1>").unwrap();

    let classifier = Arc::new(RecordingClassifier::new());
    let mut config = spam_filter_gateway::test_util::test_config(Default::default());
    config.assets.dir = dir.path().to_string_lossy().into_owned();
    let app = app(Arc::new(AppState::new(config, classifier)));

    let response = send(&app, Method::GET, "/index.html", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(body_bytes(response).await, b"<h1>Spam Filter</h1>");

    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::GET, "/missing.js", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_api_path_falls_through_to_assets() {
    let (app, classifier) = spy_app();

    let response = send(&app, Method::GET, "/api/unknown", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
    assert_eq!(classifier.calls(), 0);
}
