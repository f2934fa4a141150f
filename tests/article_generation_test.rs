use anyhow::Result;
use blog_autopilot::config::{BlogConfig, GeminiConfig};
use blog_autopilot::core::composer::post_file_name;
use blog_autopilot::core::{ArticleRequest, Storage};
use blog_autopilot::{ArticleComposer, BlogError, GeminiClient, LocalStorage};
use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const MODEL: &str = "gemini-test";

fn gemini_config(server: &MockServer) -> GeminiConfig {
    GeminiConfig {
        api_key: Some("test-gemini-key".to_string()),
        model: MODEL.to_string(),
        base_url: server.base_url(),
        timeout_seconds: Some(5),
    }
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

fn request() -> ArticleRequest {
    ArticleRequest {
        title: "Best Budget Laptops for Students".to_string(),
        focus_keyword: "budget laptops".to_string(),
        permalink: "budget-laptops".to_string(),
        semantic_keywords: "student laptop, cheap notebook".to_string(),
    }
}

#[tokio::test]
async fn test_article_is_written_with_canonical_front_matter() -> Result<()> {
    let server = MockServer::start_async().await;
    let model_output = "---\nlayout: default\ntitle: \"Echoed\"\n---\n\ndate: 2024-01-01\n\n## Why budget laptops\nThey are cheap.";

    let generate_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", MODEL))
                .header("x-goog-api-key", "test-gemini-key")
                .body_contains("Best Budget Laptops for Students");
            then.status(200).json_body(text_response(model_output));
        })
        .await;

    let client = GeminiClient::new(&gemini_config(&server))?;
    let composer = ArticleComposer::new(client, &BlogConfig::default());
    let article = composer.generate_article(&request()).await?;

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());
    let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let file_name = post_file_name(&request().permalink, date);
    storage.write_file(&file_name, article.render().as_bytes()).await?;

    generate_mock.assert_async().await;

    let written = std::fs::read_to_string(temp_dir.path().join("2026-10-16-budget-laptops.md"))?;
    let expected = "---\n\
                    layout: post\n\
                    title: \"Best Budget Laptops for Students\"\n\
                    description: \"Learn about budget laptops and make informed decisions.\"\n\
                    author: Mary\n\
                    tags: [budget laptops]\n\
                    featured: false\n\
                    image: '/images/budget-laptops.webp'\n\
                    ---\n\
                    \n\
                    ## Why budget laptops\n\
                    They are cheap.";
    assert_eq!(written, expected);
    Ok(())
}

#[tokio::test]
async fn test_image_prompt_round_trip() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", MODEL))
                .body_contains("Return ONLY the image prompt");
            then.status(200)
                .json_body(text_response("  A student typing on a slim laptop in a library, soft light  \n"));
        })
        .await;

    let composer = ArticleComposer::new(GeminiClient::new(&gemini_config(&server))?, &BlogConfig::default());
    let prompt = composer.generate_image_prompt("Best Budget Laptops").await?;

    mock.assert_async().await;
    assert_eq!(prompt, "A student typing on a slim laptop in a library, soft light");
    Ok(())
}

#[tokio::test]
async fn test_service_error_propagates_with_status_and_body() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(429).body("quota exceeded");
        })
        .await;

    let composer = ArticleComposer::new(GeminiClient::new(&gemini_config(&server))?, &BlogConfig::default());
    let err = composer.generate_article(&request()).await.unwrap_err();

    match err {
        BlogError::ServiceError { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_blocked_completion_is_empty_response() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .json_body(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        })
        .await;

    let composer = ArticleComposer::new(GeminiClient::new(&gemini_config(&server))?, &BlogConfig::default());
    let err = composer.generate_image_prompt("Anything").await.unwrap_err();

    match err {
        BlogError::EmptyResponse { message } => assert!(message.contains("SAFETY")),
        other => panic!("Unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_success_body_is_serialization_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).body("not json");
        })
        .await;

    let composer = ArticleComposer::new(GeminiClient::new(&gemini_config(&server))?, &BlogConfig::default());
    let err = composer.generate_article(&request()).await.unwrap_err();

    assert!(matches!(err, BlogError::SerializationError(_)));
    assert_eq!(err.recovery_suggestion(), "The service response was not valid JSON");
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_propagates() -> Result<()> {
    let config = GeminiConfig {
        api_key: Some("k".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_seconds: Some(2),
        ..GeminiConfig::default()
    };
    let composer = ArticleComposer::new(GeminiClient::new(&config)?, &BlogConfig::default());

    let err = composer.generate_article(&request()).await.unwrap_err();
    assert!(matches!(err, BlogError::ApiError(_)));
    Ok(())
}
