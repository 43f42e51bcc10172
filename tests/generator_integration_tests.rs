use pictor::generate::{
    GenerateRequest, GeneratorError, ImageProvider, LocalAiProvider, OpenAiProvider, PreloadError,
    preload,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn test_request<'a>() -> GenerateRequest<'a> {
    GenerateRequest {
        prompt: "  a red fox  ",
        model: "dall-e-3",
        size: "1024x1024",
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 4, image::Rgb([10, 200, 10]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// OpenAI Provider Tests
// ============================================================================

#[tokio::test]
async fn test_openai_successful_generation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(header("authorization", "Bearer test-key"))
        // The prompt must be forwarded raw, untrimmed
        .and(body_partial_json(serde_json::json!({
            "prompt": "  a red fox  ",
            "model": "dall-e-3",
            "n": 1,
            "size": "1024x1024",
            "response_format": "url",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{
                "url": "https://x/img.png",
                "revised_prompt": "A red fox in a forest"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let image = provider.generate(test_request()).await.unwrap();

    assert_eq!(image.url, "https://x/img.png");
    assert_eq!(image.revised_prompt.as_deref(), Some("A red fox in a forest"));
}

#[tokio::test]
async fn test_openai_api_error_surfaces_service_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("bad-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate(test_request()).await;

    match result {
        Err(GeneratorError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_success_without_url_is_a_failure() {
    let mock_server = MockServer::start().await;

    // Success-shaped response, but the datum carries no url
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{ "revised_prompt": "whatever" }]
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate(test_request()).await;

    assert!(matches!(result, Err(GeneratorError::MissingUrl)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "No image URL received"
    );
}

#[tokio::test]
async fn test_openai_empty_data_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "created": 1_700_000_000,
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate(test_request()).await;

    assert!(matches!(result, Err(GeneratorError::MissingUrl)));
}

#[tokio::test]
async fn test_openai_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate(test_request()).await;

    assert!(matches!(result, Err(GeneratorError::Parse(_))));
}

// ============================================================================
// LocalAI Provider Tests
// ============================================================================

#[tokio::test]
async fn test_localai_successful_generation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(serde_json::json!({
            "prompt": "  a red fox  ",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{ "url": "http://localhost:8080/generated/img.png" }]
        })))
        .mount(&mock_server)
        .await;

    let provider = LocalAiProvider::new(Some(mock_server.uri()));
    let image = provider.generate(test_request()).await.unwrap();

    assert_eq!(image.url, "http://localhost:8080/generated/img.png");
    assert_eq!(image.revised_prompt, None);
}

#[tokio::test]
async fn test_localai_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&mock_server)
        .await;

    let provider = LocalAiProvider::new(Some(mock_server.uri()));
    let result = provider.generate(test_request()).await;

    match result {
        Err(GeneratorError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ============================================================================
// Preload Tests
// ============================================================================

#[tokio::test]
async fn test_preload_fetches_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let preview = preload(&client, &format!("{}/img.png", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(preview.width(), 8);
    assert_eq!(preview.height(), 4);
    assert_eq!(preview.pixel(0, 0), (10, 200, 10));
}

#[tokio::test]
async fn test_preload_reports_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let result = preload(&client, &format!("{}/img.png", mock_server.uri())).await;

    assert!(matches!(result, Err(PreloadError::Status(404))));
}

#[tokio::test]
async fn test_preload_rejects_non_image_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not an image</html>"))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let result = preload(&client, &format!("{}/img.png", mock_server.uri())).await;

    assert!(matches!(result, Err(PreloadError::Decode(_))));
}
