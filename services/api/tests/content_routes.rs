mod common;

use common::{body, chat_completion, provider_error, TestServer};
use reqwest::StatusCode;
use serde_json::json;
use socialmind_core::FALLBACK_REPLY;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn generate_content_returns_structured_output() {
    let server = TestServer::new().await;

    let generated = json!({
        "caption": "Your skin deserves a morning ritual.",
        "hashtags": ["#skincare", "#glowingskin", "#selfcare"],
        "reelScript": {
            "hook": "Three steps to glass skin",
            "body": "Cleanse, hydrate, protect.",
            "cta": "Save this for tomorrow morning"
        },
        "bestPostingTime": "Weekdays 7-9pm"
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "test-content-model" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion(&generated.to_string())),
        )
        .expect(1)
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/content/generate"))
        .json(&json!({ "topic": "skincare", "target": "women 25-35", "tone": "warm" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], generated);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn generate_content_tolerates_fenced_json() {
    let server = TestServer::new().await;

    let fenced = "```json\n{\"caption\":\"c\",\"hashtags\":[\"#a\"],\"reelScript\":{\"hook\":\"h\",\"body\":\"b\",\"cta\":\"x\"},\"bestPostingTime\":\"9am\"}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(fenced)))
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/content/generate"))
        .json(&json!({ "topic": "coffee", "target": "students", "tone": "playful" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["data"]["bestPostingTime"], "9am");
}

#[tokio::test]
async fn generate_content_names_missing_fields_without_calling_provider() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/content/generate"))
        .json(&json!({ "topic": "skincare", "tone": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing required fields: target, tone");
    assert!(body.get("data").is_none());
    assert_eq!(server.ai_calls().await, 0);
}

#[tokio::test]
async fn generate_content_reports_unparseable_output_as_500() {
    let server = TestServer::new().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("not json at all")))
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/content/generate"))
        .json(&json!({ "topic": "skincare", "target": "women", "tone": "warm" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(response).await["error"], "Failed to generate content");
}

#[tokio::test]
async fn malformed_json_body_is_a_validation_error() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/content/generate"))
        .header("content-type", "application/json")
        .body("{ \"topic\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn trends_without_provider_key_is_a_configuration_error() {
    let server = TestServer::without_ai().await;

    let response = server
        .client
        .post(server.url("/api/trends/analyze"))
        .json(&json!({ "niche": "coffee" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
    assert_eq!(server.ai_calls().await, 0);
}

#[tokio::test]
async fn trends_returns_bundle() {
    let server = TestServer::new().await;

    let bundle = json!({
        "trends": [{
            "title": "Latte art timelapse",
            "type": "Reel Format",
            "viralScore": "92%",
            "audio": "Lo-fi beat",
            "hashtags": ["#latteart"],
            "insight": "Short satisfying loops keep viewers watching."
        }],
        "globalHashtags": ["#coffee", "#barista"]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(&bundle.to_string())),
        )
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/trends/analyze"))
        .json(&json!({ "niche": "coffee" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["data"], bundle);
}

#[tokio::test]
async fn reply_uses_fallback_when_unconfigured() {
    let server = TestServer::without_ai().await;

    let response = server
        .client
        .post(server.url("/api/ai/reply"))
        .json(&json!({ "context": "bakery", "incomingMessage": "Are you open?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn reply_uses_fallback_when_provider_rejects() {
    let server = TestServer::new().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "bad request", "type": "invalid_request_error", "param": null, "code": null }
        })))
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/ai/reply"))
        .json(&json!({ "context": "bakery", "incomingMessage": "Are you open?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["data"]["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn reply_is_trimmed_provider_text() {
    let server = TestServer::new().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": "test-reply-model" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion("  We're open until 6pm today!  \n")),
        )
        .expect(1)
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/ai/reply"))
        .json(&json!({ "context": "bakery", "incomingMessage": "Are you open?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(
        body(response).await["data"]["reply"],
        "We're open until 6pm today!"
    );
}

#[tokio::test]
async fn reply_requires_both_fields() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/ai/reply"))
        .json(&json!({ "context": "bakery" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(response).await["error"],
        "Missing required fields: incomingMessage"
    );
}

#[tokio::test]
async fn audit_accepts_mixed_metric_types() {
    let server = TestServer::new().await;

    let audit = json!({
        "score": 72.0,
        "summary": "Solid reach, engagement lagging.",
        "strengths": ["Consistent posting"],
        "weaknesses": ["Low saves"],
        "recommendations": ["Add carousel tutorials"]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(&audit.to_string())),
        )
        .expect(1)
        .mount(&server.ai)
        .await;

    let response = server
        .client
        .post(server.url("/api/analytics/audit"))
        .json(&json!({
            "followers": 1200,
            "reach": 5400,
            "impressions": "9k",
            "engagement": "4.2%",
            "likes": 0
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["data"], audit);
}

#[tokio::test]
async fn audit_rejects_missing_metric() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/analytics/audit"))
        .json(&json!({ "followers": 1200, "reach": 5400, "impressions": 9000, "engagement": null }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(response).await["error"],
        "Missing required fields: engagement, likes"
    );
    assert_eq!(server.ai_calls().await, 0);
}

#[tokio::test]
async fn overloaded_provider_fails_content_after_one_attempt() {
    for (status, kind) in [(503, "server_error"), (429, "rate_limit_exceeded")] {
        let server = TestServer::new().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(provider_error(status, kind))
            .mount(&server.ai)
            .await;

        let response = server
            .client
            .post(server.url("/api/content/generate"))
            .json(&json!({ "topic": "skincare", "target": "Gen Z", "tone": "playful" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", status);
        assert_eq!(body(response).await["error"], "Failed to generate content");
        assert_eq!(server.ai_calls().await, 1, "{}", status);
    }
}

#[tokio::test]
async fn overloaded_provider_fails_trends_after_one_attempt() {
    for (status, kind) in [(503, "server_error"), (429, "rate_limit_exceeded")] {
        let server = TestServer::new().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(provider_error(status, kind))
            .mount(&server.ai)
            .await;

        let response = server
            .client
            .post(server.url("/api/trends/analyze"))
            .json(&json!({ "niche": "coffee" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", status);
        assert_eq!(body(response).await["error"], "Failed to analyze trends");
        assert_eq!(server.ai_calls().await, 1, "{}", status);
    }
}

#[tokio::test]
async fn overloaded_provider_falls_back_for_reply_after_one_attempt() {
    for (status, kind) in [(503, "server_error"), (429, "rate_limit_exceeded")] {
        let server = TestServer::new().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(provider_error(status, kind))
            .mount(&server.ai)
            .await;

        let response = server
            .client
            .post(server.url("/api/ai/reply"))
            .json(&json!({ "context": "bakery", "incomingMessage": "Are you open?" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", status);
        assert_eq!(body(response).await["data"]["reply"], FALLBACK_REPLY);
        assert_eq!(server.ai_calls().await, 1, "{}", status);
    }
}

#[tokio::test]
async fn unreachable_provider_falls_back_for_reply() {
    let server = TestServer::unreachable_ai().await;

    let response = server
        .client
        .post(server.url("/api/ai/reply"))
        .json(&json!({ "context": "bakery", "incomingMessage": "Are you open?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["data"]["reply"], FALLBACK_REPLY);
}
