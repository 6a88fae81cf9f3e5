use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;
use crate::translate::{StructuredTranslation, TranslationRequest};

pub const SERVICE_NAME: &str = "Structured Bangla Translator API";
pub const SERVICE_DESCRIPTION: &str =
    "API for translating Bangla text to other languages with structured output";

type ApiError = (StatusCode, Json<Value>);

fn bad_request(detail: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail.into() })))
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/translate", post(translate))
        .route("/api/health", get(health_check))
}

/// Full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": SERVICE_DESCRIPTION,
        "endpoints": {
            "/translate": "POST - Translate text with structured output",
            "/api/health": "GET - Service health check"
        },
        "structure_types": state.gateway.registry().tags()
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<StructuredTranslation>, ApiError> {
    let Json(request) =
        payload.map_err(|e| (e.status(), Json(json!({ "detail": e.body_text() }))))?;

    if request.text.is_empty() {
        return Err(bad_request("Text to translate is required"));
    }
    if request.target_language.is_empty() {
        return Err(bad_request("Target language is required"));
    }

    let result = state
        .gateway
        .translate_structured(&request.text, &request.target_language, &request.structure_type)
        .await
        .map_err(|e| bad_request(e.error))?;

    info!("Translation complete");
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::{
        ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, CompletionBackend,
        LlmError,
    };
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct CountingBackend {
        content: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for CountingBackend {
        async fn chat_completion(
            &self,
            _request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ChatCompletionResponse {
                choices: vec![Choice {
                    message: ChoiceMessage {
                        content: Some(self.content.clone()),
                    },
                }],
            })
        }
    }

    fn setup(content: &str) -> (Router, Arc<CountingBackend>) {
        let backend = Arc::new(CountingBackend {
            content: content.to_string(),
            calls: AtomicUsize::new(0),
        });
        let state = AppState::with_backend(&Config::default(), backend.clone());
        (app(state), backend)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_translate(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn translates_bangla_end_to_end() {
        let reply = json!({
            "original_text": "আমি ভালো আছি",
            "translated_text": "I am fine",
            "formal_alternative": "I am doing well",
            "notes": null
        });
        let (router, backend) = setup(&reply.to_string());

        let (status, body) = send(
            router,
            post_translate(json!({"text": "আমি ভালো আছি", "target_language": "English"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_upstream_call() {
        let (router, backend) = setup("{}");

        let (status, body) = send(
            router,
            post_translate(json!({"text": "", "target_language": "English"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Text to translate is required");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_target_language_is_rejected_without_upstream_call() {
        let (router, backend) = setup("{}");

        let (status, body) = send(
            router,
            post_translate(json!({"text": "আমি", "target_language": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Target language is required");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn translation_failures_surface_as_bad_request() {
        for (content, prefix) in [
            (r#"{"original_text": "x""#, "JSON parsing error:"),
            (r#"{"translated_text": "y"}"#, "Validation error:"),
        ] {
            let (router, _) = setup(content);
            let (status, body) = send(
                router,
                post_translate(json!({"text": "আমি", "target_language": "English"})),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["detail"].as_str().unwrap().starts_with(prefix), "{}", body);
        }
    }

    #[tokio::test]
    async fn malformed_body_gets_json_detail() {
        let (router, backend) = setup("{}");

        let (status, body) = send(router, post_translate(json!({"target_language": "English"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("text"), "{}", body);

        let (router, _) = setup("{}");
        let request = Request::builder()
            .method("POST")
            .uri("/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn root_describes_the_service() {
        let (router, _) = setup("{}");
        let (status, body) = send(
            router,
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], SERVICE_NAME);
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["description"], SERVICE_DESCRIPTION);
        assert!(body["endpoints"]["/translate"].as_str().unwrap().starts_with("POST"));
        assert_eq!(body["structure_types"], json!(["default"]));
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let (router, _) = setup("{}");
        let (status, body) = send(
            router,
            Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}
