//! Axum router configuration with middleware.
//!
//! Middleware: body size limit, permissive CORS, request tracing.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::post_chat))
        .route(
            "/history",
            get(handlers::history::get_history).delete(handlers::history::clear_history),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use lionbot_core::chat::reply::{EMPTY_REQUEST_REPLY, UNSUPPORTED_INPUT_REPLY};
    use lionbot_types::config::ServerConfig;
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::http::error::{BODY_TOO_LARGE_REPLY, INVALID_BODY_REPLY};

    /// Fake generateContent endpoint answering every request the same way.
    async fn spawn_gemini_stub(status: StatusCode, response: Value) -> String {
        let app = Router::new().fallback(move || {
            let response = response.clone();
            async move { (status, axum::Json(response)) }
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn app_with(status: StatusCode, response: Value, max_body_bytes: usize) -> Router {
        let base = spawn_gemini_stub(status, response).await;
        let config = ServerConfig {
            api_base_url: base,
            max_body_bytes,
            request_timeout_secs: 5,
            ..ServerConfig::default()
        };
        let state = AppState::init(
            config,
            SecretString::from("test-key-not-real"),
            "Be polite.".to_string(),
        )
        .unwrap();
        build_router(state)
    }

    async fn hi_there_app() -> Router {
        app_with(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "hi there" }] }
                }]
            }),
            1024 * 1024,
        )
        .await
    }

    fn post_chat(body: impl Into<Body>) -> Request<Body> {
        Request::post("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_hello_round_trip_updates_history() {
        let app = hi_there_app().await;

        let response = app
            .clone()
            .oneshot(post_chat(json!({ "message": "hello" }).to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "reply": "hi there" }));

        let response = app
            .oneshot(Request::get("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "turns": 2, "capacity": 20 }));
    }

    #[tokio::test]
    async fn test_empty_request_is_400() {
        let app = hi_there_app().await;

        let response = app.oneshot(post_chat("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "reply": EMPTY_REQUEST_REPLY }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = hi_there_app().await;

        let response = app.oneshot(post_chat("{\"message\": ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "reply": INVALID_BODY_REPLY }));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let app = hi_there_app().await;
        let request = Request::post("/api/chat")
            .body(Body::from(json!({ "message": "hello" }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "reply": INVALID_BODY_REPLY }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let app = app_with(StatusCode::OK, json!({}), 64).await;
        let body = json!({ "message": "x".repeat(1024) }).to_string();

        let response = app.oneshot(post_chat(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await, json!({ "reply": BODY_TOO_LARGE_REPLY }));
    }

    #[tokio::test]
    async fn test_invalid_argument_is_soft_failure() {
        let app = app_with(
            StatusCode::BAD_REQUEST,
            json!({
                "error": {
                    "code": 400,
                    "message": "Unsupported MIME type: application/zip",
                    "status": "INVALID_ARGUMENT"
                }
            }),
            1024 * 1024,
        )
        .await;

        let response = app
            .clone()
            .oneshot(post_chat(json!({ "message": "see attached" }).to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "reply": UNSUPPORTED_INPUT_REPLY }));

        let response = app
            .oneshot(Request::get("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["turns"], 0);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let app = hi_there_app().await;
        app.clone()
            .oneshot(post_chat(json!({ "message": "hello" }).to_string()))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(Request::delete("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::get("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["turns"], 0);
    }

    #[tokio::test]
    async fn test_health() {
        let app = hi_there_app().await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
