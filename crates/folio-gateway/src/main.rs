//! Axum-based HTTP gateway for the portfolio chat widget.
//!
//! Transport only: one message per call, no streaming. The widget renders the
//! returned `reply` verbatim and owns its own transcript, typing indicator,
//! and notification sound.

use axum::{
    extract::{Json, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use folio_core::{
    EngineConfig, GenerativeBridge, KnowledgeStore, ReplyEngine, Topic, APOLOGY_REPLY,
    DEFAULT_SESSION_ID, NO_MESSAGE_REPLY,
};
use folio_bridge::OpenAiBridge;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env if present (before any env::var calls).
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[folio-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(EngineConfig::load().expect("load EngineConfig"));
    let knowledge = Arc::new(KnowledgeStore::portfolio_default());
    let bridge = OpenAiBridge::from_env(&config.bridge_base_url, &config.bridge_model)
        .map(|b| Arc::new(b) as Arc<dyn GenerativeBridge>);
    match &bridge {
        Some(b) => tracing::info!("external responder bridge active: {}", b.name()),
        None => tracing::info!("no bridge credential; unmatched input uses the static fallback"),
    }
    let engine = Arc::new(ReplyEngine::new(knowledge, bridge));

    let app = build_app(AppState {
        config: Arc::clone(&config),
        engine,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
    engine: Arc<ReplyEngine>,
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any);

    // Any panic in the pipeline becomes the fixed apology payload; the
    // triggering input is logged, never echoed back with a stack trace.
    let catch_panic = CatchPanicLayer::custom(
        |err: Box<dyn std::any::Any + Send + 'static>| {
            let detail = err
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| err.downcast_ref::<&str>().copied())
                .unwrap_or("unknown panic");
            tracing::error!(target: "folio::gateway", detail, "unhandled panic in reply pipeline");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({ "reply": APOLOGY_REPLY })),
            )
                .into_response()
        },
    );

    Router::new()
        .route("/api/v1/chat", post(chat))
        .route("/api/v1/health", get(health))
        .route("/api/v1/status", get(status))
        .with_state(state)
        .layer(cors)
        .layer(catch_panic)
}

/// GET /api/v1/health – liveness check for the widget and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/status – app identity and bridge capability.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "bridge": match state.engine.bridge_name() {
            Some(name) => name,
            None => "unavailable",
        },
        "topics": Topic::all().len() - 1,
    }))
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    /// Scopes the recency window; one writer per conversation.
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(serde::Serialize)]
struct ChatReply {
    reply: String,
}

/// POST /api/v1/chat – body `{ message, session_id? }`, returns `{ reply }`.
/// Absent or empty message is rejected here, before the matcher runs.
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, axum::Json<ChatReply>) {
    let message = req.message.as_deref().map(str::trim).unwrap_or("");
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(ChatReply {
                reply: NO_MESSAGE_REPLY.to_string(),
            }),
        );
    }

    let session = req
        .session_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION_ID);
    let correlation_id = uuid::Uuid::new_v4();
    tracing::info!(
        target: "folio::gateway",
        %correlation_id,
        session,
        chars = message.len(),
        "chat request received"
    );

    let reply = state.engine.reply(session, message).await;
    (StatusCode::OK, axum::Json(ChatReply { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_config() -> EngineConfig {
        EngineConfig {
            app_name: "Test Gateway".to_string(),
            port: 8001,
            bridge_model: "gpt-3.5-turbo".to_string(),
            bridge_base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    fn test_app() -> Router {
        let engine = Arc::new(ReplyEngine::new(
            Arc::new(KnowledgeStore::portfolio_default()),
            None,
        ));
        build_app(AppState {
            config: Arc::new(test_config()),
            engine,
        })
    }

    fn chat_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/chat")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    async fn read_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_message_is_rejected_with_400() {
        let res = test_app()
            .oneshot(chat_request(serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = read_json(res).await;
        assert_eq!(json["reply"], "No message provided.");
    }

    #[tokio::test]
    async fn empty_message_is_rejected_with_400() {
        let res = test_app()
            .oneshot(chat_request(serde_json::json!({ "message": "   " })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = read_json(res).await;
        assert_eq!(json["reply"], "No message provided.");
    }

    #[tokio::test]
    async fn github_message_returns_profile_url() {
        let res = test_app()
            .oneshot(chat_request(serde_json::json!({ "message": "GitHub" })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = read_json(res).await;
        let reply = json["reply"].as_str().unwrap();
        assert!(reply.contains("https://github.com/mohamadchalhoub"), "got: {reply}");
    }

    #[tokio::test]
    async fn unmatched_message_gets_structured_fallback_without_bridge() {
        let res = test_app()
            .oneshot(chat_request(
                serde_json::json!({ "message": "what is the meaning of life?" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = read_json(res).await;
        let reply = json["reply"].as_str().unwrap();
        assert!(reply.contains("I can tell you about"), "got: {reply}");
    }

    #[tokio::test]
    async fn context_fallback_spans_requests_in_one_session() {
        let app = test_app();
        for message in ["show me your best project work", "that project sounds neat"] {
            let res = app
                .clone()
                .oneshot(chat_request(
                    serde_json::json!({ "message": message, "session_id": "widget-1" }),
                ))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = app
            .oneshot(chat_request(
                serde_json::json!({ "message": "hmm, more please", "session_id": "widget-1" }),
            ))
            .await
            .unwrap();
        let json = read_json(res).await;
        let reply = json["reply"].as_str().unwrap();
        assert!(reply.contains("interested in Mohamad's work"), "got: {reply}");
    }

    #[tokio::test]
    async fn health_and_status_respond() {
        let app = test_app();
        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = read_json(res).await;
        assert_eq!(json["status"], "ok");

        let res = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = read_json(res).await;
        assert_eq!(json["app_name"], "Test Gateway");
        assert_eq!(json["bridge"], "unavailable");
        assert_eq!(json["topics"], 14);
    }
}
