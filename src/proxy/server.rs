use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::config::ProxyConfig;
use crate::converter::{self, ConversionRequest, ConversionResponse, ConvertError, GroqClient};

#[derive(Clone)]
pub struct AppState {
    client: Arc<GroqClient>,
}

impl AppState {
    pub fn new(client: GroqClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Raw body of `POST /api/convert`; `direction` stays a string until
/// validation so an unknown value is a 400, not a deserialization error.
#[derive(Debug, Deserialize)]
struct ConvertPayload {
    text: String,
    direction: String,
}

pub fn build_router(state: AppState, config: &ProxyConfig) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(root))
        .route("/api/convert", post(handle_convert))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

pub async fn start_server(config: ProxyConfig, client: GroqClient) -> Result<()> {
    if client.config().api_key().is_none() {
        tracing::warn!("⚠️  GROQ_API_KEY is not set; conversions will fail until it is configured");
    }

    let app = build_router(AppState::new(client), &config)?;

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Voice Converter API started on http://{}", addr);
    tracing::info!("Allowed origins: {}", config.allowed_origins.join(", "));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    // Wildcards are not allowed together with credentials, so methods and
    // headers are mirrored from the preflight instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Voice Converter API is running"
    }))
}

#[tracing::instrument(name = "convert", skip_all, fields(request_id = %Uuid::new_v4()))]
async fn handle_convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertPayload>, JsonRejection>,
) -> Result<Json<ConversionResponse>, ConvertError> {
    let Json(payload) = payload?;

    tracing::info!("📥 Incoming conversion request");
    tracing::info!("   Direction: {}", payload.direction);
    tracing::info!("   Text length: {} chars", payload.text.chars().count());

    let request = ConversionRequest::new(payload.text, &payload.direction)?;
    let response = converter::convert(&state.client, &request).await?;

    tracing::info!("✅ Conversion completed");
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterConfig;
    use crate::proxy::error::ErrorResponse;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    // No upstream listens here; tests that reach the client must not depend on it.
    const DEAD_UPSTREAM: &str = "http://127.0.0.1:9/openai/v1/chat/completions";

    fn app(api_key: Option<&str>) -> Router {
        let mut config = ConverterConfig::default().with_api_url(DEAD_UPSTREAM);
        config.api_key = api_key.map(str::to_string);
        let client = GroqClient::new(config).unwrap();
        build_router(AppState::new(client), &ProxyConfig::default()).unwrap()
    }

    fn convert_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/convert")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn detail(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice::<ErrorResponse>(&bytes).unwrap().detail
    }

    #[tokio::test]
    async fn root_reports_running() {
        let response = app(None)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"message": "Voice Converter API is running"}));
    }

    #[tokio::test]
    async fn empty_text_is_bad_request() {
        for body in [
            r#"{"text":"","direction":"active_to_passive"}"#,
            r#"{"text":"   ","direction":"passive_to_active"}"#,
            r#"{"text":"\n\t","direction":"nonsense"}"#,
        ] {
            let response = app(Some("gsk_test")).oneshot(convert_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(detail(response).await, "Text cannot be empty");
        }
    }

    #[tokio::test]
    async fn unknown_direction_is_bad_request() {
        let response = app(Some("gsk_test"))
            .oneshot(convert_request(r#"{"text":"John threw the ball.","direction":"sideways"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail(response).await, "Invalid direction");
    }

    #[tokio::test]
    async fn malformed_body_is_unprocessable() {
        for body in [
            r#"{"text":"John threw the ball."}"#,
            r#"{"text":42,"direction":"active_to_passive"}"#,
            "not json",
        ] {
            let response = app(Some("gsk_test")).oneshot(convert_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        }
    }

    #[tokio::test]
    async fn missing_api_key_is_server_error() {
        let response = app(None)
            .oneshot(convert_request(r#"{"text":"John threw the ball.","direction":"active_to_passive"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail(response).await, "Groq API key is not configured");
    }

    #[tokio::test]
    async fn cors_preflight_allows_known_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/convert")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "POST");
    }

    #[tokio::test]
    async fn cors_preflight_allows_deployed_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/convert")
            .header(header::ORIGIN, "https://active-passive-converter.vercel.app")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,authorization")
            .body(Body::empty())
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://active-passive-converter.vercel.app"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type,authorization"
        );
    }

    #[tokio::test]
    async fn cors_ignores_unknown_origin() {
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn invalid_origin_fails_router_build() {
        let client = GroqClient::new(ConverterConfig::default()).unwrap();
        let config = ProxyConfig {
            allowed_origins: vec!["http://bad\norigin".to_string()],
            ..Default::default()
        };
        assert!(build_router(AppState::new(client), &config).is_err());
    }
}
