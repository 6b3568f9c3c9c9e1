//! HTTP Server for the ERN generator.
//!
//! # API Endpoints
//!
//! | Method | Path               | Description                              |
//! |--------|--------------------|------------------------------------------|
//! | GET    | `/health`          | Health check                             |
//! | POST   | `/api/ern`         | Release bundle JSON in, ERN XML out      |
//! | POST   | `/api/ern/preview` | Same, wrapped in a JSON summary          |
//! | GET    | `/api/logs`        | SSE stream for real-time logs            |
//!
//! Both generation endpoints accept `?profile=full|reduced` (`simple` is
//! an alias of `reduced`).

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{error_response, GenerateQuery, GenerateResponse};
use crate::config::ErnConfig;
use crate::error::{ErnError, PipelineError, ServerError, ServerResult};
use crate::ern::ErnCompiler;
use crate::pipeline::{generate_from_bytes, GenerateOptions, GenerationResult};

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

type AppState = Arc<ErnCompiler>;
type ApiError = (StatusCode, Json<Value>);

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ErnConfig::from_env();
    let state: AppState = Arc::new(ErnCompiler::new(config.clone()));

    // Permissive CORS for local frontends
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let app = router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 ERN generator running on http://localhost:{}", port);
    println!("   POST /api/ern          - Generate ERN 3.8.2 XML");
    println!("   POST /api/ern/preview  - Generate with JSON summary");
    println!("   GET  /api/logs         - SSE log stream");
    println!("   GET  /health           - Health check");
    println!();
    println!(
        "📝 Sender {} -> recipient {} ({:?} deals)",
        config.sender_party_id, config.recipient_party_id, config.deal_profile
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/ern", post(generate_xml))
        .route("/api/ern/preview", post(generate_preview))
        .route("/api/logs", get(sse_logs))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "ddexgen",
        "version": env!("CARGO_PKG_VERSION"),
        "ernVersion": "3.8.2",
        "endpoints": {
            "generate": "POST /api/ern",
            "preview": "POST /api/ern/preview",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Release bundle in, XML document out.
async fn generate_xml(
    State(compiler): State<AppState>,
    query: Result<Query<GenerateQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let options = query_options(query).map_err(into_api_error)?;
    let result = run(&compiler, &body, options).map_err(into_api_error)?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], result.xml).into_response())
}

/// Release bundle in, JSON summary with the document out.
async fn generate_preview(
    State(compiler): State<AppState>,
    query: Result<Query<GenerateQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let options = query_options(query).map_err(into_api_error)?;
    let result = run(&compiler, &body, options).map_err(into_api_error)?;
    Ok(Json(GenerateResponse::from(result)))
}

/// Query string to options; a bad query gets the JSON error body too.
fn query_options(
    query: Result<Query<GenerateQuery>, QueryRejection>,
) -> ServerResult<GenerateOptions> {
    query
        .map(|Query(query)| query.into())
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

fn run(compiler: &ErnCompiler, body: &[u8], options: GenerateOptions) -> ServerResult<GenerationResult> {
    println!("\n{}", "=".repeat(70));
    println!("📄 NEW RELEASE BUNDLE ({} bytes)", body.len());
    println!("{}\n", "=".repeat(70));

    Ok(generate_from_bytes(compiler, body, &options)?)
}

/// HTTP status for a failed request.
fn status_for(error: &ServerError) -> StatusCode {
    match error {
        ServerError::BadRequest(_) | ServerError::Pipeline(PipelineError::Input(_)) => {
            StatusCode::BAD_REQUEST
        }
        ServerError::Pipeline(PipelineError::Ern(ErnError::MalformedInput { .. })) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServerError::Pipeline(PipelineError::Ern(_)) | ServerError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn into_api_error(error: ServerError) -> ApiError {
    log_error(format!("Generation failed: {}", error));
    (status_for(&error), Json(error_response(&error.to_string())))
}
