use crate::aggregator::PolicyAggregator;
use crate::types::AggregatorError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Error surfaced to HTTP clients as `{"error": "..."}` with status 500.
pub struct ApiError(AggregatorError);

impl From<AggregatorError> for ApiError {
    fn from(e: AggregatorError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn router(aggregator: Arc<PolicyAggregator>) -> Router {
    Router::new()
        .route("/api/policies", get(list_policies))
        .route("/healthz", get(healthz))
        .with_state(aggregator)
}

async fn list_policies(State(aggregator): State<Arc<PolicyAggregator>>) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("policies", %request_id);

    async move {
        match aggregator.aggregate().await {
            Ok(items) => {
                info!("Serving {} items", items.len());
                Ok(Json(items).into_response())
            }
            Err(e) => {
                error!("Aggregation failed: {}", e);
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, aggregator: Arc<PolicyAggregator>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(aggregator))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
