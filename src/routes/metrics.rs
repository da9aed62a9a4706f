use axum::http::{header, StatusCode};
use prometheus::{Encoder, TextEncoder};

use crate::error::ApiError;

/// GET /metrics — text exposition of the focus mode request counters.
pub async fn metrics_handler() -> Result<([(header::HeaderName, String); 1], String), ApiError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| ApiError::internal("METRICS_ENCODE_FAILED", "Error encoding metrics", e))?;
    let body = String::from_utf8(buffer)
        .map_err(|e| ApiError::internal("METRICS_ENCODE_FAILED", "Error encoding metrics", e))?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}
