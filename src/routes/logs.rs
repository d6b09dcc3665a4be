/**
 * Logs Route Handler
 * Receives errors and logs reported by the site and the admin console
 */

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use tower_http::request_id::RequestId;

use crate::logging::config::{ClientLogBatch, ClientLogEntry, LogLevel, LogResponse};

/// Longest message or stack kept from a single client entry.
const MAX_FIELD_LEN: usize = 4096;

/// POST /api/logs - Receive client logs
#[tracing::instrument(skip(logs), fields(batch_size = logs.logs.len()))]
pub async fn receive_client_logs(
    request_id: Option<Extension<RequestId>>,
    Json(logs): Json<ClientLogBatch>,
) -> impl IntoResponse {
    let req_id = request_id
        .as_ref()
        .and_then(|ext| ext.0.header_value().to_str().ok())
        .unwrap_or("unknown");

    let mut processed = 0;
    for log in &logs.logs {
        match process_client_log(log, req_id) {
            Ok(()) => processed += 1,
            Err(e) => tracing::warn!(request_id = %req_id, error = %e, "failed to process client log"),
        }
    }

    let response = LogResponse {
        success: true,
        received: logs.logs.len(),
        processed,
        error: None,
    };

    (StatusCode::ACCEPTED, Json(response))
}

fn clip(value: &str) -> &str {
    match value.char_indices().nth(MAX_FIELD_LEN) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Process a single client log entry
fn process_client_log(log: &ClientLogEntry, request_id: &str) -> Result<(), String> {
    let message = clip(log.message.trim());
    if message.is_empty() {
        return Err("empty message".to_string());
    }

    let span = tracing::info_span!(
        "client_log",
        request_id = %request_id,
        timestamp = %log.timestamp,
        source = "client",
    );
    let _enter = span.enter();

    let url = log.url.as_deref().unwrap_or("");
    let stack = log.stack.as_deref().map(clip).unwrap_or("");

    match log.level {
        LogLevel::Trace => tracing::trace!(client_message = %message, url, context = ?log.context, "client log"),
        LogLevel::Debug => tracing::debug!(client_message = %message, url, context = ?log.context, "client log"),
        LogLevel::Info => tracing::info!(client_message = %message, url, context = ?log.context, "client log"),
        LogLevel::Warn => tracing::warn!(client_message = %message, url, context = ?log.context, "client log"),
        LogLevel::Error => tracing::error!(
            client_message = %message,
            url,
            stack,
            context = ?log.context,
            metadata = ?log.metadata,
            "client error"
        ),
    }

    Ok(())
}
