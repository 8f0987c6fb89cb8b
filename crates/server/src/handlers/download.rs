//! `GET /download/{id}`

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use photoboost_telemetry::metrics;
use uuid::Uuid;

/// Filename offered to the browser
pub const DOWNLOAD_FILENAME: &str = "enhanced_image.jpg";

/// Serve a stored enhanced image as an attachment
///
/// Ids that are not UUIDs never reach the filesystem.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        metrics().increment("downloads_missing");
        return Err(ApiError::NotFound);
    };

    let Some(bytes) = state.store.read_enhanced(&id).await? else {
        metrics().increment("downloads_missing");
        return Err(ApiError::NotFound);
    };

    metrics().increment("downloads");
    tracing::debug!(%id, bytes = bytes.len(), "Serving enhanced image");

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}
