//! `POST /enhance`

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use photoboost_image::enhance_upload;
use photoboost_telemetry::{metrics, Timer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Multipart field carrying the upload
pub const IMAGE_FIELD: &str = "image";

/// Successful enhancement
#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceResponse {
    /// Key for `GET /download/{id}`
    pub id: Uuid,
    /// Normalized upload as a JPEG data URI
    pub original: String,
    /// Enhanced image as a JPEG data URI
    pub enhanced: String,
}

/// Enhance an uploaded image and store both versions
pub async fn enhance(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    metrics().increment("enhance_requests");

    let result = process(&state, multipart).await;
    if result.is_err() {
        metrics().increment("enhance_failures");
    }
    result.map(Json)
}

async fn process(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<EnhanceResponse, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Upload is not multipart");
        ApiError::MissingImage
    })?;
    let data = read_image_field(&mut multipart).await?;
    let upload_bytes = data.len();

    let options = state.output_options();
    let timer = Timer::start("enhance_ms");
    let pair = tokio::task::spawn_blocking(move || enhance_upload(&data, &options))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    let elapsed = timer.stop();

    let id = Uuid::new_v4();
    state.store.save(&id, &pair).await?;

    tracing::info!(
        %id,
        format = ?pair.source_format,
        width = pair.width,
        height = pair.height,
        upload_bytes,
        enhanced_bytes = pair.enhanced.len(),
        elapsed_ms = elapsed.as_millis(),
        "Image enhanced"
    );

    Ok(EnhanceResponse {
        id,
        original: jpeg_data_uri(&pair.original),
        enhanced: jpeg_data_uri(&pair.enhanced),
    })
}

/// First file part named [`IMAGE_FIELD`]; other parts are skipped
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let is_image = field.name() == Some(IMAGE_FIELD) && field.file_name().is_some();
        if is_image {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::MissingImage)
}

fn jpeg_data_uri(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}
