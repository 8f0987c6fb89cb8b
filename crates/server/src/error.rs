//! Handler errors and their HTTP mapping

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use photoboost_image::ImageError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// No file part named `image` in the request
    #[error("No image provided")]
    MissingImage,

    /// The multipart body could not be read
    #[error("{message}")]
    Upload {
        /// Status suggested by the multipart parser
        status: StatusCode,
        /// Parser message
        message: String,
    },

    /// Unknown id or no stored result
    #[error("Image not found")]
    NotFound,

    /// Decoding, enhancing or encoding failed
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Reading or writing the image store failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A worker task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingImage => StatusCode::BAD_REQUEST,
            Self::Upload { status, .. } => *status,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Image(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Image(ImageError::UnknownFormat).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let upload = ApiError::Upload {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".into(),
        };
        assert_eq!(upload.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_messages_match_wire_format() {
        assert_eq!(ApiError::MissingImage.to_string(), "No image provided");
        assert_eq!(ApiError::NotFound.to_string(), "Image not found");
        assert_eq!(
            ApiError::Image(ImageError::UnknownFormat).to_string(),
            "Unknown image format"
        );
    }
}
