//! Request handlers

mod download;
mod enhance;
mod health;

pub use download::{download, DOWNLOAD_FILENAME};
pub use enhance::{enhance, EnhanceResponse, IMAGE_FIELD};
pub use health::{health, HealthResponse};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{router, AppState, ImageStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response};
    use axum::Router;
    use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
    use photoboost_core::config::ConfigSchema;
    use std::io::Cursor;
    use tempfile::TempDir;

    pub const BOUNDARY: &str = "photoboost-test-boundary";

    pub async fn test_app_with(mut config: ConfigSchema) -> (Router, AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        config.storage.dir = temp_dir.path().join("images");
        let store = ImageStore::open(&config.storage.dir).await.unwrap();
        let state = AppState::new(config, store);
        (router(state.clone()), state, temp_dir)
    }

    pub async fn test_app() -> (Router, AppState, TempDir) {
        test_app_with(ConfigSchema::default()).await
    }

    pub fn png_fixture() -> Vec<u8> {
        let img = RgbaImage::from_fn(24, 16, |x, y| {
            Rgba([(x * 10) as u8, (y * 15) as u8, 90, if x < 4 { 0 } else { 255 }])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    pub fn multipart_request(field: &str, filename: Option<&str>, data: &[u8]) -> Request<Body> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/enhance")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }
}
