//! Shared handler state

use crate::storage::ImageStore;
use photoboost_core::config::ConfigSchema;
use photoboost_image::OutputOptions;
use std::sync::Arc;
use std::time::Instant;

/// State cloned into every request handler
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<ConfigSchema>,
    /// Where uploads and results are persisted
    pub store: Arc<ImageStore>,
    /// When the service was assembled; reported as uptime
    pub started_at: Instant,
}

impl AppState {
    /// Wrap configuration and store for sharing across handlers
    #[must_use]
    pub fn new(config: ConfigSchema, store: ImageStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since [`AppState::new`]
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// JPEG settings for both the original and the enhanced output
    #[must_use]
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            quality: self.config.output.jpeg_quality,
        }
    }
}
