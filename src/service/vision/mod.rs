//! Vision model access
//!
//! Sends a photograph plus a focus-specific prompt to a vision-capable
//! language model and returns its free-text description.

use async_trait::async_trait;

use crate::model::FocusArea;

pub mod focus;
pub mod ollama;
pub mod prompts;

pub use focus::determine_focus_area;
pub use ollama::OllamaVisionClient;

/// Error type for vision model calls
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("Cannot connect to vision model server at {0}")]
    Connection(String),

    #[error("Vision model request timed out after {0}s")]
    Timeout(u64),

    #[error("Vision model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Failed to parse vision model response: {0}")]
    ResponseParsing(String),
}

/// A vision model that can describe an image
#[async_trait]
pub trait VisionExtractor: Send + Sync {
    /// Describe a base64-encoded image using the prompt for `focus`
    async fn describe(&self, image_base64: &str, focus: FocusArea) -> Result<String, VisionError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}
