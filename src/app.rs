//! Application state and service initialization
//!
//! This module centralizes service construction so that `main` only has to
//! hand the resulting state to the HTTP server.

use std::sync::Arc;

use crate::model::{Config, VisionConfig};
use crate::service::{AppraisalService, OllamaVisionClient, VisionExtractor};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Photograph analysis and price estimation
    pub appraisal_service: Arc<AppraisalService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Vision model endpoint validation
    /// 2. Vision client initialization
    /// 3. Service dependency graph construction
    pub fn new(config: Config) -> Result<Self, AppError> {
        validate_vision_config(&config.vision)?;

        let vision_client = OllamaVisionClient::new(&config.vision)
            .map_err(|e| AppError::VisionInit(e.to_string()))?;

        tracing::info!(
            base_url = %config.vision.base_url,
            model = %config.vision.model,
            timeout_secs = config.vision.timeout_secs,
            "Vision client configured"
        );

        Ok(Self::with_vision(Arc::new(vision_client), config))
    }

    /// Build application state around an existing vision extractor
    pub fn with_vision(vision: Arc<dyn VisionExtractor>, config: Config) -> Self {
        Self {
            appraisal_service: Arc::new(AppraisalService::new(vision, config.limits)),
        }
    }
}

fn validate_vision_config(vision: &VisionConfig) -> Result<(), AppError> {
    let url = url::Url::parse(&vision.base_url)
        .map_err(|_| AppError::InvalidConfig("vision.base_url is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidConfig(
            "vision.base_url must use http or https",
        ));
    }
    if vision.model.trim().is_empty() {
        return Err(AppError::InvalidConfig("vision.model must not be empty"));
    }
    Ok(())
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Vision client could not be built
    #[error("Vision client initialization failed: {0}")]
    VisionInit(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(base_url: &str, model: &str) -> Config {
        let mut config = Config::default();
        config.vision.base_url = base_url.to_string();
        config.vision.model = model.to_string();
        config
    }

    #[test]
    fn test_default_config_builds_state() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.appraisal_service.limits().max_images_per_request, 10);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = AppState::new(config_with("not a url", "llava")).err().unwrap();
        assert!(matches!(err, AppError::InvalidConfig(_)));

        let err = AppState::new(config_with("ftp://models.local", "llava")).err().unwrap();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_model_rejected() {
        let err = AppState::new(config_with("http://localhost:11434", "  ")).err().unwrap();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }
}
