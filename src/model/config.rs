use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "CAR_ANALYZER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";
const ENV_VISION_MODEL: &str = "VISION_MODEL";
const ENV_CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_VISION_MODEL: &str = "llava";
const DEFAULT_VISION_TIMEOUT_SECS: u64 = 300;

/// Default upper bound on images per multi-image request
pub const DEFAULT_MAX_IMAGES_PER_REQUEST: usize = 10;

/// Default upper bound on a single uploaded image (10 MB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Vision model endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Vision-capable model name
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_VISION_MODEL.to_string(),
            timeout_secs: DEFAULT_VISION_TIMEOUT_SECS,
        }
    }
}

/// Request size limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_images_per_request: usize,
    pub max_image_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_images_per_request: DEFAULT_MAX_IMAGES_PER_REQUEST,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

/// Cross-origin access for browser clients
///
/// An empty origin list allows any origin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Parse a comma-separated origin list, skipping blank entries
    pub fn from_list(list: &str) -> Self {
        Self {
            allowed_origins: list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub vision: VisionConfig,
    pub limits: LimitsConfig,
    pub cors: CorsConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
            port: 8000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut vision = file.vision;
        if let Ok(base_url) = std::env::var(ENV_OLLAMA_BASE_URL) {
            vision.base_url = base_url;
        }
        if let Ok(model) = std::env::var(ENV_VISION_MODEL) {
            vision.model = model;
        }

        let cors = match std::env::var(ENV_CORS_ALLOWED_ORIGINS) {
            Ok(list) => CorsConfig::from_list(&list),
            Err(_) => file.cors,
        };

        Self {
            vision,
            limits: file.limits,
            cors,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents).inspect(|_| {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let file = Config::parse_config("  \n").unwrap();
        assert_eq!(file.vision.model, "llava");
        assert_eq!(file.limits.max_images_per_request, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let yaml = "vision:\n  model: llava:13b\nlimits:\n  max_images_per_request: 4\n";
        let file = Config::parse_config(yaml).unwrap();
        assert_eq!(file.vision.model, "llava:13b");
        assert_eq!(file.vision.base_url, "http://localhost:11434");
        assert_eq!(file.vision.timeout_secs, 300);
        assert_eq!(file.limits.max_images_per_request, 4);
        assert_eq!(file.limits.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
    }

    #[test]
    fn test_cors_origins_from_file_and_list() {
        let file = Config::parse_config("").unwrap();
        assert!(file.cors.allowed_origins.is_empty());

        let yaml = "cors:\n  allowed_origins:\n    - http://localhost:3000\n";
        let file = Config::parse_config(yaml).unwrap();
        assert_eq!(file.cors.allowed_origins, vec!["http://localhost:3000"]);

        let cors = CorsConfig::from_list(" http://a.example , ,http://b.example");
        assert_eq!(cors.allowed_origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(Config::parse_config("vision: [unclosed").is_none());
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }
}
