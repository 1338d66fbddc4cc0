use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::characteristics::CharacteristicSet;

/// Which prompt variant the vision model receives for an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    General,
    Exterior,
    Interior,
    Wheels,
}

impl FocusArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::General => "general",
            FocusArea::Exterior => "exterior",
            FocusArea::Interior => "interior",
            FocusArea::Wheels => "wheels",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis of a single submitted photograph
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageAnalysisResult {
    /// Uploaded filename, or `image_<n>` when the upload had none
    pub image_name: String,
    #[schema(value_type = Object)]
    pub characteristics: CharacteristicSet,
    /// Fraction of characteristics that were identified, in [0.0, 1.0]
    pub confidence_score: f64,
    /// Raw vision model answer, kept for auditing
    pub analysis_notes: String,
}

/// Majority-merged view across all images of one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedResult {
    pub characteristics: CharacteristicSet,
    /// Mean of the per-image confidence scores (0.0 when there are none)
    pub overall_confidence: f64,
}

/// One file received over the HTTP boundary
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// True when the declared content type is an `image/*` type
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    /// Filename for display, falling back to `image_<position>` (1-based)
    pub fn display_name(&self, position: usize) -> String {
        upload_display_name(self.filename.as_deref(), position)
    }
}

/// Display name for an upload that may not have been fully received yet
pub fn upload_display_name(filename: Option<&str>, position: usize) -> String {
    match filename {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("image_{}", position),
    }
}
