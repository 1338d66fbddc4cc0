use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse quality label for a multi-image analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AnalysisQuality {
    High,
    Medium,
    Low,
}

impl AnalysisQuality {
    /// High above 0.7, Medium above 0.4, Low otherwise (boundaries fall down)
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.7 {
            AnalysisQuality::High
        } else if confidence > 0.4 {
            AnalysisQuality::Medium
        } else {
            AnalysisQuality::Low
        }
    }
}

/// Synopsis of a multi-image analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisSummary {
    pub total_images: usize,
    /// Overall confidence rounded to two decimals
    pub overall_confidence: f64,
    pub analysis_quality: AnalysisQuality,
    pub key_findings: Vec<String>,
    /// Condition title (e.g. "Body Condition") -> consolidated value
    #[schema(value_type = Object)]
    pub condition_assessment: IndexMap<String, String>,
    pub recommendations: Vec<String>,
}
