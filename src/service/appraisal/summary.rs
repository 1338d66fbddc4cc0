//! Human-readable synopsis of a multi-image analysis

use indexmap::IndexMap;

use crate::model::{
    AnalysisQuality, AnalysisSummary, CharacteristicKey, CharacteristicSet, ImageAnalysisResult,
    NOT_DETERMINED, UNKNOWN,
};

/// Conditions reported in the assessment, in display order
const ASSESSED_CONDITIONS: [CharacteristicKey; 4] = [
    CharacteristicKey::BodyCondition,
    CharacteristicKey::PaintCondition,
    CharacteristicKey::WheelCondition,
    CharacteristicKey::InteriorCondition,
];

const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

const CLEARER_IMAGES_RECOMMENDATION: &str = "Consider uploading clearer images for better analysis";
const WEAR_RECOMMENDATION: &str = "Vehicle shows signs of wear - consider professional inspection";

/// Summarize individual results and their consolidation
pub fn generate_analysis_summary(
    individual_analyses: &[ImageAnalysisResult],
    consolidated: &CharacteristicSet,
    overall_confidence: f64,
) -> AnalysisSummary {
    let mut key_findings = Vec::new();

    let field = |key: CharacteristicKey| consolidated.value(key).unwrap_or(UNKNOWN);
    let brand = field(CharacteristicKey::Brand);
    if brand != UNKNOWN {
        key_findings.push(format!(
            "Vehicle identified as {} {} ({})",
            brand,
            field(CharacteristicKey::Model),
            field(CharacteristicKey::Year)
        ));
    }

    let condition_assessment: IndexMap<String, String> = ASSESSED_CONDITIONS
        .iter()
        .filter_map(|key| {
            let value = consolidated.value(*key).unwrap_or(NOT_DETERMINED);
            (value != NOT_DETERMINED).then(|| (key.title(), value.to_string()))
        })
        .collect();

    let mut recommendations = Vec::new();
    if overall_confidence < LOW_CONFIDENCE_THRESHOLD {
        recommendations.push(CLEARER_IMAGES_RECOMMENDATION.to_string());
    }
    if condition_assessment
        .values()
        .any(|value| value.to_lowercase().contains("poor"))
    {
        recommendations.push(WEAR_RECOMMENDATION.to_string());
    }

    AnalysisSummary {
        total_images: individual_analyses.len(),
        overall_confidence: round_to_hundredths(overall_confidence),
        analysis_quality: AnalysisQuality::from_confidence(overall_confidence),
        key_findings,
        condition_assessment,
        recommendations,
    }
}

/// Two-decimal rounding with ties to even, e.g. 0.125 -> 0.12
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
