//! Vehicle appraisal service
//!
//! Runs uploaded photographs through the vision model, turns the answers
//! into characteristics and derives a price estimate and summary.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::model::{
    AnalysisSummary, CharacteristicSet, FocusArea, ImageAnalysisResult, ImageUpload,
    LimitsConfig, PriceEstimate,
};
use crate::service::characteristics::{calculate_confidence_score, parse_characteristics};
use crate::service::vision::{VisionError, VisionExtractor, determine_focus_area};

pub mod consolidation;
pub mod factors;
pub mod pricing;
pub mod summary;

pub use consolidation::consolidate_analyses;
pub use pricing::estimate_price;
pub use summary::generate_analysis_summary;

/// Outcome of analyzing one photograph
#[derive(Debug, Clone)]
pub struct SingleAnalysis {
    pub characteristics: CharacteristicSet,
    pub price_estimation: PriceEstimate,
    pub raw_analysis: String,
}

/// Outcome of analyzing several photographs of the same vehicle
#[derive(Debug, Clone)]
pub struct MultiAnalysis {
    pub consolidated_characteristics: CharacteristicSet,
    pub price_estimation: PriceEstimate,
    pub individual_analyses: Vec<ImageAnalysisResult>,
    pub analysis_summary: AnalysisSummary,
}

/// Service for appraising vehicles from photographs
pub struct AppraisalService {
    vision: Arc<dyn VisionExtractor>,
    limits: LimitsConfig,
}

impl AppraisalService {
    pub fn new(vision: Arc<dyn VisionExtractor>, limits: LimitsConfig) -> Self {
        Self { vision, limits }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Analyze one photograph with the general prompt and price the result
    pub async fn analyze_single(
        &self,
        upload: &ImageUpload,
    ) -> Result<SingleAnalysis, AppraisalError> {
        if !upload.is_image() {
            return Err(AppraisalError::InvalidInput(
                "File must be an image".to_string(),
            ));
        }
        let image_name = upload.display_name(1);
        self.check_size(upload, &image_name)?;

        let start_time = std::time::Instant::now();
        let raw_analysis = self
            .extract(upload, &image_name, FocusArea::General)
            .await?;

        let characteristics = parse_characteristics(&raw_analysis);
        let price_estimation = estimate_price(&characteristics);

        tracing::info!(
            image = %image_name,
            model = %self.vision.model(),
            elapsed_ms = start_time.elapsed().as_millis(),
            estimated_price = price_estimation.estimated_price,
            "Single image analysis completed"
        );

        Ok(SingleAnalysis {
            characteristics,
            price_estimation,
            raw_analysis,
        })
    }

    /// Analyze several photographs and merge them into one appraisal
    ///
    /// Every upload is validated before the first extraction. Images are
    /// then extracted one at a time in submission order, each with the
    /// prompt its filename selects. `analysis_focus` is recorded in the
    /// logs and does not change the analysis.
    pub async fn analyze_multiple(
        &self,
        uploads: &[ImageUpload],
        analysis_focus: &str,
    ) -> Result<MultiAnalysis, AppraisalError> {
        self.validate_batch(uploads)?;

        let start_time = std::time::Instant::now();
        tracing::info!(
            images = uploads.len(),
            analysis_focus = %analysis_focus,
            model = %self.vision.model(),
            "Starting multi-image analysis"
        );

        let mut individual_analyses = Vec::with_capacity(uploads.len());
        for (index, upload) in uploads.iter().enumerate() {
            let image_name = upload.display_name(index + 1);
            let focus = determine_focus_area(upload.filename.as_deref(), index);

            let analysis_notes = self.extract(upload, &image_name, focus).await?;
            let characteristics = parse_characteristics(&analysis_notes);
            let confidence_score = calculate_confidence_score(&characteristics);

            tracing::debug!(
                image = %image_name,
                focus = %focus,
                confidence = confidence_score,
                "Image analyzed"
            );

            individual_analyses.push(ImageAnalysisResult {
                image_name,
                characteristics,
                confidence_score,
                analysis_notes,
            });
        }

        let consolidated = consolidate_analyses(&individual_analyses);
        let price_estimation = estimate_price(&consolidated.characteristics);
        let analysis_summary = generate_analysis_summary(
            &individual_analyses,
            &consolidated.characteristics,
            consolidated.overall_confidence,
        );

        tracing::info!(
            images = individual_analyses.len(),
            overall_confidence = consolidated.overall_confidence,
            estimated_price = price_estimation.estimated_price,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Multi-image analysis completed"
        );

        Ok(MultiAnalysis {
            consolidated_characteristics: consolidated.characteristics,
            price_estimation,
            individual_analyses,
            analysis_summary,
        })
    }

    fn validate_batch(&self, uploads: &[ImageUpload]) -> Result<(), AppraisalError> {
        let max_images = self.limits.max_images_per_request;
        if uploads.len() > max_images {
            return Err(AppraisalError::InvalidInput(format!(
                "Maximum {} images allowed",
                max_images
            )));
        }
        if uploads.is_empty() {
            return Err(AppraisalError::InvalidInput(
                "At least one image is required".to_string(),
            ));
        }

        for (index, upload) in uploads.iter().enumerate() {
            let image_name = upload.display_name(index + 1);
            if !upload.is_image() {
                return Err(AppraisalError::InvalidInput(format!(
                    "File {} must be an image",
                    image_name
                )));
            }
            self.check_size(upload, &image_name)?;
        }
        Ok(())
    }

    fn check_size(&self, upload: &ImageUpload, image_name: &str) -> Result<(), AppraisalError> {
        if upload.data.len() > self.limits.max_image_bytes {
            return Err(AppraisalError::InvalidInput(format!(
                "File {} exceeds the maximum size of {} bytes",
                image_name, self.limits.max_image_bytes
            )));
        }
        Ok(())
    }

    async fn extract(
        &self,
        upload: &ImageUpload,
        image_name: &str,
        focus: FocusArea,
    ) -> Result<String, AppraisalError> {
        let encoded = STANDARD.encode(&upload.data);
        self.vision
            .describe(&encoded, focus)
            .await
            .map_err(|source| {
                tracing::error!(
                    image = %image_name,
                    focus = %focus,
                    error = %source,
                    "Vision model call failed"
                );
                AppraisalError::ExtractionFailed {
                    image: image_name.to_string(),
                    source,
                }
            })
    }
}

/// Error type for appraisal operations
#[derive(Debug, thiserror::Error)]
pub enum AppraisalError {
    /// The request was rejected before any image was analyzed
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to analyze image {image}: {source}")]
    ExtractionFailed {
        image: String,
        #[source]
        source: VisionError,
    },
}
