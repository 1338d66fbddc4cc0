pub mod analysis;
pub mod characteristics;
pub mod config;
pub mod pricing;
pub mod summary;

pub use analysis::{
    ConsolidatedResult, FocusArea, ImageAnalysisResult, ImageUpload, upload_display_name,
};
pub use characteristics::{
    CharacteristicKey, CharacteristicSet, NOT_DETERMINED, NOT_SPECIFIED, UNKNOWN, is_sentinel,
};
pub use config::{Config, CorsConfig, LimitsConfig, VisionConfig};
pub use pricing::{FactorsExplanation, PriceEstimate};
pub use summary::{AnalysisQuality, AnalysisSummary};
