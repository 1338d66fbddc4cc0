use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Price estimate derived from a characteristic set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceEstimate {
    /// Display range, e.g. "$60,000 - $90,000" (estimate -20% / +20%)
    pub estimated_price_range: String,
    /// Truncated estimate in dollars
    pub estimated_price: i64,
    /// Segment base price before multipliers
    pub base_price: u32,
    pub brand_factor: f64,
    /// Multiplier of the worst-rated condition
    pub condition_factor: f64,
    pub factors_explanation: FactorsExplanation,
}

/// Human-readable reasons behind an estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FactorsExplanation {
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
    pub recommendations: Vec<String>,
}
