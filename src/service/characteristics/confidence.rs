//! Confidence computation for a single image extraction

use crate::model::{CharacteristicSet, is_sentinel};

/// Fraction of characteristics with a real (non-sentinel) value
///
/// Returns 0.0 for an empty set.
pub fn calculate_confidence_score(characteristics: &CharacteristicSet) -> f64 {
    if characteristics.is_empty() {
        return 0.0;
    }
    let total = characteristics.len();

    let identified = characteristics
        .values()
        .filter(|value| !is_sentinel(value))
        .count();

    (identified as f64 / total as f64).min(1.0)
}
