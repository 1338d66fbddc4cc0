//! Majority-vote consolidation of per-image characteristics

use indexmap::IndexMap;

use crate::model::{
    CharacteristicSet, ConsolidatedResult, ImageAnalysisResult, NOT_DETERMINED, is_sentinel,
};

/// Merge per-image analyses into one characteristic set and confidence
///
/// 1. Collect non-sentinel values per key, in the order results were given
/// 2. Each key takes its most frequent value; ties go to the earliest seen
/// 3. Keys seen only with sentinel values become "Not determined"
/// 4. Overall confidence is the mean of the per-image scores (0.0 if none)
///
/// Keys appear in the order they were first seen across results.
pub fn consolidate_analyses(results: &[ImageAnalysisResult]) -> ConsolidatedResult {
    let mut observed: IndexMap<&str, Vec<&str>> = IndexMap::new();

    for result in results {
        for (key, value) in result.characteristics.iter() {
            let values = observed.entry(key).or_default();
            if !is_sentinel(value) {
                values.push(value);
            }
        }
    }

    let characteristics: CharacteristicSet = observed
        .into_iter()
        .map(|(key, values)| {
            let value = most_common_value(&values).unwrap_or(NOT_DETERMINED);
            (key, value)
        })
        .collect();

    let overall_confidence = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.confidence_score).sum::<f64>() / results.len() as f64
    };

    tracing::debug!(
        images = results.len(),
        keys = characteristics.len(),
        overall_confidence = overall_confidence,
        "Consolidated image analyses"
    );

    ConsolidatedResult {
        characteristics,
        overall_confidence,
    }
}

/// Most frequent value; among equally frequent values the first seen wins
///
/// Returns `None` for an empty list.
pub fn most_common_value<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
