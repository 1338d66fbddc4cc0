//! Explanatory factors attached to a price estimate

use crate::model::{CharacteristicKey, CharacteristicSet, NOT_SPECIFIED};

/// (characteristic, lower-case substring, explanation)
type FactorRule = (CharacteristicKey, &'static str, &'static str);

const POSITIVE_RULES: &[FactorRule] = &[
    (CharacteristicKey::MarketSegment, "luxury", "Luxury vehicle segment"),
    (CharacteristicKey::BodyCondition, "excellent", "Excellent body condition"),
    (CharacteristicKey::MileageCategory, "low", "Low estimated mileage"),
];

const NEGATIVE_RULES: &[FactorRule] = &[
    (CharacteristicKey::BodyCondition, "poor", "Poor body condition"),
    (CharacteristicKey::Damage, "damaged", "Visible damage present"),
    (CharacteristicKey::MileageCategory, "high", "High estimated mileage"),
];

const INSPECTION_RECOMMENDATION: &str = "Consider professional inspection before purchase";
const MODIFICATIONS_RECOMMENDATION: &str = "Check if modifications affect warranty or insurance";

fn apply_rules(characteristics: &CharacteristicSet, rules: &[FactorRule]) -> Vec<String> {
    rules
        .iter()
        .filter(|(key, needle, _)| {
            characteristics
                .value_or_empty(*key)
                .to_lowercase()
                .contains(needle)
        })
        .map(|(_, _, explanation)| explanation.to_string())
        .collect()
}

/// Factors that push the price up
pub fn positive_factors(characteristics: &CharacteristicSet) -> Vec<String> {
    apply_rules(characteristics, POSITIVE_RULES)
}

/// Factors that push the price down
pub fn negative_factors(characteristics: &CharacteristicSet) -> Vec<String> {
    apply_rules(characteristics, NEGATIVE_RULES)
}

/// Buyer-facing advice derived from the whole characteristic set
pub fn price_recommendations(characteristics: &CharacteristicSet) -> Vec<String> {
    let mut recommendations = Vec::new();

    if characteristics
        .values()
        .any(|value| value.to_lowercase().contains("poor"))
    {
        recommendations.push(INSPECTION_RECOMMENDATION.to_string());
    }

    if characteristics
        .value(CharacteristicKey::Modifications)
        .is_some_and(|value| value != NOT_SPECIFIED)
    {
        recommendations.push(MODIFICATIONS_RECOMMENDATION.to_string());
    }

    recommendations
}
