//! Deterministic price estimation from consolidated characteristics

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use super::factors::{negative_factors, positive_factors, price_recommendations};
use crate::model::{CharacteristicKey, CharacteristicSet, FactorsExplanation, PriceEstimate};

/// Brand substring -> multiplier. Scanned in order; first substring match wins.
const BRAND_MULTIPLIERS: &[(&str, f64)] = &[
    ("toyota", 1.0),
    ("honda", 1.0),
    ("nissan", 0.9),
    ("bmw", 1.5),
    ("mercedes", 1.6),
    ("audi", 1.4),
    ("lexus", 1.3),
    ("acura", 1.2),
    ("ford", 0.8),
    ("chevrolet", 0.8),
    ("hyundai", 0.9),
    ("renault", 0.85),
    ("peugeot", 0.85),
    ("volkswagen", 1.1),
    ("porsche", 2.0),
    ("ferrari", 3.0),
    ("lamborghini", 3.5),
];

/// Condition rating -> multiplier. Exact match after lowercasing.
const CONDITION_MULTIPLIERS: &[(&str, f64)] = &[
    ("excellent", 1.0),
    ("good", 0.85),
    ("fair", 0.7),
    ("poor", 0.5),
];

/// Market segment -> base price in dollars. Exact match after lowercasing.
const SEGMENT_BASE_PRICES: &[(&str, u32)] = &[
    ("luxury", 50_000),
    ("sports", 45_000),
    ("mid-range", 25_000),
    ("economy", 15_000),
    ("commercial", 30_000),
];

const DEFAULT_BASE_PRICE: u32 = 20_000;
const DEFAULT_BRAND_FACTOR: f64 = 1.0;
const DEFAULT_CONDITION_FACTOR: f64 = 0.8;

const DEPRECIATION_PER_YEAR: f64 = 0.05;
const MIN_AGE_FACTOR: f64 = 0.3;

static YEAR_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d{4})").ok());

/// Estimate a price using the current calendar year for depreciation
pub fn estimate_price(characteristics: &CharacteristicSet) -> PriceEstimate {
    estimate_price_for_year(characteristics, chrono::Local::now().year())
}

/// Estimate a price as if the current calendar year were `current_year`
///
/// price = segment base * brand factor * worst condition factor * age factor
pub fn estimate_price_for_year(
    characteristics: &CharacteristicSet,
    current_year: i32,
) -> PriceEstimate {
    let condition_factor = condition_factor(characteristics);
    let base_price = base_price(characteristics.value_or_empty(CharacteristicKey::MarketSegment));
    let brand_factor = brand_factor(characteristics.value_or_empty(CharacteristicKey::Brand));

    let mut estimate = f64::from(base_price) * brand_factor * condition_factor;

    if let Some(factor) = age_factor(
        characteristics.value_or_empty(CharacteristicKey::Year),
        current_year,
    ) {
        estimate *= factor;
    }

    tracing::debug!(
        base_price = base_price,
        brand_factor = brand_factor,
        condition_factor = condition_factor,
        estimate = estimate,
        "Computed price estimate"
    );

    PriceEstimate {
        estimated_price_range: format!(
            "${} - ${}",
            format_dollars(estimate * 0.8),
            format_dollars(estimate * 1.2)
        ),
        estimated_price: estimate as i64,
        base_price,
        brand_factor,
        condition_factor,
        factors_explanation: FactorsExplanation {
            positive_factors: positive_factors(characteristics),
            negative_factors: negative_factors(characteristics),
            recommendations: price_recommendations(characteristics),
        },
    }
}

/// Multiplier of the worst-rated condition, or 0.8 when none is rated
pub fn condition_factor(characteristics: &CharacteristicSet) -> f64 {
    CharacteristicKey::CONDITIONS
        .iter()
        .filter_map(|key| {
            let rating = characteristics.value_or_empty(*key).to_lowercase();
            lookup(CONDITION_MULTIPLIERS, &rating)
        })
        .reduce(f64::min)
        .unwrap_or(DEFAULT_CONDITION_FACTOR)
}

/// Base price for a market segment, or 20000 when unrecognized
pub fn base_price(segment: &str) -> u32 {
    lookup(SEGMENT_BASE_PRICES, &segment.to_lowercase()).unwrap_or(DEFAULT_BASE_PRICE)
}

/// Multiplier of the first table brand contained in `brand`, or 1.0
pub fn brand_factor(brand: &str) -> f64 {
    let brand = brand.to_lowercase();
    BRAND_MULTIPLIERS
        .iter()
        .find(|(name, _)| brand.contains(name))
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_BRAND_FACTOR)
}

/// Depreciation multiplier for the first four-digit run in `year_value`
///
/// Loses 5% per year of age, never below 30%. `None` means no usable
/// year was found and the estimate is left unadjusted.
pub fn age_factor(year_value: &str, current_year: i32) -> Option<f64> {
    let pattern = YEAR_PATTERN.as_ref()?;
    let year: i32 = pattern.captures(year_value)?.get(1)?.as_str().parse().ok()?;
    let age = f64::from(current_year - year);
    Some((1.0 - age * DEPRECIATION_PER_YEAR).max(MIN_AGE_FACTOR))
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// Whole dollars (ties to even) with comma grouping, e.g. 1234567.6 -> "1,234,568"
fn format_dollars(amount: f64) -> String {
    let rounded = format!("{:.0}", amount);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}
