//! Vehicle characteristics extracted from vision model output

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value emitted by the parser when a characteristic has no match
pub const NOT_SPECIFIED: &str = "Not specified";

/// Value emitted by consolidation when no image identified a characteristic
pub const NOT_DETERMINED: &str = "Not determined";

/// Placeholder the vision model uses when it cannot tell
pub const UNKNOWN: &str = "Unknown";

/// Placeholder the vision model uses when the feature is out of frame
pub const NOT_VISIBLE: &str = "Not visible";

/// Values that carry no information. Matched exactly, case-sensitive.
const SENTINELS: &[&str] = &[NOT_SPECIFIED, UNKNOWN, NOT_VISIBLE, ""];

/// Returns true when `value` is a placeholder rather than an observation
pub fn is_sentinel(value: &str) -> bool {
    SENTINELS.contains(&value)
}

/// Closed set of characteristics the parser knows how to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicKey {
    VehicleType,
    Brand,
    Model,
    Year,
    BodyCondition,
    PaintCondition,
    WheelCondition,
    SizeCategory,
    SpecialFeatures,
    MileageCategory,
    MarketSegment,
    Damage,
    InteriorCondition,
    Modifications,
    ConfidenceLevel,
    OverallExteriorGrade,
    OverallInteriorGrade,
    OverallWheelGrade,
}

impl CharacteristicKey {
    /// Every key, in declaration order
    pub const ALL: [CharacteristicKey; 18] = [
        Self::VehicleType,
        Self::Brand,
        Self::Model,
        Self::Year,
        Self::BodyCondition,
        Self::PaintCondition,
        Self::WheelCondition,
        Self::SizeCategory,
        Self::SpecialFeatures,
        Self::MileageCategory,
        Self::MarketSegment,
        Self::Damage,
        Self::InteriorCondition,
        Self::Modifications,
        Self::ConfidenceLevel,
        Self::OverallExteriorGrade,
        Self::OverallInteriorGrade,
        Self::OverallWheelGrade,
    ];

    /// The four keys that feed the condition factor, in pricing order
    pub const CONDITIONS: [CharacteristicKey; 4] = [
        Self::BodyCondition,
        Self::PaintCondition,
        Self::InteriorCondition,
        Self::WheelCondition,
    ];

    /// Wire name used in characteristic maps and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VehicleType => "vehicle_type",
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Year => "year",
            Self::BodyCondition => "body_condition",
            Self::PaintCondition => "paint_condition",
            Self::WheelCondition => "wheel_condition",
            Self::SizeCategory => "size_category",
            Self::SpecialFeatures => "special_features",
            Self::MileageCategory => "mileage_category",
            Self::MarketSegment => "market_segment",
            Self::Damage => "damage",
            Self::InteriorCondition => "interior_condition",
            Self::Modifications => "modifications",
            Self::ConfidenceLevel => "confidence_level",
            Self::OverallExteriorGrade => "overall_exterior_grade",
            Self::OverallInteriorGrade => "overall_interior_grade",
            Self::OverallWheelGrade => "overall_wheel_grade",
        }
    }

    /// Label the vision prompts ask the model to answer with ("LABEL: value")
    pub fn label(&self) -> &'static str {
        match self {
            Self::VehicleType => "VEHICLE TYPE",
            Self::Brand => "BRAND/MAKE",
            Self::Model => "MODEL",
            Self::Year => "APPROXIMATE YEAR",
            Self::BodyCondition => "BODY CONDITION",
            Self::PaintCondition => "PAINT CONDITION",
            Self::WheelCondition => "WHEEL/TIRE CONDITION",
            Self::SizeCategory => "SIZE CATEGORY",
            Self::SpecialFeatures => "SPECIAL FEATURES",
            Self::MileageCategory => "ESTIMATED MILEAGE CATEGORY",
            Self::MarketSegment => "MARKET SEGMENT",
            Self::Damage => "NOTABLE DAMAGE",
            Self::InteriorCondition => "INTERIOR CONDITION",
            Self::Modifications => "MODIFICATIONS",
            Self::ConfidenceLevel => "CONFIDENCE_LEVEL",
            Self::OverallExteriorGrade => "OVERALL_EXTERIOR_GRADE",
            Self::OverallInteriorGrade => "OVERALL_INTERIOR_GRADE",
            Self::OverallWheelGrade => "OVERALL_WHEEL_GRADE",
        }
    }

    /// Human-readable title ("body_condition" -> "Body Condition")
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CharacteristicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characteristic name -> free-text value, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacteristicSet(IndexMap<String, String>);

impl CharacteristicSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for a well-known key, if present
    pub fn value(&self, key: CharacteristicKey) -> Option<&str> {
        self.get(key.as_str())
    }

    /// Value for a well-known key, or the empty string when absent
    pub fn value_or_empty(&self, key: CharacteristicKey) -> &str {
        self.value(key).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CharacteristicSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
