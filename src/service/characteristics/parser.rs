//! Pattern-based extraction of characteristics from vision model text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{CharacteristicKey, CharacteristicSet, NOT_SPECIFIED};

/// One compiled pattern per characteristic, in key declaration order
static CHARACTERISTIC_PATTERNS: Lazy<Vec<(CharacteristicKey, Regex)>> = Lazy::new(|| {
    CharacteristicKey::ALL
        .iter()
        .filter_map(|key| {
            let pattern = format!(r"(?i){}:?\s*(.+)", regex::escape(key.label()));
            match Regex::new(&pattern) {
                Ok(re) => Some((*key, re)),
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "Invalid characteristic pattern");
                    None
                }
            }
        })
        .collect()
});

/// Parse free text of the form "LABEL: value" into a characteristic set
///
/// Every known key is present in the result. Keys whose label does not
/// appear (or whose value is blank) are set to "Not specified".
pub fn parse_characteristics(text: &str) -> CharacteristicSet {
    let mut characteristics = CharacteristicSet::new();

    for (key, pattern) in CHARACTERISTIC_PATTERNS.iter() {
        let value = pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(NOT_SPECIFIED);
        characteristics.insert(key.as_str(), value);
    }

    characteristics
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"Here is my analysis:

1. VEHICLE TYPE: Sedan
2. BRAND/MAKE: BMW
3. MODEL: 3 Series
4. APPROXIMATE YEAR: 2018-2020
5. BODY CONDITION: good
6. paint condition:   excellent
7. WHEEL/TIRE CONDITION: Not visible
"#;

    #[test]
    fn test_parses_labelled_values() {
        let cs = parse_characteristics(SAMPLE);
        assert_eq!(cs.value(CharacteristicKey::VehicleType), Some("Sedan"));
        assert_eq!(cs.value(CharacteristicKey::Brand), Some("BMW"));
        assert_eq!(cs.value(CharacteristicKey::Year), Some("2018-2020"));
        assert_eq!(cs.value(CharacteristicKey::BodyCondition), Some("good"));
        assert_eq!(cs.value(CharacteristicKey::WheelCondition), Some("Not visible"));
    }

    #[test]
    fn test_matching_is_case_insensitive_and_trimmed() {
        let cs = parse_characteristics(SAMPLE);
        assert_eq!(cs.value(CharacteristicKey::PaintCondition), Some("excellent"));
    }

    #[test]
    fn test_every_key_present_for_any_text() {
        for text in ["", "nothing useful here", SAMPLE, "MODEL:\n\n"] {
            let cs = parse_characteristics(text);
            assert_eq!(cs.len(), CharacteristicKey::ALL.len());
            for key in CharacteristicKey::ALL {
                let value = cs.value(key).unwrap();
                assert!(value == NOT_SPECIFIED || (!value.is_empty() && value == value.trim()));
            }
        }
    }

    #[test]
    fn test_keys_follow_declaration_order() {
        let cs = parse_characteristics("");
        let keys: Vec<&str> = cs.iter().map(|(k, _)| k).collect();
        let expected: Vec<&str> = CharacteristicKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_unmatched_is_not_specified() {
        let cs = parse_characteristics("BRAND/MAKE: Honda");
        assert_eq!(cs.value(CharacteristicKey::Brand), Some("Honda"));
        assert_eq!(cs.value(CharacteristicKey::Modifications), Some(NOT_SPECIFIED));
        assert_eq!(cs.value(CharacteristicKey::OverallWheelGrade), Some(NOT_SPECIFIED));
    }

    #[test]
    fn test_value_is_first_match_on_its_line() {
        let cs = parse_characteristics("OVERALL_EXTERIOR_GRADE: fair\nOVERALL_EXTERIOR_GRADE: good");
        assert_eq!(cs.value(CharacteristicKey::OverallExteriorGrade), Some("fair"));
    }
}
