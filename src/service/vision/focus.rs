//! Focus-area routing based on upload filenames

use crate::model::FocusArea;

const INTERIOR_KEYWORDS: &[&str] = &["interior", "inside", "dashboard", "seat"];
const WHEEL_KEYWORDS: &[&str] = &["wheel", "tire", "rim"];
const EXTERIOR_KEYWORDS: &[&str] = &["exterior", "outside", "body"];

/// Pick the prompt variant for an image from its filename
///
/// Categories are checked interior, wheels, exterior; the first match wins.
/// A missing filename is treated as `image_<index>`, which matches nothing.
pub fn determine_focus_area(filename: Option<&str>, index: usize) -> FocusArea {
    let name = match filename {
        Some(name) if !name.is_empty() => name.to_lowercase(),
        _ => format!("image_{}", index),
    };

    let mentions = |keywords: &[&str]| keywords.iter().any(|kw| name.contains(kw));

    if mentions(INTERIOR_KEYWORDS) {
        FocusArea::Interior
    } else if mentions(WHEEL_KEYWORDS) {
        FocusArea::Wheels
    } else if mentions(EXTERIOR_KEYWORDS) {
        FocusArea::Exterior
    } else {
        FocusArea::General
    }
}
