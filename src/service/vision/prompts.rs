//! Prompt templates for each focus area
//!
//! The labels in these prompts must stay in sync with
//! `CharacteristicKey::label`, which the parser matches against.

use crate::model::FocusArea;

/// Full appraisal prompt used for unclassified photographs
pub const GENERAL_PROMPT: &str = r#"Analyze this car image and extract the following characteristics:

1. VEHICLE TYPE: (sedan, SUV, hatchback, coupe, convertible, truck, etc.)
2. BRAND/MAKE: (Toyota, BMW, Mercedes, etc.)
3. MODEL: (if identifiable)
4. APPROXIMATE YEAR: (estimate based on design)
5. BODY CONDITION: (excellent, good, fair, poor - look for dents, scratches, rust)
6. PAINT CONDITION: (excellent, good, faded, scratched, damaged)
7. WHEEL/TIRE CONDITION: (new, good, worn, damaged)
8. SIZE CATEGORY: (compact, mid-size, full-size, luxury)
9. SPECIAL FEATURES: (sunroof, spoiler, custom wheels, etc.)
10. ESTIMATED MILEAGE CATEGORY: (low, medium, high - based on wear visible)
11. MARKET SEGMENT: (economy, mid-range, luxury, sports, commercial)
12. NOTABLE DAMAGE: (any visible damage that would affect price)
13. INTERIOR CONDITION: (if visible - excellent, good, fair, poor)
14. MODIFICATIONS: (any aftermarket modifications visible)
15. CONFIDENCE_LEVEL: (high, medium, low - how confident are you in this analysis)

Be specific and detailed. If you can't determine something, say "Unknown" or "Not visible".
Focus on details that would affect the car's market value."#;

pub const EXTERIOR_PROMPT: &str = r#"Focus specifically on the EXTERIOR condition of this car:

1. PAINT CONDITION: Detail any scratches, dents, rust, fading
2. BODY PANELS: Check alignment, gaps, damage
3. BUMPERS: Condition, cracks, misalignment
4. LIGHTS: Headlights, taillights, indicators condition
5. WINDOWS: Cracks, tinting, condition
6. MIRRORS: Condition and completeness
7. TRIM: Chrome, plastic trim condition
8. OVERALL_EXTERIOR_GRADE: (excellent, good, fair, poor)

Rate the exterior condition and note any issues that would affect resale value."#;

pub const INTERIOR_PROMPT: &str = r#"Focus specifically on the INTERIOR condition of this car:

1. SEAT_CONDITION: Wear, tears, stains, material type
2. DASHBOARD: Cracks, wear, functionality
3. STEERING_WHEEL: Condition, wear patterns
4. ELECTRONICS: Visible screen, controls condition
5. UPHOLSTERY: Overall condition, material quality
6. CLEANLINESS: Overall interior cleanliness
7. WEAR_PATTERNS: Signs of heavy use or care
8. OVERALL_INTERIOR_GRADE: (excellent, good, fair, poor)

Assess the interior condition and note any issues affecting value."#;

pub const WHEELS_PROMPT: &str = r#"Focus specifically on WHEELS and TIRES:

1. TIRE_CONDITION: Tread depth, wear patterns, age
2. WHEEL_CONDITION: Scratches, dents, curb damage
3. TIRE_BRAND: If visible, tire brand and quality
4. WHEEL_TYPE: Alloy, steel, aftermarket, stock
5. SIZE: Estimate wheel/tire size
6. ALIGNMENT_ISSUES: Uneven wear patterns
7. OVERALL_WHEEL_GRADE: (excellent, good, fair, poor)

Evaluate the wheels and tires condition for safety and value impact."#;

/// Prompt sent to the vision model for a focus area
pub fn prompt_for(focus: FocusArea) -> &'static str {
    match focus {
        FocusArea::General => GENERAL_PROMPT,
        FocusArea::Exterior => EXTERIOR_PROMPT,
        FocusArea::Interior => INTERIOR_PROMPT,
        FocusArea::Wheels => WHEELS_PROMPT,
    }
}
