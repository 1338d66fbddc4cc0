//! Turning vision model text into structured characteristics

pub mod confidence;
pub mod parser;

pub use confidence::calculate_confidence_score;
pub use parser::parse_characteristics;
