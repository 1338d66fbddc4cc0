pub mod appraisal;
pub mod characteristics;
pub mod vision;

pub use appraisal::{AppraisalError, AppraisalService};
pub use vision::{OllamaVisionClient, VisionExtractor};
