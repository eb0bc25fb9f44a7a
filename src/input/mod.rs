//! Input processing module
//! Handles format detection, text extraction, and upload staging

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::DocumentFormat;
pub use manager::{InputManager, StagedUpload};
pub use text_extractor::extract_text;
