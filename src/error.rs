//! Error handling for the resume analyzer

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Language model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse failure category a caller can branch on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    UnsupportedFormat,
    ExtractionError,
    ModelUnavailable,
    Configuration,
    InvalidInput,
}

impl ResumeAnalyzerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResumeAnalyzerError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            ResumeAnalyzerError::Io(_) | ResumeAnalyzerError::Extraction(_) => {
                FailureKind::ExtractionError
            }
            ResumeAnalyzerError::ModelUnavailable(_) => FailureKind::ModelUnavailable,
            ResumeAnalyzerError::Configuration(_) | ResumeAnalyzerError::Serialization(_) => {
                FailureKind::Configuration
            }
            ResumeAnalyzerError::InvalidInput(_) => FailureKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = ResumeAnalyzerError::UnsupportedFormat("resume.txt".to_string());
        assert_eq!(err.kind(), FailureKind::UnsupportedFormat);

        let err = ResumeAnalyzerError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.kind(), FailureKind::ExtractionError);

        let err = ResumeAnalyzerError::ModelUnavailable("missing word list".to_string());
        assert_eq!(err.kind(), FailureKind::ModelUnavailable);
        assert!(err.to_string().contains("missing word list"));
    }
}
