//! Analysis report returned to the presentation layer

use crate::error::Result;
use crate::processing::comparator::ComparisonResult;
use crate::processing::document::{ParsedResume, SkillSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one resume-versus-job analysis produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Fields extracted from the resume
    pub resume: ParsedResume,

    /// TF-IDF cosine similarity, 0-100
    pub match_score: f64,

    /// Skills recognised in the job description
    pub jd_skills: SkillSet,

    /// Matched and missing skills
    pub comparison: ComparisonResult,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the analyzer used
    pub analyzer_version: String,

    /// Resume file or upload name, when known
    pub resume_source: Option<String>,

    /// Total processing time
    pub processing_time_ms: u64,

    /// Language model used for annotation
    pub language_model: String,

    /// Number of phrases in the skill vocabulary
    pub vocabulary_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 75.0 => ScoreBand::Excellent,
            s if s >= 50.0 => ScoreBand::Good,
            s if s >= 25.0 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "EXCELLENT"),
            ScoreBand::Good => write!(f, "GOOD"),
            ScoreBand::Fair => write!(f, "FAIR"),
            ScoreBand::Poor => write!(f, "POOR"),
        }
    }
}

impl ReportMetadata {
    pub fn new(language_model: &str, vocabulary_size: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: None,
            processing_time_ms: 0,
            language_model: language_model.to_string(),
            vocabulary_size,
        }
    }
}

impl AnalysisReport {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.match_score)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(30.5), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Poor);
        assert_eq!(ScoreBand::Fair.to_string(), "FAIR");
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = ReportMetadata::new("rule-based-en", 41);
        assert_eq!(metadata.vocabulary_size, 41);
        assert_eq!(metadata.analyzer_version, env!("CARGO_PKG_VERSION"));
        assert!(metadata.resume_source.is_none());
    }
}
