//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub enable_cache: bool,
    /// Directory for staged uploads; the system temp dir when unset.
    pub staging_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Sentences containing any of these (case-insensitive) are kept as education.
    pub education_keywords: Vec<String>,
}

/// Which language model annotates resumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelBackend {
    /// Transformer NER when built with the `ner` feature and loadable, rule-based otherwise.
    #[default]
    Auto,
    /// Transformer NER only; fails with `ModelUnavailable` if it cannot be loaded.
    Ner,
    RuleBased,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    /// Longest run of capitalized tokens still accepted as a person name.
    pub max_name_tokens: usize,
    pub extra_non_name_words: Vec<String>,
    /// Optional word list (one per line, `#` comments) of words that never start or continue a name.
    pub non_name_words_path: Option<PathBuf>,
}

/// Largest accepted `ScoringConfig::precision`.
pub const MAX_SCORE_PRECISION: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Decimal places kept on the match score.
    pub precision: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub use_colors: bool,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}. Supported: console, json", s)),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            use_colors: true,
            detailed: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            staging_dir: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            education_keywords: [
                "education", "university", "college", "institute", "bachelor", "master", "phd",
                "degree", "qualification", "academic", "school", "cgpa", "gpa",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::Auto,
            max_name_tokens: 4,
            extra_non_name_words: Vec::new(),
            non_name_words_path: None,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            extraction: ExtractionConfig::default(),
            model: ModelConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.max_name_tokens < 2 {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "model.max_name_tokens must be at least 2, got {}",
                self.model.max_name_tokens
            )));
        }
        if self.extraction.education_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ResumeAnalyzerError::Configuration(
                "extraction.education_keywords must not be empty".to_string(),
            ));
        }
        if self.scoring.precision > MAX_SCORE_PRECISION {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "scoring.precision must be at most {}, got {}",
                MAX_SCORE_PRECISION, self.scoring.precision
            )));
        }
        Ok(())
    }
}
