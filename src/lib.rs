//! Resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{FailureKind, Result, ResumeAnalyzerError};
pub use output::report::AnalysisReport;
pub use processing::analyzer::AnalysisEngine;
pub use processing::document::{FieldValue, ParsedResume, SkillSet};
