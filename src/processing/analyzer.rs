//! Analysis engine sequencing extraction, matching, and scoring

use crate::config::Config;
use crate::error::Result;
use crate::input::manager::InputManager;
use crate::output::report::{AnalysisReport, ReportMetadata};
use crate::processing::comparator::compare;
use crate::processing::document::{ParsedResume, ResumeDocument, SkillSet};
use crate::processing::field_extractor::FieldExtractor;
use crate::processing::language_model::{shared_model, LanguageModel};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skill_matcher::match_tokens;
use crate::processing::vocabulary::SkillVocabulary;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Runs one resume against one job description.
///
/// Holds only read-only state, so a single engine can serve concurrent callers.
pub struct AnalysisEngine<'m> {
    model: &'m dyn LanguageModel,
    vocabulary: &'static SkillVocabulary,
    field_extractor: FieldExtractor,
    scorer: SimilarityScorer,
    config: Config,
}

impl<'m> AnalysisEngine<'m> {
    pub fn new(model: &'m dyn LanguageModel, config: Config) -> Result<Self> {
        config.validate()?;
        let vocabulary = SkillVocabulary::shared();

        Ok(Self {
            model,
            vocabulary,
            field_extractor: FieldExtractor::new(&config.extraction, vocabulary)?,
            scorer: SimilarityScorer::from_config(&config.scoring),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.vocabulary
    }

    pub fn parse_resume(&self, document: &ResumeDocument) -> Result<ParsedResume> {
        info!("Parsing {} resume ({} bytes)", document.format(), document.bytes().len());
        let text = document.extract()?;
        Ok(self.field_extractor.extract_fields(self.model, &text))
    }

    pub fn parse_resume_file(&self, path: &Path) -> Result<ParsedResume> {
        let mut input = InputManager::from_config(&self.config.input).with_cache(false);
        let text = input.extract_file(path)?;
        Ok(self.field_extractor.extract_fields(self.model, &text))
    }

    /// Skills named in a job description; empty for a blank description.
    pub fn jd_skills(&self, jd_text: &str) -> SkillSet {
        if jd_text.trim().is_empty() {
            return SkillSet::default();
        }
        match_tokens(&self.model.tokenize(jd_text), self.vocabulary)
    }

    pub fn score(&self, resume_text: &str, jd_text: &str) -> f64 {
        self.scorer.score(resume_text, jd_text)
    }

    pub fn analyze(&self, resume: &ParsedResume, jd_text: &str) -> AnalysisReport {
        let start_time = Instant::now();

        let match_score = self.score(&resume.text, jd_text);
        let jd_skills = self.jd_skills(jd_text);
        let comparison = compare(&resume.skill_set(), &jd_skills);
        debug!(
            "{} JD skills, {} matched, {} missing",
            jd_skills.len(),
            comparison.matched_count(),
            comparison.missing_count()
        );

        let mut metadata = ReportMetadata::new(self.model.name(), self.vocabulary.len());
        metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Analysis complete: match score {:.2}%", match_score);

        AnalysisReport {
            resume: resume.clone(),
            match_score,
            jd_skills,
            comparison,
            metadata,
        }
    }

    pub fn analyze_document(&self, document: &ResumeDocument, jd_text: &str) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let resume = self.parse_resume(document)?;
        let mut report = self.analyze(&resume, jd_text);
        report.metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;
        Ok(report)
    }

    pub fn analyze_file(&self, path: &Path, jd_text: &str) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let resume = self.parse_resume_file(path)?;
        let mut report = self.analyze(&resume, jd_text);
        report.metadata.resume_source = Some(path.display().to_string());
        report.metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Stage uploaded bytes in a temp file, analyze it, and remove the file
    /// on every exit path.
    pub fn analyze_upload(&self, bytes: &[u8], file_name: &str, jd_text: &str) -> Result<AnalysisReport> {
        let staged = InputManager::from_config(&self.config.input).stage_upload(bytes, file_name)?;
        let mut report = self.analyze_file(staged.path(), jd_text)?;
        report.metadata.resume_source = Some(file_name.to_string());
        Ok(report)
    }
}

impl AnalysisEngine<'static> {
    /// Engine backed by the process-wide model.
    pub fn shared(config: Config) -> Result<Self> {
        let model = shared_model(&config.model)?;
        Self::new(model, config)
    }
}
