//! Field extraction heuristics for resume text

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::document::{ExtractedText, FieldValue, ParsedResume, SkillSet};
use crate::processing::language_model::{AnnotatedText, EntityLabel, LanguageModel};
use crate::processing::skill_matcher::match_tokens;
use crate::processing::vocabulary::SkillVocabulary;
use aho_corasick::AhoCorasick;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

// North American numbers only; international formats are not recognised.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?(\([0-9]{3}\)|[0-9]{3})[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("Invalid phone regex")
});

pub struct FieldExtractor {
    education_matcher: AhoCorasick,
    vocabulary: &'static SkillVocabulary,
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig, vocabulary: &'static SkillVocabulary) -> Result<Self> {
        let keywords: Vec<String> = config
            .education_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let education_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| {
                ResumeAnalyzerError::Configuration(format!("Failed to build education matcher: {}", e))
            })?;

        Ok(Self { education_matcher, vocabulary })
    }

    /// Annotate `text` with `model` and pull out every field.
    pub fn extract_fields(&self, model: &dyn LanguageModel, text: &ExtractedText) -> ParsedResume {
        let annotated = model.annotate(text.as_str());
        debug!(
            "Annotated {} tokens, {} sentences, {} entities",
            annotated.tokens.len(),
            annotated.sentences.len(),
            annotated.entities.len()
        );

        let resume = ParsedResume {
            text: text.as_str().to_string(),
            name: extract_name(&annotated),
            email: extract_email(text.as_str()),
            phone: extract_phone(text.as_str()),
            education: self.extract_education(&annotated),
            skills: self.extract_skills(&annotated),
            page_count: text.page_count(),
        };

        for (field, found) in [
            ("name", resume.name.is_found()),
            ("email", resume.email.is_found()),
            ("phone", resume.phone.is_found()),
            ("education", resume.education.is_found()),
            ("skills", resume.skills.is_found()),
        ] {
            if !found {
                warn!("Resume field not found: {}", field);
            }
        }

        resume
    }

    /// Sentences mentioning any education keyword, one per line.
    pub fn extract_education(&self, annotated: &AnnotatedText) -> FieldValue<String> {
        let kept: Vec<&str> = annotated
            .sentence_texts()
            .filter(|sentence| self.education_matcher.is_match(*sentence))
            .map(str::trim)
            .collect();

        if kept.is_empty() {
            FieldValue::NotFound
        } else {
            FieldValue::Found(kept.join("\n"))
        }
    }

    pub fn extract_skills(&self, annotated: &AnnotatedText) -> FieldValue<SkillSet> {
        let skills = match_tokens(&annotated.tokens, self.vocabulary);
        if skills.is_empty() {
            FieldValue::NotFound
        } else {
            FieldValue::Found(skills)
        }
    }
}

pub fn extract_name(annotated: &AnnotatedText) -> FieldValue<String> {
    annotated
        .first_entity(EntityLabel::Person)
        .map(|entity| entity.text.trim().to_string())
        .into()
}

pub fn extract_email(text: &str) -> FieldValue<String> {
    EMAIL_REGEX.find(text).map(|m| m.as_str().to_string()).into()
}

/// First phone-shaped match, reduced to its digits.
pub fn extract_phone(text: &str) -> FieldValue<String> {
    PHONE_REGEX
        .find(text)
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::processing::language_model::RuleBasedModel;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(&ExtractionConfig::default(), SkillVocabulary::shared()).unwrap()
    }

    fn parse(text: &str) -> ParsedResume {
        let model = RuleBasedModel::load(&ModelConfig::default()).unwrap();
        let text = ExtractedText::new(text, Some(1)).unwrap();
        extractor().extract_fields(&model, &text)
    }

    #[test]
    fn test_email() {
        assert_eq!(
            extract_email("Contact: jane.doe@example.com"),
            FieldValue::Found("jane.doe@example.com".to_string())
        );
        assert_eq!(extract_email("no address here @ all"), FieldValue::NotFound);
    }

    #[test]
    fn test_phone_digits_only() {
        assert_eq!(extract_phone("(123) 456-7890"), FieldValue::Found("1234567890".to_string()));
        assert_eq!(extract_phone("Call +1 555.123.4567"), FieldValue::Found("15551234567".to_string()));
        assert_eq!(extract_phone("Room 12-34"), FieldValue::NotFound);
    }

    #[test]
    fn test_full_resume() {
        let resume = parse(
            "Jane Doe\njane.doe@example.com | (123) 456-7890\n\
             Education: BSc in Computer Science from Tech University. Skills: Python, Java.\n\
             Worked on data pipelines.",
        );

        assert_eq!(resume.name, FieldValue::Found("Jane Doe".to_string()));
        assert_eq!(resume.email, FieldValue::Found("jane.doe@example.com".to_string()));
        assert_eq!(resume.phone, FieldValue::Found("1234567890".to_string()));
        assert_eq!(
            resume.education,
            FieldValue::Found("Education: BSc in Computer Science from Tech University.".to_string())
        );
        assert_eq!(resume.skill_set().to_vec(), vec!["java", "python"]);
        assert_eq!(resume.page_count, Some(1));
    }

    #[test]
    fn test_missing_fields_degrade_independently() {
        let resume = parse("worked on pipelines all day");
        assert_eq!(resume.name, FieldValue::NotFound);
        assert_eq!(resume.email, FieldValue::NotFound);
        assert_eq!(resume.phone, FieldValue::NotFound);
        assert_eq!(resume.education, FieldValue::NotFound);
        assert_eq!(resume.skills, FieldValue::NotFound);
        assert!(resume.skill_set().is_empty());
    }

    #[test]
    fn test_education_keeps_order_and_is_case_insensitive() {
        let resume = parse("MASTER of Arts, 2019.\nHobbies: chess.\nGPA 3.9 at State COLLEGE.");
        assert_eq!(
            resume.education,
            FieldValue::Found("MASTER of Arts, 2019.\nGPA 3.9 at State COLLEGE.".to_string())
        );
    }

    #[test]
    fn test_skill_case_insensitivity() {
        assert_eq!(parse("PYTHON and SQL").skills, parse("python and sql").skills);
    }
}
