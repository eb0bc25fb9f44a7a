//! Document structures shared across the pipeline

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw resume bytes together with their declared format.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    bytes: Vec<u8>,
    format: DocumentFormat,
}

impl ResumeDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

/// Flattened text content of a document. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    content: String,
    page_count: Option<usize>,
}

impl ExtractedText {
    pub fn new(content: impl Into<String>, page_count: Option<usize>) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ResumeAnalyzerError::Extraction(
                "Document contains no extractable text".to_string(),
            ));
        }
        Ok(Self { content, page_count })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

/// Outcome of a single field extraction that did run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FieldValue<T> {
    Found(T),
    NotFound,
}

impl<T> FieldValue<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            FieldValue::Found(value) => Some(value),
            FieldValue::NotFound => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FieldValue::Found(value) => Some(value),
            FieldValue::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldValue::Found(value),
            None => FieldValue::NotFound,
        }
    }
}

/// Lowercase skill names drawn from a [`SkillVocabulary`](crate::processing::vocabulary::SkillVocabulary).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub(crate) fn insert(&mut self, skill: &str) -> bool {
        self.0.insert(skill.to_lowercase())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(&skill.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub text: String,
    pub name: FieldValue<String>,
    pub email: FieldValue<String>,
    pub phone: FieldValue<String>,
    pub education: FieldValue<String>,
    pub skills: FieldValue<SkillSet>,
    pub page_count: Option<usize>,
}

impl ParsedResume {
    /// Skills as a set, empty when none were recognised.
    pub fn skill_set(&self) -> SkillSet {
        self.skills.as_option().cloned().unwrap_or_default()
    }
}
