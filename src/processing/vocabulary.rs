//! Fixed skill vocabulary shared by resume-side and job-side matching

use crate::processing::text_processor::tokenize;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "c++", "javascript", "react", "angular", "vue", "node.js",
    "sql", "nosql", "mongodb", "postgresql", "mysql",
    "aws", "azure", "gcp", "docker", "kubernetes",
    "machine learning", "deep learning", "tensorflow", "pytorch", "keras", "scikit-learn",
    "data analysis", "data science", "pandas", "numpy", "matplotlib", "seaborn",
    "natural language processing", "nlp", "spacy", "nltk",
    "agile", "scrum", "jira", "git", "communication", "problem solving", "teamwork",
];

static DEFAULT_VOCABULARY: Lazy<SkillVocabulary> =
    Lazy::new(|| SkillVocabulary::from_phrases(DEFAULT_SKILLS.iter().copied()));

/// Canonical skill phrase mapped to its token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    patterns: BTreeMap<String, Vec<String>>,
    words: HashSet<String>,
}

impl SkillVocabulary {
    /// Build a vocabulary. Each phrase is lowercased, whitespace-collapsed
    /// into its canonical name, and split into a pattern by the same tokenizer
    /// that reads resumes and job descriptions.
    pub fn from_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let mut patterns = BTreeMap::new();
        let mut words = HashSet::new();

        for phrase in phrases {
            let canonical = phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
            let pattern: Vec<String> = tokenize(&canonical).into_iter().map(|t| t.lower).collect();
            if pattern.is_empty() {
                continue;
            }
            words.extend(pattern.iter().filter(|w| w.as_str() != "-").cloned());
            patterns.insert(canonical, pattern);
        }

        Self { patterns, words }
    }

    /// The process-wide default vocabulary.
    pub fn shared() -> &'static SkillVocabulary {
        &DEFAULT_VOCABULARY
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.patterns.iter().map(|(skill, pattern)| (skill.as_str(), pattern.as_slice()))
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.patterns.contains_key(&skill.to_lowercase())
    }

    /// Whether `word` appears in any pattern.
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn longest_pattern(&self) -> usize {
        self.patterns.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_vocabulary() {
        let vocab = SkillVocabulary::shared();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len());
        assert!(vocab.contains("Machine Learning"));
        assert!(vocab.contains_word("learning"));
        assert_eq!(vocab.longest_pattern(), 3);
    }

    #[test]
    fn test_phrases_are_normalized() {
        let vocab = SkillVocabulary::from_phrases(["  Problem   Solving ", "", "RUST"]);
        assert_eq!(vocab.len(), 2);

        let patterns: Vec<_> = vocab.patterns().collect();
        assert_eq!(patterns[0].0, "problem solving");
        assert_eq!(patterns[0].1, ["problem".to_string(), "solving".to_string()]);
        assert!(vocab.contains("rust"));
    }

    #[test]
    fn test_hyphenated_skill_keeps_canonical_name() {
        let vocab = SkillVocabulary::shared();
        let (skill, pattern) = vocab
            .patterns()
            .find(|(skill, _)| *skill == "scikit-learn")
            .unwrap();
        assert_eq!(skill, "scikit-learn");
        assert_eq!(pattern, ["scikit", "-", "learn"].map(String::from).as_slice());
        assert!(vocab.contains_word("scikit"));
        assert!(!vocab.contains_word("-"));
    }
}
