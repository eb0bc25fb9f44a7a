//! Language model: tokenizer, sentence splitter, and PERSON recognizer

use crate::config::{ModelBackend, ModelConfig};
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::text_processor::{tokenize, Token};
use crate::processing::vocabulary::SkillVocabulary;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    pub span: Range<usize>,
}

/// Text plus the annotations a model derived from it.
#[derive(Debug, Clone)]
pub struct AnnotatedText<'a> {
    pub text: &'a str,
    pub tokens: Vec<Token>,
    /// Sentence byte spans in document order.
    pub sentences: Vec<Range<usize>>,
    /// Entities in document order.
    pub entities: Vec<Entity>,
}

impl<'a> AnnotatedText<'a> {
    pub fn sentence_texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        let text = self.text;
        self.sentences.iter().map(move |span| &text[span.clone()])
    }

    pub fn first_entity(&self, label: EntityLabel) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.label == label)
    }
}

pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;

    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn annotate<'a>(&self, text: &'a str) -> AnnotatedText<'a>;
}

/// Non-blank sentence spans by Unicode sentence boundaries.
pub fn split_sentences(text: &str) -> Vec<Range<usize>> {
    text.split_sentence_bound_indices()
        .filter(|(_, sentence)| !sentence.trim().is_empty())
        .map(|(start, sentence)| start..start + sentence.len())
        .collect()
}

const BUILTIN_NON_NAME_WORDS: &[&str] = &[
    // headings and contact labels
    "resume", "curriculum", "vitae", "cv", "contact", "email", "phone", "mobile", "address",
    "linkedin", "github", "summary", "profile", "objective", "experience", "education",
    "skills", "projects", "certifications", "references", "languages", "interests", "awards",
    "publications", "work", "professional", "technical", "employment", "history", "personal",
    "details", "information",
    // titles and organisations
    "senior", "junior", "lead", "principal", "staff", "software", "engineer", "developer",
    "manager", "analyst", "scientist", "consultant", "intern", "director", "architect",
    "university", "college", "institute", "school", "academy", "bachelor", "master",
    "science", "arts", "computer", "engineering", "degree", "technology", "tech", "inc",
    "llc", "ltd", "corp", "corporation", "company", "group", "solutions", "services",
    "certified", "cloud", "partners", "labs", "systems", "consulting",
    // places and dates
    "street", "avenue", "road", "city", "new", "san", "los", "north", "south", "east", "west",
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "present", "current",
    // common capitalized sentence starters
    "the", "and", "of", "for", "with", "in", "at", "on", "to", "by", "from", "looking",
    "seeking", "experienced", "responsible", "developed", "built", "led", "managed",
];

const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam"];

/// Rule-based PERSON recognizer, used when no transformer NER model is
/// available and as a lightweight model in tests.
///
/// Tokens glued by an infix hyphen or apostrophe form one word (`Mary-Jane`,
/// `O'Neil`). A PERSON is a run of 2..=`max_name_tokens` capitalized words on
/// one line, separated only by spaces. A capitalized word that is a known
/// non-name or skill word spoils the whole run it sits in, so
/// `Acme Widgets Ltd` is not a name.
pub struct RuleBasedModel {
    max_name_tokens: usize,
    non_name_words: HashSet<String>,
    vocabulary: &'static SkillVocabulary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordShape {
    Name,
    Honorific,
    /// Capitalized but not a name part.
    Capitalized,
    Other,
}

impl RuleBasedModel {
    pub const NAME: &'static str = "rule-based-en";

    pub fn load(config: &ModelConfig) -> Result<Self> {
        let mut non_name_words: HashSet<String> = BUILTIN_NON_NAME_WORDS
            .iter()
            .map(|w| w.to_string())
            .collect();
        non_name_words.extend(config.extra_non_name_words.iter().map(|w| w.to_lowercase()));

        if let Some(path) = &config.non_name_words_path {
            let content = std::fs::read_to_string(path).map_err(|e| {
                ResumeAnalyzerError::ModelUnavailable(format!(
                    "Failed to read word list {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let before = non_name_words.len();
            non_name_words.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_lowercase),
            );
            debug!("Loaded {} words from {}", non_name_words.len() - before, path.display());
        }

        info!("Loaded language model '{}' ({} non-name words)", Self::NAME, non_name_words.len());
        Ok(Self {
            max_name_tokens: config.max_name_tokens,
            non_name_words,
            vocabulary: SkillVocabulary::shared(),
        })
    }

    fn classify(&self, word: &[&Token]) -> WordShape {
        let parts: Vec<&Token> = word.iter().copied().filter(|t| t.text != "-").collect();
        let capitalized = parts.iter().all(|part| {
            let mut chars = part.text.chars();
            let first_upper = chars.next().map_or(false, char::is_uppercase);
            let rest: Vec<char> = chars.collect();
            part.is_alphabetic()
                && first_upper
                && (rest.iter().all(|c| c.is_lowercase()) || rest.iter().all(|c| c.is_uppercase()))
        });
        let letters: usize = parts.iter().map(|part| part.text.chars().count()).sum();

        if parts.is_empty() || !capitalized || letters < 2 {
            WordShape::Other
        } else if parts.len() == 1 && HONORIFICS.contains(&parts[0].lower.as_str()) {
            WordShape::Honorific
        } else if parts
            .iter()
            .any(|part| self.non_name_words.contains(&part.lower) || self.vocabulary.contains_word(&part.lower))
        {
            WordShape::Capitalized
        } else {
            WordShape::Name
        }
    }

    fn find_persons(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut words: Vec<Vec<&Token>> = Vec::new();
        for token in tokens {
            let glued = words
                .last()
                .and_then(|word| word.last())
                .map_or(false, |prev| matches!(&text[prev.end..token.start], "" | "'"));
            match words.last_mut() {
                Some(word) if glued => word.push(token),
                _ => words.push(vec![token]),
            }
        }

        let mut entities = Vec::new();
        let mut run: Vec<Range<usize>> = Vec::new();
        let mut spoiled = false;
        let mut last_end: Option<usize> = None;

        for word in &words {
            let span = word[0].start..word[word.len() - 1].end;
            let joined = last_end.map_or(false, |end| {
                text[end..span.start].chars().all(|c| c == ' ' || c == '\t')
            });
            if !joined {
                self.close_run(text, &mut run, &mut spoiled, &mut entities);
            }

            match self.classify(word) {
                WordShape::Name => run.push(span.clone()),
                WordShape::Capitalized => spoiled = true,
                WordShape::Honorific | WordShape::Other => {
                    self.close_run(text, &mut run, &mut spoiled, &mut entities)
                }
            }
            last_end = Some(span.end);
        }
        self.close_run(text, &mut run, &mut spoiled, &mut entities);

        entities
    }

    fn close_run(&self, text: &str, run: &mut Vec<Range<usize>>, spoiled: &mut bool, entities: &mut Vec<Entity>) {
        if !*spoiled && (2..=self.max_name_tokens).contains(&run.len()) {
            let span = run[0].start..run[run.len() - 1].end;
            entities.push(Entity {
                label: EntityLabel::Person,
                text: text[span.clone()].to_string(),
                span,
            });
        }
        run.clear();
        *spoiled = false;
    }
}

impl LanguageModel for RuleBasedModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }

    fn annotate<'a>(&self, text: &'a str) -> AnnotatedText<'a> {
        let tokens = tokenize(text);
        let sentences = split_sentences(text);
        let entities = self.find_persons(text, &tokens);

        AnnotatedText { text, tokens, sentences, entities }
    }
}

/// Load the model selected by `config.backend`.
pub fn load_model(config: &ModelConfig) -> Result<Box<dyn LanguageModel>> {
    match config.backend {
        ModelBackend::RuleBased => load_rule_based_model(config),
        ModelBackend::Ner => load_ner_model(config),
        ModelBackend::Auto if cfg!(feature = "ner") => load_ner_model(config).or_else(|e| {
            warn!("{}; falling back to the rule-based model", e);
            load_rule_based_model(config)
        }),
        ModelBackend::Auto => load_rule_based_model(config),
    }
}

fn load_rule_based_model(config: &ModelConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(RuleBasedModel::load(config)?))
}

#[cfg(feature = "ner")]
fn load_ner_model(config: &ModelConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(crate::processing::ner_model::BertNerModel::load(config)?))
}

#[cfg(not(feature = "ner"))]
fn load_ner_model(_config: &ModelConfig) -> Result<Box<dyn LanguageModel>> {
    Err(ResumeAnalyzerError::ModelUnavailable(
        "NER backend not built; enable the `ner` feature".to_string(),
    ))
}

static SHARED_MODEL: OnceCell<Box<dyn LanguageModel>> = OnceCell::new();

/// The process-wide model, loaded on first use.
///
/// Concurrent first callers block on a single load. A failed load leaves the
/// gate empty so a later call can retry; once loaded, later configs are ignored.
pub fn shared_model(config: &ModelConfig) -> Result<&'static dyn LanguageModel> {
    SHARED_MODEL
        .get_or_try_init(|| load_model(config))
        .map(|model| model.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use std::io::Write;

    fn model() -> RuleBasedModel {
        RuleBasedModel::load(&ModelConfig::default()).unwrap()
    }

    fn persons(model: &RuleBasedModel, text: &str) -> Vec<String> {
        model.annotate(text).entities.into_iter().map(|e| e.text).collect()
    }

    #[test]
    fn test_first_person_in_document_order() {
        let model = model();
        let text = "RESUME\nDr. Jane Doe\nSoftware Engineer\nReferences: John Smith";
        assert_eq!(persons(&model, text), vec!["Jane Doe", "John Smith"]);

        let annotated = model.annotate(text);
        let first = annotated.first_entity(EntityLabel::Person).unwrap();
        assert_eq!(&text[first.span.clone()], "Jane Doe");
    }

    #[test]
    fn test_names_do_not_cross_lines_or_punctuation() {
        let model = model();
        assert!(persons(&model, "Jane\nDoe").is_empty());
        assert!(persons(&model, "Jane, Doe").is_empty());
        assert_eq!(persons(&model, "JANE DOE"), vec!["JANE DOE"]);
    }

    #[test]
    fn test_organisations_are_not_people() {
        let model = model();
        let first = |text: &str| {
            model
                .annotate(text)
                .first_entity(EntityLabel::Person)
                .map(|e| e.text.clone())
        };
        assert_eq!(first("Acme Widgets Ltd\nMaria Garcia").as_deref(), Some("Maria Garcia"));
        assert_eq!(first("Google Cloud Certified\nMaria Garcia").as_deref(), Some("Maria Garcia"));
    }

    #[test]
    fn test_hyphenated_and_apostrophe_names() {
        let model = model();
        assert_eq!(persons(&model, "Mary-Jane Watson\nDeveloper"), vec!["Mary-Jane Watson"]);
        assert_eq!(persons(&model, "Sean O'Neil\nDeveloper"), vec!["Sean O'Neil"]);
        assert_eq!(persons(&model, "Dr Jane Doe"), vec!["Jane Doe"]);
    }

    #[test]
    fn test_non_names_rejected() {
        let model = model();
        assert!(persons(&model, "Senior Software Engineer").is_empty());
        assert!(persons(&model, "Python Django").is_empty());
        assert!(persons(&model, "Alpha Beta Gamma Delta Epsilon").is_empty());
    }

    #[test]
    fn test_sentences_split_on_lines_and_periods() {
        let model = model();
        let annotated = model.annotate("Jane Doe\nStudied at MIT. Loves Rust.");
        let sentences: Vec<&str> = annotated.sentence_texts().map(str::trim).collect();
        assert_eq!(sentences, vec!["Jane Doe", "Studied at MIT.", "Loves Rust."]);
    }

    #[test]
    fn test_word_list_extends_non_name_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# employers\nAcme").unwrap();

        let config = ModelConfig {
            non_name_words_path: Some(file.path().to_path_buf()),
            ..ModelConfig::default()
        };
        let model = RuleBasedModel::load(&config).unwrap();
        assert!(persons(&model, "Acme Widgets").is_empty());
    }

    #[test]
    fn test_missing_word_list_is_model_unavailable() {
        let config = ModelConfig {
            non_name_words_path: Some("no/such/words.txt".into()),
            ..ModelConfig::default()
        };
        let err = RuleBasedModel::load(&config).err().unwrap();
        assert_eq!(err.kind(), FailureKind::ModelUnavailable);
    }

    #[test]
    fn test_rule_based_backend() {
        let config = ModelConfig {
            backend: ModelBackend::RuleBased,
            ..ModelConfig::default()
        };
        assert_eq!(load_model(&config).unwrap().name(), RuleBasedModel::NAME);
    }

    #[cfg(not(feature = "ner"))]
    #[test]
    fn test_ner_backend_unavailable_without_feature() {
        let config = ModelConfig {
            backend: ModelBackend::Ner,
            ..ModelConfig::default()
        };
        let err = load_model(&config).err().unwrap();
        assert_eq!(err.kind(), FailureKind::ModelUnavailable);
    }

    #[test]
    fn test_shared_model_loads_once() {
        let first = shared_model(&ModelConfig::default()).unwrap();
        let second = shared_model(&ModelConfig::default()).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
