//! Transformer named-entity recognition backed by rust-bert

use crate::config::ModelConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::language_model::{split_sentences, AnnotatedText, Entity, EntityLabel, LanguageModel};
use crate::processing::text_processor::{tokenize, Token};
use log::{debug, info};
use rust_bert::pipelines::ner::NERModel;
use rust_bert::pipelines::token_classification::TokenClassificationConfig;
use std::ops::Range;
use std::sync::Mutex;

/// BERT token-classification pipeline; its `PER` entities become PERSON spans.
///
/// Tokens and sentences come from the shared tokenizer and sentence splitter
/// so skill matching behaves the same under every model.
pub struct BertNerModel {
    model: Mutex<NERModel>,
}

impl BertNerModel {
    pub const NAME: &'static str = "bert-ner";

    pub fn load(_config: &ModelConfig) -> Result<Self> {
        let model = NERModel::new(TokenClassificationConfig::default()).map_err(|e| {
            ResumeAnalyzerError::ModelUnavailable(format!("Failed to load NER model: {}", e))
        })?;
        info!("Loaded language model '{}'", Self::NAME);
        Ok(Self { model: Mutex::new(model) })
    }

    fn find_persons(&self, text: &str, sentences: &[Range<usize>]) -> Vec<Entity> {
        if sentences.is_empty() {
            return Vec::new();
        }
        let inputs: Vec<&str> = sentences.iter().map(|span| &text[span.clone()]).collect();
        let predictions = {
            let model = match self.model.lock() {
                Ok(model) => model,
                Err(poisoned) => poisoned.into_inner(),
            };
            model.predict_full_entities(&inputs)
        };

        let mut entities = Vec::new();
        for (sentence, predicted) in sentences.iter().zip(predictions) {
            let sentence_text = &text[sentence.clone()];
            for entity in predicted.into_iter().filter(|e| e.label.ends_with("PER")) {
                let begin = entity.offset.begin as usize;
                let end = entity.offset.end as usize;
                let Some(local) = char_span_to_bytes(sentence_text, begin, end) else {
                    debug!("Dropping entity '{}' with out-of-range offsets", entity.word);
                    continue;
                };
                let span = sentence.start + local.start..sentence.start + local.end;
                entities.push(Entity {
                    label: EntityLabel::Person,
                    text: text[span.clone()].to_string(),
                    span,
                });
            }
        }
        entities
    }
}

impl LanguageModel for BertNerModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }

    fn annotate<'a>(&self, text: &'a str) -> AnnotatedText<'a> {
        let tokens = tokenize(text);
        let sentences = split_sentences(text);
        let entities = self.find_persons(text, &sentences);

        AnnotatedText { text, tokens, sentences, entities }
    }
}

/// Map a character span from the pipeline onto byte offsets in `text`.
fn char_span_to_bytes(text: &str, begin: usize, end: usize) -> Option<Range<usize>> {
    if end < begin {
        return None;
    }
    let mut boundaries = text.char_indices().map(|(idx, _)| idx).chain(std::iter::once(text.len()));
    let start = boundaries.nth(begin)?;
    let end = if end == begin { start } else { boundaries.nth(end - begin - 1)? };
    Some(start..end)
}
