//! Text processing and analysis module

pub mod document;
pub mod text_processor;
pub mod vocabulary;
pub mod language_model;
#[cfg(feature = "ner")]
pub mod ner_model;
pub mod skill_matcher;
pub mod field_extractor;
pub mod similarity;
pub mod comparator;
pub mod analyzer;
