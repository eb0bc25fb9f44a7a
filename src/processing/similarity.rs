//! TF-IDF cosine similarity between a resume and a job description

use crate::config::{ScoringConfig, MAX_SCORE_PRECISION};
use crate::processing::text_processor::vectorizer_terms;
use log::debug;
use std::collections::{BTreeMap, HashMap};

pub struct SimilarityScorer {
    precision: u32,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl SimilarityScorer {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            precision: config.precision.min(MAX_SCORE_PRECISION),
        }
    }

    /// Match score in [0, 100]. Empty or degenerate input scores 0.0.
    pub fn score(&self, resume_text: &str, jd_text: &str) -> f64 {
        if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            return 0.0;
        }

        let resume_terms = term_counts(resume_text);
        let jd_terms = term_counts(jd_text);
        let vectors = tfidf_vectors(&[resume_terms, jd_terms]);

        let similarity = cosine_similarity(&vectors[0], &vectors[1]);
        let scale = 10f64.powi(self.precision as i32);
        let score = ((similarity * 100.0 * scale).round() / scale).clamp(0.0, 100.0);

        debug!("Cosine similarity {:.6} -> score {}", similarity, score);
        score
    }
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for term in vectorizer_terms(text) {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

/// Smoothed TF-IDF, `idf = ln((1 + n) / (1 + df)) + 1`, L2-normalized.
fn tfidf_vectors(documents: &[HashMap<String, f64>]) -> Vec<BTreeMap<String, f64>> {
    let n = documents.len() as f64;
    let mut document_frequency: HashMap<&str, f64> = HashMap::new();
    for doc in documents {
        for term in doc.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0.0) += 1.0;
        }
    }

    documents
        .iter()
        .map(|doc| {
            let weighted: BTreeMap<String, f64> = doc
                .iter()
                .map(|(term, count)| {
                    let df = document_frequency[term.as_str()];
                    let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                    (term.clone(), count * idf)
                })
                .collect();
            l2_normalize(weighted)
        })
        .collect()
}

fn l2_normalize(mut vector: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.values_mut().for_each(|w| *w /= norm);
    }
    vector
}

fn cosine_similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_scores_zero() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.score("", "Python developer"), 0.0);
        assert_eq!(scorer.score("Python developer", "   "), 0.0);
    }

    #[test]
    fn test_self_similarity_is_100() {
        let scorer = SimilarityScorer::default();
        let text = "Experienced Python developer with Django and SQL skills";
        assert_eq!(scorer.score(text, text), 100.0);
    }

    #[test]
    fn test_degenerate_vectors_score_zero() {
        let scorer = SimilarityScorer::default();
        assert_eq!(scorer.score("the and of", "Python developer"), 0.0);
        assert_eq!(scorer.score("rust systems", "pastry chef"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let scorer = SimilarityScorer::default();
        let score = scorer.score(
            "Experienced Python developer with Django and SQL skills",
            "Looking for Python developer with SQL and Agile experience",
        );
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_precision_is_applied() {
        let coarse = SimilarityScorer::from_config(&ScoringConfig { precision: 0 });
        let score = coarse.score("python sql docker", "python sql kubernetes");
        assert_eq!(score, score.round());
    }

    #[test]
    fn test_oversized_precision_is_capped() {
        let scorer = SimilarityScorer::from_config(&ScoringConfig { precision: 400 });
        let score = scorer.score("python sql docker", "python sql kubernetes");
        assert!(score.is_finite());
        assert!(score > 0.0 && score < 100.0);
        assert_eq!(scorer.score("python sql", "python sql"), 100.0);
    }

    #[test]
    fn test_known_value() {
        // shared term weight 1.0, unique terms ln(3/2) + 1
        let unique = (1.5f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + unique * unique);
        let score = SimilarityScorer::default().score("python rust", "python golang");
        assert_eq!(score, (expected * 10000.0).round() / 100.0);
    }
}
