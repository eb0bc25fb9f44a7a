//! Token-sequence skill matching against a fixed vocabulary

use crate::processing::document::SkillSet;
use crate::processing::text_processor::{tokenize, Token};
use crate::processing::vocabulary::SkillVocabulary;
use log::debug;

/// Collect every vocabulary skill whose token pattern occurs in `tokens`.
///
/// Scans left to right; at each position the longest matching pattern wins
/// and scanning resumes after it.
pub fn match_tokens(tokens: &[Token], vocabulary: &SkillVocabulary) -> SkillSet {
    let mut skills = SkillSet::default();
    let mut pos = 0;

    while pos < tokens.len() {
        let best = vocabulary
            .patterns()
            .filter(|(_, pattern)| matches_at(tokens, pos, pattern))
            .max_by_key(|(_, pattern)| pattern.len());

        match best {
            Some((skill, pattern)) => {
                skills.insert(skill);
                pos += pattern.len();
            }
            None => pos += 1,
        }
    }

    debug!("Matched {} skills over {} tokens", skills.len(), tokens.len());
    skills
}

/// Tokenize `text` and match skills in it.
pub fn match_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    match_tokens(&tokenize(text), vocabulary)
}

fn matches_at(tokens: &[Token], pos: usize, pattern: &[String]) -> bool {
    tokens.len() - pos >= pattern.len()
        && tokens[pos..pos + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(token, word)| token.lower == *word)
}
