//! Text normalization, tokenization, and stop words

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A token with its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_alphabetic(&self) -> bool {
        self.text.chars().all(|c| c.is_alphabetic())
    }
}

static TERM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("Invalid term regex"));

/// English stop words excluded before TF-IDF vectorization.
pub static ENGLISH_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Map typographic punctuation to ASCII and drop NUL characters.
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\0')
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            '\u{00A0}' | '\u{202F}' => ' ',
            _ => c,
        })
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '_' | '@')
}

fn is_trimmed_edge(c: char) -> bool {
    matches!(c, '.' | '_')
}

/// Split text into word tokens.
///
/// A token is a maximal run of alphanumerics and `+ # . _ @`, with leading
/// and trailing `.` and `_` removed, so `c++` and `node.js` stay whole while a
/// sentence-final period is dropped. A hyphen between two alphanumerics is a
/// token of its own (`scikit-learn` is `scikit`, `-`, `learn`); any other
/// hyphen separates tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if is_token_char(c) {
            run_start.get_or_insert(idx);
        } else {
            if let Some(start) = run_start.take() {
                push_trimmed(text, start, idx, &mut tokens);
            }
            let next = chars.peek().map(|&(_, n)| n);
            if c == '-' && prev.map_or(false, char::is_alphanumeric) && next.map_or(false, char::is_alphanumeric) {
                tokens.push(Token {
                    text: "-".to_string(),
                    lower: "-".to_string(),
                    start: idx,
                    end: idx + 1,
                });
            }
        }
        prev = Some(c);
    }
    if let Some(start) = run_start {
        push_trimmed(text, start, text.len(), &mut tokens);
    }

    tokens
}

fn push_trimmed(text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
    let run = &text[start..end];
    let trimmed_front = run.trim_start_matches(is_trimmed_edge);
    let trimmed = trimmed_front.trim_end_matches(is_trimmed_edge);
    if trimmed.is_empty() {
        return;
    }

    let token_start = start + (run.len() - trimmed_front.len());
    tokens.push(Token {
        text: trimmed.to_string(),
        lower: trimmed.to_lowercase(),
        start: token_start,
        end: token_start + trimmed.len(),
    });
}

/// Lowercased terms of two or more word characters with stop words removed.
pub fn vectorizer_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !ENGLISH_STOP_WORDS.contains(term))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowers(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.lower).collect()
    }

    #[test]
    fn test_tokenization_keeps_skill_punctuation() {
        assert_eq!(
            lowers("Knows C++, Node.js and scikit-learn."),
            vec!["knows", "c++", "node.js", "and", "scikit", "-", "learn"]
        );
    }

    #[test]
    fn test_infix_hyphen_is_split() {
        let text = "Python-based, SQL-driven - re-usable -x y-";
        let tokens = tokenize(text);
        let lowers: Vec<&str> = tokens.iter().map(|t| t.lower.as_str()).collect();
        assert_eq!(
            lowers,
            vec!["python", "-", "based", "sql", "-", "driven", "re", "-", "usable", "x", "y"]
        );
        assert_eq!(&text[tokens[1].start..tokens[1].end], "-");
    }

    #[test]
    fn test_token_spans_point_into_source() {
        let text = "  (Python) ";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "Python");
        assert_eq!(tokens[0].lower, "python");
    }

    #[test]
    fn test_punctuation_only_runs_are_dropped() {
        assert!(tokenize("... --- __").is_empty());
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(
            normalize_unicode("\u{201C}Rust\u{201D}\u{00A0}\u{2014} it\u{2019}s\0 fast"),
            "\"Rust\" - it's fast"
        );
    }

    #[test]
    fn test_vectorizer_terms_drop_stop_words_and_short_terms() {
        assert_eq!(
            vectorizer_terms("The Python developer, a SQL expert"),
            vec!["python", "developer", "sql", "expert"]
        );
        assert!(vectorizer_terms("and the of to a I").is_empty());
    }
}
