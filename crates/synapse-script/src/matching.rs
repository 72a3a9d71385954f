//! Free-text answer matching.
//!
//! Three techniques, picked per riddle by [`MatchStrategy`]:
//! exact comparison after normalization, alias-table lookup, and a
//! character-level similarity ratio with a threshold.

use serde::{Deserialize, Serialize};
use similar::{DiffTag, TextDiff};

/// Default similarity threshold for fuzzy matching.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Lowercase, trim, and collapse internal whitespace runs to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and drop all whitespace, so "Lang Chain" equals "langchain".
pub fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity ratio in `[0.0, 1.0]`: `2 * M / (len(a) + len(b))`, where `M`
/// is the number of characters the two strings have in common according to
/// a character diff.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let diff = TextDiff::from_chars(a, b);
    let matched: usize = diff
        .ops()
        .iter()
        .map(|op| op.as_tag_tuple())
        .filter(|(tag, _, _)| *tag == DiffTag::Equal)
        .map(|(_, old, _)| old.len())
        .sum();
    let total = a.chars().count() + b.chars().count();
    // Computed in f64 so a ratio equal to the threshold compares equal.
    2.0 * matched as f64 / total as f64
}

/// How a riddle's accepted answers are compared to user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Normalized input must equal one of the accepted answers.
    Alias,
    /// Compacted input must equal, or be similar enough to, an accepted answer.
    Fuzzy,
}

/// True if `answer` equals any accepted entry after normalization.
pub fn matches_alias(answer: &str, accepted: &[String]) -> bool {
    let answer = normalize(answer);
    !answer.is_empty() && accepted.iter().any(|a| normalize(a) == answer)
}

/// True if `answer` equals or is at least `threshold` similar to any
/// accepted entry, comparing compacted forms.
pub fn matches_fuzzy(answer: &str, accepted: &[String], threshold: f64) -> bool {
    let answer = compact(answer);
    if answer.is_empty() {
        return false;
    }
    accepted.iter().any(|expected| {
        let expected = compact(expected);
        answer == expected || similarity(&answer, &expected) >= threshold
    })
}

/// The accepted answers for a riddle.
///
/// The first entry is the canonical answer revealed to the audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKey {
    pub accepted: Vec<String>,
    pub strategy: MatchStrategy,
}

impl AnswerKey {
    pub fn alias<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
            strategy: MatchStrategy::Alias,
        }
    }

    pub fn fuzzy<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
            strategy: MatchStrategy::Fuzzy,
        }
    }

    /// The answer to reveal when nobody gets it.
    pub fn canonical(&self) -> &str {
        self.accepted.first().map(String::as_str).unwrap_or_default()
    }

    /// Grade a free-text answer.
    pub fn evaluate(&self, answer: &str, threshold: f64) -> bool {
        match self.strategy {
            MatchStrategy::Alias => matches_alias(answer, &self.accepted),
            MatchStrategy::Fuzzy => matches_fuzzy(answer, &self.accepted, threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_is_case_and_whitespace_insensitive() {
        assert_eq!(normalize("  Machine   LEARNING \t"), "machine learning");
        assert_eq!(normalize("Machine Learning"), normalize("machine\nlearning"));
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_compact_removes_all_whitespace() {
        assert_eq!(compact(" Lang Chain "), "langchain");
        assert_eq!(compact("Chat GPT"), compact("chatgpt"));
    }

    #[test]
    fn test_similarity_bounds() {
        assert!((similarity("data", "data") - 1.0).abs() < 1e-6);
        assert!((similarity("", "") - 1.0).abs() < 1e-6);
        assert!(similarity("abc", "xyz") < 1e-6);
        assert!((similarity("abc", "") - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_near_miss() {
        // One swapped pair in nine characters: 2 * 8 / 18.
        let ratio = similarity("langchian", "langchain");
        assert!((ratio - 16.0 / 18.0).abs() < 1e-6, "ratio was {ratio}");
    }

    #[test]
    fn test_alias_match() {
        let accepted = strings(&["machine learning", "ml", "aiml", "ai/ml"]);
        assert!(matches_alias("ML", &accepted));
        assert!(matches_alias("  Machine   Learning ", &accepted));
        assert!(matches_alias("AI/ML", &accepted));
        assert!(!matches_alias("machine learnin", &accepted));
        assert!(!matches_alias("", &accepted));
    }

    #[test]
    fn test_fuzzy_accepts_near_misses_above_threshold() {
        let threshold = DEFAULT_SIMILARITY_THRESHOLD;
        assert!(matches_fuzzy("Langchian", &strings(&["Langchain"]), threshold));
        assert!(matches_fuzzy("chatgtp", &strings(&["chatgpt"]), threshold));
        assert!(matches_fuzzy("Chat GPT", &strings(&["chatgpt"]), threshold));
        assert!(matches_fuzzy("dta", &strings(&["data"]), threshold));
    }

    #[test]
    fn test_fuzzy_rejects_larger_deviations() {
        let threshold = DEFAULT_SIMILARITY_THRESHOLD;
        assert!(!matches_fuzzy("date", &strings(&["data"]), threshold));
        assert!(!matches_fuzzy("python", &strings(&["langchain"]), threshold));
        assert!(!matches_fuzzy("   ", &strings(&["data"]), threshold));
    }

    #[test]
    fn test_fuzzy_checks_every_accepted_answer() {
        let accepted = strings(&["ai", "artificial intelligence", "neural network"]);
        assert!(matches_fuzzy("Neural Netwrok", &accepted, DEFAULT_SIMILARITY_THRESHOLD));
        assert!(matches_fuzzy("AI", &accepted, DEFAULT_SIMILARITY_THRESHOLD));
    }

    #[test]
    fn test_threshold_is_respected() {
        let accepted = strings(&["data"]);
        assert!(matches_fuzzy("date", &accepted, 0.7));
        assert!(!matches_fuzzy("dta", &accepted, 0.9));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 9 of 10 characters shared: ratio is exactly 0.9.
        assert_eq!(similarity("abcdefghij", "abcdefghix"), 0.9);
        let accepted = strings(&["abcdefghij"]);
        assert!(matches_fuzzy("abcdefghix", &accepted, 0.9));
        // 7 of 10 shared: exactly 0.7.
        assert_eq!(similarity("abcdefghij", "abcdefgxyz"), 0.7);
        assert!(matches_fuzzy("abcdefgxyz", &accepted, 0.7));
        assert!(!matches_fuzzy("abcdefgxyz", &accepted, 0.71));
    }

    #[test]
    fn test_answer_key_dispatch() {
        let key = AnswerKey::alias(["Data Science", "ds"]);
        assert_eq!(key.canonical(), "Data Science");
        assert!(key.evaluate("DS", 0.85));
        // Alias keys never fall back to similarity.
        assert!(!key.evaluate("data sciense", 0.85));

        let key = AnswerKey::fuzzy(["data"]);
        assert!(key.evaluate("Data", 0.85));
        assert_eq!(key.strategy, MatchStrategy::Fuzzy);
    }

    #[test]
    fn test_empty_answer_key_never_matches() {
        let key = AnswerKey::fuzzy(Vec::<String>::new());
        assert_eq!(key.canonical(), "");
        assert!(!key.evaluate("anything", 0.0));
    }
}
