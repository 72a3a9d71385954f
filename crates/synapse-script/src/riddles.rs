//! Built-in riddle banks.

use serde::{Deserialize, Serialize};

use crate::matching::AnswerKey;

/// A question and the answers that count as correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Riddle {
    pub question: String,
    pub answer: AnswerKey,
}

impl Riddle {
    pub fn new(question: impl Into<String>, answer: AnswerKey) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }

    /// The answer revealed to the audience.
    pub fn canonical_answer(&self) -> &str {
        self.answer.canonical()
    }
}

/// Warm-up riddles of the stage show.
pub fn stage_riddles() -> Vec<Riddle> {
    vec![
        Riddle::new(
            "Riddle 1: I have no eyes, but I can learn to recognize faces. I have no brain, \
             but I can make predictions. What am I?",
            AnswerKey::fuzzy([
                "artificial intelligence",
                "ai",
                "machine learning",
                "neural network",
            ]),
        ),
        Riddle::new(
            "Riddle 2: I am the raw material for every smart machine. The more of me you \
             have, the smarter a program becomes. What am I?",
            AnswerKey::fuzzy(["data", "information", "datasets"]),
        ),
    ]
}

/// Riddles the audience uses to guess which domain is being introduced.
pub fn discovery_riddles() -> Vec<Riddle> {
    vec![
        Riddle::new(
            "I learn from the past without being told, patterns in numbers, my secrets \
             unfold. The more data I get, the smarter I grow. Guess my name, do you know?",
            AnswerKey::alias([
                "Machine Learning",
                "ml",
                "aiml",
                "ai/ml",
                "artificial intelligence and machine learning",
            ]),
        ),
        Riddle::new(
            "I clean, I analyze, I find what's true, turning raw numbers into insights for \
             you. From messy spreadsheets to hidden trends, I help decision-making till the \
             very end.",
            AnswerKey::alias(["Data Science", "ds"]),
        ),
    ]
}

/// Riddles of the closing knowledge game.
pub fn final_riddles() -> Vec<Riddle> {
    vec![
        Riddle::new(
            "Fuel for AI, I come in many forms. Tables, images, or text are my norms. \
             Without me, machines would just sit still. Guess my name, I power the skill.",
            AnswerKey::fuzzy(["data"]),
        ),
        Riddle::new(
            "I answer your questions, from facts to wit. My name ends with Generative \
             Pre-trained Transformer in it. Who am I?",
            AnswerKey::fuzzy(["chatgpt"]),
        ),
        Riddle::new(
            "I link language models with memory and more, helping AI apps think, retrieve, \
             and explore. From chatbots to agents, I build the way. Guess the framework I \
             am today.",
            AnswerKey::fuzzy(["Langchain"]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchStrategy, DEFAULT_SIMILARITY_THRESHOLD};

    #[test]
    fn test_bank_sizes() {
        assert_eq!(stage_riddles().len(), 2);
        assert_eq!(discovery_riddles().len(), 2);
        assert_eq!(final_riddles().len(), 3);
    }

    #[test]
    fn test_discovery_riddles_use_alias_tables() {
        for riddle in discovery_riddles() {
            assert_eq!(riddle.answer.strategy, MatchStrategy::Alias);
        }
        let ml = &discovery_riddles()[0];
        assert_eq!(ml.canonical_answer(), "Machine Learning");
        assert!(ml.answer.evaluate("AIML", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!ml.answer.evaluate("deep learning", DEFAULT_SIMILARITY_THRESHOLD));
    }

    #[test]
    fn test_final_riddles_accept_typos() {
        let riddles = final_riddles();
        assert!(riddles[1].answer.evaluate("Chat GTP", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(riddles[2].answer.evaluate("langchian", DEFAULT_SIMILARITY_THRESHOLD));
        assert_eq!(riddles[2].canonical_answer(), "Langchain");
    }

    #[test]
    fn test_stage_riddles_accept_any_listed_answer() {
        let riddles = stage_riddles();
        assert!(riddles[0].answer.evaluate("Neural Network", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(riddles[1].answer.evaluate("dataset", DEFAULT_SIMILARITY_THRESHOLD));
        assert!(!riddles[1].answer.evaluate("electricity", DEFAULT_SIMILARITY_THRESHOLD));
    }
}
