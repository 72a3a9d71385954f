//! Answer judges.
//!
//! A judge turns a free-text answer into a verdict. The local judge uses the
//! riddle's answer key; the LLM judge asks a chat-completion endpoint about
//! answers the local rules reject, and falls back to the local verdict on any
//! failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use synapse_core::config::{JudgeConfig, JudgeMode};
use tracing::{debug, info, warn};

use crate::error::JudgeError;
use crate::riddles::Riddle;

const JUDGE_INSTRUCTIONS: &str = "You grade answers to riddles at a live quiz. \
    Reply with exactly one word: yes if the answer names the expected concept \
    (synonyms and minor misspellings count), otherwise no.";

/// Decides whether an answer to a riddle is correct.
#[async_trait]
pub trait AnswerJudge: Send + Sync {
    async fn judge(&self, riddle: &Riddle, answer: &str) -> bool;

    fn name(&self) -> &'static str;
}

/// Grades with the riddle's alias table or similarity threshold.
#[derive(Debug, Clone, Copy)]
pub struct LocalJudge {
    threshold: f64,
}

impl LocalJudge {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn verdict(&self, riddle: &Riddle, answer: &str) -> bool {
        riddle.answer.evaluate(answer, self.threshold)
    }
}

#[async_trait]
impl AnswerJudge for LocalJudge {
    async fn judge(&self, riddle: &Riddle, answer: &str) -> bool {
        self.verdict(riddle, answer)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Asks an OpenAI-compatible chat completion endpoint.
pub struct LlmJudge {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
    local: LocalJudge,
}

impl LlmJudge {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        threshold: f64,
    ) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key_env: String::new(),
            api_key,
            local: LocalJudge::new(threshold),
        })
    }

    /// Build from config, reading the API key from the configured variable.
    pub fn from_config(config: &JudgeConfig, threshold: f64) -> Result<Self, JudgeError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!(
                env = %config.api_key_env,
                "No API key for the LLM judge; answers will be graded locally"
            );
        }
        let mut judge = Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
            threshold,
        )?;
        judge.api_key_env = config.api_key_env.clone();
        Ok(judge)
    }

    async fn ask(&self, riddle: &Riddle, answer: &str) -> Result<bool, JudgeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| JudgeError::MissingApiKey(self.api_key_env.clone()))?;

        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": JUDGE_INSTRUCTIONS },
                {
                    "role": "user",
                    "content": format!(
                        "Riddle: {}\nExpected answer: {}\nAnswer given: {}",
                        riddle.question,
                        riddle.canonical_answer(),
                        answer
                    ),
                },
            ],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(JudgeError::Status(response.status().as_u16()));
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();
        parse_verdict(content)
    }
}

#[async_trait]
impl AnswerJudge for LlmJudge {
    async fn judge(&self, riddle: &Riddle, answer: &str) -> bool {
        if self.local.verdict(riddle, answer) {
            return true;
        }
        match self.ask(riddle, answer).await {
            Ok(verdict) => {
                debug!(verdict, "LLM judge replied");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "LLM judge unavailable, using local verdict");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

/// Read a yes/no reply, tolerating case, punctuation and trailing words.
fn parse_verdict(content: &str) -> Result<bool, JudgeError> {
    let first = content
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    match first.as_str() {
        "yes" | "correct" | "true" => Ok(true),
        "no" | "incorrect" | "false" => Ok(false),
        _ => Err(JudgeError::UnclearReply(content.to_string())),
    }
}

/// Build the judge selected in config.
///
/// An LLM judge that cannot be constructed degrades to the local judge.
pub fn build_judge(config: &JudgeConfig, threshold: f64) -> Arc<dyn AnswerJudge> {
    match config.mode {
        JudgeMode::Local => Arc::new(LocalJudge::new(threshold)),
        JudgeMode::Llm => match LlmJudge::from_config(config, threshold) {
            Ok(judge) => {
                info!(endpoint = %config.endpoint, model = %config.model, "LLM judge enabled");
                Arc::new(judge)
            }
            Err(e) => {
                warn!(error = %e, "Failed to build LLM judge, grading locally");
                Arc::new(LocalJudge::new(threshold))
            }
        },
    }
}
