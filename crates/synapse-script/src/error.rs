//! Error types for script sequencing and answer judging.

use synapse_core::error::SynapseError;

/// Errors from advancing a presentation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("an answer is required to continue past the current prompt")]
    AnswerRequired,
}

/// Errors from a remote answer judge.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge is missing an API key (set {0})")]
    MissingApiKey(String),
    #[error("judge request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("judge endpoint returned status {0}")]
    Status(u16),
    #[error("judge reply could not be understood: {0}")]
    UnclearReply(String),
}

impl From<ScriptError> for SynapseError {
    fn from(err: ScriptError) -> Self {
        SynapseError::Script(err.to_string())
    }
}

impl From<JudgeError> for SynapseError {
    fn from(err: JudgeError) -> Self {
        SynapseError::Judge(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_display() {
        assert_eq!(
            ScriptError::AnswerRequired.to_string(),
            "an answer is required to continue past the current prompt"
        );
    }

    #[test]
    fn test_judge_error_display() {
        assert_eq!(
            JudgeError::MissingApiKey("OPENAI_API_KEY".to_string()).to_string(),
            "judge is missing an API key (set OPENAI_API_KEY)"
        );
        assert_eq!(
            JudgeError::Status(503).to_string(),
            "judge endpoint returned status 503"
        );
        assert_eq!(
            JudgeError::UnclearReply("maybe".to_string()).to_string(),
            "judge reply could not be understood: maybe"
        );
    }

    #[test]
    fn test_conversion_into_synapse_error() {
        let err: SynapseError = ScriptError::AnswerRequired.into();
        assert!(matches!(err, SynapseError::Script(_)));

        let err: SynapseError = JudgeError::Status(500).into();
        assert!(matches!(err, SynapseError::Judge(_)));
        assert!(err.to_string().contains("500"));
    }
}
