use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Synapse host.
///
/// Loaded from `~/.synapse/config.toml` by default. Every section falls back
/// to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynapseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
}

impl SynapseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SynapseConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// General host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Maximum concurrently tracked sessions; the oldest is evicted beyond this.
    pub max_sessions: usize,
    /// Allowed CORS origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 5000,
            max_sessions: 64,
            allowed_origins: Vec::new(),
        }
    }
}

/// Riddle game tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum similarity ratio (0.0 to 1.0) for a fuzzy answer to count.
    pub similarity_threshold: f64,
    /// Attempts per riddle in the stage show.
    pub show_attempts: u32,
    /// Attempts per domain discovery riddle.
    pub discovery_attempts: u32,
    /// Attempts per final game riddle.
    pub final_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            show_attempts: 2,
            discovery_attempts: 2,
            final_attempts: 3,
        }
    }
}

/// Console narration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Play a short terminal cue after each graded answer.
    pub sound_cues: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self { sound_cues: true }
    }
}

/// How answers are graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgeMode {
    /// Alias table and similarity matching only.
    #[default]
    Local,
    /// Ask a chat-completion endpoint, falling back to local matching.
    Llm,
}

/// Answer judge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub mode: JudgeMode,
    /// OpenAI-compatible chat completions URL.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            mode: JudgeMode::Local,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynapseError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = SynapseConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.bind_addr, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_sessions, 64);
        assert!(config.server.allowed_origins.is_empty());
        assert!((config.game.similarity_threshold - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.game.show_attempts, 2);
        assert_eq!(config.game.discovery_attempts, 2);
        assert_eq!(config.game.final_attempts, 3);
        assert!(config.voice.sound_cues);
        assert_eq!(config.judge.mode, JudgeMode::Local);
        assert_eq!(config.judge.timeout_secs, 10);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[server]
port = 8080
max_sessions = 4
allowed_origins = ["http://localhost:3000"]

[game]
similarity_threshold = 0.9
final_attempts = 5

[voice]
sound_cues = false

[judge]
mode = "llm"
model = "local-model"
"#;
        let file = create_temp_config(content);
        let config = SynapseConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_sessions, 4);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert!((config.game.similarity_threshold - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.game.final_attempts, 5);
        // Unset fields in a present section keep their defaults.
        assert_eq!(config.game.discovery_attempts, 2);
        assert!(!config.voice.sound_cues);
        assert_eq!(config.judge.mode, JudgeMode::Llm);
        assert_eq!(config.judge.model, "local-model");
        assert_eq!(config.judge.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = SynapseConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.game.final_attempts, 3);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(SynapseConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_unknown_judge_mode_is_rejected() {
        let file = create_temp_config("[judge]\nmode = \"oracle\"\n");
        let err = SynapseConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SynapseError::Config(_)));
    }

    #[test]
    fn test_load_or_default_invalid_file() {
        let file = create_temp_config("[general]\nlog_level = 3\n");
        let config = SynapseConfig::load_or_default(file.path());
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SynapseConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.port, 5000);
    }
}
