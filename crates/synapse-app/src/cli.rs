//! CLI argument definitions for the Synapse host.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use synapse_script::{ScriptKind, SessionMode};

/// Synapse - a scripted event host that narrates, asks riddles and keeps score.
#[derive(Parser, Debug)]
#[command(name = "synapse", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a presentation interactively in this terminal.
    Host {
        /// Script to run: stage or session.
        #[arg(short = 's', long = "script", default_value = "stage")]
        script: ScriptKind,

        /// Session part: full, discovery or final. Asks when omitted.
        #[arg(short = 'm', long = "mode")]
        mode: Option<SessionMode>,
    },
    /// Serve presentations over HTTP.
    Serve {
        /// API server port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
}

impl CliArgs {
    /// The subcommand to run; hosting the stage show when none is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Host {
            script: ScriptKind::Stage,
            mode: None,
        })
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SYNAPSE_CONFIG env var > ~/.synapse/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SYNAPSE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > SYNAPSE_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(Command::Serve { port: Some(p) }) = self.command {
            return p;
        }
        if let Ok(val) = std::env::var("SYNAPSE_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        config_port
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".synapse").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".synapse").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_hosts_stage_show() {
        let args = CliArgs::try_parse_from(["synapse"]).unwrap();
        assert_eq!(
            args.command(),
            Command::Host {
                script: ScriptKind::Stage,
                mode: None
            }
        );
    }

    #[test]
    fn test_host_with_script_and_mode() {
        let args =
            CliArgs::try_parse_from(["synapse", "host", "--script", "session", "--mode", "final"])
                .unwrap();
        assert_eq!(
            args.command(),
            Command::Host {
                script: ScriptKind::Session,
                mode: Some(SessionMode::Final)
            }
        );
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(CliArgs::try_parse_from(["synapse", "host", "--mode", "encore"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "synapse",
            "serve",
            "--config",
            "/tmp/synapse.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/synapse.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_port_flag_wins() {
        let args = CliArgs::try_parse_from(["synapse", "serve", "--port", "9090"]).unwrap();
        assert_eq!(args.resolve_port(5000), 9090);
    }
}
