//! The two built-in scripts.

use std::fmt;

use serde::{Deserialize, Serialize};
use synapse_core::config::GameConfig;

use crate::dialogue;
use crate::engine::{Program, QuizRound, RoundKind, Segment};
use crate::riddles;

/// Which script to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// SYNAPSE's stage show: riddles, introductions, audience questions.
    #[default]
    Stage,
    /// JARVIS's domain introduction session.
    Session,
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptKind::Stage => write!(f, "stage"),
            ScriptKind::Session => write!(f, "session"),
        }
    }
}

impl std::str::FromStr for ScriptKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stage" => Ok(ScriptKind::Stage),
            "session" => Ok(ScriptKind::Session),
            _ => Err(format!("Unknown script: {}", s)),
        }
    }
}

/// Which part of the domain session to run. The stage show ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Discovery, introductions, final game and farewell.
    #[default]
    Full,
    /// Welcome and domain discovery riddles only.
    Discovery,
    /// Final riddle game and farewell only.
    Final,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Full => write!(f, "full"),
            SessionMode::Discovery => write!(f, "discovery"),
            SessionMode::Final => write!(f, "final"),
        }
    }
}

impl std::str::FromStr for SessionMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(SessionMode::Full),
            "discovery" => Ok(SessionMode::Discovery),
            "final" => Ok(SessionMode::Final),
            _ => Err(format!("Unknown session mode: {}", s)),
        }
    }
}

/// Build the program for a script.
pub fn build_program(kind: ScriptKind, mode: SessionMode, game: &GameConfig) -> Program {
    match kind {
        ScriptKind::Stage => stage_show(game),
        ScriptKind::Session => domain_session(mode, game),
    }
}

fn say(text: impl Into<String>) -> Segment {
    Segment::Say(text.into())
}

fn pause(text: impl Into<String>) -> Segment {
    Segment::Pause(text.into())
}

fn stage_show(game: &GameConfig) -> Program {
    let mut segments = vec![
        say(dialogue::STAGE_OPENING),
        Segment::Quiz(QuizRound {
            kind: RoundKind::Stage,
            intro: vec![],
            riddles: riddles::stage_riddles(),
            attempts: game.show_attempts,
        }),
        say(dialogue::STAGE_LEADS_INTRO),
    ];

    for (name, quip) in dialogue::DOMAIN_LEADS {
        segments.push(say(dialogue::lead_call(name)));
        segments.push(pause(dialogue::lead_wait(name)));
        segments.push(say(*quip));
    }

    segments.push(say(dialogue::STAGE_CORE_INTRO));
    for name in dialogue::CORE_MEMBERS {
        segments.push(say(dialogue::member_call(name)));
        segments.push(pause(dialogue::member_wait(name)));
    }

    segments.push(say(dialogue::STAGE_AUDIENCE_INTRO));
    for (question, reveal) in dialogue::AUDIENCE_QUESTIONS {
        segments.push(say(*question));
        segments.push(pause(dialogue::AUDIENCE_WAIT));
        segments.push(say(*reveal));
    }

    segments.push(say(dialogue::STAGE_CONCLUSION));

    Program {
        host: "SYNAPSE".to_string(),
        segments,
    }
}

fn discovery_round(game: &GameConfig) -> Segment {
    Segment::Quiz(QuizRound {
        kind: RoundKind::Discovery,
        intro: vec![
            dialogue::DISCOVERY_BANNER.to_string(),
            dialogue::RULE.to_string(),
            dialogue::discovery_rules(game.discovery_attempts),
        ],
        riddles: riddles::discovery_riddles(),
        attempts: game.discovery_attempts,
    })
}

fn final_round(game: &GameConfig) -> Segment {
    let mut intro = vec![
        dialogue::FINAL_BANNER.to_string(),
        dialogue::RULE.to_string(),
    ];
    intro.extend(dialogue::final_rules(game.final_attempts));
    Segment::Quiz(QuizRound {
        kind: RoundKind::Final,
        intro,
        riddles: riddles::final_riddles(),
        attempts: game.final_attempts,
    })
}

fn domain_session(mode: SessionMode, game: &GameConfig) -> Program {
    let mut segments = Vec::new();

    if matches!(mode, SessionMode::Full | SessionMode::Discovery) {
        if mode == SessionMode::Full {
            segments.push(say(dialogue::PHASE_DISCOVERY));
        }
        segments.push(say(dialogue::WELCOME_GREETING));
        segments.push(pause(dialogue::READY_FOR_RIDDLES));
        segments.push(discovery_round(game));
        segments.push(Segment::DiscoveryRecap);
    }

    if mode == SessionMode::Full {
        segments.push(say(dialogue::RULE));
        segments.push(pause(dialogue::WAIT_DOMAIN_LEADS));
        segments.push(say(dialogue::RULE));
        for line in dialogue::CORE_MEMBERS_CALL {
            segments.push(say(line));
        }
        segments.push(pause(dialogue::WAIT_CORE_MEMBERS));
        segments.push(say(dialogue::RULE));
        segments.push(say(dialogue::PHASE_KNOWLEDGE));
    }

    if matches!(mode, SessionMode::Full | SessionMode::Final) {
        segments.push(final_round(game));
        segments.push(Segment::ScoreReport);
        segments.push(Segment::Farewell);
    }

    Program {
        host: "JARVIS".to_string(),
        segments,
    }
}
