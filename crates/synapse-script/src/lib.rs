pub mod dialogue;
pub mod engine;
pub mod error;
pub mod judge;
pub mod matching;
pub mod programs;
pub mod riddles;

pub use engine::{GameScore, Outcome, Presentation, Program, Reply, Step};
pub use error::{JudgeError, ScriptError};
pub use judge::{build_judge, AnswerJudge, LlmJudge, LocalJudge};
pub use matching::{AnswerKey, MatchStrategy};
pub use programs::{build_program, ScriptKind, SessionMode};
pub use riddles::Riddle;
