//! Step sequencing engine.
//!
//! A [`Presentation`] walks a [`Program`] one [`Step`] at a time. Steps are
//! produced lazily: a segment is expanded only when every step queued before
//! it has been handed out, so quiz feedback and recaps always see the state
//! left behind by earlier answers.
//!
//! The sequence is a plain state machine rather than a coroutine, so it can
//! be stored per session and driven from either the console or HTTP.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialogue::{self, ScoreBand};
use crate::error::ScriptError;
use crate::riddles::Riddle;

/// One unit of the presentation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// A line for the host to say.
    Speak { text: String },
    /// Ask the audience for an answer to the current riddle.
    Prompt { question: String, attempts_left: u32 },
    /// Hand the floor to a human until they are done.
    WaitForHuman { text: String },
    /// Terminal marker; repeated forever once reached.
    End,
}

impl Step {
    pub fn speak(text: impl Into<String>) -> Self {
        Step::Speak { text: text.into() }
    }

    pub fn wait(text: impl Into<String>) -> Self {
        Step::WaitForHuman { text: text.into() }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Step::End)
    }
}

/// Input that resolves an outstanding prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Free text typed by the audience, graded locally.
    Answer(String),
    /// A verdict already reached by an external grader.
    Verdict(bool),
}

/// Final game result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub score_percentage: f64,
}

impl GameScore {
    pub fn new(correct_answers: u32, total_questions: u32) -> Self {
        let score_percentage = if total_questions == 0 {
            0.0
        } else {
            f64::from(correct_answers) / f64::from(total_questions) * 100.0
        };
        Self {
            total_questions,
            correct_answers,
            score_percentage,
        }
    }
}

/// Which riddle game a round belongs to; decides its rules and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    /// Stage-show warm-up riddles.
    Stage,
    /// Domain guessing; the round ends at the first solved riddle.
    Discovery,
    /// Closing knowledge game; reveals answers and is scored.
    Final,
}

impl RoundKind {
    pub fn stops_on_first_solve(&self) -> bool {
        matches!(self, RoundKind::Discovery)
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, RoundKind::Final)
    }
}

/// A sequence of riddles played under one set of rules.
#[derive(Debug, Clone)]
pub struct QuizRound {
    pub kind: RoundKind,
    /// Lines said before the first riddle.
    pub intro: Vec<String>,
    pub riddles: Vec<Riddle>,
    /// Attempts per riddle.
    pub attempts: u32,
}

/// One entry of a program.
#[derive(Debug, Clone)]
pub enum Segment {
    Say(String),
    Pause(String),
    Quiz(QuizRound),
    /// Lines that depend on whether the domain was discovered.
    DiscoveryRecap,
    /// Final game summary; says nothing if no scored round ran.
    ScoreReport,
    /// Goodbye, mentioning the score if a scored round ran.
    Farewell,
}

/// An ordered script and the name of the host delivering it.
#[derive(Debug, Clone)]
pub struct Program {
    pub host: String,
    pub segments: Vec<Segment>,
}

/// What the session achieved so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    pub domain_discovered: bool,
    pub score: Option<GameScore>,
}

#[derive(Debug)]
struct ActiveQuiz {
    round: QuizRound,
    index: usize,
    attempts_left: u32,
    solved: u32,
}

/// A running presentation.
#[derive(Debug)]
pub struct Presentation {
    host: String,
    segments: VecDeque<Segment>,
    pending: VecDeque<Step>,
    quiz: Option<ActiveQuiz>,
    awaiting_answer: bool,
    threshold: f64,
    outcome: Outcome,
    last_verdict: Option<bool>,
    prompts_issued: u64,
    finished: bool,
}

impl Presentation {
    /// Start a presentation; `threshold` is the fuzzy match cut-off.
    pub fn new(program: Program, threshold: f64) -> Self {
        Self {
            host: program.host,
            segments: program.segments.into(),
            pending: VecDeque::new(),
            quiz: None,
            awaiting_answer: false,
            threshold,
            outcome: Outcome::default(),
            last_verdict: None,
            prompts_issued: 0,
            finished: false,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// True once `End` has been handed out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while the last step handed out was an unanswered prompt.
    pub fn awaiting_answer(&self) -> bool {
        self.awaiting_answer
    }

    /// Verdict of the reply consumed by the latest `next_step` call, if any.
    pub fn last_verdict(&self) -> Option<bool> {
        self.last_verdict
    }

    /// Identifies the outstanding prompt. Changes every time a prompt is
    /// handed out, re-prompts included.
    pub fn prompt_id(&self) -> Option<u64> {
        self.awaiting_answer.then_some(self.prompts_issued)
    }

    /// The riddle behind the outstanding prompt.
    pub fn current_riddle(&self) -> Option<&Riddle> {
        if !self.awaiting_answer {
            return None;
        }
        self.quiz
            .as_ref()
            .and_then(|quiz| quiz.round.riddles.get(quiz.index))
    }

    /// Advance by one step.
    ///
    /// A reply is required while a prompt is outstanding and ignored otherwise.
    pub fn next_step(&mut self, reply: Option<Reply>) -> Result<Step, ScriptError> {
        self.last_verdict = None;
        if self.awaiting_answer {
            let reply = reply.ok_or(ScriptError::AnswerRequired)?;
            self.awaiting_answer = false;
            self.grade(reply);
        } else if reply.is_some() {
            debug!("Reply received with no prompt outstanding, ignoring");
        }
        Ok(self.advance())
    }

    fn advance(&mut self) -> Step {
        loop {
            if let Some(step) = self.pending.pop_front() {
                if matches!(step, Step::Prompt { .. }) {
                    self.awaiting_answer = true;
                    self.prompts_issued += 1;
                }
                return step;
            }

            if self.quiz.is_some() {
                self.ask_next_riddle();
                continue;
            }

            match self.segments.pop_front() {
                Some(segment) => self.expand(segment),
                None => {
                    if !self.finished {
                        info!(
                            host = %self.host,
                            discovered = self.outcome.domain_discovered,
                            "Presentation finished"
                        );
                        self.finished = true;
                    }
                    return Step::End;
                }
            }
        }
    }

    fn say(&mut self, text: impl Into<String>) {
        self.pending.push_back(Step::speak(text));
    }

    fn expand(&mut self, segment: Segment) {
        match segment {
            Segment::Say(text) => self.say(text),
            Segment::Pause(text) => self.pending.push_back(Step::wait(text)),
            Segment::Quiz(round) => {
                debug!(kind = ?round.kind, riddles = round.riddles.len(), "Starting quiz round");
                for line in &round.intro {
                    self.pending.push_back(Step::speak(line.clone()));
                }
                self.quiz = Some(ActiveQuiz {
                    round,
                    index: 0,
                    attempts_left: 0,
                    solved: 0,
                });
            }
            Segment::DiscoveryRecap => {
                if self.outcome.domain_discovered {
                    for line in dialogue::DISCOVERY_RECAP_HIT {
                        self.say(line);
                    }
                } else {
                    self.say(dialogue::DISCOVERY_RECAP_MISS);
                }
                self.say(dialogue::STAGE_IS_YOURS);
            }
            Segment::ScoreReport => {
                if let Some(score) = self.outcome.score {
                    self.say(dialogue::GAME_COMPLETE);
                    self.say(dialogue::score_line(&score));
                    self.say(ScoreBand::of(&score).line());
                    for line in dialogue::GAME_THANKS {
                        self.say(line);
                    }
                }
            }
            Segment::Farewell => {
                let goodbye = dialogue::goodbye_message(self.outcome.score.as_ref());
                self.say(dialogue::RULE);
                self.say(dialogue::FAREWELL_BANNER);
                self.say(dialogue::RULE);
                self.say(goodbye);
                self.say(dialogue::SESSION_ENDED);
            }
        }
    }

    fn ask_next_riddle(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let total = quiz.round.riddles.len();
        let stop_early = quiz.round.kind.stops_on_first_solve() && quiz.solved > 0;
        if quiz.index >= total || stop_early {
            self.finish_quiz();
            return;
        }

        quiz.attempts_left = quiz.round.attempts;
        let kind = quiz.round.kind;
        let number = quiz.index + 1;
        let attempts_left = quiz.attempts_left;
        let question = quiz.round.riddles[quiz.index].question.clone();

        match kind {
            RoundKind::Stage => self.say(question.clone()),
            RoundKind::Discovery => self.say(format!("Riddle: {}", question)),
            RoundKind::Final => {
                self.say(dialogue::final_question_header(number, total));
                self.say(format!("Riddle: {}", question));
            }
        }

        if attempts_left == 0 {
            self.riddle_exhausted();
        } else {
            self.pending.push_back(Step::Prompt {
                question,
                attempts_left,
            });
        }
    }

    fn grade(&mut self, reply: Reply) {
        let threshold = self.threshold;
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let riddle = &quiz.round.riddles[quiz.index];

        let correct = match reply {
            Reply::Verdict(correct) => correct,
            Reply::Answer(text) if text.trim().is_empty() => {
                // Empty input does not cost an attempt.
                let prompt = Step::Prompt {
                    question: riddle.question.clone(),
                    attempts_left: quiz.attempts_left,
                };
                self.say(dialogue::EMPTY_ANSWER);
                self.pending.push_back(prompt);
                return;
            }
            Reply::Answer(text) => riddle.answer.evaluate(&text, threshold),
        };

        debug!(correct, "Answer graded");
        self.last_verdict = Some(correct);
        if correct {
            self.riddle_solved();
        } else {
            self.riddle_missed();
        }
    }

    fn riddle_solved(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        quiz.solved += 1;
        let kind = quiz.round.kind;
        let index = quiz.index;
        let is_last = index + 1 >= quiz.round.riddles.len();
        let answer = quiz.round.riddles[index].canonical_answer().to_string();

        match kind {
            RoundKind::Stage => self.say(dialogue::stage_correct(index)),
            RoundKind::Discovery => {
                self.outcome.domain_discovered = true;
                for line in dialogue::discovery_correct(&answer) {
                    self.say(line);
                }
            }
            RoundKind::Final => {
                for line in dialogue::final_correct(&answer) {
                    self.say(line);
                }
                if !is_last {
                    self.say(dialogue::FINAL_MOVING_ON);
                }
            }
        }
        self.close_riddle(true);
    }

    fn riddle_missed(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        quiz.attempts_left = quiz.attempts_left.saturating_sub(1);
        if quiz.attempts_left == 0 {
            self.riddle_exhausted();
            return;
        }

        let attempts_left = quiz.attempts_left;
        let kind = quiz.round.kind;
        let question = quiz.round.riddles[quiz.index].question.clone();
        let line = match kind {
            RoundKind::Stage => dialogue::stage_retry(attempts_left),
            RoundKind::Discovery => dialogue::discovery_retry(attempts_left),
            RoundKind::Final => dialogue::final_retry(attempts_left),
        };
        self.say(line);
        self.pending.push_back(Step::Prompt {
            question,
            attempts_left,
        });
    }

    fn riddle_exhausted(&mut self) {
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let kind = quiz.round.kind;
        let answer = quiz.round.riddles[quiz.index].canonical_answer().to_string();

        match kind {
            RoundKind::Stage => self.say(dialogue::stage_exhausted(&answer)),
            RoundKind::Discovery => self.say(dialogue::DISCOVERY_EXHAUSTED),
            RoundKind::Final => {
                for line in dialogue::final_exhausted(&answer) {
                    self.say(line);
                }
            }
        }
        self.close_riddle(false);
    }

    fn close_riddle(&mut self, solved: bool) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        quiz.index += 1;
        let has_more = quiz.index < quiz.round.riddles.len();

        match quiz.round.kind {
            RoundKind::Stage => {}
            RoundKind::Discovery => {
                if !solved {
                    self.say(dialogue::RULE);
                    if has_more {
                        self.say(dialogue::DISCOVERY_NEXT);
                    }
                }
            }
            RoundKind::Final => {
                self.say(dialogue::RULE);
                if has_more {
                    self.pending.push_back(Step::wait(dialogue::NEXT_QUESTION));
                }
            }
        }
    }

    fn finish_quiz(&mut self) {
        let Some(quiz) = self.quiz.take() else {
            return;
        };

        if quiz.round.kind.is_scored() {
            let total = u32::try_from(quiz.round.riddles.len()).unwrap_or(u32::MAX);
            let score = GameScore::new(quiz.solved, total);
            info!(
                correct = score.correct_answers,
                total = score.total_questions,
                "Scored round complete"
            );
            self.outcome.score = Some(score);
        }

        if quiz.round.kind == RoundKind::Discovery && !self.outcome.domain_discovered {
            for line in dialogue::DISCOVERY_MISSED {
                self.say(line);
            }
        }
    }
}
