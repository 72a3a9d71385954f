//! Interactive terminal host.
//!
//! Drives a [`Presentation`] over any async line reader and writer, so the
//! same loop runs on stdin/stdout and in tests on in-memory buffers.

use std::sync::Arc;

use synapse_core::Result;
use synapse_script::{AnswerJudge, Presentation, Reply, SessionMode, Step};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::cues::{self, Cue};

const MENU: [&str; 7] = [
    "JARVIS GDG AIML Domain Introduction",
    "Welcome to the interactive JARVIS session!",
    "Choose an option:",
    "1. Complete session (Domain discovery + Introductions + Riddle game)",
    "2. Domain discovery only",
    "3. Final riddle game only",
    "4. Exit",
];
const MENU_PROMPT: &str = "Enter your choice (1-4): ";
const MENU_INVALID: &str = "Invalid choice. Please enter 1, 2, 3, or 4.";
const MENU_EXIT: &str = "Goodbye! Thanks for using JARVIS!";
const ANSWER_PROMPT: &str = "Your answer: ";
const CONTINUE_PROMPT: &str = "(press Enter to continue) ";

pub struct Console<R, W> {
    input: R,
    output: W,
    judge: Arc<dyn AnswerJudge>,
    sound_cues: bool,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, judge: Arc<dyn AnswerJudge>, sound_cues: bool) -> Self {
        Self {
            input,
            output,
            judge,
            sound_cues,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Show `prompt` and read one line. `None` once input is closed.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask which part of the domain session to run. `None` means exit.
    pub async fn choose_mode(&mut self) -> Result<Option<SessionMode>> {
        for line in MENU {
            self.write_line(line).await?;
        }

        loop {
            let Some(choice) = self.read_line(MENU_PROMPT).await? else {
                info!("Input closed at the menu");
                return Ok(None);
            };
            match choice.as_str() {
                "1" => return Ok(Some(SessionMode::Full)),
                "2" => return Ok(Some(SessionMode::Discovery)),
                "3" => return Ok(Some(SessionMode::Final)),
                "4" => {
                    self.write_line(MENU_EXIT).await?;
                    return Ok(None);
                }
                _ => self.write_line(MENU_INVALID).await?,
            }
        }
    }

    /// Play the presentation to its end.
    ///
    /// Returns `false` if input closed before the end was reached.
    pub async fn run(&mut self, presentation: &mut Presentation) -> Result<bool> {
        info!(host = %presentation.host(), "Presentation started");
        let mut reply = None;

        loop {
            let step = presentation.next_step(reply.take())?;
            if let Some(correct) = presentation.last_verdict() {
                if self.sound_cues {
                    drop(cues::play(Cue::for_verdict(correct)));
                }
            }

            match step {
                Step::Speak { text } => self.write_line(&text).await?,
                Step::Prompt { attempts_left, .. } => {
                    debug!(attempts_left, "Waiting for an answer");
                    let Some(answer) = self.read_line(ANSWER_PROMPT).await? else {
                        info!("Input closed, ending the presentation early");
                        return Ok(false);
                    };
                    reply = Some(self.grade(presentation, answer).await);
                }
                Step::WaitForHuman { text } => {
                    self.write_line(&text).await?;
                    let prompt = if text.contains("Press Enter") {
                        ""
                    } else {
                        CONTINUE_PROMPT
                    };
                    if self.read_line(prompt).await?.is_none() {
                        info!("Input closed, ending the presentation early");
                        return Ok(false);
                    }
                }
                Step::End => return Ok(true),
            }
        }
    }

    /// Blank answers go to the engine as text so they cost no attempt.
    async fn grade(&self, presentation: &Presentation, answer: String) -> Reply {
        if answer.is_empty() {
            return Reply::Answer(answer);
        }
        match presentation.current_riddle() {
            Some(riddle) => Reply::Verdict(self.judge.judge(riddle, &answer).await),
            None => Reply::Answer(answer),
        }
    }
}
