//! Sound cues after graded answers.
//!
//! Cues are terminal bells written from a blocking task. They never hold up
//! the script and failures are only logged.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Wrong,
}

impl Cue {
    pub fn for_verdict(correct: bool) -> Self {
        if correct {
            Cue::Correct
        } else {
            Cue::Wrong
        }
    }

    /// Correct answers ring twice.
    fn bells(self) -> usize {
        match self {
            Cue::Correct => 2,
            Cue::Wrong => 1,
        }
    }
}

/// Play a cue in the background.
pub fn play(cue: Cue) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = ring(cue) {
            tracing::debug!(error = %e, ?cue, "Sound cue failed");
        }
    })
}

fn ring(cue: Cue) -> std::io::Result<()> {
    let mut out = std::io::stderr().lock();
    for i in 0..cue.bells() {
        if i > 0 {
            std::thread::sleep(Duration::from_millis(150));
        }
        out.write_all(b"\x07")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_for_verdict() {
        assert_eq!(Cue::for_verdict(true), Cue::Correct);
        assert_eq!(Cue::for_verdict(false), Cue::Wrong);
        assert!(Cue::Correct.bells() > Cue::Wrong.bells());
    }

    #[tokio::test]
    async fn test_play_completes() {
        play(Cue::Wrong).await.unwrap();
    }
}
