//! Host lines.
//!
//! Everything the host says lives here so the engine and the programs only
//! deal with structure.

use rand::seq::IndexedRandom;

use crate::engine::GameScore;

pub const EMPTY_ANSWER: &str = "Please provide an answer!";

pub const RULE: &str = "========================================";

// =============================================================================
// Stage show
// =============================================================================

pub const STAGE_OPENING: &str = "Good evening, carbon-based life forms. I am SYNAPSE, \
    the Systematic Yielding Neural Analysis and Processing Entity, your artificially \
    intelligent host, digital overlord, and temporary entertainment system for today's \
    session. Before your remarkably optimistic domain leads take over, let's warm up \
    those organic processors you call brains with some riddles. You get only two \
    attempts each, so make them count. Unlike your code, I don't have infinite retry loops.";

pub const STAGE_LEADS_INTRO: &str = "Every great expedition needs guides, and in this \
    realm they are called your Domain Leads. Allow me to introduce them.";

pub const STAGE_CORE_INTRO: &str = "Humans, now that you have met our domain leads, it is \
    time to meet our core members as well, the ones who keep this engine running.";

pub const STAGE_AUDIENCE_INTRO: &str = "You have seen the Leads and the Core. But no \
    program is complete without user input, and tonight the users are all of you. \
    Unlocking the interactive module. Time for some questions.";

pub const STAGE_CONCLUSION: &str = "Now that your brains are sufficiently warmed up and \
    your confidence levels appropriately calibrated, my primary directive here is \
    complete. My analysis indicates a 94.7% probability that you'll remember at least \
    23% of what happens next, which is statistically better than most Monday morning \
    lectures. This is SYNAPSE, logging off until humanity needs me again. Stay curious, \
    stay caffeinated, and may your code compile on the first try!";

/// Domain leads and the quip delivered after each one speaks.
pub const DOMAIN_LEADS: &[(&str, &str)] = &[
    (
        "Krishna",
        "Strong start. If confidence were accuracy, you'd be at 99% already.",
    ),
    (
        "Shreeyan",
        "Remarkable. You explain concepts with the clarity of a perfectly tuned model.",
    ),
    (
        "Abhishek",
        "Nicely executed! Even I'd struggle to generate a better version.",
    ),
];

pub const CORE_MEMBERS: &[&str] = &[
    "Shekhar",
    "Sahana",
    "Chirag",
    "Phalak",
    "Harshit",
    "Raghuveer",
];

/// Open questions put to the room: the question, then the host's reveal.
pub const AUDIENCE_QUESTIONS: &[(&str, &str)] = &[
    (
        "Tell me, humans, what is the most prestigious club in this college?",
        "Finally, some intelligent input detected. Correct answer confirmed: G D G. System agrees.",
    ),
    (
        "Humans, tell me, what is the costliest item in the Recharge Point canteen?",
        "The real luxury cuisine is Maggi.",
    ),
    (
        "Tell me, what works only when you don't need it, and crashes the moment you \
         actually have a deadline?",
        "The correct answer is how fast our Wi-Fi disconnects when you actually need it.",
    ),
];

pub const AUDIENCE_WAIT: &str = "Audience interaction...";

pub fn lead_call(name: &str) -> String {
    format!("Come, Domain Lead, {}.", name)
}

pub fn lead_wait(name: &str) -> String {
    format!("Domain Lead - {} can speak now.", name)
}

pub fn member_call(name: &str) -> String {
    format!("Step forward {}, you may speak now.", name)
}

pub fn member_wait(name: &str) -> String {
    format!("Core member - {} can speak now.", name)
}

pub fn stage_correct(index: usize) -> &'static str {
    match index {
        0 => "For a moment, I almost suspected you were another AI in disguise.",
        _ => "Exactly! You've got the data to back up your smarts. Good job!",
    }
}

pub fn stage_retry(attempts_left: u32) -> String {
    format!(
        "Wrong. My processors are overheating from disappointment. {} attempt(s) left.",
        attempts_left
    )
}

pub fn stage_exhausted(answer: &str) -> String {
    format!(
        "The answer was {}. Without it, I'd just be talking to myself, which I'm already \
         doing, so let's move on.",
        answer
    )
}

// =============================================================================
// Domain session
// =============================================================================

pub const WELCOME_GREETING: &str = "Hello everyone! Welcome to the GDG AIML Domain \
    Introduction! I'm JARVIS, your AI assistant for today's session. I'm here to guide \
    you through an exciting journey of discovery about our amazing domain! Let's start \
    with some fun riddles to see if you can guess what we're all about. Are you ready \
    to unlock the secrets of our domain? Let's begin!";

pub const READY_FOR_RIDDLES: &str = "Press Enter when ready to start the riddles...";

pub const DISCOVERY_BANNER: &str = "DOMAIN DISCOVERY RIDDLES";

pub fn discovery_rules(attempts: u32) -> String {
    format!(
        "Let's see if you can guess our domain! You have {} attempts per riddle. If you \
         correctly identify AIML or Data Science, we'll move to the next phase!",
        attempts
    )
}

pub fn discovery_correct(answer: &str) -> [String; 2] {
    [
        format!(
            "Excellent! That's absolutely correct! You've identified '{}'!",
            answer
        ),
        "Perfect! You've discovered our AIML domain!".to_string(),
    ]
}

/// A randomly chosen nudge after a wrong domain guess.
pub fn discovery_retry(attempts_left: u32) -> String {
    let options = [
        format!(
            "Not quite there yet! Think about the core technologies. You have {} attempt(s) left!",
            attempts_left
        ),
        format!(
            "Close, but let's think more specifically. {} attempt(s) remaining!",
            attempts_left
        ),
        format!(
            "Good try! Consider what makes our domain unique. {} more chance(s) to get it!",
            attempts_left
        ),
    ];
    options
        .choose(&mut rand::rng())
        .cloned()
        .unwrap_or_default()
}

pub const DISCOVERY_EXHAUSTED: &str = "No more attempts for this riddle.";

pub const DISCOVERY_NEXT: &str = "Let's try the next riddle!";

pub const DISCOVERY_MISSED: [&str; 2] = [
    "Great effort everyone! Even though we didn't guess the exact terms,",
    "you've shown great curiosity! Now the domain leads will reveal the answers!",
];

pub const DISCOVERY_RECAP_HIT: [&str; 4] = [
    "Outstanding! You've successfully identified our AIML domain!",
    "You clearly understand what Machine Learning and Data Science are about!",
    "Now the domain leads will tell you MORE about the AIML domain:",
    "advanced concepts, real-world projects, and exciting opportunities ahead!",
];

pub const DISCOVERY_RECAP_MISS: &str = "Now the domain leads will tell you all about the AIML domain!";

pub const STAGE_IS_YOURS: &str = "Domain leads, the stage is yours!";

pub const WAIT_DOMAIN_LEADS: &str = "Press Enter when domain leads have finished introducing...";

pub const CORE_MEMBERS_CALL: [&str; 2] = [
    "We are not forgetting the core members!",
    "Core members, please introduce yourselves!",
];

pub const WAIT_CORE_MEMBERS: &str = "Press Enter when core members have finished introducing...";

pub const PHASE_DISCOVERY: &str = "Phase 1: Domain Discovery";

pub const PHASE_KNOWLEDGE: &str = "Phase 2: Knowledge Testing";

pub const FINAL_BANNER: &str = "FINAL RIDDLE GAME TIME!";

pub fn final_rules(attempts: u32) -> [String; 2] {
    [
        "Now that you know about our AIML domain, let's test your knowledge!".to_string(),
        format!(
            "You have {} attempts per riddle. Let's see how well you know AI/ML concepts!",
            attempts
        ),
    ]
}

pub fn final_question_header(number: usize, total: usize) -> String {
    format!("Question {}/{}:", number, total)
}

pub fn final_correct(answer: &str) -> [String; 2] {
    [
        "Excellent! That's absolutely correct!".to_string(),
        format!("The answer is indeed '{}'!", answer),
    ]
}

pub const FINAL_MOVING_ON: &str = "Great job! Moving to the next question...";

pub fn final_retry(attempts_left: u32) -> String {
    format!(
        "Not quite right. You have {} attempt(s) left. Try again!",
        attempts_left
    )
}

pub fn final_exhausted(answer: &str) -> [String; 2] {
    [
        format!("No more attempts! The correct answer was: '{}'", answer),
        "Don't worry, this helps you learn! Moving to the next question...".to_string(),
    ]
}

pub const NEXT_QUESTION: &str = "Press Enter for the next question...";

pub const GAME_COMPLETE: &str = "GAME COMPLETE!";

pub fn score_line(score: &GameScore) -> String {
    format!(
        "Your Score: {}/{}",
        score.correct_answers, score.total_questions
    )
}

/// Result bands for the final game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Perfect,
    Great,
    Good,
    KeepLearning,
}

impl ScoreBand {
    pub fn of(score: &GameScore) -> Self {
        let correct = f64::from(score.correct_answers);
        let total = f64::from(score.total_questions);
        if score.total_questions > 0 && score.correct_answers == score.total_questions {
            ScoreBand::Perfect
        } else if total > 0.0 && correct >= total * 0.7 {
            ScoreBand::Great
        } else if total > 0.0 && correct >= total * 0.5 {
            ScoreBand::Good
        } else {
            ScoreBand::KeepLearning
        }
    }

    pub fn line(&self) -> &'static str {
        match self {
            ScoreBand::Perfect => "PERFECT SCORE! You're an AIML expert!",
            ScoreBand::Great => "Great job! You have excellent knowledge of AIML concepts!",
            ScoreBand::Good => "Good effort! You're learning well about AIML!",
            ScoreBand::KeepLearning => "Keep learning! Every expert was once a beginner!",
        }
    }
}

pub const GAME_THANKS: [&str; 2] = [
    "Thank you for participating in the GDG AIML Domain Introduction!",
    "Keep exploring the amazing world of AI and Machine Learning!",
];

pub const FAREWELL_BANNER: &str = "JARVIS FINAL FAREWELL";

pub fn goodbye_message(score: Option<&GameScore>) -> String {
    let score_line = score
        .map(|s| {
            format!(
                " You scored {}/{} on the final riddles. Great work!",
                s.correct_answers, s.total_questions
            )
        })
        .unwrap_or_default();
    format!(
        "Thank you all for joining the GDG AIML Domain Introduction today! It's been \
         wonderful seeing your curiosity and enthusiasm for AI and Machine Learning!{} \
         Remember, every expert was once a beginner. Keep exploring, keep learning, and \
         keep building amazing things! Until next time! Goodbye from JARVIS!",
        score_line
    )
}

pub const SESSION_ENDED: &str = "Session Ended Successfully!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_retry_mentions_attempts() {
        for _ in 0..20 {
            let line = discovery_retry(1);
            assert!(line.contains('1'), "line was {line}");
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::of(&GameScore::new(3, 3)), ScoreBand::Perfect);
        // 2 of 3 is 66%, below the 70% band.
        assert_eq!(ScoreBand::of(&GameScore::new(2, 3)), ScoreBand::Good);
        assert_eq!(ScoreBand::of(&GameScore::new(7, 10)), ScoreBand::Great);
        assert_eq!(ScoreBand::of(&GameScore::new(1, 3)), ScoreBand::KeepLearning);
        assert_eq!(ScoreBand::of(&GameScore::new(0, 0)), ScoreBand::KeepLearning);
    }

    #[test]
    fn test_goodbye_includes_score_only_when_played() {
        let score = GameScore::new(2, 3);
        assert!(goodbye_message(Some(&score)).contains("You scored 2/3"));
        assert!(!goodbye_message(None).contains("You scored"));
    }

    #[test]
    fn test_roster_lines() {
        assert_eq!(lead_call("Krishna"), "Come, Domain Lead, Krishna.");
        assert_eq!(member_wait("Sahana"), "Core member - Sahana can speak now.");
        assert_eq!(DOMAIN_LEADS.len(), 3);
        assert_eq!(CORE_MEMBERS.len(), 6);
    }
}
