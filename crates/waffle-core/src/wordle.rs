//! # Waffle Wordle
//!
//! A 5-letter word-guessing mini-game. Winning a round grants the Wordle
//! discount.
//!
//! ## Round State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          submit_guess (miss, attempt ≤ 5)                               │
//! │              ┌──────┐                                                   │
//! │              ▼      │                                                   │
//! │  ┌────────────────────────┐  exact match  ┌───────┐                     │
//! │  │ InProgress(attempt)    │──────────────►│  Won  │── guesses rejected  │
//! │  └────────────────────────┘               └───────┘   (AlreadyWon)      │
//! │              │                                                          │
//! │              │ miss with attempt now > 5                                │
//! │              ▼                                                          │
//! │  ┌────────────────────────┐   secret revealed, fresh round drawn        │
//! │  │ LostExhausted          │──────────────► InProgress(1)                │
//! │  └────────────────────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feedback
//! Each letter is Exact (🟩) when it matches the secret at the same
//! position, Present (🟨) when it appears anywhere else in the secret, and
//! Absent (⬜) otherwise. Presence is plain membership: a letter guessed
//! twice can be marked Present twice even if the secret has it once.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::catalog::WAFFLE_WORDS;
use crate::error::GuessRejection;
use crate::MAX_WORDLE_ATTEMPTS;

// =============================================================================
// Feedback
// =============================================================================

/// Verdict for one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LetterMark {
    /// Right letter, right place.
    Exact,
    /// Letter occurs elsewhere in the secret.
    Present,
    /// Letter not in the secret.
    Absent,
}

impl LetterMark {
    pub const fn symbol(&self) -> &'static str {
        match self {
            LetterMark::Exact => "🟩",
            LetterMark::Present => "🟨",
            LetterMark::Absent => "⬜",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterFeedback {
    pub letter: char,
    pub mark: LetterMark,
}

/// Per-letter verdicts for a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessFeedback(pub Vec<LetterFeedback>);

impl GuessFeedback {
    pub fn letters(&self) -> &[LetterFeedback] {
        &self.0
    }

    pub fn marks(&self) -> Vec<LetterMark> {
        self.0.iter().map(|l| l.mark).collect()
    }

    pub fn is_all_exact(&self) -> bool {
        self.0.iter().all(|l| l.mark == LetterMark::Exact)
    }
}

/// Renders as `S : 🟩 Y : 🟨 R : ⬜ ...`.
impl fmt::Display for GuessFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, l) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} : {}", l.letter, l.mark.symbol())?;
        }
        Ok(())
    }
}

/// Scores `guess` against `secret`.
///
/// ## Example
/// ```rust
/// use waffle_core::wordle::{feedback, LetterMark::*};
///
/// let fb = feedback("PAPER", "SYRUP");
/// assert_eq!(fb.marks(), vec![Present, Absent, Present, Absent, Present]);
/// ```
pub fn feedback(guess: &str, secret: &str) -> GuessFeedback {
    let secret: Vec<char> = secret.chars().collect();

    GuessFeedback(
        guess
            .chars()
            .enumerate()
            .map(|(i, letter)| {
                let mark = if secret.get(i) == Some(&letter) {
                    LetterMark::Exact
                } else if secret.contains(&letter) {
                    LetterMark::Present
                } else {
                    LetterMark::Absent
                };
                LetterFeedback { letter, mark }
            })
            .collect(),
    )
}

/// Upper-cases and trims a raw guess.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Letters in every secret word.
pub const WORD_LENGTH: usize = 5;

/// Whether `word` can be a secret: exactly five ASCII letters once trimmed.
pub fn is_playable_word(word: &str) -> bool {
    let word = word.trim();
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_alphabetic())
}

// =============================================================================
// Round
// =============================================================================

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RoundStatus {
    InProgress { attempt: u32 },
    Won,
    LostExhausted,
}

/// Result of an evaluated guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Wrong word, attempts left.
    Miss {
        feedback: GuessFeedback,
        attempts_remaining: u32,
    },
    /// Exact match. The caller should record the Wordle discount.
    Won { feedback: GuessFeedback },
    /// Wrong word on the last attempt. The round is over.
    Exhausted {
        feedback: GuessFeedback,
        secret: String,
    },
}

impl GuessOutcome {
    pub fn feedback(&self) -> &GuessFeedback {
        match self {
            GuessOutcome::Miss { feedback, .. }
            | GuessOutcome::Won { feedback }
            | GuessOutcome::Exhausted { feedback, .. } => feedback,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, GuessOutcome::Won { .. })
    }
}

/// One round of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordleRound {
    secret: String,
    attempt: u32,
    won: bool,
    guesses: Vec<String>,
    feedbacks: Vec<GuessFeedback>,
}

impl WordleRound {
    /// Starts a round with a known secret.
    pub fn new(secret: impl Into<String>) -> Self {
        WordleRound {
            secret: normalize_guess(&secret.into()),
            attempt: 1,
            won: false,
            guesses: Vec::new(),
            feedbacks: Vec::new(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Current attempt number, starting at 1.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn feedbacks(&self) -> &[GuessFeedback] {
        &self.feedbacks
    }

    pub fn status(&self) -> RoundStatus {
        if self.won {
            RoundStatus::Won
        } else if self.attempt > MAX_WORDLE_ATTEMPTS {
            RoundStatus::LostExhausted
        } else {
            RoundStatus::InProgress {
                attempt: self.attempt,
            }
        }
    }

    /// Guesses left before the round is lost.
    pub fn attempts_remaining(&self) -> u32 {
        (MAX_WORDLE_ATTEMPTS + 1).saturating_sub(self.attempt)
    }

    /// Evaluates a guess.
    ///
    /// ## Errors
    /// - [`GuessRejection::AlreadyWon`] once the round is solved
    /// - [`GuessRejection::LengthMismatch`] for empty or wrong-length input
    ///
    /// Rejected guesses leave the round untouched.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessRejection> {
        if self.won {
            return Err(GuessRejection::AlreadyWon);
        }

        let guess = normalize_guess(raw);
        let expected = self.secret.chars().count();
        let actual = guess.chars().count();
        if actual == 0 || actual != expected {
            return Err(GuessRejection::LengthMismatch { expected, actual });
        }

        let fb = feedback(&guess, &self.secret);
        self.guesses.push(guess.clone());
        self.feedbacks.push(fb.clone());
        debug!(guess = %guess, attempt = self.attempt, "Wordle guess evaluated");

        if guess == self.secret {
            self.won = true;
            return Ok(GuessOutcome::Won { feedback: fb });
        }

        self.attempt += 1;
        if self.attempt > MAX_WORDLE_ATTEMPTS {
            return Ok(GuessOutcome::Exhausted {
                feedback: fb,
                secret: self.secret.clone(),
            });
        }

        Ok(GuessOutcome::Miss {
            feedback: fb,
            attempts_remaining: self.attempts_remaining(),
        })
    }

    /// A view of the round that only reveals the secret once it is solved.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            status: self.status(),
            attempt: self.attempt,
            attempts_remaining: self.attempts_remaining(),
            word_length: self.secret.chars().count(),
            history: self
                .guesses
                .iter()
                .zip(&self.feedbacks)
                .map(|(guess, feedback)| GuessRecord {
                    guess: guess.clone(),
                    rendered: feedback.to_string(),
                    feedback: feedback.clone(),
                })
                .collect(),
            secret: self.won.then(|| self.secret.clone()),
        }
    }
}

/// A past guess with its verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub guess: String,
    pub feedback: GuessFeedback,
    pub rendered: String,
}

/// Serializable view of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub status: RoundStatus,
    pub attempt: u32,
    pub attempts_remaining: u32,
    pub word_length: usize,
    pub history: Vec<GuessRecord>,
    pub secret: Option<String>,
}

// =============================================================================
// Game
// =============================================================================

/// The word game for one session: the live round plus the RNG that draws
/// secrets.
///
/// The round is created on first use. A lost round is replaced at once by
/// a fresh one.
#[derive(Debug, Clone)]
pub struct WordleGame {
    round: Option<WordleRound>,
    words: Vec<String>,
    rng: Option<StdRng>,
}

impl Default for WordleGame {
    fn default() -> Self {
        Self::new()
    }
}

impl WordleGame {
    /// A game drawing from the waffle word list with the thread RNG.
    pub fn new() -> Self {
        WordleGame {
            round: None,
            words: WAFFLE_WORDS.iter().map(|w| w.to_string()).collect(),
            rng: None,
        }
    }

    /// A game with reproducible secret draws.
    pub fn new_with_seed(seed: u64) -> Self {
        WordleGame {
            rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    /// Replaces the word list.
    ///
    /// Words that are not five ASCII letters are dropped. If none are left
    /// the current list is kept.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| normalize_guess(w.as_ref()))
            .filter(|w| {
                let playable = is_playable_word(w);
                if !playable {
                    warn!(word = %w, "Skipping word that is not five letters");
                }
                playable
            })
            .collect();
        if !words.is_empty() {
            self.words = words;
        }
        self
    }

    /// The live round, if one has been started.
    pub fn current(&self) -> Option<&WordleRound> {
        self.round.as_ref()
    }

    /// The live round, drawing one first if needed.
    pub fn round(&mut self) -> &WordleRound {
        self.ensure_round()
    }

    fn ensure_round(&mut self) -> &mut WordleRound {
        let WordleGame { round, words, rng } = self;
        round.get_or_insert_with(|| {
            debug!("New wordle round drawn");
            WordleRound::new(draw_secret(words, rng.as_mut()))
        })
    }

    /// Plays a guess in the live round.
    ///
    /// When the guess exhausts the round, the returned outcome carries the
    /// old secret and a new round is already in place.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessRejection> {
        let outcome = self.ensure_round().submit_guess(raw)?;

        match &outcome {
            GuessOutcome::Won { .. } => info!("Wordle round won"),
            GuessOutcome::Exhausted { secret, .. } => {
                info!(secret = %secret, "Wordle round lost, starting a new one");
                self.reset();
            }
            GuessOutcome::Miss { .. } => {}
        }

        Ok(outcome)
    }

    /// Throws away the live round and draws a new one.
    pub fn reset(&mut self) {
        self.round = None;
        self.ensure_round();
    }
}

fn draw_secret(words: &[String], rng: Option<&mut StdRng>) -> String {
    let choice = match rng {
        Some(rng) => words.choose(rng),
        None => words.choose(&mut rand::rng()),
    };
    choice
        .cloned()
        .unwrap_or_else(|| WAFFLE_WORDS[0].to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
