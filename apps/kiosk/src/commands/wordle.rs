//! # Wordle Commands
//!
//! Guessing and viewing the word game. A win writes the 10% bonus into
//! the session's discounts.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use waffle_core::wordle::{normalize_guess, GuessFeedback, GuessOutcome, GuessRecord, RoundSnapshot};

use crate::error::ApiError;
use crate::state::SessionState;

/// Result of an evaluated guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    pub feedback: GuessFeedback,

    /// `S : 🟩 Y : 🟨 ...`
    pub rendered: String,

    pub won: bool,

    /// Guesses left in the live round. After a loss this is the fresh
    /// round's full allowance.
    pub attempts_remaining: u32,

    /// Set only when the round was lost.
    pub revealed_secret: Option<String>,

    pub message: String,

    /// Guesses of the round this guess was played in.
    pub history: Vec<GuessRecord>,
}

/// Plays one guess.
///
/// ## Errors
/// `WORDLE_NOTICE` when the round is already won or the guess has the
/// wrong length. Nothing changes in either case.
pub fn submit_wordle_guess(session: &SessionState, guess: &str) -> Result<GuessResponse, ApiError> {
    debug!(guess = %guess, "submit_wordle_guess command");

    session.with_session_mut(|s| {
        let mut history = s.wordle.round().snapshot().history;
        let outcome = s.wordle.submit_guess(guess)?;

        let feedback = outcome.feedback().clone();
        history.push(GuessRecord {
            guess: normalize_guess(guess),
            rendered: feedback.to_string(),
            feedback: feedback.clone(),
        });

        let (won, revealed_secret, message) = match &outcome {
            GuessOutcome::Won { .. } => {
                s.discounts_mut().record_wordle_win();
                (true, None, "🎉 Correct! 10% discount applied.".to_string())
            }
            GuessOutcome::Miss {
                attempts_remaining, ..
            } => (
                false,
                None,
                format!("Not quite. {} attempts left.", attempts_remaining),
            ),
            GuessOutcome::Exhausted { secret, .. } => (
                false,
                Some(secret.clone()),
                format!("Out of attempts! The word was {}.", secret),
            ),
        };

        Ok(GuessResponse {
            rendered: feedback.to_string(),
            feedback,
            won,
            attempts_remaining: s.wordle.round().attempts_remaining(),
            revealed_secret,
            message,
            history,
        })
    })
}

/// The live round without guessing. Starts a round if none exists.
pub fn get_wordle(session: &SessionState) -> RoundSnapshot {
    debug!("get_wordle command");
    session.with_session_mut(|s| s.wordle.round().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Session;
    use waffle_core::discount::TierPolicy;
    use waffle_core::wordle::{RoundStatus, WordleGame};
    use waffle_core::DiscountKind;

    fn with_secret(secret: &str) -> SessionState {
        SessionState::new(Session::new(
            TierPolicy::Recompute,
            WordleGame::new().with_words([secret]),
        ))
    }

    #[test]
    fn test_win_grants_bonus() {
        let state = with_secret("HONEY");

        let resp = submit_wordle_guess(&state, "honey").unwrap();
        assert!(resp.won);
        assert!(resp.feedback.is_all_exact());
        assert_eq!(resp.history.len(), 1);
        assert!(state.with_session(|s| s.discounts().contains(DiscountKind::WordleBonus)));
    }

    #[test]
    fn test_guess_after_win_is_notice() {
        let state = with_secret("HONEY");
        submit_wordle_guess(&state, "HONEY").unwrap();

        let err = submit_wordle_guess(&state, "HONEY").unwrap_err();
        assert_eq!(err.code, ErrorCode::WordleNotice);
        assert_eq!(err.message, "Already solved this round.");
    }

    #[test]
    fn test_wrong_length_is_notice() {
        let state = with_secret("HONEY");

        let err = submit_wordle_guess(&state, "HON").unwrap_err();
        assert_eq!(err.message, "Enter a 5-letter word.");
        assert!(get_wordle(&state).history.is_empty());
    }

    #[test]
    fn test_miss_then_loss_reveals_secret() {
        let state = with_secret("HONEY");

        let first = submit_wordle_guess(&state, "SYRUP").unwrap();
        assert!(!first.won);
        assert_eq!(first.attempts_remaining, 4);
        assert_eq!(first.rendered, "S : ⬜ Y : 🟨 R : ⬜ U : ⬜ P : ⬜");

        let mut last = first;
        for _ in 0..4 {
            last = submit_wordle_guess(&state, "SYRUP").unwrap();
        }

        assert_eq!(last.revealed_secret.as_deref(), Some("HONEY"));
        assert_eq!(last.history.len(), 5);
        assert_eq!(last.attempts_remaining, 5);

        let fresh = get_wordle(&state);
        assert_eq!(fresh.status, RoundStatus::InProgress { attempt: 1 });
        assert!(fresh.history.is_empty());
        assert!(state.with_session(|s| s.discounts().is_empty()));
    }
}
