//! Automated players for simulating rounds.

use std::fmt::{Debug, Display};

use crate::Round;

mod alphabetical;
pub use alphabetical::Alphabetical;

mod frequency;
pub use frequency::Frequency;

/// Trait defining an automated player.
///
/// The [simulation harness](crate::harness) hands a fresh [`Round`] to
/// [`play()`](Player::play()) and records whatever comes back. Players see
/// the same read-only view of the round a person would: the masked phrase,
/// the letters tried so far, the score. They must not peek at
/// [`Round::secret()`] before the round is over.
///
/// # How to implement
///
/// Implement [`Display`] with a short single-line name, then [`Player`].
///
/// ```rust
/// use std::fmt::Display;
/// use treeguessr::{Player, Round};
///
/// #[derive(Debug)]
/// struct Vowels;
///
/// impl Display for Vowels {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "Vowels")
///     }
/// }
///
/// impl Player for Vowels {
///     fn play(&self, mut round: Round) -> Round {
///         for letter in "AEIOUBCDFGHJKLMNPQRSTVWXYZ".chars() {
///             if round.is_over() {
///                 break;
///             }
///             round = round.guess_letter(letter);
///         }
///         round
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
/// ```
pub trait Player: Display + Debug + Sync {
    /// Plays `round` to the end and returns the finished round.
    ///
    /// Guessing every letter always ends a round, so a player that falls
    /// back to the full alphabet can never leave one unfinished.
    fn play(&self, round: Round) -> Round;

    /// Provides a version for this player.
    ///
    /// Bump this whenever the guessing logic changes so that reports from
    /// different runs are not confused.
    fn version(&self) -> &'static str;
}
