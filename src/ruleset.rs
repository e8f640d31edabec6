//! Scoring rules that a [`Round`](crate::Round) is played under.
//!
//! A [`Ruleset`] bundles three independent pieces: how a letter guess moves
//! the score ([`LetterScoring`]), when a round is lost ([`LossCondition`]),
//! and what a wrong whole-phrase guess costs ([`WordMiss`]). The round
//! evaluator only ever looks at the loss condition, so the letter scoring
//! can be swapped freely.

use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::round::LetterSet;

pub const VOWELS: LetterSet = LetterSet::from_ascii(b"AEIOU");

/// The most frequent letters in English, which earn the plain reward under
/// [`LetterScoring::RewardPenalty`].
pub const COMMON_LETTERS: LetterSet = LetterSet::from_ascii(b"ETAOINSHR");

/// How a newly guessed letter changes the score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum LetterScoring {
    /// Correct letters earn `reward`, multiplied by `rare_multiplier` for
    /// letters outside `common`. Wrong letters lose `penalty`.
    RewardPenalty {
        reward: i32,
        rare_multiplier: i32,
        penalty: i32,
        common: LetterSet,
    },

    /// Every letter costs points whether or not it is in the secret.
    CostPerGuess { vowel_cost: i32, consonant_cost: i32 },
}

impl LetterScoring {
    /// The score change for guessing `letter`, where `hit` tells whether the
    /// secret contains it. Saturates at the bounds of `i32`.
    pub fn score(&self, letter: char, hit: bool) -> i32 {
        match *self {
            LetterScoring::RewardPenalty {
                reward,
                rare_multiplier,
                penalty,
                common,
            } => match (hit, common.contains(letter)) {
                (true, true) => reward,
                (true, false) => reward.saturating_mul(rare_multiplier),
                (false, _) => penalty.saturating_neg(),
            },
            LetterScoring::CostPerGuess {
                vowel_cost,
                consonant_cost,
            } => {
                if VOWELS.contains(letter) {
                    vowel_cost.saturating_neg()
                } else {
                    consonant_cost.saturating_neg()
                }
            }
        }
    }
}

impl Display for LetterScoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LetterScoring::RewardPenalty {
                reward,
                rare_multiplier,
                penalty,
                common,
            } => write!(
                f,
                "hits earn {} (x{} outside {}), misses lose {}",
                reward, rare_multiplier, common, penalty
            ),
            LetterScoring::CostPerGuess {
                vowel_cost,
                consonant_cost,
            } => write!(
                f,
                "vowels cost {}, consonants cost {}",
                vowel_cost, consonant_cost
            ),
        }
    }
}

/// When a round still in play is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum LossCondition {
    /// Lost once this many guessed letters are absent from the secret.
    WrongLetters(usize),

    /// Lost once the score is at or below the floor. The score is clamped
    /// to the floor, so it never drops past it.
    ScoreAtMost(i32),
}

impl LossCondition {
    pub fn is_met(&self, score: i32, misses: usize) -> bool {
        match *self {
            LossCondition::WrongLetters(limit) => misses >= limit,
            LossCondition::ScoreAtMost(floor) => score <= floor,
        }
    }

    /// Applies the score floor, if this condition has one.
    pub fn clamp(&self, score: i32) -> i32 {
        match *self {
            LossCondition::WrongLetters(_) => score,
            LossCondition::ScoreAtMost(floor) => score.max(floor),
        }
    }
}

impl Display for LossCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossCondition::WrongLetters(limit) => write!(f, "lost after {} wrong letters", limit),
            LossCondition::ScoreAtMost(floor) => write!(f, "lost at a score of {}", floor),
        }
    }
}

/// What a wrong whole-phrase guess costs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum WordMiss {
    /// Uses up one of the round's phrase attempts. The score is untouched.
    SpendAttempt,

    /// Subtracts `penalty` and ends the round on the spot.
    EndRound { penalty: i32 },
}

impl Display for WordMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordMiss::SpendAttempt => write!(f, "a wrong phrase spends an attempt"),
            WordMiss::EndRound { penalty } => {
                write!(f, "a wrong phrase loses {} and ends the round", penalty)
            }
        }
    }
}

/// A complete set of scoring rules.
///
/// Start from one of the presets and adjust it with the builder methods,
/// each of which consumes the ruleset and returns a new one.
///
/// # Examples
///
/// ```rust
/// use treeguessr::{ruleset::LossCondition, Ruleset};
///
/// let ruleset = Ruleset::cost_per_guess()
///     .word_attempts(3)
///     .loss(LossCondition::ScoreAtMost(0));
///
/// assert_eq!(ruleset, Ruleset::cost_per_guess_strict());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Ruleset {
    starting_score: i32,
    word_attempts: u32,
    letters: LetterScoring,
    loss: LossCondition,
    word_miss: WordMiss,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::cost_per_guess()
    }
}

impl Ruleset {
    /// Classic hangman scoring: points for hits, a penalty for misses, six
    /// wrong letters lose, and one wrong phrase ends the round.
    pub fn reward_penalty() -> Self {
        Ruleset {
            starting_score: 0,
            word_attempts: 1,
            letters: LetterScoring::RewardPenalty {
                reward: 10,
                rare_multiplier: 2,
                penalty: 5,
                common: COMMON_LETTERS,
            },
            loss: LossCondition::WrongLetters(6),
            word_miss: WordMiss::EndRound { penalty: 25 },
        }
    }

    /// Every letter costs points, and the round is lost at a score of five.
    /// This is the default ruleset.
    pub fn cost_per_guess() -> Self {
        Ruleset {
            starting_score: 100,
            word_attempts: 5,
            letters: LetterScoring::CostPerGuess {
                vowel_cost: 15,
                consonant_cost: 5,
            },
            loss: LossCondition::ScoreAtMost(5),
            word_miss: WordMiss::SpendAttempt,
        }
    }

    /// Like [`cost_per_guess()`](Ruleset::cost_per_guess()), but the score
    /// may run all the way down to zero and only three phrase guesses are
    /// allowed.
    pub fn cost_per_guess_strict() -> Self {
        Ruleset {
            word_attempts: 3,
            loss: LossCondition::ScoreAtMost(0),
            ..Self::cost_per_guess()
        }
    }

    pub fn starting_score(self, starting_score: i32) -> Self {
        Ruleset {
            starting_score,
            ..self
        }
    }

    /// Sets the number of whole-phrase guesses. At least one is always
    /// allowed.
    pub fn word_attempts(self, word_attempts: u32) -> Self {
        Ruleset {
            word_attempts: word_attempts.max(1),
            ..self
        }
    }

    pub fn letters(self, letters: LetterScoring) -> Self {
        Ruleset { letters, ..self }
    }

    pub fn loss(self, loss: LossCondition) -> Self {
        Ruleset { loss, ..self }
    }

    pub fn word_miss(self, word_miss: WordMiss) -> Self {
        Ruleset { word_miss, ..self }
    }

    pub fn initial_score(&self) -> i32 {
        self.starting_score
    }

    /// Phrase guesses a round starts with, never less than one.
    pub fn initial_attempts(&self) -> u32 {
        self.word_attempts.max(1)
    }

    pub fn letter_scoring(&self) -> &LetterScoring {
        &self.letters
    }

    pub fn loss_condition(&self) -> &LossCondition {
        &self.loss
    }

    pub fn word_miss_policy(&self) -> &WordMiss {
        &self.word_miss
    }
}

impl Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start at {}, {}; {}; {} phrase guess{}, {}",
            self.starting_score,
            self.letters,
            self.loss,
            self.initial_attempts(),
            if self.initial_attempts() == 1 { "" } else { "es" },
            self.word_miss
        )
    }
}

/// The named presets, for picking a ruleset from configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Variant {
    RewardPenalty,
    CostPerGuess,
    CostPerGuessStrict,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::CostPerGuess
    }
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::RewardPenalty,
        Variant::CostPerGuess,
        Variant::CostPerGuessStrict,
    ];

    pub fn ruleset(self) -> Ruleset {
        match self {
            Variant::RewardPenalty => Ruleset::reward_penalty(),
            Variant::CostPerGuess => Ruleset::cost_per_guess(),
            Variant::CostPerGuessStrict => Ruleset::cost_per_guess_strict(),
        }
    }

    /// The short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Variant::RewardPenalty => "reward",
            Variant::CostPerGuess => "cost",
            Variant::CostPerGuessStrict => "strict",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returned when a ruleset name is not one of the presets.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ruleset \"{0}\", expected one of reward, cost, strict")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
