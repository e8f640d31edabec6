//! The round engine: one secret phrase, played from the first guess to a win
//! or a loss.
//!
//! A [`Round`] is a plain value. Every operation consumes it and hands back
//! the next one, so whoever drives the game (a [`Session`](crate::Session),
//! a [`Player`](crate::Player), a test) owns the only copy and the engine
//! itself keeps nothing between calls.

use std::fmt::Display;

use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ruleset::{Ruleset, WordMiss},
    source::{is_playable, normalize_phrase},
    Result, RoundError,
};

mod letters;
pub use letters::LetterSet;

/// Where a round is in its lifecycle.
///
/// A round starts out `Playing` and moves to `Won` or `Lost` exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum RoundState {
    Playing,
    Won,
    Lost,
}

/// Which input surface the view shows. Every round starts in
/// `LetterEntry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum InputMode {
    LetterEntry,
    WordEntry,
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::LetterEntry
    }
}

/// Something the player asked to do within a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Intent {
    GuessLetter(char),
    GuessWord(String),
    SwitchMode(InputMode),
}

/// One play-through of a single secret phrase.
///
/// # Examples
///
/// ```rust
/// use treeguessr::{Round, RoundState, Ruleset};
///
/// let round = Round::with_secret("oak tree", Ruleset::cost_per_guess())?;
/// assert_eq!(round.masked(), "___ ____");
///
/// let round = round.guess_letter('e').guess_letter('z');
/// assert_eq!(round.masked(), "___ __EE");
/// assert_eq!(round.score(), 80);
/// assert_eq!(round.misses().to_string(), "Z");
///
/// let round = round.guess_word("Oak Tree");
/// assert_eq!(round.state(), RoundState::Won);
/// assert_eq!(round.masked(), "OAK TREE");
/// # Ok::<_, treeguessr::TreeguessrError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Round {
    secret: String,
    letters: LetterSet,
    guessed: LetterSet,
    score: i32,
    attempts_remaining: u32,
    state: RoundState,
    message: String,
    mode: InputMode,
    wrong_words: Vec<String>,
    ruleset: Ruleset,
}

impl Round {
    /// Starts a round with a secret drawn uniformly at random from
    /// `candidates`.
    ///
    /// Returns [`RoundError::NoCandidates`] if there is nothing to draw from.
    /// Each call is an independent draw, so the same phrase can come up in
    /// consecutive rounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treeguessr::{Round, RoundError, Ruleset, TreeguessrError};
    ///
    /// let mut rng = rand::thread_rng();
    /// let round = Round::start(&["willow"], Ruleset::default(), &mut rng)?;
    /// assert_eq!(round.secret(), "WILLOW");
    ///
    /// let none: [&str; 0] = [];
    /// assert!(matches!(
    ///     Round::start(&none, Ruleset::default(), &mut rng),
    ///     Err(TreeguessrError::Round { kind: RoundError::NoCandidates })
    /// ));
    /// # Ok::<_, TreeguessrError>(())
    /// ```
    pub fn start<S, R>(candidates: &[S], ruleset: Ruleset, rng: &mut R) -> Result<Self>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let chosen = candidates.choose(rng).ok_or(RoundError::NoCandidates)?;
        Self::with_secret(chosen.as_ref(), ruleset)
    }

    /// Starts a round with a known secret.
    ///
    /// The secret is normalized like a word list line. It must be made of
    /// letters and spaces, with at least one letter.
    pub fn with_secret(secret: &str, ruleset: Ruleset) -> Result<Self> {
        let normalized = normalize_phrase(secret);
        if !is_playable(&normalized) {
            return Err(RoundError::InvalidSecret(secret.to_string()).into());
        }

        debug!("starting a round with a {} letter secret", normalized.len());

        Ok(Round {
            letters: LetterSet::from_letters(&normalized),
            secret: normalized,
            guessed: LetterSet::new(),
            score: ruleset.initial_score(),
            attempts_remaining: ruleset.initial_attempts(),
            state: RoundState::Playing,
            message: String::new(),
            mode: InputMode::default(),
            wrong_words: Vec::new(),
            ruleset,
        })
    }

    /// Guesses a single letter.
    ///
    /// Lowercase letters are uppercased first. Anything that is not an ASCII
    /// letter, a letter that was already guessed, and any guess after the
    /// round has ended are ignored and return the round unchanged.
    pub fn guess_letter(mut self, letter: char) -> Self {
        if self.is_over() {
            trace!("ignoring letter {:?} after the round ended", letter);
            return self;
        }

        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            trace!("ignoring non-letter {:?}", letter);
            return self;
        }
        if !self.guessed.insert(letter) {
            trace!("ignoring repeated letter {}", letter);
            return self;
        }

        let hit = self.letters.contains(letter);
        let delta = self.ruleset.letter_scoring().score(letter, hit);
        self.adjust_score(delta);

        self.evaluate()
    }

    /// Guesses the whole phrase.
    ///
    /// The candidate is trimmed, uppercased and has its interior whitespace
    /// collapsed before it is compared. A match reveals every letter. A miss
    /// is remembered in [`wrong_words()`](Round::wrong_words()) and charged
    /// according to the ruleset's [`WordMiss`] policy; repeating the same
    /// wrong phrase is charged again.
    pub fn guess_word(mut self, candidate: &str) -> Self {
        if self.is_over() {
            trace!("ignoring phrase guess after the round ended");
            return self;
        }

        let candidate = normalize_phrase(candidate);
        if candidate.is_empty() {
            trace!("ignoring empty phrase guess");
            return self;
        }

        if candidate == self.secret {
            self.guessed = self.guessed.union(self.letters);
            return self.evaluate();
        }

        self.wrong_words.push(candidate);
        match *self.ruleset.word_miss_policy() {
            WordMiss::SpendAttempt => {
                self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            }
            WordMiss::EndRound { penalty } => {
                self.adjust_score(penalty.saturating_neg());
                self.attempts_remaining = 0;
            }
        }

        self.evaluate()
    }

    /// Changes the active input surface. Ignored once the round is over.
    pub fn switch_mode(mut self, mode: InputMode) -> Self {
        if !self.is_over() {
            self.mode = mode;
        }
        self
    }

    /// Applies an [`Intent`], dispatching to the matching operation.
    pub fn apply(self, intent: &Intent) -> Self {
        match intent {
            Intent::GuessLetter(letter) => self.guess_letter(*letter),
            Intent::GuessWord(candidate) => self.guess_word(candidate),
            Intent::SwitchMode(mode) => self.switch_mode(*mode),
        }
    }

    /// Re-derives the round's state from its guesses, score and attempts.
    ///
    /// Every mutating operation ends by calling this. A round is won once
    /// every letter of the secret has been guessed; otherwise it is lost
    /// when it runs out of phrase attempts or the ruleset's
    /// [`LossCondition`](crate::ruleset::LossCondition) holds. Calling this
    /// on a finished round does nothing.
    pub fn evaluate(mut self) -> Self {
        if self.is_over() {
            return self;
        }

        if self.guessed.is_superset(self.letters) {
            self.finish(RoundState::Won);
        } else if self.attempts_remaining == 0
            || self
                .ruleset
                .loss_condition()
                .is_met(self.score, self.misses().len())
        {
            self.finish(RoundState::Lost);
        }

        self
    }

    fn adjust_score(&mut self, delta: i32) {
        self.score = self
            .ruleset
            .loss_condition()
            .clamp(self.score.saturating_add(delta));
    }

    fn finish(&mut self, state: RoundState) {
        self.state = state;
        self.message = match state {
            RoundState::Won => format!(
                "You got it! The tree was {}. Final score: {}.",
                self.secret, self.score
            ),
            RoundState::Lost => format!(
                "Out of luck! The tree was {}. Final score: {}.",
                self.secret, self.score
            ),
            RoundState::Playing => String::new(),
        };
        debug!(
            "round ended {:?} with score {} after {} letters and {} phrase guesses",
            state,
            self.score,
            self.guessed.len(),
            self.wrong_words.len()
        );
    }

    /// The secret phrase. Views should only show this once the round is
    /// over.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn guessed(&self) -> LetterSet {
        self.guessed
    }

    /// Guessed letters that appear in the secret.
    pub fn hits(&self) -> LetterSet {
        self.guessed.intersection(self.letters)
    }

    /// Guessed letters that do not appear in the secret.
    pub fn misses(&self) -> LetterSet {
        self.guessed.difference(self.letters)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The end-of-round message, empty while the round is being played.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Wrong whole-phrase guesses, oldest first.
    pub fn wrong_words(&self) -> &[String] {
        &self.wrong_words
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn is_over(&self) -> bool {
        self.state != RoundState::Playing
    }

    pub fn is_won(&self) -> bool {
        self.state == RoundState::Won
    }

    /// Number of distinct letters of the secret still hidden.
    pub fn hidden(&self) -> usize {
        self.letters.difference(self.guessed).len()
    }

    /// The secret with every unrevealed letter replaced by `_`. Spaces are
    /// always shown.
    pub fn masked(&self) -> String {
        self.secret
            .chars()
            .map(|c| {
                if c == ' ' || self.guessed.contains(c) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_over() {
            write!(f, "{}", self.secret)
        } else {
            write!(f, "{}", self.masked())
        }
    }
}
