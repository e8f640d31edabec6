//! The owner of the current round, for views to drive.

use std::path::Path;

use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{Intent, Result, Round, Ruleset, SourceError, WordSource};

/// Holds the word list, the round in progress and the rounds played so far
/// by this process.
///
/// A session without a word list is inert: it refuses to start rounds until
/// [`load()`](Session::load()) succeeds or a source is supplied with
/// [`with_source()`](Session::with_source()). Nothing here is persisted.
///
/// # Examples
///
/// ```rust
/// use treeguessr::{Intent, RoundState, Ruleset, Session, WordSource};
///
/// let mut session = Session::seeded(Ruleset::default(), 1)
///     .with_source(WordSource::parse("yew")?);
///
/// session.new_round()?;
/// for letter in ['Y', 'E', 'W'] {
///     session.dispatch(&Intent::GuessLetter(letter));
/// }
///
/// let round = session.round().unwrap();
/// assert_eq!(round.state(), RoundState::Won);
/// # Ok::<_, treeguessr::TreeguessrError>(())
/// ```
#[derive(Debug)]
pub struct Session {
    ruleset: Ruleset,
    source: Option<WordSource>,
    round: Option<Round>,
    history: Vec<Round>,
    rng: StdRng,
}

impl Session {
    /// Creates an inert session seeded from system entropy.
    pub fn new(ruleset: Ruleset) -> Self {
        Self::with_rng(ruleset, StdRng::from_entropy())
    }

    /// Creates an inert session whose secret draws are reproducible.
    pub fn seeded(ruleset: Ruleset, seed: u64) -> Self {
        Self::with_rng(ruleset, StdRng::seed_from_u64(seed))
    }

    fn with_rng(ruleset: Ruleset, rng: StdRng) -> Self {
        Session {
            ruleset,
            source: None,
            round: None,
            history: Vec::new(),
            rng,
        }
    }

    pub fn with_source(self, source: WordSource) -> Self {
        Session {
            source: Some(source),
            ..self
        }
    }

    /// Loads a word list from disk.
    ///
    /// On failure the session becomes inert: the old list is dropped and
    /// the round in progress is retired. The error is returned so the view
    /// can show it; calling `load` again may succeed.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        match WordSource::load(path) {
            Ok(source) => {
                self.source = Some(source);
                Ok(())
            }
            Err(e) => {
                warn!("word list unavailable: {}", e);
                self.source = None;
                self.retire();
                Err(e)
            }
        }
    }

    /// Uses `ruleset` from the next round on.
    pub fn set_ruleset(&mut self, ruleset: Ruleset) {
        self.ruleset = ruleset;
    }

    /// Replaces the current round with a fresh one, finished or not.
    ///
    /// Returns [`SourceError::NotLoaded`] if the session has no word list.
    pub fn new_round(&mut self) -> Result<&Round> {
        let source = self.source.as_ref().ok_or(SourceError::NotLoaded)?;
        let round = source.start_round(self.ruleset, &mut self.rng)?;
        self.retire();
        Ok(self.round.insert(round))
    }

    /// Applies an intent to the current round.
    ///
    /// Without a round there is nothing to apply it to, and the intent is
    /// dropped.
    pub fn dispatch(&mut self, intent: &Intent) -> Option<&Round> {
        match self.round.take() {
            Some(round) => Some(self.round.insert(round.apply(intent))),
            None => {
                debug!("dropping {:?} with no round in progress", intent);
                None
            }
        }
    }

    fn retire(&mut self) {
        if let Some(previous) = self.round.take() {
            self.history.push(previous);
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Rounds replaced during this session, oldest first.
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn source(&self) -> Option<&WordSource> {
        self.source.as_ref()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Number of rounds won, counting the current one.
    pub fn wins(&self) -> usize {
        self.history
            .iter()
            .chain(self.round.iter())
            .filter(|r| r.is_won())
            .count()
    }
}
