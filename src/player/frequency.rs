use std::fmt::Display;

use crate::{player::Player, LetterSet, Round};

/// Letters ordered by how often they appear in English text.
pub const FREQUENCY_ORDER: &str = "ETAOINSHRDLCUMWFGYPBVKJXQZ";

/// A player that guesses letters from most to least common.
///
/// Given a list of the phrases a secret might be, it can also guess the
/// whole phrase once few enough letters remain hidden. It picks the first
/// listed phrase that agrees with everything revealed so far.
///
/// # Examples
///
/// ```rust
/// use treeguessr::{player::Frequency, Player, Round, Ruleset, WordSource};
///
/// let source = WordSource::parse("ash\noak tree\nyew tree")?;
/// let player = Frequency::new().knowing(&source).guess_word_at(3);
///
/// let round = player.play(Round::with_secret("oak tree", Ruleset::default())?);
/// assert!(round.is_won());
/// assert!(round.wrong_words().is_empty());
/// # Ok::<_, treeguessr::TreeguessrError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frequency {
    candidates: Vec<String>,
    word_threshold: Option<usize>,
}

impl Frequency {
    /// Creates a player that only ever guesses letters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives the player a list of possible secrets.
    pub fn knowing(self, phrases: &[String]) -> Self {
        Frequency {
            candidates: phrases.to_vec(),
            ..self
        }
    }

    /// Guesses the whole phrase once at most `hidden` distinct letters are
    /// unrevealed.
    pub fn guess_word_at(self, hidden: usize) -> Self {
        Frequency {
            word_threshold: Some(hidden),
            ..self
        }
    }

    fn consistent<'a>(&'a self, round: &'a Round) -> impl Iterator<Item = &'a str> + 'a {
        let masked = round.masked();
        let guessed = round.guessed();

        self.candidates
            .iter()
            .map(String::as_str)
            .filter(move |c| !round.wrong_words().iter().any(|w| w.as_str() == *c))
            .filter(move |c| agrees(c, &masked, guessed))
    }
}

/// Whether `candidate` could be the secret behind `masked`.
fn agrees(candidate: &str, masked: &str, guessed: LetterSet) -> bool {
    candidate.len() == masked.len()
        && candidate.chars().zip(masked.chars()).all(|(c, m)| match m {
            '_' => c != ' ' && !guessed.contains(c),
            shown => c == shown,
        })
}

impl Player for Frequency {
    fn play(&self, mut round: Round) -> Round {
        for letter in FREQUENCY_ORDER.chars() {
            if let Some(threshold) = self.word_threshold {
                if !round.is_over() && round.hidden() <= threshold {
                    let guess = self.consistent(&round).next().map(str::to_string);
                    if let Some(guess) = guess {
                        round = round.guess_word(&guess);
                    }
                }
            }

            if round.is_over() {
                break;
            }
            round = round.guess_letter(letter);
        }

        round
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frequency")?;
        if let Some(threshold) = self.word_threshold {
            write!(
                f,
                " (phrase at {} hidden, {} known)",
                threshold,
                self.candidates.len()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{RoundState, Ruleset, TreeguessrError, WordSource};

    #[test]
    fn order_covers_the_alphabet() {
        assert_eq!(FREQUENCY_ORDER.len(), 26);
        assert_eq!(LetterSet::from_letters(FREQUENCY_ORDER).len(), 26);
    }

    #[test]
    fn letters_only() -> Result<(), TreeguessrError> {
        let round = Frequency::new().play(Round::with_secret("OAK TREE", Ruleset::default())?);
        assert_eq!(round.state(), RoundState::Lost);
        assert_eq!(round.score(), 5);
        assert_eq!(round.guessed().to_string(), "ADEHILNORST");

        let round = Frequency::new().play(Round::with_secret(
            "HORSE CHESTNUT",
            Ruleset::reward_penalty(),
        )?);
        assert_eq!(round.state(), RoundState::Won);
        assert_eq!(round.misses().to_string(), "ADIL");
        assert_eq!(round.score(), 90);
        Ok(())
    }

    #[test]
    fn guesses_the_phrase_when_close() -> Result<(), TreeguessrError> {
        let source = WordSource::parse("ash\nyew tree\noak tree")?;
        let player = Frequency::new().knowing(&source).guess_word_at(3);

        let round = player.play(Round::with_secret("OAK TREE", Ruleset::default())?);
        assert_eq!(round.state(), RoundState::Won);
        assert_eq!(round.score(), 65);
        assert_eq!(round.guessed().to_string(), "AEKORT");
        assert!(round.wrong_words().is_empty());
        Ok(())
    }

    #[test]
    fn agreement() {
        let guessed = LetterSet::from_letters("TAE");
        assert!(agrees("OAK TREE", "_A_ T_EE", guessed));
        assert!(!agrees("YEW TREE", "_A_ T_EE", guessed));
        assert!(!agrees("OAKTREES", "_A_ T_EE", guessed));
        assert!(!agrees("TAK TREE", "_A_ T_EE", guessed));
        assert!(!agrees("OAK", "_A_ T_EE", guessed));
    }
}
