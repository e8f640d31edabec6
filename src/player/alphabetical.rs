//! A single bad player to show how they are written.

use std::fmt::Display;

use crate::{player::Player, Round};

/// A player that guesses `A`, `B`, `C` and so on until the round ends.
///
/// Useful as a floor to compare real players against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alphabetical;

impl Player for Alphabetical {
    fn play(&self, mut round: Round) -> Round {
        for letter in 'A'..='Z' {
            if round.is_over() {
                break;
            }
            round = round.guess_letter(letter);
        }

        round
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Alphabetical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alphabetical")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{RoundState, Ruleset, TreeguessrError};

    #[test]
    fn always_finishes() -> Result<(), TreeguessrError> {
        let round = Alphabetical.play(Round::with_secret("ZELKOVA", Ruleset::reward_penalty())?);
        assert!(round.is_over());

        let round = Alphabetical.play(Round::with_secret("BEECH", Ruleset::cost_per_guess())?);
        assert_eq!(round.state(), RoundState::Won);
        assert_eq!(round.guessed().to_string(), "ABCDEFGH");
        assert_eq!(round.score(), 40);
        Ok(())
    }
}
