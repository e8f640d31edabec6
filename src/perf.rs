//! Evaluating and comparing players under a ruleset.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{player::Player, Round, Ruleset};

/// A record of one player's finished rounds after a run of the
/// [simulation harness](crate::harness).
///
/// This struct can provide statistics on its own, but it is recommended to
/// produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Perf {
    pub(crate) rounds: Vec<Round>,
    player_name: String,
    ruleset: Ruleset,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(player: &dyn Player, ruleset: Ruleset) -> Self {
        Perf {
            rounds: Vec::new(),
            player_name: format!("{} v{}", player, player.version()),
            ruleset,
        }
    }

    /// Gets the name of the player that produced this record.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The finished rounds, in no particular order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn num_played(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn num_won(&self) -> u32 {
        self.rounds.iter().filter(|r| r.is_won()).count() as u32
    }

    /// Gets the number of rounds the player lost.
    ///
    /// Players always finish their rounds, so this is every round not won.
    pub fn num_lost(&self) -> u32 {
        self.num_played() - self.num_won()
    }

    /// Sum of final scores across all rounds, won or lost.
    pub fn cumulative_score(&self) -> i64 {
        self.rounds.iter().map(|r| i64::from(r.score())).sum()
    }

    /// Sum of final scores across won rounds.
    pub fn cumulative_score_won(&self) -> i64 {
        self.rounds
            .iter()
            .filter(|r| r.is_won())
            .map(|r| i64::from(r.score()))
            .sum()
    }

    /// Sum of letters guessed across all rounds.
    pub fn cumulative_letters(&self) -> u32 {
        self.rounds.iter().map(|r| r.guessed().len() as u32).sum()
    }

    /// Sum of wrong whole-phrase guesses across all rounds.
    pub fn cumulative_wrong_words(&self) -> u32 {
        self.rounds.iter().map(|r| r.wrong_words().len() as u32).sum()
    }

    /// Converts this record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        Summary {
            player_name: &self.player_name,
            num_played: self.num_played(),
            num_won: self.num_won(),
            cumulative_score: self.cumulative_score(),
            cumulative_score_won: self.cumulative_score_won(),
            cumulative_letters: self.cumulative_letters(),
            cumulative_wrong_words: self.cumulative_wrong_words(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of a player's performance generated by the
/// [simulation harness](crate::harness).
///
/// The averages all return `0.0` when there is nothing to average over.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Summary<'a> {
    player_name: &'a str,
    num_played: u32,
    num_won: u32,
    cumulative_score: i64,
    cumulative_score_won: i64,
    cumulative_letters: u32,
    cumulative_wrong_words: u32,
}

fn ratio(num: f64, den: u32) -> f32 {
    if den == 0 {
        0.
    } else {
        (num / f64::from(den)) as f32
    }
}

impl<'a> Summary<'a> {
    pub fn player_name(&self) -> &'a str {
        self.player_name
    }

    pub fn num_played(&self) -> u32 {
        self.num_played
    }

    pub fn num_won(&self) -> u32 {
        self.num_won
    }

    /// Gets the number of rounds lost.
    ///
    /// This is always at most [`num_played()`](Summary::num_played()).
    pub fn num_lost(&self) -> u32 {
        self.num_played - self.num_won
    }

    pub fn frac_won(&self) -> f32 {
        ratio(f64::from(self.num_won), self.num_played)
    }

    /// Mean final score over every round.
    pub fn mean_score(&self) -> f32 {
        ratio(self.cumulative_score as f64, self.num_played)
    }

    /// Mean final score over won rounds only.
    pub fn mean_score_won(&self) -> f32 {
        ratio(self.cumulative_score_won as f64, self.num_won)
    }

    pub fn mean_letters(&self) -> f32 {
        ratio(f64::from(self.cumulative_letters), self.num_played)
    }

    pub fn mean_wrong_words(&self) -> f32 {
        ratio(f64::from(self.cumulative_wrong_words), self.num_played)
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.player_name)?;
        writeln!(f, "Played {} rounds", self.num_played())?;

        writeln!(
            f,
            "Won {}, or {:.1}%, and lost {}",
            self.num_won(),
            self.frac_won() * 100.,
            self.num_lost()
        )?;

        writeln!(
            f,
            "Final score averaged {:.1} ({:.1} in won rounds) after {:.1} letters",
            self.mean_score(),
            self.mean_score_won(),
            self.mean_letters()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{player::Alphabetical, TreeguessrError};

    #[test]
    fn summary_matches_rounds() -> Result<(), TreeguessrError> {
        let ruleset = Ruleset::cost_per_guess();
        let mut perf = Perf::new(&Alphabetical, ruleset);
        assert_eq!(perf.player_name(), "Alphabetical v0.1.0");

        let empty = perf.to_summary();
        assert_eq!(empty.frac_won(), 0.);
        assert_eq!(empty.mean_score(), 0.);

        // won with 40
        perf.rounds.push(Alphabetical.play(Round::with_secret("BEECH", ruleset)?));
        // lost at the floor
        perf.rounds.push(Alphabetical.play(Round::with_secret("YEW", ruleset)?));

        let summary = perf.to_summary();
        assert_eq!(summary.num_played(), 2);
        assert_eq!(summary.num_won(), 1);
        assert_eq!(summary.num_lost(), 1);
        assert_eq!(summary.frac_won(), 0.5);
        assert_eq!(summary.mean_score(), 22.5);
        assert_eq!(summary.mean_score_won(), 40.);
        assert_eq!(summary.mean_wrong_words(), 0.);
        assert!(summary.to_string().contains("Won 1, or 50.0%, and lost 1"));
        Ok(())
    }
}
