//! The simulation harness for comparing players and rulesets.

use std::{
    io::Write,
    ops::Deref,
    sync::{Mutex, PoisonError},
};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, Row, Table};
use indicatif::ParallelProgressIterator;
use log::debug;
use owo_colors::{OwoColorize, Stream};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

use crate::{
    perf::Perf, player::Player, HarnessError, Result, Round, Ruleset, Summary, TreeguessrError,
    WordSource,
};

/// A test harness that plays many rounds with many players.
///
/// Create one with [`new()`](Harness::new()) and configure it with the
/// builder methods, each of which consumes the harness and returns a new
/// one. Every player sees the same secrets, drawn up front from the word
/// source.
///
/// # Examples
///
/// ```rust
/// # use treeguessr::harness::Harness;
/// use treeguessr::player::{Alphabetical, Frequency};
///
/// let record = Harness::new()
///     .quiet()
///     .add_player(Box::new(Alphabetical))
///     .add_player(Box::new(Frequency::new()))
///     .rounds(50)
///     .seed(7)
///     .run()?;
///
/// assert_eq!(record.len(), 2);
/// assert!(record.iter().all(|perf| perf.num_played() == 50));
/// # Ok::<_, treeguessr::TreeguessrError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    players: Vec<Box<dyn Player>>,
    verbose: bool,
    rounds: usize,
    ruleset: Ruleset,
    source: WordSource,
    seed: Option<u64>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            players: Vec::new(),
            verbose: false,
            rounds: 100,
            ruleset: Ruleset::default(),
            source: WordSource::builtin(),
            seed: None,
        }
    }
}

impl Harness {
    /// Creates a new harness with default configuration.
    ///
    /// Defaults:
    /// 1. no players
    /// 2. quiet mode
    /// 3. 100 rounds under [`Ruleset::default()`]
    /// 4. secrets drawn from [`WordSource::builtin()`] with an unseeded rng
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a progress bar while running.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    pub fn add_player(self, player: Box<dyn Player>) -> Self {
        let mut players = self.players;
        players.push(player);
        Harness { players, ..self }
    }

    pub fn add_players(self, more: Vec<Box<dyn Player>>) -> Self {
        let mut players = self.players;
        players.extend(more);
        Harness { players, ..self }
    }

    pub fn ruleset(self, ruleset: Ruleset) -> Self {
        Harness { ruleset, ..self }
    }

    pub fn source(self, source: WordSource) -> Self {
        Harness { source, ..self }
    }

    /// Sets how many rounds each player plays.
    pub fn rounds(self, rounds: usize) -> Self {
        Harness { rounds, ..self }
    }

    /// Makes the secret draws reproducible.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            seed: Some(seed),
            ..self
        }
    }

    /// Runs the harness and produces a performance record for each player.
    ///
    /// The [`Perf`]s are in the order the players were added.
    pub fn run(&self) -> Result<Record> {
        if self.players.is_empty() {
            return Err(HarnessError::NoPlayersAdded.into());
        }
        if self.rounds == 0 {
            return Err(HarnessError::ZeroRounds.into());
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let fresh = (0..self.rounds)
            .map(|_| self.source.start_round(self.ruleset, &mut rng))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "simulating {} rounds for {} players",
            fresh.len(),
            self.players.len()
        );

        let perfs = Mutex::new(
            self.players
                .iter()
                .map(|p| Perf::new(p.as_ref(), self.ruleset))
                .collect::<Vec<_>>(),
        );

        if self.verbose {
            fresh
                .par_iter()
                .progress_count(fresh.len() as u64)
                .for_each(|round| self.run_inner(round, &perfs));
        } else {
            fresh
                .par_iter()
                .for_each(|round| self.run_inner(round, &perfs));
        }

        Ok(Record::new(
            perfs.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.ruleset,
        ))
    }

    fn run_inner(&self, round: &Round, perfs: &Mutex<Vec<Perf>>) {
        let finished: Vec<Round> = self
            .players
            .iter()
            .map(|player| player.play(round.clone()))
            .collect();

        let mut perfs = perfs.lock().unwrap_or_else(PoisonError::into_inner);
        for (perf, round) in perfs.iter_mut().zip(finished) {
            perf.rounds.push(round);
        }
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints the
    /// report.
    pub fn run_and_report(&self) -> Result<Record> {
        let record = self.run()?;
        record.print_report()?;
        Ok(record)
    }
}

/// The performance records produced by one run of the [`Harness`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    ruleset: Ruleset,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, ruleset: Ruleset) -> Self {
        Self { perfs, ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn summaries(&self) -> Vec<Summary> {
        self.perfs.iter().map(Perf::to_summary).collect()
    }

    /// Lays the summaries out as a table, best win rate highlighted.
    pub fn table(&self) -> Table {
        let summaries = self.summaries();
        let best = summaries
            .iter()
            .map(|s| s.num_won())
            .max()
            .unwrap_or_default();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "Player",
            "Played",
            "Won",
            "Win %",
            "Mean score",
            "Mean score (won)",
            "Mean letters",
        ]);

        for summary in &summaries {
            let mut row = Row::new();
            let mut name = Cell::new(summary.player_name());
            if summary.num_won() == best {
                name = name.fg(Color::Green);
            }
            row.add_cell(name);
            for value in [
                summary.num_played().to_string(),
                summary.num_won().to_string(),
                format!("{:.1}", summary.frac_won() * 100.),
                format!("{:.1}", summary.mean_score()),
                format!("{:.1}", summary.mean_score_won()),
                format!("{:.1}", summary.mean_letters()),
            ] {
                row.add_cell(Cell::new(value).set_alignment(CellAlignment::Right));
            }
            table.add_row(row);
        }

        table
    }

    /// Prints the ruleset and a table of every player's summary.
    pub fn print_report(&self) -> Result<(), TreeguessrError> {
        let mut stdout = std::io::stdout();
        writeln!(
            stdout,
            "{}",
            format!("Ruleset: {}", self.ruleset)
                .if_supports_color(Stream::Stdout, |text| text.bold())
        )?;
        writeln!(stdout, "{}", self.table())?;
        Ok(())
    }

    /// Serializes every summary as pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.summaries())
            .map_err(|e| HarnessError::from(e).into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::player::{Alphabetical, Frequency};

    #[test]
    fn refuses_to_run_empty() {
        assert!(matches!(
            Harness::new().run(),
            Err(TreeguessrError::Harness {
                kind: HarnessError::NoPlayersAdded
            })
        ));
        assert!(matches!(
            Harness::new()
                .add_player(Box::new(Alphabetical))
                .rounds(0)
                .run(),
            Err(TreeguessrError::Harness {
                kind: HarnessError::ZeroRounds
            })
        ));
    }

    #[test]
    fn every_round_finishes() -> Result<(), TreeguessrError> {
        let source = WordSource::builtin();
        for ruleset in [
            Ruleset::reward_penalty(),
            Ruleset::cost_per_guess(),
            Ruleset::cost_per_guess_strict(),
        ] {
            let record = Harness::new()
                .add_player(Box::new(Alphabetical))
                .add_player(Box::new(Frequency::new().knowing(&source).guess_word_at(2)))
                .ruleset(ruleset)
                .rounds(40)
                .seed(3)
                .run()?;

            assert_eq!(record.len(), 2);
            assert_eq!(record[0].player_name(), "Alphabetical v0.1.0");
            for perf in record.iter() {
                assert_eq!(perf.num_played(), 40);
                assert!(perf.rounds().iter().all(Round::is_over));
                assert!(perf.rounds().iter().all(|r| r.ruleset() == &ruleset));
            }
        }
        Ok(())
    }

    #[test]
    fn players_keep_their_order() -> Result<(), TreeguessrError> {
        let players: Vec<Box<dyn Player>> = vec![
            Box::new(Frequency::new()),
            Box::new(Alphabetical),
        ];
        let record = Harness::new()
            .add_player(Box::new(Alphabetical))
            .add_players(players)
            .rounds(3)
            .seed(5)
            .run()?;

        let names: Vec<_> = record.iter().map(|perf| perf.player_name()).collect();
        assert_eq!(
            names,
            ["Alphabetical v0.1.0", "Frequency v0.2.0", "Alphabetical v0.1.0"]
        );
        Ok(())
    }

    #[test]
    fn seeded_runs_agree() -> Result<(), TreeguessrError> {
        let harness = Harness::new()
            .add_player(Box::new(Frequency::new()))
            .rounds(30)
            .seed(99);

        let first = harness.run()?;
        let second = harness.run()?;
        assert_eq!(first.summaries(), second.summaries());
        Ok(())
    }

    #[test]
    fn single_phrase_source() -> Result<(), TreeguessrError> {
        let record = Harness::new()
            .add_player(Box::new(Alphabetical))
            .source(WordSource::parse("beech")?)
            .rounds(10)
            .run()?;

        let summary = &record.summaries()[0];
        assert_eq!(summary.num_won(), 10);
        assert_eq!(summary.mean_score(), 40.);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_report() -> Result<(), TreeguessrError> {
        let record = Harness::new()
            .add_player(Box::new(Alphabetical))
            .rounds(5)
            .seed(1)
            .run()?;

        let json = record.to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json).map_err(HarnessError::from)?;
        assert_eq!(value[0]["player_name"], "Alphabetical v0.1.0");
        assert_eq!(value[0]["num_played"], 5);
        Ok(())
    }
}
