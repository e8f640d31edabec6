use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use treeguessr::Variant;

#[derive(Debug, Parser)]
#[command(name = "treeguessr")]
#[command(about = "🌳 Guess the tree, one letter at a time")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default `play` command
    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play rounds in the terminal (the default)
    Play(PlayArgs),

    /// Play many rounds with automated players and report how they did
    Simulate(SimulateArgs),

    /// List the available rulesets
    Rulesets,
}

/// Settings shared by every command that plays rounds.
#[derive(Debug, Args)]
pub struct GameArgs {
    /// Word list to draw secrets from, one phrase per line
    #[arg(short, long, env = "TREEGUESSR_WORDS")]
    pub words: Option<PathBuf>,

    /// Scoring rules: reward, cost or strict
    #[arg(short, long, default_value_t = Variant::CostPerGuess)]
    pub ruleset: Variant,

    /// Seed for reproducible secrets
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Rounds each player plays
    #[arg(short = 'n', long, default_value_t = 500)]
    pub rounds: usize,

    /// Also write the summaries as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_play() {
        let cli = Cli::try_parse_from(["treeguessr", "--ruleset", "strict", "--seed", "4"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.play.game.ruleset, Variant::CostPerGuessStrict);
        assert_eq!(cli.play.game.seed, Some(4));
    }

    #[test]
    fn simulate_options() {
        let cli = Cli::try_parse_from(["treeguessr", "simulate", "-n", "20", "--quiet", "-r", "reward"])
            .unwrap();
        match cli.command {
            Some(Commands::Simulate(args)) => {
                assert_eq!(args.rounds, 20);
                assert!(args.quiet);
                assert_eq!(args.game.ruleset, Variant::RewardPenalty);
                assert!(args.json.is_none());
            }
            other => panic!("expected simulate, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_ruleset() {
        assert!(Cli::try_parse_from(["treeguessr", "--ruleset", "hangman"]).is_err());
    }
}
