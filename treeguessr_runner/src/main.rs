use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use owo_colors::{OwoColorize, Stream};
use treeguessr::{
    player::{Alphabetical, Frequency, Player},
    Harness, Session, Variant, WordSource,
};

mod cli;
mod view;

use cli::{Cli, Commands, GameArgs, SimulateArgs};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Play(args)) => play(args.game),
        Some(Commands::Simulate(args)) => simulate(args),
        Some(Commands::Rulesets) => list_rulesets(),
        None => play(cli.play.game),
    }
}

fn play(args: GameArgs) -> Result<()> {
    let ruleset = args.ruleset.ruleset();
    let mut session = match args.seed {
        Some(seed) => Session::seeded(ruleset, seed),
        None => Session::new(ruleset),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.words {
        Some(path) => {
            if let Err(e) = session.load(path) {
                writeln!(out, "{:#}", anyhow::Error::new(e))?;
            }
        }
        None => session = session.with_source(WordSource::builtin()),
    }

    let stdin = io::stdin();
    view::run(&mut session, args.words.as_deref(), stdin.lock(), &mut out)
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let source = match &args.game.words {
        Some(path) => WordSource::load(path)?,
        None => WordSource::builtin(),
    };
    info!("simulating with {} phrases", source.len());

    let players: Vec<Box<dyn Player>> = vec![
        Box::new(Alphabetical),
        Box::new(Frequency::new()),
        Box::new(Frequency::new().knowing(&source).guess_word_at(2)),
    ];
    let mut harness = Harness::new()
        .ruleset(args.game.ruleset.ruleset())
        .rounds(args.rounds)
        .add_players(players)
        .source(source);
    if let Some(seed) = args.game.seed {
        harness = harness.seed(seed);
    }
    harness = if args.quiet {
        harness.quiet()
    } else {
        harness.verbose()
    };

    let record = harness.run_and_report()?;
    if let Some(path) = &args.json {
        fs::write(path, record.to_json()?)
            .with_context(|| format!("could not write the report to {}", path.display()))?;
        info!("wrote the report to {}", path.display());
    }

    Ok(())
}

fn list_rulesets() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for variant in Variant::ALL {
        let marker = if variant == Variant::default() {
            " (default)"
        } else {
            ""
        };
        writeln!(
            out,
            "{}{}",
            variant
                .name()
                .if_supports_color(Stream::Stdout, |text| text.bold()),
            marker
        )?;
        writeln!(out, "    {}", variant.ruleset())?;
    }
    Ok(())
}
