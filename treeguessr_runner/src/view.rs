//! Terminal rendering and input handling for an interactive session.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::Result;
use log::debug;
use owo_colors::{OwoColorize, Stream};
use treeguessr::{InputMode, Intent, Round, RoundState, Session};

/// One line of player input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Intent),
    NewRound,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

/// Interprets a line of input. Blank lines mean nothing.
///
/// Lines starting with `:` are commands. Anything else is a guess, read as
/// a single letter or a whole phrase depending on `mode`.
pub fn parse_input(line: &str, mode: InputMode) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(command) = line.strip_prefix(':') {
        return Some(match command.trim().to_ascii_lowercase().as_str() {
            "word" | "w" => Command::Play(Intent::SwitchMode(InputMode::WordEntry)),
            "letters" | "letter" | "l" => Command::Play(Intent::SwitchMode(InputMode::LetterEntry)),
            "new" | "n" => Command::NewRound,
            "reload" | "r" => Command::Reload,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        });
    }

    Some(match mode {
        InputMode::WordEntry => Command::Play(Intent::GuessWord(line.to_string())),
        InputMode::LetterEntry => {
            let mut chars = line.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Command::Play(Intent::GuessLetter(c)),
                _ => Command::Unknown(line.to_string()),
            }
        }
    })
}

fn spaced(text: &str) -> String {
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draws the round: the phrase, the score, the misses and any end-of-round
/// message.
pub fn render<W: Write>(round: &Round, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        spaced(&round.to_string()).if_supports_color(Stream::Stdout, |text| text.bold())
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}    Phrase guesses left: {}",
        round.score(),
        round.attempts_remaining()
    )?;

    let hits = round.hits();
    if !hits.is_empty() {
        writeln!(
            out,
            "Found: {}",
            spaced(&hits.to_string()).if_supports_color(Stream::Stdout, |text| text.green())
        )?;
    }

    let misses = round.misses();
    if !misses.is_empty() {
        writeln!(
            out,
            "Not in it: {}",
            spaced(&misses.to_string()).if_supports_color(Stream::Stdout, |text| text.red())
        )?;
    }
    if !round.wrong_words().is_empty() {
        writeln!(
            out,
            "Wrong phrases: {}",
            round
                .wrong_words()
                .join(", ")
                .if_supports_color(Stream::Stdout, |text| text.red())
        )?;
    }

    match round.state() {
        RoundState::Playing => match round.mode() {
            InputMode::LetterEntry => {
                writeln!(out, "Guess a letter, or type :word to guess the whole phrase.")?
            }
            InputMode::WordEntry => {
                writeln!(out, "Guess the phrase, or type :letters to go back to letters.")?
            }
        },
        RoundState::Won => writeln!(
            out,
            "{}",
            round
                .message()
                .if_supports_color(Stream::Stdout, |text| text.green())
        )?,
        RoundState::Lost => writeln!(
            out,
            "{}",
            round
                .message()
                .if_supports_color(Stream::Stdout, |text| text.red())
        )?,
    }
    if round.is_over() {
        writeln!(out, "Type :new for another tree or :quit to stop.")?;
    }

    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  :word     guess the whole phrase")?;
    writeln!(out, "  :letters  guess single letters")?;
    writeln!(out, "  :new      start over with a new tree")?;
    writeln!(out, "  :reload   read the word list again")?;
    writeln!(out, "  :quit     stop playing")
}

/// Drives `session` from `input` until it runs out or the player quits.
///
/// `words` is the word list path to re-read on `:reload`, if the session
/// was loaded from one.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    words: Option<&Path>,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "🌳 Treeguessr ({})", session.ruleset())?;
    if let Some(source) = session.source() {
        writeln!(out, "Trees to find: {}", source.len())?;
    }
    if session.has_source() {
        session.new_round()?;
    } else {
        writeln!(out, "No word list is loaded. Fix it and type :reload.")?;
    }
    if let Some(round) = session.round() {
        render(round, out)?;
    }

    for line in input.lines() {
        let line = line?;
        let mode = session.round().map(Round::mode).unwrap_or_default();
        let command = match parse_input(&line, mode) {
            Some(command) => command,
            None => continue,
        };
        debug!("input {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                print_help(out)?;
                continue;
            }
            Command::Unknown(text) => {
                writeln!(out, "Not sure what to do with {:?}. Type :help for commands.", text)?;
                continue;
            }
            Command::Reload => match words {
                Some(path) => {
                    if let Err(e) = session.load(path) {
                        writeln!(out, "{:#}", anyhow::Error::new(e))?;
                        continue;
                    }
                    session.new_round()?;
                }
                None => {
                    writeln!(out, "Playing with the built-in list, nothing to reload.")?;
                    continue;
                }
            },
            Command::NewRound => {
                if let Err(e) = session.new_round() {
                    writeln!(out, "{:#}", anyhow::Error::new(e))?;
                    continue;
                }
            }
            Command::Play(intent) => {
                if session.dispatch(&intent).is_none() {
                    writeln!(out, "No round in progress. Type :reload once the word list is fixed.")?;
                    continue;
                }
            }
        }

        if let Some(round) = session.round() {
            render(round, out)?;
        }
    }

    let played = session.history().len() + usize::from(session.round().is_some());
    writeln!(
        out,
        "Thanks for playing! You won {} of {} rounds.",
        session.wins(),
        played
    )?;
    Ok(())
}
