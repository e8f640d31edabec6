//! The list of candidate phrases that secrets are drawn from.

use std::{fs, ops::Deref, path::Path};

use itertools::Itertools;
use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use crate::{Result, Round, Ruleset, SourceError};

/// The tree list bundled with the crate, one phrase per line.
pub const BUILTIN: &str = include_str!("trees.txt");

/// Trims, uppercases and collapses runs of whitespace to a single space.
pub(crate) fn normalize_phrase(raw: &str) -> String {
    raw.split_whitespace().map(str::to_ascii_uppercase).join(" ")
}

/// A normalized phrase can be played if it has at least one letter and
/// nothing but letters and spaces.
pub(crate) fn is_playable(phrase: &str) -> bool {
    phrase.chars().any(|c| c.is_ascii_uppercase())
        && phrase.chars().all(|c| c == ' ' || c.is_ascii_uppercase())
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| {
            let phrase = normalize_phrase(line);
            if is_playable(&phrase) {
                Some(phrase)
            } else {
                warn!("skipping word list line {}: {:?} is not letters and spaces", i + 1, line);
                None
            }
        })
        .collect()
}

/// An ordered collection of candidate secrets.
///
/// Each non-blank line of the source text is one phrase. Lines are trimmed
/// and uppercased, and runs of interior whitespace become a single space.
/// Lines containing anything besides letters and spaces are skipped, since
/// no sequence of letter guesses could ever reveal them.
///
/// # Examples
///
/// ```rust
/// use treeguessr::WordSource;
///
/// let source = WordSource::parse("oak\n\n  silver   birch \nrowan-tree\n")?;
/// assert_eq!(source.phrases(), ["OAK", "SILVER BIRCH"]);
///
/// assert!(WordSource::parse("\n  \n").is_err());
/// # Ok::<_, treeguessr::TreeguessrError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordSource {
    phrases: Vec<String>,
}

impl WordSource {
    /// Parses newline-delimited text.
    ///
    /// Returns [`SourceError::Empty`] when no usable phrase remains.
    pub fn parse(text: &str) -> Result<Self> {
        let phrases = parse_lines(text);
        if phrases.is_empty() {
            return Err(SourceError::Empty.into());
        }
        Ok(WordSource { phrases })
    }

    /// Reads and parses a word list file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SourceError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let source = Self::parse(&text)?;
        debug!("loaded {} phrases from {}", source.len(), path.display());
        Ok(source)
    }

    /// The tree list that ships with the crate.
    pub fn builtin() -> Self {
        WordSource {
            phrases: parse_lines(BUILTIN),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Draws one phrase uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.phrases.choose(rng).map(String::as_str)
    }

    /// Starts a new [`Round`] with a secret drawn from this source.
    pub fn start_round<R: Rng + ?Sized>(&self, ruleset: Ruleset, rng: &mut R) -> Result<Round> {
        Round::start(&self.phrases, ruleset, rng)
    }
}

impl Deref for WordSource {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.phrases
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::TreeguessrError;

    #[test]
    fn normalizes_phrases() {
        assert_eq!(normalize_phrase("  douglas\t fir  "), "DOUGLAS FIR");
        assert_eq!(normalize_phrase(""), "");
        assert!(is_playable("DOUGLAS FIR"));
        assert!(!is_playable(""));
        assert!(!is_playable(" "));
        assert!(!is_playable("HORSE-CHESTNUT"));
        assert!(!is_playable("ÉRABLE"));
    }

    #[test]
    fn builtin_list_is_usable() {
        let source = WordSource::builtin();
        assert!(source.len() > 20);
        assert_eq!(source.phrases(), parse_lines(BUILTIN).as_slice());
        assert!(source.iter().all(|p| is_playable(p)));
        assert!(source.iter().any(|p| p.contains(' ')));
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(matches!(
            WordSource::parse(" \n\t\n"),
            Err(TreeguessrError::Source {
                kind: SourceError::Empty
            })
        ));
        assert!(matches!(
            WordSource::parse("1234\n#!"),
            Err(TreeguessrError::Source {
                kind: SourceError::Empty
            })
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = std::env::temp_dir().join("treeguessr-this-file-does-not-exist.txt");
        assert!(matches!(
            WordSource::load(&path),
            Err(TreeguessrError::Source {
                kind: SourceError::Unreadable { .. }
            })
        ));
    }

    #[test]
    fn loads_from_file() -> Result<(), TreeguessrError> {
        let path = std::env::temp_dir().join(format!("treeguessr-trees-{}.txt", std::process::id()));
        {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "hornbeam\r\n\r\nsweet chestnut")?;
        }
        let source = WordSource::load(&path)?;
        fs::remove_file(&path)?;

        assert_eq!(source.phrases(), ["HORNBEAM", "SWEET CHESTNUT"]);
        Ok(())
    }

    #[test]
    fn draws_cover_the_list() -> Result<(), TreeguessrError> {
        let source = WordSource::parse("ash\nelm\nyew")?;
        let mut rng = StdRng::seed_from_u64(11);

        let mut seen: Vec<&str> = (0..200).filter_map(|_| source.choose(&mut rng)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, ["ASH", "ELM", "YEW"]);

        let round = source.start_round(Ruleset::default(), &mut rng)?;
        assert!(source.contains(&round.secret().to_string()));
        Ok(())
    }
}
