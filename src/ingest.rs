use crate::error::IndexError;
use crate::index::WordIndex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

/// Letters kept by normalization: ASCII lowercase plus the accented
/// characters of Portuguese-style text.
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzáàãâäéèêëíìîïóòõôöúùûüýÿçñ";

/// Lowercases a raw token and strips everything outside the alphabet.
///
/// Returns an empty string when nothing survives (pure punctuation, digits).
pub fn normalize_word(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| ALPHABET.contains(*c))
        .collect()
}

/// Statistics gathered while building an index.
#[derive(Debug, Clone, Copy)]
pub struct BuildStats {
    /// Insert calls made (every normalized token, duplicates included).
    pub total_words: u64,
    /// Wall-clock construction duration.
    pub build_time: Duration,
}

/// Builds an index from a line-oriented text source.
///
/// Lines are numbered from 1; each line is whitespace-split and every token
/// that survives normalization is inserted with its line number.
pub fn build_index<R: BufRead>(reader: R) -> Result<(WordIndex, BuildStats), IndexError> {
    let mut index = WordIndex::new();
    let mut total_words = 0u64;
    let start = Instant::now();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_number as u32 + 1;

        for token in line.split_whitespace() {
            let word = normalize_word(token);
            if !word.is_empty() {
                total_words += 1;
                index.insert(&word, line_number);
            }
        }
    }

    let stats = BuildStats {
        total_words,
        build_time: start.elapsed(),
    };

    log::debug!(
        "indexed {} words ({} distinct, {} discarded, {} rotations) in {:?}",
        stats.total_words,
        index.distinct_words(),
        index.discarded(),
        index.rotations(),
        stats.build_time,
    );

    Ok((index, stats))
}

/// Builds an index from a text file on disk.
pub fn build_index_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<(WordIndex, BuildStats), IndexError> {
    let file = File::open(path)?;
    build_index(BufReader::new(file))
}
