//! Word list loading utilities
//!
//! Lists are plain text, one word per line. Blank lines and entries that are
//! not words are skipped.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file
///
/// Returns a vector of valid Word instances, skipping any invalid entries.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_infogain::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/small.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let words = parse_words(&fs::read_to_string(path)?);
    log::info!("{:<32}{} words from {}", "loaded word list", words.len(), path.display());
    Ok(words)
}

/// Parse one word per line
///
/// # Examples
/// ```
/// use wordle_infogain::wordlists::loader::parse_words;
///
/// let words = parse_words("crane\n\n  Slate \nno way\n");
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[1].text(), "slate");
/// ```
#[must_use]
pub fn parse_words(content: &str) -> Vec<Word> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| Word::new(line).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_words_skips_invalid_lines() {
        let words = parse_words("crane\n\n  \no'clock\nslate\n");

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "crane");
        assert_eq!(words[1].text(), "slate");
    }

    #[test]
    fn parse_words_keeps_every_length() {
        let words = parse_words("cat\ncrane\r\nexample\n");
        let lengths: Vec<usize> = words.iter().map(Word::len).collect();
        assert_eq!(lengths, [3, 5, 7]);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("wordle_infogain_no_such_list.txt");
        assert!(load_from_file(path).is_err());
    }

    #[test]
    fn load_from_file_reads_lines() {
        let path = std::env::temp_dir().join(format!(
            "wordle_infogain_loader_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "crane\nslate\n\nirate\n").unwrap();

        let words = load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(words.len(), 3);
    }
}
