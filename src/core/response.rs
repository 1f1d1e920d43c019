//! Wordle feedback evaluation and representation
//!
//! A response classifies every guessed letter as:
//! - 0 = Wrong (letter not in word, or already fully credited)
//! - 1 = Misplaced (letter in word, wrong position)
//! - 2 = Correct (letter in correct position)
//!
//! Responses convert to a single integer code in `[0, 3^k)` where position `i`
//! contributes `digit × 3^i`, and to strings through a configurable
//! three-symbol table (default `"0"`, `"1"`, `"2"`).

use super::word::MAX_WORD_LENGTH;
use super::{SolverError, Word};
use std::fmt;

/// Integer form of a response
pub type ResponseCode = u16;

/// Feedback for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    Wrong = 0,
    Misplaced = 1,
    Correct = 2,
}

impl Feedback {
    /// Base-3 digit of this feedback
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    #[inline]
    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Misplaced,
            _ => Self::Wrong,
        }
    }
}

/// Ordered per-position feedback for one guess
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Response(Vec<Feedback>);

impl Response {
    #[must_use]
    pub const fn new(feedback: Vec<Feedback>) -> Self {
        Self(feedback)
    }

    /// The all-correct response of the given length
    #[must_use]
    pub fn win(length: usize) -> Self {
        Self(vec![Feedback::Correct; length])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.0
    }

    /// Check if every position is correct
    #[must_use]
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&f| f == Feedback::Correct)
    }

    /// Count positions with the given feedback
    #[must_use]
    pub fn count(&self, feedback: Feedback) -> usize {
        self.0.iter().filter(|&&f| f == feedback).count()
    }

    /// Encode as a base-3 number, position 0 being the least significant digit
    #[must_use]
    pub fn code(&self) -> ResponseCode {
        self.0
            .iter()
            .rev()
            .fold(0, |code, &f| code * 3 + ResponseCode::from(f.digit()))
    }

    /// Decode a base-3 code into a response of `length` positions
    ///
    /// # Errors
    /// Returns `SolverError::CodeOutOfRange` if `code >= 3^length`, or
    /// `SolverError::UnsupportedLength` for an unusable length.
    pub fn from_code(code: ResponseCode, length: usize) -> Result<Self, SolverError> {
        if length == 0 || length > MAX_WORD_LENGTH {
            return Err(SolverError::UnsupportedLength(length));
        }
        if u32::from(code) >= 3u32.pow(length as u32) {
            return Err(SolverError::CodeOutOfRange(u32::from(code)));
        }

        let mut value = code;
        let feedback = (0..length)
            .map(|_| {
                let digit = (value % 3) as u8;
                value /= 3;
                Feedback::from_digit(digit)
            })
            .collect();

        Ok(Self(feedback))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feedback in &self.0 {
            write!(f, "{}", feedback.digit())?;
        }
        Ok(())
    }
}

/// Compute feedback digits for `guess` against `target` into `out`
///
/// Exact matches are credited first and consume the target's letter budget;
/// misplaced letters are then credited left to right from what remains.
fn fill_digits(guess: &Word, target: &Word, out: &mut [u8]) {
    let mut available = target.char_counts();
    let (guess, target) = (guess.chars(), target.chars());

    // First pass: exact position matches
    for (i, (&g, &t)) in guess.iter().zip(target).enumerate() {
        if g == t {
            out[i] = Feedback::Correct.digit();
            available[usize::from(g - b'a')] -= 1;
        } else {
            out[i] = Feedback::Wrong.digit();
        }
    }

    // Second pass: present but misplaced, bounded by the remaining count
    for (i, (&g, &t)) in guess.iter().zip(target).enumerate() {
        if g != t {
            let remaining = &mut available[usize::from(g - b'a')];
            if *remaining > 0 {
                out[i] = Feedback::Misplaced.digit();
                *remaining -= 1;
            }
        }
    }
}

/// The feedback model for a session: fixed word length plus the symbol table
///
/// # Examples
/// ```
/// use wordle_infogain::core::{ResponseModel, Word};
///
/// let model = ResponseModel::new(5).unwrap();
/// let guess = Word::new("robot").unwrap();
/// let target = Word::new("coach").unwrap();
///
/// let response = model.evaluate(&guess, &target).unwrap();
/// assert_eq!(model.render(&response), "02000");
/// assert_eq!(model.decode(model.encode(&response)).unwrap(), response);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseModel {
    length: usize,
    symbols: [char; 3],
}

impl ResponseModel {
    /// Default symbols for wrong, misplaced and correct letters
    pub const DEFAULT_SYMBOLS: [char; 3] = ['0', '1', '2'];

    /// Create a model for `length`-letter words with the default symbols
    ///
    /// # Errors
    /// Returns `SolverError::UnsupportedLength` if `length` is 0 or above the maximum.
    pub fn new(length: usize) -> Result<Self, SolverError> {
        Self::with_symbols(length, Self::DEFAULT_SYMBOLS)
    }

    /// Create a model with a custom symbol table `[wrong, misplaced, correct]`
    ///
    /// # Errors
    /// Returns an error for an unsupported length or non-distinct symbols.
    pub fn with_symbols(length: usize, symbols: [char; 3]) -> Result<Self, SolverError> {
        if length == 0 || length > MAX_WORD_LENGTH {
            return Err(SolverError::UnsupportedLength(length));
        }
        if symbols[0] == symbols[1] || symbols[1] == symbols[2] || symbols[0] == symbols[2] {
            return Err(SolverError::InvalidSymbols(symbols.iter().collect()));
        }
        Ok(Self { length, symbols })
    }

    /// Parse a symbol table written as three characters, e.g. `"012"` or `"-YG"`
    ///
    /// # Errors
    /// Returns `SolverError::InvalidSymbols` unless the text has exactly three characters.
    pub fn parse_symbols(text: &str) -> Result<[char; 3], SolverError> {
        let chars: Vec<char> = text.chars().collect();
        <[char; 3]>::try_from(chars).map_err(|_| SolverError::InvalidSymbols(text.to_string()))
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub const fn symbols(&self) -> [char; 3] {
        self.symbols
    }

    /// Number of distinct response codes (`3^k`)
    #[must_use]
    pub fn response_count(&self) -> usize {
        3usize.pow(self.length as u32)
    }

    /// Code of the all-correct response
    #[must_use]
    pub fn win_code(&self) -> ResponseCode {
        (self.response_count() - 1) as ResponseCode
    }

    /// Evaluate `guess` against `target`
    ///
    /// Duplicate letters in the guess are credited at most as many times as they
    /// occur in the target, exact matches first.
    ///
    /// # Errors
    /// Returns `SolverError::LengthMismatch` if the words differ in length.
    pub fn evaluate(&self, guess: &Word, target: &Word) -> Result<Response, SolverError> {
        check_lengths(guess, target)?;
        let mut digits = [0u8; MAX_WORD_LENGTH];
        let digits = &mut digits[..guess.len()];
        fill_digits(guess, target, digits);
        Ok(Response(
            digits.iter().map(|&d| Feedback::from_digit(d)).collect(),
        ))
    }

    /// Evaluate straight to the integer code without allocating
    ///
    /// # Errors
    /// Returns `SolverError::LengthMismatch` if the words differ in length.
    pub fn evaluate_code(&self, guess: &Word, target: &Word) -> Result<ResponseCode, SolverError> {
        check_lengths(guess, target)?;
        let mut digits = [0u8; MAX_WORD_LENGTH];
        let digits = &mut digits[..guess.len()];
        fill_digits(guess, target, digits);
        Ok(digits
            .iter()
            .rev()
            .fold(0, |code, &d| code * 3 + ResponseCode::from(d)))
    }

    /// Integer code of a response
    #[must_use]
    pub fn encode(&self, response: &Response) -> ResponseCode {
        response.code()
    }

    /// Response of an integer code
    ///
    /// # Errors
    /// Returns `SolverError::CodeOutOfRange` if `code >= 3^k`.
    pub fn decode(&self, code: ResponseCode) -> Result<Response, SolverError> {
        Response::from_code(code, self.length)
    }

    /// Render a response through the symbol table
    #[must_use]
    pub fn render(&self, response: &Response) -> String {
        response
            .feedback()
            .iter()
            .map(|&f| self.symbols[usize::from(f.digit())])
            .collect()
    }

    /// Render a code through the symbol table
    ///
    /// # Errors
    /// Returns `SolverError::CodeOutOfRange` if `code >= 3^k`.
    pub fn render_code(&self, code: ResponseCode) -> Result<String, SolverError> {
        Ok(self.render(&self.decode(code)?))
    }

    /// Parse a response string written with the symbol table
    ///
    /// # Errors
    /// Returns `SolverError::InvalidResponseFormat` for a wrong length and
    /// `SolverError::UnknownResponseSymbol` for a symbol outside the table.
    pub fn parse(&self, text: &str) -> Result<Response, SolverError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != self.length {
            return Err(SolverError::InvalidResponseFormat(text.to_string()));
        }

        chars
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                self.symbols
                    .iter()
                    .position(|&s| s == symbol)
                    .map(|digit| Feedback::from_digit(digit as u8))
                    .ok_or(SolverError::UnknownResponseSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Response)
    }

    /// Check that a response string has length k and only known symbols
    #[must_use]
    pub fn validate(&self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    /// Check if a response is the all-correct response for this length
    #[must_use]
    pub fn is_win(&self, response: &Response) -> bool {
        response.len() == self.length && response.is_win()
    }

    /// Human-readable description of the symbol table
    #[must_use]
    pub fn describe(&self) -> String {
        [
            format!("A {}-character response with the format:", self.length),
            format!("- \"{}\": wrong letter", self.symbols[0]),
            format!("- \"{}\": correct letter but wrong position", self.symbols[1]),
            format!("- \"{}\": correct letter and correct position", self.symbols[2]),
        ]
        .join("\n")
    }
}

fn check_lengths(guess: &Word, target: &Word) -> Result<(), SolverError> {
    if guess.len() == target.len() {
        Ok(())
    } else {
        Err(SolverError::LengthMismatch {
            guess: guess.len(),
            target: target.len(),
        })
    }
}
