use crate::errors::AddressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALPHABET_LEN: u32 = 26;

/// A zero-based cell coordinate.
///
/// The textual form is a letter run followed by a digit run (`A1`,
/// `AA12`). The letters decode to the row as a bijective base-26
/// numeral (A=0, Z=25, AA=26), the digits to the column (1-based in
/// text, zero-based here). Note the orientation: letters select the
/// row, digits the column. Sheet-qualified references (`Sheet1!A1`)
/// are not accepted; qualifiers are stripped by the formula scanner
/// before addresses reach this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a textual reference into a coordinate.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let split_idx = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (letters, digits) = text.split_at(split_idx);

        if letters.is_empty() {
            if text.contains(|c: char| c.is_ascii_alphabetic()) {
                return Err(AddressError::LettersAfterDigits(text.to_string()));
            }
            return Err(AddressError::MissingLetters(text.to_string()));
        }
        if digits.is_empty() {
            return Err(AddressError::MissingDigits(text.to_string()));
        }

        let row = row_from_letters(letters);
        let col = u32::from_str(digits)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| AddressError::InvalidDigits(text.to_string()))?
            - 1;

        Ok(Self { row, col })
    }
}

fn row_from_letters(letters: &str) -> u32 {
    let mut value = 0u32;
    for c in letters.chars() {
        value = value * ALPHABET_LEN + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    value - 1
}

fn letters_from_row(row: u32) -> String {
    let mut n = row + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % ALPHABET_LEN;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / ALPHABET_LEN;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", letters_from_row(self.row), self.col + 1)
    }
}

impl FromStr for CellAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
