use thiserror::Error;

/// Ways a textual cell address can fail to parse.
///
/// The address grammar is a run of ASCII letters followed by a run of
/// digits (`A1`, `AA12`). Anything else is rejected here rather than
/// silently mapped onto a valid-looking coordinate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("no row letters in '{0}'")]
    MissingLetters(String),

    #[error("no column digits in '{0}'")]
    MissingDigits(String),

    #[error("letters must precede digits in '{0}'")]
    LettersAfterDigits(String),

    #[error("invalid column digits in '{0}'")]
    InvalidDigits(String),
}
