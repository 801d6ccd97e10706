//! Crate-level error types.

use std::fmt;

/// Errors produced by the dollycam crate.
///
/// The camera core itself never fails; only loading configuration can.
#[derive(Debug)]
pub enum DollyError {
    /// Generic I/O failure while reading an options file.
    Io(std::io::Error),
    /// TOML options parsing failure.
    OptionsParse(String),
    /// An option update named a section or field that does not exist, or
    /// carried a value of the wrong type.
    InvalidOption(String),
}

impl fmt::Display for DollyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
        }
    }
}

impl std::error::Error for DollyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::InvalidOption(_) => None,
        }
    }
}

impl From<std::io::Error> for DollyError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
