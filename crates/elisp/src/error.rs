//! Conversion errors.

use std::fmt::Display;

use thiserror::Error;

/// Broad category of an [`ElispError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value's type is outside the accepted domain.
    Type,
    /// The type is accepted but this particular value is not.
    Value,
}

/// Errors that can occur while converting host values to Elisp.
#[derive(Debug, Error)]
pub enum ElispError {
    #[error("cannot convert value of type {0} to Elisp")]
    UnsupportedType(String),

    #[error("integer {0} is out of range for an Elisp literal")]
    IntegerOutOfRange(u128),

    #[error("invalid value for dict_format: {0:?} (expected \"alist\" or \"plist\")")]
    InvalidDictFormat(String),

    #[error("{0}")]
    Custom(String),
}

impl ElispError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElispError::UnsupportedType(_) | ElispError::Custom(_) => ErrorKind::Type,
            ElispError::IntegerOutOfRange(_) | ElispError::InvalidDictFormat(_) => {
                ErrorKind::Value
            }
        }
    }
}

impl serde::ser::Error for ElispError {
    fn custom<T: Display>(msg: T) -> Self {
        ElispError::Custom(msg.to_string())
    }
}
