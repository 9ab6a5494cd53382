//! Error types for geo URI parsing and mutation.

use std::error::Error;
use std::fmt;

use crate::coordinates::Axis;

/// Errors that can occur when parsing a geo URI.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The input (or its base) is not a URL at all
    InvalidUrl(url::ParseError),
    /// The scheme is something other than `geo`
    InvalidScheme {
        /// The scheme that was found
        found: String,
    },
    /// The coordinate part of the path is invalid
    InvalidCoordinates(CoordinatesError),
    /// The coordinate reference system is not accepted by the CRS policy
    CrsMismatch {
        /// The lowercased CRS that was found
        found: String,
        /// The CRS the policy requires
        expected: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse geo URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidUrl(e) => write!(f, "not a valid URL: {e}"),
            ParseErrorKind::InvalidScheme { found } => {
                write!(f, "expected scheme 'geo:', found '{found}:'")
            }
            ParseErrorKind::InvalidCoordinates(e) => write!(f, "invalid coordinates: {e}"),
            ParseErrorKind::CrsMismatch { found, expected } => {
                write!(f, "unexpected CRS '{found}', expected '{expected}'")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidUrl(e) => Some(e),
            ParseErrorKind::InvalidCoordinates(e) => Some(e),
            ParseErrorKind::InvalidScheme { .. } | ParseErrorKind::CrsMismatch { .. } => None,
        }
    }
}

/// Errors for coordinate validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatesError {
    /// Fewer than two or more than three coordinates
    InvalidCount {
        /// Number of comma-separated values found
        actual: usize,
    },
    /// A coordinate is not a finite number
    InvalidValue {
        /// Zero-based position of the coordinate
        index: usize,
        /// The offending text
        value: String,
    },
    /// A coordinate is outside the range allowed by the CRS
    OutOfRange {
        /// Which axis is out of range
        axis: Axis,
        /// The rejected value
        value: f64,
        /// Lowest allowed value
        min: f64,
        /// Highest allowed value
        max: f64,
    },
}

impl fmt::Display for CoordinatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCount { actual } => write!(
                f,
                "expected 2 or 3 comma-separated coordinates, found {actual}"
            ),
            Self::InvalidValue { index, value } => {
                write!(f, "coordinate {index} '{value}' is not a finite number")
            }
            Self::OutOfRange {
                axis,
                value,
                min,
                max,
            } => write!(f, "{axis} {value} outside of the allowed range [{min}, {max}]"),
        }
    }
}

impl Error for CoordinatesError {}

/// Errors for number formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberError {
    /// Infinity or NaN can't be written in fixed-point notation
    NonFinite {
        /// The rejected value
        value: f64,
    },
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { value } => write!(f, "unexpected nonfinite number {value}"),
        }
    }
}

impl Error for NumberError {}

/// Errors for geo parameter collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A name-value pair doesn't have exactly two items
    MalformedPair {
        /// Position of the pair in the input
        index: usize,
        /// Number of items the pair had
        len: usize,
    },
    /// A parameter name is empty or holds a character with meaning in
    /// the URI syntax
    InvalidName {
        /// The rejected name
        name: String,
    },
    /// A before-set hook refused the write
    Rejected {
        /// Parameter name as given to `set`
        name: String,
        /// Parameter value as given to `set`
        value: String,
        /// Reason for rejection
        reason: &'static str,
    },
    /// Writing the parameters back into the bound URL failed
    Rewrite(url::ParseError),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPair { index, len } => {
                write!(f, "expected 2 items in pair {index} but got {len}")
            }
            Self::InvalidName { name } => write!(f, "invalid parameter name '{name}'"),
            Self::Rejected {
                name,
                value,
                reason,
            } => write!(f, "'{value}' is not a valid value for {name}: {reason}"),
            Self::Rewrite(e) => write!(f, "failed to rewrite URL: {e}"),
        }
    }
}

impl Error for ParamsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rewrite(e) => Some(e),
            Self::MalformedPair { .. } | Self::InvalidName { .. } | Self::Rejected { .. } => None,
        }
    }
}

/// Errors for in-place updates of a parsed geo URI.
///
/// A failed update leaves the URI unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateError {
    /// New coordinates are invalid
    InvalidCoordinates(CoordinatesError),
    /// A number couldn't be formatted
    InvalidNumber(NumberError),
    /// A geo parameter write failed
    Params(ParamsError),
    /// The rewritten href didn't parse
    Rewrite(url::ParseError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinates(e) => write!(f, "invalid coordinates: {e}"),
            Self::InvalidNumber(e) => write!(f, "invalid number: {e}"),
            Self::Params(e) => write!(f, "invalid geo parameter: {e}"),
            Self::Rewrite(e) => write!(f, "failed to rewrite URL: {e}"),
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCoordinates(e) => Some(e),
            Self::InvalidNumber(e) => Some(e),
            Self::Params(e) => Some(e),
            Self::Rewrite(e) => Some(e),
        }
    }
}

impl From<CoordinatesError> for UpdateError {
    fn from(e: CoordinatesError) -> Self {
        Self::InvalidCoordinates(e)
    }
}

impl From<NumberError> for UpdateError {
    fn from(e: NumberError) -> Self {
        Self::InvalidNumber(e)
    }
}

impl From<ParamsError> for UpdateError {
    fn from(e: ParamsError) -> Self {
        Self::Params(e)
    }
}

impl From<url::ParseError> for UpdateError {
    fn from(e: url::ParseError) -> Self {
        Self::Rewrite(e)
    }
}
