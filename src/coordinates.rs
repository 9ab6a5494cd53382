//! Coordinate tuple of a geo URI.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    COORDINATE_DECIMAL_DIGITS, COORDINATE_SEPARATOR, MAX_COORDINATES, MIN_COORDINATES,
};
use crate::error::CoordinatesError;
use crate::number::{format_finite, parse_number};

/// Characters that end the coordinate part of a geo URI.
const URI_DELIMITERS: [char; 3] = [';', '?', '#'];

/// A named coordinate axis, used in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First coordinate of a WGS84 URI
    Latitude,
    /// Second coordinate of a WGS84 URI
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        })
    }
}

/// Two or three finite coordinates.
///
/// The meaning of each coordinate depends on the CRS. For WGS84 they are
/// latitude, longitude and altitude.
///
/// # Examples
///
/// ```
/// use geo_url::Coordinates;
///
/// let coordinates = Coordinates::parse("48.2010,16.3695,183").unwrap();
/// assert_eq!(coordinates.a(), 48.201);
/// assert_eq!(coordinates.c(), Some(183.0));
/// assert_eq!(coordinates.to_string(), "48.201,16.3695,183");
///
/// assert!(Coordinates::parse("1").is_err());
/// assert!(Coordinates::parse("1,x").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    a: f64,
    b: f64,
    c: Option<f64>,
}

impl Coordinates {
    /// Creates coordinates from their values.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatesError::InvalidValue` if a value is not finite.
    pub fn new(a: f64, b: f64, c: Option<f64>) -> Result<Self, CoordinatesError> {
        let coordinates = Self { a, b, c };
        for (index, value) in coordinates.iter().enumerate() {
            if !value.is_finite() {
                return Err(CoordinatesError::InvalidValue {
                    index,
                    value: value.to_string(),
                });
            }
        }
        Ok(coordinates)
    }

    /// Parses a comma-separated coordinate string.
    ///
    /// Each token is read with [`parse_number`], so a token only needs a
    /// numeric prefix. A token holding a URI delimiter (`;`, `?` or `#`) is
    /// invalid even when its prefix is numeric.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatesError::InvalidCount` for fewer than two or more
    /// than three tokens, or `CoordinatesError::InvalidValue` for a token
    /// that isn't a finite number.
    pub fn parse(input: &str) -> Result<Self, CoordinatesError> {
        let tokens: Vec<&str> = input.split(COORDINATE_SEPARATOR).collect();
        if !(MIN_COORDINATES..=MAX_COORDINATES).contains(&tokens.len()) {
            return Err(CoordinatesError::InvalidCount {
                actual: tokens.len(),
            });
        }

        let mut values = [0.0; MAX_COORDINATES];
        for (index, token) in tokens.iter().enumerate() {
            values[index] = Some(*token)
                .filter(|token| !token.contains(URI_DELIMITERS))
                .and_then(parse_number)
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoordinatesError::InvalidValue {
                    index,
                    value: (*token).to_string(),
                })?;
        }

        Ok(Self {
            a: values[0],
            b: values[1],
            c: (tokens.len() == MAX_COORDINATES).then_some(values[2]),
        })
    }

    /// Creates coordinates from a slice of two or three values.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatesError::InvalidCount` for a slice of the wrong
    /// length, or `CoordinatesError::InvalidValue` for a non-finite value.
    pub fn from_slice(values: &[f64]) -> Result<Self, CoordinatesError> {
        match *values {
            [a, b] => Self::new(a, b, None),
            [a, b, c] => Self::new(a, b, Some(c)),
            _ => Err(CoordinatesError::InvalidCount {
                actual: values.len(),
            }),
        }
    }

    /// Returns the first coordinate.
    #[must_use]
    pub const fn a(&self) -> f64 {
        self.a
    }

    /// Returns the second coordinate.
    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }

    /// Returns the third coordinate, if present.
    #[must_use]
    pub const fn c(&self) -> Option<f64> {
        self.c
    }

    /// Returns the number of coordinates, two or three.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.c.is_some() { 3 } else { 2 }
    }

    /// Always false; kept for symmetry with [`len`](Self::len).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the coordinates in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + use<> {
        [self.a, self.b].into_iter().chain(self.c)
    }

    /// Returns the coordinates as a vector of two or three values.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// Writes the coordinates with up to 12 fractional digits.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{COORDINATE_SEPARATOR}")?;
            }
            f.write_str(&format_finite(value, COORDINATE_DECIMAL_DIGITS))?;
        }
        Ok(())
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&[f64]> for Coordinates {
    type Error = CoordinatesError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_coordinates() {
        let c = Coordinates::parse("47.6,-122.3").unwrap();
        assert_eq!(c.to_vec(), vec![47.6, -122.3]);
        assert_eq!(c.c(), None);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn parse_three_coordinates() {
        let c = Coordinates::parse("1,2,3").unwrap();
        assert_eq!(c.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn parse_too_few() {
        assert_eq!(
            Coordinates::parse("1"),
            Err(CoordinatesError::InvalidCount { actual: 1 })
        );
        assert_eq!(
            Coordinates::parse(""),
            Err(CoordinatesError::InvalidCount { actual: 1 })
        );
    }

    #[test]
    fn parse_too_many() {
        assert_eq!(
            Coordinates::parse("1,2,3,4"),
            Err(CoordinatesError::InvalidCount { actual: 4 })
        );
    }

    #[test]
    fn parse_non_numeric_token() {
        assert_eq!(
            Coordinates::parse("1,abc"),
            Err(CoordinatesError::InvalidValue {
                index: 1,
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn parse_empty_token() {
        assert!(matches!(
            Coordinates::parse("0,0,"),
            Err(CoordinatesError::InvalidValue { index: 2, .. })
        ));
    }

    #[test]
    fn parse_rejects_infinity() {
        assert!(matches!(
            Coordinates::parse("Infinity,0"),
            Err(CoordinatesError::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn parse_rejects_uri_delimiters() {
        for (input, index, value) in [
            ("1,2;crs=nad27", 1, "2;crs=nad27"),
            ("7,8?q", 1, "8?q"),
            ("7#top,8", 0, "7#top"),
        ] {
            assert_eq!(
                Coordinates::parse(input),
                Err(CoordinatesError::InvalidValue {
                    index,
                    value: value.to_string()
                }),
                "{input}"
            );
        }
    }

    #[test]
    fn parse_accepts_numeric_prefix() {
        // Tokens are read like parseFloat, trailing text is ignored.
        let c = Coordinates::parse("12abc,3").unwrap();
        assert_eq!(c.a(), 12.0);
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Coordinates::from_slice(&[1.0, 2.0]).is_ok());
        assert!(Coordinates::from_slice(&[1.0, 2.0, 3.0]).is_ok());
        assert_eq!(
            Coordinates::from_slice(&[1.0]),
            Err(CoordinatesError::InvalidCount { actual: 1 })
        );
        assert_eq!(
            Coordinates::from_slice(&[]),
            Err(CoordinatesError::InvalidCount { actual: 0 })
        );
    }

    #[test]
    fn new_rejects_nan() {
        assert!(matches!(
            Coordinates::new(0.0, f64::NAN, None),
            Err(CoordinatesError::InvalidValue { index: 1, .. })
        ));
    }

    #[test]
    fn display_rounds_to_twelve_digits() {
        let c = Coordinates::new(0.1 + 0.2, 1.000_000_000_000_1, None).unwrap();
        assert_eq!(c.to_string(), "0.3,1");
    }

    #[test]
    fn axis_display() {
        assert_eq!(Axis::Latitude.to_string(), "latitude");
        assert_eq!(Axis::Longitude.to_string(), "longitude");
    }
}
