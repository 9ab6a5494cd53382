//! Coordinate reference system policies.
//!
//! A [`GeoUrl`](crate::GeoUrl) is parameterized by a policy that decides
//! which coordinates and which `crs` values it accepts. The policy is a
//! zero-sized marker type, so `GeoUrl<AnyCrs>` and `GeoUrl<Wgs84>` are
//! distinct types checked at compile time.

use std::fmt;
use std::hash::Hash;

use crate::constants::{
    CRS_PARAM, DEFAULT_CRS, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
use crate::coordinates::{Axis, Coordinates};
use crate::error::{CoordinatesError, ParamsError};

/// Validation rules a geo URI must keep through every construction and
/// update.
pub trait CrsPolicy: Copy + Default + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The only CRS this policy accepts, or `None` to accept any.
    const REQUIRED_CRS: Option<&'static str> = None;

    /// Checks coordinates before they are stored.
    ///
    /// Runs on construction and on every coordinate write.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatesError` if the coordinates are not acceptable.
    fn validate_coordinates(coordinates: &Coordinates) -> Result<(), CoordinatesError> {
        let _ = coordinates;
        Ok(())
    }

    /// Checks a geo parameter write before it is applied.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Rejected` to veto the write.
    fn before_param_set(name: &str, value: &str) -> Result<(), ParamsError> {
        let _ = (name, value);
        Ok(())
    }
}

/// Accepts any CRS and any finite coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnyCrs;

impl CrsPolicy for AnyCrs {}

/// World Geodetic System 1984.
///
/// Requires `crs` to be `wgs84` (or absent), latitude within [-90, 90] and
/// longitude within [-180, 180]. Altitude is unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Wgs84;

impl CrsPolicy for Wgs84 {
    const REQUIRED_CRS: Option<&'static str> = Some(DEFAULT_CRS);

    fn validate_coordinates(coordinates: &Coordinates) -> Result<(), CoordinatesError> {
        check_range(Axis::Latitude, coordinates.a(), MIN_LATITUDE, MAX_LATITUDE)?;
        check_range(Axis::Longitude, coordinates.b(), MIN_LONGITUDE, MAX_LONGITUDE)
    }

    fn before_param_set(name: &str, value: &str) -> Result<(), ParamsError> {
        if name.eq_ignore_ascii_case(CRS_PARAM) && !value.eq_ignore_ascii_case(DEFAULT_CRS) {
            return Err(ParamsError::Rejected {
                name: name.to_string(),
                value: value.to_string(),
                reason: "only wgs84 is allowed",
            });
        }
        Ok(())
    }
}

fn check_range(axis: Axis, value: f64, min: f64, max: f64) -> Result<(), CoordinatesError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoordinatesError::OutOfRange {
            axis,
            value,
            min,
            max,
        })
    }
}
