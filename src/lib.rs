//! Parser and accessor layer for the `geo:` URI scheme.
//!
//! This crate implements parsing, validation, mutation and serialization of
//! geo URIs as defined in RFC 5870, including the `;`-separated parameter
//! syntax used inside them.
//!
//! # Overview
//!
//! A geo URI identifies a physical location by two or three coordinates in
//! some coordinate reference system (CRS), WGS84 by default:
//!
//! ```text
//! geo:<a>,<b>[,<c>][;crs=<crs>][;u=<uncertainty>][;<param>...][?z=<zoom>][#<fragment>]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use geo_url::{GeoUrl, Wgs84GeoUrl};
//!
//! // Any CRS, any finite coordinates
//! let uri: GeoUrl = GeoUrl::parse("geo:47.6,-122.3;u=35?z=11").unwrap();
//! assert_eq!(uri.coordinates().to_vec(), vec![47.6, -122.3]);
//! assert_eq!(uri.crs(), "wgs84");
//! assert_eq!(uri.u(), Some(35.0));
//! assert_eq!(uri.z(), Some(11.0));
//!
//! // WGS84 only, with range checks and named views
//! let mut uri = Wgs84GeoUrl::parse("geo:48.2010,16.3695,183").unwrap();
//! assert_eq!(uri.lat_lon(), [48.201, 16.3695]);
//! uri.set_alt(None).unwrap();
//! assert_eq!(uri.to_string(), "geo:48.2010,16.3695");
//! ```
//!
//! # Geo Parameters
//!
//! [`GeoParams`] reads and writes the parameters after the coordinates.
//! Names are case-insensitive, `crs` and `u` are kept in front, and values
//! are percent-encoded except for the characters RFC 5870 allows unescaped:
//!
//! ```rust
//! use geo_url::GeoUrl;
//!
//! let mut uri: GeoUrl = GeoUrl::parse("geo:0,0;foo=bar").unwrap();
//! uri.geo_params_mut().set("U", "10").unwrap();
//! uri.set_crs("NAD27").unwrap();
//! assert_eq!(uri.as_str(), "geo:0,0;crs=nad27;U=10;foo=bar");
//! ```
//!
//! # Numbers
//!
//! Coordinates are written with up to 12 fractional digits, `u` and `z`
//! with up to 9, always in fixed-point notation with trailing zeros
//! removed. Reading accepts any numeric prefix, so `12abc` reads as `12`.
//!
//! # Logging
//!
//! Rejected input and parameter writes are reported as `tracing` events at
//! debug level, and every path rewrite at trace level. The crate never
//! installs a subscriber.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod constants;
mod coordinates;
mod crs;
mod error;
mod geo_params;
mod number;
mod param;
mod pathname;
pub mod prelude;
mod search;
mod uri;
mod wgs84;

pub use constants::{
    COORDINATE_DECIMAL_DIGITS, CRS_PARAM, DEFAULT_CRS, MAX_COORDINATES, MAX_LATITUDE,
    MAX_LONGITUDE, MIN_COORDINATES, MIN_LATITUDE, MIN_LONGITUDE, PARAM_DECIMAL_DIGITS, PROTOCOL,
    SCHEME, UNCERTAINTY_PARAM, ZOOM_PARAM,
};
pub use coordinates::{Axis, Coordinates};
pub use crs::{AnyCrs, CrsPolicy, Wgs84};
pub use error::{
    CoordinatesError, NumberError, ParamsError, ParseError, ParseErrorKind, UpdateError,
};
pub use geo_params::{BeforeSetHook, GeoParams};
pub use number::{format_number, parse_number};
pub use param::{read_param, write_param};
pub use search::SearchParams;
pub use uri::GeoUrl;
pub use wgs84::Wgs84GeoUrl;
