//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use geo_url::prelude::*;
//!
//! let uri = Wgs84GeoUrl::parse("geo:48.2010,16.3695").unwrap();
//! let params: GeoParams = uri.geo_params();
//! assert!(params.is_empty());
//! ```
//!
//! The free codec functions (`parse_number`, `read_param`, ...) and the
//! constants are left out; import them from the crate root when needed.

pub use crate::{
    // Core types
    AnyCrs, Axis, Coordinates, CrsPolicy, GeoParams, GeoUrl, SearchParams, Wgs84, Wgs84GeoUrl,
    // Errors
    CoordinatesError, NumberError, ParamsError, ParseError, ParseErrorKind, UpdateError,
};
