//! Constants for geo URI parsing and formatting.

/// The URI scheme.
pub const SCHEME: &str = "geo";

/// The URI scheme followed by its delimiter, as reported by `protocol()`.
pub const PROTOCOL: &str = "geo:";

/// Coordinate reference system assumed when the `crs` parameter is absent.
pub const DEFAULT_CRS: &str = "wgs84";

/// Name of the coordinate reference system geo parameter.
pub const CRS_PARAM: &str = "crs";

/// Name of the uncertainty geo parameter.
pub const UNCERTAINTY_PARAM: &str = "u";

/// Name of the zoom query parameter.
pub const ZOOM_PARAM: &str = "z";

/// Separator between the coordinates and each geo parameter.
pub const PARAM_SEPARATOR: char = ';';

/// Separator between individual coordinates.
pub const COORDINATE_SEPARATOR: char = ',';

/// Minimum number of coordinates in a geo URI.
pub const MIN_COORDINATES: usize = 2;

/// Maximum number of coordinates in a geo URI.
pub const MAX_COORDINATES: usize = 3;

/// Fractional digits kept when writing coordinates.
///
/// High enough that sums like `0.1 + 0.2` round back to `0.3`.
pub const COORDINATE_DECIMAL_DIGITS: usize = 12;

/// Fractional digits kept when writing `u` and `z` (nanometer precision for `u`).
pub const PARAM_DECIMAL_DIGITS: usize = 9;

/// Lowest valid WGS84 latitude in decimal degrees.
pub const MIN_LATITUDE: f64 = -90.0;

/// Highest valid WGS84 latitude in decimal degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Lowest valid WGS84 longitude in decimal degrees.
pub const MIN_LONGITUDE: f64 = -180.0;

/// Highest valid WGS84 longitude in decimal degrees.
pub const MAX_LONGITUDE: f64 = 180.0;
