//! WGS84 geo URIs with latitude, longitude and altitude views.

use crate::crs::{AnyCrs, Wgs84};
use crate::error::UpdateError;
use crate::uri::GeoUrl;

/// A geo URI in the WGS84 coordinate reference system.
///
/// Latitude must be within [-90, 90], longitude within [-180, 180], and
/// `crs` must be absent or `wgs84`. These hold after construction and after
/// every update, including writes through
/// [`geo_params_mut`](GeoUrl::geo_params_mut).
///
/// # Examples
///
/// ```
/// use geo_url::Wgs84GeoUrl;
///
/// let mut uri = Wgs84GeoUrl::parse("geo:48.2010,16.3695,183").unwrap();
/// assert_eq!(uri.lat(), 48.201);
/// assert_eq!(uri.lng(), 16.3695);
/// assert_eq!(uri.alt(), Some(183.0));
///
/// uri.set_alt(None).unwrap();
/// assert_eq!(uri.to_string(), "geo:48.2010,16.3695");
///
/// assert!(uri.set_lat(91.0).is_err());
/// assert!(Wgs84GeoUrl::parse("geo:0,0;crs=unknown").is_err());
/// ```
pub type Wgs84GeoUrl = GeoUrl<Wgs84>;

impl GeoUrl<Wgs84> {
    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.coord_a()
    }

    /// Alias for [`lat`](Self::lat).
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.lat()
    }

    /// Sets the latitude.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidCoordinates` if the latitude is not
    /// finite or outside [-90, 90].
    pub fn set_lat(&mut self, lat: f64) -> Result<(), UpdateError> {
        self.set_coord_a(lat)
    }

    /// Alias for [`set_lat`](Self::set_lat).
    ///
    /// # Errors
    ///
    /// See [`set_lat`](Self::set_lat).
    pub fn set_latitude(&mut self, latitude: f64) -> Result<(), UpdateError> {
        self.set_lat(latitude)
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.coord_b()
    }

    /// Alias for [`lon`](Self::lon).
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lon()
    }

    /// Alias for [`lon`](Self::lon).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.lon()
    }

    /// Sets the longitude.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidCoordinates` if the longitude is not
    /// finite or outside [-180, 180].
    pub fn set_lon(&mut self, lon: f64) -> Result<(), UpdateError> {
        self.set_coord_b(lon)
    }

    /// Alias for [`set_lon`](Self::set_lon).
    ///
    /// # Errors
    ///
    /// See [`set_lon`](Self::set_lon).
    pub fn set_lng(&mut self, lng: f64) -> Result<(), UpdateError> {
        self.set_lon(lng)
    }

    /// Alias for [`set_lon`](Self::set_lon).
    ///
    /// # Errors
    ///
    /// See [`set_lon`](Self::set_lon).
    pub fn set_longitude(&mut self, longitude: f64) -> Result<(), UpdateError> {
        self.set_lon(longitude)
    }

    /// Returns the altitude in meters, if present.
    #[must_use]
    pub const fn alt(&self) -> Option<f64> {
        self.coord_c()
    }

    /// Alias for [`alt`](Self::alt).
    #[must_use]
    pub const fn altitude(&self) -> Option<f64> {
        self.alt()
    }

    /// Sets the altitude, or removes it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidCoordinates` if the altitude is not
    /// finite.
    pub fn set_alt(&mut self, alt: Option<f64>) -> Result<(), UpdateError> {
        self.set_coord_c(alt)
    }

    /// Alias for [`set_alt`](Self::set_alt).
    ///
    /// # Errors
    ///
    /// See [`set_alt`](Self::set_alt).
    pub fn set_altitude(&mut self, altitude: Option<f64>) -> Result<(), UpdateError> {
        self.set_alt(altitude)
    }

    /// Returns `[lat, lon]`.
    #[must_use]
    pub const fn lat_lon(&self) -> [f64; 2] {
        [self.lat(), self.lon()]
    }

    /// Alias for [`lat_lon`](Self::lat_lon).
    #[must_use]
    pub const fn lat_lng(&self) -> [f64; 2] {
        self.lat_lon()
    }

    /// Sets latitude and longitude together, keeping the altitude.
    ///
    /// # Errors
    ///
    /// See [`set_lat`](Self::set_lat) and [`set_lon`](Self::set_lon).
    /// Nothing is changed if either value is rejected.
    pub fn set_lat_lon(&mut self, [lat, lon]: [f64; 2]) -> Result<(), UpdateError> {
        let mut updated = self.clone();
        updated.set_lat(lat)?;
        updated.set_lon(lon)?;
        *self = updated;
        Ok(())
    }

    /// Alias for [`set_lat_lon`](Self::set_lat_lon).
    ///
    /// # Errors
    ///
    /// See [`set_lat_lon`](Self::set_lat_lon).
    pub fn set_lat_lng(&mut self, lat_lng: [f64; 2]) -> Result<(), UpdateError> {
        self.set_lat_lon(lat_lng)
    }

    /// Returns `[lon, lat]`, the axis order most mapping libraries use.
    #[must_use]
    pub const fn lon_lat(&self) -> [f64; 2] {
        [self.lon(), self.lat()]
    }

    /// Alias for [`lon_lat`](Self::lon_lat).
    #[must_use]
    pub const fn lng_lat(&self) -> [f64; 2] {
        self.lon_lat()
    }

    /// Sets longitude and latitude together, keeping the altitude.
    ///
    /// # Errors
    ///
    /// See [`set_lat_lon`](Self::set_lat_lon).
    pub fn set_lon_lat(&mut self, [lon, lat]: [f64; 2]) -> Result<(), UpdateError> {
        self.set_lat_lon([lat, lon])
    }

    /// Alias for [`set_lon_lat`](Self::set_lon_lat).
    ///
    /// # Errors
    ///
    /// See [`set_lat_lon`](Self::set_lat_lon).
    pub fn set_lng_lat(&mut self, lng_lat: [f64; 2]) -> Result<(), UpdateError> {
        self.set_lon_lat(lng_lat)
    }
}

/// Every WGS84 geo URI is a valid geo URI.
impl From<GeoUrl<Wgs84>> for GeoUrl<AnyCrs> {
    fn from(uri: GeoUrl<Wgs84>) -> Self {
        uri.relax()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Axis;
    use crate::error::{CoordinatesError, ParamsError, ParseError, ParseErrorKind};

    fn wgs84(input: &str) -> Wgs84GeoUrl {
        Wgs84GeoUrl::parse(input).unwrap()
    }

    #[test]
    fn parse_within_bounds() {
        assert!(Wgs84GeoUrl::can_parse("geo:90,180"));
        assert!(Wgs84GeoUrl::can_parse("geo:-90,-180,-5000"));
        assert!(Wgs84GeoUrl::can_parse("geo:0,0;crs=WGS84"));
    }

    #[test]
    fn parse_latitude_out_of_range() {
        let result = Wgs84GeoUrl::parse("geo:90.1,0");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::InvalidCoordinates(CoordinatesError::OutOfRange {
                    axis: Axis::Latitude,
                    ..
                }),
                ..
            })
        ));
    }

    #[test]
    fn parse_longitude_out_of_range() {
        assert!(!Wgs84GeoUrl::can_parse("geo:0,180.1"));
        assert!(!Wgs84GeoUrl::can_parse("geo:0,-181"));
    }

    #[test]
    fn parse_other_crs_is_rejected() {
        let result = Wgs84GeoUrl::parse("geo:0,0;crs=unknown");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::CrsMismatch {
                    expected: "wgs84",
                    ..
                },
                ..
            })
        ));
        assert!(GeoUrl::<AnyCrs>::can_parse("geo:0,0;crs=unknown"));
    }

    #[test]
    fn views_read_coordinates() {
        let uri = wgs84("geo:48.2010,16.3695,183");
        assert_eq!(uri.lat(), 48.201);
        assert_eq!(uri.latitude(), 48.201);
        assert_eq!(uri.lon(), 16.3695);
        assert_eq!(uri.lng(), 16.3695);
        assert_eq!(uri.longitude(), 16.3695);
        assert_eq!(uri.alt(), Some(183.0));
        assert_eq!(uri.altitude(), Some(183.0));
        assert_eq!(uri.lat_lon(), [48.201, 16.3695]);
        assert_eq!(uri.lat_lng(), [48.201, 16.3695]);
        assert_eq!(uri.lon_lat(), [16.3695, 48.201]);
        assert_eq!(uri.lng_lat(), [16.3695, 48.201]);
    }

    #[test]
    fn remove_altitude() {
        let mut uri = wgs84("geo:48.2010,16.3695,183");
        uri.set_alt(None).unwrap();
        assert_eq!(uri.to_string(), "geo:48.2010,16.3695");
        assert_eq!(uri.alt(), None);
    }

    #[test]
    fn setters_validate_ranges() {
        let mut uri = wgs84("geo:1,2;u=3");
        assert!(uri.set_lat(-90.5).is_err());
        assert!(uri.set_lon(200.0).is_err());
        assert!(uri.set_coordinates(&[100.0, 0.0]).is_err());
        assert!(uri.set_coordinates_str("0,500").is_err());
        assert_eq!(uri.as_str(), "geo:1,2;u=3");

        uri.set_latitude(45.0).unwrap();
        uri.set_longitude(-120.0).unwrap();
        uri.set_altitude(Some(10.0)).unwrap();
        assert_eq!(uri.as_str(), "geo:45,-120,10;u=3");
    }

    #[test]
    fn pair_setters() {
        let mut uri = wgs84("geo:1,2,3");
        uri.set_lat_lng([10.0, 20.0]).unwrap();
        assert_eq!(uri.as_str(), "geo:10,20,3");
        uri.set_lng_lat([30.0, 40.0]).unwrap();
        assert_eq!(uri.as_str(), "geo:40,30,3");
    }

    #[test]
    fn pair_setter_is_atomic() {
        let mut uri = wgs84("geo:1,2");
        assert!(uri.set_lat_lon([10.0, 500.0]).is_err());
        assert_eq!(uri.as_str(), "geo:1,2");
    }

    #[test]
    fn crs_writes_are_guarded() {
        let mut uri = wgs84("geo:1,2;foo=bar");
        assert!(matches!(
            uri.set_crs("nad27"),
            Err(UpdateError::Params(ParamsError::Rejected { .. }))
        ));
        assert!(matches!(
            uri.geo_params_mut().set("CRS", "nad27"),
            Err(ParamsError::Rejected { .. })
        ));
        assert!(matches!(
            uri.geo_params_mut().set("x;crs", "nad27"),
            Err(ParamsError::InvalidName { .. })
        ));
        assert!(uri.set_coordinates_str("1,2;crs=nad27").is_err());
        assert_eq!(uri.as_str(), "geo:1,2;foo=bar");
        assert_eq!(uri.crs(), "wgs84");

        uri.geo_params_mut().set("crs", "WGS84").unwrap();
        assert_eq!(uri.as_str(), "geo:1,2;crs=WGS84;foo=bar");
        uri.set_crs("wgs84").unwrap();
        assert_eq!(uri.as_str(), "geo:1,2;foo=bar");
    }

    #[test]
    fn other_params_are_unrestricted() {
        let mut uri = wgs84("geo:1,2");
        uri.geo_params_mut().set("u", "5").unwrap();
        uri.set_u(Some(7.0)).unwrap();
        assert_eq!(uri.as_str(), "geo:1,2;u=7");
    }

    #[test]
    fn convert_between_policies() {
        let uri = wgs84("geo:1,2");
        let any: GeoUrl = uri.clone().into();
        assert_eq!(any.as_str(), "geo:1,2");
        assert_eq!(Wgs84GeoUrl::from_geo_url(&any).unwrap(), uri);

        let far: GeoUrl = GeoUrl::parse("geo:100,0").unwrap();
        assert!(Wgs84GeoUrl::from_geo_url(&far).is_err());
    }
}
