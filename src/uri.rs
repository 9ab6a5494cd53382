//! Main geo URI type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use url::{Position, Url};

use crate::constants::{
    COORDINATE_DECIMAL_DIGITS, COORDINATE_SEPARATOR, CRS_PARAM, DEFAULT_CRS,
    PARAM_DECIMAL_DIGITS, PROTOCOL, SCHEME, UNCERTAINTY_PARAM, ZOOM_PARAM,
};
use crate::coordinates::Coordinates;
use crate::crs::{AnyCrs, CrsPolicy};
use crate::error::{CoordinatesError, ParamsError, ParseError, ParseErrorKind, UpdateError};
use crate::geo_params::GeoParams;
use crate::number::{format_finite, format_number, parse_number};
use crate::pathname::{join_pathname, rewrite_pathname, split_pathname};
use crate::search::SearchParams;

/// A parsed and validated geo URI (RFC 5870).
///
/// # Structure
///
/// ```text
/// geo:<a>,<b>[,<c>][;<param>...][?<query>][#<fragment>]
/// ```
///
/// The type parameter is the [`CrsPolicy`] every construction and update is
/// checked against. The default [`AnyCrs`] accepts any CRS and any finite
/// coordinates; see [`Wgs84GeoUrl`](crate::Wgs84GeoUrl) for the WGS84
/// variant.
///
/// All setters are atomic: on error the URI is left as it was.
///
/// # Examples
///
/// ```
/// use geo_url::GeoUrl;
///
/// let mut uri: GeoUrl = GeoUrl::parse("geo:47.6,-122.3?z=11").unwrap();
/// assert_eq!(uri.coordinates().to_vec(), vec![47.6, -122.3]);
/// assert_eq!(uri.z(), Some(11.0));
///
/// uri.set_z(Some(13.0)).unwrap();
/// uri.set_u(Some(35.0)).unwrap();
/// assert_eq!(uri.to_string(), "geo:47.6,-122.3;u=35?z=13");
/// ```
#[derive(Debug, Clone)]
pub struct GeoUrl<C: CrsPolicy = AnyCrs> {
    url: Url,
    /// Parsed form of the current coordinate string
    coordinates: Coordinates,
    policy: PhantomData<C>,
}

impl<C: CrsPolicy> GeoUrl<C> {
    /// Parses a geo URI from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is not a URL
    /// - The scheme is not `geo:`
    /// - There are not 2 or 3 coordinates, or one isn't a finite number
    /// - The coordinates or the CRS are rejected by the policy
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Url::parse(input)
            .map_err(ParseErrorKind::InvalidUrl)
            .and_then(Self::from_url_inner)
            .map_err(|kind| Self::rejected(input, kind))
    }

    /// Parses a geo URI relative to a base URI.
    ///
    /// The only useful relative reference against a geo URI is a fragment,
    /// such as `#hash`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the base is not a URL, or for any reason
    /// listed in [`parse`](Self::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_url::GeoUrl;
    ///
    /// let uri: GeoUrl = GeoUrl::parse_with_base("#hash", "geo:12,34").unwrap();
    /// assert_eq!(uri.as_str(), "geo:12,34#hash");
    /// ```
    pub fn parse_with_base(input: &str, base: &str) -> Result<Self, ParseError> {
        Url::parse(base)
            .and_then(|base| Url::options().base_url(Some(&base)).parse(input))
            .map_err(ParseErrorKind::InvalidUrl)
            .and_then(Self::from_url_inner)
            .map_err(|kind| Self::rejected(input, kind))
    }

    /// Validates an already parsed URL as a geo URI.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for any reason listed in [`parse`](Self::parse)
    /// other than URL syntax.
    pub fn from_url(url: Url) -> Result<Self, ParseError> {
        let input = url.to_string();
        Self::from_url_inner(url).map_err(|kind| Self::rejected(&input, kind))
    }

    /// Re-validates a geo URI under this type's policy.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if this policy rejects the coordinates or CRS of
    /// `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_url::{GeoUrl, Wgs84GeoUrl};
    ///
    /// let any: GeoUrl = GeoUrl::parse("geo:100,0").unwrap();
    /// assert!(Wgs84GeoUrl::from_geo_url(&any).is_err());
    /// ```
    pub fn from_geo_url<D: CrsPolicy>(other: &GeoUrl<D>) -> Result<Self, ParseError> {
        Self::from_url(other.url.clone())
    }

    /// Returns true if `input` parses as a geo URI under this policy.
    #[must_use]
    pub fn can_parse(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Returns true if `input` parses as a geo URI relative to `base`.
    #[must_use]
    pub fn can_parse_with_base(input: &str, base: &str) -> bool {
        Self::parse_with_base(input, base).is_ok()
    }

    /// Returns the full URI string.
    #[must_use]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the full URI string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }

    /// Consumes the geo URI, returning the underlying URL.
    #[must_use]
    pub fn into_url(self) -> Url {
        self.url
    }

    /// Returns the ASCII serialization of the origin, which is always
    /// `"null"` for geo URIs.
    #[must_use]
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Returns `"geo:"`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn protocol(&self) -> &'static str {
        PROTOCOL
    }

    /// Returns the username, normally empty.
    #[must_use]
    pub fn username(&self) -> &str {
        self.url.username()
    }

    /// Returns the password, normally empty.
    #[must_use]
    pub fn password(&self) -> &str {
        self.url.password().unwrap_or_default()
    }

    /// Returns the host with its port, normally empty.
    #[must_use]
    pub fn host(&self) -> String {
        match self.url.port() {
            Some(port) => format!("{}:{port}", self.hostname()),
            None => self.hostname().to_string(),
        }
    }

    /// Returns the host name, normally empty.
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Returns the port, normally `None`.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// Returns the path: coordinates followed by geo parameters.
    #[must_use]
    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Returns the query with its leading `?`, or `""` if it's empty.
    #[must_use]
    pub fn search(&self) -> &str {
        match self.url.query() {
            Some(q) if !q.is_empty() => &self.url[Position::AfterPath..Position::AfterQuery],
            _ => "",
        }
    }

    /// Replaces the query. A leading `?` is optional and `""` removes it.
    pub fn set_search(&mut self, search: &str) {
        if search.is_empty() {
            self.url.set_query(None);
        } else {
            self.url
                .set_query(Some(search.strip_prefix('?').unwrap_or(search)));
        }
    }

    /// Returns the fragment with its leading `#`, or `""` if it's empty.
    #[must_use]
    pub fn hash(&self) -> &str {
        match self.url.fragment() {
            Some(f) if !f.is_empty() => &self.url[Position::AfterQuery..],
            _ => "",
        }
    }

    /// Replaces the fragment. A leading `#` is optional and `""` removes it.
    pub fn set_hash(&mut self, hash: &str) {
        if hash.is_empty() {
            self.url.set_fragment(None);
        } else {
            self.url
                .set_fragment(Some(hash.strip_prefix('#').unwrap_or(hash)));
        }
    }

    /// Returns a snapshot of the query parameters.
    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        self.url.query_pairs().into_owned().collect()
    }

    /// Replaces the query with the given parameters.
    ///
    /// An empty parameter list removes the query entirely.
    pub fn set_search_params(&mut self, params: &SearchParams) {
        let query = params.to_string();
        self.url
            .set_query((!query.is_empty()).then_some(query.as_str()));
    }

    /// Returns the zoom level from the `z` query parameter.
    ///
    /// `None` if it's absent or not a number.
    #[must_use]
    pub fn z(&self) -> Option<f64> {
        self.search_params()
            .get(ZOOM_PARAM)
            .and_then(parse_number)
            .filter(|z| z.is_finite())
    }

    /// Alias for [`z`](Self::z).
    #[must_use]
    pub fn zoom(&self) -> Option<f64> {
        self.z()
    }

    /// Sets the `z` query parameter, or removes every `z` with `None`.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidNumber` if the zoom is not finite.
    pub fn set_z(&mut self, z: Option<f64>) -> Result<(), UpdateError> {
        let mut params = self.search_params();
        match z {
            Some(z) => params.set(ZOOM_PARAM, &format_number(z, PARAM_DECIMAL_DIGITS)?),
            None => params.delete(ZOOM_PARAM),
        }
        self.set_search_params(&params);
        Ok(())
    }

    /// Alias for [`set_z`](Self::set_z).
    ///
    /// # Errors
    ///
    /// See [`set_z`](Self::set_z).
    pub fn set_zoom(&mut self, zoom: Option<f64>) -> Result<(), UpdateError> {
        self.set_z(zoom)
    }

    /// Returns a standalone copy of the geo parameters.
    ///
    /// Changes to the copy don't affect this URI; use
    /// [`geo_params_mut`](Self::geo_params_mut) for that.
    #[must_use]
    pub fn geo_params(&self) -> GeoParams<'static> {
        GeoParams::parse(split_pathname(self.url.path()).1.unwrap_or_default())
    }

    /// Returns the geo parameters bound to this URI.
    ///
    /// Every write goes straight to the URI and is checked by the policy
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_url::GeoUrl;
    ///
    /// let mut uri: GeoUrl = GeoUrl::parse("geo:1,2;foo=bar?z=3").unwrap();
    /// uri.geo_params_mut().set("u", "10").unwrap();
    /// assert_eq!(uri.as_str(), "geo:1,2;u=10;foo=bar?z=3");
    /// ```
    pub fn geo_params_mut(&mut self) -> GeoParams<'_> {
        GeoParams::bound(&mut self.url, Some(C::before_param_set))
    }

    /// Returns the lowercased CRS, `"wgs84"` if none is given.
    #[must_use]
    pub fn crs(&self) -> String {
        match self.geo_params().get(CRS_PARAM) {
            Some(crs) if !crs.is_empty() => crs.to_lowercase(),
            _ => DEFAULT_CRS.to_string(),
        }
    }

    /// Sets the CRS.
    ///
    /// The value is lowercased. Setting `wgs84` removes the `crs` parameter,
    /// since that is the default.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::Params` if the policy rejects the CRS.
    pub fn set_crs(&mut self, crs: &str) -> Result<(), UpdateError> {
        let crs = crs.to_lowercase();
        let mut params = self.geo_params_mut();
        if crs == DEFAULT_CRS {
            params.delete(CRS_PARAM, None)?;
        } else {
            params.set(CRS_PARAM, &crs)?;
        }
        Ok(())
    }

    /// Returns the coordinate part of the path, as written.
    #[must_use]
    pub fn coordinates_str(&self) -> &str {
        split_pathname(self.url.path()).0
    }

    /// Replaces the coordinate part of the path, keeping the geo parameters.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidCoordinates` if the new coordinates are
    /// invalid or rejected by the policy. Text holding `;`, `?` or `#` is
    /// invalid, so this can't add parameters or change the query.
    pub fn set_coordinates_str(&mut self, coordinates: &str) -> Result<(), UpdateError> {
        Coordinates::parse(coordinates)?;
        let pathname = join_pathname(coordinates, split_pathname(self.url.path()).1);
        self.replace_pathname(&pathname)
    }

    /// Returns the parsed coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Replaces all coordinates with two or three values.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidCoordinates` for the wrong number of
    /// values, a non-finite value, or values rejected by the policy.
    pub fn set_coordinates(&mut self, values: &[f64]) -> Result<(), UpdateError> {
        let coordinates = Coordinates::from_slice(values)?;
        self.set_coordinates_str(&coordinates.to_string())
    }

    /// Returns the first coordinate.
    #[must_use]
    pub const fn coord_a(&self) -> f64 {
        self.coordinates.a()
    }

    /// Sets the first coordinate.
    ///
    /// # Errors
    ///
    /// See [`set_coordinates`](Self::set_coordinates).
    pub fn set_coord_a(&mut self, value: f64) -> Result<(), UpdateError> {
        self.set_coordinate(0, Some(value))
    }

    /// Returns the second coordinate.
    #[must_use]
    pub const fn coord_b(&self) -> f64 {
        self.coordinates.b()
    }

    /// Sets the second coordinate.
    ///
    /// # Errors
    ///
    /// See [`set_coordinates`](Self::set_coordinates).
    pub fn set_coord_b(&mut self, value: f64) -> Result<(), UpdateError> {
        self.set_coordinate(1, Some(value))
    }

    /// Returns the third coordinate, if present.
    #[must_use]
    pub const fn coord_c(&self) -> Option<f64> {
        self.coordinates.c()
    }

    /// Sets the third coordinate, or removes it with `None`.
    ///
    /// # Errors
    ///
    /// See [`set_coordinates`](Self::set_coordinates).
    pub fn set_coord_c(&mut self, value: Option<f64>) -> Result<(), UpdateError> {
        self.set_coordinate(2, value)
    }

    /// Returns the uncertainty in meters from the `u` geo parameter.
    ///
    /// `None` if it's absent or not a number.
    #[must_use]
    pub fn u(&self) -> Option<f64> {
        self.geo_params()
            .get(UNCERTAINTY_PARAM)
            .as_deref()
            .and_then(parse_number)
            .filter(|u| u.is_finite())
    }

    /// Alias for [`u`](Self::u).
    #[must_use]
    pub fn uncertainty(&self) -> Option<f64> {
        self.u()
    }

    /// Sets the `u` geo parameter, or removes it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidNumber` if the value is not finite.
    pub fn set_u(&mut self, u: Option<f64>) -> Result<(), UpdateError> {
        let mut params = self.geo_params_mut();
        match u {
            Some(u) => params.set(UNCERTAINTY_PARAM, &format_number(u, PARAM_DECIMAL_DIGITS)?)?,
            None => params.delete(UNCERTAINTY_PARAM, None)?,
        }
        Ok(())
    }

    /// Alias for [`set_u`](Self::set_u).
    ///
    /// # Errors
    ///
    /// See [`set_u`](Self::set_u).
    pub fn set_uncertainty(&mut self, uncertainty: Option<f64>) -> Result<(), UpdateError> {
        self.set_u(uncertainty)
    }

    /// Drops the policy; any valid URI is valid under [`AnyCrs`].
    pub(crate) fn relax(self) -> GeoUrl<AnyCrs> {
        GeoUrl {
            url: self.url,
            coordinates: self.coordinates,
            policy: PhantomData,
        }
    }

    /// Writes one coordinate slot, keeping the other tokens as written.
    fn set_coordinate(&mut self, index: usize, value: Option<f64>) -> Result<(), UpdateError> {
        let mut tokens: Vec<String> = self
            .coordinates_str()
            .split(COORDINATE_SEPARATOR)
            .map(str::to_string)
            .collect();

        match value {
            Some(value) if !value.is_finite() => {
                return Err(CoordinatesError::InvalidValue {
                    index,
                    value: value.to_string(),
                }
                .into());
            }
            Some(value) => {
                let token = format_finite(value, COORDINATE_DECIMAL_DIGITS);
                match tokens.get_mut(index) {
                    Some(slot) => *slot = token,
                    None => tokens.push(token),
                }
            }
            None => tokens.truncate(index),
        }

        let separator = COORDINATE_SEPARATOR.to_string();
        self.set_coordinates_str(&tokens.join(separator.as_str()))
    }

    /// The single coordinate write path: rewrite, then validate the
    /// coordinates the new URL actually carries.
    fn replace_pathname(&mut self, pathname: &str) -> Result<(), UpdateError> {
        let url = rewrite_pathname(&self.url, pathname)?;
        let coordinates = Self::validate_coordinates(split_pathname(url.path()).0)?;
        let uri = Self {
            url,
            coordinates,
            policy: PhantomData,
        };
        if let Some((found, _)) = uri.crs_mismatch() {
            return Err(ParamsError::Rejected {
                name: CRS_PARAM.to_string(),
                value: found,
                reason: "CRS not accepted by the policy",
            }
            .into());
        }
        *self = uri;
        Ok(())
    }

    /// The CRS found and the one expected, if the policy requires another.
    fn crs_mismatch(&self) -> Option<(String, &'static str)> {
        let expected = C::REQUIRED_CRS?;
        let found = self.crs();
        (found != expected).then_some((found, expected))
    }

    fn validate_coordinates(input: &str) -> Result<Coordinates, CoordinatesError> {
        let coordinates = Coordinates::parse(input)?;
        C::validate_coordinates(&coordinates)?;
        Ok(coordinates)
    }

    fn from_url_inner(url: Url) -> Result<Self, ParseErrorKind> {
        if url.scheme() != SCHEME {
            return Err(ParseErrorKind::InvalidScheme {
                found: url.scheme().to_string(),
            });
        }

        let coordinates = Self::validate_coordinates(split_pathname(url.path()).0)
            .map_err(ParseErrorKind::InvalidCoordinates)?;

        let uri = Self {
            url,
            coordinates,
            policy: PhantomData,
        };

        if let Some((found, expected)) = uri.crs_mismatch() {
            return Err(ParseErrorKind::CrsMismatch { found, expected });
        }

        Ok(uri)
    }

    fn rejected(input: &str, kind: ParseErrorKind) -> ParseError {
        let err = ParseError {
            input: input.to_string(),
            kind,
        };
        tracing::debug!(error = %err, "geo URI rejected");
        err
    }
}

impl<C: CrsPolicy> fmt::Display for GeoUrl<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl<C: CrsPolicy> FromStr for GeoUrl<C> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<C: CrsPolicy> AsRef<str> for GeoUrl<C> {
    fn as_ref(&self) -> &str {
        self.url.as_str()
    }
}

impl<C: CrsPolicy> TryFrom<&str> for GeoUrl<C> {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl<C: CrsPolicy> TryFrom<Url> for GeoUrl<C> {
    type Error = ParseError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

impl<C: CrsPolicy> From<GeoUrl<C>> for Url {
    fn from(uri: GeoUrl<C>) -> Self {
        uri.url
    }
}

impl<C: CrsPolicy> PartialEq for GeoUrl<C> {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl<C: CrsPolicy> Eq for GeoUrl<C> {}

impl<C: CrsPolicy> Hash for GeoUrl<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl<C: CrsPolicy> PartialOrd for GeoUrl<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CrsPolicy> Ord for GeoUrl<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.url.cmp(&other.url)
    }
}

#[cfg(feature = "serde")]
impl<C: CrsPolicy> serde::Serialize for GeoUrl<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.url.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de, C: CrsPolicy> serde::Deserialize<'de> for GeoUrl<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
