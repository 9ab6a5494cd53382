//! Pathname rewriting for opaque-path URLs.
//!
//! `geo:` URIs have an opaque path, and the URL standard silently ignores
//! pathname writes on those. The only reliable way to change the path is to
//! rebuild the whole href and parse it again.

use url::Url;

use crate::constants::PARAM_SEPARATOR;

/// Something that owns a geo URI pathname.
///
/// This is the read/write pair a bound [`GeoParams`](crate::GeoParams) goes
/// through, so the collection doesn't depend on a particular URL type.
pub(crate) trait PathnameTarget: Send + Sync {
    /// Current pathname (coordinates followed by `;`-separated parameters).
    fn pathname(&self) -> &str;

    /// Replaces the pathname, keeping everything else.
    fn set_pathname(&mut self, pathname: &str) -> Result<(), url::ParseError>;
}

impl PathnameTarget for Url {
    fn pathname(&self) -> &str {
        self.path()
    }

    fn set_pathname(&mut self, pathname: &str) -> Result<(), url::ParseError> {
        *self = rewrite_pathname(self, pathname)?;
        Ok(())
    }
}

/// Builds a copy of `url` with a different pathname.
///
/// The scheme, query and fragment of `url` are carried over verbatim.
/// `url` itself is left untouched, so a failure here has no side effects.
pub(crate) fn rewrite_pathname(url: &Url, pathname: &str) -> Result<Url, url::ParseError> {
    let query = url.query();
    let fragment = url.fragment();
    let mut href = String::with_capacity(
        url.scheme().len()
            + 1
            + pathname.len()
            + query.map_or(0, |q| q.len() + 1)
            + fragment.map_or(0, |f| f.len() + 1),
    );
    href.push_str(url.scheme());
    href.push(':');
    href.push_str(pathname);
    if let Some(q) = query {
        href.push('?');
        href.push_str(q);
    }
    if let Some(f) = fragment {
        href.push('#');
        href.push_str(f);
    }
    tracing::trace!(from = %url, to = %href, "rewriting geo URI pathname");
    Url::parse(&href)
}

/// Splits a pathname into the coordinate string and the parameter string.
///
/// The parameter string is `None` when the pathname has no `;`.
pub(crate) fn split_pathname(pathname: &str) -> (&str, Option<&str>) {
    match pathname.split_once(PARAM_SEPARATOR) {
        Some((coordinates, params)) => (coordinates, Some(params)),
        None => (pathname, None),
    }
}

/// Joins a coordinate string and an optional parameter string.
pub(crate) fn join_pathname(coordinates: &str, params: Option<&str>) -> String {
    match params {
        Some(params) => format!("{coordinates}{PARAM_SEPARATOR}{params}"),
        None => coordinates.to_string(),
    }
}
