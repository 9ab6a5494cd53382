//! Query string parameters of a geo URI.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// Query string parameters, in the `application/x-www-form-urlencoded`
/// syntax.
///
/// This is an owned snapshot: read it with
/// [`GeoUrl::search_params`](crate::GeoUrl::search_params) and write it back
/// with [`GeoUrl::set_search_params`](crate::GeoUrl::set_search_params).
/// Unlike geo parameters, names are case-sensitive, repeatable and `+`
/// decodes to a space.
///
/// # Examples
///
/// ```
/// use geo_url::SearchParams;
///
/// let mut params = SearchParams::parse("z=11&q=coffee+shop");
/// assert_eq!(params.get("q"), Some("coffee shop"));
///
/// params.set("z", "13");
/// params.append("q", "tea");
/// assert_eq!(params.to_string(), "z=13&q=coffee+shop&q=tea");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// Never fails: malformed escapes are kept and empty pairs are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect()
    }

    /// Returns the value of the first parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the values of all parameters with the given name.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Sets the first parameter with the given name and removes the others.
    ///
    /// Appends the parameter if there was none.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == name) {
            Some(index) => {
                self.pairs[index].1 = value.to_string();
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.append(name, value),
        }
    }

    /// Appends a parameter, keeping existing ones with the same name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Removes every parameter with the given name.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(k, _)| k != name);
    }

    /// Returns true if a parameter with the given name exists.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Writes the query string without the leading `?`.
impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&query)
    }
}

impl FromStr for SearchParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
