//! Geo URI parameters as defined in RFC 5870.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::constants::{CRS_PARAM, PARAM_SEPARATOR, UNCERTAINTY_PARAM};
use crate::error::ParamsError;
use crate::param::{read_param, write_param};
use crate::pathname::{PathnameTarget, join_pathname, split_pathname};

/// Hook run before every [`GeoParams::set`], able to veto the write.
///
/// Receives the name and value exactly as passed to `set`.
pub type BeforeSetHook = fn(&str, &str) -> Result<(), ParamsError>;

type Entry = (String, String);

enum Backing<'a> {
    /// A parameter string without the leading `;`.
    Owned(String),
    /// The pathname of a geo URI, rewritten on every change.
    Bound(&'a mut dyn PathnameTarget),
}

/// Geo URI parameters: the `;`-separated list after the coordinates.
///
/// Works like `URLSearchParams` with a few differences dictated by the geo
/// URI syntax:
///
/// - names are matched case-insensitively, while both name and value case
///   are preserved in the output
/// - parameters aren't repeatable, so there is no `append` or `get_all`
/// - `crs` is always inserted first and `u` right after `crs`, the position
///   RFC 5870 gives them
/// - a parameter with an empty value is written as a bare flag `name`
///
/// A standalone collection owns its string. A collection obtained from
/// [`GeoUrl::geo_params_mut`](crate::GeoUrl::geo_params_mut) is bound to
/// the URI: reads see its current path and writes rewrite it in place.
///
/// # Examples
///
/// ```
/// use geo_url::GeoParams;
///
/// let mut params = GeoParams::parse("foo=bar;flag");
/// assert_eq!(params.get("FOO").as_deref(), Some("bar"));
/// assert_eq!(params.get("flag").as_deref(), Some(""));
/// assert_eq!(params.get("missing"), None);
///
/// params.set("u", "35").unwrap();
/// params.set("crs", "wgs84").unwrap();
/// assert_eq!(params.to_string(), "crs=wgs84;u=35;foo=bar;flag");
/// ```
pub struct GeoParams<'a> {
    backing: Backing<'a>,
    before_set: Option<BeforeSetHook>,
}

impl GeoParams<'static> {
    /// Creates an empty parameter collection.
    #[must_use]
    pub fn new() -> Self {
        Self::parse("")
    }

    /// Creates a collection from a parameter string without the leading `;`.
    ///
    /// The string is kept as is until the first modification.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self {
            backing: Backing::Owned(input.to_string()),
            before_set: None,
        }
    }

    /// Creates a collection from name-value pairs.
    ///
    /// Pairs are inserted one by one with the same rules as [`set`](Self::set),
    /// so a repeated name keeps its first position and its last value.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::MalformedPair` if some pair doesn't have exactly
    /// two items, or `ParamsError::InvalidName` for a name [`set`](Self::set)
    /// would refuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_url::GeoParams;
    ///
    /// let params = GeoParams::from_pairs([["foo", "bar"], ["u", "12"]]).unwrap();
    /// assert_eq!(params.to_string(), "u=12;foo=bar");
    ///
    /// assert!(GeoParams::from_pairs([vec!["foo"]]).is_err());
    /// ```
    pub fn from_pairs<I, P, S>(pairs: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (index, pair) in pairs.into_iter().enumerate() {
            let [name, value] = pair.as_ref() else {
                return Err(ParamsError::MalformedPair {
                    index,
                    len: pair.as_ref().len(),
                });
            };
            check_name(name.as_ref())?;
            upsert(&mut entries, name.as_ref(), value.as_ref());
        }
        Ok(Self::parse(&serialize(&entries)))
    }
}

impl<'a> GeoParams<'a> {
    /// Binds a collection to the pathname of a geo URI.
    pub(crate) fn bound(
        target: &'a mut dyn PathnameTarget,
        before_set: Option<BeforeSetHook>,
    ) -> Self {
        Self {
            backing: Backing::Bound(target),
            before_set,
        }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().1.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of the first parameter with the given name.
    ///
    /// Names are compared case-insensitively. A flag parameter has an empty
    /// value, a missing one gives `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let (_, entries) = self.read();
        entries
            .into_iter()
            .find(|(k, _)| same_name(k, name))
            .map(|(_, v)| v)
    }

    /// Sets a parameter to the given value.
    ///
    /// An existing parameter is updated in place and takes the name casing
    /// passed here. A new parameter is inserted first if it's `crs`, right
    /// after a leading `crs` (or first) if it's `u`, and last otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidName` for an empty name or one holding
    /// `;`, `=`, `?`, `#` or `%`, `ParamsError::Rejected` if the before-set
    /// hook refuses the write, or `ParamsError::Rewrite` if a bound URI
    /// can't be rewritten. Nothing is changed in any case.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ParamsError> {
        check_name(name)?;
        if let Some(hook) = self.before_set {
            if let Err(err) = hook(name, value) {
                tracing::debug!(name, value, error = %err, "geo parameter write rejected");
                return Err(err);
            }
        }

        let (coordinates, mut entries) = self.read();
        upsert(&mut entries, name, value);
        self.write(coordinates.as_deref(), &entries)
    }

    /// Deletes the first parameter with the given name.
    ///
    /// With `Some(value)`, the parameter is only deleted if it has exactly
    /// this value; a flag matches `Some("")`.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Rewrite` if a bound URI can't be rewritten.
    pub fn delete(&mut self, name: &str, value: Option<&str>) -> Result<(), ParamsError> {
        let (coordinates, mut entries) = self.read();
        let Some(index) = entries
            .iter()
            .position(|(k, v)| same_name(k, name) && value.is_none_or(|value| v == value))
        else {
            return Ok(());
        };
        entries.remove(index);
        self.write(coordinates.as_deref(), &entries)
    }

    /// Returns true if a parameter with the given name is present.
    ///
    /// With `Some(value)`, also checks the value of the first parameter with
    /// that name.
    #[must_use]
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        let (_, entries) = self.read();
        entries
            .iter()
            .find(|(k, _)| same_name(k, name))
            .is_some_and(|(_, v)| value.is_none_or(|value| v == value))
    }

    /// Returns the name-value pairs in order.
    #[must_use]
    pub fn entries(&self) -> std::vec::IntoIter<(String, String)> {
        self.read().1.into_iter()
    }

    /// Alias for [`entries`](Self::entries).
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<(String, String)> {
        self.entries()
    }

    /// Returns the parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = String> + use<> {
        self.entries().map(|(k, _)| k)
    }

    /// Returns the parameter values in order.
    pub fn values(&self) -> impl Iterator<Item = String> + use<> {
        self.entries().map(|(_, v)| v)
    }

    /// Returns a standalone copy of the current parameters.
    #[must_use]
    pub fn to_detached(&self) -> GeoParams<'static> {
        GeoParams::parse(&self.to_string())
    }

    fn read(&self) -> (Option<String>, Vec<Entry>) {
        match &self.backing {
            Backing::Owned(p) if p.is_empty() => (None, Vec::new()),
            Backing::Owned(p) => (None, parse_entries(p)),
            Backing::Bound(target) => {
                let (coordinates, params) = split_pathname(target.pathname());
                let entries = params.map(parse_entries).unwrap_or_default();
                (Some(coordinates.to_string()), entries)
            }
        }
    }

    fn write(&mut self, coordinates: Option<&str>, entries: &[Entry]) -> Result<(), ParamsError> {
        let params = serialize(entries);
        match &mut self.backing {
            Backing::Owned(p) => {
                *p = params;
                Ok(())
            }
            Backing::Bound(target) => {
                let params = (!entries.is_empty()).then_some(params.as_str());
                let pathname = join_pathname(coordinates.unwrap_or_default(), params);
                target.set_pathname(&pathname).map_err(ParamsError::Rewrite)
            }
        }
    }
}

impl Default for GeoParams<'static> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning always produces a standalone collection.
impl Clone for GeoParams<'_> {
    fn clone(&self) -> Self {
        Self {
            backing: Backing::Owned(self.to_string()),
            before_set: self.before_set,
        }
    }
}

impl fmt::Debug for GeoParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoParams")
            .field("params", &self.to_string())
            .field("bound", &matches!(self.backing, Backing::Bound(_)))
            .finish()
    }
}

impl PartialEq for GeoParams<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for GeoParams<'_> {}

/// Writes the parameter string without the leading `;`.
impl fmt::Display for GeoParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backing {
            Backing::Owned(p) => f.write_str(p),
            Backing::Bound(target) => {
                f.write_str(split_pathname(target.pathname()).1.unwrap_or_default())
            }
        }
    }
}

impl FromStr for GeoParams<'static> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K, V> FromIterator<(K, V)> for GeoParams<'static>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut entries = Vec::new();
        for (name, value) in iter {
            upsert(&mut entries, name.as_ref(), value.as_ref());
        }
        Self::parse(&serialize(&entries))
    }
}

impl IntoIterator for &GeoParams<'_> {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GeoParams<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GeoParams<'static> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Where a new parameter goes.
///
/// This is the single ordering rule for every insertion path: `crs` leads,
/// `u` follows a leading `crs`, everything else appends.
fn insertion_index(entries: &[Entry], name: &str) -> usize {
    if same_name(name, CRS_PARAM) {
        0
    } else if same_name(name, UNCERTAINTY_PARAM) {
        usize::from(entries.first().is_some_and(|(k, _)| same_name(k, CRS_PARAM)))
    } else {
        entries.len()
    }
}

/// Names are written unescaped, so they can't hold the parameter, pair,
/// query or fragment delimiters, nor start an escape.
fn check_name(name: &str) -> Result<(), ParamsError> {
    if name.is_empty() || name.contains([PARAM_SEPARATOR, '=', '?', '#', '%']) {
        return Err(ParamsError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn upsert(entries: &mut Vec<Entry>, name: &str, value: &str) {
    let entry = (name.to_string(), value.to_string());
    match entries.iter_mut().find(|(k, _)| same_name(k, name)) {
        Some(existing) => *existing = entry,
        None => {
            let index = insertion_index(entries, name);
            entries.insert(index, entry);
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn parse_entries(params: &str) -> Vec<Entry> {
    params.split(PARAM_SEPARATOR).map(read_param).collect()
}

fn serialize(entries: &[Entry]) -> String {
    let mut out = String::new();
    for (i, (name, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push(PARAM_SEPARATOR);
        }
        out.push_str(&write_param(name, value));
    }
    out
}
