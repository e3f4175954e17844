//! Route strings: `path ["?" query]`
//!
//! The path is everything before the first `?`. The query is an ordered list
//! of URL-encoded `key=value` pairs. Rewriting a parameter always re-encodes the
//! whole suffix, so a route never carries two `?`.

use super::RouteError;
use std::fmt;
use url::form_urlencoded;

/// Path part of a route string (everything before the first `?`)
pub fn path_of(route: &str) -> &str {
    route.split_once('?').map_or(route, |(path, _)| path)
}

/// Ordered query parameters; a key may repeat and the last occurrence wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`)
    ///
    /// Rejects `;` separators and `%` escapes that are not followed by two
    /// hex digits. Empty segments (`a=1&&b=2`) are skipped.
    pub fn parse(query: &str) -> Result<Self, String> {
        validate_query(query)?;
        Ok(Self(
            form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        ))
    }

    /// Value of the last occurrence of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Set `key` to a single value
    ///
    /// The first occurrence is overwritten in place and any later ones are
    /// dropped; a new key is appended.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.0.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.0[first].1 = value.to_string();
                let mut i = 0;
                self.0.retain(|(k, _)| {
                    let keep = i <= first || k != key;
                    i += 1;
                    keep
                });
            }
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// URL-encode back to `k=v&k2=v2`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn validate_query(query: &str) -> Result<(), String> {
    let bytes = query.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b';' => return Err("invalid semicolon separator in query".to_string()),
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                match escape {
                    Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                    _ => {
                        let end = (i + 3).min(bytes.len());
                        return Err(format!(
                            "invalid URL escape {:?}",
                            String::from_utf8_lossy(&bytes[i..end])
                        ));
                    }
                }
            }
            _ => i += 1,
        }
    }
    Ok(())
}

/// A parsed route string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    params: Params,
}

impl Route {
    /// Split on the first `?` and parse the query
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let params = Params::parse(query).map_err(|reason| RouteError::MalformedQuery {
            route: raw.to_string(),
            reason,
        })?;
        Ok(Self {
            path: path.to_string(),
            params,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.params.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_occurrence_wins() {
        let route = Route::parse("list?tag=x&tag=y").unwrap();
        assert_eq!(route.path(), "list");
        assert_eq!(route.params().get("tag"), Some("y"));
        assert_eq!(route.params().get_all("tag"), vec!["x", "y"]);
    }

    #[test]
    fn test_set_param_on_bare_route() {
        let mut route = Route::parse("route").unwrap();
        route.params_mut().set("key", "value");
        assert_eq!(route.to_string(), "route?key=value");
    }

    #[test]
    fn test_set_param_collapses_repeats() {
        let mut route = Route::parse("list?tag=x&page=2&tag=y").unwrap();
        route.params_mut().set("tag", "z");
        assert_eq!(route.to_string(), "list?tag=z&page=2");
    }

    #[test]
    fn test_split_on_first_question_mark() {
        let route = Route::parse("search?q=what%3F&x=a?b").unwrap();
        assert_eq!(route.path(), "search");
        assert_eq!(route.params().get("q"), Some("what?"));
        assert_eq!(route.params().get("x"), Some("a?b"));
        assert_eq!(path_of("search?q=1?2"), "search");
    }

    #[test]
    fn test_encoding_escapes_values() {
        let mut route = Route::parse("find").unwrap();
        route.params_mut().set("q", "a&b=c d");
        let encoded = route.to_string();
        assert_eq!(encoded, "find?q=a%26b%3Dc+d");
        assert_eq!(Route::parse(&encoded).unwrap().params().get("q"), Some("a&b=c d"));
    }

    #[test]
    fn test_malformed_queries_rejected() {
        assert!(matches!(
            Route::parse("a?x=1;y=2"),
            Err(RouteError::MalformedQuery { .. })
        ));
        assert!(Route::parse("a?x=%zz").is_err());
        assert!(Route::parse("a?x=%4").is_err());
        assert!(Route::parse("a?x=%41&&y=").is_ok());
    }
}
