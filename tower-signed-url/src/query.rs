use std::collections::BTreeMap;

use percent_encoding::{percent_decode, percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ~` is escaped.
/// Space is escaped too and turned into `+` afterwards.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Decoded query parameters, keyed and iterated in byte order of the key.
///
/// Keys and values are kept as raw bytes; a `%FF` survives a parse and
/// encode cycle unchanged. Values of a repeated key keep the order in
/// which they appeared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParameters {
    params: BTreeMap<Vec<u8>, Vec<Vec<u8>>>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw (still percent-encoded) query string.
    ///
    /// Never fails. Pairs that can't be decoded are dropped:
    /// pairs containing `;` and pairs with an invalid `%` escape.
    pub fn parse(raw: &str) -> Self {
        let mut query = QueryParameters::new();
        for pair in raw.split('&') {
            if pair.is_empty() || pair.contains(';') {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match (unescape(key), unescape(value)) {
                (Some(key), Some(value)) => query.append(key, value),
                _ => continue,
            }
        }
        query
    }

    pub fn append(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// First value of `key`, if any and if it is UTF-8.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key)
            .first()
            .and_then(|value| std::str::from_utf8(value).ok())
    }

    pub fn get_all(&self, key: &str) -> &[Vec<u8>] {
        self.params
            .get(key.as_bytes())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Removes every value of `key`.
    pub fn remove(&mut self, key: &str) {
        self.params.remove(key.as_bytes());
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.params.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_slice(), value.as_slice()))
        })
    }

    /// Sorted, deterministic encoding: `a=1&b=x+y&b=%2F`.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = QueryParameters::new();
        for (key, value) in iter {
            query.append(key, value);
        }
        query
    }
}

/// Every `%` is followed by two hex digits.
pub(crate) fn has_valid_escapes(component: &str) -> bool {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

fn escape(component: &[u8]) -> String {
    percent_encode(component, QUERY_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

fn unescape(component: &str) -> Option<Vec<u8>> {
    if !has_valid_escapes(component) {
        return None;
    }
    let plus_as_space = component.replace('+', " ");
    Some(percent_decode(plus_as_space.as_bytes()).collect())
}
