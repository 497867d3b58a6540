use http::{header::HOST, HeaderMap, Uri};
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    error::DenyReason,
    query::{has_valid_escapes, QueryParameters},
    scheme::Scheme,
};

/// Bytes kept as-is when a path has to be re-escaped.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Bytes a raw path may contain and still be signed verbatim.
fn is_path_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.~$&+,/:;=@!'()*[]%".contains(&byte)
}

/// The escaped form of a raw request path, as it appears in the canonical URL.
///
/// A path made only of unreserved bytes, sub-delimiters and valid escapes
/// is kept verbatim. Anything else is decoded and escaped again, e.g.
/// `/a{b}` becomes `/a%7Bb%7D`. `None` for an invalid `%` escape.
pub fn escaped_path(raw: &str) -> Option<String> {
    if !has_valid_escapes(raw) {
        return None;
    }
    if raw.bytes().all(is_path_byte) {
        return Some(raw.to_owned());
    }
    let decoded: Vec<u8> = percent_decode_str(raw).collect();
    Some(percent_encode(&decoded, PATH_ENCODE_SET).to_string())
}

/// Framework independent view of the parts of a request that are signed.
///
/// `path` is already escaped (see [escaped_path]) and the query never
/// contains the token parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub scheme: Scheme,
    pub host: String,
    pub path: String,
    pub query: QueryParameters,
}

impl RequestDescriptor {
    pub fn new(
        scheme: Scheme,
        host: impl Into<String>,
        path: impl Into<String>,
        query: QueryParameters,
    ) -> Self {
        RequestDescriptor {
            scheme,
            host: host.into(),
            path: path.into(),
            query,
        }
    }

    /// Build a descriptor from an incoming request.
    ///
    /// The host is taken from the `Host` header, falling back to the
    /// authority of the request target (HTTP/2). The path goes through
    /// [escaped_path]. Every occurrence of `token_parameter` is removed
    /// from the query.
    pub fn from_request_parts(
        scheme: Scheme,
        uri: &Uri,
        headers: &HeaderMap,
        token_parameter: &str,
    ) -> Result<Self, DenyReason> {
        let host = match headers.get(HOST) {
            Some(value) => value.to_str().map_err(|_| DenyReason::InvalidHost)?,
            None => uri
                .authority()
                .map(|authority| authority.as_str())
                .ok_or(DenyReason::MissingHost)?,
        };
        if host.is_empty() {
            return Err(DenyReason::MissingHost);
        }
        let path = escaped_path(uri.path()).ok_or(DenyReason::InvalidPath)?;
        let mut query = QueryParameters::parse(uri.query().unwrap_or_default());
        query.remove(token_parameter);
        Ok(RequestDescriptor::new(scheme, host, path, query))
    }

    /// `scheme://host/path?sorted-query`, the exact input to signing.
    ///
    /// `?` is left out when no parameters remain.
    pub fn canonical_url(&self) -> String {
        let mut url = format!("{}://{}", self.scheme, self.host);
        if !self.path.is_empty() && !self.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&self.path);
        let query = self.query.encode();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}
