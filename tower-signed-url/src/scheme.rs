use std::fmt::Display;

use http::Extensions;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks a request as received over TLS.
///
/// Whatever accepts the TLS connection (e.g. a `tokio-rustls` acceptor
/// loop) is expected to insert this into the request extensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SecureConnection;

/// Decides which scheme a request arrived with.
///
/// The scheme is part of the signed URL, so it must come from connection
/// metadata and never from the request line.
#[cfg_attr(test, mockall::automock)]
pub trait SchemeResolver: Send + Sync {
    fn resolve_scheme(&self, extensions: &Extensions) -> Scheme;
}

/// `https` if the request carries a [SecureConnection] extension, otherwise `http`.
///
/// This is the default.
#[derive(Debug, Default)]
pub struct ConnectionSchemeResolver;

impl SchemeResolver for ConnectionSchemeResolver {
    fn resolve_scheme(&self, extensions: &Extensions) -> Scheme {
        match extensions.get::<SecureConnection>() {
            Some(_) => Scheme::Https,
            None => Scheme::Http,
        }
    }
}

/// Always resolves to the same scheme.
///
/// Useful behind a proxy that terminates TLS and forwards plain HTTP.
#[derive(Debug)]
pub struct FixedSchemeResolver(pub Scheme);

impl SchemeResolver for FixedSchemeResolver {
    fn resolve_scheme(&self, _extensions: &Extensions) -> Scheme {
        self.0
    }
}
