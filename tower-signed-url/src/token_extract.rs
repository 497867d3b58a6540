use http::Uri;

use crate::query::QueryParameters;

pub const DEFAULT_TOKEN_PARAMETER: &str = "token";

pub trait TokenExtractor: Send + Sync {
    /// Name of the query parameter holding the token.
    ///
    /// Every occurrence of it is left out of the canonical URL.
    fn parameter(&self) -> &str;

    /// The supplied token, or an empty string if there is none.
    fn extract_token(&self, uri: &Uri) -> String;
}

/// Reads the first value of a query parameter (`token` by default).
#[derive(Debug)]
pub struct QueryTokenExtractor {
    parameter: String,
}

impl QueryTokenExtractor {
    pub fn new(parameter: impl Into<String>) -> Self {
        QueryTokenExtractor {
            parameter: parameter.into(),
        }
    }
}

impl Default for QueryTokenExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_PARAMETER)
    }
}

impl TokenExtractor for QueryTokenExtractor {
    fn parameter(&self) -> &str {
        &self.parameter
    }

    fn extract_token(&self, uri: &Uri) -> String {
        uri.query()
            .map(QueryParameters::parse)
            .and_then(|query| query.get(&self.parameter).map(str::to_owned))
            .unwrap_or_default()
    }
}
