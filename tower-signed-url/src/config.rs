use std::{env, fmt};

use serde::Deserialize;

use crate::{error::StartupError, scheme::Scheme, verifier::SignatureScheme};

pub const DEFAULT_SECRET_VARIABLE: &str = "SIGNED_URL_SECRET";

/// Deserializable configuration, e.g. from JSON:
///
/// ```json
/// { "secret": "s3cr3t", "token_parameter": "token", "signature_scheme": "hmac_sha256" }
/// ```
///
/// Only `secret` is required. Apply it with
/// [SignedUrlGuardBuilder::config](crate::builder::SignedUrlGuardBuilder::config).
#[derive(Clone, Default, Deserialize)]
pub struct SignedUrlConfig {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub token_parameter: Option<String>,
    #[serde(default)]
    pub signature_scheme: Option<SignatureScheme>,
    /// Treat every request as arriving with this scheme instead of
    /// looking at the connection.
    #[serde(default)]
    pub scheme: Option<Scheme>,
}

impl SignedUrlConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        SignedUrlConfig {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        serde_json::from_str(json).map_err(|e| {
            StartupError::InvalidConfiguration(format!("invalid signed url configuration: {}", e))
        })
    }

    /// Read the secret from the `SIGNED_URL_SECRET` environment variable.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_env_var(DEFAULT_SECRET_VARIABLE)
    }

    pub fn from_env_var(variable: &str) -> Result<Self, StartupError> {
        match env::var(variable) {
            Ok(secret) if !secret.is_empty() => Ok(Self::new(secret)),
            _ => Err(StartupError::MissingEnvironment(variable.to_owned())),
        }
    }
}

impl fmt::Debug for SignedUrlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedUrlConfig")
            .field("secret", &"<redacted>")
            .field("token_parameter", &self.token_parameter)
            .field("signature_scheme", &self.signature_scheme)
            .field("scheme", &self.scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json() {
        let config = SignedUrlConfig::from_json(r#"{"secret": "s3cr3t"}"#).unwrap();
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.token_parameter, None);
        assert_eq!(config.signature_scheme, None);
        assert_eq!(config.scheme, None);
    }

    #[test]
    fn test_full_json() {
        let config = SignedUrlConfig::from_json(
            r#"{"secret": "s3cr3t", "token_parameter": "sig", "signature_scheme": "hmac_sha256", "scheme": "https"}"#,
        )
        .unwrap();
        assert_eq!(config.token_parameter.as_deref(), Some("sig"));
        assert_eq!(config.signature_scheme, Some(SignatureScheme::HmacSha256));
        assert_eq!(config.scheme, Some(Scheme::Https));
    }

    #[test]
    fn test_invalid_json() {
        let result = SignedUrlConfig::from_json(r#"{"secret": 42}"#);
        assert!(matches!(
            result,
            Err(StartupError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_env() {
        let result = SignedUrlConfig::from_env_var("TOWER_SIGNED_URL_TEST_UNSET_VARIABLE");
        assert_eq!(
            result.unwrap_err(),
            StartupError::MissingEnvironment("TOWER_SIGNED_URL_TEST_UNSET_VARIABLE".to_owned())
        );
    }

    #[test]
    fn test_env() {
        env::set_var("TOWER_SIGNED_URL_TEST_SECRET", "s3cr3t");
        let config = SignedUrlConfig::from_env_var("TOWER_SIGNED_URL_TEST_SECRET").unwrap();
        assert_eq!(config.secret, "s3cr3t");
    }

    #[test]
    fn test_debug_is_redacted() {
        let config = SignedUrlConfig::new("s3cr3t");
        assert!(!format!("{:?}", config).contains("s3cr3t"));
    }
}
