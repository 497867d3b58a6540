use std::sync::Arc;

use log::{info, warn};

use crate::{
    config::SignedUrlConfig,
    error::StartupError,
    scheme::{ConnectionSchemeResolver, FixedSchemeResolver, SchemeResolver},
    secret::Secret,
    server::SignedUrlGuard,
    token_extract::{QueryTokenExtractor, TokenExtractor},
    verifier::{SignatureScheme, SignatureVerifier},
};

pub struct SignedUrlGuardBuilder {
    secret: Option<String>,
    signature_scheme: SignatureScheme,
    token_extractor: Option<Arc<dyn TokenExtractor>>,
    scheme_resolver: Option<Arc<dyn SchemeResolver>>,
}

impl SignedUrlGuard {
    pub fn builder() -> SignedUrlGuardBuilder {
        SignedUrlGuardBuilder::new()
    }
}

impl SignedUrlGuardBuilder {
    fn new() -> Self {
        SignedUrlGuardBuilder {
            secret: None,
            signature_scheme: SignatureScheme::default(),
            token_extractor: None,
            scheme_resolver: None,
        }
    }

    /// Set the shared secret. Required, and must not be empty.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set how the digest is computed.
    ///
    /// Default value is [SignatureScheme::Sha256], which matches tokens
    /// issued by existing signers but does not mix the secret into the digest.
    pub fn signature_scheme(mut self, signature_scheme: SignatureScheme) -> Self {
        self.signature_scheme = signature_scheme;
        self
    }

    /// Read the token from another query parameter than `token`.
    pub fn token_parameter(self, parameter: impl Into<String>) -> Self {
        self.token_extractor(Arc::new(QueryTokenExtractor::new(parameter)))
    }

    pub fn token_extractor(mut self, token_extractor: Arc<dyn TokenExtractor>) -> Self {
        self.token_extractor = Some(token_extractor);
        self
    }

    /// Set how the scheme of the canonical URL is decided.
    ///
    /// Default is [ConnectionSchemeResolver], which looks for a
    /// [SecureConnection](crate::scheme::SecureConnection) request extension.
    pub fn scheme_resolver(mut self, scheme_resolver: Arc<dyn SchemeResolver>) -> Self {
        self.scheme_resolver = Some(scheme_resolver);
        self
    }

    /// Apply every property set in `config`.
    pub fn config(mut self, config: SignedUrlConfig) -> Self {
        self = self.secret(config.secret);
        if let Some(parameter) = config.token_parameter {
            self = self.token_parameter(parameter);
        }
        if let Some(signature_scheme) = config.signature_scheme {
            self = self.signature_scheme(signature_scheme);
        }
        if let Some(scheme) = config.scheme {
            self = self.scheme_resolver(Arc::new(FixedSchemeResolver(scheme)));
        }
        self
    }

    /// Construct a SignedUrlGuard.
    ///
    /// Fails if no secret, or an empty one, has been provided.
    pub fn build(self) -> Result<SignedUrlGuard, StartupError> {
        let secret = Secret::new(self.secret.unwrap_or_default())?;
        let verifier = SignatureVerifier::new(&secret, self.signature_scheme)?;
        match self.signature_scheme {
            SignatureScheme::Sha256 => warn!(
                "Signed URL tokens are plain SHA-256 digests of the URL, the secret is not part of them"
            ),
            SignatureScheme::HmacSha256 => info!("Signed URL tokens are HMAC-SHA256 digests"),
        }
        Ok(SignedUrlGuard::new(
            verifier,
            self.token_extractor
                .unwrap_or_else(|| Arc::new(QueryTokenExtractor::default())),
            self.scheme_resolver
                .unwrap_or_else(|| Arc::new(ConnectionSchemeResolver)),
        ))
    }
}

impl Default for SignedUrlGuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
