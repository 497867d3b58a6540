use core::fmt;
use std::sync::Arc;

use http::Request;
use log::debug;

use crate::{
    descriptor::RequestDescriptor,
    error::DenyReason,
    error_handler::{DefaultErrorHandler, ErrorHandler},
    layer::SignedUrlLayer,
    scheme::SchemeResolver,
    token_extract::TokenExtractor,
    verifier::SignatureVerifier,
};

/// SignedUrlGuard
///
/// This is the actual middleware.
/// May be turned into a tower layer by calling [into_layer](SignedUrlGuard::into_layer).
#[derive(Clone)]
pub struct SignedUrlGuard {
    verifier: Arc<SignatureVerifier>,
    token_extractor: Arc<dyn TokenExtractor>,
    scheme_resolver: Arc<dyn SchemeResolver>,
}

impl SignedUrlGuard {
    pub(crate) fn new(
        verifier: SignatureVerifier,
        token_extractor: Arc<dyn TokenExtractor>,
        scheme_resolver: Arc<dyn SchemeResolver>,
    ) -> Self {
        SignedUrlGuard {
            verifier: Arc::new(verifier),
            token_extractor,
            scheme_resolver,
        }
    }

    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    /// Build the [RequestDescriptor] that the token of `request` is checked against.
    pub fn describe<Body>(&self, request: &Request<Body>) -> Result<RequestDescriptor, DenyReason> {
        let scheme = self.scheme_resolver.resolve_scheme(request.extensions());
        RequestDescriptor::from_request_parts(
            scheme,
            request.uri(),
            request.headers(),
            self.token_extractor.parameter(),
        )
    }

    /// Check `request` without consuming it.
    pub fn check<Body>(&self, request: &Request<Body>) -> Result<(), DenyReason> {
        let token = self.token_extractor.extract_token(request.uri());
        if token.is_empty() {
            return Err(DenyReason::MissingToken);
        }
        let descriptor = self.describe(request)?;
        if self.verifier.verify(&descriptor, &token) {
            Ok(())
        } else {
            Err(DenyReason::SignatureMismatch)
        }
    }

    pub fn is_authorized<Body>(&self, request: &Request<Body>) -> bool {
        self.check(request).is_ok()
    }

    pub(crate) fn authorize_request<Body>(
        &self,
        request: Request<Body>,
    ) -> Result<Request<Body>, DenyReason> {
        match self.check(&request) {
            Ok(()) => {
                debug!("Signed URL accepted ({})", request.uri().path());
                Ok(request)
            }
            Err(e) => {
                debug!("Signed URL rejected ({}): {}", request.uri().path(), e);
                Err(e)
            }
        }
    }
}

impl fmt::Debug for SignedUrlGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedUrlGuard")
            .field("verifier", &self.verifier)
            .field("token_parameter", &self.token_extractor.parameter())
            .finish()
    }
}

impl SignedUrlGuard {
    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html).
    pub fn into_layer<ResBody>(&self) -> SignedUrlLayer<ResBody>
    where
        ResBody: Default,
    {
        SignedUrlLayer::new(self.clone(), Arc::new(DefaultErrorHandler))
    }

    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html) that uses a custom [ErrorHandler] implementation.
    pub fn into_layer_with_error_handler<ResBody>(
        &self,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> SignedUrlLayer<ResBody> {
        SignedUrlLayer::new(self.clone(), error_handler)
    }
}
