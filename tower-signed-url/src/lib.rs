#![doc = include_str!("../README.md")]

/// Builder used to construct a [SignedUrlGuard](crate::server::SignedUrlGuard) instance.
///
/// # Example
///
/// ```
/// use tower_signed_url::server::SignedUrlGuard;
/// use tower_signed_url::verifier::SignatureScheme;
///
/// let guard = SignedUrlGuard::builder()
///     .secret("s3cr3t")
///     .signature_scheme(SignatureScheme::HmacSha256)
///     .build()
///     .expect("Failed to build SignedUrlGuard");
/// ```
pub mod builder;

/// [SignedUrlConfig](crate::config::SignedUrlConfig) holds the settings
/// of a guard in a form that can be deserialized or read from the environment.
pub mod config;

/// [RequestDescriptor](crate::descriptor::RequestDescriptor) is the part of a
/// request that a token is computed over, and its canonical URL form.
pub mod descriptor;

pub mod error;

/// [ErrorHandler](crate::error_handler::ErrorHandler) decides what response
/// a rejected request gets. By default, `403 Forbidden` with an empty body.
pub mod error_handler;

/// The actual tower middleware
///
/// Contains implementations of [Service](https://docs.rs/tower/latest/tower/trait.Service.html)
/// and [Layer](https://docs.rs/tower/latest/tower/trait.Layer.html)
/// from the tower library.
///
/// You shouldn't need to interact with these implementations, more than
/// calling [SignedUrlGuard::into_layer()](crate::server::SignedUrlGuard::into_layer).
pub mod layer;

pub mod query;

/// [SchemeResolver](crate::scheme::SchemeResolver) decides whether the
/// canonical URL starts with `http` or `https`.
pub mod scheme;

pub mod secret;

/// [SignedUrlGuard](crate::server::SignedUrlGuard) is
/// what underpins the tower middleware, and actually decides
/// whether a request carries a valid token.
///
/// It holds no mutable state. Clone it freely, or keep a single
/// instance and hand out layers via [into_layer](crate::server::SignedUrlGuard::into_layer).
pub mod server;

/// [TokenExtractor](crate::token_extract::TokenExtractor) pulls the
/// supplied token out of a request.
pub mod token_extract;

/// [SignatureVerifier](crate::verifier::SignatureVerifier) computes and
/// compares digests of canonical URLs.
///
/// May also be used by a trusted signer to produce tokens:
///
/// ```
/// use tower_signed_url::descriptor::RequestDescriptor;
/// use tower_signed_url::query::QueryParameters;
/// use tower_signed_url::scheme::Scheme;
/// use tower_signed_url::secret::Secret;
/// use tower_signed_url::verifier::{SignatureScheme, SignatureVerifier};
///
/// let verifier = SignatureVerifier::new(
///     &Secret::new("s3cr3t").unwrap(),
///     SignatureScheme::Sha256,
/// ).unwrap();
/// let descriptor = RequestDescriptor::new(
///     Scheme::Https,
///     "example.com",
///     "/files/report.pdf",
///     QueryParameters::new(),
/// );
/// let token = verifier.sign(&descriptor);
/// assert!(verifier.verify(&descriptor, &token));
/// ```
pub mod verifier;
