use std::fmt;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::{descriptor::RequestDescriptor, error::StartupError, secret::Secret};

type HmacSha256 = Hmac<Sha256>;

/// How the digest over the canonical URL is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// `hex(sha256(canonical_url))`.
    ///
    /// Compatible with tokens issued by existing signers, which hash the
    /// canonical URL alone. The secret does **not** take part in the digest,
    /// so anyone who knows the canonicalization rules can produce a token.
    #[default]
    Sha256,
    /// `hex(hmac_sha256(secret, canonical_url))`.
    HmacSha256,
}

#[derive(Clone)]
enum Digester {
    Sha256,
    HmacSha256(HmacSha256),
}

/// Recomputes the digest of a [RequestDescriptor] and compares it
/// with a supplied token.
///
/// Holds no mutable state and can be shared freely between threads.
#[derive(Clone)]
pub struct SignatureVerifier {
    scheme: SignatureScheme,
    digester: Digester,
}

impl SignatureVerifier {
    pub fn new(secret: &Secret, scheme: SignatureScheme) -> Result<Self, StartupError> {
        let digester = match scheme {
            SignatureScheme::Sha256 => Digester::Sha256,
            SignatureScheme::HmacSha256 => Digester::HmacSha256(
                HmacSha256::new_from_slice(secret.expose()).map_err(|e| {
                    StartupError::InvalidParameter(format!("unusable secret: {}", e))
                })?,
            ),
        };
        Ok(SignatureVerifier { scheme, digester })
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Lowercase hex digest of a canonical URL string.
    pub fn digest(&self, canonical_url: &str) -> String {
        match &self.digester {
            Digester::Sha256 => hex::encode(Sha256::digest(canonical_url.as_bytes())),
            Digester::HmacSha256(mac) => {
                let mut mac = mac.clone();
                mac.update(canonical_url.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }

    /// The token a trusted signer would attach to `descriptor`.
    pub fn sign(&self, descriptor: &RequestDescriptor) -> String {
        self.digest(&descriptor.canonical_url())
    }

    /// `true` only if `token` is the digest of the canonical form of `descriptor`.
    ///
    /// The comparison ignores ASCII case and runs in constant time.
    /// An empty token is rejected without hashing anything.
    pub fn verify(&self, descriptor: &RequestDescriptor, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let expected = self.sign(descriptor);
        let supplied = token.to_ascii_lowercase();
        expected.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("scheme", &self.scheme)
            .finish()
    }
}
