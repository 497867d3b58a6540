use std::fmt;

use crate::error::StartupError;

/// The shared secret.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Result<Self, StartupError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(StartupError::InvalidParameter(
                "secret is required".to_owned(),
            ));
        }
        Ok(Secret(secret))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
