use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq)]
pub enum StartupError {
    InvalidParameter(String),
    MissingEnvironment(String),
    InvalidConfiguration(String),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for StartupError {}

/// Why a request was not let through.
///
/// Only meant for operators (logs, custom [ErrorHandler](crate::error_handler::ErrorHandler)s).
/// None of the variants carry the secret, the supplied token or the expected digest.
#[derive(Clone, Debug, PartialEq)]
pub enum DenyReason {
    MissingToken,
    MissingHost,
    InvalidHost,
    InvalidPath,
    SignatureMismatch,
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for DenyReason {}
