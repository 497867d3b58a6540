use http::{Response, StatusCode};

use crate::error::DenyReason;

/// Turns a rejected request into a response.
pub trait ErrorHandler<B>: Send + Sync {
    fn map_error(&self, error: DenyReason) -> Response<B>;
}

/// Responds `403 Forbidden` with an empty body, whatever the reason.
///
/// Clients learn nothing about why a token was refused.
pub struct DefaultErrorHandler;

impl<B> ErrorHandler<B> for DefaultErrorHandler
where
    B: Default,
{
    fn map_error(&self, _error: DenyReason) -> Response<B> {
        let mut response = Response::new(B::default());
        *response.status_mut() = StatusCode::FORBIDDEN;
        response
    }
}
