use http::{Request, Response};
use pin_project::pin_project;

use std::{
    future::Future,
    mem,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

use crate::{error_handler::ErrorHandler, server::SignedUrlGuard};

pub struct SignedUrlLayer<ResBody> {
    guard: SignedUrlGuard,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<ResBody> Clone for SignedUrlLayer<ResBody> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<S, ResBody> Layer<S> for SignedUrlLayer<ResBody> {
    type Service = SignedUrlService<S, ResBody>;

    fn layer(&self, inner: S) -> Self::Service {
        SignedUrlService {
            inner,
            guard: self.guard.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<ResBody> SignedUrlLayer<ResBody> {
    pub(crate) fn new(guard: SignedUrlGuard, error_handler: Arc<dyn ErrorHandler<ResBody>>) -> Self {
        SignedUrlLayer {
            guard,
            error_handler,
        }
    }
}

/// Checks the token of each request before handing it to `inner`.
///
/// The check is synchronous: a rejected request is answered by the
/// [ErrorHandler] right away and `inner` never sees it.
pub struct SignedUrlService<S, ResBody> {
    inner: S,
    guard: SignedUrlGuard,
    error_handler: Arc<dyn ErrorHandler<ResBody>>,
}

impl<S, ResBody> Clone for SignedUrlService<S, ResBody>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            guard: self.guard.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SignedUrlService<S, ResBody>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        match self.guard.authorize_request(request) {
            Ok(request) => {
                // The clone is not ready, swap so the one polled by `poll_ready` serves this call.
                let clone = self.inner.clone();
                let mut inner = mem::replace(&mut self.inner, clone);
                ResponseFuture::Authorized {
                    fut: inner.call(request),
                }
            }
            Err(error) => ResponseFuture::Denied {
                response: Some(self.error_handler.map_error(error)),
            },
        }
    }
}

#[pin_project(project = ResponseFutureProj)]
pub enum ResponseFuture<F, ResBody> {
    Denied {
        response: Option<Response<ResBody>>,
    },
    Authorized {
        #[pin]
        fut: F,
    },
}

impl<F, ResBody, E> Future for ResponseFuture<F, ResBody>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            ResponseFutureProj::Denied { response } => Poll::Ready(Ok(response
                .take()
                .expect("ResponseFuture polled after completion"))),
            ResponseFutureProj::Authorized { fut } => fut.poll(cx),
        }
    }
}
