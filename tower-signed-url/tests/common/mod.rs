use bytes::Bytes;
use http::{header::HOST, Request, Response, StatusCode};
use http_body_util::Full;
use tower::BoxError;
use tower_signed_url::{
    descriptor::RequestDescriptor,
    query::QueryParameters,
    scheme::{Scheme, SecureConnection},
    secret::Secret,
    verifier::{SignatureScheme, SignatureVerifier},
};

pub const SECRET: &str = "s3cr3t";

/// Signs URLs the way a trusted issuer would.
pub struct Signer {
    verifier: SignatureVerifier,
}

impl Signer {
    pub fn new(secret: &str, scheme: SignatureScheme) -> Self {
        Signer {
            verifier: SignatureVerifier::new(&Secret::new(secret).unwrap(), scheme).unwrap(),
        }
    }

    pub fn sign(&self, scheme: Scheme, host: &str, path: &str, query: &str) -> String {
        self.verifier.sign(&RequestDescriptor::new(
            scheme,
            host,
            path,
            QueryParameters::parse(query),
        ))
    }
}

pub struct RequestSpec<'a> {
    pub host: Option<&'a str>,
    pub uri: &'a str,
    pub secure: bool,
}

pub fn request(spec: RequestSpec<'_>) -> Request<Full<Bytes>> {
    let mut builder = Request::get(spec.uri);
    if let Some(host) = spec.host {
        builder = builder.header(HOST, host);
    }
    if spec.secure {
        builder = builder.extension(SecureConnection);
    }
    builder.body(Full::<Bytes>::default()).unwrap()
}

pub fn secure(host: &str, uri: &str) -> Request<Full<Bytes>> {
    request(RequestSpec {
        host: Some(host),
        uri,
        secure: true,
    })
}

pub fn plain(host: &str, uri: &str) -> Request<Full<Bytes>> {
    request(RequestSpec {
        host: Some(host),
        uri,
        secure: false,
    })
}

pub async fn echo(req: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, BoxError> {
    let b = req.into_body();
    let mut response = Response::new(b);
    *response.status_mut() = StatusCode::OK;
    Ok(response)
}
