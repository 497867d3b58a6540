use http::{header::HOST, Request};
use tower_signed_url::{
    scheme::SecureConnection, server::SignedUrlGuard, verifier::SignatureScheme,
};

fn guards() -> Vec<SignedUrlGuard> {
    [SignatureScheme::Sha256, SignatureScheme::HmacSha256]
        .into_iter()
        .map(|scheme| {
            SignedUrlGuard::builder()
                .secret("s3cr3t")
                .signature_scheme(scheme)
                .build()
                .unwrap()
        })
        .collect()
}

fn request(host: &str, uri: &str, secure: bool) -> Request<()> {
    let mut request = Request::get(uri).header(HOST, host).body(()).unwrap();
    if secure {
        request.extensions_mut().insert(SecureConnection);
    }
    request
}

fn with_token(uri: &str, token: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", uri, separator, token)
}

#[test]
fn signed_requests_round_trip() {
    let cases = [
        ("example.com", "/files/report.pdf", true),
        ("example.com:8443", "/files/report.pdf?download=1", true),
        ("cdn.example.com", "/a%20b/c.txt?x=%2F&y=1&x=2", false),
        ("example.com", "/", false),
        ("example.com", "/files/report.pdf?flag", true),
    ];
    for guard in guards() {
        for (host, uri, secure) in cases {
            let unsigned = request(host, uri, secure);
            let token = guard
                .verifier()
                .sign(&guard.describe(&unsigned).unwrap());
            assert_eq!(token.len(), 64);

            let signed = request(host, &with_token(uri, &token), secure);
            assert!(guard.is_authorized(&signed), "{} {}", host, uri);

            let other_scheme = request(host, &with_token(uri, &token), !secure);
            assert!(!guard.is_authorized(&other_scheme), "{} {}", host, uri);

            let other_host = request("other.example.com", &with_token(uri, &token), secure);
            assert!(!guard.is_authorized(&other_host), "{} {}", host, uri);
        }
    }
}

#[test]
fn added_parameter_invalidates_token() {
    for guard in guards() {
        let unsigned = request("example.com", "/files/report.pdf?a=1", true);
        let token = guard
            .verifier()
            .sign(&guard.describe(&unsigned).unwrap());
        let tampered = request(
            "example.com",
            &format!("/files/report.pdf?a=1&a=2&token={}", token),
            true,
        );
        assert!(!guard.is_authorized(&tampered));
    }
}

#[test]
fn token_appearing_twice_is_removed_entirely() {
    for guard in guards() {
        let unsigned = request("example.com", "/files/report.pdf", true);
        let token = guard
            .verifier()
            .sign(&guard.describe(&unsigned).unwrap());
        let signed = request(
            "example.com",
            &format!("/files/report.pdf?token={}&token=ignored", token),
            true,
        );
        assert!(guard.is_authorized(&signed));
    }
}

#[test]
fn concrete_report_scenario() {
    let guard = SignedUrlGuard::builder().secret("s3cr3t").build().unwrap();
    let expected = "2a4efbe13d20d63d5581b7311f03f26eb2070fd64ed8dce8e727375235abb11a";
    let uri = |token: &str| format!("/files/report.pdf?token={}", token);

    assert!(guard.is_authorized(&request("example.com", &uri(expected), true)));
    assert!(!guard.is_authorized(&request("example.com", &uri(""), true)));
    assert!(!guard.is_authorized(&request(
        "example.com",
        &uri(&expected.replace('2', "3").to_ascii_uppercase()),
        true
    )));
    assert!(!guard.is_authorized(&request("example.com", &uri(expected), false)));
}

#[test]
fn accepts_tokens_for_non_utf8_query_values() {
    // sha256("http://example.com/dl?a=%FF")
    let token = "697f6bb26da50829fb4a58be26ffe9c3356910ef2d333044c112eaf72aa4e61f";
    let guard = SignedUrlGuard::builder().secret("s3cr3t").build().unwrap();

    let signed = request("example.com", &format!("/dl?a=%FF&token={}", token), false);
    assert!(guard.is_authorized(&signed));

    // sha256("http://example.com/dl")
    let token = "b12f56ea6f9466c1ee0637ffe6bed21b6e10ffe8df5d438d270f6c9b49e1044a";
    let extended = request("example.com", &format!("/dl?x=%FF&token={}", token), false);
    assert!(!guard.is_authorized(&extended));
}

#[test]
fn accepts_tokens_for_re_escaped_paths() {
    // sha256("http://example.com/a%7Bb%7D")
    let token = "32d46206eed5d747b7761d632db9bc71134312872e17018e12678cfa0feab652";
    let guard = SignedUrlGuard::builder().secret("s3cr3t").build().unwrap();

    let raw = request("example.com", &format!("/a{{b}}?token={}", token), false);
    assert!(guard.is_authorized(&raw));

    let escaped = request("example.com", &format!("/a%7Bb%7D?token={}", token), false);
    assert!(guard.is_authorized(&escaped));
}
