//! HTTP response building module
//!
//! Provides builders for every response shape the server emits, decoupled
//! from routing and body handling.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the 200 echo response carrying the parsed request body as JSON
pub fn build_echo_response(
    body: &serde_json::Value,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = body.to_string();
    let content_length = json.len();
    let payload = if is_head { Bytes::new() } else { Bytes::from(json) };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::from("{}")))
        })
}

/// Build the unconditional 500 response for the failure route. The body is
/// intentionally empty; clients under test only look at the status.
pub fn build_failure_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Length", 0)
        .header("Server", server_name)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 Bad Request response with a JSON error body
pub fn build_400_response(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(400)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("Bad Request")))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_echo_response_serializes_body() {
        let resp = build_echo_response(&json!({"a": 1}), "slowpoke/0.1", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Server"], "slowpoke/0.1");
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn test_echo_response_head_keeps_content_length() {
        let resp = build_echo_response(&json!({"a": 1}), "slowpoke/0.1", true);
        assert_eq!(resp.status(), 200);
        // HEAD gets the same headers but no payload
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn test_failure_response_has_empty_body() {
        let resp = build_failure_response("slowpoke/0.1");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers()["Content-Length"], "0");
    }

    #[test]
    fn test_400_response_is_json() {
        let resp = build_400_response("invalid JSON body");
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
    }

    #[test]
    fn test_404_response() {
        assert_eq!(build_404_response().status(), 404);
    }
}
