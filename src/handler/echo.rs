//! Delayed echo and failure handlers
//!
//! Both designed routes share one behavior: read the body, wait the
//! configured delay on the tokio timer, then respond. The wait starts only
//! after the body has been fully received, and it never blocks a worker
//! thread, so concurrent requests all complete in one delay window.

use crate::config::Config;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};

/// Echo route: parse the body, wait, respond 200 with the parsed value
/// serialized back as JSON.
pub async fn handle_echo(req: Request<Incoming>, config: &Config) -> Response<Full<Bytes>> {
    let is_head = req.method() == Method::HEAD;
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = match collect_body(req, config.http.max_body_size).await {
        Ok(bytes) => bytes,
        Err(resp) => return resp,
    };

    let parsed = match http::parse_body(content_type.as_deref(), &body) {
        Ok(value) => value,
        Err(e) => {
            logger::log_warning(&format!("Unparseable request body: {e}"));
            // Parse failures respond immediately; only well-formed requests
            // exercise the delay
            return http::build_400_response(&format!("invalid JSON body: {e}"));
        }
    };

    tokio::time::sleep(config.delay()).await;

    http::build_echo_response(&parsed, &config.http.server_name, is_head)
}

/// Failure route: drain the body, wait, respond 500 unconditionally.
pub async fn handle_failure(req: Request<Incoming>, config: &Config) -> Response<Full<Bytes>> {
    // Drain so keep-alive connections stay usable; content is ignored
    if let Err(e) = req.into_body().collect().await {
        logger::log_warning(&format!("Failed to drain request body: {e}"));
    }

    tokio::time::sleep(config.delay()).await;

    http::build_failure_response(&config.http.server_name)
}

/// Collect the request body with a hard size cap.
///
/// The cap backs up the Content-Length pre-check in the router and is the
/// only guard for chunked bodies, which declare no length up front.
async fn collect_body(
    req: Request<Incoming>,
    max_body_size: u64,
) -> Result<Bytes, Response<Full<Bytes>>> {
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<http_body_util::LengthLimitError>().is_some() => {
            logger::log_warning(&format!(
                "Request body exceeded {max_body_size} bytes during read"
            ));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response("failed to read request body"))
        }
    }
}
