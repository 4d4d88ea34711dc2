//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Routes by exact path with any
//! HTTP method accepted: `/` is the delayed echo, `/fail` is the delayed
//! failure, everything else is an immediate 404.

use crate::config::Config;
use crate::handler::echo;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    remote_addr: SocketAddr,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = new_log_entry(&req, remote_addr);

    // Owned copy so the request can be consumed inside the match
    let path = entry.path.clone();
    let response = match path.as_str() {
        "/" => match check_body_size(&req, config.http.max_body_size) {
            Some(resp) => resp,
            None => echo::handle_echo(req, &config).await,
        },
        "/fail" => echo::handle_failure(req, &config).await,
        // No other routes exist; no delay on the catch-all
        _ => http::build_404_response(),
    };

    if config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Capture request-side log fields before the request is consumed
fn new_log_entry(req: &Request<Incoming>, remote_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.referer = header_str(req, "referer");
    entry.user_agent = header_str(req, "user-agent");
    entry
}

fn header_str(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

/// Validate Content-Length header and return 413 if exceeded.
///
/// This is a pre-check on the declared length; the actual read in the echo
/// handler is capped as well, for clients that lie or stream chunked.
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
