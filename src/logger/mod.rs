//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Per-request access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Delayed echo backend started");
    println!("Listening on: http://{addr}");
    println!("Response delay: {}ms", config.http.delay_ms);
    println!("Access log format: {}", config.logging.access_log_format);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Routes:");
    println!("  ALL /      -> 200, echoes parsed request body after the delay");
    println!("  ALL /fail  -> 500 after the delay");
    println!("======================================\n");
}

/// Write one formatted access log line to stdout
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown(signal: &str) {
    println!("\n[Shutdown] {signal} received, stopping accept loop");
}
