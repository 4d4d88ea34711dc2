//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from
//! routing and the server loop.

pub mod body;
pub mod response;

// Re-export commonly used functions
pub use body::parse_body;
pub use response::{
    build_400_response, build_404_response, build_413_response, build_echo_response,
    build_failure_response,
};
