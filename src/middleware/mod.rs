//! Custom middleware implementations for the API.
//!
//! Request ids, HTTP metrics and CORS headers.

pub mod cors;
pub mod metrics;
pub mod request_id;

pub use cors::*;
pub use metrics::*;
pub use request_id::*;
