//! Utility functions and helper modules.
//!
//! Client IP and user agent extraction, route labelling for metrics, and
//! redaction of API keys from logged URLs.

pub mod http;
pub mod redact;
pub mod route;

pub use http::*;
pub use redact::*;
pub use route::*;
