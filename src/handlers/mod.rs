//! HTTP request handlers for API endpoints.
//!
//! The weather endpoint, operational endpoints, and the app factory that
//! wires them together.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;
pub mod weather;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
pub use weather::*;
