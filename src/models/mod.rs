//! Data models for the weather proxy.
//!
//! Wire-facing request/response types live in `api` and `weather`; the
//! location resolution types used between services live in `location`.

pub mod api;
pub mod location;
pub mod weather;

pub use api::*;
pub use location::*;
pub use weather::*;
