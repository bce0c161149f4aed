//! Type definitions shared by the API surface
//!
//! - `response` - Health check responses

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth};
