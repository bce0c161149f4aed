//! # SportsBridge Core
//!
//! Core business logic and domain layer for the SportsBridge backend.
//! This crate contains domain entities, the one-time code session store,
//! the phone authentication flow, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
