//! HTTP surface for the SportsBridge phone authentication service
//!
//! Library exports for the binary and for integration tests.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
