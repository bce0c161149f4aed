//! Tests for the phone authentication service

mod service_tests;
