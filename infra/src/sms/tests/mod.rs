//! Unit tests for SMS module
