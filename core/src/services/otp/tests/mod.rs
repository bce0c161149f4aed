//! Tests for the one-time code module
