//! Integration tests
//!
//! These tests use wiremock to serve a small Doxygen site and exercise
//! fetching and the full harvest cycle end-to-end.

mod common;
mod fetch_tests;
mod harvest_tests;
