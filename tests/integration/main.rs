//! Integration tests for Price-Scout
//!
//! The HTTP surface is exercised through the axum router without opening
//! sockets, with an in-memory fetch adapter standing in for the web. The
//! discovery stage is also run against wiremock over real HTTP.

mod api_tests;
mod discovery_tests;
mod support;
