//! Integration tests for snapshot-gateway
//!
//! These tests drive the gateways through their public API, using a wiremock
//! server as the origin.

pub mod config_tests;
pub mod end_to_end_tests;
pub mod production_gateway_tests;
pub mod registry_tests;
