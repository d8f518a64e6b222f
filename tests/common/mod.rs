//! Common test utilities for snapshot-gateway
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let server = wiremock::MockServer::start().await;
//!     let config = fixtures::origin_config(&server);
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{listing_body, mock_config, origin_config, requests_to};
