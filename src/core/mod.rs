//! Core functionality for the snapshot gateway
//!
//! This module contains the value types, link signing, gateway selection and
//! the read-only operations built on top of the selected gateway.

pub mod access;
pub mod cache;
pub mod facade;
pub mod registry;
pub mod signing;
pub mod traits;
pub mod types;
