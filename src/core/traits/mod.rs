//! Core traits module
//!
//! Contains the abstract interfaces the gateway implementations and the
//! access collaborators are written against

pub mod gateway;

pub use gateway::*;
