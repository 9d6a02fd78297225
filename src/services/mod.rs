//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: API request queue service

pub mod api;
