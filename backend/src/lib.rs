//! Rock-paper-scissors arena.
//!
//! Players call `GET /rock`, `/paper` or `/scissors`; a single match coordinator
//! pairs requests in arrival order, records statistics and answers both callers.

pub mod api_error;
pub mod config;
pub mod http;
pub mod middleware;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;
