//! Subway line server.
//!
//! Maintains each subway line as a chain of sections between stations,
//! and serves stations, lines and section edits over HTTP.

pub mod config;
pub mod domain;
pub mod store;
pub mod web;
