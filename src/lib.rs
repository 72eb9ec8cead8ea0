//! # Opening Hours
//!
//! Decides whether a business location is open right now from a weekly
//! schedule written in the location's own wall-clock time, and serves the
//! answer over a small read-only HTTP API.

/// Environment-driven settings
pub mod config;
/// The locations file and the schedules it holds
pub mod locations;
/// hyper service exposing the evaluator
pub mod server;
/// Schedules, local times and the business-hours evaluator
pub mod timing;
