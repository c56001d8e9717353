//! Core library for the `ledge-swarm` CLI.
//!
//! `ledge-swarm` simulates users that repeatedly invoke a function on a
//! serverless platform (`POST /invoke/<function>`), waiting a random interval
//! between calls, and reports what the platform answered. The building blocks
//! are exposed here: argument and config handling, the simulated-user
//! machinery in [`swarm`], and metrics aggregation.
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod swarm;
