//! Simulated users and the invocation task they run.
//!
//! A run is a set of independent users, each looping over
//! run task → random wait → run task until the deadline or a shutdown
//! broadcast. Request failures never end a user; they only show up as
//! metrics samples.
mod client;
mod payload;
mod runner;
mod task;
mod user;
mod wait;

#[cfg(test)]
mod test_support;

pub use client::{UserClient, build_http_client, parse_host};
pub use payload::InvocationRequest;
pub use runner::{SwarmOutcome, SwarmPlan, run_swarm};
pub use task::{InvokeTask, Task};
pub use user::run_user;
pub use wait::WaitTime;
