use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_FUNCTION, DEFAULT_HOST};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_function_name, parse_param, parse_positive_usize,
    parse_wait_arg,
};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Simulates users that repeatedly invoke a serverless function over HTTP, waiting a random interval between calls."
)]
pub struct SwarmArgs {
    /// Base URL of the platform API
    #[arg(
        long,
        short = 'H',
        env = "LEDGE_SWARM_HOST",
        default_value = DEFAULT_HOST
    )]
    pub host: String,

    /// Function to invoke; requests go to /invoke/<function>
    #[arg(
        long,
        short = 'f',
        env = "LEDGE_SWARM_FUNCTION",
        default_value = DEFAULT_FUNCTION,
        value_parser = parse_function_name
    )]
    pub function: String,

    /// Invocation param in 'name:value' format (repeatable or comma-separated, replaces the default n:100000)
    #[arg(
        long = "param",
        short = 'p',
        env = "LEDGE_SWARM_PARAM",
        value_delimiter = ',',
        value_parser = parse_param,
        default_value = "n:100000"
    )]
    pub params: Vec<(String, String)>,

    /// Ask the platform to run the invocation asynchronously
    #[arg(long = "async", env = "LEDGE_SWARM_ASYNC", value_parser = parse_bool_env)]
    pub invoke_async: bool,

    /// Number of simulated users
    #[arg(
        long,
        short = 'u',
        env = "LEDGE_SWARM_USERS",
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub users: PositiveUsize,

    /// Users started per second until all are running
    #[arg(
        long = "spawn-rate",
        short = 'r',
        env = "LEDGE_SWARM_SPAWN_RATE",
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub spawn_rate: PositiveUsize,

    /// How long to run (supports ms/s/m/h)
    #[arg(
        long = "run-time",
        short = 't',
        env = "LEDGE_SWARM_RUN_TIME",
        default_value = "60s",
        value_parser = parse_duration_arg
    )]
    pub run_time: Duration,

    /// Lower bound of the wait between invocations (supports ms/s/m/h)
    #[arg(
        long = "wait-min",
        env = "LEDGE_SWARM_WAIT_MIN",
        default_value = "5s",
        value_parser = parse_wait_arg
    )]
    pub wait_min: Duration,

    /// Upper bound of the wait between invocations (supports ms/s/m/h)
    #[arg(
        long = "wait-max",
        env = "LEDGE_SWARM_WAIT_MAX",
        default_value = "10s",
        value_parser = parse_wait_arg
    )]
    pub wait_max: Duration,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        env = "LEDGE_SWARM_TIMEOUT",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Connect timeout (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        env = "LEDGE_SWARM_CONNECT_TIMEOUT",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Status code counted as a successful invocation
    #[arg(
        long = "status",
        short = 's',
        env = "LEDGE_SWARM_STATUS",
        default_value = "200"
    )]
    pub expected_status_code: u16,

    /// Summary output format
    #[arg(
        long = "output-format",
        short = 'o',
        env = "LEDGE_SWARM_OUTPUT_FORMAT",
        default_value = "text",
        ignore_case = true
    )]
    pub output_format: OutputFormat,

    /// Path to config file (TOML or JSON)
    #[arg(long, short = 'c', env = "LEDGE_SWARM_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short, env = "LEDGE_SWARM_VERBOSE", value_parser = parse_bool_env)]
    pub verbose: bool,

    /// Disable colored log output (the NO_COLOR convention is honored as well)
    #[arg(
        long = "no-color",
        env = "LEDGE_SWARM_NO_COLOR",
        value_parser = parse_bool_env
    )]
    pub no_color: bool,
}
