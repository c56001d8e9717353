//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::SwarmArgs;
pub use types::{OutputFormat, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_FUNCTION, DEFAULT_HOST, DEFAULT_PARAM_NAME, DEFAULT_PARAM_VALUE, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::{parse_duration_arg, parse_function_name, parse_param, parse_wait_arg};
