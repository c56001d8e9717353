use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, SwarmArgs, parse_function_name};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line or through environment variables win over
/// the config file; the file only replaces clap defaults.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut SwarmArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "host")
        && let Some(host) = config.host.clone()
    {
        args.host = host;
    }

    if !is_explicit(matches, "function")
        && let Some(function) = config.function.as_deref()
    {
        args.function = parse_function_name(function).map_err(|err| invalid("function", err))?;
    }

    if !is_explicit(matches, "params")
        && let Some(params) = config.params.as_ref()
    {
        if params.keys().any(|name| name.trim().is_empty()) {
            return Err(AppError::config(ConfigError::EmptyParamKey));
        }
        args.params = params
            .iter()
            .map(|(name, value)| (name.trim().to_owned(), value.clone()))
            .collect();
    }

    if !is_explicit(matches, "invoke_async")
        && let Some(invoke_async) = config.invoke_async
    {
        args.invoke_async = invoke_async;
    }

    if !is_explicit(matches, "users")
        && let Some(users) = config.users
    {
        args.users = ensure_positive_usize(users, "users")?;
    }

    if !is_explicit(matches, "spawn_rate")
        && let Some(spawn_rate) = config.spawn_rate
    {
        args.spawn_rate = ensure_positive_usize(spawn_rate, "spawn_rate")?;
    }

    if !is_explicit(matches, "run_time")
        && let Some(run_time) = config.run_time.as_ref()
    {
        args.run_time = run_time
            .to_duration()
            .map_err(|err| invalid("run_time", err))?;
    }

    if !is_explicit(matches, "wait_min")
        && let Some(wait_min) = config.wait_min.as_ref()
    {
        args.wait_min = wait_min.to_wait().map_err(|err| invalid("wait_min", err))?;
    }

    if !is_explicit(matches, "wait_max")
        && let Some(wait_max) = config.wait_max.as_ref()
    {
        args.wait_max = wait_max.to_wait().map_err(|err| invalid("wait_max", err))?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration().map_err(|err| invalid("timeout", err))?;
    }

    if !is_explicit(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout
            .to_duration()
            .map_err(|err| invalid("connect_timeout", err))?;
    }

    if !is_explicit(matches, "expected_status_code")
        && let Some(status) = config.status
    {
        args.expected_status_code = status;
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| invalid(field, err))
}

fn invalid(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
