use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{self, run_local};
use crate::args::SwarmArgs;
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};

/// Binary entry point: parse flags, set up logging, and run the swarm to completion.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the runtime cannot
/// be built, or the summary cannot be written.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<(SwarmArgs, ArgMatches)> {
    let matches = SwarmArgs::command().get_matches();
    let args = SwarmArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(mut args: SwarmArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    tracing::debug!("Resolved arguments: {:?}", args);
    let report = run_local(&args).await?;
    app::summary::print_summary(&report, args.output_format)
}
