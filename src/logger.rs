use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable checked before `RUST_LOG` for the log filter.
pub const LOG_ENV_VAR: &str = "LEDGE_SWARM_LOG";
/// Cross-tool convention; any non-empty value disables colors.
const NO_COLOR_ENV_VAR: &str = "NO_COLOR";

fn ansi_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os(NO_COLOR_ENV_VAR).is_none_or(|value| value.is_empty())
}

pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var(LOG_ENV_VAR)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(ansi_enabled(no_color))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
