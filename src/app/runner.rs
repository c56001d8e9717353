use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::args::SwarmArgs;
use crate::error::AppResult;
use crate::metrics::{Metrics, MetricsSummary, setup_metrics_collector};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::swarm::{
    InvocationRequest, InvokeTask, SwarmPlan, UserClient, WaitTime, build_http_client, parse_host,
    run_swarm,
};

/// Samples buffered between users and the collector.
const METRICS_CHANNEL_CAPACITY: usize = 4096;

/// Everything the summary needs about one finished run.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub target: String,
    pub users_started: usize,
    pub iterations: u64,
    pub metrics: MetricsSummary,
}

/// Runs the invocation swarm described by `args` on the current runtime.
///
/// # Errors
///
/// Returns an error when the wait range, host, or HTTP client settings are
/// invalid. Failed requests during the run are reported in the summary only.
pub async fn run_local(args: &SwarmArgs) -> AppResult<RunReport> {
    let wait = WaitTime::between(args.wait_min, args.wait_max)?;
    let base_url = parse_host(&args.host)?;
    let http = build_http_client(args.request_timeout, args.connect_timeout)?;
    let task = InvokeTask::new(
        &args.function,
        InvocationRequest::new(args.params.iter().cloned(), args.invoke_async),
    );

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let (metrics_tx, metrics_rx) = mpsc::channel::<Metrics>(METRICS_CHANNEL_CAPACITY);

    let started_at = Utc::now();
    let run_start = Instant::now();
    let collector = setup_metrics_collector(args.expected_status_code, run_start, metrics_rx);
    let client = UserClient::new(http, base_url, metrics_tx);
    let target = client.url_for(task.path())?.to_string();

    let plan = SwarmPlan {
        users: args.users.get(),
        spawn_rate: args.spawn_rate.get(),
        run_time: args.run_time,
        wait,
    };
    let outcome = run_swarm(&plan, Arc::new(task), client, &shutdown_tx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::debug!("Signal handler task ended abnormally: {}", err);
    }
    let report = collector.await?;

    Ok(RunReport {
        started_at,
        target,
        users_started: outcome.users_started,
        iterations: outcome.iterations,
        metrics: report.summary,
    })
}
