use std::collections::BTreeMap;

use serde::Serialize;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::MetricsSummary;

use super::RunReport;

pub(crate) struct SummaryStats {
    pub(crate) success_rate_x100: u64,
    pub(crate) avg_rps_x100: u64,
}

pub(crate) fn compute_summary_stats(summary: &MetricsSummary) -> SummaryStats {
    let duration_ms = summary.duration.as_millis().max(1);
    let total = summary.total_requests;

    let success_rate_x100 = u128::from(summary.successful_requests)
        .saturating_mul(10_000)
        .checked_div(u128::from(total))
        .map_or(0, |scaled| u64::try_from(scaled).unwrap_or(u64::MAX));

    let avg_rps_x100 = u128::from(total)
        .saturating_mul(100_000)
        .checked_div(duration_ms)
        .map_or(0, |scaled| u64::try_from(scaled).unwrap_or(u64::MAX));

    SummaryStats {
        success_rate_x100,
        avg_rps_x100,
    }
}

pub(crate) fn summary_lines(report: &RunReport) -> Vec<String> {
    let summary = &report.metrics;
    let stats = compute_summary_stats(summary);

    let mut lines = vec![
        format!("Target: POST {}", report.target),
        format!(
            "Started: {}",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("Duration: {}s", summary.duration.as_secs()),
        format!("Users: {}", report.users_started),
        format!("Iterations: {}", report.iterations),
        format!("Total Requests: {}", summary.total_requests),
        format!(
            "Successful: {} ({}.{:02}%)",
            summary.successful_requests,
            stats.success_rate_x100 / 100,
            stats.success_rate_x100 % 100
        ),
        format!("Errors: {}", summary.error_requests),
        format!("Timeouts: {}", summary.timeout_requests),
        format!("Transport Errors: {}", summary.transport_errors),
        format!("Non-Expected Status: {}", summary.non_expected_status),
        format!("Avg Latency: {}ms", summary.avg_latency_ms),
        format!(
            "Min/Max Latency: {}ms / {}ms",
            summary.min_latency_ms, summary.max_latency_ms
        ),
        format!(
            "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
            summary.p50_latency_ms, summary.p90_latency_ms, summary.p99_latency_ms
        ),
        format!(
            "Avg RPS: {}.{:02}",
            stats.avg_rps_x100 / 100,
            stats.avg_rps_x100 % 100
        ),
    ];

    if !summary.status_counts.is_empty() {
        let statuses = summary
            .status_counts
            .iter()
            .map(|(status, count)| format!("{}={}", status, count))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Status Codes: {}", statuses));
    }

    if !summary.request_counts.is_empty() {
        let requests = summary
            .request_counts
            .iter()
            .map(|(name, count)| format!("{}={}", name, count))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Requests: {}", requests));
    }

    lines
}

#[derive(Serialize)]
struct JsonSummary<'report> {
    started_at: String,
    target: &'report str,
    duration_ms: u64,
    users: usize,
    iterations: u64,
    total_requests: u64,
    successful_requests: u64,
    error_requests: u64,
    timeout_requests: u64,
    transport_errors: u64,
    non_expected_status: u64,
    success_rate_x100: u64,
    avg_rps_x100: u64,
    min_latency_ms: u64,
    max_latency_ms: u64,
    avg_latency_ms: u64,
    p50_latency_ms: u64,
    p90_latency_ms: u64,
    p99_latency_ms: u64,
    status_counts: BTreeMap<String, u64>,
    request_counts: &'report BTreeMap<String, u64>,
}

pub(crate) fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    let summary = &report.metrics;
    let stats = compute_summary_stats(summary);
    let json = JsonSummary {
        started_at: report.started_at.to_rfc3339(),
        target: &report.target,
        duration_ms: u64::try_from(summary.duration.as_millis()).unwrap_or(u64::MAX),
        users: report.users_started,
        iterations: report.iterations,
        total_requests: summary.total_requests,
        successful_requests: summary.successful_requests,
        error_requests: summary.error_requests,
        timeout_requests: summary.timeout_requests,
        transport_errors: summary.transport_errors,
        non_expected_status: summary.non_expected_status,
        success_rate_x100: stats.success_rate_x100,
        avg_rps_x100: stats.avg_rps_x100,
        min_latency_ms: summary.min_latency_ms,
        max_latency_ms: summary.max_latency_ms,
        avg_latency_ms: summary.avg_latency_ms,
        p50_latency_ms: summary.p50_latency_ms,
        p90_latency_ms: summary.p90_latency_ms,
        p99_latency_ms: summary.p99_latency_ms,
        status_counts: summary
            .status_counts
            .iter()
            .map(|(status, count)| (status.to_string(), *count))
            .collect(),
        request_counts: &summary.request_counts,
    };
    serde_json::to_string(&json)
}

/// Writes the run summary to stdout in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub(crate) fn print_summary(report: &RunReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}
