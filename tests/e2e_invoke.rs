
use std::fs;
use std::process::Output;

use tempfile::tempdir;

use support_single::{run_ledge_swarm, run_ledge_swarm_with_env, spawn_http_server_or_skip};

fn short_run_args(url: String) -> Vec<String> {
    vec![
        "--host".to_owned(),
        url,
        "--run-time".to_owned(),
        "1s".to_owned(),
        "--wait-min".to_owned(),
        "100ms".to_owned(),
        "--wait-max".to_owned(),
        "200ms".to_owned(),
        "--output-format".to_owned(),
        "json".to_owned(),
    ]
}

fn describe(output: &Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn parse_summary(output: &Output) -> Result<serde_json::Value, String> {
    if !output.status.success() {
        return Err(describe(output));
    }
    serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("summary is not JSON ({}): {}", err, describe(output)))
}

fn field(summary: &serde_json::Value, name: &str) -> Result<u64, String> {
    summary
        .get(name)
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| format!("missing {} in {}", name, summary))
}

#[test]
fn e2e_invokes_default_function_with_fixed_payload() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };

    let output = run_ledge_swarm(short_run_args(url))?;
    let summary = parse_summary(&output)?;

    let total = field(&summary, "total_requests")?;
    let successful = field(&summary, "successful_requests")?;
    let checks = [
        (total >= 1, format!("expected at least one request: {}", summary)),
        (
            successful == total,
            format!("expected every request to succeed: {}", summary),
        ),
        (
            field(&summary, "users")? == 1,
            format!("expected a single user: {}", summary),
        ),
    ];
    for (ok, msg) in checks {
        if !ok {
            return Err(msg);
        }
    }

    let requests = server.requests();
    let Some(first) = requests.first() else {
        return Err("server saw no requests".to_owned());
    };
    if first.method != "POST" || first.path != "/invoke/func" {
        return Err(format!("unexpected request line: {} {}", first.method, first.path));
    }
    if first.body != r#"{"Params":{"n":"100000"},"Async":false}"# {
        return Err(format!("unexpected body: {}", first.body));
    }
    Ok(())
}

#[test]
fn e2e_server_errors_are_reported_not_fatal() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip("500 Internal Server Error")? else {
        return Ok(());
    };

    let output = run_ledge_swarm(short_run_args(url))?;
    let summary = parse_summary(&output)?;

    let total = field(&summary, "total_requests")?;
    if total < 2 {
        return Err(format!("expected the user to keep invoking: {}", summary));
    }
    if field(&summary, "non_expected_status")? != total {
        return Err(format!("expected every request to be flagged: {}", summary));
    }
    Ok(())
}

#[test]
fn e2e_config_file_selects_function_and_params() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("ledge-swarm.toml");
    fs::write(
        &config_path,
        "function = \"fib\"\nasync = true\n\n[params]\nn = \"42\"\n",
    )
    .map_err(|err| format!("write config failed: {}", err))?;

    let mut args = short_run_args(url);
    args.push("--config".to_owned());
    args.push(config_path.to_string_lossy().into_owned());

    let output = run_ledge_swarm(args)?;
    parse_summary(&output)?;

    let requests = server.requests();
    let Some(first) = requests.first() else {
        return Err("server saw no requests".to_owned());
    };
    if first.path != "/invoke/fib" {
        return Err(format!("unexpected path: {}", first.path));
    }
    if first.body != r#"{"Params":{"n":"42"},"Async":true}"# {
        return Err(format!("unexpected body: {}", first.body));
    }
    Ok(())
}

#[test]
fn e2e_env_vars_beat_config_file() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip("200 OK")? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("ledge-swarm.toml");
    fs::write(
        &config_path,
        "function = \"fib\"\nusers = 5\nspawn_rate = 5\n\n[params]\nn = \"42\"\n",
    )
    .map_err(|err| format!("write config failed: {}", err))?;

    let mut args = short_run_args(url);
    args.push("--config".to_owned());
    args.push(config_path.to_string_lossy().into_owned());

    let output = run_ledge_swarm_with_env(
        args,
        [
            ("LEDGE_SWARM_FUNCTION", "fromenv"),
            ("LEDGE_SWARM_USERS", "2"),
        ],
    )?;
    let summary = parse_summary(&output)?;
    if field(&summary, "users")? != 2 {
        return Err(format!("expected env users to win: {}", summary));
    }

    let requests = server.requests();
    let Some(first) = requests.first() else {
        return Err("server saw no requests".to_owned());
    };
    let checks = [
        (
            requests.iter().all(|request| request.path == "/invoke/fromenv"),
            format!("expected env function to win: {}", first.path),
        ),
        (
            first.body == r#"{"Params":{"n":"42"},"Async":false}"#,
            format!("expected config params to apply: {}", first.body),
        ),
    ];
    for (ok, msg) in checks {
        if !ok {
            return Err(msg);
        }
    }
    Ok(())
}

#[test]
fn e2e_rejects_non_http_host() -> Result<(), String> {
    let output = run_ledge_swarm([
        "--host",
        "ftp://127.0.0.1:1323",
        "--run-time",
        "1s",
        "--output-format",
        "quiet",
    ])?;
    if output.status.success() {
        return Err(format!("expected failure: {}", describe(&output)));
    }
    Ok(())
}
