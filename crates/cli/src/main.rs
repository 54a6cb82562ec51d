//! `seal-cli` -- command-line front end for the simulation control API.
//!
//! ```text
//! seal-cli stop                  stop the running simulation
//! seal-cli status                print whether a simulation is running
//! seal-cli poll [INTERVAL_MS]    print status repeatedly until Ctrl-C
//! ```
//!
//! # Environment variables
//!
//! | Variable                    | Required | Default                 | Description                 |
//! |-----------------------------|----------|-------------------------|-----------------------------|
//! | `SEAL_API_URL`              | no       | `http://127.0.0.1:5000` | Simulation host base URL    |
//! | `SEAL_REQUEST_TIMEOUT_SECS` | no       | `10`                    | Per-request timeout         |
//! | `SEAL_POLL_INTERVAL_MS`     | no       | `1000`                  | Default `poll` interval     |

use std::sync::Arc;
use std::time::Duration;

use seal_client::{poll_status, ClientConfig, SealApi};
use seal_core::{Payload, StatusReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: seal-cli <stop | status | poll [INTERVAL_MS]>";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seal_cli=info,seal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let code = run(std::env::args().skip(1).collect(), &config).await;
    std::process::exit(code);
}

/// A parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Stop,
    Status,
    Poll(Duration),
}

/// Parse the arguments after the program name.
///
/// Returns the message to print on bad usage.
fn parse_command(args: Vec<String>, config: &ClientConfig) -> Result<Command, String> {
    let mut args = args.into_iter();
    match args.next().as_deref() {
        Some("stop") => Ok(Command::Stop),
        Some("status") => Ok(Command::Status),
        Some("poll") => match args.next() {
            Some(raw) => parse_interval(&raw)
                .map(Command::Poll)
                .ok_or_else(|| format!("INTERVAL_MS must be a positive integer, got {raw:?}")),
            None => Ok(Command::Poll(config.poll_interval)),
        },
        _ => Err(USAGE.to_string()),
    }
}

/// Dispatch one command and return the process exit code.
///
/// `0` on success, `1` when the request failed, `2` on bad usage.
async fn run(args: Vec<String>, config: &ClientConfig) -> i32 {
    let command = match parse_command(args, config) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return 2;
        }
    };

    let api = match SealApi::from_config(config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return 1;
        }
    };

    match command {
        Command::Stop => stop(&api).await,
        Command::Status => status(&api).await,
        Command::Poll(interval) => poll(api, interval).await,
    }
}

async fn stop(api: &SealApi) -> i32 {
    match api.stop().await {
        Ok(payload) => {
            println!("{}", payload.text());
            0
        }
        Err(e) => {
            tracing::error!(api_url = api.api_url(), error = %e, "Stop request failed");
            1
        }
    }
}

async fn status(api: &SealApi) -> i32 {
    match api.status().await {
        Ok(payload) => {
            print_status(&payload);
            0
        }
        Err(e) => {
            tracing::error!(api_url = api.api_url(), error = %e, "Status request failed");
            1
        }
    }
}

/// Poll until Ctrl-C. Failed cycles are logged by the poller.
async fn poll(api: SealApi, interval: Duration) -> i32 {
    tracing::info!(
        api_url = api.api_url(),
        interval_ms = interval.as_millis() as u64,
        "Polling simulation status, Ctrl-C to stop",
    );

    let handle = match poll_status(Arc::new(api), |payload| print_status(&payload), interval) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start poll");
            return 2;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
    }

    handle.cancel();
    handle.join().await;
    0
}

fn print_status(payload: &Payload) {
    println!("{}", format_status(payload));
}

/// Render a status body, decoded when it has the simulation host's shape
/// and verbatim otherwise.
fn format_status(payload: &Payload) -> String {
    let at = payload.received_at().format("%H:%M:%S");
    match payload.json::<StatusReport>() {
        Ok(report) => {
            let state = if report.running { "running" } else { "idle" };
            let mut out = format!("[{at}] simulation {state}");
            for line in &report.logs {
                out.push_str("\n    ");
                out.push_str(line);
            }
            out
        }
        Err(_) => format!("[{at}] {}", payload.text()),
    }
}

fn parse_interval(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_noon(body: &str) -> Payload {
        let noon = "2026-10-18T12:00:00Z".parse().unwrap();
        Payload::received(200, body.as_bytes().to_vec(), noon)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// A base URL nothing is listening on.
    async fn unreachable_config() -> ClientConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ClientConfig {
            api_url: format!("http://{addr}"),
            ..Default::default()
        }
    }

    #[test]
    fn format_status_renders_running_report_with_logs() {
        let payload = at_noon(r#"{"success": true, "running": true, "logs": ["step 1", "step 2"]}"#);
        assert_eq!(
            format_status(&payload),
            "[12:00:00] simulation running\n    step 1\n    step 2"
        );
    }

    #[test]
    fn format_status_renders_idle_report() {
        let payload = at_noon(r#"{"success": true, "running": false, "logs": []}"#);
        assert_eq!(format_status(&payload), "[12:00:00] simulation idle");
    }

    #[test]
    fn format_status_falls_back_to_raw_body() {
        let payload = at_noon("simulation host warming up");
        assert_eq!(format_status(&payload), "[12:00:00] simulation host warming up");
    }

    #[test]
    fn parse_command_defaults_poll_interval_from_config() {
        let config = ClientConfig::default();
        assert_eq!(
            parse_command(args(&["poll"]), &config),
            Ok(Command::Poll(config.poll_interval))
        );
        assert_eq!(
            parse_command(args(&["poll", "250"]), &config),
            Ok(Command::Poll(Duration::from_millis(250)))
        );
        assert_eq!(parse_command(args(&["stop"]), &config), Ok(Command::Stop));
        assert_eq!(parse_command(args(&["status"]), &config), Ok(Command::Status));
    }

    #[test]
    fn parse_command_reports_usage() {
        let config = ClientConfig::default();
        assert_eq!(parse_command(args(&["restart"]), &config), Err(USAGE.to_string()));
    }

    #[tokio::test]
    async fn unknown_command_exits_with_usage_code() {
        assert_eq!(run(args(&["restart"]), &ClientConfig::default()).await, 2);
    }

    #[tokio::test]
    async fn missing_command_exits_with_usage_code() {
        assert_eq!(run(Vec::new(), &ClientConfig::default()).await, 2);
    }

    #[tokio::test]
    async fn bad_poll_interval_exits_with_usage_code() {
        assert_eq!(run(args(&["poll", "0"]), &ClientConfig::default()).await, 2);
        assert_eq!(run(args(&["poll", "often"]), &ClientConfig::default()).await, 2);
    }

    #[tokio::test]
    async fn failed_request_exits_with_one() {
        let config = unreachable_config().await;
        assert_eq!(run(args(&["stop"]), &config).await, 1);
        assert_eq!(run(args(&["status"]), &config).await, 1);
    }

    #[test]
    fn parse_interval_accepts_positive_millis() {
        assert_eq!(parse_interval("250"), Some(Duration::from_millis(250)));
        assert_eq!(parse_interval(" 1000 "), Some(Duration::from_secs(1)));
    }

    #[test]
    fn parse_interval_rejects_zero_and_garbage() {
        assert_eq!(parse_interval("0"), None);
        assert_eq!(parse_interval("fast"), None);
        assert_eq!(parse_interval("-5"), None);
    }
}
