use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header};
use super::types::HttpMethod;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Sequential HTTP probe runner for poking a vehicle-telemetry API - plays an ordered probe plan, echoes per-call timing and responses, and prints a key-sorted JSON report."
)]
pub struct ProbeArgs {
    /// Base URL of the vehicle API (default: http://localhost:8003)
    #[arg(long = "base-url", short = 'u')]
    pub base_url: Option<String>,

    /// Endpoint path for a single one-off probe (e.g. vehicles/1235)
    #[arg(long, short = 'p')]
    pub path: Option<String>,

    /// HTTP method for the one-off probe
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// Raw request body for the one-off probe (sent verbatim)
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// HTTP headers in 'Key: Value' format (repeatable), applied to every probe
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Path to probe plan file (TOML/JSON). Defaults to ./vprobe.toml or ./vprobe.json if present.
    #[arg(long, alias = "config")]
    pub plan: Option<String>,

    /// Write the final JSON report to a file as well as stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by VPROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
