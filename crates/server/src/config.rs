//! Server configuration.
//!
//! Command-line flags win over environment variables, which win over
//! built-in defaults. Threshold values are passed through as overrides; the
//! core coerces anything non-positive back to its documented default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use options_audit_core::ThresholdOverrides;

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 47900;

pub const ENV_PORT: &str = "OPTIONS_AUDIT_PORT";
pub const ENV_DB: &str = "OPTIONS_AUDIT_DB";
pub const ENV_ADMIN_TOKEN: &str = "OPTIONS_AUDIT_ADMIN_TOKEN";
pub const ENV_TOP_AUTOLOAD_LIMIT: &str = "OPTIONS_AUDIT_TOP_AUTOLOAD_LIMIT";
pub const ENV_LARGE_OPTION_THRESHOLD: &str = "OPTIONS_AUDIT_LARGE_OPTION_THRESHOLD";
pub const ENV_LARGE_TRANSIENT_THRESHOLD: &str = "OPTIONS_AUDIT_LARGE_TRANSIENT_THRESHOLD";

/// Read-only size audit of an options table, served as an admin page.
#[derive(Debug, Default, Parser)]
#[command(name = "options-audit", version)]
pub struct Cli {
    /// SQLite database holding the `options` table.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Address to bind (defaults to loopback).
    #[arg(long)]
    pub bind: Option<IpAddr>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Number of autoloaded options to list.
    #[arg(long, allow_negative_numbers = true)]
    pub top_autoload_limit: Option<i64>,

    /// Byte size at which any option is listed as oversized.
    #[arg(long, allow_negative_numbers = true)]
    pub large_option_threshold: Option<i64>,

    /// Byte size at which a transient is listed.
    #[arg(long, allow_negative_numbers = true)]
    pub large_transient_threshold: Option<i64>,
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `None` means the default cache location.
    pub db_path: Option<PathBuf>,
    pub addr: SocketAddr,
    /// Bearer token that grants admin access. `None` denies everyone.
    pub admin_token: Option<String>,
    pub thresholds: ThresholdOverrides,
}

impl ServerConfig {
    /// Resolve from parsed flags and the process environment.
    pub fn from_env(cli: Cli) -> Self {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolve from parsed flags and an arbitrary variable lookup.
    pub fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        let port = cli
            .port
            .or_else(|| parse_env(&env, ENV_PORT))
            .or_else(|| parse_env(&env, "PORT"))
            .unwrap_or(DEFAULT_PORT);
        let ip = cli.bind.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let admin_token = env(ENV_ADMIN_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            db_path: cli.db.or_else(|| env(ENV_DB).map(PathBuf::from)),
            addr: SocketAddr::new(ip, port),
            admin_token,
            thresholds: ThresholdOverrides {
                top_autoload_limit: cli
                    .top_autoload_limit
                    .or_else(|| parse_env(&env, ENV_TOP_AUTOLOAD_LIMIT)),
                large_option_threshold: cli
                    .large_option_threshold
                    .or_else(|| parse_env(&env, ENV_LARGE_OPTION_THRESHOLD)),
                large_transient_threshold: cli
                    .large_transient_threshold
                    .or_else(|| parse_env(&env, ENV_LARGE_TRANSIENT_THRESHOLD)),
            },
        }
    }
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = key, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}
