//! Command-line flags and the check configuration built from them

use anyhow::Context;
use clap::{ArgAction, Parser};
use rwcheck_core::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT};
use rwcheck_monitor::ThresholdConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Name used for the snapshot key when the executable path is unavailable
pub const DEFAULT_EXECUTABLE: &str = "check_mysql_rw";

/// Check MySQL read and write rates since the previous run
#[derive(Parser, Debug, Clone)]
#[command(
    name = "check_mysql_rw",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Server host
    #[arg(short = 'h', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// MySQL user
    #[arg(short = 'u', long, default_value = "")]
    pub user: String,

    /// MySQL password for user
    #[arg(
        short = 'P',
        long,
        env = "MYSQL_PWD",
        hide_env_values = true,
        default_value = ""
    )]
    pub password: String,

    /// Connection timeout in seconds
    #[arg(short = 't', long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Warning level for reads per second
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(i64).range(0..))]
    pub rwarn: i64,

    /// Critical level for reads per second
    #[arg(long, default_value_t = 1500, value_parser = clap::value_parser!(i64).range(0..))]
    pub rcrit: i64,

    /// Warning level for writes per second
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i64).range(0..))]
    pub wwarn: i64,

    /// Critical level for writes per second
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(0..))]
    pub wcrit: i64,

    /// Directory for the stats file kept between runs (default: current directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Display version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Everything one check run needs, fixed for the whole run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub connection: ConnectionConfig,
    pub thresholds: ThresholdConfig,
    /// Directory holding the snapshot file
    pub state_dir: PathBuf,
    /// Executable identity used in the snapshot key
    pub executable: String,
}

impl Args {
    /// Build the run configuration, resolving the state directory and the
    /// executable name
    pub fn into_config(self) -> anyhow::Result<CheckConfig> {
        let state_dir = match self.output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not determine current directory")?,
        };

        Ok(CheckConfig {
            connection: ConnectionConfig::new_mysql(&self.host, self.port)
                .with_username(self.user)
                .with_password(self.password)
                .with_connect_timeout(Duration::from_secs(self.timeout)),
            thresholds: ThresholdConfig::new(self.rwarn, self.rcrit, self.wwarn, self.wcrit),
            state_dir,
            executable: executable_name(),
        })
    }
}

/// Base name of the running executable
pub fn executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}

/// `<executable> v<version>`, as printed by `--version`
pub fn version_line() -> String {
    format!("{} v{}", executable_name(), env!("CARGO_PKG_VERSION"))
}
