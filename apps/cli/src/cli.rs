//! Command-line surface of `pii-admin`.
//!
//! Argument structs convert into the client's typed filters; nothing here
//! talks to the network.

use crate::error::AppError;

use admin_client::{DateRange, IpStatisticsFilter, LogFilter, TimelineFilter};

use common::ErrorLocation;

use models::SettingUpdate;

use std::panic::Location;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

pub const LOG_DIR_ENV_KEY: &str = "PII_ADMIN_LOG_DIR";
pub const PASSWORD_ENV_KEY: &str = "PII_ADMIN_PASSWORD";

/// Admin client for the PII detection backend.
#[derive(Debug, Parser)]
#[command(name = "pii-admin", version, about)]
pub struct Cli {
    /// Backend origin; overrides environment and config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding config.json.
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Keep the session in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Also write logs to pii-admin.log in this directory.
    #[arg(long, global = true, env = LOG_DIR_ENV_KEY)]
    pub log_dir: Option<PathBuf>,

    /// Print the backend payload untouched instead of the normalized view.
    #[arg(long, global = true)]
    pub raw: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange username and password for an access token.
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = PASSWORD_ENV_KEY, hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token.
    Logout,

    /// Show the logged-in admin.
    Whoami,

    /// List request logs.
    Logs(LogsArgs),

    /// Totals and rates for a period.
    Overview(DateArgs),

    /// Request counts bucketed over time.
    Timeline(TimelineArgs),

    /// Detections grouped by PII entity type.
    ByPiiType(DateArgs),

    /// Requests grouped by client IP.
    ByIp(ByIpArgs),

    /// Per-entity detection settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    List,

    Get {
        entity_type: String,
    },

    /// Change only the given fields.
    Update {
        entity_type: String,

        #[arg(long)]
        enabled: Option<bool>,

        #[arg(long)]
        threshold: Option<u32>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DateArgs {
    /// ISO 8601 lower bound.
    #[arg(long, conflicts_with = "since")]
    pub start_date: Option<String>,

    /// ISO 8601 upper bound.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Relative lower bound such as `24h` or `7days`.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub since: Option<Duration>,
}

impl DateArgs {
    /// Resolve `--since` against `now` into an RFC 3339 lower bound.
    #[track_caller]
    pub fn to_range(&self, now: SystemTime) -> Result<DateRange, AppError> {
        let start_date = match self.since {
            Some(since) => {
                let start = now.checked_sub(since).ok_or_else(|| AppError::Cli {
                    message: format!(
                        "--since {} reaches before the epoch",
                        humantime::format_duration(since)
                    ),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                Some(humantime::format_rfc3339_seconds(start).to_string())
            }
            None => self.start_date.clone(),
        };

        Ok(DateRange {
            start_date,
            end_date: self.end_date.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub dates: DateArgs,

    #[arg(long)]
    pub client_ip: Option<String>,

    #[arg(long)]
    pub has_pii: Option<bool>,

    #[arg(long)]
    pub entity_type: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub page_size: Option<u32>,

    /// `field:asc` or `field:desc`.
    #[arg(long)]
    pub sort: Option<String>,
}

impl LogsArgs {
    pub fn to_filter(&self, now: SystemTime) -> Result<LogFilter, AppError> {
        let range = self.dates.to_range(now)?;
        Ok(LogFilter {
            start_date: range.start_date,
            end_date: range.end_date,
            client_ip: self.client_ip.clone(),
            has_pii: self.has_pii,
            entity_type: self.entity_type.clone(),
            page: self.page,
            page_size: self.page_size,
            sort: self.sort.clone(),
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub dates: DateArgs,

    /// Bucket width: `1h`, `1d` or `1w`.
    #[arg(long, default_value = "1h")]
    pub interval: String,
}

impl TimelineArgs {
    pub fn to_filter(&self, now: SystemTime) -> Result<TimelineFilter, AppError> {
        let range = self.dates.to_range(now)?;
        Ok(TimelineFilter {
            start_date: range.start_date,
            end_date: range.end_date,
            interval: Some(self.interval.clone()),
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct ByIpArgs {
    #[command(flatten)]
    pub dates: DateArgs,

    /// Number of IPs to return.
    #[arg(long, default_value_t = 20)]
    pub size: u32,
}

impl ByIpArgs {
    pub fn to_filter(&self, now: SystemTime) -> Result<IpStatisticsFilter, AppError> {
        let range = self.dates.to_range(now)?;
        Ok(IpStatisticsFilter {
            start_date: range.start_date,
            end_date: range.end_date,
            size: Some(self.size),
        })
    }
}

/// The partial update `settings update` sends.
#[track_caller]
pub fn setting_update(
    enabled: Option<bool>,
    threshold: Option<u32>,
) -> Result<SettingUpdate, AppError> {
    let update = SettingUpdate { enabled, threshold };
    if update.is_empty() {
        return Err(AppError::Cli {
            message: String::from("Nothing to update: pass --enabled and/or --threshold"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(update)
}
