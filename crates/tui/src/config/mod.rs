use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Prefilled on the login screen.
    pub email: String,
    pub timezone: String,
    pub session_path: String,
    pub log_file: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            email: String::new(),
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            session_path: "config/session.json".to_string(),
            log_file: "fintrack.log".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Configured zone, or UTC when the name is unknown.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(timezone = %self.timezone, "unknown timezone, using UTC");
                Tz::UTC
            }
        }
    }

    /// Today's date in the configured zone; deadlines are compared against it.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz()).date_naive()
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "fintrack_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Prefill the login email (the password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
