use std::path::PathBuf;

use chrono::{Datelike, Local, Timelike};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eta_core::{Day, DayCategory, EstimatorConfig, EtaError, EtaRequest, RouteProviderKind};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "eta",
    version,
    about = "Traffic-adjusted ETA estimates between two locations",
    long_about = "Looks up a raw route ETA and scales it by historical travel time\n\
                  indices for the pickup and drop areas and an hour-of-day multiplier."
)]
pub struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, env = "ETA_CONFIG")]
    pub config: Option<PathBuf>,
    /// Reference CSV with travel time indices
    #[arg(long, env = "ETA_REFERENCE")]
    pub reference: Option<PathBuf>,
    /// JSON file of recorded routes to use instead of a live provider
    #[arg(long, env = "ETA_FIXTURES")]
    pub fixtures: Option<PathBuf>,
    /// API key for the directions provider
    #[cfg(feature = "directions")]
    #[arg(
        long,
        env = "ETA_DIRECTIONS_KEY",
        hide_env_values = true,
        conflicts_with = "fixtures"
    )]
    pub directions_key: Option<String>,
    /// Directions endpoint URL
    #[cfg(feature = "directions")]
    #[arg(long, env = "ETA_DIRECTIONS_ENDPOINT", requires = "directions_key")]
    pub directions_endpoint: Option<String>,
    /// Bound on a single route lookup, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the route and print the traffic-adjusted ETA
    Estimate {
        #[command(flatten)]
        trip: TripArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the composite traffic factor without a route lookup
    Factor {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Match one location text against the reference table
    Match {
        /// Location text
        #[arg(long)]
        text: String,
        /// Day label (Mon..Sun); defaults to today
        #[arg(long)]
        day: Option<Day>,
    },
    /// Print the hour-multiplier tables
    Multipliers {
        /// Only print one category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
}

#[derive(Args, Clone)]
pub struct TripArgs {
    /// Pickup location text
    #[arg(long)]
    pub pickup: String,
    /// Drop location text
    #[arg(long)]
    pub drop: String,
    /// Day label (Mon..Sun); defaults to today
    #[arg(long)]
    pub day: Option<Day>,
    /// Hour of day, 00-23; defaults to the current hour
    #[arg(long, conflicts_with = "day_only")]
    pub hour: Option<String>,
    /// Ignore the hour-of-day multiplier
    #[arg(long)]
    pub day_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Weekday,
    Weekend,
}

impl From<CategoryArg> for DayCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Weekday => DayCategory::Weekday,
            CategoryArg::Weekend => DayCategory::Weekend,
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn estimator_config(&self) -> Result<EstimatorConfig, EtaError> {
        let mut config = match &self.config {
            Some(path) => EstimatorConfig::from_file(path)?,
            None => EstimatorConfig::default(),
        };
        if let Some(reference) = &self.reference {
            config.reference_path = Some(reference.display().to_string());
        }
        if let Some(fixtures) = &self.fixtures {
            config.route_provider = Some(RouteProviderKind::Fixture {
                path: fixtures.display().to_string(),
            });
        }
        #[cfg(feature = "directions")]
        if let Some(api_key) = &self.directions_key {
            let endpoint = self
                .directions_endpoint
                .clone()
                .unwrap_or_else(|| eta_core::routing::directions::DEFAULT_ENDPOINT.to_string());
            config.route_provider = Some(RouteProviderKind::Directions {
                endpoint,
                api_key: api_key.clone(),
            });
        }
        if let Some(timeout) = self.timeout_secs {
            config.request_timeout_secs = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}

impl TripArgs {
    /// Request with day and hour defaulted from the local clock.
    pub fn request(&self) -> EtaRequest {
        let day = self.day.unwrap_or_else(today);
        let hour = if self.day_only {
            None
        } else {
            Some(
                self.hour
                    .as_deref()
                    .map(normalize_hour)
                    .unwrap_or_else(|| format!("{:02}", Local::now().hour())),
            )
        };
        EtaRequest::new(&self.pickup, &self.drop, day, hour.as_deref())
    }
}

pub fn today() -> Day {
    let offset = Local::now().weekday().num_days_from_monday();
    Day::from_monday_offset(offset).unwrap_or(Day::Mon)
}

/// Pad a bare hour number (`"8"`) to its two-digit label; other text is
/// passed through unchanged.
pub fn normalize_hour(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(hour) if hour < 24 => format!("{:02}", hour),
        _ => trimmed.to_string(),
    }
}
