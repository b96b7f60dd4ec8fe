//! Front-end configuration.
//!
//! `AGECALC_ANIMATE` and `AGECALC_FORMAT` are read here; `AGECALC_TODAY` and
//! `AGECALC_FRAME_MS` back the `--today` and `--frame-ms` flags through clap.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;

use crate::animation::Timing;
use crate::clock::{Clock, FixedClock, SystemClock};

pub const ENV_ANIMATE: &str = "AGECALC_ANIMATE";
pub const ENV_FRAME_MS: &str = "AGECALC_FRAME_MS";
pub const ENV_TODAY: &str = "AGECALC_TODAY";
pub const ENV_FORMAT: &str = "AGECALC_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub animate: bool,
    pub frame: Duration,
    /// Fixed "today"; the host's local date when unset.
    pub today: Option<NaiveDate>,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animate: true,
            frame: Timing::default().frame,
            today: None,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup(ENV_ANIMATE) {
            config.animate = parse_bool(&raw).with_context(|| format!("invalid {ENV_ANIMATE}"))?;
        }

        if let Some(raw) = lookup(ENV_FORMAT) {
            config.format = match raw.trim().to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => bail!("invalid {ENV_FORMAT}: {other:?} (expected text or json)"),
            };
        }

        Ok(config)
    }

    /// Flags given on the command line win over the environment.
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(today) = cli.today {
            self.today = Some(today);
        }
        if let Some(ms) = cli.frame_ms {
            self.frame = Duration::from_millis(ms);
        }
        if cli.json {
            self.format = OutputFormat::Json;
        }
        if cli.no_animate {
            self.animate = false;
        }
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }

    /// Animation runs only for text output.
    pub fn timing(&self) -> Option<Timing> {
        (self.animate && self.format == OutputFormat::Text)
            .then(|| Timing::default().with_frame(self.frame))
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

/// Command-line arguments.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "agecalc", about = "Age in years, months and days from a birth date")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Day of birth (1-31). Left out or non-numeric counts as empty.
    pub day: Option<String>,

    /// Month of birth (1-12).
    pub month: Option<String>,

    /// Year of birth.
    pub year: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Show the result without the count-up animation.
    #[arg(long)]
    pub no_animate: bool,

    /// Fixed "today" (YYYY-MM-DD) instead of the host's local date.
    #[arg(long, env = ENV_TODAY, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Animation frame interval in milliseconds.
    #[arg(long, env = ENV_FRAME_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_ms: Option<u64>,
}

impl Cli {
    /// Raw day, month and year text; missing positions are empty.
    pub fn fields(&self) -> [&str; 3] {
        [&self.day, &self.month, &self.year].map(|field| field.as_deref().unwrap_or(""))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("agecalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.animate);
        assert_eq!(config.frame, Duration::from_millis(16));
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn reads_environment_variables() {
        let config =
            Config::from_lookup(lookup(&[(ENV_ANIMATE, "off"), (ENV_FORMAT, "JSON")])).unwrap();
        assert!(!config.animate);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_bad_values_with_variable_name() {
        let err = Config::from_lookup(lookup(&[(ENV_ANIMATE, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_ANIMATE));

        let err = Config::from_lookup(lookup(&[(ENV_FORMAT, "xml")])).unwrap_err();
        assert!(err.to_string().contains(ENV_FORMAT));
    }

    #[test]
    fn flags_override_environment() {
        let mut config = Config::from_lookup(lookup(&[(ENV_FORMAT, "text")])).unwrap();
        config.apply(&cli(&["29", "2", "2000", "--json", "--no-animate"]));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.animate);
        assert_eq!(config.timing(), None);
    }

    #[test]
    fn today_and_frame_flags() {
        let mut config = Config::default();
        config.apply(&cli(&["--today", "2024-06-15", "--frame-ms", "40", "1", "1", "2000"]));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(config.clock().today(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(config.timing().map(|t| t.frame), Some(Duration::from_millis(40)));
    }

    #[test]
    fn rejects_bad_today_and_zero_frame() {
        let args = ["agecalc", "--today", "15/06/2024"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["agecalc", "--frame-ms", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn parses_positional_fields() {
        let parsed = cli(&["29", "2", "2000"]);
        assert_eq!(parsed.fields(), ["29", "2", "2000"]);
        assert!(!parsed.json);

        let parsed = cli(&["-5", "1", "2000"]);
        assert_eq!(parsed.fields()[0], "-5");
    }

    #[test]
    fn missing_positions_stay_empty() {
        let parsed = cli(&["", "5"]);
        assert_eq!(parsed.fields(), ["", "5", ""]);
        assert_eq!(cli(&[]).fields(), ["", "", ""]);
    }

    #[test]
    fn rejects_extra_arguments_and_unknown_flags() {
        assert!(Cli::try_parse_from(["agecalc", "1", "2", "3", "4"]).is_err());
        assert!(Cli::try_parse_from(["agecalc", "--verbose"]).is_err());
    }
}
