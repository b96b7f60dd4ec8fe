use std::io::{self, Write};
use std::process::ExitCode;

use agecalc::animation;
use agecalc::config::{Cli, Config, OutputFormat};
use agecalc::report::{self, CounterDisplay};
use agecalc::{AgeEngine, DateInput, Submission};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    config.apply(&cli);
    tracing::debug!(?config, "configuration loaded");

    let [day, month, year] = cli.fields();
    let input = DateInput::from_fields(day, month, year);

    let engine = AgeEngine::new(config.clock());
    let submission = engine.submit(&input);

    match config.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&submission)
                .context("Failed to serialize result")?;
            println!("{json}");
        }
        OutputFormat::Text => match (&submission, config.timing()) {
            (Submission::Computed { age }, Some(timing)) => {
                let mut display = CounterDisplay::new(io::stdout().lock());
                let mut drawn = Ok(());
                animation::animate(*age, timing, |frame| {
                    if drawn.is_ok() {
                        drawn = display.draw(&frame);
                    }
                })
                .await;
                drawn.context("Failed to draw counters")?;
                let mut out = display.into_inner();
                writeln!(out, "{age}").context("Failed to write result")?;
            }
            _ => print!("{}", report::render_submission(&submission)),
        },
    }

    Ok(match submission {
        Submission::Computed { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
