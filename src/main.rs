mod advice;
mod cli;
mod config;
mod dataset;
mod error;
mod report;
mod scorer;
mod types;

use crate::error::WastecastError;
use crate::scorer::noise::{FixedNoise, NoiseSource, RandomNoise};
use crate::scorer::RiskScorer;
use crate::types::context::{parse_flag, DayOfWeek, MealContext, MealType, Weather};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const HIGH_RISK: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env("WASTECAST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("wastecast={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_scorer(cli: &cli::Cli) -> Result<(RiskScorer, Option<u64>), WastecastError> {
    let loaded = config::load_config(&cli.config_dir)?;
    if loaded.is_none() {
        warn!(
            "no {} found in {}; using built-in options",
            config::DEFAULT_CONFIG_FILE,
            cli.config_dir.display()
        );
    }
    let cfg = loaded.unwrap_or_default();
    Ok((RiskScorer::new(cfg.settings()), cfg.seed()))
}

fn noise_source(no_noise: bool, seed: Option<u64>) -> Box<dyn NoiseSource> {
    if no_noise {
        Box::new(FixedNoise(0.0))
    } else {
        Box::new(RandomNoise::from_seed_or_entropy(seed))
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn meal_context(cmd: &cli::PredictCommand) -> Result<MealContext, WastecastError> {
    let mut context = MealContext::new(cmd.total_students, cmd.meals_booked);
    context.hostel_name = cmd.hostel.clone();
    context.day_of_week = cmd.day.as_deref().map(str::parse::<DayOfWeek>).transpose()?;
    context.is_weekend = cmd
        .weekend
        .as_deref()
        .map(|value| parse_flag("--weekend", value))
        .transpose()?;
    context.special_event = cmd.special_event;
    context.weather = cmd.weather.as_deref().map(str::parse::<Weather>).transpose()?;
    context.meal_type = cmd.meal.as_deref().map(str::parse::<MealType>).transpose()?;
    Ok(context)
}

fn run() -> Result<i32, WastecastError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Predict(cmd) => {
            let (scorer, config_seed) = load_scorer(&cli)?;
            let context = meal_context(cmd)?;
            let mut noise = noise_source(cmd.no_noise, cmd.seed.or(config_seed));

            let assessment = scorer.assess(&context, noise.as_mut())?;
            info!(
                probability = assessment.probability,
                label = ?assessment.label,
                "scored meal context"
            );
            let high_risk = assessment.is_high_risk();

            let prediction = advice::prediction_report(context, assessment);
            let rendered = report::render_prediction(&prediction, output_format(&cmd.format))?;
            println!("{rendered}");

            if cmd.fail_on_risk && high_risk {
                Ok(exit_code::HIGH_RISK)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Batch(cmd) => {
            let (scorer, config_seed) = load_scorer(&cli)?;
            let paths = dataset::discover_datasets(&cmd.path)?;
            if paths.is_empty() {
                warn!(path = %cmd.path.display(), "no csv datasets found");
            }
            let mut noise = noise_source(cmd.no_noise, cmd.seed.or(config_seed));

            let batch = dataset::batch::run_batch(&paths, &scorer, noise.as_mut())?;
            let rendered = report::render_batch(&batch, output_format(&cmd.format))?;
            println!("{rendered}");

            if cmd.export {
                let path = dataset::batch::export_report(&cli.config_dir, &batch)?;
                eprintln!("report file: {}", path.display());
            }

            if cmd.fail_on_risk && batch.summary.predicted_waste > 0 {
                Ok(exit_code::HIGH_RISK)
            } else if !batch.skipped.is_empty() || paths.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Sample(cmd) => {
            let rows = dataset::sample::write_sample(&cmd.out, cmd.force)?;
            println!("sample: wrote {} rows to {}", rows, cmd.out.display());
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Options => {
            let (scorer, _) = load_scorer(&cli)?;
            let settings = scorer.settings();
            let join = |items: Vec<&str>| items.join(", ");

            println!("hostels: {}", settings.hostels.join(", "));
            println!(
                "days: {}",
                join(settings.days.iter().map(|d| d.as_str()).collect())
            );
            println!(
                "weather: {}",
                join(settings.weather.iter().map(|w| w.as_str()).collect())
            );
            println!(
                "meal types: {}",
                join(settings.meal_types.iter().map(|m| m.as_str()).collect())
            );
            if settings.hostel_adjustments.is_empty() {
                println!("flagged hostels: none");
            } else {
                println!("flagged hostels:");
                for (hostel, adjustment) in &settings.hostel_adjustments {
                    println!("- {hostel} (+{adjustment:.2})");
                }
            }
            println!("noise ceiling: {:.2}", settings.noise_ceiling);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
