use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wastecast",
    version,
    about = "Hostel food wastage risk scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors; reports are still printed to stdout
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding wastecast.toml and .wastecast/
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single meal-planning scenario
    Predict(PredictCommand),
    /// Score every row of one or more CSV datasets
    Batch(BatchCommand),
    /// Write the sample hostel dataset
    Sample(SampleCommand),
    /// List the configured hostels, days, weather and meal options
    Options,
}

#[derive(Args)]
pub struct PredictCommand {
    #[arg(long, allow_negative_numbers = true)]
    pub total_students: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub meals_booked: i64,
    #[arg(long)]
    pub hostel: Option<String>,
    #[arg(long)]
    pub day: Option<String>,
    /// yes/no; derived from --day when omitted
    #[arg(long)]
    pub weekend: Option<String>,
    #[arg(long)]
    pub special_event: bool,
    #[arg(long)]
    pub weather: Option<String>,
    #[arg(long)]
    pub meal: Option<String>,
    #[arg(long, conflicts_with = "no_noise")]
    pub seed: Option<u64>,
    /// Score without the random noise term
    #[arg(long)]
    pub no_noise: bool,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Exit with code 2 when wastage is predicted
    #[arg(long)]
    pub fail_on_risk: bool,
}

#[derive(Args)]
pub struct BatchCommand {
    /// CSV file, or directory searched for *.csv
    pub path: PathBuf,
    #[arg(long, conflicts_with = "no_noise")]
    pub seed: Option<u64>,
    /// Score without the random noise term
    #[arg(long)]
    pub no_noise: bool,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Also write the JSON report under .wastecast/reports
    #[arg(long)]
    pub export: bool,
    /// Exit with code 2 when any row predicts wastage
    #[arg(long)]
    pub fail_on_risk: bool,
}

#[derive(Args)]
pub struct SampleCommand {
    pub out: PathBuf,
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
