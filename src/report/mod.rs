pub mod json;
pub mod md;

use crate::error::WastecastError;
use crate::types::report::{BatchReport, PredictionReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_prediction(
    report: &PredictionReport,
    format: OutputFormat,
) -> Result<String, WastecastError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(WastecastError::Json),
        OutputFormat::Md => Ok(md::prediction_to_markdown(report)),
    }
}

pub fn render_batch(report: &BatchReport, format: OutputFormat) -> Result<String, WastecastError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(WastecastError::Json),
        OutputFormat::Md => Ok(md::batch_to_markdown(report)),
    }
}
