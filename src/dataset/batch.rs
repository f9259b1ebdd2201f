use super::parse_rows;
use crate::error::{Result, WastecastError};
use crate::scorer::noise::NoiseSource;
use crate::scorer::RiskScorer;
use crate::types::report::{BatchReport, BatchSummary, DatasetFingerprint, ScoredRow, SkippedRow};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const REPORTS_DIR: &str = ".wastecast/reports";

/// Scores every row of every dataset. Rows that fail to parse or validate
/// are skipped and reported; unreadable files abort the batch.
pub fn run_batch<N: NoiseSource + ?Sized>(
    paths: &[PathBuf],
    scorer: &RiskScorer,
    noise: &mut N,
) -> Result<BatchReport> {
    let mut datasets = Vec::new();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let bytes = fs::read(path)?;
        let parsed = parse_rows(bytes.as_slice()).map_err(|e| match e {
            WastecastError::InvalidInput(msg) => {
                WastecastError::InvalidInput(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        info!(path = %path.display(), rows = parsed.len(), "scoring dataset");

        datasets.push(DatasetFingerprint {
            path: path.clone(),
            sha256: sha256_hex(&bytes),
            rows: parsed.len(),
        });

        for row in parsed {
            let scored = row.record.and_then(|record| {
                let context = record.to_context()?;
                let observed_waste = record.observed_waste()?;
                let assessment = scorer.assess(&context, &mut *noise)?;
                Ok(ScoredRow {
                    file: path.clone(),
                    line: row.line,
                    hostel_name: record.hostel_name,
                    day_of_week: record.day_of_week,
                    observed_waste,
                    assessment,
                })
            });

            match scored {
                Ok(scored) => rows.push(scored),
                Err(e) => {
                    warn!(path = %path.display(), line = row.line, error = %e, "skipping row");
                    skipped.push(SkippedRow {
                        file: path.clone(),
                        line: row.line,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    let summary = summarize(&rows, skipped.len());
    Ok(BatchReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now().to_rfc3339(),
        datasets,
        summary,
        rows,
        skipped,
    })
}

pub fn summarize(rows: &[ScoredRow], rows_skipped: usize) -> BatchSummary {
    let rows_scored = rows.len();
    let agreement = rows.iter().filter(|row| row.agrees()).count();
    let (agreement_rate, mean_probability) = if rows_scored == 0 {
        (0.0, 0.0)
    } else {
        let total: f64 = rows.iter().map(|row| row.assessment.probability).sum();
        (
            agreement as f64 / rows_scored as f64,
            total / rows_scored as f64,
        )
    };

    BatchSummary {
        rows_scored,
        rows_skipped,
        predicted_waste: rows
            .iter()
            .filter(|row| row.assessment.is_high_risk())
            .count(),
        observed_waste: rows.iter().filter(|row| row.observed_waste).count(),
        agreement,
        agreement_rate,
        mean_probability,
    }
}

pub fn export_report(root: &Path, report: &BatchReport) -> Result<PathBuf> {
    let dir = root.join(REPORTS_DIR);
    fs::create_dir_all(&dir)?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
    let out_path = dir.join(format!("batch-{stamp}.json"));
    let json = serde_json::to_string_pretty(report)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&out_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                WastecastError::OutputExists(out_path.display().to_string())
            }
            _ => WastecastError::Io(e),
        })?;
    file.write_all(json.as_bytes())?;
    Ok(out_path)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
