use crate::types::assessment::RiskAssessment;
use crate::types::context::MealContext;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub action: String,
    pub priority: Priority,
    pub expected_reduction: String,
}

impl Recommendation {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        action: impl Into<String>,
        priority: Priority,
        expected_reduction: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            action: action.into(),
            priority,
            expected_reduction: expected_reduction.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub context: MealContext,
    pub assessment: RiskAssessment,
    pub recommendations: Vec<Recommendation>,
}

impl PredictionReport {
    pub fn sort_recommendations(&mut self) {
        self.recommendations
            .sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetFingerprint {
    pub path: PathBuf,
    pub sha256: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredRow {
    pub file: PathBuf,
    pub line: u64,
    pub hostel_name: String,
    pub day_of_week: String,
    pub observed_waste: bool,
    pub assessment: RiskAssessment,
}

impl ScoredRow {
    pub fn agrees(&self) -> bool {
        self.assessment.is_high_risk() == self.observed_waste
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub file: PathBuf,
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows_scored: usize,
    pub rows_skipped: usize,
    pub predicted_waste: usize,
    pub observed_waste: usize,
    pub agreement: usize,
    pub agreement_rate: f64,
    pub mean_probability: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub version: String,
    pub generated_at: String,
    pub datasets: Vec<DatasetFingerprint>,
    pub summary: BatchSummary,
    pub rows: Vec<ScoredRow>,
    pub skipped: Vec<SkippedRow>,
}
