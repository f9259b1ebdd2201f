use serde::{Serialize, Serializer};
use std::fmt;

pub const MIN_PROBABILITY: f64 = 0.05;
pub const MAX_PROBABILITY: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    Yes,
    No,
}

impl Label {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.5 {
            Label::Yes
        } else {
            Label::No
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            ConfidenceTier::High
        } else if probability > 0.4 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// A scoring rule that fired, in rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    LowBookingRate,
    ModerateBookingRate,
    Weekend,
    SpecialEvent,
    BadWeather,
    DinnerService,
    BreakfastService,
    HostelPattern,
    NormalConditions,
}

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Factor::LowBookingRate => "Low booking rate (<60%)",
            Factor::ModerateBookingRate => "Moderate booking rate (60-80%)",
            Factor::Weekend => "Weekend effect",
            Factor::SpecialEvent => "Special event day",
            Factor::BadWeather => "Bad weather conditions",
            Factor::DinnerService => "Dinner service (higher waste tendency)",
            Factor::BreakfastService => "Breakfast service",
            Factor::HostelPattern => "Hostel-specific pattern",
            Factor::NormalConditions => "Normal operating conditions",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Factor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub label: Label,
    pub confidence: ConfidenceTier,
    pub contributing_factors: Vec<Factor>,
    pub booking_rate: f64,
}

impl RiskAssessment {
    /// Clamps `score`, derives label and tier, and substitutes the
    /// normal-conditions sentinel when no rule fired.
    pub fn from_score(score: f64, factors: Vec<Factor>, booking_rate: f64) -> Self {
        let probability = score.clamp(MIN_PROBABILITY, MAX_PROBABILITY);
        let contributing_factors = if factors.is_empty() {
            vec![Factor::NormalConditions]
        } else {
            factors
        };
        Self {
            probability,
            label: Label::from_probability(probability),
            confidence: ConfidenceTier::from_probability(probability),
            contributing_factors,
            booking_rate,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.label == Label::Yes
    }

    pub fn factor_labels(&self) -> Vec<&'static str> {
        self.contributing_factors
            .iter()
            .map(|factor| factor.label())
            .collect()
    }
}
