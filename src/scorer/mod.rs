pub mod noise;

use crate::error::{Result, WastecastError};
use crate::types::assessment::{Factor, RiskAssessment};
use crate::types::config::ScoringSettings;
use crate::types::context::{MealContext, MealType};
use noise::NoiseSource;
use tracing::debug;

const LOW_BOOKING_RATE: f64 = 0.6;
const MODERATE_BOOKING_RATE: f64 = 0.8;
const LOW_BOOKING_WEIGHT: f64 = 0.40;
const MODERATE_BOOKING_WEIGHT: f64 = 0.20;
const WEEKEND_WEIGHT: f64 = 0.25;
const SPECIAL_EVENT_WEIGHT: f64 = 0.30;
const BAD_WEATHER_WEIGHT: f64 = 0.15;
const DINNER_WEIGHT: f64 = 0.15;
const BREAKFAST_WEIGHT: f64 = 0.05;

/// Additive, explainable wastage-risk model over a [`MealContext`].
///
/// Holds only the resolved option sets and hostel adjustments; every call to
/// [`RiskScorer::assess`] is independent.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    settings: ScoringSettings,
}

impl RiskScorer {
    pub fn new(settings: ScoringSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    pub fn assess<N: NoiseSource + ?Sized>(
        &self,
        context: &MealContext,
        noise: &mut N,
    ) -> Result<RiskAssessment> {
        self.validate(context)?;

        let booking_rate = context.meals_booked as f64 / context.total_students as f64;
        let mut score = 0.0;
        let mut factors = Vec::new();

        if booking_rate < LOW_BOOKING_RATE {
            score += LOW_BOOKING_WEIGHT;
            factors.push(Factor::LowBookingRate);
        } else if booking_rate < MODERATE_BOOKING_RATE {
            score += MODERATE_BOOKING_WEIGHT;
            factors.push(Factor::ModerateBookingRate);
        }

        if context.weekend() {
            score += WEEKEND_WEIGHT;
            factors.push(Factor::Weekend);
        }

        if context.special_event {
            score += SPECIAL_EVENT_WEIGHT;
            factors.push(Factor::SpecialEvent);
        }

        if context.weather.is_some_and(|weather| weather.is_bad()) {
            score += BAD_WEATHER_WEIGHT;
            factors.push(Factor::BadWeather);
        }

        match context.meal_type {
            Some(MealType::Dinner) => {
                score += DINNER_WEIGHT;
                factors.push(Factor::DinnerService);
            }
            Some(MealType::Breakfast) => {
                score += BREAKFAST_WEIGHT;
                factors.push(Factor::BreakfastService);
            }
            Some(MealType::Lunch) | None => {}
        }

        if let Some(adjustment) = context
            .hostel_name
            .as_deref()
            .and_then(|name| self.settings.hostel_adjustment(name))
        {
            score += adjustment;
            factors.push(Factor::HostelPattern);
        }

        let jitter = noise.draw(self.settings.noise_ceiling);
        debug!(
            booking_rate,
            score,
            jitter,
            factors = factors.len(),
            "accumulated wastage score"
        );

        Ok(RiskAssessment::from_score(
            score + jitter,
            factors,
            booking_rate,
        ))
    }

    fn validate(&self, context: &MealContext) -> Result<()> {
        if context.total_students <= 0 {
            return Err(WastecastError::InvalidInput(format!(
                "total_students must be greater than 0 (got {})",
                context.total_students
            )));
        }
        if context.meals_booked < 0 {
            return Err(WastecastError::InvalidInput(format!(
                "meals_booked cannot be negative (got {})",
                context.meals_booked
            )));
        }
        if context.meals_booked > context.total_students {
            debug!(
                meals_booked = context.meals_booked,
                total_students = context.total_students,
                "more meals booked than students; scoring anyway"
            );
        }

        if let Some(hostel) = &context.hostel_name {
            if self.settings.hostel(hostel).is_none() {
                return Err(WastecastError::InvalidInput(format!(
                    "unknown hostel '{}' (expected one of: {})",
                    hostel.trim(),
                    self.settings.hostels.join(", ")
                )));
            }
        }
        if let Some(day) = context.day_of_week {
            if !self.settings.days.contains(&day) {
                return Err(not_offered("day of week", day.as_str()));
            }
        }
        if let Some(weather) = context.weather {
            if !self.settings.weather.contains(&weather) {
                return Err(not_offered("weather condition", weather.as_str()));
            }
        }
        if let Some(meal_type) = context.meal_type {
            if !self.settings.meal_types.contains(&meal_type) {
                return Err(not_offered("meal type", meal_type.as_str()));
            }
        }
        Ok(())
    }
}

fn not_offered(kind: &str, value: &str) -> WastecastError {
    WastecastError::InvalidInput(format!("{kind} '{value}' is not in the configured options"))
}
