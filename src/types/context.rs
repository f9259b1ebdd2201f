use crate::error::WastecastError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Stormy,
    ];

    pub fn is_bad(self) -> bool {
        matches!(self, Weather::Rainy | Weather::Stormy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
            Weather::Stormy => "Stormy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

fn parse_choice<T: Copy>(
    kind: &str,
    input: &str,
    choices: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, WastecastError> {
    let wanted = input.trim();
    choices
        .iter()
        .copied()
        .find(|choice| name(*choice).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let allowed = choices.iter().map(|c| name(*c)).collect::<Vec<_>>();
            WastecastError::InvalidInput(format!(
                "unknown {kind} '{wanted}' (expected one of: {})",
                allowed.join(", ")
            ))
        })
}

impl FromStr for DayOfWeek {
    type Err = WastecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("day of week", s, &DayOfWeek::ALL, DayOfWeek::as_str)
    }
}

impl FromStr for Weather {
    type Err = WastecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("weather condition", s, &Weather::ALL, Weather::as_str)
    }
}

impl FromStr for MealType {
    type Err = WastecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("meal type", s, &MealType::ALL, MealType::as_str)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the yes/no spellings used by the planning form and the dataset
/// columns (`Yes`/`No`, `1`/`0`, `true`/`false`).
pub fn parse_flag(field: &str, input: &str) -> Result<bool, WastecastError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "1" | "true" => Ok(true),
        "no" | "n" | "0" | "false" => Ok(false),
        other => Err(WastecastError::InvalidInput(format!(
            "{field} must be yes/no or 1/0, got '{other}'"
        ))),
    }
}

/// One hostel/day/meal planning scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealContext {
    pub hostel_name: Option<String>,
    pub day_of_week: Option<DayOfWeek>,
    pub is_weekend: Option<bool>,
    pub total_students: i64,
    pub meals_booked: i64,
    pub special_event: bool,
    pub weather: Option<Weather>,
    pub meal_type: Option<MealType>,
}

impl MealContext {
    pub fn new(total_students: i64, meals_booked: i64) -> Self {
        Self {
            hostel_name: None,
            day_of_week: None,
            is_weekend: None,
            total_students,
            meals_booked,
            special_event: false,
            weather: None,
            meal_type: None,
        }
    }

    /// True when flagged explicitly or when the day falls on Saturday/Sunday.
    /// An explicit `false` does not mask a weekend day.
    pub fn weekend(&self) -> bool {
        self.is_weekend == Some(true) || self.day_of_week.is_some_and(DayOfWeek::is_weekend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_values_parse_case_insensitively() {
        let day: DayOfWeek = "saturday".parse().expect("day should parse");
        let weather: Weather = " Stormy ".parse().expect("weather should parse");
        let meal: MealType = "DINNER".parse().expect("meal should parse");
        assert_eq!(day, DayOfWeek::Saturday);
        assert_eq!(weather, Weather::Stormy);
        assert_eq!(meal, MealType::Dinner);
    }

    #[test]
    fn unknown_categorical_value_is_invalid_input() {
        let err = "Funday"
            .parse::<DayOfWeek>()
            .expect_err("unknown day should fail");
        assert!(matches!(err, WastecastError::InvalidInput(_)));
        assert!(err.to_string().contains("Monday"));

        assert!("Foggy".parse::<Weather>().is_err());
        assert!("Brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn weekend_is_derived_from_day_when_flag_absent() {
        let mut context = MealContext::new(60, 45);
        assert!(!context.weekend());

        context.day_of_week = Some(DayOfWeek::Sunday);
        assert!(context.weekend());

        context.day_of_week = Some(DayOfWeek::Tuesday);
        assert!(!context.weekend());

        context.is_weekend = Some(true);
        assert!(context.weekend());
    }

    #[test]
    fn explicit_false_does_not_mask_weekend_day() {
        let mut context = MealContext::new(60, 45);
        context.day_of_week = Some(DayOfWeek::Saturday);
        context.is_weekend = Some(false);
        assert!(context.weekend());
    }

    #[test]
    fn parse_flag_accepts_form_and_dataset_spellings() {
        assert!(matches!(parse_flag("special_event", "Yes"), Ok(true)));
        assert!(matches!(parse_flag("is_weekend", "1"), Ok(true)));
        assert!(matches!(parse_flag("is_weekend", "0"), Ok(false)));
        assert!(matches!(parse_flag("special_event", "no"), Ok(false)));
        assert!(parse_flag("special_event", "maybe").is_err());
    }
}
