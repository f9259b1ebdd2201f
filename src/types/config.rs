use crate::error::WastecastError;
use crate::types::context::{DayOfWeek, MealType, Weather};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

pub const DEFAULT_HOSTELS: [&str; 4] = [
    "Om Sai Hostel",
    "Amrutha Hostel",
    "Dwaraka Hostel",
    "Vijaya Aditya Hostel",
];
pub const DEFAULT_FLAGGED_HOSTEL: &str = "Dwaraka Hostel";
pub const DEFAULT_HOSTEL_ADJUSTMENT: f64 = 0.10;
pub const DEFAULT_NOISE_CEILING: f64 = 0.20;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WastecastConfig {
    pub options: Option<OptionsConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsConfig {
    pub hostels: Option<Vec<String>>,
    pub days: Option<Vec<String>>,
    pub weather: Option<Vec<String>>,
    pub meal_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub noise_ceiling: Option<f64>,
    pub seed: Option<u64>,
    pub hostel_adjustments: Option<BTreeMap<String, f64>>,
}

/// Option sets and hostel adjustments the scorer validates and scores against.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub hostels: Vec<String>,
    pub days: Vec<DayOfWeek>,
    pub weather: Vec<Weather>,
    pub meal_types: Vec<MealType>,
    pub hostel_adjustments: BTreeMap<String, f64>,
    pub noise_ceiling: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            hostels: DEFAULT_HOSTELS.iter().map(ToString::to_string).collect(),
            days: DayOfWeek::ALL.to_vec(),
            weather: Weather::ALL.to_vec(),
            meal_types: MealType::ALL.to_vec(),
            hostel_adjustments: BTreeMap::from([(
                DEFAULT_FLAGGED_HOSTEL.to_string(),
                DEFAULT_HOSTEL_ADJUSTMENT,
            )]),
            noise_ceiling: DEFAULT_NOISE_CEILING,
        }
    }
}

impl ScoringSettings {
    /// Finds a listed hostel ignoring ASCII case and surrounding whitespace,
    /// returning the configured spelling.
    pub fn hostel(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.hostels
            .iter()
            .map(String::as_str)
            .find(|known| known.eq_ignore_ascii_case(name))
    }

    pub fn hostel_adjustment(&self, name: &str) -> Option<f64> {
        let name = name.trim();
        self.hostel_adjustments
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, adjustment)| *adjustment)
    }
}

impl WastecastConfig {
    pub fn seed(&self) -> Option<u64> {
        self.scoring.as_ref().and_then(|scoring| scoring.seed)
    }

    /// Resolves the configured values over the built-in defaults.
    /// Call `validate` first; unparseable option entries are dropped here.
    pub fn settings(&self) -> ScoringSettings {
        let defaults = ScoringSettings::default();
        let options = self.options.clone().unwrap_or_default();
        let scoring = self.scoring.clone().unwrap_or_default();

        let hostels: Vec<String> = options
            .hostels
            .map(|hostels| hostels.iter().map(|h| h.trim().to_string()).collect())
            .unwrap_or(defaults.hostels);
        // Built-in adjustments only survive for hostels still listed.
        let hostel_adjustments = match scoring.hostel_adjustments {
            Some(adjustments) => adjustments
                .into_iter()
                .map(|(name, value)| (name.trim().to_string(), value))
                .collect(),
            None => defaults
                .hostel_adjustments
                .into_iter()
                .filter(|(name, _)| hostels.iter().any(|h| h.eq_ignore_ascii_case(name)))
                .collect(),
        };

        ScoringSettings {
            hostels,
            days: parsed_or(options.days, defaults.days),
            weather: parsed_or(options.weather, defaults.weather),
            meal_types: parsed_or(options.meal_types, defaults.meal_types),
            hostel_adjustments,
            noise_ceiling: scoring.noise_ceiling.unwrap_or(defaults.noise_ceiling),
        }
    }

    pub fn validate(&self) -> Result<(), WastecastError> {
        if let Some(options) = &self.options {
            if let Some(hostels) = &options.hostels {
                validate_unique("options.hostels", hostels)?;
            }
            if let Some(days) = &options.days {
                validate_choices::<DayOfWeek>("options.days", days)?;
            }
            if let Some(weather) = &options.weather {
                validate_choices::<Weather>("options.weather", weather)?;
            }
            if let Some(meal_types) = &options.meal_types {
                validate_choices::<MealType>("options.meal_types", meal_types)?;
            }
        }

        if let Some(scoring) = &self.scoring {
            if let Some(noise_ceiling) = scoring.noise_ceiling {
                if !(0.0..=1.0).contains(&noise_ceiling) {
                    return Err(WastecastError::ConfigParse(
                        "scoring.noise_ceiling must be between 0.0 and 1.0".to_string(),
                    ));
                }
            }
        }

        let settings = self.settings();
        let mut seen = HashSet::new();
        for (hostel, adjustment) in &settings.hostel_adjustments {
            if !seen.insert(hostel.to_ascii_lowercase()) {
                return Err(WastecastError::ConfigParse(format!(
                    "scoring.hostel_adjustments contains duplicate entry: {hostel}"
                )));
            }
            if !(0.0..=1.0).contains(adjustment) {
                return Err(WastecastError::ConfigParse(format!(
                    "scoring.hostel_adjustments.\"{hostel}\" must be between 0.0 and 1.0"
                )));
            }
            if settings.hostel(hostel).is_none() {
                return Err(WastecastError::ConfigParse(format!(
                    "scoring.hostel_adjustments names unknown hostel: {hostel}"
                )));
            }
        }

        Ok(())
    }
}

fn parsed_or<T: FromStr>(values: Option<Vec<String>>, fallback: Vec<T>) -> Vec<T> {
    match values {
        Some(values) => values
            .iter()
            .filter_map(|value| value.parse().ok())
            .collect(),
        None => fallback,
    }
}

fn validate_unique(key: &str, values: &[String]) -> Result<(), WastecastError> {
    if values.is_empty() {
        return Err(WastecastError::ConfigParse(format!(
            "{key} cannot be empty"
        )));
    }
    let mut seen = HashSet::new();
    for value in values {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(WastecastError::ConfigParse(format!(
                "{key} contains an empty entry"
            )));
        }
        if !seen.insert(normalized.to_ascii_lowercase()) {
            return Err(WastecastError::ConfigParse(format!(
                "{key} contains duplicate entry: {normalized}"
            )));
        }
    }
    Ok(())
}

fn validate_choices<T: FromStr<Err = WastecastError>>(
    key: &str,
    values: &[String],
) -> Result<(), WastecastError> {
    validate_unique(key, values)?;
    for value in values {
        value
            .parse::<T>()
            .map_err(|e| WastecastError::ConfigParse(format!("{key}: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> WastecastConfig {
        toml::from_str(input).expect("config should parse")
    }

    #[test]
    fn empty_config_resolves_to_builtin_defaults() {
        let config = parse("");
        config.validate().expect("empty config should validate");

        let settings = config.settings();
        assert_eq!(settings, ScoringSettings::default());
        assert_eq!(settings.hostels.len(), 4);
        assert_eq!(
            settings.hostel_adjustments.get("Dwaraka Hostel"),
            Some(&0.10)
        );
        assert_eq!(settings.noise_ceiling, 0.20);
    }

    #[test]
    fn configured_option_subsets_replace_defaults() {
        let config = parse(
            r#"
[options]
hostels = ["North Block", "South Block"]
days = ["monday", "Friday"]
meal_types = ["Lunch"]

[scoring]
noise_ceiling = 0.0
seed = 11

[scoring.hostel_adjustments]
"South Block" = 0.25
"#,
        );
        config.validate().expect("config should validate");

        let settings = config.settings();
        assert_eq!(settings.hostels, vec!["North Block", "South Block"]);
        assert_eq!(settings.days, vec![DayOfWeek::Monday, DayOfWeek::Friday]);
        assert_eq!(settings.weather, Weather::ALL.to_vec());
        assert_eq!(settings.meal_types, vec![MealType::Lunch]);
        assert_eq!(settings.hostel_adjustments.get("South Block"), Some(&0.25));
        assert_eq!(settings.noise_ceiling, 0.0);
        assert_eq!(config.seed(), Some(11));
    }

    #[test]
    fn custom_hostel_list_drops_unlisted_default_adjustment() {
        let config = parse(
            r#"
[options]
hostels = ["North Block"]
"#,
        );
        config.validate().expect("config should validate");
        assert!(config.settings().hostel_adjustments.is_empty());
    }

    #[test]
    fn validate_rejects_unknown_option_values() {
        let config = parse(
            r#"
[options]
weather = ["Sunny", "Foggy"]
"#,
        );
        let err = config.validate().expect_err("unknown weather should fail");
        assert!(err.to_string().contains("options.weather"));
    }

    #[test]
    fn validate_rejects_duplicate_hostels() {
        let config = parse(
            r#"
[options]
hostels = ["Om Sai Hostel", "om sai hostel"]
"#,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn hostel_lookup_ignores_case_like_duplicate_check() {
        let config = parse(
            r#"
[options]
hostels = ["North Block"]

[scoring.hostel_adjustments]
"north block" = 0.20
"#,
        );
        config.validate().expect("case-folded adjustment should validate");

        let settings = config.settings();
        assert_eq!(settings.hostel("  NORTH block "), Some("North Block"));
        assert_eq!(settings.hostel_adjustment("North Block"), Some(0.20));
        assert_eq!(settings.hostel("South Block"), None);
    }

    #[test]
    fn validate_rejects_case_folded_duplicate_adjustments() {
        let config = parse(
            r#"
[scoring.hostel_adjustments]
"Dwaraka Hostel" = 0.10
"dwaraka hostel" = 0.20
"#,
        );
        let err = config
            .validate()
            .expect_err("duplicate adjustment should fail");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn validate_rejects_out_of_range_scoring_values() {
        let noisy = parse(
            r#"
[scoring]
noise_ceiling = 1.5
"#,
        );
        assert!(noisy.validate().is_err());

        let heavy = parse(
            r#"
[scoring.hostel_adjustments]
"Dwaraka Hostel" = 2.0
"#,
        );
        assert!(heavy.validate().is_err());
    }

    #[test]
    fn validate_rejects_adjustment_for_unlisted_hostel() {
        let config = parse(
            r#"
[scoring.hostel_adjustments]
"Ghost Hostel" = 0.10
"#,
        );
        let err = config.validate().expect_err("unknown hostel should fail");
        assert!(err.to_string().contains("Ghost Hostel"));
    }
}
