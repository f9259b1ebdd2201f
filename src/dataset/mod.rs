pub mod batch;
pub mod sample;

use crate::error::{Result, WastecastError};
use crate::types::context::{parse_flag, DayOfWeek, MealContext, Weather};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const COLUMNS: [&str; 9] = [
    "hostel_name",
    "day_of_week",
    "total_students",
    "meals_booked",
    "meals_consumed",
    "special_event",
    "weather_condition",
    "is_weekend",
    "waste_generated",
];

/// One row of the hostel wastage dataset, as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub hostel_name: String,
    pub day_of_week: String,
    pub total_students: i64,
    pub meals_booked: i64,
    #[serde(default)]
    pub meals_consumed: Option<i64>,
    pub special_event: String,
    pub weather_condition: String,
    pub is_weekend: String,
    pub waste_generated: String,
}

impl DatasetRecord {
    /// The dataset carries no meal column, so `meal_type` stays unset.
    pub fn to_context(&self) -> Result<MealContext> {
        let mut context = MealContext::new(self.total_students, self.meals_booked);
        context.hostel_name = non_empty(&self.hostel_name).map(ToString::to_string);
        context.day_of_week = non_empty(&self.day_of_week)
            .map(str::parse::<DayOfWeek>)
            .transpose()?;
        context.is_weekend = non_empty(&self.is_weekend)
            .map(|value| parse_flag("is_weekend", value))
            .transpose()?;
        context.special_event = parse_flag("special_event", &self.special_event)?;
        context.weather = non_empty(&self.weather_condition)
            .map(str::parse::<Weather>)
            .transpose()?;
        Ok(context)
    }

    pub fn observed_waste(&self) -> Result<bool> {
        parse_flag("waste_generated", &self.waste_generated)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// A data row and its 1-based line number in the source file.
#[derive(Debug)]
pub struct ParsedRow {
    pub line: u64,
    pub record: Result<DatasetRecord>,
}

/// Parses every data row; a malformed row is kept as an error so callers
/// can skip it without losing the rest of the file.
pub fn parse_rows<R: Read>(input: R) -> Result<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let missing = COLUMNS
        .iter()
        .filter(|column| **column != "meals_consumed")
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(WastecastError::InvalidInput(format!(
            "dataset is missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = match result {
            Ok(record) => ParsedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                record: record
                    .deserialize::<DatasetRecord>(Some(&headers))
                    .map_err(|e| WastecastError::InvalidInput(e.to_string())),
            },
            // Undecodable rows (bad UTF-8 and the like) are skipped, not fatal.
            Err(e) => ParsedRow {
                line: e.position().map(|p| p.line()).unwrap_or_default(),
                record: Err(e.into()),
            },
        };
        rows.push(row);
    }
    Ok(rows)
}

/// A file is returned as-is; a directory is searched recursively for `.csv`
/// files, sorted by path.
pub fn discover_datasets(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(WastecastError::PathNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "hostel_name,day_of_week,total_students,meals_booked,meals_consumed,special_event,weather_condition,is_weekend,waste_generated";

    #[test]
    fn parse_rows_maps_columns_to_context() {
        let input = format!("{HEADER}\nDwaraka Hostel,Sunday,60,25,20,No,Sunny,1,1\n");
        let rows = parse_rows(input.as_bytes()).expect("dataset should parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);

        let record = rows[0].record.as_ref().expect("row should deserialize");
        assert_eq!(record.meals_consumed, Some(20));
        assert!(record.observed_waste().expect("flag should parse"));

        let context = record.to_context().expect("row should map");
        assert_eq!(context.hostel_name.as_deref(), Some("Dwaraka Hostel"));
        assert_eq!(context.day_of_week, Some(DayOfWeek::Sunday));
        assert_eq!(context.is_weekend, Some(true));
        assert_eq!(context.weather, Some(Weather::Sunny));
        assert_eq!(context.meal_type, None);
        assert!(!context.special_event);
    }

    #[test]
    fn optional_consumed_column_may_be_empty_or_absent() {
        let input = format!("{HEADER}\nOm Sai Hostel,Monday,60,45,,No,Sunny,0,1\n");
        let rows = parse_rows(input.as_bytes()).expect("dataset should parse");
        let record = rows[0].record.as_ref().expect("row should deserialize");
        assert_eq!(record.meals_consumed, None);

        let without = "hostel_name,day_of_week,total_students,meals_booked,special_event,weather_condition,is_weekend,waste_generated\nOm Sai Hostel,Monday,60,45,No,Sunny,0,1\n";
        let rows = parse_rows(without.as_bytes()).expect("dataset should parse");
        assert!(rows[0].record.is_ok());
    }

    #[test]
    fn malformed_row_is_kept_as_error_with_line() {
        let input = format!(
            "{HEADER}\nOm Sai Hostel,Monday,sixty,45,42,No,Sunny,0,1\nAmrutha Hostel,Tuesday,55,50,48,No,Cloudy,0,0\n"
        );
        let rows = parse_rows(input.as_bytes()).expect("dataset should parse");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].record.is_err());
        assert_eq!(rows[0].line, 2);
        assert!(rows[1].record.is_ok());
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn missing_required_column_fails_whole_file() {
        let input = "hostel_name,day_of_week\nOm Sai Hostel,Monday\n";
        let err = parse_rows(input.as_bytes()).expect_err("missing columns should fail");
        assert!(err.to_string().contains("total_students"));
    }

    #[test]
    fn invalid_categorical_value_fails_mapping() {
        let input = format!("{HEADER}\nOm Sai Hostel,Caturday,60,45,42,No,Sunny,0,1\n");
        let rows = parse_rows(input.as_bytes()).expect("dataset should parse");
        let record = rows[0].record.as_ref().expect("row should deserialize");
        assert!(matches!(
            record.to_context(),
            Err(WastecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn discover_datasets_walks_directories_for_csv() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("nested")).expect("nested dir should create");
        fs::write(dir.path().join("b.csv"), HEADER).expect("csv should write");
        fs::write(dir.path().join("nested/a.CSV"), HEADER).expect("csv should write");
        fs::write(dir.path().join("notes.txt"), "ignore").expect("txt should write");

        let found = discover_datasets(dir.path()).expect("discovery should succeed");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|path| path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))));
    }

    #[test]
    fn discover_datasets_rejects_missing_path() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = discover_datasets(&dir.path().join("absent.csv"))
            .expect_err("missing path should fail");
        assert!(matches!(err, WastecastError::PathNotFound(_)));
    }
}
