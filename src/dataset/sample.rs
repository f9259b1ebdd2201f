use super::DatasetRecord;
use crate::error::{Result, WastecastError};
use std::path::Path;
use tracing::info;

pub fn sample_records() -> Vec<DatasetRecord> {
    [
        ("Om Sai Hostel", "Monday", 60, 45, 42, "No", "Sunny", "0", "1"),
        ("Amrutha Hostel", "Tuesday", 55, 50, 48, "No", "Cloudy", "0", "0"),
        ("Dwaraka Hostel", "Wednesday", 60, 38, 35, "Yes", "Rainy", "0", "1"),
        ("Vijaya Aditya Hostel", "Thursday", 60, 55, 53, "No", "Sunny", "0", "0"),
        ("Om Sai Hostel", "Friday", 60, 40, 35, "No", "Sunny", "0", "1"),
        ("Amrutha Hostel", "Saturday", 55, 30, 25, "No", "Cloudy", "1", "1"),
        ("Dwaraka Hostel", "Sunday", 60, 25, 20, "No", "Sunny", "1", "1"),
    ]
    .into_iter()
    .map(
        |(hostel, day, total, booked, consumed, event, weather, weekend, waste)| DatasetRecord {
            hostel_name: hostel.to_string(),
            day_of_week: day.to_string(),
            total_students: total,
            meals_booked: booked,
            meals_consumed: Some(consumed),
            special_event: event.to_string(),
            weather_condition: weather.to_string(),
            is_weekend: weekend.to_string(),
            waste_generated: waste.to_string(),
        },
    )
    .collect()
}

pub fn write_sample(path: &Path, force: bool) -> Result<usize> {
    if path.exists() && !force {
        return Err(WastecastError::OutputExists(path.display().to_string()));
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let records = sample_records();
    let mut writer = csv::Writer::from_path(path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "wrote sample dataset");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::batch::run_batch;
    use crate::dataset::COLUMNS;
    use crate::scorer::noise::FixedNoise;
    use crate::scorer::RiskScorer;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sample_has_schema_header_and_seven_rows() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("sample_hostel_data.csv");

        let written = write_sample(&path, false).expect("sample should write");
        assert_eq!(written, 7);

        let content = fs::read_to_string(&path).expect("sample should be readable");
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("Om Sai Hostel,Monday,60,45,42,No,Sunny,0,1")
        );
        assert_eq!(lines.count(), 6);
    }

    #[test]
    fn sample_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data.csv");
        fs::write(&path, "keep me").expect("existing file should write");

        let err = write_sample(&path, false).expect_err("overwrite should be refused");
        assert!(matches!(err, WastecastError::OutputExists(_)));
        assert_eq!(
            fs::read_to_string(&path).expect("file should be readable"),
            "keep me"
        );

        write_sample(&path, true).expect("forced write should succeed");
        assert!(fs::read_to_string(&path)
            .expect("file should be readable")
            .starts_with("hostel_name,"));
    }

    #[test]
    fn sample_scores_cleanly_through_batch() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("sample.csv");
        write_sample(&path, false).expect("sample should write");

        let report = run_batch(&[path], &RiskScorer::default(), &mut FixedNoise(0.0))
            .expect("batch should run");
        assert_eq!(report.summary.rows_scored, 7);
        assert!(report.skipped.is_empty());
    }
}
