use crate::types::report::{BatchReport, PredictionReport};

pub fn prediction_to_markdown(report: &PredictionReport) -> String {
    let context = &report.context;
    let assessment = &report.assessment;
    let mut output = String::new();

    output.push_str("# Food Wastage Prediction\n\n");
    output.push_str(&format!(
        "Food wastage predicted: {:?}\n\n",
        assessment.label
    ));
    output.push_str(&format!(
        "- probability: {:.1}%\n- confidence: {:?}\n- booking rate: {:.1}% ({} of {})\n\n",
        assessment.probability * 100.0,
        assessment.confidence,
        assessment.booking_rate * 100.0,
        context.meals_booked,
        context.total_students
    ));

    output.push_str("## Meal Context\n\n");
    output.push_str(&format!(
        "- hostel: {}\n- day: {}\n- weekend: {}\n- special event: {}\n- weather: {}\n- meal: {}\n\n",
        context.hostel_name.as_deref().unwrap_or("-"),
        context
            .day_of_week
            .map(|day| day.as_str())
            .unwrap_or("-"),
        if context.weekend() { "yes" } else { "no" },
        if context.special_event { "yes" } else { "no" },
        context.weather.map(|w| w.as_str()).unwrap_or("-"),
        context.meal_type.map(|m| m.as_str()).unwrap_or("-"),
    ));

    output.push_str("## Contributing Factors\n\n");
    for factor in &assessment.contributing_factors {
        output.push_str(&format!("- {factor}\n"));
    }
    output.push('\n');

    output.push_str("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        output.push_str("- none\n");
    } else {
        for recommendation in &report.recommendations {
            output.push_str(&format!(
                "- {} ({:?}, expected reduction {}): {}\n",
                recommendation.title,
                recommendation.priority,
                recommendation.expected_reduction,
                recommendation.action
            ));
        }
    }

    output
}

pub fn batch_to_markdown(report: &BatchReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str("# Batch Wastage Report\n\n");
    output.push_str(&format!("Generated at: {}\n\n", report.generated_at));

    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- rows scored: {}\n- rows skipped: {}\n- predicted waste: {}\n- observed waste: {}\n- agreement: {} ({:.1}%)\n- mean probability: {:.1}%\n\n",
        summary.rows_scored,
        summary.rows_skipped,
        summary.predicted_waste,
        summary.observed_waste,
        summary.agreement,
        summary.agreement_rate * 100.0,
        summary.mean_probability * 100.0
    ));

    output.push_str("## Datasets\n\n");
    for dataset in &report.datasets {
        output.push_str(&format!(
            "- {} ({} rows, sha256 {})\n",
            dataset.path.display(),
            dataset.rows,
            dataset.sha256
        ));
    }
    output.push('\n');

    output.push_str("## Predictions\n\n");
    if report.rows.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| line | hostel | day | predicted | probability | observed | factors |\n");
        output.push_str("|---|---|---|---|---|---|---|\n");
        for row in &report.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {:?} | {:.1}% | {} | {} |\n",
                row.line,
                row.hostel_name,
                row.day_of_week,
                row.assessment.label,
                row.assessment.probability * 100.0,
                if row.observed_waste { "Yes" } else { "No" },
                row.assessment.factor_labels().join("; ")
            ));
        }
        output.push('\n');
    }

    if !report.skipped.is_empty() {
        output.push_str("## Skipped Rows\n\n");
        for skipped in &report.skipped {
            output.push_str(&format!(
                "- [warning] {}:{}: {}\n",
                skipped.file.display(),
                skipped.line,
                skipped.reason
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::prediction_report;
    use crate::dataset::batch::summarize;
    use crate::types::assessment::{Factor, RiskAssessment};
    use crate::types::context::{MealContext, MealType};
    use crate::types::report::SkippedRow;
    use std::path::PathBuf;

    #[test]
    fn prediction_markdown_contains_sections() {
        let mut context = MealContext::new(60, 20);
        context.meal_type = Some(MealType::Dinner);
        let assessment = RiskAssessment::from_score(
            0.7,
            vec![Factor::LowBookingRate, Factor::DinnerService],
            20.0 / 60.0,
        );

        let rendered = prediction_to_markdown(&prediction_report(context, assessment));
        assert!(rendered.contains("# Food Wastage Prediction"));
        assert!(rendered.contains("Food wastage predicted: Yes"));
        assert!(rendered.contains("- probability: 70.0%"));
        assert!(rendered.contains("- meal: Dinner"));
        assert!(rendered.contains("- Dinner service (higher waste tendency)"));
        assert!(rendered.contains("Dinner Preference Survey"));
    }

    #[test]
    fn batch_markdown_lists_skipped_rows() {
        let skipped = vec![SkippedRow {
            file: PathBuf::from("data.csv"),
            line: 4,
            reason: "invalid input: unknown hostel 'Ghost Hostel'".to_string(),
        }];
        let report = BatchReport {
            version: "0.1.0".to_string(),
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            datasets: vec![],
            summary: summarize(&[], skipped.len()),
            rows: vec![],
            skipped,
        };

        let rendered = batch_to_markdown(&report);
        assert!(rendered.contains("## Summary"));
        assert!(rendered.contains("- rows skipped: 1"));
        assert!(rendered.contains("## Skipped Rows"));
        assert!(rendered.contains("data.csv:4"));
    }
}
