use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{CategorySummary, CourseSummary, GradebookSummary, WeightingMode};

pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}%"),
        None => "n/a".to_string(),
    }
}

fn describe_weight(mode: WeightingMode, weight: Option<f64>) -> String {
    match (mode, weight) {
        (_, None) => "weight not set".to_string(),
        (WeightingMode::Percentage, Some(weight)) => format!("{weight}% of grade"),
        (WeightingMode::Points, Some(points)) => format!("{points} points"),
    }
}

/// Multi-item categories with an expected count show entered items against
/// it; ungraded entries count as entered.
fn describe_progress(category: &CategorySummary) -> String {
    match category.expected_count {
        Some(expected) if category.multiple && expected > 0 => {
            format!("{}/{} grades", category.item_count, expected)
        }
        _ => format!("{} graded", category.graded_count),
    }
}

fn write_course(output: &mut String, course: &CourseSummary) {
    let _ = writeln!(output, "## {} {}", course.number, course.name);
    let _ = writeln!(
        output,
        "Final {} ({}), {} credit hours, {} weighting",
        format_percentage(course.final_percentage),
        course.letter_grade.as_deref().unwrap_or("no grade yet"),
        course.credit_hours,
        match course.weighting_mode {
            WeightingMode::Percentage => "percentage",
            WeightingMode::Points => "points",
        }
    );
    let _ = writeln!(output);

    if course.categories.is_empty() {
        let _ = writeln!(output, "No categories configured.");
        return;
    }

    for category in &course.categories {
        let _ = write!(
            output,
            "- {}: {} ({}, {})",
            category.label,
            format_percentage(category.average),
            describe_weight(course.weighting_mode, category.weight),
            describe_progress(category)
        );

        let dropped: Vec<&str> = category
            .items
            .iter()
            .filter(|item| item.dropped)
            .map(|item| item.name.as_str())
            .collect();
        if !dropped.is_empty() {
            let _ = write!(output, ", dropped: {}", dropped.join(", "));
        }
        let _ = writeln!(output);
    }
}

pub fn build_report(summary: &GradebookSummary, generated_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Grade Report");
    let _ = writeln!(output, "Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Overall GPA {:.2} across {} counted credit hours",
        summary.gpa, summary.counted_credits
    );

    if summary.courses.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No courses recorded.");
        return output;
    }

    for course in &summary.courses {
        let _ = writeln!(output);
        write_course(&mut output, course);
    }

    output
}
