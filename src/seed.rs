use crate::models::{ScaleEntry, WeightingMode};
use crate::snapshot::{RawCategory, RawCourse, RawItem, RawSnapshot};

fn items(prefix: &str, entries: &[(&str, Option<f64>)]) -> Vec<RawItem> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, (name, percent))| RawItem {
            id: format!("{prefix}-{}", idx + 1),
            name: name.to_string(),
            percent: *percent,
        })
        .collect()
}

fn category(
    id: &str,
    label: &str,
    weight: f64,
    expected_count: Option<i64>,
    drop_lowest: Option<i64>,
    entries: &[(&str, Option<f64>)],
) -> RawCategory {
    RawCategory {
        id: id.to_string(),
        label: label.to_string(),
        weight: Some(weight),
        multiple: entries.len() > 1 || expected_count.is_some_and(|n| n > 1),
        expected_count,
        drop_lowest,
        items: items(id, entries),
    }
}

/// A realistic single-semester snapshot: one percentage-weighted course, one
/// points-based course, and one course with nothing graded yet.
pub fn sample_snapshot() -> RawSnapshot {
    let calculus = RawCourse {
        id: "math-2210".to_string(),
        name: "Calculus II".to_string(),
        number: "MATH 2210".to_string(),
        credit_hours: 4,
        weighting_mode: WeightingMode::Percentage,
        categories: vec![
            category(
                "math-hw",
                "Homework",
                20.0,
                Some(10),
                Some(2),
                &[
                    ("Series", Some(95.0)),
                    ("Integration by parts", Some(62.0)),
                    ("Partial fractions", Some(88.0)),
                    ("Improper integrals", Some(100.0)),
                    ("Taylor polynomials", Some(71.0)),
                ],
            ),
            category(
                "math-exams",
                "Midterms",
                45.0,
                Some(2),
                None,
                &[("Midterm 1", Some(84.0)), ("Midterm 2", None)],
            ),
            category("math-final", "Final Exam", 35.0, None, None, &[]),
        ],
        grading_scale: None,
    };

    let writing = RawCourse {
        id: "engl-1010".to_string(),
        name: "Academic Writing".to_string(),
        number: "ENGL 1010".to_string(),
        credit_hours: 3,
        weighting_mode: WeightingMode::Points,
        categories: vec![
            category(
                "engl-essays",
                "Essays",
                300.0,
                Some(3),
                None,
                &[("Narrative", Some(91.0)), ("Argument", Some(86.5))],
            ),
            category(
                "engl-part",
                "Participation",
                100.0,
                None,
                None,
                &[("Workshop attendance", Some(100.0))],
            ),
        ],
        grading_scale: Some(
            [("A", 93.0), ("B", 83.0), ("C", 73.0), ("D", 60.0), ("F", 0.0)]
                .iter()
                .map(|(grade, threshold)| ScaleEntry {
                    grade: grade.to_string(),
                    threshold: *threshold,
                })
                .collect(),
        ),
    };

    let chemistry = RawCourse {
        id: "chem-1110".to_string(),
        name: "General Chemistry Lab".to_string(),
        number: "CHEM 1110".to_string(),
        credit_hours: 1,
        weighting_mode: WeightingMode::Percentage,
        categories: vec![category("chem-labs", "Lab Reports", 100.0, Some(8), Some(1), &[])],
        grading_scale: None,
    };

    RawSnapshot {
        courses: vec![calculus, writing, chemistry],
    }
}
