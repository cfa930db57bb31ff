use std::cmp::Ordering;

use crate::models::ScaleEntry;

/// Grade returned when no scale entry matches.
pub const FALLBACK_GRADE: &str = "F";

/// Scale given to new courses.
///
/// | Threshold | Grade |
/// |-----------|-------|
/// | >= 97     | A+    |
/// | >= 93     | A     |
/// | >= 90     | A-    |
/// | >= 87     | B+    |
/// | >= 83     | B     |
/// | >= 80     | B-    |
/// | >= 77     | C+    |
/// | >= 73     | C     |
/// | >= 70     | C-    |
/// | >= 67     | D+    |
/// | >= 63     | D     |
/// | >= 60     | D-    |
/// | >= 0      | F     |
pub static DEFAULT_GRADING_SCALE: &[(&str, f64)] = &[
    ("A+", 97.0),
    ("A", 93.0),
    ("A-", 90.0),
    ("B+", 87.0),
    ("B", 83.0),
    ("B-", 80.0),
    ("C+", 77.0),
    ("C", 73.0),
    ("C-", 70.0),
    ("D+", 67.0),
    ("D", 63.0),
    ("D-", 60.0),
    ("F", 0.0),
];

pub fn default_scale() -> Vec<ScaleEntry> {
    DEFAULT_GRADING_SCALE
        .iter()
        .map(|(grade, threshold)| ScaleEntry {
            grade: grade.to_string(),
            threshold: *threshold,
        })
        .collect()
}

/// Returns the grade of the highest threshold not exceeding `percentage`.
///
/// The scale may be in any order. Falls back to [`FALLBACK_GRADE`] when no
/// entry matches.
pub fn classify(percentage: Option<f64>, scale: &[ScaleEntry]) -> Option<&str> {
    let percentage = percentage?;

    let mut sorted: Vec<&ScaleEntry> = scale.iter().collect();
    sorted.sort_by(|a, b| {
        b.threshold
            .partial_cmp(&a.threshold)
            .unwrap_or(Ordering::Equal)
    });

    let grade = sorted
        .into_iter()
        .find(|entry| percentage >= entry.threshold)
        .map(|entry| entry.grade.as_str())
        .unwrap_or(FALLBACK_GRADE);

    Some(grade)
}

/// Grade-point value of a letter grade. Unknown letters are worth nothing.
pub fn grade_points(letter: Option<&str>) -> f64 {
    match letter {
        Some("A+") | Some("A") => 4.0,
        Some("A-") => 3.7,
        Some("B+") => 3.3,
        Some("B") => 3.0,
        Some("B-") => 2.7,
        Some("C+") => 2.3,
        Some("C") => 2.0,
        Some("C-") => 1.7,
        Some("D+") => 1.3,
        Some("D") => 1.0,
        Some("D-") => 0.7,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(grade: &str, threshold: f64) -> ScaleEntry {
        ScaleEntry {
            grade: grade.to_string(),
            threshold,
        }
    }

    #[test]
    fn test_default_scale_boundaries() {
        let scale = default_scale();
        assert_eq!(classify(Some(100.0), &scale), Some("A+"));
        assert_eq!(classify(Some(97.0), &scale), Some("A+"));
        assert_eq!(classify(Some(96.9), &scale), Some("A"));
        assert_eq!(classify(Some(93.0), &scale), Some("A"));
        assert_eq!(classify(Some(92.99), &scale), Some("A-"));
        assert_eq!(classify(Some(83.0), &scale), Some("B"));
        assert_eq!(classify(Some(72.5), &scale), Some("C-"));
        assert_eq!(classify(Some(60.0), &scale), Some("D-"));
        assert_eq!(classify(Some(59.9), &scale), Some("F"));
        assert_eq!(classify(Some(0.0), &scale), Some("F"));
    }

    #[test]
    fn missing_percentage_has_no_grade() {
        assert_eq!(classify(None, &default_scale()), None);
        assert_eq!(classify(None, &[]), None);
    }

    #[test]
    fn unsorted_scale_is_evaluated_descending() {
        let scale = vec![
            entry("Pass", 50.0),
            entry("Fail", 0.0),
            entry("Distinction", 85.0),
            entry("Merit", 70.0),
        ];
        assert_eq!(classify(Some(90.0), &scale), Some("Distinction"));
        assert_eq!(classify(Some(70.0), &scale), Some("Merit"));
        assert_eq!(classify(Some(51.0), &scale), Some("Pass"));
        assert_eq!(classify(Some(10.0), &scale), Some("Fail"));
    }

    #[test]
    fn falls_back_to_f_without_a_floor() {
        assert_eq!(classify(Some(88.0), &[]), Some("F"));
        let scale = vec![entry("A", 90.0), entry("B", 80.0)];
        assert_eq!(classify(Some(42.0), &scale), Some("F"));
        assert_eq!(classify(Some(-5.0), &default_scale()), Some("F"));
    }

    #[test]
    fn extra_credit_stays_at_top_grade() {
        assert_eq!(classify(Some(112.0), &default_scale()), Some("A+"));
    }

    #[test]
    fn grade_points_follow_table() {
        assert_eq!(grade_points(Some("A+")), 4.0);
        assert_eq!(grade_points(Some("A")), 4.0);
        assert_eq!(grade_points(Some("A-")), 3.7);
        assert_eq!(grade_points(Some("B+")), 3.3);
        assert_eq!(grade_points(Some("B")), 3.0);
        assert_eq!(grade_points(Some("B-")), 2.7);
        assert_eq!(grade_points(Some("C+")), 2.3);
        assert_eq!(grade_points(Some("C")), 2.0);
        assert_eq!(grade_points(Some("C-")), 1.7);
        assert_eq!(grade_points(Some("D+")), 1.3);
        assert_eq!(grade_points(Some("D")), 1.0);
        assert_eq!(grade_points(Some("D-")), 0.7);
        assert_eq!(grade_points(Some("F")), 0.0);
        assert_eq!(grade_points(Some("Distinction")), 0.0);
        assert_eq!(grade_points(None), 0.0);
    }
}
