use grade_tracker::gpa::GpaCourse;
use grade_tracker::models::{GradeCategory, GradeItem, WeightingMode};
use grade_tracker::scale::default_scale;
use grade_tracker::snapshot::{parse_snapshot, validate};
use grade_tracker::summary::evaluate_gradebook;
use grade_tracker::{aggregate, aggregate_gpa, classify, score_percentage, score_points};

fn item(id: &str, percent: Option<f64>) -> GradeItem {
    GradeItem {
        id: id.to_string(),
        name: id.to_string(),
        percent,
    }
}

fn category(weight: Option<f64>, items: Vec<GradeItem>) -> GradeCategory {
    GradeCategory {
        id: "c".to_string(),
        label: "Category".to_string(),
        weight,
        multiple: items.len() > 1,
        expected_count: None,
        drop_lowest: None,
        items,
    }
}

#[test]
fn drop_one_of_three() {
    let items = vec![item("a", Some(70.0)), item("b", Some(60.0)), item("c", Some(80.0))];
    let result = aggregate(&items, Some(1));
    assert_eq!(result.dropped_item_ids, vec!["b".to_string()]);
    assert!((result.average.unwrap() - 75.0).abs() < 0.001);
}

#[test]
fn all_ungraded_category() {
    let result = aggregate(&[], Some(1));
    assert!(result.average.is_none());
    assert!(result.dropped_item_ids.is_empty());
}

#[test]
fn single_full_weight_category_ignores_ungraded_siblings() {
    let categories = vec![
        category(Some(100.0), vec![item("exam", Some(85.0))]),
        category(Some(30.0), vec![item("hw", None)]),
        category(Some(10.0), Vec::new()),
    ];
    assert!((score_percentage(&categories).unwrap() - 85.0).abs() < 1e-9);
}

#[test]
fn half_weight_category_renormalizes() {
    let categories = vec![category(Some(50.0), vec![item("midterm", Some(80.0))])];
    assert!((score_percentage(&categories).unwrap() - 80.0).abs() < 1e-9);
}

#[test]
fn ungraded_points_depress_score() {
    let categories = vec![
        category(Some(50.0), vec![item("project", Some(100.0))]),
        category(Some(50.0), Vec::new()),
    ];
    assert!((score_points(&categories).unwrap() - 50.0).abs() < 1e-9);
}

#[test]
fn threshold_boundary_is_inclusive() {
    assert_eq!(classify(Some(93.0), &default_scale()), Some("A"));
}

#[test]
fn gpa_ignores_courses_without_percentage() {
    let scale = default_scale();
    let courses = vec![
        GpaCourse {
            credit_hours: 3,
            final_percentage: Some(95.0),
            grading_scale: &scale,
        },
        GpaCourse {
            credit_hours: 4,
            final_percentage: None,
            grading_scale: &scale,
        },
    ];
    assert!((aggregate_gpa(&courses) - 4.0).abs() < 1e-9);
}

#[test]
fn full_semester_snapshot() {
    let raw = parse_snapshot(include_str!("fixtures/semester.json")).expect("parse fixture");
    let gradebook = validate(&raw, &default_scale()).expect("valid fixture");
    let summary = evaluate_gradebook(&gradebook);

    assert_eq!(summary.courses.len(), 3);

    // quizzes drop the 60 and average 75; labs and the unweighted category are skipped
    let physics = &summary.courses[0];
    assert_eq!(physics.weighting_mode, WeightingMode::Percentage);
    assert!((physics.final_percentage.unwrap() - 75.0).abs() < 1e-9);
    assert_eq!(physics.letter_grade.as_deref(), Some("C"));
    let quizzes = &physics.categories[0];
    assert_eq!(quizzes.graded_count, 3);
    assert_eq!(quizzes.item_count, quizzes.items.len());
    assert_eq!(
        quizzes
            .items
            .iter()
            .filter(|i| i.dropped)
            .map(|i| i.id.as_str())
            .collect::<Vec<_>>(),
        vec!["pq-1"]
    );

    let programming = &summary.courses[1];
    assert_eq!(programming.weighting_mode, WeightingMode::Points);
    assert!((programming.final_percentage.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(programming.letter_grade.as_deref(), Some("C"));

    let art = &summary.courses[2];
    assert!(art.final_percentage.is_none());
    assert!(art.letter_grade.is_none());

    // C (2.0) over 4 credits and C (2.0) over 3 credits
    assert_eq!(summary.counted_credits, 7);
    assert!((summary.gpa - 2.0).abs() < 1e-9);
}
