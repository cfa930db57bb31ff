use crate::models::ScaleEntry;
use crate::scale;

/// The slice of a course that GPA needs.
#[derive(Debug, Clone, Copy)]
pub struct GpaCourse<'a> {
    pub credit_hours: u32,
    pub final_percentage: Option<f64>,
    pub grading_scale: &'a [ScaleEntry],
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpaTotals {
    pub gpa: f64,
    pub counted_credits: u32,
}

/// Credit-weighted grade points across courses that have a final percentage.
/// Returns `0.0` when no course counts.
pub fn aggregate_gpa(courses: &[GpaCourse<'_>]) -> f64 {
    gpa_totals(courses).gpa
}

pub fn gpa_totals(courses: &[GpaCourse<'_>]) -> GpaTotals {
    let mut total_points = 0.0;
    let mut total_credits: u32 = 0;

    for course in courses {
        if course.final_percentage.is_none() {
            continue;
        }

        let letter = scale::classify(course.final_percentage, course.grading_scale);
        total_points += scale::grade_points(letter) * f64::from(course.credit_hours);
        total_credits = total_credits.saturating_add(course.credit_hours);
    }

    if total_credits == 0 {
        return GpaTotals::default();
    }

    GpaTotals {
        gpa: total_points / f64::from(total_credits),
        counted_credits: total_credits,
    }
}
