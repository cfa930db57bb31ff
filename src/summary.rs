use tracing::debug;

use crate::category::aggregate;
use crate::gpa::{self, GpaCourse};
use crate::models::{
    CategorySummary, Course, CourseSummary, GradeCategory, Gradebook, GradebookSummary,
    ItemSummary,
};
use crate::scale;
use crate::scoring;

pub fn summarize_category(category: &GradeCategory) -> CategorySummary {
    let result = aggregate(&category.items, category.drop_lowest);

    let items = category
        .items
        .iter()
        .map(|item| ItemSummary {
            id: item.id.clone(),
            name: item.name.clone(),
            percent: item.percent,
            dropped: result.dropped_item_ids.contains(&item.id),
        })
        .collect();

    CategorySummary {
        id: category.id.clone(),
        label: category.label.clone(),
        weight: category.weight,
        multiple: category.multiple,
        expected_count: category.expected_count,
        item_count: category.items.len(),
        graded_count: category.items.iter().filter(|i| i.percent.is_some()).count(),
        drop_lowest: category.drop_lowest.unwrap_or(0).max(0),
        average: result.average,
        items,
    }
}

pub fn evaluate_course(course: &Course) -> CourseSummary {
    let categories: Vec<CategorySummary> =
        course.categories.iter().map(summarize_category).collect();
    let final_percentage = scoring::score_course(course.weighting_mode, &course.categories);
    let letter_grade = scale::classify(final_percentage, &course.grading_scale).map(str::to_owned);

    debug!(
        course = %course.id,
        mode = ?course.weighting_mode,
        final_percentage = ?final_percentage,
        letter_grade = ?letter_grade,
        "evaluated course"
    );

    CourseSummary {
        id: course.id.clone(),
        name: course.name.clone(),
        number: course.number.clone(),
        credit_hours: course.credit_hours,
        weighting_mode: course.weighting_mode,
        final_percentage,
        letter_grade,
        categories,
    }
}

pub fn evaluate_gradebook(gradebook: &Gradebook) -> GradebookSummary {
    let courses: Vec<CourseSummary> = gradebook.courses.iter().map(evaluate_course).collect();

    let gpa_inputs: Vec<GpaCourse<'_>> = gradebook
        .courses
        .iter()
        .zip(&courses)
        .map(|(course, summary)| GpaCourse {
            credit_hours: course.credit_hours,
            final_percentage: summary.final_percentage,
            grading_scale: &course.grading_scale,
        })
        .collect();
    let totals = gpa::gpa_totals(&gpa_inputs);

    debug!(
        courses = courses.len(),
        gpa = totals.gpa,
        counted_credits = totals.counted_credits,
        "evaluated gradebook"
    );

    GradebookSummary {
        courses,
        gpa: totals.gpa,
        counted_credits: totals.counted_credits,
    }
}
