use crate::category::aggregate;
use crate::models::{GradeCategory, WeightingMode};

pub fn score_course(mode: WeightingMode, categories: &[GradeCategory]) -> Option<f64> {
    match mode {
        WeightingMode::Percentage => score_percentage(categories),
        WeightingMode::Points => score_points(categories),
    }
}

/// Weighted percentage over the categories that have both a weight and at
/// least one graded item, renormalized as if those weights summed to 100.
pub fn score_percentage(categories: &[GradeCategory]) -> Option<f64> {
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;

    for category in categories {
        let Some(weight) = category.weight else {
            continue;
        };
        let Some(average) = aggregate(&category.items, category.drop_lowest).average
        else {
            continue;
        };

        weighted_sum += (average / 100.0) * (weight / 100.0);
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return None;
    }

    let normalized_weight = total_weight / 100.0;
    Some((weighted_sum / normalized_weight) * 100.0)
}

/// Earned points over possible points. Every category with a positive point
/// total counts toward the possible points, graded or not.
pub fn score_points(categories: &[GradeCategory]) -> Option<f64> {
    let mut total_points = 0.0;
    let mut earned_points = 0.0;

    for category in categories {
        let points = match category.weight {
            Some(points) if points > 0.0 => points,
            _ => continue,
        };

        if let Some(average) = aggregate(&category.items, category.drop_lowest).average {
            earned_points += (average / 100.0) * points;
        }
        total_points += points;
    }

    if total_points == 0.0 {
        return None;
    }

    Some((earned_points / total_points) * 100.0)
}
