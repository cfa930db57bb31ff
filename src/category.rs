use std::cmp::Ordering;

use crate::models::{CategoryAverage, GradeItem};

/// Averages the graded items of a category after dropping the lowest ones.
///
/// Ungraded items are ignored. At least one graded item is always kept, and a
/// negative `drop_lowest` counts as zero. Items with equal percents keep their
/// input order, so the earliest-listed one is dropped first.
pub fn aggregate(items: &[GradeItem], drop_lowest: Option<i64>) -> CategoryAverage {
    let mut graded: Vec<(&GradeItem, f64)> = items
        .iter()
        .filter_map(|item| item.percent.map(|percent| (item, percent)))
        .collect();

    if graded.is_empty() {
        return CategoryAverage::default();
    }

    // sort_by is stable
    graded.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let to_drop = drop_count(drop_lowest, graded.len());
    let (dropped, kept) = graded.split_at(to_drop);

    let sum: f64 = kept.iter().map(|(_, percent)| percent).sum();
    let average = sum / kept.len() as f64;

    CategoryAverage {
        average: Some(average),
        dropped_item_ids: dropped.iter().map(|(item, _)| item.id.clone()).collect(),
    }
}

fn drop_count(drop_lowest: Option<i64>, graded: usize) -> usize {
    let requested = usize::try_from(drop_lowest.unwrap_or(0).max(0)).unwrap_or(usize::MAX);
    requested.min(graded.saturating_sub(1))
}
