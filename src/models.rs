use serde::{Deserialize, Serialize};

/// How a course interprets its categories' `weight` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingMode {
    /// `weight` is a percent of the course grade.
    #[default]
    Percentage,
    /// `weight` is an absolute point total.
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeItem {
    pub id: String,
    pub name: String,
    /// `None` means the item has not been graded yet.
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCategory {
    pub id: String,
    pub label: String,
    pub weight: Option<f64>,
    pub multiple: bool,
    pub expected_count: Option<u32>,
    pub drop_lowest: Option<i64>,
    pub items: Vec<GradeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
    pub grade: String,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub number: String,
    pub credit_hours: u32,
    pub weighting_mode: WeightingMode,
    pub categories: Vec<GradeCategory>,
    pub grading_scale: Vec<ScaleEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub average: Option<f64>,
    /// Lowest percent first.
    pub dropped_item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    pub percent: Option<f64>,
    pub dropped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub label: String,
    pub weight: Option<f64>,
    pub multiple: bool,
    pub expected_count: Option<u32>,
    /// Items entered so far, graded or not.
    pub item_count: usize,
    pub graded_count: usize,
    pub drop_lowest: i64,
    pub average: Option<f64>,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
    pub number: String,
    pub credit_hours: u32,
    pub weighting_mode: WeightingMode,
    pub final_percentage: Option<f64>,
    pub letter_grade: Option<String>,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradebookSummary {
    pub courses: Vec<CourseSummary>,
    pub gpa: f64,
    pub counted_credits: u32,
}
