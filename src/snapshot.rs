//! Strict boundary between loosely-typed snapshot documents and the typed
//! records the grading functions consume.
//!
//! A snapshot is a JSON document of the form `{ "courses": [ ... ] }`. Every
//! record is checked here so the grading code can assume finite numbers,
//! positive credit hours, and unique identifiers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Course, GradeCategory, GradeItem, Gradebook, ScaleEntry, WeightingMode};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot JSON")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("duplicate course id `{0}`")]
    DuplicateCourse(String),
    #[error("course `{course}`: credit hours must be positive, got {credit_hours}")]
    CreditHours { course: String, credit_hours: i64 },
    #[error("course `{course}`, category `{category}`: {field} must be a finite number")]
    NonFiniteCategory {
        course: String,
        category: String,
        field: &'static str,
    },
    #[error("course `{course}`, category `{category}`: {field} must not be negative, got {value}")]
    NegativeCount {
        course: String,
        category: String,
        field: &'static str,
        value: i64,
    },
    #[error("course `{course}`: item `{item}` percent must be a finite number")]
    NonFinitePercent { course: String, item: String },
    #[error("course `{course}`: duplicate category id `{category}`")]
    DuplicateCategory { course: String, category: String },
    #[error("course `{course}`: duplicate item id `{item}`")]
    DuplicateItem { course: String, item: String },
    #[error("{owner}: grading scale entry `{grade}` has a non-finite threshold")]
    NonFiniteThreshold { owner: String, grade: String },
    #[error("{owner}: grading scale has an empty grade letter")]
    EmptyGrade { owner: String },
    #[error("{owner}: grading scale lists `{grade}` more than once")]
    DuplicateGrade { owner: String, grade: String },
    #[error("CSV row {row}: unknown course `{course}`")]
    UnknownCourse { row: usize, course: String },
    #[error("CSV row {row}: course `{course}` has no category `{category}`")]
    UnknownCategory {
        row: usize,
        course: String,
        category: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSnapshot {
    #[serde(default)]
    pub courses: Vec<RawCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCourse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: String,
    pub credit_hours: i64,
    #[serde(default)]
    pub weighting_mode: WeightingMode,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_scale: Option<Vec<ScaleEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCategory {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub expected_count: Option<i64>,
    #[serde(default)]
    pub drop_lowest: Option<i64>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub percent: Option<f64>,
}

pub fn parse_snapshot(json: &str) -> Result<RawSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_snapshot(path: &Path) -> Result<RawSnapshot, SnapshotError> {
    let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&json)?;
    debug!(path = %path.display(), courses = snapshot.courses.len(), "loaded snapshot");
    Ok(snapshot)
}

pub fn write_snapshot(path: &Path, snapshot: &RawSnapshot) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Validates a snapshot into a [`Gradebook`]. Courses without a grading scale
/// receive `default_scale`.
pub fn validate(raw: &RawSnapshot, default_scale: &[ScaleEntry]) -> Result<Gradebook, SnapshotError> {
    let mut course_ids = HashSet::new();
    let mut courses = Vec::with_capacity(raw.courses.len());

    for course in &raw.courses {
        if !course_ids.insert(course.id.as_str()) {
            return Err(SnapshotError::DuplicateCourse(course.id.clone()));
        }
        courses.push(validate_course(course, default_scale)?);
    }

    Ok(Gradebook { courses })
}

fn validate_course(raw: &RawCourse, default_scale: &[ScaleEntry]) -> Result<Course, SnapshotError> {
    let credit_hours = u32::try_from(raw.credit_hours)
        .ok()
        .filter(|hours| *hours > 0)
        .ok_or_else(|| SnapshotError::CreditHours {
            course: raw.id.clone(),
            credit_hours: raw.credit_hours,
        })?;

    let mut category_ids = HashSet::new();
    let mut item_ids = HashSet::new();
    let mut categories = Vec::with_capacity(raw.categories.len());
    for category in &raw.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(SnapshotError::DuplicateCategory {
                course: raw.id.clone(),
                category: category.id.clone(),
            });
        }
        categories.push(validate_category(&raw.id, category, &mut item_ids)?);
    }

    let grading_scale = match &raw.grading_scale {
        Some(scale) => {
            validate_scale(&format!("course `{}`", raw.id), scale)?;
            scale.clone()
        }
        None => default_scale.to_vec(),
    };

    Ok(Course {
        id: raw.id.clone(),
        name: raw.name.clone(),
        number: raw.number.clone(),
        credit_hours,
        weighting_mode: raw.weighting_mode,
        categories,
        grading_scale,
    })
}

fn validate_category<'a>(
    course: &str,
    raw: &'a RawCategory,
    item_ids: &mut HashSet<&'a str>,
) -> Result<GradeCategory, SnapshotError> {
    if raw.weight.is_some_and(|w| !w.is_finite()) {
        return Err(SnapshotError::NonFiniteCategory {
            course: course.to_string(),
            category: raw.id.clone(),
            field: "weight",
        });
    }

    let negative = |field: &'static str, value: i64| SnapshotError::NegativeCount {
        course: course.to_string(),
        category: raw.id.clone(),
        field,
        value,
    };
    if let Some(value) = raw.drop_lowest.filter(|v| *v < 0) {
        return Err(negative("drop_lowest", value));
    }
    let expected_count = match raw.expected_count {
        None => None,
        Some(value) => Some(u32::try_from(value).map_err(|_| negative("expected_count", value))?),
    };

    let mut items = Vec::with_capacity(raw.items.len());
    for item in &raw.items {
        if item.percent.is_some_and(|p| !p.is_finite()) {
            return Err(SnapshotError::NonFinitePercent {
                course: course.to_string(),
                item: item.id.clone(),
            });
        }
        if !item_ids.insert(item.id.as_str()) {
            return Err(SnapshotError::DuplicateItem {
                course: course.to_string(),
                item: item.id.clone(),
            });
        }
        items.push(GradeItem {
            id: item.id.clone(),
            name: item.name.clone(),
            percent: item.percent,
        });
    }

    Ok(GradeCategory {
        id: raw.id.clone(),
        label: raw.label.clone(),
        weight: raw.weight,
        multiple: raw.multiple,
        expected_count,
        drop_lowest: raw.drop_lowest,
        items,
    })
}

/// Checks that every threshold is finite and every grade letter is present
/// and unique. `owner` names the scale in error messages.
pub fn validate_scale(owner: &str, scale: &[ScaleEntry]) -> Result<(), SnapshotError> {
    let mut grades = HashSet::new();
    for entry in scale {
        if entry.grade.trim().is_empty() {
            return Err(SnapshotError::EmptyGrade {
                owner: owner.to_string(),
            });
        }
        if !entry.threshold.is_finite() {
            return Err(SnapshotError::NonFiniteThreshold {
                owner: owner.to_string(),
                grade: entry.grade.clone(),
            });
        }
        if !grades.insert(entry.grade.as_str()) {
            return Err(SnapshotError::DuplicateGrade {
                owner: owner.to_string(),
                grade: entry.grade.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    course_id: String,
    category: String,
    name: String,
    percent: Option<f64>,
    #[serde(default)]
    id: Option<String>,
}

/// Appends grade items from a CSV file to `snapshot`.
///
/// Columns are `course_id,category,name,percent[,id]`. `category` matches a
/// category id or label. An empty `percent` imports an ungraded item, and a
/// missing `id` is generated. Returns the number of imported rows.
pub fn import_items_csv(snapshot: &mut RawSnapshot, csv_path: &Path) -> Result<usize, SnapshotError> {
    let csv_error = |source: csv::Error| SnapshotError::Csv {
        path: csv_path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(csv_path)
        .map_err(csv_error)?;

    let mut inserted = 0usize;
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(csv_error)?;
        // header is line 1
        let line = idx + 2;

        let course = snapshot
            .courses
            .iter_mut()
            .find(|c| c.id == row.course_id)
            .ok_or_else(|| SnapshotError::UnknownCourse {
                row: line,
                course: row.course_id.clone(),
            })?;
        let category = course
            .categories
            .iter_mut()
            .find(|c| c.id == row.category || c.label.eq_ignore_ascii_case(&row.category))
            .ok_or_else(|| SnapshotError::UnknownCategory {
                row: line,
                course: row.course_id.clone(),
                category: row.category.clone(),
            })?;

        let id = row
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));
        category.items.push(RawItem {
            id,
            name: row.name,
            percent: row.percent,
        });
        inserted += 1;
    }

    info!(path = %csv_path.display(), inserted, "imported grade items");
    Ok(inserted)
}
