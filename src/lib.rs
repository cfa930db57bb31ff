pub mod category;
pub mod config;
pub mod gpa;
pub mod models;
pub mod report;
pub mod scale;
pub mod scoring;
pub mod seed;
pub mod snapshot;
pub mod summary;

pub use category::aggregate;
pub use gpa::aggregate_gpa;
pub use scale::classify;
pub use scoring::{score_course, score_percentage, score_points};
