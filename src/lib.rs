pub mod crawlers;
pub mod domain;
pub mod generation;
pub mod models;
pub mod processing;
pub mod repository;

/// Minimum similarity a record must reach before it is used to ground an answer.
pub const CONFIDENCE_FLOOR: f64 = 0.3;
