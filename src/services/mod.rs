//! Services Layer
//!
//! This module contains the classification workflow on top of the models:
//! loading a forest from schedules and placing catalog items into it.

pub mod classification_service;
pub mod forest_service;

// Re-export for convenience
pub use classification_service::{
    ClassificationReport, Placement, SkipReason, classify_call_number, classify_item,
    classify_items,
};
pub use forest_service::{ForestLoad, load_forest};
