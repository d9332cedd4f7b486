//! Forest Service - builds and indexes every category schedule
//!
//! A category whose outline is corrupt is reported and left out; the other
//! categories still load.

use crate::domain::DomainError;
use crate::models::{ClassificationForest, Schedule};
use crate::modules::cataloguing_pro::build_tree;

/// Result of loading a set of schedules.
#[derive(Debug)]
pub struct ForestLoad {
    pub forest: ClassificationForest,
    /// Categories that failed to build, with the reason
    pub failures: Vec<(String, DomainError)>,
}

pub fn load_forest(schedules: &[Schedule], direct_categories: &[String]) -> ForestLoad {
    let mut forest = ClassificationForest::new();
    let mut failures = Vec::new();

    for schedule in schedules {
        match build_tree(schedule) {
            Ok(tree) => {
                tracing::info!(
                    "Loaded category {} ({}) with {} nodes",
                    schedule.code,
                    schedule.name,
                    tree.len()
                );
                forest.insert_tree(tree);
            }
            Err(e) => {
                tracing::warn!("Failed to build category {}: {}", schedule.code, e);
                failures.push((schedule.code.clone(), e));
            }
        }
    }

    forest.build_index(direct_categories);
    ForestLoad { forest, failures }
}
