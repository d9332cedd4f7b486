use std::collections::{BTreeMap, BTreeSet};

use crate::models::tree::ClassificationTree;
use crate::modules::cataloguing_pro::range_index::RangeIndex;

/// Every loaded category tree plus the lookup index used to classify items.
///
/// Built once, indexed once, then mutated by classification for the rest of
/// the process lifetime.
#[derive(Debug, Default)]
pub struct ClassificationForest {
    trees: BTreeMap<String, ClassificationTree>,
    known_codes: BTreeSet<String>,
    range_index: RangeIndex,
    total_items: usize,
}

impl ClassificationForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built tree under its root code. A tree already stored under
    /// the same code is replaced.
    pub fn insert_tree(&mut self, tree: ClassificationTree) {
        let code = tree.code().to_string();
        if self.trees.contains_key(&code) {
            tracing::warn!("Replacing existing tree for category {}", code);
        }
        self.known_codes.insert(code.clone());
        self.trees.insert(code, tree);
    }

    /// Rebuild the range index from the current trees.
    ///
    /// `direct_categories` lists the top-level codes indexed without a
    /// subcategory tier.
    pub fn build_index(&mut self, direct_categories: &[String]) {
        self.range_index = RangeIndex::build(&self.trees, direct_categories);
        tracing::info!(
            "Indexed {} categories ({} range tables)",
            self.range_index.len(),
            self.range_index.table_count()
        );
    }

    pub fn tree(&self, code: &str) -> Option<&ClassificationTree> {
        self.trees.get(code)
    }

    pub fn tree_mut(&mut self, code: &str) -> Option<&mut ClassificationTree> {
        self.trees.get_mut(code)
    }

    pub fn trees(&self) -> impl Iterator<Item = (&str, &ClassificationTree)> {
        self.trees.iter().map(|(code, tree)| (code.as_str(), tree))
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.known_codes.contains(code)
    }

    pub fn known_codes(&self) -> &BTreeSet<String> {
        &self.known_codes
    }

    pub fn range_index(&self) -> &RangeIndex {
        &self.range_index
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub(crate) fn record_item(&mut self) {
        self.total_items += 1;
    }
}
