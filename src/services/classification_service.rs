//! Classification Service - places catalog items into a loaded forest
//!
//! An item's call number is resolved to the narrowest matching node through
//! the range index, then the count and item summary are pushed up the
//! ancestor chain. Items that cannot be placed are skipped and never count
//! towards the forest total.

use crate::models::{ClassificationForest, ItemEntry, ItemRecord, ItemSummary, NodeId};
use crate::modules::cataloguing_pro::CallNumber;

/// Why an item was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Call number does not start with a class letter
    UnparsableCode,
    /// No tree loaded for the top-level code
    UnknownCategory,
    /// Direct category given a subcategory, or no class number
    InvalidDirectCombination,
    /// No range table for the subcategory
    UnknownSubcategory,
    /// No range matched and the subcategory is not a child of the root
    NotASubcategory,
}

/// Where an item ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Counted at `node` and every ancestor
    Node { category: String, node: NodeId },
    /// No range matched; counted at the subcategory and the root only
    Subcategory { category: String, node: NodeId },
    Skipped(SkipReason),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassificationReport {
    pub placed: usize,
    pub fallback: usize,
    pub skipped: usize,
}

impl ClassificationReport {
    pub fn classified(&self) -> usize {
        self.placed + self.fallback
    }
}

/// Classify every item in order.
pub fn classify_items(forest: &mut ClassificationForest, items: &[ItemRecord]) -> ClassificationReport {
    let mut report = ClassificationReport::default();
    for item in items {
        match classify_item(forest, item) {
            Placement::Node { .. } => report.placed += 1,
            Placement::Subcategory { .. } => report.fallback += 1,
            Placement::Skipped(_) => report.skipped += 1,
        }
    }

    tracing::info!(
        "Classified {} of {} items ({} at subcategory level), forest total {}",
        report.classified(),
        items.len(),
        report.fallback,
        forest.total_items()
    );
    report
}

pub fn classify_item(forest: &mut ClassificationForest, item: &ItemRecord) -> Placement {
    let Some(call_number) = CallNumber::parse(&item.call_number) else {
        tracing::debug!(
            "Skipping item {}: unparsable call number '{}'",
            item.catalog_id,
            item.call_number
        );
        return Placement::Skipped(SkipReason::UnparsableCode);
    };

    let placement = classify_call_number(forest, &call_number, item.to_summary());
    if let Placement::Skipped(reason) = &placement {
        tracing::debug!(
            "Skipping item {} ({}): {:?}",
            item.catalog_id,
            item.call_number,
            reason
        );
    }
    placement
}

/// Resolve an already decomposed call number and aggregate `summary` into the forest.
pub fn classify_call_number(
    forest: &mut ClassificationForest,
    call_number: &CallNumber,
    summary: ItemSummary,
) -> Placement {
    let category = call_number.top_level.to_string();
    let index = forest.range_index();

    let (subcategory, node) = if let Some(table) = index.direct_table(&category) {
        // Direct categories have no subcategory tier
        let Some(number) = call_number.number else {
            return Placement::Skipped(SkipReason::InvalidDirectCombination);
        };
        if call_number.subcategory.is_some() {
            return Placement::Skipped(SkipReason::InvalidDirectCombination);
        }
        (category.clone(), table.find_lowest(number))
    } else if forest.is_known(&category) {
        let subcategory = call_number.subcategory_key();
        let Some(table) = index.subcategory_table(&category, &subcategory) else {
            return Placement::Skipped(SkipReason::UnknownSubcategory);
        };
        let node = call_number.number.and_then(|n| table.find_lowest(n));
        (subcategory, node)
    } else {
        return Placement::Skipped(SkipReason::UnknownCategory);
    };

    match node {
        Some(node) => aggregate_at_node(forest, category, node, summary),
        None => aggregate_at_subcategory(forest, category, &subcategory, summary),
    }
}

fn aggregate_at_node(
    forest: &mut ClassificationForest,
    category: String,
    node: NodeId,
    summary: ItemSummary,
) -> Placement {
    let Some(tree) = forest.tree_mut(&category) else {
        return Placement::Skipped(SkipReason::UnknownCategory);
    };
    tree.aggregate_upward(node, |n| {
        n.item_count += 1;
        n.items.push(ItemEntry::Record(summary.clone()));
    });
    forest.record_item();
    Placement::Node { category, node }
}

/// Count the item at the subcategory and at the root.
///
/// The subcategory only receives the top-level code as a cross-reference;
/// the full summary is kept on the root.
fn aggregate_at_subcategory(
    forest: &mut ClassificationForest,
    category: String,
    subcategory: &str,
    summary: ItemSummary,
) -> Placement {
    let Some(tree) = forest.tree_mut(&category) else {
        return Placement::Skipped(SkipReason::UnknownCategory);
    };
    let root = tree.root();
    let Some(child) = tree.find_child(root, subcategory) else {
        return Placement::Skipped(SkipReason::NotASubcategory);
    };

    let child_node = tree.node_mut(child);
    child_node.item_count += 1;
    child_node.items.push(ItemEntry::CrossReference(category.clone()));

    let root_node = tree.node_mut(root);
    root_node.item_count += 1;
    root_node.items.push(ItemEntry::Record(summary));

    forest.record_item();
    Placement::Subcategory {
        category,
        node: child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationNode, ClassificationTree};

    fn item(id: &str, call_number: &str) -> ItemRecord {
        ItemRecord {
            catalog_id: id.to_string(),
            call_number: call_number.to_string(),
            year: "2001".to_string(),
            title: format!("Title {}", id),
            summary: "Summary".to_string(),
        }
    }

    fn forest() -> ClassificationForest {
        let mut e = ClassificationTree::new(ClassificationNode::alphabetic("E", "America", 0));
        e.add_child(e.root(), ClassificationNode::new("E400-499", "Civil War", 1).unwrap());

        let mut q = ClassificationTree::new(ClassificationNode::alphabetic("Q", "Science", 0));
        let qa = q.add_child(q.root(), ClassificationNode::alphabetic("QA", "Mathematics", 1));
        let qa_all = q.add_child(qa, ClassificationNode::new("QA1-939", "Mathematics", 2).unwrap());
        q.add_child(qa_all, ClassificationNode::new("QA75.5-76.95", "Computers", 3).unwrap());
        q.add_child(q.root(), ClassificationNode::alphabetic("QB", "Astronomy", 1));

        let mut forest = ClassificationForest::new();
        forest.insert_tree(e);
        forest.insert_tree(q);
        forest.build_index(&["E".to_string(), "F".to_string()]);
        forest
    }

    fn count(forest: &ClassificationForest, category: &str, id: usize) -> usize {
        forest.tree(category).unwrap().node(NodeId(id)).item_count
    }

    #[test]
    fn test_direct_category_item() {
        let mut forest = forest();
        let placement = classify_item(&mut forest, &item("1", "E450"));

        assert_eq!(
            placement,
            Placement::Node {
                category: "E".to_string(),
                node: NodeId(1)
            }
        );
        assert_eq!(count(&forest, "E", 1), 1);
        assert_eq!(count(&forest, "E", 0), 1);
        assert_eq!(forest.total_items(), 1);
    }

    #[test]
    fn test_direct_category_rejects_subcategory_and_missing_number() {
        let mut forest = forest();
        assert_eq!(
            classify_item(&mut forest, &item("1", "EA450")),
            Placement::Skipped(SkipReason::InvalidDirectCombination)
        );
        assert_eq!(
            classify_item(&mut forest, &item("2", "E")),
            Placement::Skipped(SkipReason::InvalidDirectCombination)
        );
        assert_eq!(forest.total_items(), 0);
    }

    #[test]
    fn test_deep_node_counts_every_ancestor_once() {
        let mut forest = forest();
        let placement = classify_item(&mut forest, &item("1", "QA76.73.P98"));

        assert_eq!(
            placement,
            Placement::Node {
                category: "Q".to_string(),
                node: NodeId(3)
            }
        );
        for id in 0..4 {
            assert_eq!(count(&forest, "Q", id), 1, "node {}", id);
        }
        assert_eq!(count(&forest, "Q", 4), 0);
        assert_eq!(forest.total_items(), 1);

        let tree = forest.tree("Q").unwrap();
        assert_eq!(
            tree.node(NodeId(3)).items,
            vec![ItemEntry::Record(ItemSummary {
                title: "Title 1".to_string(),
                year: "2001".to_string(),
                summary: "Summary".to_string(),
            })]
        );
    }

    #[test]
    fn test_unknown_subcategory_is_skipped() {
        let mut forest = forest();
        assert_eq!(
            classify_item(&mut forest, &item("1", "QZ12")),
            Placement::Skipped(SkipReason::UnknownSubcategory)
        );
        assert_eq!(forest.total_items(), 0);
        assert!(forest.tree("Q").unwrap().iter().all(|(_, n)| n.item_count == 0));
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let mut forest = forest();
        assert_eq!(
            classify_item(&mut forest, &item("1", "Z699")),
            Placement::Skipped(SkipReason::UnknownCategory)
        );
        assert_eq!(
            classify_item(&mut forest, &item("2", "123.4")),
            Placement::Skipped(SkipReason::UnparsableCode)
        );
    }

    #[test]
    fn test_no_range_falls_back_to_subcategory() {
        let mut forest = forest();
        let placement = classify_item(&mut forest, &item("1", "QB500"));

        assert_eq!(
            placement,
            Placement::Subcategory {
                category: "Q".to_string(),
                node: NodeId(4)
            }
        );
        let tree = forest.tree("Q").unwrap();
        let qb = tree.node(NodeId(4));
        assert_eq!(qb.item_count, 1);
        assert_eq!(qb.items, vec![ItemEntry::CrossReference("Q".to_string())]);

        let root = tree.node(tree.root());
        assert_eq!(root.item_count, 1);
        assert!(matches!(root.items[0], ItemEntry::Record(_)));
        assert_eq!(forest.total_items(), 1);
    }

    #[test]
    fn test_direct_category_without_match_is_dropped() {
        let mut forest = forest();
        assert_eq!(
            classify_item(&mut forest, &item("1", "E12")),
            Placement::Skipped(SkipReason::NotASubcategory)
        );
        assert_eq!(forest.total_items(), 0);
    }

    #[test]
    fn test_report_counts_match_total() {
        let mut forest = forest();
        let items = vec![
            item("1", "QA76"),
            item("2", "QA80"),
            item("3", "QB500"),
            item("4", "QZ1"),
            item("5", "E450"),
            item("6", "X1"),
        ];
        let report = classify_items(&mut forest, &items);

        assert_eq!(
            report,
            ClassificationReport {
                placed: 3,
                fallback: 1,
                skipped: 2
            }
        );
        assert_eq!(forest.total_items(), report.classified());
        assert_eq!(count(&forest, "Q", 0), 3);
        assert_eq!(count(&forest, "Q", 2), 2);
        assert_eq!(count(&forest, "Q", 3), 1);
    }
}
