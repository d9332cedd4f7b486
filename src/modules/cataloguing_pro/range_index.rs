//! Range index over classification trees
//!
//! Each top-level category maps its subcategories (the root's direct
//! children) to a `RangeTable` listing every numeric-range descendant.
//! Categories without a subcategory tier are indexed directly: one table
//! for the whole tree, anchored at the root.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ClassificationTree, NodeId, NumericRange};

/// Numeric ranges under one anchor node, in tree pre-order.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeTable {
    node: NodeId,
    entries: Vec<(NumericRange, NodeId)>,
}

impl RangeTable {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            entries: Vec::new(),
        }
    }

    /// The node this table was built for (subcategory, or root for direct categories).
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn entries(&self) -> &[(NumericRange, NodeId)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a range. An identical range already present is pointed at the new node.
    pub fn insert(&mut self, range: NumericRange, node: NodeId) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == range) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((range, node)),
        }
    }

    /// Narrowest range containing `value`. Equal spans keep the earlier entry.
    pub fn find_lowest(&self, value: f64) -> Option<NodeId> {
        let mut best: Option<(f64, NodeId)> = None;
        for (range, node) in &self.entries {
            if !range.contains(value) {
                continue;
            }
            let span = range.span();
            if best.is_none_or(|(best_span, _)| span < best_span) {
                best = Some((span, *node));
            }
        }
        best.map(|(_, node)| node)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryIndex {
    root: NodeId,
    direct: Option<RangeTable>,
    subcategories: HashMap<String, RangeTable>,
}

impl CategoryIndex {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_direct(&self) -> bool {
        self.direct.is_some()
    }

    pub fn direct_table(&self) -> Option<&RangeTable> {
        self.direct.as_ref()
    }

    pub fn subcategory(&self, code: &str) -> Option<&RangeTable> {
        self.subcategories.get(code)
    }

    pub fn subcategories(&self) -> impl Iterator<Item = (&str, &RangeTable)> {
        self.subcategories
            .iter()
            .map(|(code, table)| (code.as_str(), table))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeIndex {
    categories: HashMap<String, CategoryIndex>,
}

impl RangeIndex {
    pub fn build(trees: &BTreeMap<String, ClassificationTree>, direct_categories: &[String]) -> Self {
        let categories = trees
            .iter()
            .map(|(code, tree)| {
                let direct = direct_categories.iter().any(|d| d == code);
                (code.clone(), index_category(tree, direct))
            })
            .collect();
        Self { categories }
    }

    pub fn category(&self, code: &str) -> Option<&CategoryIndex> {
        self.categories.get(code)
    }

    pub fn direct_table(&self, code: &str) -> Option<&RangeTable> {
        self.category(code).and_then(CategoryIndex::direct_table)
    }

    pub fn subcategory_table(&self, code: &str, subcategory: &str) -> Option<&RangeTable> {
        self.category(code).and_then(|c| c.subcategory(subcategory))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.categories
            .values()
            .map(|c| c.subcategories.len() + usize::from(c.direct.is_some()))
            .sum()
    }
}

fn index_category(tree: &ClassificationTree, direct: bool) -> CategoryIndex {
    let root = tree.root();
    if direct {
        return CategoryIndex {
            root,
            direct: Some(range_table(tree, root)),
            subcategories: HashMap::new(),
        };
    }

    let root_node = tree.node(root);
    let subcategories = root_node
        .child_codes()
        .iter()
        .zip(root_node.children())
        .map(|(code, child)| (code.clone(), range_table(tree, *child)))
        .collect();

    CategoryIndex {
        root,
        direct: None,
        subcategories,
    }
}

fn range_table(tree: &ClassificationTree, anchor: NodeId) -> RangeTable {
    let mut table = RangeTable::new(anchor);
    for id in tree.descendants(anchor) {
        if let Some(range) = tree.node(id).range() {
            table.insert(*range, id);
        }
    }
    table
}
