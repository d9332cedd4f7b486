use std::fmt;

use crate::models::ClassificationTree;

/// Indented dump of a tree, one line per node: `<depth>: <code> - <title>`.
///
/// With `show_counts` each line also carries the node's item count.
pub fn render_tree(tree: &ClassificationTree, show_counts: bool) -> String {
    let mut out = String::new();
    for (_, node) in tree.iter() {
        out.push_str(&"\t".repeat(node.depth));
        out.push_str(&format!("{}: {} - {}", node.depth, node.code, node.title));
        if show_counts {
            out.push_str(&format!(" {}", node.item_count));
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for ClassificationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_tree(self, false))
    }
}
