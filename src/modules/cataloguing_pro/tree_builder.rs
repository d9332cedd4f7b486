//! Schedule outline -> classification tree
//!
//! A schedule row is indented by the column of its only non-empty field.
//! Column `i` puts the entry at depth `i + 1`, under the nearest open
//! ancestor at depth `i`.

use crate::domain::DomainError;
use crate::models::{ClassificationNode, ClassificationTree, Schedule};

/// Where the entry of a row sits.
#[derive(Debug, PartialEq, Eq)]
pub enum RowDepth {
    /// All fields blank
    Empty,
    Column(usize),
    /// More than one field filled in; the row cannot be placed
    Ambiguous(Vec<usize>),
}

pub fn row_depth_column(row: &[String]) -> RowDepth {
    let filled: Vec<usize> = row
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.trim().is_empty())
        .map(|(idx, _)| idx)
        .collect();

    match filled.as_slice() {
        [] => RowDepth::Empty,
        [column] => RowDepth::Column(*column),
        _ => RowDepth::Ambiguous(filled),
    }
}

/// Split `"QA76 Computer software"` into label and title.
///
/// The label starts at the first occurrence of the category code and runs
/// to the next space.
pub fn parse_row_text(text: &str, category: &str) -> Result<(String, String), DomainError> {
    let start = text
        .find(category)
        .ok_or_else(|| DomainError::MalformedLabel(text.to_string()))?;
    let entry = &text[start..];

    let (label, title) = match entry.find(' ') {
        Some(space) => (&entry[..space], &entry[space + 1..]),
        None => (entry, ""),
    };

    Ok((
        label.trim_end_matches(['\r', '\n']).to_string(),
        title.trim_end_matches(['\r', '\n']).to_string(),
    ))
}

/// Build the tree for one category.
///
/// Blank rows are skipped, rows with several filled fields are logged and
/// skipped. A bad numeric label or a row indented past any open ancestor
/// fails the whole category.
pub fn build_tree(schedule: &Schedule) -> Result<ClassificationTree, DomainError> {
    if schedule.code.is_empty() {
        return Err(DomainError::Validation(format!(
            "Schedule '{}' has no category code",
            schedule.name
        )));
    }

    let mut tree = ClassificationTree::new(ClassificationNode::alphabetic(
        schedule.code.clone(),
        schedule.name.clone(),
        0,
    ));
    let mut cursor = tree.root();

    for (idx, row) in schedule.rows.iter().enumerate() {
        let row_number = idx + 1;
        let column = match row_depth_column(row) {
            RowDepth::Empty => continue,
            RowDepth::Column(column) => column,
            RowDepth::Ambiguous(columns) => {
                tracing::warn!(
                    "Skipping row {} of {}: fields {:?} are all filled",
                    row_number,
                    schedule.code,
                    columns
                );
                continue;
            }
        };
        let depth = column + 1;

        let (label, title) = parse_row_text(&row[column], &schedule.code)?;
        let node = ClassificationNode::new(label, title, depth)?;

        let parent = tree
            .ancestors(cursor)
            .find(|id| tree.node(*id).depth + 1 == depth)
            .ok_or(DomainError::UnresolvedIndentation {
                row: row_number,
                depth,
            })?;

        cursor = tree.add_child(parent, node);
    }

    tracing::debug!("Built tree {} with {} nodes", schedule.code, tree.len());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn schedule(rows: Vec<Vec<String>>) -> Schedule {
        Schedule::new("Q", "Science", rows)
    }

    #[test]
    fn test_row_depth_column() {
        assert_eq!(row_depth_column(&row(&["", "", ""])), RowDepth::Empty);
        assert_eq!(row_depth_column(&row(&["", "QA1 x", ""])), RowDepth::Column(1));
        assert_eq!(
            row_depth_column(&row(&["QA", "QA1 x", ""])),
            RowDepth::Ambiguous(vec![0, 1])
        );
    }

    #[test]
    fn test_parse_row_text() {
        let (label, title) = parse_row_text("QA76.73 Programming languages\n", "Q").unwrap();
        assert_eq!(label, "QA76.73");
        assert_eq!(title, "Programming languages");

        let (label, title) = parse_row_text("(QA76.9) Computer science", "Q").unwrap();
        assert_eq!(label, "QA76.9)");
        assert_eq!(title, "Computer science");
    }

    #[test]
    fn test_parse_row_text_without_category() {
        assert!(matches!(
            parse_row_text("B123 Ethics", "Q"),
            Err(DomainError::MalformedLabel(_))
        ));
    }

    #[test]
    fn test_siblings_at_first_column() {
        let tree = build_tree(&Schedule::new(
            "B",
            "Philosophy",
            vec![row(&["B123.4 Ethics", ""]), row(&["B45 Something", ""])],
        ))
        .unwrap();

        let root = tree.node(tree.root());
        assert_eq!(root.child_codes(), &["B123.4".to_string(), "B45".to_string()]);
        let first = tree.node(root.children()[0]);
        assert_eq!(first.range().map(|r| (r.low, r.high)), Some((123.4, 123.4)));
        let second = tree.node(root.children()[1]);
        assert_eq!(second.range().map(|r| (r.low, r.high)), Some((45.0, 45.0)));
    }

    #[test]
    fn test_indentation_builds_hierarchy() {
        let tree = build_tree(&schedule(vec![
            row(&["QA Mathematics", "", ""]),
            row(&["", "QA1-939 Mathematics", ""]),
            row(&["", "", "QA75.5-76.95 Computer science"]),
            row(&["", "", ""]),
            row(&["QB Astronomy", "", ""]),
            row(&["", "QB1-991 Astronomy", ""]),
        ]))
        .unwrap();

        let root = tree.node(tree.root());
        assert_eq!(root.depth, 0);
        assert_eq!(root.child_codes(), &["QA".to_string(), "QB".to_string()]);

        for (id, node) in tree.iter().skip(1) {
            let parent = tree.node(node.parent().unwrap());
            assert_eq!(node.depth, parent.depth + 1, "node {:?}", id);
        }

        let qa = tree.find_child(tree.root(), "QA").unwrap();
        assert_eq!(tree.node(qa).kind, NodeKind::Alphabetic);
        let qa_all = tree.find_child(qa, "QA1-939").unwrap();
        assert!(tree.find_child(qa_all, "QA75.5-76.95").is_some());
    }

    #[test]
    fn test_ambiguous_row_is_skipped() {
        let tree = build_tree(&schedule(vec![
            row(&["QA Mathematics", ""]),
            row(&["QB Astronomy", "QB1 General"]),
            row(&["", "QA1 General"]),
        ]))
        .unwrap();

        assert_eq!(tree.len(), 3);
        let qa = tree.find_child(tree.root(), "QA").unwrap();
        assert!(tree.find_child(qa, "QA1").is_some());
    }

    #[test]
    fn test_skipped_level_is_an_error() {
        let err = build_tree(&schedule(vec![
            row(&["QA Mathematics", "", ""]),
            row(&["", "", "QA76 Computers"]),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            DomainError::UnresolvedIndentation { row: 2, depth: 3 }
        ));
    }

    #[test]
    fn test_bad_numeric_label_fails_the_tree() {
        let err = build_tree(&schedule(vec![row(&["Q10-5 Backwards"])])).unwrap_err();
        assert!(matches!(err, DomainError::MalformedCode(ref code) if code == "Q10-5"));
    }

    #[test]
    fn test_labels_round_trip() {
        let texts = [
            "QA Mathematics",
            "QA1-939 Mathematics",
            "QA76.73 Programming languages",
        ];
        let tree = build_tree(&schedule(vec![
            row(&[texts[0], "", ""]),
            row(&["", texts[1], ""]),
            row(&["", "", texts[2]]),
        ]))
        .unwrap();

        let rebuilt: Vec<String> = tree
            .iter()
            .skip(1)
            .map(|(_, node)| format!("{} {}", node.code, node.title))
            .collect();
        assert_eq!(rebuilt, texts);
    }
}
