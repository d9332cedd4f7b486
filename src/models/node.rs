use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::models::item::ItemSummary;

/// Stable handle to a node inside a `ClassificationTree` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Inclusive numeric span covered by a call-number label such as `QA76.73` or `E11-143`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub low: f64,
    pub high: f64,
}

impl NumericRange {
    /// Derive the range from the numeric portion of a label.
    ///
    /// Parentheses and the leading class letter are dropped, a cutter
    /// (a decimal point followed by a non-digit) ends the number, and a hyphen
    /// splits it into low and high bounds.
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        let malformed = || DomainError::MalformedCode(code.to_string());

        let first_digit = code.find(|c: char| c.is_ascii_digit()).ok_or_else(malformed)?;
        let leading = code.chars().next().filter(|c| c.is_alphabetic());

        let numeric: String = code[first_digit..]
            .chars()
            .filter(|c| *c != '(' && *c != ')' && Some(*c) != leading)
            .collect();
        let numeric = strip_cutter(&numeric);

        let (low, high) = match numeric.split_once('-') {
            Some((low, high)) => (parse_bound(low), parse_bound(high)),
            None => (parse_bound(numeric), parse_bound(numeric)),
        };
        let (low, high) = (low.ok_or_else(malformed)?, high.ok_or_else(malformed)?);

        if low > high {
            return Err(malformed());
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

/// Truncate at the first decimal point that introduces a cutter.
fn strip_cutter(numeric: &str) -> &str {
    let bytes = numeric.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'.' && bytes.get(i + 1).is_some_and(|next| !next.is_ascii_digit()) {
            return &numeric[..i];
        }
    }
    numeric
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Purely alphabetic label (class or subclass letters)
    Alphabetic,
    /// Label with a numeric portion
    NumericRange(NumericRange),
}

/// What a node remembers about the items classified at or below it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ItemEntry {
    Record(ItemSummary),
    /// Top-level code written onto a subcategory when an item falls back to it
    CrossReference(String),
}

/// One entry of a classification schedule.
///
/// Structural links (`parent`, `children`, `child_codes`) are owned by the
/// tree arena and only change through `ClassificationTree::add_child`.
#[derive(Clone, Debug)]
pub struct ClassificationNode {
    pub code: String,
    pub title: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub item_count: usize,
    pub items: Vec<ItemEntry>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) child_codes: Vec<String>,
}

impl ClassificationNode {
    /// Create a node, choosing the variant from the label text.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        depth: usize,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        let kind = if is_alphabetic_label(&code) {
            NodeKind::Alphabetic
        } else {
            NodeKind::NumericRange(NumericRange::from_code(&code)?)
        };
        Ok(Self::with_kind(code, title.into(), depth, kind))
    }

    pub fn alphabetic(code: impl Into<String>, title: impl Into<String>, depth: usize) -> Self {
        Self::with_kind(code.into(), title.into(), depth, NodeKind::Alphabetic)
    }

    fn with_kind(code: String, title: String, depth: usize, kind: NodeKind) -> Self {
        Self {
            code,
            title,
            depth,
            kind,
            item_count: 0,
            items: Vec::new(),
            parent: None,
            children: Vec::new(),
            child_codes: Vec::new(),
        }
    }

    pub fn range(&self) -> Option<&NumericRange> {
        match &self.kind {
            NodeKind::NumericRange(range) => Some(range),
            NodeKind::Alphabetic => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_codes(&self) -> &[String] {
        &self.child_codes
    }
}

pub fn is_alphabetic_label(code: &str) -> bool {
    !code.is_empty() && code.chars().all(char::is_alphabetic)
}
