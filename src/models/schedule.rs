use serde::{Deserialize, Serialize};

/// Outline rows for one top-level category, as read from a schedule file.
///
/// Each row is a fixed-width list of fields; the column holding the only
/// non-empty field gives the row's indentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub code: String,
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Schedule {
    pub fn new(code: impl Into<String>, name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            rows,
        }
    }
}
