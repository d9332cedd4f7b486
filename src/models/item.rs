use serde::{Deserialize, Serialize};

/// Catalog item as delivered by the item provider.
///
/// Fields are positional: `[catalog_id, call_number, year, title, summary]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub catalog_id: String,
    pub call_number: String,
    pub year: String,
    pub title: String,
    pub summary: String,
}

impl ItemRecord {
    /// Extract year (first 4 digits)
    pub fn publication_year(&self) -> Option<i32> {
        let digits: String = self
            .year
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(4)
            .collect();
        if digits.len() == 4 {
            digits.parse().ok()
        } else {
            None
        }
    }

    pub fn to_summary(&self) -> ItemSummary {
        ItemSummary {
            title: self.title.clone(),
            year: self.year.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// `(title, publication_year, summary)` kept on every node an item reaches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub title: String,
    pub year: String,
    pub summary: String,
}
