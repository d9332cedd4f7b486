// Classification Helpers

/// A Library of Congress call number split into the parts used for lookup.
///
/// `QA76.73.P98` becomes top level `Q`, subcategory `A`, number `76.73`.
#[derive(Clone, Debug, PartialEq)]
pub struct CallNumber {
    pub top_level: char,
    pub subcategory: Option<String>,
    pub number: Option<f64>,
}

impl CallNumber {
    pub fn parse(lcc: &str) -> Option<Self> {
        let lcc = lcc.trim();
        let mut chars = lcc.chars();
        let top_level = chars.next().filter(|c| c.is_ascii_alphabetic())?;

        let letters: String = chars
            .by_ref()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        let rest = lcc[top_level.len_utf8() + letters.len()..].trim_start();

        // A number must follow the letters directly; digits inside a cutter do not count
        let number = if rest.starts_with(|c: char| c.is_ascii_digit()) {
            leading_number(rest)
        } else {
            None
        };

        Some(Self {
            top_level: top_level.to_ascii_uppercase(),
            subcategory: (!letters.is_empty()).then(|| letters.to_ascii_uppercase()),
            number,
        })
    }

    /// Key of the subcategory range table: `QA` for `QA76`, `E` for `E184`.
    pub fn subcategory_key(&self) -> String {
        match &self.subcategory {
            Some(sub) => format!("{}{}", self.top_level, sub),
            None => self.top_level.to_string(),
        }
    }
}

/// Digits with at most one decimal point followed by a digit.
fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    text[..end].parse().ok()
}

pub fn validate_lcc(lcc: &str) -> bool {
    // Basic validation for Library of Congress Classification
    CallNumber::parse(lcc).is_some()
}
