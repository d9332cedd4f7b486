//! CSV readers for classification schedules and catalog items

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;
use crate::models::{ItemRecord, Schedule};

const ITEM_FIELDS: usize = 5;

/// Category code and name from a schedule file name such as `Q - Science.csv`.
pub fn schedule_identity(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let code = stem.chars().next()?.to_string();
    let name = stem.get(4..).filter(|n| !n.is_empty()).unwrap_or(stem);
    Some((code, name.to_string()))
}

/// Parse one schedule file. Rows keep every field, blank ones included.
pub fn parse_schedule_csv(code: &str, name: &str, content: &[u8]) -> Result<Schedule, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Schedule::new(code, name, rows))
}

/// Read every `.csv` schedule under `dir`, recursively, ordered by path.
///
/// Files that cannot be read or parsed are logged and skipped.
pub fn read_schedule_dir(dir: &Path) -> Result<Vec<Schedule>, DomainError> {
    let mut files = Vec::new();
    collect_csv_files(dir, &mut files)?;
    files.sort();

    let mut schedules = Vec::new();
    for file in files {
        let Some((code, name)) = schedule_identity(&file) else {
            tracing::warn!("Skipping schedule with unusable name: {:?}", file);
            continue;
        };
        let parsed = fs::read(&file)
            .map_err(DomainError::from)
            .and_then(|content| parse_schedule_csv(&code, &name, &content));
        match parsed {
            Ok(schedule) => schedules.push(schedule),
            Err(e) => tracing::warn!("Failed to read schedule {:?}: {}", file, e),
        }
    }

    tracing::info!("Read {} schedules from {:?}", schedules.len(), dir);
    Ok(schedules)
}

fn collect_csv_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DomainError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_csv_files(&path, files)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Parse catalog items: `catalog_id, call_number, year, title, summary` by position.
///
/// Missing trailing fields are read as empty; rows without a call number
/// column are skipped.
pub fn parse_items_csv(content: &[u8], has_headers: bool) -> Result<Vec<ItemRecord>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(content);

    let mut items = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            tracing::warn!("Skipping item row {}: no call number", idx + 1);
            continue;
        }

        let mut fields: Vec<&str> = record.iter().collect();
        fields.resize(ITEM_FIELDS, "");
        let item: ItemRecord = csv::StringRecord::from(fields)
            .deserialize(None)
            .map_err(|e| DomainError::Csv(format!("Item row {}: {}", idx + 1, e)))?;

        items.push(item);
    }

    Ok(items)
}

pub fn read_items_file(path: &Path, has_headers: bool) -> Result<Vec<ItemRecord>, DomainError> {
    let content = fs::read(path)?;
    let items = parse_items_csv(&content, has_headers)?;
    tracing::info!("Read {} items from {:?}", items.len(), path);
    Ok(items)
}
