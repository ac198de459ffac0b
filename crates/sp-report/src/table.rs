//! Reading an exported table back into typed entries.

use std::fmt;
use std::path::Path;

use sp_core::{Real, format_real};

use crate::export::HEADER;
use crate::{ReportError, ReportResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Number(Real),
    /// Kept verbatim when the field does not parse as a number.
    Text(String),
}

impl ResultValue {
    fn parse(field: &str) -> Self {
        match field.parse::<Real>() {
            Ok(v) => ResultValue::Number(v),
            Err(_) => ResultValue::Text(field.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<Real> {
        match self {
            ResultValue::Number(v) => Some(*v),
            ResultValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Number(v) => f.write_str(&format_real(*v)),
            ResultValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub name: String,
    pub value: ResultValue,
    pub unit: String,
}

/// Entries in file order. Lookups by name see the last row with that name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    entries: Vec<ResultEntry>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ResultEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ResultEntry> {
        self.entries.iter().rev().find(|e| e.name == name)
    }

    pub fn number(&self, name: &str) -> Option<Real> {
        self.get(name).and_then(|e| e.value.as_number())
    }
}

pub fn read_results(path: &Path) -> ReportResult<ResultsTable> {
    let content = std::fs::read_to_string(path)?;
    parse_results(&content)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Parse table text. Only the first non-blank line may be the header; a
/// later row that happens to look like it is kept as data.
pub fn parse_results(content: &str) -> ReportResult<ResultsTable> {
    let mut table = ResultsTable::new();
    let header = split_fields(HEADER);
    let mut at_first_row = true;

    for (index, line) in content.lines().enumerate() {
        let fields = split_fields(line);
        if fields.is_empty() {
            continue;
        }
        let is_first_row = at_first_row;
        at_first_row = false;
        if is_first_row && fields == header {
            continue;
        }

        match fields.as_slice() {
            [name, value] => table.push(ResultEntry {
                name: name.to_string(),
                value: ResultValue::parse(value),
                unit: String::new(),
            }),
            [name, value, unit] => table.push(ResultEntry {
                name: name.to_string(),
                value: ResultValue::parse(value),
                unit: unit.to_string(),
            }),
            other => {
                return Err(ReportError::MalformedRow {
                    line: index + 1,
                    fields: other.len(),
                });
            }
        }
    }

    Ok(table)
}
