use std::fs;
use std::path::Path;

use crate::catalog;
use crate::error::{LyraError, Result};

/// Star-name lookup table, loaded once at session start.
///
/// File format: one name per line, optionally wrapped in double quotes, with
/// a single header line that is skipped. Row N of the table names catalog
/// index N-1: lookups shift by one to step over the table's leading Sol
/// entry. The shift has not been verified against arbitrary catalogs; tables
/// without a Sol row will resolve every name off by one.
#[derive(Clone, Debug)]
pub struct StarNames {
    rows: Vec<String>,
}

impl StarNames {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut lines = contents.lines();
        if lines.next().is_none() {
            return Err(LyraError::InvalidNameTable(format!(
                "{} is empty",
                path.display()
            )));
        }
        let rows = lines.map(|line| unquote(line).to_string()).collect();
        Ok(Self { rows })
    }

    /// Table derived from the built-in catalog, with a leading Sol row so the
    /// lookup shift lands on the right names.
    pub fn builtin() -> Self {
        let mut rows = vec!["Sol".to_string()];
        rows.extend(catalog::bright_stars().into_iter().map(|s| s.name));
        Self { rows }
    }

    /// Name for a catalog index, or `None` when the table has no such row.
    pub fn get(&self, catalog_index: usize) -> Option<&str> {
        self.rows.get(catalog_index + 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn unquote(line: &str) -> &str {
    let line = line.trim_end_matches('\r');
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        &line[1..line.len() - 1]
    } else {
        line
    }
}
