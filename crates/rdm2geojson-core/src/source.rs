// crates/rdm2geojson-core/src/source.rs

//! # Instance Sources
//!
//! Where raw `instance` rows come from. The pipeline only talks to the
//! [`InstanceSource`] trait; [`MySqlSource`] is the real database and
//! [`MemorySource`] serves fixed rows (tests, dry runs).

use crate::category::Category;
use crate::error::Result;
use std::collections::HashMap;

#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "mysql")]
pub use self::mysql::MySqlSource;

/// One row of the `instance` table as fetched, before any transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRow {
    pub name: String,
    /// Raw JSON document of the `data` column. `None` when the column is NULL.
    pub data: Option<String>,
}

impl InstanceRow {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Some(data.into()),
        }
    }
}

/// A session that can fetch instance rows per category.
///
/// One session is opened per run and closed once at the end.
pub trait InstanceSource {
    /// Rows of `category` whose name matches the SQL `LIKE` `pattern`,
    /// in database order.
    fn fetch(&mut self, category: Category, pattern: &str) -> Result<Vec<InstanceRow>>;

    /// Releases the session.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// In-memory source. Applies the `LIKE` pattern itself so it behaves like
/// the server-side filter.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    rows: HashMap<Category, Vec<InstanceRow>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, category: Category, rows: Vec<InstanceRow>) -> Self {
        self.rows.entry(category).or_default().extend(rows);
        self
    }
}

impl InstanceSource for MemorySource {
    fn fetch(&mut self, category: Category, pattern: &str) -> Result<Vec<InstanceRow>> {
        Ok(self
            .rows
            .get(&category)
            .map(|rows| {
                rows.iter()
                    .filter(|r| sql_like(&r.name, pattern))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

/// SQL `LIKE` match: `%` is any run of characters, `_` exactly one,
/// `\` escapes the next character. Case-sensitive.
pub fn sql_like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_from(&text, &pattern)
}

fn like_from(text: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_from(&text[skip..], rest)),
        Some(('_', rest)) => !text.is_empty() && like_from(&text[1..], rest),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == Some(&rest[0]) && like_from(&text[1..], &rest[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && like_from(&text[1..], rest),
    }
}
