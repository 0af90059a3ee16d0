//! Taxonomy: the fixed category → degree mapping.
//!
//! Supplied once at construction and never mutated afterwards. The input
//! format is the `degrees.json` shape:
//!
//! ```json
//! { "Ingenierias": ["SIS", "AUTO"], "Artes": ["ANIM"] }
//! ```
//!
//! Key order is significant: it fixes the vertex index of every category
//! and degree.

use std::io::Read;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One category and its ordered degree list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub category: String,
    pub degrees: Vec<String>,
}

/// Validated category → degree mapping.
///
/// Invariants: category names are unique, every degree appears under exactly
/// one category, and no name is both a category and a degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl Taxonomy {
    pub fn new<C, D>(entries: impl IntoIterator<Item = (C, Vec<D>)>) -> Result<Self>
    where
        C: Into<String>,
        D: Into<String>,
    {
        let entries: Vec<TaxonomyEntry> = entries
            .into_iter()
            .map(|(category, degrees)| TaxonomyEntry {
                category: category.into(),
                degrees: degrees.into_iter().map(Into::into).collect(),
            })
            .collect();

        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Parse the `degrees.json` shape, preserving key order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Self::from_json_map(map)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_reader(reader)?;
        Self::from_json_map(map)
    }

    fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut pairs = Vec::with_capacity(map.len());
        for (category, degrees) in map {
            let degrees: Vec<String> = serde_json::from_value(degrees)?;
            pairs.push((category, degrees));
        }
        Self::new(pairs)
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn category_count(&self) -> usize {
        self.entries.len()
    }

    pub fn degree_count(&self) -> usize {
        self.entries.iter().map(|e| e.degrees.len()).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    /// Degrees in index order (category by category).
    pub fn degrees(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|e| e.degrees.iter().map(String::as_str))
    }

    pub fn category_of(&self, degree: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.degrees.iter().any(|d| d == degree))
            .map(|e| e.category.as_str())
    }

    pub fn contains_degree(&self, degree: &str) -> bool {
        self.category_of(degree).is_some()
    }
}

/// Names non-empty and used once across categories and degrees.
fn validate(entries: &[TaxonomyEntry]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in entries {
        if entry.category.trim().is_empty() {
            return Err(Error::InvalidTaxonomy("empty category name".into()));
        }
        if !seen.insert(entry.category.as_str()) {
            return Err(Error::InvalidTaxonomy(format!(
                "name '{}' appears more than once",
                entry.category
            )));
        }
    }
    for entry in entries {
        for degree in &entry.degrees {
            if degree.trim().is_empty() {
                return Err(Error::InvalidTaxonomy(format!(
                    "empty degree name under '{}'",
                    entry.category
                )));
            }
            if !seen.insert(degree.as_str()) {
                return Err(Error::InvalidTaxonomy(format!(
                    "degree '{degree}' is listed twice or collides with a category"
                )));
            }
        }
    }
    Ok(())
}

impl<'de> Deserialize<'de> for Taxonomy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Taxonomy::from_json_map(map).map_err(serde::de::Error::custom)
    }
}
