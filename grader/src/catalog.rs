//! Score Catalog
//!
//! The catalog is the static rubric: an ordered list of bug-fix items and an ordered list
//! of feature items, each pairing a human-readable description with a point value.
//! Descriptions embed the challenge identifier they score (for example
//! `"InventoryMaster Challenge Tests > Challenge 1a-1 - Basic product creation ..."`).
//!
//! A [`ScoreCatalog`] is built once at start-up and handed to the matcher by reference.
//! The rubric shipped with the grader is compiled in; a JSON file with the same shape can
//! replace it.
//!
//! # JSON Schema
//!
//! ```json
//! {
//!   "version": 1,
//!   "bugs":     [ { "description": "<text>", "points": <u32 > 0> }, ... ],
//!   "features": [ { "description": "<text>", "points": <u32 > 0> }, ... ]
//! }
//! ```

use crate::error::GraderError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

const EMBEDDED_CATALOG: &str = include_str!("../assets/score_catalog.json");

/// An immutable catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreEntry {
    pub description: String,
    pub points: u32,
}

impl ScoreEntry {
    pub fn new(description: impl Into<String>, points: u32) -> Self {
        Self {
            description: description.into(),
            points,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<u32>,
    bugs: Vec<ScoreEntry>,
    features: Vec<ScoreEntry>,
}

/// The read-only rubric, split into two disjoint ordered lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCatalog {
    bugs: Vec<ScoreEntry>,
    features: Vec<ScoreEntry>,
}

impl ScoreCatalog {
    /// Builds a catalog after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GraderError::Catalog`] if an entry has zero points or an empty description,
    /// or if the same description appears in both lists.
    pub fn new(bugs: Vec<ScoreEntry>, features: Vec<ScoreEntry>) -> Result<Self, GraderError> {
        for (list, entries) in [("bugs", &bugs), ("features", &features)] {
            for (i, entry) in entries.iter().enumerate() {
                if entry.description.trim().is_empty() {
                    return Err(GraderError::Catalog(format!(
                        "{list}[{i}] has an empty description"
                    )));
                }
                if entry.points == 0 {
                    return Err(GraderError::Catalog(format!(
                        "{list}[{i}] '{}' must be worth at least one point",
                        entry.description
                    )));
                }
            }
        }

        let bug_descriptions: HashSet<&str> =
            bugs.iter().map(|e| e.description.as_str()).collect();
        if let Some(dup) = features
            .iter()
            .find(|e| bug_descriptions.contains(e.description.as_str()))
        {
            return Err(GraderError::Catalog(format!(
                "'{}' is listed as both a bug and a feature",
                dup.description
            )));
        }

        Ok(Self { bugs, features })
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json_str(raw: &str) -> Result<Self, GraderError> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| GraderError::Catalog(format!("invalid catalog JSON: {e}")))?;
        let catalog = Self::new(file.bugs, file.features)?;
        info!(
            version = file.version.unwrap_or(0),
            bugs = catalog.bugs.len(),
            features = catalog.features.len(),
            "Loaded score catalog"
        );
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, GraderError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            GraderError::Catalog(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// The rubric compiled into the grader.
    pub fn embedded() -> Result<Self, GraderError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Loads `path` when given, otherwise the embedded rubric.
    pub fn load(path: Option<&Path>) -> Result<Self, GraderError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn bugs(&self) -> &[ScoreEntry] {
        &self.bugs
    }

    pub fn features(&self) -> &[ScoreEntry] {
        &self.features
    }
}
