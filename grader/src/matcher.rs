//! # Taxonomy Matcher
//!
//! Resolves a [`ChallengeId`] to a catalog entry and a [`Bucket`].
//!
//! Resolution order, first hit wins:
//! 1. the bug catalog, in catalog order;
//! 2. the feature catalog, in catalog order;
//! 3. a default of [`DEFAULT_POINTS`] in the feature bucket.
//!
//! An entry matches when its description contains the id itself, or the id with its
//! separator rewritten as `a-` or `b-` (so a bare `1-1` still finds `1a-1`). This is plain
//! substring search: `0a-1` will also hit a `10a-1` description. Scored runs depend on this
//! exact behaviour, so it is kept as-is.

use crate::catalog::{ScoreCatalog, ScoreEntry};
use crate::types::{Bucket, ChallengeId};
use tracing::debug;

/// Points awarded to an id that matches nothing in the catalog.
pub const DEFAULT_POINTS: u32 = 20;

/// Outcome of resolving one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'c> {
    /// The matched entry, or `None` for the default fallback.
    pub entry: Option<&'c ScoreEntry>,
    pub bucket: Bucket,
    pub points: u32,
}

impl Resolution<'_> {
    pub fn is_default(&self) -> bool {
        self.entry.is_none()
    }
}

/// Looks ids up in a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyMatcher<'c> {
    catalog: &'c ScoreCatalog,
}

fn find_entry<'c>(entries: &'c [ScoreEntry], id: &ChallengeId) -> Option<&'c ScoreEntry> {
    let [with_a, with_b] = id.letter_variants();
    entries.iter().find(|entry| {
        let desc = entry.description.as_str();
        desc.contains(id.as_str()) || desc.contains(&with_a) || desc.contains(&with_b)
    })
}

impl<'c> TaxonomyMatcher<'c> {
    pub fn new(catalog: &'c ScoreCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, id: &ChallengeId) -> Resolution<'c> {
        if let Some(entry) = find_entry(self.catalog.bugs(), id) {
            return Resolution {
                entry: Some(entry),
                bucket: Bucket::Bug,
                points: entry.points,
            };
        }

        if let Some(entry) = find_entry(self.catalog.features(), id) {
            return Resolution {
                entry: Some(entry),
                bucket: Bucket::Feature,
                points: entry.points,
            };
        }

        debug!(%id, points = DEFAULT_POINTS, "No catalog entry, using default feature score");
        Resolution {
            entry: None,
            bucket: Bucket::Feature,
            points: DEFAULT_POINTS,
        }
    }
}
