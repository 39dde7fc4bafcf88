//! # Challenge Identifier Extractor
//!
//! Turns a test case's display name into the label reported to the grading service and
//! the canonical [`ChallengeId`] used for catalog lookup.
//!
//! ```text
//! "InventoryMaster > Challenge 2a-1 - Product filtering by category"
//!                    ^ marker                 fullName starts here
//!                              ^^^^ id captured by `Challenge (\d+[a-z]?-\d+)`
//! ```
//!
//! Names without the marker are outside the rubric. Names with the marker but no
//! well-formed id (`"Challenge Tests > sanity"`) are dropped as well.

use crate::types::ChallengeId;
use once_cell::sync::Lazy;
use regex::Regex;

/// Literal that introduces a graded item in a test name.
pub const CHALLENGE_MARKER: &str = "Challenge ";

static CHALLENGE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Challenge (\d+[a-z]?-\d+)").expect("challenge id pattern is valid"));

/// A display name that belongs to the rubric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedChallenge {
    /// The display name from the first marker onwards.
    pub full_name: String,
    pub id: ChallengeId,
}

/// Extracts the label and challenge id from `display_name`.
///
/// Returns `None` when the marker is absent or no `Challenge <id>` token follows it
/// anywhere in the name.
pub fn extract(display_name: &str) -> Option<ExtractedChallenge> {
    let start = display_name.find(CHALLENGE_MARKER)?;
    // The id pattern runs over the whole name, not just the label.
    let captures = CHALLENGE_ID.captures(display_name)?;
    Some(ExtractedChallenge {
        full_name: display_name[start..].to_string(),
        id: ChallengeId::new_unchecked(&captures[1]),
    })
}
