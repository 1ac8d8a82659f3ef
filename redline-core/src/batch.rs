//! Non-interactive replacement (`--force`).
//!
//! Uses the same per-line scan as the review UI, so a forced run writes exactly
//! what accepting every change in a review would.

use std::path::Path;

use tracing::info;

use crate::change_list::{ChangeList, CommitReport};
use crate::error::ReviewError;
use crate::file_change::Scan;
use crate::matcher::Pattern;
use crate::substitution::{MalformedPolicy, Substitution};

/// Scans `paths` in Apply mode and commits every change.
///
/// # Errors
///
/// Scan errors before anything is written; [`ReviewError::CommitWrite`] part way
/// through, with earlier files already written.
pub fn replace_all<P: AsRef<Path>>(
    pattern: &Pattern,
    substitution: &Substitution,
    paths: &[P],
    policy: MalformedPolicy,
) -> Result<CommitReport, ReviewError> {
    let scan = Scan {
        pattern,
        substitution: Some(substitution),
        policy,
    };
    let Some(mut list) = ChangeList::scan(&scan, paths)? else {
        info!("nothing to replace");
        return Ok(CommitReport::default());
    };
    list.commit()
}
