//! redline-core: the change-review engine behind the `redline` binary.
//!
//! The engine turns a pattern, an optional substitution, and a list of files
//! into a reviewable set of per-line edits. Nothing in this crate touches the
//! terminal: the binary reads [`ChangeList`] state to render and feeds logical
//! [`Action`]s back into a [`Session`].
//!
//! Ownership runs strictly downward:
//!
//! - [`Session`] owns the current [`ChangeList`] and rebuilds it on mode changes.
//! - [`ChangeList`] owns one [`FileChange`] per file that has at least one match.
//! - [`FileChange`] owns its [`LineChange`]s and the flattened preview rows.
//!
//! Everything above the engine addresses changes by index ([`ItemAddress`]),
//! never by reference.

pub mod batch;
pub mod change_list;
pub mod diff;
pub mod error;
pub mod file_change;
pub mod line_change;
pub mod matcher;
pub mod session;
pub mod substitution;

pub use change_list::{ChangeList, CommitReport, ItemAddress};
pub use diff::{DiffSpan, SpanKind};
pub use error::ReviewError;
pub use file_change::{CommitOutcome, CursorMove, FileChange, PreviewRow, Scan};
pub use line_change::LineChange;
pub use matcher::{Match, Pattern};
pub use session::{Action, Direction, ExitReason, Mode, Outcome, Session, SessionArgs};
pub use substitution::{MalformedPolicy, Operator, Substitution};
