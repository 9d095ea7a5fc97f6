// region:    --- Modules

mod aligner;
mod anchor_selector;
mod applier;
mod apply_changes_info;
mod change_preview;
mod code_change;
mod code_changes;
mod diff_entry;
mod diff_options;
mod diff_view;
mod error;
mod extract;
mod fs_guard;
mod line_normalizer;
mod offset_estimator;
mod validate;
mod xml_scan;

pub use aligner::{compute_diff, compute_diff_with};
pub use anchor_selector::*;
pub use applier::*;
pub use apply_changes_info::*;
pub use change_preview::*;
pub use code_change::*;
pub use code_changes::*;
pub use diff_entry::*;
pub use diff_options::*;
pub use diff_view::*;
pub use error::*;
pub use extract::*;
pub use line_normalizer::*;
pub use offset_estimator::*;
pub use validate::{ValidationIssue, ValidationIssues, validate_code_changes};

// endregion: --- Modules

#[cfg(feature = "test-support")]
pub mod for_test {
	pub use crate::aligner::align_lines;
}
