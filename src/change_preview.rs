use crate::{CodeChange, CodeChanges, DiffSequence, FileOperation, Result, compute_diff, fs_guard};
use simple_fs::{SPath, read_to_string};
use tracing::debug;

/// What a change would do to its file, computed without touching the disk.
#[derive(Debug, Clone)]
pub struct ChangePreview {
	pub operation: Option<FileOperation>,
	pub file_path: Option<String>,
	pub summary: Option<String>,
	pub outcome: PreviewOutcome,
}

#[derive(Debug, Clone)]
pub enum PreviewOutcome {
	Diff(DiffSequence),
	/// `UPDATE` of a file that does not exist.
	OriginalNotFound,
	/// `DELETE` of a file that does not exist.
	AlreadyDeleted,
	Failed(String),
}

impl ChangePreview {
	pub fn diff(&self) -> Option<&DiffSequence> {
		match &self.outcome {
			PreviewOutcome::Diff(diff) => Some(diff),
			_ => None,
		}
	}
}

/// Previews every change against the current files under `base_dir`.
///
/// - `CREATE` diffs an empty text against the new code.
/// - `UPDATE` diffs the file on disk against the new code.
/// - `DELETE` diffs the file on disk against an empty text.
pub fn preview_code_changes(base_dir: &SPath, code_changes: &CodeChanges) -> Result<Vec<ChangePreview>> {
	let previews = code_changes
		.iter()
		.map(|change| {
			let outcome = match preview_outcome(base_dir, change) {
				Ok(outcome) => outcome,
				Err(err) => PreviewOutcome::Failed(err.to_string()),
			};

			ChangePreview {
				operation: change.operation(),
				file_path: change.file_path().map(|p| p.to_string()),
				summary: change.summary().map(|s| s.to_string()),
				outcome,
			}
		})
		.collect();

	Ok(previews)
}

// region:    --- Support

fn preview_outcome(base_dir: &SPath, change: &CodeChange) -> Result<PreviewOutcome> {
	let outcome = match change {
		CodeChange::Create { content, .. } => PreviewOutcome::Diff(compute_diff("", &content.content)),

		CodeChange::Update { file_path, content, .. } => match read_existing(base_dir, file_path)? {
			Some(original) => PreviewOutcome::Diff(compute_diff(&original, &content.content)),
			None => PreviewOutcome::OriginalNotFound,
		},

		CodeChange::Delete { file_path, .. } => match read_existing(base_dir, file_path)? {
			Some(original) => PreviewOutcome::Diff(compute_diff(&original, "")),
			None => PreviewOutcome::AlreadyDeleted,
		},

		CodeChange::Fail { error_msg, .. } => PreviewOutcome::Failed(error_msg.clone()),
	};

	Ok(outcome)
}

fn read_existing(base_dir: &SPath, file_path: &str) -> Result<Option<String>> {
	let full_path = fs_guard::resolve_in_base(base_dir, file_path)?;
	if !full_path.exists() {
		debug!(path = full_path.as_str(), "no file to preview against");
		return Ok(None);
	}

	let content = read_to_string(&full_path).map_err(crate::Error::simple_fs)?;
	Ok(Some(content))
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
