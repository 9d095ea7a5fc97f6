use crate::{CodeChange, DiffSequence, FileOperation, compute_diff};

#[derive(Debug, Clone, Default)]
pub struct ApplyChangesStatus {
	pub items: Vec<ChangeStatus>,
}

impl ApplyChangesStatus {
	pub fn is_success(&self) -> bool {
		self.items.iter().all(|item| item.success)
	}

	pub fn failures(&self) -> impl Iterator<Item = &ChangeStatus> {
		self.items.iter().filter(|item| !item.success)
	}

	/// One `"{OP} {path}: {error}"` line per failed change.
	pub fn failure_report(&self) -> String {
		self.failures()
			.map(|item| {
				format!(
					"{} {}: {}",
					item.operation_str(),
					item.file_path(),
					item.error_msg().unwrap_or("unknown error")
				)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}
}

/// Outcome of one applied change, with the file contents before and after so the change
/// can be reviewed as a diff later.
#[derive(Debug, Clone)]
pub struct ChangeStatus {
	pub operation: Option<FileOperation>,
	pub file_path: Option<String>,
	pub summary: Option<String>,
	pub success: bool,
	pub error_msg: Option<String>,
	pub original_content: Option<String>,
	pub new_content: Option<String>,
}

impl ChangeStatus {
	pub fn file_path(&self) -> &str {
		self.file_path.as_deref().unwrap_or("unknown")
	}

	pub fn success(&self) -> bool {
		self.success
	}

	pub fn error_msg(&self) -> Option<&str> {
		self.error_msg.as_deref()
	}

	pub fn operation_str(&self) -> &'static str {
		self.operation.map(|op| op.as_str()).unwrap_or("FAIL")
	}

	/// The diff between the content before and after a successful change.
	pub fn diff(&self) -> Option<DiffSequence> {
		if !self.success {
			return None;
		}

		let (old, new) = match self.operation? {
			FileOperation::Create => ("", self.new_content.as_deref()?),
			FileOperation::Update => (self.original_content.as_deref()?, self.new_content.as_deref()?),
			FileOperation::Delete => (self.original_content.as_deref()?, ""),
		};

		Some(compute_diff(old, new))
	}
}

// region:    --- Froms

impl From<&CodeChange> for ChangeStatus {
	fn from(change: &CodeChange) -> Self {
		let error_msg = match change {
			CodeChange::Fail { error_msg, .. } => Some(error_msg.clone()),
			_ => None,
		};

		Self {
			operation: change.operation(),
			file_path: change.file_path().map(|p| p.to_string()),
			summary: change.summary().map(|s| s.to_string()),
			success: false,
			error_msg,
			original_content: None,
			new_content: None,
		}
	}
}

// endregion: --- Froms
