use crate::{ApplyChangesStatus, ChangeStatus, CodeChange, CodeChanges, Error, Result, fs_guard};
use simple_fs::{SPath, ensure_file_dir, read_to_string};
use std::collections::HashMap;
use std::fs;
use tracing::{debug, warn};

/// Applies the `code_changes` relative to `base_dir`.
///
/// `base_dir` must be within the current directory, and every file path must resolve
/// inside `base_dir`. Each change is applied independently; failures are reported per item.
pub fn apply_code_changes(base_dir: &SPath, code_changes: CodeChanges) -> Result<ApplyChangesStatus> {
	let base_dir = resolve_base_dir(base_dir)?;

	// -- Capture the original contents before anything gets written
	let mut originals: HashMap<String, String> = HashMap::new();
	for change in &code_changes {
		if let CodeChange::Update { file_path, .. } | CodeChange::Delete { file_path, .. } = change
			&& let Ok(full_path) = fs_guard::resolve_in_base(&base_dir, file_path)
			&& full_path.exists()
			&& !full_path.is_dir()
			&& let Ok(content) = read_to_string(&full_path)
		{
			originals.insert(file_path.clone(), content);
		}
	}

	let mut items = Vec::new();

	for change in code_changes {
		let mut status = ChangeStatus::from(&change);

		let res: Result<Option<String>> = (|| match &change {
			CodeChange::Create { file_path, content, .. } | CodeChange::Update { file_path, content, .. } => {
				let full_path = fs_guard::resolve_in_base(&base_dir, file_path)?;
				ensure_file_dir(&full_path).map_err(Error::simple_fs)?;
				fs::write(&full_path, &content.content)
					.map_err(|err| Error::io_write_file(full_path.to_string(), err))?;
				Ok(Some(content.content.clone()))
			}

			CodeChange::Delete { file_path, .. } => {
				let full_path = fs_guard::resolve_in_base(&base_dir, file_path)?;
				if !full_path.exists() || full_path.is_dir() {
					return Err(Error::apply_file_not_found(file_path));
				}
				fs::remove_file(&full_path).map_err(|err| Error::io_delete_file(full_path.to_string(), err))?;
				Ok(None)
			}

			CodeChange::Fail { error_msg, .. } => Err(error_msg.as_str().into()),
		})();

		match res {
			Ok(new_content) => {
				status.success = true;
				status.error_msg = None;
				status.new_content = new_content;
				status.original_content = status.file_path.as_ref().and_then(|p| originals.remove(p));
				debug!(operation = status.operation_str(), path = status.file_path(), "change applied");
			}
			Err(err) => {
				warn!(operation = status.operation_str(), path = status.file_path(), %err, "change failed");
				status.error_msg = Some(err.to_string());
			}
		}

		items.push(status);
	}

	Ok(ApplyChangesStatus { items })
}

// region:    --- Support

/// Absolute, collapsed `base_dir`, checked to be within the current directory.
fn resolve_base_dir(base_dir: &SPath) -> Result<SPath> {
	let cwd = std::env::current_dir().map_err(|err| Error::io_read_file(".", err))?;
	let cwd_spath = SPath::from_std_path(cwd)?.into_collapsed();

	let base_dir = if base_dir.is_absolute() {
		base_dir.clone().into_collapsed()
	} else {
		cwd_spath.join(base_dir).into_collapsed()
	};

	fs_guard::check_in_base(&base_dir, &cwd_spath)?;

	Ok(base_dir)
}

// endregion: --- Support
