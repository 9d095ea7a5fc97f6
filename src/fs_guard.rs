use crate::Result;
use simple_fs::SPath;

/// Joins `file_path` to `base_dir` and checks the result stays within `base_dir`.
pub fn resolve_in_base(base_dir: &SPath, file_path: &str) -> Result<SPath> {
	let full_path = base_dir.join(file_path).into_collapsed();
	check_in_base(&full_path, base_dir)?;
	Ok(full_path)
}

// region:    --- Support

pub(crate) fn check_in_base(target: &SPath, base_dir: &SPath) -> Result<()> {
	let base_dir = base_dir.clone().into_collapsed();

	let inside = target
		.as_str()
		.strip_prefix(base_dir.as_str())
		.is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || base_dir.as_str().ends_with('/'));
	if !inside {
		return Err(crate::Error::security_violation(target.to_string(), base_dir.to_string()));
	}

	Ok(())
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_fs_guard_resolve_in_base() -> Result<()> {
		// -- Setup & Fixtures
		let base_dir = SPath::new("tests/.out/guard");

		// -- Exec & Check
		let ok = resolve_in_base(&base_dir, "src/main.js")?;
		assert_eq!(ok.as_str(), "tests/.out/guard/src/main.js");
		assert!(resolve_in_base(&base_dir, "../../../etc/passwd").is_err());
		assert!(resolve_in_base(&base_dir, "src/../../other/file.txt").is_err());
		assert!(resolve_in_base(&base_dir, "../guard_sibling/file.txt").is_err());

		Ok(())
	}
}

// endregion: --- Tests
