use crate::validate::has_code_changes_tag;
use crate::xml_scan::{find_elems, first_elem, text_outside};
use crate::{CodeChange, CodeChanges, Content, Error, FileOperation, Result, validate_code_changes};
use tracing::{debug, warn};

/// Extracts the first `CODE_CHANGES` block from the input string.
///
/// Expected shape (the `CHANGED_FILES` wrapper is optional):
///
/// ```text
/// <CODE_CHANGES>
///   <CHANGED_FILES>
///     <FILE>
///       <FILE_SUMMARY>...</FILE_SUMMARY>
///       <FILE_OPERATION>CREATE|UPDATE|DELETE</FILE_OPERATION>
///       <FILE_PATH>...</FILE_PATH>
///       <FILE_CODE><![CDATA[...]]></FILE_CODE>
///     </FILE>
///   </CHANGED_FILES>
/// </CODE_CHANGES>
/// ```
///
/// Input without any `CODE_CHANGES` tag yields no changes. A malformed block (see
/// `validate_code_changes`) is an `Error::InvalidCodeChanges`. Invalid `FILE` elements
/// become `CodeChange::Fail` entries, they do not fail the extraction.
pub fn extract_code_changes(input: &str, extrude_other_content: bool) -> Result<(CodeChanges, Option<String>)> {
	if has_code_changes_tag(input) {
		let issues = validate_code_changes(input);
		if !issues.is_empty() {
			warn!(issues = issues.len(), "invalid CODE_CHANGES block");
			return Err(Error::invalid_code_changes(issues));
		}
	}

	let blocks = find_elems(input, "CODE_CHANGES");
	let extruded = extrude_other_content.then(|| text_outside(input, &blocks));

	let Some(block) = blocks.first() else {
		return Ok((CodeChanges::default(), extruded));
	};

	let files_content = first_elem(block.content, "CHANGED_FILES")
		.map(|elem| elem.content)
		.unwrap_or(block.content);

	let mut changes = Vec::new();

	for file_elem in find_elems(files_content, "FILE") {
		let body = file_elem.content;

		let operation_str = child_text(body, "FILE_OPERATION");
		let file_path = child_text(body, "FILE_PATH");

		let change_res = (|| -> Result<CodeChange> {
			let operation: FileOperation = operation_str
				.as_deref()
				.ok_or_else(|| Error::parse_missing_element("FILE", "FILE_OPERATION"))?
				.parse()?;
			let file_path = file_path
				.clone()
				.ok_or_else(|| Error::parse_missing_element("FILE", "FILE_PATH"))?;
			let summary = child_text(body, "FILE_SUMMARY");

			match operation {
				FileOperation::Create | FileOperation::Update => {
					let raw_code =
						child_raw(body, "FILE_CODE").ok_or_else(|| Error::parse_missing_element("FILE", "FILE_CODE"))?;
					let content = Content::from_raw(raw_code);

					if operation == FileOperation::Create {
						Ok(CodeChange::Create {
							file_path,
							summary,
							content,
						})
					} else {
						Ok(CodeChange::Update {
							file_path,
							summary,
							content,
						})
					}
				}
				FileOperation::Delete => Ok(CodeChange::Delete { file_path, summary }),
			}
		})();

		let change = match change_res {
			Ok(change) => change,
			Err(err) => CodeChange::Fail {
				operation: operation_str,
				file_path,
				error_msg: err.to_string(),
			},
		};

		changes.push(change);
	}

	debug!(changes = changes.len(), "code changes extracted");

	Ok((CodeChanges::new(changes), extruded))
}

// region:    --- Support

/// Raw inner content of the first `name` child element.
fn child_raw<'a>(body: &'a str, name: &str) -> Option<&'a str> {
	first_elem(body, name).map(|elem| elem.content)
}

/// Decoded, trimmed text of the first `name` child element, `None` when missing or blank.
fn child_text(body: &str, name: &str) -> Option<String> {
	let raw = child_raw(body, name)?;
	let text = Content::from_raw(raw).content.trim().to_string();
	if text.is_empty() { None } else { Some(text) }
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
