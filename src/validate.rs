use crate::xml_scan::{CDATA_END, CDATA_START, cdata_spans, find_elems, line_at, mask_cdata};
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static RE_STRUCT_TAG: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)</?\s*(CODE_CHANGES|CHANGED_FILES|FILE_SUMMARY|FILE_OPERATION|FILE_PATH|FILE_CODE|FILE|CONTENT|DIRECTORY)\s*/?>")
		.unwrap()
});

/// One problem found in a `CODE_CHANGES` block, with its 1-based line when it has one.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ValidationIssue {
	#[display("Line {line}: CDATA section is never closed (each <![CDATA[ needs a matching ]]>)")]
	UnclosedCdata { line: usize },

	#[display("Line {line}: Nested CDATA section (CDATA sections cannot be nested)")]
	NestedCdata { line: usize },

	#[display("Line {line}: ]]> outside of any CDATA section")]
	UnmatchedCdataEnd { line: usize },

	#[display("Missing <{element}> element")]
	MissingElement { element: &'static str },

	#[display("Line {line}: Structural tag <{tag}> must be uppercase")]
	LowercaseTag { line: usize, tag: String },
}

/// The issues of a rejected `CODE_CHANGES` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssues(pub Vec<ValidationIssue>);

impl ValidationIssues {
	pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for ValidationIssues {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, issue) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str("; ")?;
			}
			write!(f, "{issue}")?;
		}
		Ok(())
	}
}

/// Checks the structure of the `CODE_CHANGES` block in `input`.
///
/// Reports unclosed or nested CDATA sections, stray `]]>`, structural tags not in uppercase,
/// and a missing `CODE_CHANGES` root or `FILE` elements. The `CHANGED_FILES` wrapper is optional.
/// An empty list means the block can be extracted.
pub fn validate_code_changes(input: &str) -> Vec<ValidationIssue> {
	let mut issues = check_cdata(input);

	let masked = mask_cdata(input);
	for caps in RE_STRUCT_TAG.captures_iter(&masked) {
		let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
			continue;
		};
		let name = name.as_str();
		if name != name.to_ascii_uppercase() {
			issues.push(ValidationIssue::LowercaseTag {
				line: line_at(input, whole.start()),
				tag: name.to_string(),
			});
		}
	}

	match find_elems(input, "CODE_CHANGES").first() {
		None => issues.push(ValidationIssue::MissingElement {
			element: "CODE_CHANGES",
		}),
		Some(block) => {
			if find_elems(block.content, "FILE").is_empty() {
				issues.push(ValidationIssue::MissingElement { element: "FILE" });
			}
		}
	}

	issues
}

/// Whether `input` holds something meant as a `CODE_CHANGES` block, in any letter case.
pub(crate) fn has_code_changes_tag(input: &str) -> bool {
	mask_cdata(input).to_ascii_lowercase().contains("<code_changes")
}

// region:    --- Support

fn check_cdata(input: &str) -> Vec<ValidationIssue> {
	let mut issues = Vec::new();
	let spans = cdata_spans(input);

	for (i, span) in spans.iter().enumerate() {
		let body = &input[span.body(input.len())];

		let Some(end) = span.end else {
			issues.push(ValidationIssue::UnclosedCdata {
				line: line_at(input, span.start),
			});
			continue;
		};

		// The text up to the next section should not close a section again.
		let gap_end = spans.get(i + 1).map(|next| next.start).unwrap_or(input.len());
		if let Some(stray) = input[end..gap_end].find(CDATA_END) {
			let issue = match body.find(CDATA_START) {
				Some(inner) => ValidationIssue::NestedCdata {
					line: line_at(input, span.start + CDATA_START.len() + inner),
				},
				None => ValidationIssue::UnmatchedCdataEnd {
					line: line_at(input, end + stray),
				},
			};
			issues.push(issue);
		}
	}

	issues
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	const VALID: &str = "<CODE_CHANGES>
<CHANGED_FILES>
<FILE>
<FILE_OPERATION>UPDATE</FILE_OPERATION>
<FILE_PATH>a.js</FILE_PATH>
<FILE_CODE><![CDATA[const s = \"]]]]><![CDATA[>\";]]></FILE_CODE>
</FILE>
</CHANGED_FILES>
</CODE_CHANGES>";

	#[test]
	fn test_validate_valid_block() -> Result<()> {
		// -- Exec
		let issues = validate_code_changes(VALID);

		// -- Check
		assert!(issues.is_empty(), "Expected no issues, got: {issues:?}");

		Ok(())
	}

	#[test]
	fn test_validate_unclosed_cdata() -> Result<()> {
		// -- Setup & Fixtures
		let input = VALID.replace("\";]]></FILE_CODE>", "\";</FILE_CODE>");

		// -- Exec
		let issues = validate_code_changes(&input);

		// -- Check
		// the split section on line 6 opens a second section that never closes
		assert_eq!(issues[0], ValidationIssue::UnclosedCdata { line: 6 });
		assert!(issues.contains(&ValidationIssue::MissingElement {
			element: "CODE_CHANGES"
		}));

		Ok(())
	}

	#[test]
	fn test_validate_nested_cdata() -> Result<()> {
		// -- Setup & Fixtures
		let input = VALID.replace(
			"<![CDATA[const s = \"]]]]><![CDATA[>\";]]>",
			"<![CDATA[\nouter\n<![CDATA[inner]]>\nrest]]>",
		);

		// -- Exec
		let issues = validate_code_changes(&input);

		// -- Check
		assert_eq!(issues, vec![ValidationIssue::NestedCdata { line: 8 }]);

		Ok(())
	}

	#[test]
	fn test_validate_stray_cdata_end() -> Result<()> {
		// -- Setup & Fixtures
		let input = VALID.replace("</FILE_CODE>", "</FILE_CODE>\n]]>");

		// -- Exec
		let issues = validate_code_changes(&input);

		// -- Check
		assert_eq!(issues, vec![ValidationIssue::UnmatchedCdataEnd { line: 7 }]);

		Ok(())
	}

	#[test]
	fn test_validate_lowercase_tags() -> Result<()> {
		// -- Setup & Fixtures
		let input = VALID.replace("<FILE>", "<file>").replace("</FILE>", "</file>");

		// -- Exec
		let issues = validate_code_changes(&input);

		// -- Check
		assert_eq!(
			issues,
			vec![
				ValidationIssue::LowercaseTag {
					line: 3,
					tag: "file".to_string()
				},
				ValidationIssue::LowercaseTag {
					line: 7,
					tag: "file".to_string()
				},
				ValidationIssue::MissingElement { element: "FILE" },
			]
		);

		Ok(())
	}

	#[test]
	fn test_validate_missing_root_and_files() -> Result<()> {
		// -- Exec
		let no_root = validate_code_changes("<code_changes></code_changes>");
		let no_files = validate_code_changes("<CODE_CHANGES>\n</CODE_CHANGES>");

		// -- Check
		assert_eq!(
			no_root,
			vec![
				ValidationIssue::LowercaseTag {
					line: 1,
					tag: "code_changes".to_string()
				},
				ValidationIssue::LowercaseTag {
					line: 1,
					tag: "code_changes".to_string()
				},
				ValidationIssue::MissingElement {
					element: "CODE_CHANGES"
				},
			]
		);
		assert_eq!(no_files, vec![ValidationIssue::MissingElement { element: "FILE" }]);

		Ok(())
	}

	#[test]
	fn test_validate_markup_inside_cdata_ignored() -> Result<()> {
		// -- Setup & Fixtures
		let input = VALID.replace("const s", "const xml = `<file></FILE>`; const s");

		// -- Exec
		let issues = validate_code_changes(&input);

		// -- Check
		assert!(issues.is_empty(), "Expected no issues, got: {issues:?}");

		Ok(())
	}
}

// endregion: --- Tests
