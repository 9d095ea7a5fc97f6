use crate::xml_scan::{CDATA_START, cdata_spans};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
	Create,
	Update,
	Delete,
}

impl FileOperation {
	pub fn as_str(&self) -> &'static str {
		match self {
			FileOperation::Create => "CREATE",
			FileOperation::Update => "UPDATE",
			FileOperation::Delete => "DELETE",
		}
	}
}

impl fmt::Display for FileOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FileOperation {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_uppercase().as_str() {
			"CREATE" => Ok(FileOperation::Create),
			"UPDATE" => Ok(FileOperation::Update),
			"DELETE" => Ok(FileOperation::Delete),
			_ => Err(Error::parse_unknown_operation(s.trim())),
		}
	}
}

/// One file change proposed in a `CODE_CHANGES` block.
#[derive(Debug, Clone)]
pub enum CodeChange {
	Create {
		file_path: String,
		summary: Option<String>,
		content: Content,
	},
	Update {
		file_path: String,
		summary: Option<String>,
		content: Content,
	},
	Delete {
		file_path: String,
		summary: Option<String>,
	},

	/// A `FILE` element that could not be turned into a change.
	Fail {
		operation: Option<String>,
		file_path: Option<String>,
		error_msg: String,
	},
}

impl CodeChange {
	pub fn file_path(&self) -> Option<&str> {
		match self {
			CodeChange::Create { file_path, .. } => Some(file_path),
			CodeChange::Update { file_path, .. } => Some(file_path),
			CodeChange::Delete { file_path, .. } => Some(file_path),
			CodeChange::Fail { file_path, .. } => file_path.as_deref(),
		}
	}

	pub fn operation(&self) -> Option<FileOperation> {
		match self {
			CodeChange::Create { .. } => Some(FileOperation::Create),
			CodeChange::Update { .. } => Some(FileOperation::Update),
			CodeChange::Delete { .. } => Some(FileOperation::Delete),
			CodeChange::Fail { .. } => None,
		}
	}

	pub fn summary(&self) -> Option<&str> {
		match self {
			CodeChange::Create { summary, .. } | CodeChange::Update { summary, .. } | CodeChange::Delete { summary, .. } => {
				summary.as_deref()
			}
			CodeChange::Fail { .. } => None,
		}
	}
}

#[derive(Debug, Clone)]
pub struct Content {
	pub content: String,
	pub code_fence: Option<CodeFence>,
}

#[derive(Debug, Clone)]
pub struct CodeFence {
	pub start: String,
	pub end: String,
}

impl Content {
	/// Builds the file content from the raw inner text of a `FILE_CODE` element.
	///
	/// CDATA sections are concatenated (so `]]]]><![CDATA[>` splits decode to `]]>`),
	/// plain text gets the XML entities unescaped. Then one leading newline and an
	/// enclosing markdown code fence are stripped.
	pub fn from_raw(raw: &str) -> Self {
		let mut text = decode_xml_text(raw);
		if text.starts_with('\n') {
			text.remove(0);
		}

		match split_code_fence(&text) {
			Some((code_fence, content)) => Self {
				content,
				code_fence: Some(code_fence),
			},
			None => Self {
				content: text,
				code_fence: None,
			},
		}
	}
}

// region:    --- Support

/// Returns the text value of an XML element body.
fn decode_xml_text(raw: &str) -> String {
	if !raw.trim_start().starts_with(CDATA_START) {
		return unescape_entities(raw);
	}

	let mut out = String::with_capacity(raw.len());
	let mut last = 0;
	for span in cdata_spans(raw) {
		out.push_str(&unescape_entities(raw[last..span.start].trim()));
		let body = span.body(raw.len());
		out.push_str(&raw[body.clone()]);
		last = span.end.unwrap_or(body.end);
	}
	out.push_str(&unescape_entities(raw[last..].trim()));

	out
}

/// Splits a text whose first and last lines are markdown fence lines into the fence and
/// the body (newline terminated).
fn split_code_fence(text: &str) -> Option<(CodeFence, String)> {
	let (first, rest) = text.trim().split_once('\n')?;
	let (body, last) = rest.rsplit_once('\n')?;
	let (start, end) = (first.trim_end(), last.trim());

	if !start.starts_with("```") || !end.starts_with("```") {
		return None;
	}

	let code_fence = CodeFence {
		start: start.to_string(),
		end: end.to_string(),
	};
	Some((code_fence, format!("{body}\n")))
}

fn unescape_entities(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}
	s.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&apos;", "'")
		.replace("&amp;", "&")
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
