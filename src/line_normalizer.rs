use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([,;=:\{\}\(\)\[\]])").unwrap());

/// Canonical spacing per punctuation, applied in order after the punctuation got spaced out.
static CANONICAL_SPACING: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
	[
		(r"\s*,\s*", ", "),
		(r"\s*;\s*", ";"),
		(r"\s*=\s*", " = "),
		(r"\s*:\s*", ": "),
		(r"\s*\{\s*", " {"),
		(r"\s*\}\s*", "}"),
		(r"\s*\(\s*", "("),
		(r"\s*\)\s*", ")"),
		(r"\s*\[\s*", "["),
		(r"\s*\]\s*", "]"),
	]
	.into_iter()
	.map(|(re, rep)| (Regex::new(re).unwrap(), rep))
	.collect()
});

/// A non-blank source line with its whitespace-canonicalized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
	/// Leading whitespace of the original line, kept as is.
	pub indent: String,
	/// Canonicalized content, never empty.
	pub content: String,
	/// The untouched source line.
	pub original: String,
}

impl NormalizedLine {
	/// The reconstructed line (`indent + content`) used for all matching.
	pub fn line(&self) -> String {
		format!("{}{}", self.indent, self.content)
	}
}

/// Splits `raw` on `\n` and normalizes every line, dropping blank ones.
///
/// Numbering downstream is based on this filtered sequence, so blank lines are
/// invisible to the diff.
pub fn normalize_text(raw: &str) -> Vec<NormalizedLine> {
	raw.split('\n').filter_map(normalize_line).collect()
}

/// Normalizes a single line, returning `None` for blank or whitespace-only lines.
pub fn normalize_line(line: &str) -> Option<NormalizedLine> {
	let content = normalize_content(line.trim());
	if content.is_empty() {
		return None;
	}

	let indent_len = line.len() - line.trim_start().len();

	Some(NormalizedLine {
		indent: line[..indent_len].to_string(),
		content,
		original: line.to_string(),
	})
}

/// Normalizes `raw` and returns the reconstructed lines.
pub fn reconstruct_lines(raw: &str) -> Vec<String> {
	normalize_text(raw).iter().map(NormalizedLine::line).collect()
}

// region:    --- Support

fn normalize_content(trimmed: &str) -> String {
	let content = RE_WHITESPACE.replace_all(trimmed, " ");
	let content = RE_PUNCT.replace_all(&content, " ${1} ");
	let mut content = RE_WHITESPACE.replace_all(&content, " ").into_owned();

	for (re, rep) in CANONICAL_SPACING.iter() {
		content = re.replace_all(&content, *rep).into_owned();
	}

	content.trim().to_string()
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_line_normalizer_spacing_variants_converge() -> Result<()> {
		// -- Setup & Fixtures
		let a = "function foo(){return 1;}";
		let b = "function  foo(){  return 1 ;}";
		let c = "function foo ( ) { return 1 ; }";

		// -- Exec
		let a = reconstruct_lines(a);
		let b = reconstruct_lines(b);
		let c = reconstruct_lines(c);

		// -- Check
		assert_eq!(a, vec!["function foo(){return 1;}".to_string()]);
		assert_eq!(a, b);
		assert_eq!(a, c);

		Ok(())
	}

	#[test]
	fn test_line_normalizer_canonical_punctuation() -> Result<()> {
		// -- Exec
		let line = normalize_line("  const   x=foo(a,b) ;").ok_or("Should normalize")?;
		let obj = normalize_line("key:value").ok_or("Should normalize")?;
		let arr = normalize_line("let v = items[ 0 ]").ok_or("Should normalize")?;

		// -- Check
		assert_eq!(line.indent, "  ");
		assert_eq!(line.content, "const x = foo(a, b);");
		assert_eq!(line.line(), "  const x = foo(a, b);");
		assert_eq!(line.original, "  const   x=foo(a,b) ;");
		assert_eq!(obj.content, "key: value");
		assert_eq!(arr.content, "let v = items[0]");

		Ok(())
	}

	#[test]
	fn test_line_normalizer_drops_blank_lines() -> Result<()> {
		// -- Setup & Fixtures
		let raw = "a\n\n   \n\t\nb\r\n\r\nc";

		// -- Exec
		let lines = normalize_text(raw);

		// -- Check
		let contents: Vec<&str> = lines.iter().map(|l| l.content.as_str()).collect();
		assert_eq!(contents, vec!["a", "b", "c"]);
		assert_eq!(lines[1].original, "b\r");

		Ok(())
	}

	#[test]
	fn test_line_normalizer_empty_and_prose() -> Result<()> {
		// -- Exec & Check
		assert!(normalize_text("").is_empty());
		let prose = reconstruct_lines("Hello ( world ]] ;; unmatched {");
		assert_eq!(prose.len(), 1);

		Ok(())
	}
}

// endregion: --- Tests
