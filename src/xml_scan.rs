//! CDATA-aware element lookup over the loosely formed XML of `CODE_CHANGES` blocks.
//!
//! Tags are searched in a copy of the text where CDATA bodies are blanked out, so markup
//! that only appears inside file code (e.g., `</FILE>` in a string literal) never closes
//! an element. Byte offsets are kept, so every match maps back to the original text.

use markex::tag;
use std::ops::Range;

pub(crate) const CDATA_START: &str = "<![CDATA[";
pub(crate) const CDATA_END: &str = "]]>";

// region:    --- CDATA

/// A CDATA section of a text. `end` is the index after its `]]>`, `None` when never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CdataSpan {
	pub start: usize,
	pub end: Option<usize>,
}

impl CdataSpan {
	/// Range of the section body, up to the end of `text_len` when never closed.
	pub fn body(&self, text_len: usize) -> Range<usize> {
		let body_start = self.start + CDATA_START.len();
		let body_end = self.end.map(|end| end - CDATA_END.len()).unwrap_or(text_len);
		body_start..body_end
	}
}

/// CDATA sections in document order. Scanning stops at an unclosed section.
pub(crate) fn cdata_spans(text: &str) -> Vec<CdataSpan> {
	let mut spans = Vec::new();
	let mut pos = 0;

	while let Some(offset) = text[pos..].find(CDATA_START) {
		let start = pos + offset;
		let body_start = start + CDATA_START.len();

		match text[body_start..].find(CDATA_END) {
			Some(end_offset) => {
				let end = body_start + end_offset + CDATA_END.len();
				spans.push(CdataSpan { start, end: Some(end) });
				pos = end;
			}
			None => {
				spans.push(CdataSpan { start, end: None });
				break;
			}
		}
	}

	spans
}

/// Copy of `text` with every CDATA body replaced by spaces (newlines kept), same byte length.
pub(crate) fn mask_cdata(text: &str) -> String {
	let mut masked = String::with_capacity(text.len());
	let mut last = 0;

	for span in cdata_spans(text) {
		let body = span.body(text.len());
		masked.push_str(&text[last..body.start]);
		for c in text[body.clone()].chars() {
			if c == '\n' {
				masked.push('\n');
			} else {
				masked.extend(std::iter::repeat_n(' ', c.len_utf8()));
			}
		}
		last = body.end;
	}
	masked.push_str(&text[last..]);

	masked
}

/// 1-based line number of the byte `offset` in `text`.
pub(crate) fn line_at(text: &str, offset: usize) -> usize {
	text[..offset.min(text.len())].matches('\n').count() + 1
}

// endregion: --- CDATA

// region:    --- Elements

/// A `<NAME>...</NAME>` element found outside CDATA sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlElem<'a> {
	pub content: &'a str,
	/// From the `<` of the start tag to after the `>` of the end tag.
	pub range: Range<usize>,
}

/// Non-nested `name` elements of `text`, in document order.
pub(crate) fn find_elems<'a>(text: &'a str, name: &str) -> Vec<XmlElem<'a>> {
	let masked = mask_cdata(text);
	let end_tag_len = name.len() + 3; // `</` + name + `>`

	tag::extract_refs(&masked, &[name], false)
		.tag_elems()
		.into_iter()
		.map(|elem| {
			// empty or self-closing
			let content = if elem.content.is_empty() {
				""
			} else {
				let close_start = elem.end_idx + 1 - end_tag_len;
				&text[close_start - elem.content.len()..close_start]
			};
			XmlElem {
				content,
				range: elem.start_idx..elem.end_idx + 1,
			}
		})
		.collect()
}

pub(crate) fn first_elem<'a>(text: &'a str, name: &str) -> Option<XmlElem<'a>> {
	find_elems(text, name).into_iter().next()
}

/// `text` without the given element ranges (ranges in document order).
pub(crate) fn text_outside(text: &str, elems: &[XmlElem<'_>]) -> String {
	let mut out = String::with_capacity(text.len());
	let mut last = 0;
	for elem in elems {
		out.push_str(&text[last..elem.range.start]);
		last = elem.range.end;
	}
	out.push_str(&text[last..]);
	out
}

// endregion: --- Elements

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	#[test]
	fn test_xml_scan_mask_keeps_offsets() -> Result<()> {
		// -- Setup & Fixtures
		let text = "<A><![CDATA[é</A>\nx]]></A>";

		// -- Exec
		let masked = mask_cdata(text);

		// -- Check
		assert_eq!(masked.len(), text.len());
		assert_eq!(masked, "<A><![CDATA[      \n ]]></A>");

		Ok(())
	}

	#[test]
	fn test_xml_scan_find_elems_skips_cdata_markup() -> Result<()> {
		// -- Setup & Fixtures
		let text = "<FILE><FILE_CODE><![CDATA[a = \"</FILE_CODE></FILE>\";]]></FILE_CODE></FILE>tail";

		// -- Exec
		let files = find_elems(text, "FILE");
		let code = first_elem(files[0].content, "FILE_CODE").ok_or("Should have FILE_CODE")?;

		// -- Check
		assert_eq!(files.len(), 1);
		assert_eq!(code.content, "<![CDATA[a = \"</FILE_CODE></FILE>\";]]>");
		assert_eq!(text_outside(text, &files), "tail");

		Ok(())
	}

	#[test]
	fn test_xml_scan_unclosed_cdata_and_lines() -> Result<()> {
		// -- Setup & Fixtures
		let text = "a\n<![CDATA[x]]>\n<![CDATA[never closed\n";

		// -- Exec
		let spans = cdata_spans(text);

		// -- Check
		assert_eq!(spans.len(), 2);
		assert!(spans[0].end.is_some());
		assert_eq!(spans[1].end, None);
		assert_eq!(line_at(text, spans[1].start), 3);
		assert_eq!(&text[spans[1].body(text.len())], "never closed\n");

		Ok(())
	}
}

// endregion: --- Tests
