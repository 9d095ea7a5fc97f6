use once_cell::sync::Lazy;
use regex::Regex;

/// Lines made only of brackets, parens, and semicolons.
static RE_STRUCTURAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s{}\[\]();]*$").unwrap());

/// Candidate lines must be strictly longer than this (in chars, once trimmed).
const MIN_ANCHOR_LEN: usize = 15;

const DECLARATION_MARKERS: [&str; 5] = ["function ", "class ", " = ", "const ", "let "];

/// A line of the old text used as a fixed point for drift estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
	/// The reconstructed line.
	pub line: String,
	/// Position in the filtered sequence.
	pub index: usize,
	pub score: f64,
}

/// Picks up to `count` anchors spread across `lines`.
///
/// When `lines` has at most `count` entries, every line is an anchor. Otherwise the line
/// range is cut into equal sections and each section contributes its best-scoring
/// candidate, if it has one.
pub fn select_anchors(lines: &[String], count: usize) -> Vec<Anchor> {
	if lines.len() <= count {
		return lines
			.iter()
			.enumerate()
			.map(|(index, line)| Anchor {
				line: line.clone(),
				index,
				score: anchor_score(line.trim()),
			})
			.collect();
	}

	let mut candidates: Vec<Anchor> = lines
		.iter()
		.enumerate()
		.filter(|(_, line)| is_anchor_candidate(line.trim()))
		.map(|(index, line)| Anchor {
			line: line.clone(),
			index,
			score: anchor_score(line.trim()),
		})
		.collect();

	if candidates.is_empty() || count == 0 {
		return Vec::new();
	}

	// Stable, so equal scores keep document order.
	candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

	let total_sections = count.min(candidates.len());
	let section_size = lines.len() / total_sections;

	let mut anchors = Vec::with_capacity(total_sections);
	for section in 0..total_sections {
		let start = section * section_size;
		let end = start + section_size;

		if let Some(best) = candidates.iter().find(|c| c.index >= start && c.index < end) {
			anchors.push(best.clone());
		}
	}

	anchors
}

/// Stability score of a trimmed line. Higher means less likely to be duplicated by chance.
pub fn anchor_score(line: &str) -> f64 {
	let mut score = line.chars().count().min(50) as f64 * 0.5;

	if line.contains("function ") {
		score += 30.;
	}
	if line.contains("class ") {
		score += 30.;
	}
	if line.contains("const ") {
		score += 20.;
	}
	if line.contains("let ") {
		score += 15.;
	}
	if line.contains('"') || line.contains('\'') {
		score += 10.;
	}
	if line.bytes().any(|b| b.is_ascii_digit()) {
		score += 5.;
	}

	// Common control-flow lines
	if line.contains("return ") {
		score -= 5.;
	}
	if line.contains("break;") {
		score -= 10.;
	}
	if line.contains("continue;") {
		score -= 10.;
	}

	score
}

// region:    --- Support

fn is_anchor_candidate(trimmed: &str) -> bool {
	trimmed.chars().count() > MIN_ANCHOR_LEN
		&& !RE_STRUCTURAL.is_match(trimmed)
		&& !trimmed.starts_with("//")
		&& DECLARATION_MARKERS.iter().any(|m| trimmed.contains(m))
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_anchor_selector_short_input_all_lines() -> Result<()> {
		// -- Setup & Fixtures
		let lines = lines(&["a", "}", "let x = 1;"]);

		// -- Exec
		let anchors = select_anchors(&lines, 10);

		// -- Check
		assert_eq!(anchors.len(), 3);
		let indices: Vec<usize> = anchors.iter().map(|a| a.index).collect();
		assert_eq!(indices, vec![0, 1, 2]);
		assert_eq!(anchors[1].line, "}");

		Ok(())
	}

	#[test]
	fn test_anchor_selector_score() -> Result<()> {
		// -- Exec & Check
		// 20 chars * 0.5 + function
		assert_eq!(anchor_score("function handler(){ "), 10. + 30.);
		// 18 chars * 0.5 + const + quote + digit
		assert_eq!(anchor_score("const a = \"v1\";   "), 9. + 20. + 10. + 5.);
		// length is capped at 50
		let long = "x".repeat(80);
		assert_eq!(anchor_score(&long), 25.);
		assert_eq!(anchor_score("return value;"), 6.5 - 5.);
		assert_eq!(anchor_score("break;"), 3. - 10.);

		Ok(())
	}

	#[test]
	fn test_anchor_selector_filters_candidates() -> Result<()> {
		// -- Setup & Fixtures
		let mut raw = vec!["}"; 30];
		raw[3] = "// const commented = out_of_the_picture;";
		raw[7] = "    const selected_value = compute();";
		raw[12] = "let short = 1;";
		raw[20] = "plain line without markers at all";

		// -- Exec
		let anchors = select_anchors(&lines(&raw), 10);

		// -- Check
		assert_eq!(anchors.len(), 1);
		assert_eq!(anchors[0].index, 7);
		assert_eq!(anchors[0].line, "    const selected_value = compute();");

		Ok(())
	}

	#[test]
	fn test_anchor_selector_spread_across_sections() -> Result<()> {
		// -- Setup & Fixtures
		// 40 lines, every line a candidate; the best one is in the first section.
		let raw: Vec<String> = (0..40)
			.map(|i| {
				if i == 1 {
					"function best_of_all_anchors() {".to_string()
				} else {
					format!("const value_{i} = {i};")
				}
			})
			.collect();

		// -- Exec
		let anchors = select_anchors(&raw, 4);

		// -- Check
		assert_eq!(anchors.len(), 4);
		assert_eq!(anchors[0].index, 1);
		for (section, anchor) in anchors.iter().enumerate() {
			assert!(anchor.index >= section * 10 && anchor.index < section * 10 + 10);
		}

		Ok(())
	}

	#[test]
	fn test_anchor_selector_no_candidates() -> Result<()> {
		// -- Setup & Fixtures
		let raw = lines(&["{"; 20]);

		// -- Exec
		let anchors = select_anchors(&raw, 10);

		// -- Check
		assert!(anchors.is_empty());

		Ok(())
	}
}

// endregion: --- Tests
