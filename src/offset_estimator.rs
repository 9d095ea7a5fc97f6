use crate::{DiffOptions, select_anchors};
use tracing::trace;

/// Estimates how many lines the content shifted between `old_lines` and `new_lines`,
/// using the default options.
pub fn estimate_offset(old_lines: &[String], new_lines: &[String]) -> isize {
	estimate_offset_with(old_lines, new_lines, &DiffOptions::default())
}

/// Anchors of `old_lines` vote for the offset at which they reappear in `new_lines`.
/// The most voted offset wins; ties go to the first offset voted for; no votes gives `0`.
pub fn estimate_offset_with(old_lines: &[String], new_lines: &[String], options: &DiffOptions) -> isize {
	let anchors = select_anchors(old_lines, options.anchor_count);
	let radius = options.anchor_search_radius;

	// (offset, votes) in first-seen order
	let mut votes: Vec<(isize, usize)> = Vec::new();

	for anchor in &anchors {
		let start = anchor.index.saturating_sub(radius);
		let end = new_lines.len().min(anchor.index + radius);

		let found = (start..end).find(|&i| new_lines[i] == anchor.line);
		let Some(new_idx) = found else {
			trace!(index = anchor.index, "anchor not found in new lines");
			continue;
		};

		let offset = new_idx as isize - anchor.index as isize;
		match votes.iter_mut().find(|(o, _)| *o == offset) {
			Some((_, count)) => *count += 1,
			None => votes.push((offset, 1)),
		}
	}

	let mut best_offset = 0;
	let mut best_count = 0;
	for (offset, count) in votes {
		if count > best_count {
			best_count = count;
			best_offset = offset;
		}
	}

	trace!(anchors = anchors.len(), offset = best_offset, votes = best_count, "offset estimated");

	best_offset
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;

	fn decl_lines(range: std::ops::Range<usize>) -> Vec<String> {
		range.map(|i| format!("const value_{i} = compute({i}, \"item\");")).collect()
	}

	#[test]
	fn test_offset_estimator_identity() -> Result<()> {
		// -- Setup & Fixtures
		let lines = decl_lines(0..40);

		// -- Exec
		let offset = estimate_offset(&lines, &lines);

		// -- Check
		assert_eq!(offset, 0);

		Ok(())
	}

	#[test]
	fn test_offset_estimator_insertion_drift() -> Result<()> {
		// -- Setup & Fixtures
		let old = decl_lines(0..100);
		let mut new = old.clone();
		for k in 0..5 {
			new.insert(10 + k, format!("// inserted note {k}"));
		}

		// -- Exec
		let offset = estimate_offset(&old, &new);

		// -- Check
		assert_eq!(offset, 5);

		Ok(())
	}

	#[test]
	fn test_offset_estimator_deletion_drift() -> Result<()> {
		// -- Setup & Fixtures
		let old = decl_lines(0..60);
		let mut new = old.clone();
		new.drain(2..5);

		// -- Exec
		let offset = estimate_offset(&old, &new);

		// -- Check
		assert_eq!(offset, -3);

		Ok(())
	}

	#[test]
	fn test_offset_estimator_no_votes() -> Result<()> {
		// -- Setup & Fixtures
		let old = decl_lines(0..30);
		let new = decl_lines(100..130);

		// -- Exec & Check
		assert_eq!(estimate_offset(&old, &new), 0);
		assert_eq!(estimate_offset(&old, &[]), 0);
		assert_eq!(estimate_offset(&[], &new), 0);

		Ok(())
	}

	#[test]
	fn test_offset_estimator_tie_first_seen_wins() -> Result<()> {
		// -- Setup & Fixtures
		// 4 lines, so every line is an anchor: two vote +1, two vote 0.
		let old: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
		let new: Vec<String> = ["x", "a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
		let new_tie: Vec<String> = ["a", "b", "x", "y", "c", "d"].iter().map(|s| s.to_string()).collect();

		// -- Exec & Check
		assert_eq!(estimate_offset(&old, &new), 1);
		// a, b vote 0 first; c, d vote +2 later with the same count
		assert_eq!(estimate_offset(&old, &new_tie), 0);

		Ok(())
	}
}

// endregion: --- Tests
