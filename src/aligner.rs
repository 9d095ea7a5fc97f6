use crate::{DiffEntry, DiffOptions, DiffSequence, estimate_offset_with, reconstruct_lines};
use std::collections::HashMap;
use tracing::debug;

/// Base of the distance score for a nearby candidate; the closer to the expected
/// position, the higher.
const DISTANCE_SCORE_BASE: isize = 10;

/// Computes the line diff between two texts with the default options.
///
/// Blank lines are ignored and spacing differences are normalized away before
/// comparison. Never fails: empty texts are valid (all `Add` or all `Remove`).
pub fn compute_diff(old_text: &str, new_text: &str) -> DiffSequence {
	compute_diff_with(old_text, new_text, &DiffOptions::default())
}

pub fn compute_diff_with(old_text: &str, new_text: &str, options: &DiffOptions) -> DiffSequence {
	let old_lines = reconstruct_lines(old_text);
	let new_lines = reconstruct_lines(new_text);

	let diff = align_lines(&old_lines, &new_lines, options);

	let stats = diff.stats();
	debug!(
		old_lines = old_lines.len(),
		new_lines = new_lines.len(),
		same = stats.same,
		added = stats.added,
		removed = stats.removed,
		"diff computed"
	);

	diff
}

/// Aligns two sequences of reconstructed lines in one forward pass.
///
/// The global offset estimated from the anchors gives the expected position of each old
/// line in the new sequence. A line is matched either exactly at that position, or at
/// the best-scoring nearby occurrence (distance plus surrounding context). Everything
/// else becomes a `Remove`/`Add`.
///
/// Every old line ends up exactly once as `Same` or `Remove`, every new line exactly
/// once as `Same` or `Add`.
pub fn align_lines(old: &[String], new: &[String], options: &DiffOptions) -> DiffSequence {
	let line_offset = estimate_offset_with(old, new, options);
	debug!(line_offset, "aligning lines");

	let mut new_line_map: HashMap<&str, Vec<usize>> = HashMap::new();
	for (idx, line) in new.iter().enumerate() {
		new_line_map.entry(line.as_str()).or_default().push(idx);
	}

	let mut aligner = Aligner::new(old, new);

	while aligner.old_index < old.len() || aligner.new_index < new.len() {
		if aligner.old_index >= old.len() {
			aligner.push_add();
			continue;
		}
		if aligner.new_index >= new.len() {
			aligner.push_remove();
			continue;
		}

		let old_line = &old[aligner.old_index];
		let expected = aligner.old_index as isize + line_offset;

		// -- Match at the offset position
		if let Some(expected_idx) = forward_index(expected, aligner.new_index, new.len())
			&& new[expected_idx] == *old_line
		{
			aligner.flush_adds_until(expected_idx);
			aligner.push_same();
			continue;
		}

		// -- Match at the best nearby occurrence
		let candidates = new_line_map.get(old_line.as_str()).map(Vec::as_slice).unwrap_or(&[]);
		if let Some(best_match) = aligner.best_nearby_match(candidates, expected, options) {
			aligner.flush_adds_until(best_match);
			aligner.push_same();
			continue;
		}

		// -- No match
		if *old_line != new[aligner.new_index] {
			aligner.push_remove();

			// Keep the new line for a later offset match if the removed line shows up again
			// right around where it is now expected.
			let reappear_at = aligner.old_index as isize + line_offset;
			let reappears = candidates.iter().any(|&idx| {
				idx > aligner.new_index && (idx as isize - reappear_at).unsigned_abs() < options.reappear_window
			});
			if !reappears {
				aligner.push_add();
			}
		} else {
			// Equal lines that none of the above matched (e.g., far from the expected position).
			aligner.push_same();
		}
	}

	DiffSequence::new(aligner.entries)
}

// region:    --- Aligner

struct Aligner<'a> {
	old: &'a [String],
	new: &'a [String],
	old_index: usize,
	new_index: usize,
	entries: Vec<DiffEntry>,
}

impl<'a> Aligner<'a> {
	fn new(old: &'a [String], new: &'a [String]) -> Self {
		Self {
			old,
			new,
			old_index: 0,
			new_index: 0,
			entries: Vec::with_capacity(old.len().max(new.len())),
		}
	}

	fn push_same(&mut self) {
		self.entries.push(DiffEntry::Same {
			line: self.old[self.old_index].clone(),
			old_num: self.old_index + 1,
			new_num: self.new_index + 1,
		});
		self.old_index += 1;
		self.new_index += 1;
	}

	fn push_add(&mut self) {
		self.entries.push(DiffEntry::Add {
			line: self.new[self.new_index].clone(),
			new_num: self.new_index + 1,
		});
		self.new_index += 1;
	}

	fn push_remove(&mut self) {
		self.entries.push(DiffEntry::Remove {
			line: self.old[self.old_index].clone(),
			old_num: self.old_index + 1,
		});
		self.old_index += 1;
	}

	/// Emits the new lines before `target` as additions.
	fn flush_adds_until(&mut self, target: usize) {
		while self.new_index < target {
			self.push_add();
		}
	}

	/// Returns the not-yet-consumed candidate closest to `expected`, weighted by how many
	/// surrounding lines agree. First best wins on equal scores.
	fn best_nearby_match(&self, candidates: &[usize], expected: isize, options: &DiffOptions) -> Option<usize> {
		let mut best: Option<(usize, isize)> = None;

		for &idx in candidates {
			if idx < self.new_index {
				continue;
			}
			let distance = (idx as isize - expected).unsigned_abs();
			if distance > options.match_window {
				continue;
			}

			let context = self.context_matches(idx, options.context_size);
			let score = DISTANCE_SCORE_BASE - distance as isize + 2 * context as isize;

			if score > 0 && best.is_none_or(|(_, best_score)| score > best_score) {
				best = Some((idx, score));
			}
		}

		best.map(|(idx, _)| idx)
	}

	/// Counts the neighbor pairs (up to `size` before and after) that are equal when the
	/// current old line is aligned with `new_idx`.
	fn context_matches(&self, new_idx: usize, size: usize) -> usize {
		let old_idx = self.old_index;
		let mut matches = 0;

		for i in 1..=size {
			if old_idx >= i && new_idx >= i && self.old[old_idx - i] == self.new[new_idx - i] {
				matches += 1;
			}
		}
		for i in 1..=size {
			if old_idx + i < self.old.len() && new_idx + i < self.new.len() && self.old[old_idx + i] == self.new[new_idx + i]
			{
				matches += 1;
			}
		}

		matches
	}
}

// endregion: --- Aligner

// region:    --- Support

/// `pos` as an index of the new sequence, only if it is not behind the new cursor.
fn forward_index(pos: isize, new_index: usize, len: usize) -> Option<usize> {
	if pos >= new_index as isize && pos < len as isize {
		Some(pos as usize)
	} else {
		None
	}
}

// endregion: --- Support

// region:    --- Tests


// endregion: --- Tests
