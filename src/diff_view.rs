use crate::{DiffEntry, DiffSequence};
use std::fmt;

pub const NO_CHANGES_MSG: &str = "No changes detected";

/// How a computed diff is laid out for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
	/// Unchanged entries kept around each change.
	pub context_lines: usize,
	/// Cap on rendered rows. The computed diff itself is never truncated.
	pub max_rows: Option<usize>,
	/// Rows per batch for incremental rendering.
	pub batch_size: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			context_lines: 3,
			max_rows: None,
			batch_size: 200,
		}
	}
}

impl RenderOptions {
	pub fn with_context_lines(mut self, context_lines: usize) -> Self {
		self.context_lines = context_lines;
		self
	}

	pub fn with_max_rows(mut self, max_rows: usize) -> Self {
		self.max_rows = Some(max_rows);
		self
	}

	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
	Same { num: usize, line: String },
	Added { num: usize, line: String },
	Removed { num: usize, line: String },
	/// Collapsed run of unchanged entries.
	Separator,
	/// Rows left out because of `max_rows`.
	Truncated { remaining: usize },
}

impl fmt::Display for DiffRow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DiffRow::Same { num, line } => write!(f, " {num} {line}"),
			DiffRow::Added { num, line } => write!(f, "+{num} {line}"),
			DiffRow::Removed { num, line } => write!(f, "-{num} {line}"),
			DiffRow::Separator => write!(f, "..."),
			DiffRow::Truncated { remaining } => write!(f, "... {remaining} more rows not shown"),
		}
	}
}

/// Display rows of a diff, with unchanged runs collapsed.
///
/// Built from an already computed `DiffSequence`, which it does not alter.
#[derive(Debug, Clone)]
pub struct DiffView {
	rows: Vec<DiffRow>,
	has_changes: bool,
	batch_size: usize,
}

impl DiffView {
	pub fn new(diff: &DiffSequence, options: &RenderOptions) -> Self {
		let entries = diff.entries();
		let context = options.context_lines;

		let mut rows = Vec::new();
		let mut last_shown: Option<usize> = None;

		for (i, entry) in entries.iter().enumerate() {
			let lo = i.saturating_sub(context);
			let hi = entries.len().min(i + context + 1);
			let near_change = entries[lo..hi].iter().any(DiffEntry::is_change);

			if !entry.is_change() && !near_change {
				continue;
			}

			if let Some(last) = last_shown
				&& i > last + 1
			{
				rows.push(DiffRow::Separator);
			}

			rows.push(match entry {
				DiffEntry::Same { line, old_num, .. } => DiffRow::Same {
					num: *old_num,
					line: line.clone(),
				},
				DiffEntry::Add { line, new_num } => DiffRow::Added {
					num: *new_num,
					line: line.clone(),
				},
				DiffEntry::Remove { line, old_num } => DiffRow::Removed {
					num: *old_num,
					line: line.clone(),
				},
			});
			last_shown = Some(i);
		}

		if let Some(max_rows) = options.max_rows
			&& rows.len() > max_rows
		{
			let remaining = rows.len() - max_rows;
			rows.truncate(max_rows);
			rows.push(DiffRow::Truncated { remaining });
		}

		Self {
			rows,
			has_changes: diff.has_changes(),
			batch_size: options.batch_size.max(1),
		}
	}

	pub fn has_changes(&self) -> bool {
		self.has_changes
	}

	pub fn rows(&self) -> &[DiffRow] {
		&self.rows
	}

	/// Rows in fixed-size batches, for callers rendering incrementally.
	pub fn batches(&self) -> std::slice::Chunks<'_, DiffRow> {
		self.rows.chunks(self.batch_size.max(1))
	}

	/// All rows, one per line, or `NO_CHANGES_MSG` when nothing changed.
	pub fn render(&self) -> String {
		if !self.has_changes {
			return NO_CHANGES_MSG.to_string();
		}

		self.rows.iter().map(|row| row.to_string()).collect::<Vec<_>>().join("\n")
	}
}

/// Renders a diff with the default options.
pub fn render_diff(diff: &DiffSequence) -> String {
	DiffView::new(diff, &RenderOptions::default()).render()
}

// region:    --- Tests


// endregion: --- Tests
