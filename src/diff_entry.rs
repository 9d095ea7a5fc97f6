/// One line of a diff. Line numbers are 1-based positions in the filtered (non-blank)
/// sequences of the old and new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEntry {
	Same { line: String, old_num: usize, new_num: usize },
	Add { line: String, new_num: usize },
	Remove { line: String, old_num: usize },
}

impl DiffEntry {
	pub fn line(&self) -> &str {
		match self {
			DiffEntry::Same { line, .. } => line,
			DiffEntry::Add { line, .. } => line,
			DiffEntry::Remove { line, .. } => line,
		}
	}

	pub fn old_num(&self) -> Option<usize> {
		match self {
			DiffEntry::Same { old_num, .. } | DiffEntry::Remove { old_num, .. } => Some(*old_num),
			DiffEntry::Add { .. } => None,
		}
	}

	pub fn new_num(&self) -> Option<usize> {
		match self {
			DiffEntry::Same { new_num, .. } | DiffEntry::Add { new_num, .. } => Some(*new_num),
			DiffEntry::Remove { .. } => None,
		}
	}

	pub fn is_change(&self) -> bool {
		!matches!(self, DiffEntry::Same { .. })
	}

	pub fn kind(&self) -> &'static str {
		match self {
			DiffEntry::Same { .. } => "same",
			DiffEntry::Add { .. } => "add",
			DiffEntry::Remove { .. } => "remove",
		}
	}
}

/// Counts per entry kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
	pub same: usize,
	pub added: usize,
	pub removed: usize,
}

/// The ordered result of one diff computation. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSequence {
	entries: Vec<DiffEntry>,
}

impl DiffSequence {
	pub(crate) fn new(entries: Vec<DiffEntry>) -> Self {
		Self { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[DiffEntry] {
		&self.entries
	}

	pub fn has_changes(&self) -> bool {
		self.entries.iter().any(DiffEntry::is_change)
	}

	pub fn stats(&self) -> DiffStats {
		self.entries.iter().fold(DiffStats::default(), |mut stats, entry| {
			match entry {
				DiffEntry::Same { .. } => stats.same += 1,
				DiffEntry::Add { .. } => stats.added += 1,
				DiffEntry::Remove { .. } => stats.removed += 1,
			}
			stats
		})
	}
}

// region:    --- Iterators

impl DiffSequence {
	pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
		self.entries.iter()
	}
}

impl IntoIterator for DiffSequence {
	type Item = DiffEntry;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<'a> IntoIterator for &'a DiffSequence {
	type Item = &'a DiffEntry;
	type IntoIter = std::slice::Iter<'a, DiffEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

// endregion: --- Iterators
