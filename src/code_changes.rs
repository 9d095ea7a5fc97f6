use crate::CodeChange;

/// The ordered file changes of one `CODE_CHANGES` block.
#[derive(Debug, Clone, Default)]
pub struct CodeChanges {
	changes: Vec<CodeChange>,
}

impl CodeChanges {
	pub fn new(changes: Vec<CodeChange>) -> Self {
		Self { changes }
	}

	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	pub fn len(&self) -> usize {
		self.changes.len()
	}
}

// region:    --- Iterators

impl CodeChanges {
	pub fn iter(&self) -> std::slice::Iter<'_, CodeChange> {
		self.changes.iter()
	}
}

impl IntoIterator for CodeChanges {
	type Item = CodeChange;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.changes.into_iter()
	}
}

impl<'a> IntoIterator for &'a CodeChanges {
	type Item = &'a CodeChange;
	type IntoIter = std::slice::Iter<'a, CodeChange>;

	fn into_iter(self) -> Self::IntoIter {
		self.changes.iter()
	}
}

// endregion: --- Iterators
