/// Default number of anchors picked from the old text.
pub const DEFAULT_ANCHOR_COUNT: usize = 10;

/// Tuning knobs for the alignment engine.
///
/// The defaults are the values the engine was calibrated with; callers rarely need
/// anything else than `DiffOptions::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
	/// How many anchors to spread across the old text.
	pub anchor_count: usize,
	/// Half-width of the new-text window searched for each anchor.
	pub anchor_search_radius: usize,
	/// Max distance from the expected position for a nearby candidate match.
	pub match_window: usize,
	/// Number of neighbor lines (each side) compared when scoring a candidate.
	pub context_size: usize,
	/// Distance under which a later reappearance suppresses an `Add`.
	pub reappear_window: usize,
}

impl Default for DiffOptions {
	fn default() -> Self {
		Self {
			anchor_count: DEFAULT_ANCHOR_COUNT,
			anchor_search_radius: 50,
			match_window: 5,
			context_size: 2,
			reappear_window: 3,
		}
	}
}

impl DiffOptions {
	pub fn with_anchor_count(mut self, anchor_count: usize) -> Self {
		self.anchor_count = anchor_count;
		self
	}

	pub fn with_anchor_search_radius(mut self, radius: usize) -> Self {
		self.anchor_search_radius = radius;
		self
	}

	pub fn with_match_window(mut self, match_window: usize) -> Self {
		self.match_window = match_window;
		self
	}

	pub fn with_context_size(mut self, context_size: usize) -> Self {
		self.context_size = context_size;
		self
	}

	pub fn with_reappear_window(mut self, reappear_window: usize) -> Self {
		self.reappear_window = reappear_window;
		self
	}
}
