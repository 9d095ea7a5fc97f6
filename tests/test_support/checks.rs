use super::TestResult;
use anchordiff::{DiffEntry, DiffSequence};

/// Checks that every old line (1..=old_count) shows up exactly once as `Same`/`Remove`,
/// every new line (1..=new_count) exactly once as `Same`/`Add`, both in increasing order.
pub fn check_totality(diff: &DiffSequence, old_count: usize, new_count: usize) -> TestResult<()> {
	let old_nums: Vec<usize> = diff.iter().filter_map(DiffEntry::old_num).collect();
	let new_nums: Vec<usize> = diff.iter().filter_map(DiffEntry::new_num).collect();

	let expected_old: Vec<usize> = (1..=old_count).collect();
	let expected_new: Vec<usize> = (1..=new_count).collect();

	if old_nums != expected_old {
		return Err(format!("old line numbers not total/ordered: {old_nums:?}").into());
	}
	if new_nums != expected_new {
		return Err(format!("new line numbers not total/ordered: {new_nums:?}").into());
	}

	Ok(())
}

pub fn kinds(diff: &DiffSequence) -> Vec<&'static str> {
	diff.iter().map(DiffEntry::kind).collect()
}
