//! Filtering and sorting over borrowed records.
//!
//! Both stages work on row indices into the caller's slice and never touch
//! the records themselves. Filtering runs first; sorting only sees the rows
//! that survived the filter.

use std::cmp::Ordering;

use crate::record::Record;
use crate::state::SortDirection;
use crate::value::CellValue;

/// Indices of records matching the global filter, in input order.
///
/// A record matches when any of its values contains `text` as a
/// case-insensitive substring. Empty text matches every record.
pub fn filter_indices<R: Record>(records: &[R], text: &str) -> Vec<usize> {
    if text.is_empty() {
        return (0..records.len()).collect();
    }
    let needle = text.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_filter(*record, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// Check one record against an already lowercased needle.
fn matches_filter<R: Record>(record: &R, needle: &str) -> bool {
    record
        .values()
        .iter()
        .any(|value| value.as_text().to_lowercase().contains(needle))
}

/// Sort row indices by the value `accessor` reads.
///
/// The sort is stable. Pairs that compare equal or are incomparable keep
/// their relative order in both directions.
pub fn sort_indices<R>(
    records: &[R],
    indices: &mut Vec<usize>,
    accessor: fn(&R) -> CellValue,
    direction: SortDirection,
) {
    let keys: Vec<CellValue> = indices.iter().map(|&i| accessor(&records[i])).collect();
    let mut positions: Vec<usize> = (0..indices.len()).collect();
    merge_sort_by(&mut positions, &|a, b| {
        let ordering = keys[*a].compare(&keys[*b]).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    let sorted: Vec<usize> = positions.into_iter().map(|p| indices[p]).collect();
    *indices = sorted;
}

/// Stable top-down merge sort.
///
/// Incomparable values make the comparison non-transitive, which the
/// standard library sorts are allowed to panic on. This one only ever asks
/// whether the right element goes strictly first, so any comparator
/// produces some stable order.
fn merge_sort_by<T: Copy>(items: &mut [T], compare: &impl Fn(&T, &T) -> Ordering) {
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right]);
            right += 1;
        } else {
            merged.push(items[left]);
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..len]);
    items.copy_from_slice(&merged);
}
