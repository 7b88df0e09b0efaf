//! Top-down mergesort.

use crate::{items_from, Counters, SortItem, SortRun, SortStrategy, SortTracer};

/// Stable top-down mergesort.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mergesort;

impl SortTracer for Mergesort {
    fn strategy(&self) -> SortStrategy {
        SortStrategy::Mergesort
    }

    fn sort(&mut self, values: &[f64]) -> SortRun {
        let mut array = items_from(values);
        let counters = mergesort(&mut array, Counters::default());
        SortRun::new(self.strategy(), array, counters)
    }
}

fn mergesort(items: &mut [SortItem], counters: Counters) -> Counters {
    if items.len() < 2 {
        return counters;
    }
    let mid = items.len() / 2;
    let counters = mergesort(&mut items[..mid], counters);
    let counters = mergesort(&mut items[mid..], counters);
    merge(items, mid, counters)
}

/// Merges the sorted halves `items[..mid]` and `items[mid..]`.
///
/// Ties take from the left half, which keeps the sort stable.
fn merge(items: &mut [SortItem], mid: usize, mut counters: Counters) -> Counters {
    counters.steps += 1;
    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();
    let (mut i, mut j) = (0, 0);
    for slot in items.iter_mut() {
        let take_left = if i < left.len() && j < right.len() {
            counters.comparisons += 1;
            left[i].value.total_cmp(&right[j].value).is_le()
        } else {
            i < left.len()
        };
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
    counters
}
