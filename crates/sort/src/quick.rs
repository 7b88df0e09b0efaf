//! Lomuto-partition quicksort with fixed and random pivot selection.

use crate::{items_from, Counters, SortItem, SortRun, SortStrategy, SortTracer};
use mathviz_core::prng::RandomSource;

/// Quicksort that always pivots on the last element of the partition.
///
/// Quadratic on already-sorted input, which is the point of showing it next
/// to the randomized variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quicksort;

impl SortTracer for Quicksort {
    fn strategy(&self) -> SortStrategy {
        SortStrategy::Quicksort
    }

    fn sort(&mut self, values: &[f64]) -> SortRun {
        let mut array = items_from(values);
        let counters = quicksort(&mut array, Counters::default(), &mut |len: usize| len - 1);
        SortRun::new(self.strategy(), array, counters)
    }
}

/// Quicksort that pivots on a uniformly random element of each partition.
#[derive(Debug, Clone)]
pub struct RandomizedQuicksort<R> {
    rng: R,
}

impl<R: RandomSource> RandomizedQuicksort<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> SortTracer for RandomizedQuicksort<R> {
    fn strategy(&self) -> SortStrategy {
        SortStrategy::RandomizedQuicksort
    }

    fn sort(&mut self, values: &[f64]) -> SortRun {
        let mut array = items_from(values);
        let rng = &mut self.rng;
        let counters = quicksort(&mut array, Counters::default(), &mut |len| {
            rng.next_usize(len)
        });
        SortRun::new(self.strategy(), array, counters)
    }
}

/// Sorts `items` in place. `pick_pivot(len)` returns the pivot's index within
/// the current partition; it is swapped to the end before partitioning.
fn quicksort<F>(items: &mut [SortItem], counters: Counters, pick_pivot: &mut F) -> Counters
where
    F: FnMut(usize) -> usize,
{
    if items.len() < 2 {
        return counters;
    }
    let last = items.len() - 1;
    items.swap(pick_pivot(items.len()), last);
    let (split, counters) = partition(items, counters);
    let (left, right) = items.split_at_mut(split);
    let counters = quicksort(left, counters, pick_pivot);
    quicksort(&mut right[1..], counters, pick_pivot)
}

/// Lomuto partition around the last element. Returns the pivot's final index.
fn partition(items: &mut [SortItem], mut counters: Counters) -> (usize, Counters) {
    counters.steps += 1;
    let last = items.len() - 1;
    let pivot = items[last].value;
    let mut store = 0;
    for i in 0..last {
        counters.comparisons += 1;
        if items[i].value.total_cmp(&pivot).is_le() {
            items.swap(store, i);
            store += 1;
        }
    }
    items.swap(store, last);
    (store, counters)
}
