//! Deterministic permutation enumeration.
//!
//! Permutations are produced in lexicographic order of the items' original
//! positions, so the first permutation is the input order itself. The
//! generator reuses one buffer; callers borrow each permutation in turn.

/// Number of permutations of `m` items, or `None` if it overflows `u64`.
pub fn permutation_count(m: usize) -> Option<u64> {
    (1..=m as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// In-place lexicographic successor. Returns `false` once `ranks` is the last
/// (descending) permutation.
fn next_permutation(ranks: &mut [usize]) -> bool {
    if ranks.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..ranks.len() - 1).rev().find(|&i| ranks[i] < ranks[i + 1]) else {
        return false;
    };
    // A larger element exists to the right of the pivot by construction.
    let successor = (pivot + 1..ranks.len())
        .rev()
        .find(|&j| ranks[j] > ranks[pivot])
        .unwrap_or(pivot + 1);
    ranks.swap(pivot, successor);
    ranks[pivot + 1..].reverse();
    true
}

/// Streaming permutation generator over a fixed item set.
pub struct Permutations<T> {
    items: Vec<T>,
    ranks: Vec<usize>,
    current: Vec<T>,
    started: bool,
    exhausted: bool,
}

impl<T: Copy> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let ranks = (0..items.len()).collect();
        let current = items.clone();
        Self {
            items,
            ranks,
            current,
            started: false,
            exhausted: false,
        }
    }

    /// Advance to the next permutation and borrow it.
    ///
    /// Yields exactly `m!` times; an empty item set yields the empty slice once.
    pub fn advance(&mut self) -> Option<&[T]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.current);
        }
        if !next_permutation(&mut self.ranks) {
            self.exhausted = true;
            return None;
        }
        for (slot, &rank) in self.current.iter_mut().zip(&self.ranks) {
            *slot = self.items[rank];
        }
        Some(&self.current)
    }
}
