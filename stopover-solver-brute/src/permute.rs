//! Lazy permutation sequences over middle-waypoint indices.

/// Iterator over all permutations of `0..n`, in lexicographic order.
///
/// Lexicographic order is exactly the order produced by the classic
/// recursive generation that fixes each remaining element in the leading
/// position in turn, so the search's first-encountered tie-break is
/// deterministic for a fixed input list. The sequence is lazy and
/// restartable; nothing is materialised up front.
///
/// `n = 0` yields exactly one empty permutation, matching the degenerate
/// direct start-to-end trip.
///
/// # Examples
/// ```
/// use stopover_solver_brute::Permutations;
///
/// let orders: Vec<Vec<usize>> = Permutations::new(3).collect();
/// assert_eq!(orders.len(), 6);
/// assert_eq!(orders.first(), Some(&vec![0, 1, 2]));
/// assert_eq!(orders.last(), Some(&vec![2, 1, 0]));
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    indices: Vec<usize>,
    exhausted: bool,
}

impl Permutations {
    /// Permutations of `0..n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            exhausted: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();
        self.exhausted = !advance(&mut self.indices);
        Some(current)
    }
}

/// Step `seq` to its lexicographic successor in place.
///
/// Returns `false` when `seq` was already the final permutation.
fn advance(seq: &mut [usize]) -> bool {
    if seq.len() < 2 {
        return false;
    }
    let Some(pivot) = seq.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let Some(successor) = seq.iter().rposition(|&value| value > seq[pivot]) else {
        return false;
    };
    seq.swap(pivot, successor);
    seq[pivot + 1..].reverse();
    true
}
