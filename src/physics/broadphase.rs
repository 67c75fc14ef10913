//! Broadphase: candidate pair enumeration.

/// Brute-force pair enumeration over every `i < k` (O(n^2)), fine for the
/// handful of bodies on a pitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairs;

impl AllPairs {
    pub fn new() -> Self {
        Self
    }

    /// Index pairs `(i, k)` with `i < k` accepted by `filter`, in discovery
    /// order: by `i`, then by `k`.
    pub fn find_pairs<T>(
        &self,
        items: &[T],
        mut filter: impl FnMut(&T, &T) -> bool,
    ) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..items.len() {
            for k in (i + 1)..items.len() {
                if filter(&items[i], &items[k]) {
                    pairs.push((i, k));
                }
            }
        }
        pairs
    }
}
