use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-index values with `O(log n)` point updates.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    total: u64,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            tree: alloc::vec![0; n + 1],
            total: 0,
            max_bit: max_bit_for(n),
        }
    }

    pub(crate) fn from_values(values: impl ExactSizeIterator<Item = u64>) -> Self {
        let n = values.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for (i, v) in (1..=n).zip(values) {
            total = total.saturating_add(v);
            tree[i] = tree[i].saturating_add(v);
            let j = i + lsb(i);
            if j <= n {
                tree[j] = tree[j].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            max_bit: max_bit_for(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n {
            return;
        }
        if delta > 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else if delta < 0 {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let cur = self.tree[i] as i128;
            let next = cur + delta as i128;
            debug_assert!(
                next >= 0,
                "Fenwick underflow (idx={i}, cur={cur}, delta={delta})"
            );
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Returns the largest `k` such that the blended prefix of the first `k` slots is `<= target`.
    ///
    /// `self` holds the values of filled slots (0 elsewhere) and `filled` holds a 1 for every
    /// filled slot. Unfilled slots weigh `fill` each. Both trees must have the same length.
    pub(crate) fn lower_bound_blended(&self, filled: &Fenwick, fill: u64, mut target: u64) -> usize {
        let n = self.len();
        debug_assert_eq!(n, filled.len(), "blended trees must have the same length");
        if n == 0 {
            return 0;
        }

        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n {
                let unfilled = (lsb(next) as u64).saturating_sub(filled.tree[next]);
                let weight = self.tree[next].saturating_add(unfilled.saturating_mul(fill));
                if weight <= target {
                    target -= weight;
                    idx = next;
                }
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn max_bit_for(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_sums_follow_point_updates() {
        let mut f = Fenwick::from_values([3u64, 1, 4, 1, 5].into_iter());
        assert_eq!(f.total(), 14);
        assert_eq!(f.prefix_sum(0), 0);
        assert_eq!(f.prefix_sum(3), 8);

        f.add(2, -4);
        assert_eq!(f.prefix_sum(3), 4);
        assert_eq!(f.total(), 10);

        let mut g = Fenwick::new(4);
        g.add(3, 7);
        assert_eq!(g.prefix_sum(3), 0);
        assert_eq!(g.prefix_sum(4), 7);
    }

    #[test]
    fn blended_lower_bound_weighs_unfilled_slots() {
        // slots: [10, fill, 30, fill] with fill = 20 => prefix 0, 10, 30, 60, 80
        let values = Fenwick::from_values([10u64, 0, 30, 0].into_iter());
        let filled = Fenwick::from_values([1u64, 0, 1, 0].into_iter());
        assert_eq!(values.lower_bound_blended(&filled, 20, 0), 0);
        assert_eq!(values.lower_bound_blended(&filled, 9, 9), 0);
        assert_eq!(values.lower_bound_blended(&filled, 20, 10), 1);
        assert_eq!(values.lower_bound_blended(&filled, 20, 59), 2);
        assert_eq!(values.lower_bound_blended(&filled, 20, 60), 3);
        assert_eq!(values.lower_bound_blended(&filled, 20, 1_000), 4);
    }
}
