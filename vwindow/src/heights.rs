use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// Per-item extents along the scroll axis.
///
/// In fixed mode every item is `item_height` tall and all queries are `O(1)`.
///
/// In dynamic mode items start unmeasured and are estimated with the running average of all
/// measured heights (seeded by `item_height` until the first measurement). Measured heights are
/// kept in a pair of Fenwick trees (heights and measured-count), so offset/index lookups stay
/// `O(log n)` and a change of the average never requires a rebuild.
#[derive(Clone, Debug)]
pub struct HeightModel {
    item_height: u32,
    dynamic: bool,
    count: usize,

    measured: Vec<Option<u32>>,
    sums: Fenwick,
    filled: Fenwick,
    measured_total: u64,
    measured_count: usize,
}

impl HeightModel {
    pub fn fixed(item_height: u32, count: usize) -> Self {
        Self::build(item_height, false, count)
    }

    pub fn dynamic(item_height: u32, count: usize) -> Self {
        Self::build(item_height, true, count)
    }

    fn build(item_height: u32, dynamic: bool, count: usize) -> Self {
        let slots = if dynamic { count } else { 0 };
        Self {
            item_height,
            dynamic,
            count,
            measured: alloc::vec![None; slots],
            sums: Fenwick::new(slots),
            filled: Fenwick::new(slots),
            measured_total: 0,
            measured_count: 0,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    /// Drops every height entry and resizes the model to `count` unmeasured items.
    pub fn reset(&mut self, count: usize) {
        vdebug!(count, dynamic = self.dynamic, "HeightModel::reset");
        *self = Self::build(self.item_height, self.dynamic, count);
    }

    /// The estimate used for unmeasured items.
    pub fn average_height(&self) -> u32 {
        if !self.dynamic || self.measured_count == 0 {
            return self.item_height;
        }
        let n = self.measured_count as u64;
        let avg = (self.measured_total + n / 2) / n;
        avg.min(u32::MAX as u64) as u32
    }

    pub fn total_height(&self) -> u64 {
        if !self.dynamic {
            return self.count as u64 * self.item_height as u64;
        }
        let unmeasured = (self.count - self.measured_count) as u64;
        self.measured_total
            .saturating_add(unmeasured.saturating_mul(self.average_height() as u64))
    }

    pub fn height_of(&self, index: usize) -> Option<u32> {
        if index >= self.count {
            return None;
        }
        if !self.dynamic {
            return Some(self.item_height);
        }
        Some(self.measured[index].unwrap_or_else(|| self.average_height()))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).is_some_and(Option::is_some)
    }

    pub fn measured_count(&self) -> usize {
        self.measured_count
    }

    /// Records the measured height of an item.
    ///
    /// Returns `true` if the model changed. Fixed-mode models, out-of-range indexes and
    /// non-positive heights (an item that has not been laid out yet) are ignored, so a zero never
    /// drags the running average down.
    pub fn record_height(&mut self, index: usize, px: u32) -> bool {
        if !self.dynamic || index >= self.count {
            return false;
        }
        if px == 0 {
            vwarn!(index, "record_height: ignoring zero height");
            return false;
        }

        match self.measured[index] {
            Some(prev) if prev == px => false,
            Some(prev) => {
                self.measured[index] = Some(px);
                let delta = px as i64 - prev as i64;
                self.sums.add(index, delta);
                self.measured_total = (self.measured_total as i64 + delta) as u64;
                true
            }
            None => {
                self.measured[index] = Some(px);
                self.sums.add(index, px as i64);
                self.filled.add(index, 1);
                self.measured_total = self.measured_total.saturating_add(px as u64);
                self.measured_count += 1;
                true
            }
        }
    }

    /// Start offset of `index` (the summed extent of every item before it).
    ///
    /// `index == count` yields the total height.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.count);
        if !self.dynamic {
            return index as u64 * self.item_height as u64;
        }
        let measured = self.filled.prefix_sum(index);
        let unmeasured = index as u64 - measured;
        self.sums
            .prefix_sum(index)
            .saturating_add(unmeasured.saturating_mul(self.average_height() as u64))
    }

    /// Index of the item covering `offset`, clamped to the last item. `None` when empty.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        Some(self.items_before(offset).min(self.count - 1))
    }

    /// Number of items that end at or before `offset`.
    pub fn items_before(&self, offset: u64) -> usize {
        if !self.dynamic {
            let consumed = offset / self.item_height.max(1) as u64;
            return consumed.min(self.count as u64) as usize;
        }
        self.sums
            .lower_bound_blended(&self.filled, self.average_height() as u64, offset)
    }

    /// First index whose start offset is at or beyond `offset` (`count` if none).
    pub fn first_starting_at_or_after(&self, offset: u64) -> usize {
        let k = self.items_before(offset);
        if k >= self.count || self.offset_of(k) >= offset {
            k
        } else {
            k + 1
        }
    }

    /// Reorders height entries after the collection was permuted.
    ///
    /// `order[new_index] == old_index`. Entries travel with their items.
    pub fn permute(&mut self, order: &[usize]) {
        if !self.dynamic || order.len() != self.count {
            return;
        }
        let measured: Vec<Option<u32>> = order
            .iter()
            .map(|&old| self.measured.get(old).copied().flatten())
            .collect();
        self.sums = Fenwick::from_values(measured.iter().map(|m| m.unwrap_or(0) as u64));
        self.filled = Fenwick::from_values(measured.iter().map(|m| m.is_some() as u64));
        self.measured = measured;
        debug_assert_eq!(self.sums.total(), self.measured_total);
    }
}
