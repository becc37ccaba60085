use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/// Modifier keys held during a row click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    /// Ctrl (or Cmd): toggle the clicked row.
    pub toggle: bool,
    /// Shift: select the range from the last selected row.
    pub range: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        toggle: false,
        range: false,
    };
    pub const TOGGLE: Self = Self {
        toggle: true,
        range: false,
    };
    pub const RANGE: Self = Self {
        toggle: false,
        range: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    NoneSelected,
    SingleSelected,
    MultiSelected,
}

/// Index-based row selection with a range anchor.
///
/// Indices are positions in the current collection. When the collection is permuted the owner
/// calls [`Self::remap`], so the selection keeps pointing at the same rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<usize>,
    last: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match self.selected.len() {
            0 => SelectionState::NoneSelected,
            1 => SelectionState::SingleSelected,
            _ => SelectionState::MultiSelected,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn last_selected(&self) -> Option<usize> {
        self.last
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.indices().collect()
    }

    /// Applies a click on row `index`. Returns `true` if the selection changed.
    ///
    /// A range click without a previous anchor behaves like a plain click. A range click
    /// replaces the selection and keeps the anchor where it was.
    pub fn click(&mut self, index: usize, modifiers: Modifiers) -> bool {
        match (modifiers.range, self.last) {
            (true, Some(anchor)) => self.select_range(anchor, index),
            _ if modifiers.toggle => self.toggle(index),
            _ => self.select_only(index),
        }
    }

    pub fn select_only(&mut self, index: usize) -> bool {
        self.last = Some(index);
        if self.selected.len() == 1 && self.selected.contains(&index) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(index);
        true
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        self.last = Some(index);
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        true
    }

    /// Replaces the selection with every index in `[min(a, b), max(a, b)]`.
    pub fn select_range(&mut self, a: usize, b: usize) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let next: BTreeSet<usize> = (lo..=hi).collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Clears everything, anchor included. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        self.last = None;
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Follows a permutation of the collection (`order[new_index] == old_index`).
    pub fn remap(&mut self, order: &[usize]) {
        let mut new_of_old = alloc::vec![usize::MAX; order.len()];
        for (new, &old) in order.iter().enumerate() {
            if let Some(slot) = new_of_old.get_mut(old) {
                *slot = new;
            }
        }
        let map = |old: usize| new_of_old.get(old).copied().filter(|&i| i != usize::MAX);
        self.selected = self.selected.iter().filter_map(|&old| map(old)).collect();
        self.last = self.last.and_then(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec;

    #[test]
    fn plain_toggle_and_range_clicks_follow_the_state_machine() {
        let mut s = Selection::new();
        assert_eq!(s.state(), SelectionState::NoneSelected);

        s.click(4, Modifiers::NONE);
        assert_eq!(s.state(), SelectionState::SingleSelected);
        assert_eq!(s.to_vec(), vec![4]);

        s.click(7, Modifiers::TOGGLE);
        assert_eq!(s.state(), SelectionState::MultiSelected);
        s.click(4, Modifiers::TOGGLE);
        assert_eq!(s.state(), SelectionState::SingleSelected);
        s.click(7, Modifiers::TOGGLE);
        assert_eq!(s.state(), SelectionState::NoneSelected);

        s.click(2, Modifiers::NONE);
        s.click(5, Modifiers::RANGE);
        assert_eq!(s.to_vec(), vec![2, 3, 4, 5]);
        // The anchor stays on 2.
        s.click(0, Modifiers::RANGE);
        assert_eq!(s.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn range_click_is_order_independent() {
        let mut a = Selection::new();
        a.click(2, Modifiers::NONE);
        a.click(5, Modifiers::RANGE);

        let mut b = Selection::new();
        b.click(5, Modifiers::NONE);
        b.click(2, Modifiers::RANGE);

        assert_eq!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn range_click_without_anchor_selects_one() {
        let mut s = Selection::new();
        s.click(3, Modifiers::RANGE);
        assert_eq!(s.to_vec(), vec![3]);
        assert_eq!(s.last_selected(), Some(3));
    }

    #[test]
    fn remap_follows_permutation() {
        let mut s = Selection::new();
        s.click(0, Modifiers::NONE);
        s.click(2, Modifiers::TOGGLE);
        // reversed collection: new 0 = old 3, ..., new 3 = old 0
        s.remap(&[3, 2, 1, 0]);
        assert_eq!(s.to_vec(), vec![1, 3]);
        assert_eq!(s.last_selected(), Some(1));
    }
}
