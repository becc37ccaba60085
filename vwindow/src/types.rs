/// The scroll axis a window is laid out on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// How a programmatic scroll reaches its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollBehavior {
    Smooth,
    #[default]
    Instant,
}

/// A half-open index window `[start_index, end_index)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Returns `true` if every index of `other` is also in `self`.
    ///
    /// An empty `other` is covered by anything.
    pub fn covers(&self, other: WindowRange) -> bool {
        other.is_empty()
            || (other.start_index >= self.start_index && other.end_index <= self.end_index)
    }

    /// Position of `index` relative to `start_index`, if it is inside the window.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.contains(index).then(|| index - self.start_index)
    }

    pub fn as_range(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Placement of a single item along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub index: usize,
    pub start: u64,
    pub size: u32,
}

impl ItemPlacement {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}
