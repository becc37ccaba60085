use alloc::string::String;
use alloc::vec::Vec;

use crate::table::Row;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    /// The state after a header click on `field`: flip the active column, or start ascending.
    pub fn next(current: Option<&SortState>, field: &str) -> SortState {
        let direction = match current {
            Some(s) if s.field == field => s.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        SortState {
            field: String::from(field),
            direction,
        }
    }
}

/// Computes the stable permutation that sorts `rows` by `sort` (`order[new] == old`).
pub fn sort_order<T: Row>(rows: &[T], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = rows[a]
            .field(&sort.field)
            .compare(&rows[b].field(&sort.field));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}
