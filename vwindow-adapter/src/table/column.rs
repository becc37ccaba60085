use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;

/// Renders the text of one cell.
pub type CellRenderer<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// A value resolved from a row by field name, used for sorting and default cell text.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Empty,
    Number(f64),
    Text(Cow<'a, str>),
}

impl FieldValue<'_> {
    /// Generic ordering used by column sort.
    ///
    /// Numbers compare numerically, text lexicographically. Across kinds, empty values sort
    /// first and numbers sort before text.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (Self::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (Self::Text(a), FieldValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
            (Self::Empty, FieldValue::Empty) => Ordering::Equal,
            (Self::Empty, _) => Ordering::Less,
            (_, FieldValue::Empty) => Ordering::Greater,
            (Self::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (Self::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl<'a, V: Into<FieldValue<'a>>> From<Option<V>> for FieldValue<'a> {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

/// A table row whose fields can be resolved by name.
pub trait Row {
    fn field(&self, field: &str) -> FieldValue<'_>;
}

/// Header description handed to the host surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCell {
    pub field: String,
    pub label: String,
    pub width: Option<u32>,
    pub sortable: bool,
}

pub struct Column<T> {
    pub field: String,
    pub label: String,
    pub width: Option<u32>,
    pub sortable: bool,
    /// Custom cell text; defaults to the field value.
    pub render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            width: None,
            sortable: false,
            render: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_render(mut self, f: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn header(&self) -> HeaderCell {
        HeaderCell {
            field: self.field.clone(),
            label: self.label.clone(),
            width: self.width,
            sortable: self.sortable,
        }
    }
}

impl<T: Row> Column<T> {
    pub fn cell_text(&self, row: &T, index: usize) -> String {
        match &self.render {
            Some(render) => render(row, index),
            None => row.field(&self.field).to_string(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            label: self.label.clone(),
            width: self.width,
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
