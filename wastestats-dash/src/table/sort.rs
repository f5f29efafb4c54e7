//! Sort state and row comparison

use std::cmp::Ordering;

use super::Column;
use super::ColumnKind;
use super::ResultRow;

/// Sort direction for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, not-available first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, not-available last).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The current sort of a table: which column is active, and which way.
///
/// The direction is meaningful only while a column is active. The initial
/// state has no active column; rows stay in load order until the user sorts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<String>,
    direction: Direction,
}

impl SortState {
    /// The active column key, if any.
    pub fn active_column(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The current direction (meaningful only with an active column).
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the given column is the active sort column.
    pub fn is_active(&self, key: &str) -> bool {
        self.active.as_deref() == Some(key)
    }

    /// Applies a header activation: same column flips direction, a new
    /// column becomes active ascending.
    pub(crate) fn toggle(&mut self, key: &str) {
        if self.is_active(key) {
            self.direction = self.direction.toggled();
        } else {
            self.active = Some(key.to_string());
            self.direction = Direction::Asc;
        }
    }

    /// Drops the active column, restoring load order.
    pub(crate) fn reset(&mut self) {
        self.active = None;
        self.direction = Direction::Asc;
    }
}

/// Compares two rows for the active column and direction.
///
/// The direction reverses the primary comparison only; the label tie-break
/// stays ascending, so tie order is identical either way.
pub(crate) fn compare_rows(
    a: &ResultRow,
    b: &ResultRow,
    column: &Column,
    direction: Direction,
) -> Ordering {
    let primary = match column.kind() {
        ColumnKind::Text => compare_labels(a.label(), b.label()),
        ColumnKind::Numeric(_) => compare_values(a.value(column.key()), b.value(column.key())),
    };
    let primary = match direction {
        Direction::Asc => primary,
        Direction::Desc => primary.reverse(),
    };
    primary.then_with(|| compare_labels(a.label(), b.label()))
}

/// Numeric comparison with the not-available sentinel below every value.
fn compare_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// Case-insensitive label comparison, code point order, with the raw label
/// as a final deterministic tie-break.
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
