/// Sort direction applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }

    /// Header glyph for the direction that was just applied.
    /// Ascending shows a down arrow (smallest at the top), descending up.
    pub fn indicator(self) -> char {
        match self {
            Self::Ascending => '▼',
            Self::Descending => '▲',
        }
    }
}

/// Per-column sort direction memory.
///
/// Tracks which column was clicked last and which direction its next click
/// will apply. At most one column holds any state at a time; clicking a
/// header clears every other column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Active column and the direction its *next* click will apply.
    active: Option<(usize, SortDirection)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click on a header and return the direction to apply now.
    ///
    /// The stored direction for the column (Ascending when unset) is the
    /// one applied; the flipped direction is stored for the next click.
    /// Clicking a different column always starts over at Ascending.
    pub fn click(&mut self, column: usize) -> SortDirection {
        let applied = match self.active {
            Some((col, next)) if col == column => next,
            _ => SortDirection::Ascending,
        };
        self.active = Some((column, applied.flip()));
        log::debug!("[sort-state] column {column} applied {applied:?}, next {:?}", applied.flip());
        applied
    }

    /// The direction shown on the active column's indicator, i.e. the
    /// direction most recently applied. None for every other column.
    pub fn indicator(&self, column: usize) -> Option<SortDirection> {
        match self.active {
            Some((col, next)) if col == column => Some(next.flip()),
            _ => None,
        }
    }

    /// The active column, if any header has been clicked.
    pub fn active_column(&self) -> Option<usize> {
        self.active.map(|(col, _)| col)
    }

    /// Clear all sort state (e.g. when the table is rebuilt).
    pub fn reset(&mut self) {
        self.active = None;
    }
}
