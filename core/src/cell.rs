use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, exactly one holds at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a shell is allowed to show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    Mine,
    Count(u8),
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Covered => '-',
            Self::Flagged => 'F',
            Self::Mine => '*',
            // counts never exceed 8
            Self::Count(count) => (b'0' + count) as char,
        }
    }
}
