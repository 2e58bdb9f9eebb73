//! The 256×256 base grid

use gta_data::debug::byte_len_fmt;

use crate::GRID_SIZE;
use crate::column::Column;

/// Sentinel written for empty cells when the original one is unusable
pub const EMPTY_SENTINEL: u32 = u32::MAX;

/// What a base grid entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridCell {
    /// Index into the column list
    Column(usize),
    /// An offset past the column blob, meaning no column. The raw value is
    /// kept so it can be written back unchanged.
    Empty(u32),
    /// An offset inside the column blob that does not start a column,
    /// held as a byte offset into the column containing it so it follows
    /// that column when earlier columns change size
    Unaligned { column: usize, offset: u32 },
}

impl GridCell {
    /// Classify a raw grid offset against the start offsets of the columns
    pub fn resolve(raw: u32, offsets: &[u32], blob_len: usize) -> Self {
        if raw as usize >= blob_len {
            return Self::Empty(raw);
        }
        match offsets.binary_search(&raw) {
            Ok(index) => Self::Column(index),
            Err(next) => {
                let column = next.saturating_sub(1);
                Self::Unaligned {
                    column,
                    offset: raw - offsets.get(column).copied().unwrap_or(0),
                }
            }
        }
    }

    /// The column a cell reads from, aligned or not
    pub fn containing_column(self) -> Option<usize> {
        match self {
            Self::Column(column) | Self::Unaligned { column, .. } => Some(column),
            Self::Empty(_) => None,
        }
    }

    pub fn column(self) -> Option<usize> {
        match self {
            Self::Column(index) => Some(index),
            _ => None,
        }
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::Empty(EMPTY_SENTINEL)
    }
}

/// Row-major index of `(x, y)`, or `None` outside the grid
pub fn cell_index(x: usize, y: usize) -> Option<usize> {
    (x < GRID_SIZE && y < GRID_SIZE).then_some(y * GRID_SIZE + x)
}

/// Byte offset of each column inside the packed column blob
pub fn column_offsets(columns: &[Column]) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(columns.len());
    let mut offset = 0u32;
    for column in columns {
        offsets.push(offset);
        offset += column.packed_len() as u32;
    }
    offsets
}

/// The column section as it would be written, with each column's start
#[derive(custom_debug::Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PackedColumns {
    #[debug(with = byte_len_fmt)]
    pub(crate) bytes: Vec<u8>,
    pub(crate) offsets: Vec<u32>,
}

impl PackedColumns {
    pub(crate) fn pack(columns: &[Column]) -> Self {
        let mut bytes = Vec::new();
        let mut offsets = Vec::with_capacity(columns.len());
        for column in columns {
            offsets.push(bytes.len() as u32);
            column.write(&mut bytes);
        }
        Self { bytes, offsets }
    }

    /// Parse the column a cell points at, following unaligned offsets
    /// into whatever bytes they land on
    pub(crate) fn read(&self, cell: GridCell) -> Option<Column> {
        let (column, offset) = match cell {
            GridCell::Column(column) => (column, 0),
            GridCell::Unaligned { column, offset } => (column, offset),
            GridCell::Empty(_) => return None,
        };
        let start = self.offsets.get(column)?;
        Column::read_at(&self.bytes, (start + offset) as usize).ok()
    }
}
