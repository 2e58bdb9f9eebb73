//! Column stacks

use gta_data::{SectionReader, WriteExt};

use crate::MAX_LEVELS;
use crate::error::{CmpError, Result};

/// A stack of blocks occupying one map cell.
///
/// `height` counts the empty levels above the stack, so a column with N
/// blocks stores `6 - N`. `blockd` lists block table indices from the bottom
/// of the visible stack upwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub height: u16,
    pub blockd: Vec<u16>,
}

impl Column {
    /// Build a column from its blocks, deriving `height`
    pub fn from_blocks(blockd: Vec<u16>) -> Self {
        Self {
            height: (MAX_LEVELS as u16).saturating_sub(blockd.len() as u16),
            blockd,
        }
    }

    /// The height the block list implies
    pub fn expected_height(&self) -> Option<u16> {
        MAX_LEVELS
            .checked_sub(self.blockd.len())
            .map(|levels| levels as u16)
    }

    /// Whether `height` agrees with the block list
    pub fn is_consistent(&self) -> bool {
        self.expected_height() == Some(self.height)
    }

    /// Bytes this column occupies once packed
    pub fn packed_len(&self) -> usize {
        2 + self.blockd.len() * 2
    }

    /// Parse the column starting at the reader's position.
    ///
    /// Columns carry no length prefix; the height word decides how many
    /// block indices follow, so parsing only ever moves forward.
    pub fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        let start = reader.offset();
        let height = reader.read_u16_le("columns")?;
        if usize::from(height) > MAX_LEVELS {
            return Err(CmpError::CorruptSection {
                section: "columns",
                message: format!("column at offset {start} has height {height}"),
            });
        }
        let count = MAX_LEVELS - usize::from(height);
        let blockd = reader.read_u16_array("columns", count)?;
        Ok(Self { height, blockd })
    }

    /// Parse a single column at `offset` of a packed column blob
    pub fn read_at(blob: &[u8], offset: usize) -> Result<Self> {
        let mut reader = SectionReader::new(blob);
        reader.take("columns", offset)?;
        Self::read(&mut reader)
    }

    /// Append the packed column, writing the height implied by `blockd`
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.put_u16_le(self.expected_height().unwrap_or(0));
        out.put_u16_slice(&self.blockd);
    }
}
