//! The fixed 28-byte CMP header

use binrw::{BinRead, BinWrite};
use gta_data::FixedRecord;

use crate::error::{CmpError, Result};
use crate::{GRID_CELLS, LOCATION_BLOCK_SIZE};

/// Version code found in the shipped maps
pub const CMP_VERSION: u32 = 331;

/// CMP file header.
///
/// The five size fields describe the variable sections that follow the
/// base grid. They are recomputed on every write, so values carried in a
/// decoded header are informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct CmpHeader {
    pub version: u32,
    /// Style file the map is drawn with
    pub style: u8,
    /// Sound sample bank
    pub sample: u8,
    pub reserved: u16,
    pub route_size: u32,
    pub object_pos_size: u32,
    pub column_size: u32,
    pub block_size: u32,
    pub nav_data_size: u32,
}

impl FixedRecord for CmpHeader {
    const SIZE: usize = 28;
}

impl Default for CmpHeader {
    fn default() -> Self {
        Self {
            version: CMP_VERSION,
            style: 1,
            sample: 1,
            reserved: 0,
            route_size: 0,
            object_pos_size: 0,
            column_size: 0,
            block_size: 0,
            nav_data_size: 0,
        }
    }
}

impl CmpHeader {
    /// Total file size implied by the header, excluding trailing bytes
    pub fn declared_len(&self) -> Result<usize> {
        let fixed = Self::SIZE + GRID_CELLS * 4 + LOCATION_BLOCK_SIZE;
        [
            self.column_size,
            self.block_size,
            self.object_pos_size,
            self.route_size,
            self.nav_data_size,
        ]
        .iter()
        .try_fold(fixed, |acc, &size| acc.checked_add(size as usize))
        .ok_or_else(|| CmpError::MalformedHeader("section sizes overflow".to_string()))
    }

    /// Check the size accounting before any section is read
    pub fn validate(&self) -> Result<()> {
        if self.column_size % 2 != 0 {
            return Err(CmpError::MalformedHeader(format!(
                "column_size {} is not a whole number of u16 words",
                self.column_size
            )));
        }
        self.declared_len()?;
        Ok(())
    }
}
