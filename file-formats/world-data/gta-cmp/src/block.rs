//! Block records and their packed type-map bitfields.
//!
//! The 16-bit type map holds:
//!
//! | bits  | meaning                                 |
//! |-------|-----------------------------------------|
//! | 0-3   | traffic directions (up, down, left, right) |
//! | 4-6   | terrain class                           |
//! | 7     | flat                                    |
//! | 8-13  | slope type, see [`slope_deltas`]        |
//! | 14-15 | lid rotation in quarter turns           |
//!
//! The 8-bit extension holds the traffic light phase (bits 0-2), the lid
//! remap (3-4), vertical and horizontal flips (5, 6) and the railway flag (7).

use std::fmt;

use binrw::{BinRead, BinWrite};
use bitflags::bitflags;
use gta_data::{BitField, FixedRecord};

bitflags! {
    /// Traffic directions allowed out of a block. Junctions combine bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Directions: u8 {
        const UP = 0x01;
        const DOWN = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
    }
}

/// Terrain class of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    Air,
    Water,
    Road,
    Pavement,
    Field,
    Building,
    /// Classes 6 and 7 never appear in shipped maps
    Unknown(u8),
}

impl TerrainType {
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Air,
            1 => Self::Water,
            2 => Self::Road,
            3 => Self::Pavement,
            4 => Self::Field,
            5 => Self::Building,
            other => Self::Unknown(other),
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Self::Air => 0,
            Self::Water => 1,
            Self::Road => 2,
            Self::Pavement => 3,
            Self::Field => 4,
            Self::Building => 5,
            Self::Unknown(bits) => bits & 0x7,
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => f.write_str("air"),
            Self::Water => f.write_str("water"),
            Self::Road => f.write_str("road"),
            Self::Pavement => f.write_str("pavement"),
            Self::Field => f.write_str("field"),
            Self::Building => f.write_str("building"),
            Self::Unknown(bits) => write!(f, "unknown({bits})"),
        }
    }
}

/// One 8-byte entry of the block table.
///
/// Face values index the style's side and lid tile sets; 0 means no face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct Block {
    pub type_map: u16,
    pub type_map_ext: u8,
    pub left: u8,
    pub right: u8,
    pub top: u8,
    pub bottom: u8,
    pub lid: u8,
}

impl FixedRecord for Block {
    const SIZE: usize = 8;
}

impl Block {
    pub fn directions(&self) -> Directions {
        Directions::from_bits_truncate(self.type_map.bits(0, 4) as u8)
    }

    pub fn set_directions(&mut self, directions: Directions) {
        self.type_map = self
            .type_map
            .with_bits(0, 4, u16::from(directions.bits()));
    }

    pub fn terrain(&self) -> TerrainType {
        TerrainType::from_bits(self.type_map.bits(4, 3) as u8)
    }

    pub fn set_terrain(&mut self, terrain: TerrainType) {
        self.type_map = self.type_map.with_bits(4, 3, u16::from(terrain.to_bits()));
    }

    pub fn is_flat(&self) -> bool {
        self.type_map.bit(7)
    }

    pub fn set_flat(&mut self, flat: bool) {
        self.type_map = self.type_map.with_bit(7, flat);
    }

    /// Slope type, 0 for level ground
    pub fn slope(&self) -> u8 {
        self.type_map.bits(8, 6) as u8
    }

    pub fn set_slope(&mut self, slope: u8) {
        self.type_map = self.type_map.with_bits(8, 6, u16::from(slope));
    }

    /// Lid rotation in quarter turns (0-3)
    pub fn lid_rotation(&self) -> u8 {
        self.type_map.bits(14, 2) as u8
    }

    pub fn set_lid_rotation(&mut self, quarter_turns: u8) {
        self.type_map = self
            .type_map
            .with_bits(14, 2, u16::from(quarter_turns));
    }

    pub fn traffic_light(&self) -> u8 {
        self.type_map_ext.bits(0, 3)
    }

    pub fn set_traffic_light(&mut self, phase: u8) {
        self.type_map_ext = self.type_map_ext.with_bits(0, 3, phase);
    }

    /// Which of the lid's remap palettes to draw with (0-3)
    pub fn lid_remap(&self) -> u8 {
        self.type_map_ext.bits(3, 2)
    }

    pub fn set_lid_remap(&mut self, remap: u8) {
        self.type_map_ext = self.type_map_ext.with_bits(3, 2, remap);
    }

    pub fn flip_vertical(&self) -> bool {
        self.type_map_ext.bit(5)
    }

    pub fn set_flip_vertical(&mut self, on: bool) {
        self.type_map_ext = self.type_map_ext.with_bit(5, on);
    }

    pub fn flip_horizontal(&self) -> bool {
        self.type_map_ext.bit(6)
    }

    pub fn set_flip_horizontal(&mut self, on: bool) {
        self.type_map_ext = self.type_map_ext.with_bit(6, on);
    }

    pub fn is_railway(&self) -> bool {
        self.type_map_ext.bit(7)
    }

    pub fn set_railway(&mut self, on: bool) {
        self.type_map_ext = self.type_map_ext.with_bit(7, on);
    }

    /// Faces in left, right, top, bottom, lid order
    pub fn faces(&self) -> [u8; 5] {
        [self.left, self.right, self.top, self.bottom, self.lid]
    }

    /// Corner heights of this block's lid when its bottom sits at `z`.
    ///
    /// Returned in top-left, top-right, bottom-right, bottom-left order,
    /// the winding a quad renderer expects.
    pub fn lid_heights(&self, z: f32) -> [f32; 4] {
        slope_heights(z, self.slope())
    }
}

/// Corner height deltas of a slope type, in top-left, top-right,
/// bottom-left, bottom-right order, measured in blocks.
///
/// - 1-8: 26° slopes, two blocks per rise (north, south, west, east pairs)
/// - 9-40: 7° slopes, eight blocks per rise
/// - 41-44: 45° slopes (north, south, west, east)
///
/// Returns `None` for the unused codes 45-63.
pub fn slope_deltas(slope: u8) -> Option<[f32; 4]> {
    const STEP: f32 = 0.125;

    let deltas = match slope {
        0 => [0.0; 4],
        1 => [0.5, 0.5, 1.0, 1.0],
        2 => [0.0, 0.0, 0.5, 0.5],
        3 => [1.0, 1.0, 0.5, 0.5],
        4 => [0.5, 0.5, 0.0, 0.0],
        5 => [0.5, 1.0, 0.5, 1.0],
        6 => [0.0, 0.5, 0.0, 0.5],
        7 => [1.0, 0.5, 1.0, 0.5],
        8 => [0.5, 0.0, 0.5, 0.0],
        9..=40 => {
            let low = 1.0 - STEP * f32::from((slope - 9) % 8 + 1);
            let high = low + STEP;
            match (slope - 9) / 8 {
                0 => [low, low, high, high],
                1 => [high, high, low, low],
                2 => [low, high, low, high],
                _ => [high, low, high, low],
            }
        }
        41 => [0.0, 0.0, 1.0, 1.0],
        42 => [1.0, 1.0, 0.0, 0.0],
        43 => [0.0, 1.0, 0.0, 1.0],
        44 => [1.0, 0.0, 1.0, 0.0],
        _ => return None,
    };
    Some(deltas)
}

/// Lid corner heights for a block at level `z`, in top-left, top-right,
/// bottom-right, bottom-left order. Unknown slopes are treated as flat.
pub fn slope_heights(z: f32, slope: u8) -> [f32; 4] {
    let d = slope_deltas(slope).unwrap_or_default();
    [z + d[0], z + d[1], z + d[3], z + d[2]]
}
