//! Object placements

use binrw::{BinRead, BinWrite};
use gta_data::FixedRecord;

/// Fixed-point units per tile for object coordinates
pub const UNITS_PER_TILE: f32 = 64.0;

/// Remap values at or above this select a vehicle model
pub const VEHICLE_REMAP_BASE: u8 = 128;

/// What a placement spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A static object; `object_type` indexes the style's object info
    Object { object_type: u8, remap: u8 },
    /// A parked vehicle of the given model
    Vehicle { model: u8 },
}

/// One 16-byte placement record.
///
/// Coordinates are in 1/64 tile; rotation, pitch and roll in 1/256 turn.
/// The two bytes after `roll` carry no known meaning and are written back
/// as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct ObjectPlacement {
    pub x: u16,
    pub y: u16,
    pub z: u16,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub object_type: u8,
    pub remap: u8,
    pub rotation: u16,
    pub pitch: u16,
    pub roll: u16,
    pub padding: [u8; 2],
}

impl FixedRecord for ObjectPlacement {
    const SIZE: usize = 16;
}

impl ObjectPlacement {
    pub fn kind(&self) -> ObjectKind {
        if self.remap >= VEHICLE_REMAP_BASE {
            ObjectKind::Vehicle {
                model: self.remap - VEHICLE_REMAP_BASE,
            }
        } else {
            ObjectKind::Object {
                object_type: self.object_type,
                remap: self.remap,
            }
        }
    }

    pub fn is_vehicle(&self) -> bool {
        matches!(self.kind(), ObjectKind::Vehicle { .. })
    }

    /// Position in tiles
    pub fn world_position(&self) -> (f32, f32, f32) {
        (
            f32::from(self.x) / UNITS_PER_TILE,
            f32::from(self.y) / UNITS_PER_TILE,
            f32::from(self.z) / UNITS_PER_TILE,
        )
    }

    /// Place at a tile position, rounding to the nearest unit
    pub fn set_world_position(&mut self, x: f32, y: f32, z: f32) {
        let to_units = |v: f32| (v * UNITS_PER_TILE).round().clamp(0.0, f32::from(u16::MAX)) as u16;
        self.x = to_units(x);
        self.y = to_units(y);
        self.z = to_units(z);
    }
}
