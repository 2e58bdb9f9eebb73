//! Vehicle metadata

use binrw::{BinRead, BinWrite};
use gta_data::io_ext::{write_record, write_records};
use gta_data::{FixedRecord, SectionReader, WriteExt};

use crate::error::{Result, StyleError};
use crate::sprite_numbers::SpriteCategory;

/// Remaps each vehicle owns
pub const VEHICLE_REMAPS: usize = 12;

/// A door: pivot, the object drawn for it and how far it opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct Door {
    pub rpx: i16,
    pub rpy: i16,
    pub object: i16,
    pub delta: i16,
}

impl FixedRecord for Door {
    const SIZE: usize = 8;
}

/// What kind of vehicle a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Bus,
    JuggernautFront,
    JuggernautBack,
    Motorcycle,
    Car,
    Train,
    Tram,
    Boat,
    Tank,
    Unknown(u8),
}

impl VehicleType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Bus,
            1 => Self::JuggernautFront,
            2 => Self::JuggernautBack,
            3 => Self::Motorcycle,
            4 => Self::Car,
            8 => Self::Train,
            9 => Self::Tram,
            13 => Self::Boat,
            14 => Self::Tank,
            other => Self::Unknown(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::JuggernautFront => "juggernaut front",
            Self::JuggernautBack => "juggernaut back",
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
            Self::Train => "train",
            Self::Tram => "tram",
            Self::Boat => "boat",
            Self::Tank => "tank",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Sprite category holding this vehicle's sprites
    pub fn sprite_category(self) -> SpriteCategory {
        match self {
            Self::Bus => SpriteCategory::Bus,
            Self::Motorcycle => SpriteCategory::Bike,
            Self::Train => SpriteCategory::Train,
            Self::Tram => SpriteCategory::Tram,
            Self::Boat => SpriteCategory::Boat,
            Self::Tank => SpriteCategory::Tank,
            _ => SpriteCategory::Car,
        }
    }
}

/// One vehicle record: a 174-byte body ending in a door count, then the
/// doors.
///
/// The door count is not stored; it is the length of `doors` when written.
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct VehicleInfo {
    pub width: i16,
    pub height: i16,
    pub depth: i16,
    /// Sprite number relative to the vehicle's sprite category
    pub spr_num: i16,
    pub weight: i16,
    pub max_speed: i16,
    pub min_speed: i16,
    pub acceleration: i16,
    pub braking: i16,
    pub grip: i16,
    pub handling: i16,
    /// Hue/lightness/saturation shifts for each remap
    pub remap24: [[i16; 3]; VEHICLE_REMAPS],
    /// Legacy remap table per remap
    pub remap8: [u8; VEHICLE_REMAPS],
    pub vtype: u8,
    pub model: u8,
    pub turning: u8,
    pub damageable: u8,
    pub value: [u16; 4],
    pub cx: i8,
    pub cy: i8,
    pub moment: i32,
    pub rbp_mass: i32,
    pub g1_thrust: i32,
    pub tyre_adhesion_x: i32,
    pub tyre_adhesion_y: i32,
    pub handbrake_friction: i32,
    pub footbrake_friction: i32,
    pub front_brake_bias: i32,
    pub turn_ratio: i16,
    pub drive_wheel_offset: i16,
    pub steering_wheel_offset: i16,
    pub back_end_slide_value: i32,
    pub handbrake_slide_value: i32,
    pub convertible: u8,
    pub engine: u8,
    pub radio: u8,
    pub horn: u8,
    pub sound_function: u8,
    pub fast_change_flag: u8,
    #[brw(ignore)]
    pub doors: Vec<Door>,
}

impl FixedRecord for VehicleInfo {
    /// Body up to, not including, the door count
    const SIZE: usize = 172;
}

impl VehicleInfo {
    pub fn vehicle_type(&self) -> VehicleType {
        VehicleType::from_raw(self.vtype)
    }

    pub fn packed_len(&self) -> usize {
        Self::SIZE + 2 + self.doors.len() * Door::SIZE
    }

    fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        let mut info: Self = reader.read_record("vehicles")?;
        let count = reader.read_i16_le("vehicles")?;
        let count = usize::try_from(count)
            .map_err(|_| StyleError::corrupt("vehicles", format!("negative door count {count}")))?;
        info.doors = reader
            .section("vehicles", count * Door::SIZE)?
            .read_records("vehicles")?;
        Ok(info)
    }

    /// Read records until the section is exhausted
    pub fn read_all(reader: &mut SectionReader<'_>) -> Result<Vec<Self>> {
        let mut vehicles = Vec::new();
        while !reader.is_empty() {
            let start = reader.offset();
            let info = Self::read(reader).map_err(|e| match e {
                StyleError::TruncatedInput { .. } => StyleError::corrupt(
                    "vehicles",
                    format!(
                        "vehicle {} at offset {start} runs past the section end",
                        vehicles.len()
                    ),
                ),
                other => other,
            })?;
            vehicles.push(info);
        }
        Ok(vehicles)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let count = i16::try_from(self.doors.len()).map_err(|_| StyleError::Encode {
            section: "vehicles",
            message: format!("{} doors do not fit an i16 count", self.doors.len()),
        })?;
        write_record(out, "vehicles", self)?;
        out.put_i16_le(count);
        write_records(out, "vehicles", &self.doors)?;
        Ok(())
    }
}
