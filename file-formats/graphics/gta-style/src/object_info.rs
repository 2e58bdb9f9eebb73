//! Static object metadata

use binrw::{BinRead, BinWrite};
use gta_data::io_ext::write_record;
use gta_data::{DiagnosticCode, Diagnostics, FixedRecord, SectionReader, WriteExt};

use crate::error::{Result, StyleError};

/// Highest status code the game knows
pub const MAX_STATUS: u8 = 9;

/// Animated object frames are timed in 1/60 s units
const TICKS_PER_SECOND: u32 = 60;

/// Bonus objects always cycle through this many sprites
pub const BONUS_FRAMES: u32 = 8;

/// How the game treats an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectStatus {
    Normal,
    Ignorable,
    Smashable,
    Invisible,
    Animation,
    Weapon,
    Bonus,
}

impl ObjectStatus {
    pub fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Self::Normal,
            1 => Self::Ignorable,
            2 => Self::Smashable,
            3 => Self::Invisible,
            5 => Self::Animation,
            6 => Self::Weapon,
            9 => Self::Bonus,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ignorable => "ignorable",
            Self::Smashable => "smashable",
            Self::Invisible => "invisible",
            Self::Animation => "animation",
            Self::Weapon => "weapon",
            Self::Bonus => "bonus",
        }
    }
}

/// One object info record: a 20-byte head followed by `num_into` u16s.
///
/// `num_into` is not stored; it is the length of `into` when written.
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct ObjectInfo {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Sprite number relative to the object sprite category
    pub spr_num: u16,
    pub weight: u16,
    pub aux: u16,
    pub status: u8,
    /// Object types this one turns into when hit
    #[brw(ignore)]
    pub into: Vec<u16>,
}

impl FixedRecord for ObjectInfo {
    /// Head without the trailing count byte
    const SIZE: usize = 19;
}

impl ObjectInfo {
    pub fn status_kind(&self) -> Option<ObjectStatus> {
        ObjectStatus::from_raw(self.status)
    }

    /// Number of consecutive sprites the object uses
    pub fn sprite_count(&self) -> u32 {
        match self.status_kind() {
            Some(ObjectStatus::Invisible) => 0,
            Some(ObjectStatus::Animation) => self.width,
            Some(ObjectStatus::Bonus) => BONUS_FRAMES,
            _ => 1,
        }
    }

    /// Sprite offset to show `ms` milliseconds into an animation.
    ///
    /// Animated objects keep their frame count in `width` and their frame
    /// period, in 1/60 s, in `height`. Bonus objects always have eight
    /// frames. Everything else has a single frame.
    pub fn frame_at(&self, ms: u64) -> u32 {
        let frames = match self.status_kind() {
            Some(ObjectStatus::Animation) => self.width,
            Some(ObjectStatus::Bonus) => BONUS_FRAMES,
            _ => return 0,
        };
        if frames == 0 {
            return 0;
        }
        let period = (u64::from(self.height) * 1000 / u64::from(TICKS_PER_SECOND)).max(1);
        ((ms / period) % u64::from(frames)) as u32
    }

    pub fn packed_len(&self) -> usize {
        Self::SIZE + 1 + self.into.len() * 2
    }

    fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        let mut info: Self = reader.read_record("object_info")?;
        let count = reader.read_u8("object_info")?;
        info.into = reader.read_u16_array("object_info", usize::from(count))?;
        Ok(info)
    }

    /// Read records until the section is exhausted
    pub fn read_all(
        reader: &mut SectionReader<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<Self>> {
        let mut objects = Vec::new();
        while !reader.is_empty() {
            let start = reader.offset();
            let info = Self::read(reader).map_err(|_| {
                StyleError::corrupt(
                    "object_info",
                    format!("object {} at offset {start} runs past the section end", objects.len()),
                )
            })?;
            if info.status > MAX_STATUS {
                diagnostics.push(
                    DiagnosticCode::UnknownObjectStatus,
                    format!("object_info[{}]", objects.len()),
                    format!("unknown status {}", info.status),
                );
            }
            objects.push(info);
        }
        Ok(objects)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let count = u8::try_from(self.into.len()).map_err(|_| StyleError::Encode {
            section: "object_info",
            message: format!("{} into entries do not fit a u8 count", self.into.len()),
        })?;
        write_record(out, "object_info", self)?;
        out.put_u8(count);
        out.put_u16_slice(&self.into);
        Ok(())
    }
}
