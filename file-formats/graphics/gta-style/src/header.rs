//! The two style header layouts

use binrw::{BinRead, BinWrite};
use gta_data::{FixedRecord, SectionReader};

use crate::error::{Result, StyleError};

/// Version word of 8-bit palette styles (`.GRY`)
pub const GRY_VERSION: u32 = 290;

/// Version word of paged-CLUT styles (`.G24`)
pub const G24_VERSION: u32 = 336;

/// Which layout a style file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleVersion {
    /// 13-field header, flat palette with remap tables
    Legacy,
    /// 16-field header, paged CLUT with a palette index
    Extended,
}

impl StyleVersion {
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            GRY_VERSION => Ok(Self::Legacy),
            G24_VERSION => Ok(Self::Extended),
            other => Err(StyleError::UnsupportedVersion(other)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Legacy => GRY_VERSION,
            Self::Extended => G24_VERSION,
        }
    }

    pub fn header_size(self) -> usize {
        match self {
            Self::Legacy => LegacyHeader::SIZE,
            Self::Extended => ExtendedHeader::SIZE,
        }
    }

    /// Size of a sprite directory record before its delta descriptors
    pub fn sprite_record_size(self) -> usize {
        match self {
            Self::Legacy => 10,
            Self::Extended => 12,
        }
    }
}

/// Header of a `.GRY` style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct LegacyHeader {
    pub version: u32,
    pub side_size: u32,
    pub lid_size: u32,
    pub aux_size: u32,
    pub anim_size: u32,
    pub palette_size: u32,
    pub remap_size: u32,
    pub remap_index_size: u32,
    pub object_info_size: u32,
    pub car_size: u32,
    pub sprite_info_size: u32,
    pub sprite_graphics_size: u32,
    pub sprite_numbers_size: u32,
}

impl FixedRecord for LegacyHeader {
    const SIZE: usize = 13 * 4;
}

/// Header of a `.G24` style.
///
/// The five CLUT sizes describe consecutive ranges of the CLUT blob; the
/// blob itself is `clut_size` rounded up to whole 64 KiB pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct ExtendedHeader {
    pub version: u32,
    pub side_size: u32,
    pub lid_size: u32,
    pub aux_size: u32,
    pub anim_size: u32,
    pub clut_size: u32,
    pub tileclut_size: u32,
    pub spriteclut_size: u32,
    pub newcarclut_size: u32,
    pub fontclut_size: u32,
    pub palette_index_size: u32,
    pub object_info_size: u32,
    pub car_size: u32,
    pub sprite_info_size: u32,
    pub sprite_graphics_size: u32,
    pub sprite_numbers_size: u32,
}

impl FixedRecord for ExtendedHeader {
    const SIZE: usize = 16 * 4;
}

/// A style header of either layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleHeader {
    Legacy(LegacyHeader),
    Extended(ExtendedHeader),
}

macro_rules! shared_fields {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(&self) -> u32 {
                match self {
                    Self::Legacy(h) => h.$field,
                    Self::Extended(h) => h.$field,
                }
            }
        )*
    };
}

impl StyleHeader {
    /// Read whichever header the version word announces
    pub fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        let code = SectionReader::new(reader.rest()).read_u32_le("header")?;
        Ok(match StyleVersion::from_code(code)? {
            StyleVersion::Legacy => Self::Legacy(reader.read_record("header")?),
            StyleVersion::Extended => Self::Extended(reader.read_record("header")?),
        })
    }

    /// An empty header of the given layout
    pub fn empty(version: StyleVersion) -> Self {
        match version {
            StyleVersion::Legacy => Self::Legacy(LegacyHeader {
                version: GRY_VERSION,
                ..LegacyHeader::default()
            }),
            StyleVersion::Extended => Self::Extended(ExtendedHeader {
                version: G24_VERSION,
                ..ExtendedHeader::default()
            }),
        }
    }

    pub fn style_version(&self) -> StyleVersion {
        match self {
            Self::Legacy(_) => StyleVersion::Legacy,
            Self::Extended(_) => StyleVersion::Extended,
        }
    }

    shared_fields!(
        version,
        side_size,
        lid_size,
        aux_size,
        anim_size,
        object_info_size,
        car_size,
        sprite_info_size,
        sprite_graphics_size,
        sprite_numbers_size,
    );

    /// Sum of every section size, i.e. the file length minus the header
    /// and any trailing bytes. CLUT padding is not included.
    pub fn declared_len(&self) -> u64 {
        match self {
            Self::Legacy(h) => [
                h.side_size,
                h.lid_size,
                h.aux_size,
                h.anim_size,
                h.palette_size,
                h.remap_size,
                h.remap_index_size,
                h.object_info_size,
                h.car_size,
                h.sprite_info_size,
                h.sprite_graphics_size,
                h.sprite_numbers_size,
            ]
            .iter()
            .map(|&s| u64::from(s))
            .sum(),
            Self::Extended(h) => [
                h.side_size,
                h.lid_size,
                h.aux_size,
                h.anim_size,
                h.clut_size,
                h.palette_index_size,
                h.object_info_size,
                h.car_size,
                h.sprite_info_size,
                h.sprite_graphics_size,
                h.sprite_numbers_size,
            ]
            .iter()
            .map(|&s| u64::from(s))
            .sum(),
        }
    }
}
