//! Which physical palette draws what.
//!
//! `.G24` styles address palettes through virtual slots laid out as
//! consecutive ranges of the palette index: tile slots (four per tile),
//! sprite CLUTs, vehicle and pedestrian remaps, then fonts. The range
//! sizes come from the header's sub-CLUT sizes, 1 KiB per palette.
//! `.GRY` styles pick remap tables directly.

use crate::color::{ColorData, PALETTE_BYTES};
use crate::header::StyleHeader;
use crate::style::StyleFile;
use crate::tiles::TileKind;
use crate::vehicle::VEHICLE_REMAPS;

/// Pedestrian remaps in a style
pub const PEDESTRIAN_REMAPS: usize = 64;

/// First pedestrian remap table of a `.GRY` style
const LEGACY_PEDESTRIAN_BASE: usize = 125;

/// Palette slots per tile in the palette index
const SLOTS_PER_TILE: usize = 4;

/// Sizes of the virtual slot ranges, in palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClutRanges {
    pub tile: usize,
    pub sprite: usize,
    pub vehicle: usize,
    pub font: usize,
}

impl StyleFile {
    /// Slot ranges of a `.G24` style
    pub fn clut_ranges(&self) -> Option<ClutRanges> {
        match self.header() {
            StyleHeader::Extended(h) => Some(ClutRanges {
                tile: h.tileclut_size as usize / PALETTE_BYTES,
                sprite: h.spriteclut_size as usize / PALETTE_BYTES,
                vehicle: h.newcarclut_size as usize / PALETTE_BYTES,
                font: h.fontclut_size as usize / PALETTE_BYTES,
            }),
            StyleHeader::Legacy(_) => None,
        }
    }

    fn physical(&self, slot: usize) -> Option<usize> {
        match self.colors() {
            ColorData::Paged(c) => c.slot(slot),
            ColorData::Legacy(_) => None,
        }
    }

    /// Palette for a tile. `remap` (0-3) only applies to lids.
    pub fn tile_palette(&self, kind: TileKind, index: usize, remap: usize) -> Option<usize> {
        self.tile(kind, index)?;
        if remap >= SLOTS_PER_TILE {
            return None;
        }
        let tiles = self.tiles();
        match self.colors() {
            ColorData::Paged(c) => {
                let slot = match kind {
                    TileKind::Lid => SLOTS_PER_TILE * tiles.global_index(kind, index) + remap,
                    _ => SLOTS_PER_TILE * tiles.global_index(kind, index),
                };
                c.slot(slot)
            }
            ColorData::Legacy(c) => match kind {
                TileKind::Lid => c.lid_remap(index, remap).map(usize::from),
                _ => Some(0),
            },
        }
    }

    /// Palette for a sprite, either its own or a remap.
    ///
    /// A `.G24` slot past the palette index falls back to palette 0.
    pub fn sprite_palette(&self, sprite: usize, remap: Option<usize>) -> Option<usize> {
        let sprite = self.sprite(sprite)?;
        let Some(ranges) = self.clut_ranges() else {
            return Some(remap.unwrap_or(0));
        };
        let slot = match remap {
            Some(remap) => ranges.tile + ranges.sprite + remap,
            None => ranges.tile + usize::from(sprite.clut),
        };
        Some(self.physical(slot).unwrap_or(0))
    }

    /// Remap number for remap `n` (0-11) of a vehicle model
    pub fn vehicle_remap(&self, vehicle: usize, n: usize) -> Option<usize> {
        (n < VEHICLE_REMAPS).then_some(vehicle * VEHICLE_REMAPS + n)
    }

    /// Remap number for pedestrian remap `n` (0-63). Pedestrian remaps
    /// are the last 64 of the vehicle range.
    pub fn pedestrian_remap(&self, n: usize) -> Option<usize> {
        if n >= PEDESTRIAN_REMAPS {
            return None;
        }
        let base = match self.clut_ranges() {
            Some(ranges) => ranges.vehicle.checked_sub(PEDESTRIAN_REMAPS)?,
            None => LEGACY_PEDESTRIAN_BASE,
        };
        Some(base + n)
    }

    /// Palette for font `font`. Only `.G24` styles carry font palettes.
    pub fn font_palette(&self, font: usize) -> Option<usize> {
        let ranges = self.clut_ranges()?;
        if font >= ranges.font {
            return None;
        }
        self.physical(ranges.tile + ranges.sprite + ranges.vehicle + font)
    }
}
