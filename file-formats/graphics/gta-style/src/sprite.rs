//! Sprite directory entries and the pixels they point at

use custom_debug::Debug;
use gta_data::debug::byte_len_fmt;
use gta_data::{Decoded, DiagnosticCode, Diagnostics, SectionReader, WriteExt};

use crate::delta::apply_delta;
use crate::error::{Result, StyleError};
use crate::header::StyleVersion;

/// Sprite pixels are laid out on 256×256 pages
pub const PAGE_WIDTH: usize = 256;

/// Bytes in one sprite page
pub const PAGE_SIZE: usize = PAGE_WIDTH * PAGE_WIDTH;

/// Bytes per delta descriptor
pub const DELTA_DESCRIPTOR_SIZE: usize = 6;

/// Where a sprite sits in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    pub page: u32,
    pub x: u8,
    pub y: u8,
}

impl PagePosition {
    pub fn from_ptr(ptr: u32) -> Self {
        Self {
            page: ptr >> 16,
            x: (ptr & 0xFF) as u8,
            y: ((ptr >> 8) & 0xFF) as u8,
        }
    }

    pub fn to_ptr(self) -> u32 {
        (self.page << 16) | (u32::from(self.y) << 8) | u32::from(self.x)
    }
}

/// A variant patch, see [`crate::delta`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaPatch {
    /// Stored patch length
    pub size: u16,
    /// Atlas offset of the patch
    pub ptr: u32,
    /// Patch bytes copied out of the atlas
    #[debug(with = byte_len_fmt)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub data: Vec<u8>,
}

/// One sprite directory entry.
///
/// Only the directory is written back on encode; `pixels` and delta `data`
/// are copies taken from the atlas at decode time and edits to them are
/// not saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sprite {
    pub width: u8,
    pub height: u8,
    /// Unidentified byte kept as stored
    pub ws: u8,
    /// Stored pixel count; normally `width * height`
    pub size: u16,
    /// Sprite CLUT number (`.G24` only)
    pub clut: u16,
    /// Atlas offset of the top-left pixel
    pub ptr: u32,
    #[debug(with = byte_len_fmt)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub pixels: Vec<u8>,
    pub deltas: Vec<DeltaPatch>,
}

impl Sprite {
    pub fn position(&self) -> PagePosition {
        PagePosition::from_ptr(self.ptr)
    }

    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn packed_len(&self, version: StyleVersion) -> usize {
        version.sprite_record_size() + self.deltas.len() * DELTA_DESCRIPTOR_SIZE
    }

    /// Pixels of variant `delta`: the base sprite with that patch applied.
    /// Diagnostics describe runs that had to be clipped.
    pub fn variant(&self, delta: usize) -> Option<Decoded<Vec<u8>>> {
        let patch = self.deltas.get(delta)?;
        Some(apply_delta(
            &self.pixels,
            usize::from(self.width),
            &patch.data,
            &format!("deltas[{delta}]"),
        ))
    }

    /// Read one directory entry and copy its pixels out of `atlas`
    pub(crate) fn read(
        reader: &mut SectionReader<'_>,
        version: StyleVersion,
        atlas: &[u8],
        location: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let width = reader.read_u8("sprite_info")?;
        let height = reader.read_u8("sprite_info")?;
        let delta_count = reader.read_u8("sprite_info")?;
        let ws = reader.read_u8("sprite_info")?;
        let size = reader.read_u16_le("sprite_info")?;
        let clut = match version {
            StyleVersion::Legacy => 0,
            StyleVersion::Extended => reader.read_u16_le("sprite_info")?,
        };
        let ptr = reader.read_u32_le("sprite_info")?;

        let mut deltas = Vec::with_capacity(usize::from(delta_count));
        for _ in 0..delta_count {
            let size = reader.read_u16_le("sprite_info")?;
            let ptr = reader.read_u32_le("sprite_info")?;
            deltas.push(DeltaPatch {
                size,
                ptr,
                data: Vec::new(),
            });
        }

        let mut sprite = Self {
            width,
            height,
            ws,
            size,
            clut,
            ptr,
            pixels: Vec::new(),
            deltas,
        };
        if sprite.pixel_count() != usize::from(size) {
            diagnostics.push(
                DiagnosticCode::SpriteSizeMismatch,
                location,
                format!("{width}x{height} sprite stores size {size}"),
            );
        }
        sprite.pixels = sprite.copy_pixels(atlas, location, diagnostics);
        for (i, patch) in sprite.deltas.iter_mut().enumerate() {
            let start = patch.ptr as usize;
            let end = start + usize::from(patch.size);
            let clamp = |n: usize| n.min(atlas.len());
            patch.data = atlas[clamp(start)..clamp(end)].to_vec();
            if end > atlas.len() {
                diagnostics.push(
                    DiagnosticCode::SpriteOutOfAtlas,
                    format!("{location}.deltas[{i}]"),
                    format!("patch {start}..{end} passes the {}-byte atlas", atlas.len()),
                );
            }
        }
        Ok(sprite)
    }

    /// Base pixels, one 256-byte atlas line per sprite row. Rows outside
    /// the atlas read as zeros.
    fn copy_pixels(&self, atlas: &[u8], location: &str, diagnostics: &mut Diagnostics) -> Vec<u8> {
        let width = usize::from(self.width);
        let mut pixels = vec![0u8; self.pixel_count()];
        if width == 0 {
            return pixels;
        }
        for (line, row) in pixels.chunks_exact_mut(width).enumerate() {
            let start = self.ptr as usize + line * PAGE_WIDTH;
            match atlas.get(start..start + width) {
                Some(src) => row.copy_from_slice(src),
                None => diagnostics.push(
                    DiagnosticCode::SpriteOutOfAtlas,
                    location,
                    format!("row {line} at {start} passes the {}-byte atlas", atlas.len()),
                ),
            }
        }
        pixels
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>, version: StyleVersion) -> Result<()> {
        let delta_count = u8::try_from(self.deltas.len()).map_err(|_| StyleError::Encode {
            section: "sprite_info",
            message: format!("{} deltas do not fit a u8 count", self.deltas.len()),
        })?;
        out.extend_from_slice(&[self.width, self.height, delta_count, self.ws]);
        out.put_u16_le(self.size);
        if version == StyleVersion::Extended {
            out.put_u16_le(self.clut);
        }
        out.put_u32_le(self.ptr);
        for patch in &self.deltas {
            out.put_u16_le(patch.size);
            out.put_u32_le(patch.ptr);
        }
        Ok(())
    }
}

/// Read the whole sprite directory
pub(crate) fn read_sprites(
    reader: &mut SectionReader<'_>,
    version: StyleVersion,
    atlas: &[u8],
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Sprite>> {
    let mut sprites = Vec::new();
    while !reader.is_empty() {
        let start = reader.offset();
        let location = format!("sprites[{}]", sprites.len());
        let sprite = Sprite::read(reader, version, atlas, &location, diagnostics).map_err(|e| {
            match e {
                StyleError::TruncatedInput { .. } => StyleError::corrupt(
                    "sprite_info",
                    format!("{location} at offset {start} runs past the section end"),
                ),
                other => other,
            }
        })?;
        sprites.push(sprite);
    }
    Ok(sprites)
}
