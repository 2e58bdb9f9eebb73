//! Palettes, remap tables and paged CLUTs

use custom_debug::Debug;
use gta_data::debug::{byte_len_fmt, trimmed_collection_fmt};
use gta_data::{DiagnosticCode, Diagnostics, SectionReader, WriteExt};

use crate::error::{Result, StyleError};
use crate::header::{ExtendedHeader, LegacyHeader};

/// Red, green, blue, alpha
pub type Rgba = [u8; 4];

/// Colours in one palette
pub const PALETTE_COLORS: usize = 256;

/// Bytes in one CLUT page
pub const CLUT_PAGE_SIZE: usize = 65_536;

/// Palettes stored side by side in a CLUT page
pub const PALETTES_PER_PAGE: usize = 64;

/// Bytes one palette occupies in a CLUT section
pub const PALETTE_BYTES: usize = PALETTE_COLORS * 4;

/// Bytes of a remap index in the legacy layout
pub const REMAP_INDEX_SIZE: usize = 1024;

/// Round a CLUT size up to whole pages
pub fn clut_padded_len(size: usize) -> usize {
    size.div_ceil(CLUT_PAGE_SIZE) * CLUT_PAGE_SIZE
}

fn alpha(index: u8) -> u8 {
    if index == 0 { 0 } else { 255 }
}

/// `.GRY` colours: one 6-bit palette, remap tables into it, and four remap
/// choices per lid tile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyColors {
    /// 256 RGB triples, 0-63 per component
    #[debug(with = byte_len_fmt)]
    pub palette: Vec<u8>,
    #[debug(with = trimmed_collection_fmt)]
    pub remap_tables: Vec<Vec<u8>>,
    /// Bytes after the last whole remap table
    #[debug(with = byte_len_fmt)]
    pub remap_tail: Vec<u8>,
    /// Four remap table numbers per lid tile
    #[debug(with = byte_len_fmt)]
    pub remap_index: Vec<u8>,
}

impl LegacyColors {
    pub fn read(
        reader: &mut SectionReader<'_>,
        header: &LegacyHeader,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let palette = reader.take("palette", header.palette_size as usize)?.to_vec();

        let remap = reader.take("remap_tables", header.remap_size as usize)?;
        let tables = remap.chunks_exact(PALETTE_COLORS);
        let remap_tail = tables.remainder().to_vec();
        if !remap_tail.is_empty() {
            diagnostics.push(
                DiagnosticCode::RemapSizeMisaligned,
                "remap_tables",
                format!("remap_size {} is not a multiple of 256", header.remap_size),
            );
        }
        let remap_tables = tables.map(<[u8]>::to_vec).collect();

        let remap_index = reader
            .take("remap_index", header.remap_index_size as usize)?
            .to_vec();
        if remap_index.len() != REMAP_INDEX_SIZE {
            diagnostics.push(
                DiagnosticCode::RemapIndexSize,
                "remap_index",
                format!("remap_index_size {} != 1024", remap_index.len()),
            );
        }
        for (tile, entry) in remap_index.chunks_exact(4).enumerate() {
            if entry[0] != 0 {
                diagnostics.push(
                    DiagnosticCode::SuspiciousRemapIndex,
                    "remap_index",
                    format!("lid {tile} starts with remap {} instead of 0", entry[0]),
                );
            }
        }

        Ok(Self {
            palette,
            remap_tables,
            remap_tail,
            remap_index,
        })
    }

    pub fn remap_len(&self) -> usize {
        self.remap_tables.len() * PALETTE_COLORS + self.remap_tail.len()
    }

    /// Remap table chosen for a lid tile under one of its four remaps
    pub fn lid_remap(&self, lid: usize, remap: usize) -> Option<u8> {
        if remap >= 4 {
            return None;
        }
        self.remap_index.get(lid * 4 + remap).copied()
    }

    fn color(&self, table: usize, index: u8) -> Option<Rgba> {
        let entry = usize::from(*self.remap_tables.get(table)?.get(usize::from(index))?);
        let rgb = self.palette.get(entry * 3..entry * 3 + 3)?;
        Some([
            rgb[0].saturating_mul(4),
            rgb[1].saturating_mul(4),
            rgb[2].saturating_mul(4),
            alpha(index),
        ])
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.palette);
        for table in &self.remap_tables {
            out.extend_from_slice(table);
        }
        out.extend_from_slice(&self.remap_tail);
        out.extend_from_slice(&self.remap_index);
    }
}

/// `.G24` colours: CLUT pages and the index mapping palette slots to them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagedColors {
    /// Whole pages; each page holds 64 palettes interleaved colour by
    /// colour, every colour stored B, G, R, A
    #[debug(with = byte_len_fmt)]
    pub clut: Vec<u8>,
    /// Physical palette for each palette slot
    #[debug(with = trimmed_collection_fmt)]
    pub palette_index: Vec<u16>,
}

impl PagedColors {
    pub fn read(
        reader: &mut SectionReader<'_>,
        header: &ExtendedHeader,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let declared = header.clut_size as usize;
        let padded = clut_padded_len(declared);
        if padded != declared {
            diagnostics.push(
                DiagnosticCode::ClutSizeMismatch,
                "clut",
                format!("clut_size {declared} rounded up to {padded}"),
            );
        }
        let clut = reader.take("clut", padded)?.to_vec();

        let index_size = header.palette_index_size as usize;
        if index_size % 2 != 0 {
            return Err(StyleError::corrupt(
                "palette_index",
                format!("size {index_size} is not a whole number of u16 entries"),
            ));
        }
        let palette_index = reader.read_u16_array("palette_index", index_size / 2)?;
        Ok(Self {
            clut,
            palette_index,
        })
    }

    /// Number of physical palettes in the CLUT pages
    pub fn palette_count(&self) -> usize {
        self.clut.len() / PALETTE_BYTES
    }

    /// Physical palette behind a palette slot
    pub fn slot(&self, virtual_slot: usize) -> Option<usize> {
        self.palette_index.get(virtual_slot).map(|&p| usize::from(p))
    }

    fn color(&self, palette: usize, index: u8) -> Option<Rgba> {
        let page = palette / PALETTES_PER_PAGE;
        let sub = palette % PALETTES_PER_PAGE;
        let offset = page * CLUT_PAGE_SIZE + usize::from(index) * PALETTE_BYTES / 4 + sub * 4;
        let bgra = self.clut.get(offset..offset + 4)?;
        Some([bgra[2], bgra[1], bgra[0], alpha(index)])
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.clut);
        out.put_u16_slice(&self.palette_index);
    }
}

/// Colour section of either layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorData {
    Legacy(LegacyColors),
    Paged(PagedColors),
}

impl ColorData {
    /// Colour `index` of a physical palette: a remap table for `.GRY`, a
    /// CLUT palette for `.G24`. Index 0 is always fully transparent.
    pub fn color(&self, palette: usize, index: u8) -> Option<Rgba> {
        match self {
            Self::Legacy(c) => c.color(palette, index),
            Self::Paged(c) => c.color(palette, index),
        }
    }

    /// Number of physical palettes
    pub fn palette_count(&self) -> usize {
        match self {
            Self::Legacy(c) => c.remap_tables.len(),
            Self::Paged(c) => c.palette_count(),
        }
    }

    /// All 256 colours of a physical palette. Colours past the end of the
    /// data read as transparent black.
    pub fn palette(&self, palette: usize) -> Option<Vec<Rgba>> {
        if palette >= self.palette_count() {
            return None;
        }
        Some(
            (0..=u8::MAX)
                .map(|i| self.color(palette, i).unwrap_or_default())
                .collect(),
        )
    }
}
