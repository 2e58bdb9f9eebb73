//! RGBA rendering of tiles, sprites and atlas pages

use gta_data::Decoded;

use crate::color::{ColorData, Rgba};
use crate::sprite::PAGE_WIDTH;
use crate::style::StyleFile;
use crate::tiles::{TILE_SIZE, TileKind};

/// An RGBA image, row-major, four bytes per pixel
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Surface({}x{})", self.width, self.height)
    }
}

impl Surface {
    /// Colour 8-bit pixels through one physical palette. Colours missing
    /// from the palette come out transparent black.
    pub fn from_indexed(
        width: usize,
        height: usize,
        pixels: &[u8],
        colors: &ColorData,
        palette: usize,
    ) -> Self {
        let lookup: Vec<Rgba> = colors.palette(palette).unwrap_or_else(|| vec![[0; 4]; 256]);
        let mut rgba = Vec::with_capacity(width * height * 4);
        for &index in pixels.iter().take(width * height) {
            rgba.extend_from_slice(&lookup[usize::from(index)]);
        }
        rgba.resize(width * height * 4, 0);
        Self {
            width: width as u32,
            height: height as u32,
            rgba,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(at..at + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl StyleFile {
    /// Draw a tile with its own palette; `remap` picks one of a lid's four
    pub fn render_tile(&self, kind: TileKind, index: usize, remap: usize) -> Option<Surface> {
        let tile = self.tile(kind, index)?;
        let palette = self.tile_palette(kind, index, remap)?;
        Some(Surface::from_indexed(
            TILE_SIZE,
            TILE_SIZE,
            tile.pixels(),
            self.colors(),
            palette,
        ))
    }

    /// Draw a sprite, optionally through a remap
    pub fn render_sprite(&self, index: usize, remap: Option<usize>) -> Option<Surface> {
        let sprite = self.sprite(index)?;
        let palette = self.sprite_palette(index, remap)?;
        Some(Surface::from_indexed(
            usize::from(sprite.width),
            usize::from(sprite.height),
            &sprite.pixels,
            self.colors(),
            palette,
        ))
    }

    /// Draw a sprite with one of its delta patches applied
    pub fn render_variant(
        &self,
        index: usize,
        delta: usize,
        remap: Option<usize>,
    ) -> Option<Decoded<Surface>> {
        let sprite = self.sprite(index)?;
        let palette = self.sprite_palette(index, remap)?;
        let variant = sprite.variant(delta)?;
        let surface = Surface::from_indexed(
            usize::from(sprite.width),
            usize::from(sprite.height),
            &variant.model,
            self.colors(),
            palette,
        );
        Some(Decoded::new(surface, variant.diagnostics))
    }

    /// Draw a whole 256×256 sprite page through one physical palette
    pub fn render_page(&self, page: usize, palette: usize) -> Option<Surface> {
        let pixels = self.sprite_pages().nth(page)?;
        Some(Surface::from_indexed(
            PAGE_WIDTH,
            PAGE_WIDTH,
            pixels,
            self.colors(),
            palette,
        ))
    }
}
