//! The 64×64 tile atlas.
//!
//! Tiles are stored four to a row: each 256-byte scan line of a row holds
//! line `l` of four consecutive tiles, 64 bytes each. Rows are padded with
//! blank tiles so every row is full.

use std::fmt;

use crate::error::{Result, StyleError};

/// Tile edge in pixels
pub const TILE_SIZE: usize = 64;

/// Bytes per tile
pub const TILE_BYTES: usize = TILE_SIZE * TILE_SIZE;

/// Tiles stored side by side in one physical row
pub const TILES_PER_ROW: usize = 4;

const ROW_BYTES: usize = TILE_BYTES * TILES_PER_ROW;

/// One 8-bit indexed tile
#[derive(Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: Vec<u8>,
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.pixels.iter().filter(|&&p| p != 0).count();
        write!(f, "Tile({used} opaque)")
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::blank()
    }
}

impl Tile {
    pub fn new(pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != TILE_BYTES {
            return Err(StyleError::InvalidTileSize(pixels.len()));
        }
        Ok(Self { pixels })
    }

    /// A tile of colour index 0
    pub fn blank() -> Self {
        Self {
            pixels: vec![0; TILE_BYTES],
        }
    }

    /// Row-major colour indices
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        Some(self.pixels[y * TILE_SIZE + x])
    }
}

/// Blank tiles needed to fill the last row
pub fn padding_for(count: usize) -> usize {
    (TILES_PER_ROW - count % TILES_PER_ROW) % TILES_PER_ROW
}

/// Split a physical tile blob into logical tiles.
///
/// The blob must hold whole rows of four tiles.
pub fn deinterleave(data: &[u8]) -> Result<Vec<Tile>> {
    if data.len() % ROW_BYTES != 0 {
        return Err(StyleError::corrupt(
            "tiles",
            format!("{} bytes is not a whole number of tile rows", data.len()),
        ));
    }
    let mut tiles = Vec::with_capacity(data.len() / TILE_BYTES);
    for row in data.chunks_exact(ROW_BYTES) {
        let mut group: [Vec<u8>; TILES_PER_ROW] =
            std::array::from_fn(|_| Vec::with_capacity(TILE_BYTES));
        for line in row.chunks_exact(TILE_SIZE * TILES_PER_ROW) {
            for (tile, slice) in group.iter_mut().zip(line.chunks_exact(TILE_SIZE)) {
                tile.extend_from_slice(slice);
            }
        }
        tiles.extend(group.into_iter().map(|pixels| Tile { pixels }));
    }
    Ok(tiles)
}

/// Pack logical tiles into rows of four, the inverse of [`deinterleave`]
pub fn interleave(tiles: &[Tile]) -> Result<Vec<u8>> {
    if tiles.len() % TILES_PER_ROW != 0 {
        return Err(StyleError::InvalidTileCount(tiles.len()));
    }
    let mut data = Vec::with_capacity(tiles.len() * TILE_BYTES);
    for group in tiles.chunks_exact(TILES_PER_ROW) {
        for line in 0..TILE_SIZE {
            for tile in group {
                data.extend_from_slice(&tile.pixels[line * TILE_SIZE..(line + 1) * TILE_SIZE]);
            }
        }
    }
    Ok(data)
}

/// The three tile sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Walls: left, right, top and bottom faces
    Side,
    /// Roofs and ground
    Lid,
    /// Animation frames and other substitutes
    Aux,
}

impl TileKind {
    pub const ALL: [Self; 3] = [Self::Side, Self::Lid, Self::Aux];

    pub fn name(self) -> &'static str {
        match self {
            Self::Side => "side",
            Self::Lid => "lid",
            Self::Aux => "aux",
        }
    }
}

/// Side, lid and aux tiles plus the padding that completes the last row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileAtlas {
    pub side: Vec<Tile>,
    pub lid: Vec<Tile>,
    pub aux: Vec<Tile>,
    /// Blank (or not so blank) tiles after the aux set. Kept so unmodified
    /// atlases pack back byte for byte.
    pub padding: Vec<Tile>,
    /// Bytes the side, lid and aux header sizes declare past their last
    /// whole tile. Added back to the sizes on write.
    pub size_remainder: [u32; 3],
}

impl TileAtlas {
    /// Split deinterleaved tiles into their sets. Tiles past the three
    /// counts become padding.
    pub fn from_tiles(mut tiles: Vec<Tile>, side: usize, lid: usize, aux: usize) -> Result<Self> {
        let wanted = side + lid + aux;
        if tiles.len() < wanted {
            return Err(StyleError::corrupt(
                "tiles",
                format!("{} tiles present, header declares {wanted}", tiles.len()),
            ));
        }
        let padding = tiles.split_off(wanted);
        let aux_tiles = tiles.split_off(side + lid);
        let lid_tiles = tiles.split_off(side);
        Ok(Self {
            side: tiles,
            lid: lid_tiles,
            aux: aux_tiles,
            padding,
            size_remainder: [0; 3],
        })
    }

    pub fn set(&self, kind: TileKind) -> &[Tile] {
        match kind {
            TileKind::Side => &self.side,
            TileKind::Lid => &self.lid,
            TileKind::Aux => &self.aux,
        }
    }

    pub fn set_mut(&mut self, kind: TileKind) -> &mut Vec<Tile> {
        match kind {
            TileKind::Side => &mut self.side,
            TileKind::Lid => &mut self.lid,
            TileKind::Aux => &mut self.aux,
        }
    }

    pub fn tile(&self, kind: TileKind, index: usize) -> Option<&Tile> {
        self.set(kind).get(index)
    }

    /// Position of a tile across all three sets, side first
    pub fn global_index(&self, kind: TileKind, index: usize) -> usize {
        match kind {
            TileKind::Side => index,
            TileKind::Lid => self.side.len() + index,
            TileKind::Aux => self.side.len() + self.lid.len() + index,
        }
    }

    /// Size of a set as written to the header
    pub fn declared_size(&self, kind: TileKind) -> usize {
        let remainder = match kind {
            TileKind::Side => self.size_remainder[0],
            TileKind::Lid => self.size_remainder[1],
            TileKind::Aux => self.size_remainder[2],
        };
        self.set(kind).len() * TILE_BYTES + remainder as usize
    }

    /// Tiles in the three sets, without padding
    pub fn count(&self) -> usize {
        self.side.len() + self.lid.len() + self.aux.len()
    }

    /// Trim or extend the padding to exactly fill the last row. Existing
    /// padding tiles are kept where possible.
    pub fn normalize_padding(&mut self) {
        self.padding.resize_with(padding_for(self.count()), Tile::blank);
    }

    /// The physical atlas. Padding must already complete the last row.
    pub fn pack(&self) -> Result<Vec<u8>> {
        let tiles: Vec<Tile> = self
            .side
            .iter()
            .chain(&self.lid)
            .chain(&self.aux)
            .chain(&self.padding)
            .cloned()
            .collect();
        interleave(&tiles)
    }
}
