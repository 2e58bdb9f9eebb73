//! Hand-assembled style files

/// Pixel at (1, 1) of every fixture tile, so de-interleaving is visible
pub const MARKER: usize = 65;

/// Raw sections of a style file, written exactly as given
pub struct RawStyle {
    pub version: u32,
    /// Side, lid and aux tile fills; padding tiles are added as zeros
    pub side: Vec<u8>,
    pub lid: Vec<u8>,
    pub aux: Vec<u8>,
    pub animations: Vec<u8>,
    /// `.GRY`: palette, remap tables, remap index.
    /// `.G24`: CLUT (already padded), palette index.
    pub colors: Vec<u8>,
    /// `.GRY`: palette, remap, remap index sizes.
    /// `.G24`: clut, tileclut, spriteclut, newcarclut, fontclut,
    /// palette index sizes.
    pub color_sizes: Vec<u32>,
    pub object_info: Vec<u8>,
    pub vehicles: Vec<u8>,
    pub sprite_info: Vec<u8>,
    pub sprite_graphics: Vec<u8>,
    pub sprite_numbers: Vec<u8>,
    pub trailing: Vec<u8>,
}

/// A tile filled with `fill`, marker pixel `fill + 100`
pub fn tile(fill: u8) -> Vec<u8> {
    let mut pixels = vec![fill; 64 * 64];
    pixels[MARKER] = fill.wrapping_add(100);
    pixels
}

/// Physical atlas: rows of four tiles, line by line
pub fn tile_atlas(tiles: &[Vec<u8>]) -> Vec<u8> {
    let mut tiles = tiles.to_vec();
    while tiles.len() % 4 != 0 {
        tiles.push(vec![0; 64 * 64]);
    }
    let mut out = Vec::new();
    for group in tiles.chunks(4) {
        for line in 0..64 {
            for tile in group {
                out.extend_from_slice(&tile[line * 64..(line + 1) * 64]);
            }
        }
    }
    out
}

pub fn object_info(width: u32, height: u32, spr_num: u16, status: u8, into: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    for v in [width, height, 0] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    for v in [spr_num, 0, 0] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.push(status);
    out.push(into.len() as u8);
    for v in into {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// A vehicle body with the interesting fields set, then its doors
pub fn vehicle(vtype: u8, spr_num: i16, max_speed: i16, doors: &[[i16; 4]]) -> Vec<u8> {
    let mut body = vec![0u8; 172];
    body[6..8].copy_from_slice(&spr_num.to_le_bytes());
    body[10..12].copy_from_slice(&max_speed.to_le_bytes());
    // remap8[1]
    body[95] = 33;
    body[106] = vtype;
    body.extend_from_slice(&(doors.len() as i16).to_le_bytes());
    for door in doors {
        for v in door {
            body.extend_from_slice(&v.to_le_bytes());
        }
    }
    body
}

/// One directory entry; `clut` is only written for `.G24`
pub fn sprite(w: u8, h: u8, clut: Option<u16>, ptr: u32, deltas: &[(u16, u32)]) -> Vec<u8> {
    let mut out = vec![w, h, deltas.len() as u8, 0];
    out.extend_from_slice(&(u16::from(w) * u16::from(h)).to_le_bytes());
    if let Some(clut) = clut {
        out.extend_from_slice(&clut.to_le_bytes());
    }
    out.extend_from_slice(&ptr.to_le_bytes());
    for (size, ptr) in deltas {
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&ptr.to_le_bytes());
    }
    out
}

/// Sprite counts with one car and one object sprite
pub fn sprite_numbers() -> Vec<u8> {
    let mut counts = [0u16; 21];
    counts[5] = 1;
    counts[6] = 1;
    counts.iter().flat_map(|c| c.to_le_bytes()).collect()
}

/// Sprite atlas: a 2×2 sprite at 0 (diagonal of colour 5), a 1×1 sprite at
/// 2, and a one-run delta at 512 that paints pixel 1 with colour 7.
fn sprite_graphics() -> (Vec<u8>, Vec<u8>) {
    let mut atlas = vec![0u8; 512];
    atlas[0] = 5;
    atlas[257] = 5;
    atlas[2] = 5;
    let delta = vec![1, 0, 1, 7];
    atlas.extend_from_slice(&delta);
    (atlas, delta)
}

impl RawStyle {
    /// A `.GRY` style: one side tile, one lid, two remap tables.
    ///
    /// Palette entry 5 is (1, 2, 3), entry 7 is (63, 0, 0). Table 0 is the
    /// identity, table 1 sends every colour to entry 7. The lid's remaps
    /// are tables 0, 1, 0, 0.
    pub fn legacy() -> Self {
        let mut palette = vec![0u8; 768];
        palette[15..18].copy_from_slice(&[1, 2, 3]);
        palette[21..24].copy_from_slice(&[63, 0, 0]);
        let mut colors = palette;
        colors.extend(0..=255u8);
        colors.extend(std::iter::repeat_n(7u8, 256));
        let mut remap_index = vec![0u8; 1024];
        remap_index[1] = 1;
        colors.extend_from_slice(&remap_index);

        let (sprite_graphics, delta) = sprite_graphics();
        let mut sprite_info = sprite(2, 2, None, 0, &[(delta.len() as u16, 512)]);
        sprite_info.extend(sprite(1, 1, None, 2, &[]));

        Self {
            version: 290,
            side: vec![1],
            lid: vec![2],
            aux: vec![],
            animations: vec![1, 0, 1, 2, 1, 0],
            colors,
            color_sizes: vec![768, 512, 1024],
            object_info: object_info(4, 6, 0, 5, &[3]),
            vehicles: vehicle(4, 0, 200, &[[3, -4, 1, 2]]),
            sprite_info,
            sprite_graphics,
            sprite_numbers: sprite_numbers(),
            trailing: vec![],
        }
    }

    /// A `.G24` style: one side tile, one lid, one sprite CLUT.
    ///
    /// Palette index: side tile slot 0 -> 2, lid slots 4..8 -> 3..7,
    /// sprite CLUT 0 (slot 8) -> 1. Physical palette 2 colour 1 is
    /// (10, 20, 30), palette 1 colour 5 is (1, 2, 3). `clut_size` is not a
    /// whole page.
    pub fn extended() -> Self {
        let mut clut = vec![0u8; 65_536];
        // colour i of palette p sits at i * 256 + p * 4, stored BGRA
        clut[256 + 2 * 4..256 + 2 * 4 + 4].copy_from_slice(&[30, 20, 10, 0]);
        clut[5 * 256 + 4..5 * 256 + 8].copy_from_slice(&[3, 2, 1, 0]);
        let index: [u16; 9] = [2, 0, 0, 0, 3, 4, 5, 6, 1];
        let mut colors = clut;
        colors.extend(index.iter().flat_map(|v| v.to_le_bytes()));

        let (sprite_graphics, delta) = sprite_graphics();
        let mut sprite_info = sprite(2, 2, Some(0), 0, &[(delta.len() as u16, 512)]);
        sprite_info.extend(sprite(1, 1, Some(0), 2, &[]));

        Self {
            version: 336,
            side: vec![1],
            lid: vec![2],
            aux: vec![],
            animations: vec![],
            colors,
            color_sizes: vec![9 * 1024, 8 * 1024, 1024, 0, 0, 18],
            object_info: object_info(4, 6, 0, 5, &[3]),
            vehicles: vehicle(4, 0, 200, &[[3, -4, 1, 2]]),
            sprite_info,
            sprite_graphics,
            sprite_numbers: sprite_numbers(),
            trailing: vec![0xBE, 0xEF],
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        let tiles: Vec<Vec<u8>> = self
            .side
            .iter()
            .chain(&self.lid)
            .chain(&self.aux)
            .map(|&fill| tile(fill))
            .collect();

        let mut sizes = vec![
            self.version,
            (self.side.len() * 4096) as u32,
            (self.lid.len() * 4096) as u32,
            (self.aux.len() * 4096) as u32,
            self.animations.len() as u32,
        ];
        sizes.extend_from_slice(&self.color_sizes);
        sizes.extend([
            self.object_info.len() as u32,
            self.vehicles.len() as u32,
            self.sprite_info.len() as u32,
            self.sprite_graphics.len() as u32,
            self.sprite_numbers.len() as u32,
        ]);

        let mut out: Vec<u8> = sizes.iter().flat_map(|v| v.to_le_bytes()).collect();
        out.extend(tile_atlas(&tiles));
        for part in [
            &self.animations,
            &self.colors,
            &self.object_info,
            &self.vehicles,
            &self.sprite_info,
            &self.sprite_graphics,
            &self.sprite_numbers,
            &self.trailing,
        ] {
            out.extend_from_slice(part);
        }
        out
    }
}
