//! Hand-assembled CMP files

/// Raw sections of a CMP file, written exactly as given
pub struct RawMap {
    pub version: u32,
    pub style: u8,
    pub sample: u8,
    pub grid: Vec<u32>,
    pub columns: Vec<u8>,
    pub blocks: Vec<u8>,
    pub objects: Vec<u8>,
    pub routes: Vec<u8>,
    pub locations: [u8; 108],
    pub nav: Vec<u8>,
    pub trailing: Vec<u8>,
}

pub fn column(blocks: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(6 - blocks.len() as u16).to_le_bytes());
    for b in blocks {
        out.extend_from_slice(&b.to_le_bytes());
    }
    out
}

pub fn block(type_map: u16, type_map_ext: u8, faces: [u8; 5]) -> Vec<u8> {
    let mut out = type_map.to_le_bytes().to_vec();
    out.push(type_map_ext);
    out.extend_from_slice(&faces);
    out
}

#[allow(clippy::too_many_arguments)]
pub fn object(x: u16, y: u16, z: u16, kind: u8, remap: u8, rotation: u16, pitch: u16, roll: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for v in [x, y, z] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.push(kind);
    out.push(remap);
    for v in [rotation, pitch, roll] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.extend_from_slice(&[0, 0]);
    out
}

pub fn nav_zone(x: u8, y: u8, w: u8, h: u8, sam: u8, name: &str) -> Vec<u8> {
    let mut out = vec![x, y, w, h, sam];
    let mut field = [0u8; 30];
    field[..name.len()].copy_from_slice(name.as_bytes());
    out.extend_from_slice(&field);
    out
}

impl RawMap {
    /// A small city: two columns, three blocks, two objects (one a
    /// vehicle), one route, a police station and two nested zones.
    ///
    /// Cell (3, 2) shows column 0; cells (4, 2) and (5, 2) show column 1.
    /// Every other cell holds the sentinel `column_size`.
    pub fn sample() -> Self {
        let mut columns = column(&[0, 1]);
        columns.extend(column(&[2]));
        let sentinel = columns.len() as u32;

        let mut grid = vec![sentinel; 65_536];
        grid[2 * 256 + 3] = 0;
        grid[2 * 256 + 4] = 6;
        grid[2 * 256 + 5] = 6;

        let mut blocks = block(0x0080 | (2 << 4) | 0x01, 0, [0, 0, 0, 0, 5]);
        blocks.extend(block(41 << 8, 0x80, [1, 2, 3, 4, 6]));
        blocks.extend(block(5 << 4, 0x03, [7, 7, 7, 7, 0]));

        let mut objects = object(640, 1280, 64, 3, 0, 0, 0, 0);
        objects.extend(object(100, 200, 0, 7, 150, 64, 0, 0));

        let routes = vec![2, 1, 10, 20, 1, 11, 20, 1];

        let mut locations = [0u8; 108];
        locations[..3].copy_from_slice(&[5, 6, 1]);

        let mut nav = nav_zone(10, 20, 5, 5, 3, "Downtown");
        nav.extend(nav_zone(0, 0, 200, 200, 0, "City"));

        Self {
            version: 331,
            style: 1,
            sample: 2,
            grid,
            columns,
            blocks,
            objects,
            routes,
            locations,
            nav,
            trailing: vec![0xDE, 0xAD],
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(self.style);
        out.push(self.sample);
        out.extend_from_slice(&0u16.to_le_bytes());
        for size in [
            self.routes.len(),
            self.objects.len(),
            self.columns.len(),
            self.blocks.len(),
            self.nav.len(),
        ] {
            out.extend_from_slice(&(size as u32).to_le_bytes());
        }
        for offset in &self.grid {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&self.columns);
        out.extend_from_slice(&self.blocks);
        out.extend_from_slice(&self.objects);
        out.extend_from_slice(&self.routes);
        out.extend_from_slice(&self.locations);
        out.extend_from_slice(&self.nav);
        out.extend_from_slice(&self.trailing);
        out
    }
}
