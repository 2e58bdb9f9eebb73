//! Navigation zones

use binrw::{BinRead, BinWrite};
use gta_data::FixedRecord;

/// Bytes reserved for a zone name
pub const NAV_NAME_LEN: usize = 30;

/// Sample played when a zone has no sample of its own
pub const DEFAULT_SAMPLE: u8 = 20;

/// A named rectangle of the map, 35 bytes on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[brw(little)]
pub struct NavZone {
    pub x: u8,
    pub y: u8,
    pub w: u8,
    pub h: u8,
    /// 1-based sample number, 0 for the default
    pub sam: u8,
    /// Raw NUL-padded name, kept whole so unused bytes survive a rewrite
    pub name: [u8; NAV_NAME_LEN],
}

impl FixedRecord for NavZone {
    const SIZE: usize = 35;
}

impl NavZone {
    /// Create a zone, truncating `name` to the field width
    pub fn new(x: u8, y: u8, w: u8, h: u8, sam: u8, name: &str) -> Self {
        let mut zone = Self {
            x,
            y,
            w,
            h,
            sam,
            name: [0; NAV_NAME_LEN],
        };
        zone.set_name(name);
        zone
    }

    /// Name up to the first NUL
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAV_NAME_LEN);
        self.name[..end].iter().map(|&b| char::from(b)).collect()
    }

    /// Replace the name, NUL-padding the rest of the field
    pub fn set_name(&mut self, name: &str) {
        self.name = [0; NAV_NAME_LEN];
        for (dst, src) in self.name.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
    }

    /// Half-open rectangle `(x0, y0, x1, y1)`
    pub fn rect(&self) -> (u16, u16, u16, u16) {
        let (x, y) = (u16::from(self.x), u16::from(self.y));
        (x, y, x + u16::from(self.w), y + u16::from(self.h))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (x0, y0, x1, y1) = self.rect();
        (usize::from(x0)..usize::from(x1)).contains(&x)
            && (usize::from(y0)..usize::from(y1)).contains(&y)
    }

    pub fn area(&self) -> u32 {
        u32::from(self.w) * u32::from(self.h)
    }

    /// Zero-based sample index for this zone
    pub fn sample_index(&self) -> u8 {
        if self.sam == 0 {
            DEFAULT_SAMPLE
        } else {
            self.sam - 1
        }
    }
}
