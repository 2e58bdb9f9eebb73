//! Sprite counts per category and the base offsets derived from them

use gta_data::{SectionReader, WriteExt};

use crate::error::{Result, StyleError};

/// Sprite categories in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpriteCategory {
    Arrow,
    Digits,
    Boat,
    Box,
    Bus,
    Car,
    Object,
    Ped,
    Speedo,
    Tank,
    TrafficLights,
    Train,
    TrDoors,
    Bike,
    Tram,
    WBus,
    WCar,
    Ex,
    TumCar,
    TumTruck,
    Ferry,
}

impl SpriteCategory {
    pub const COUNT: usize = 21;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Arrow,
        Self::Digits,
        Self::Boat,
        Self::Box,
        Self::Bus,
        Self::Car,
        Self::Object,
        Self::Ped,
        Self::Speedo,
        Self::Tank,
        Self::TrafficLights,
        Self::Train,
        Self::TrDoors,
        Self::Bike,
        Self::Tram,
        Self::WBus,
        Self::WCar,
        Self::Ex,
        Self::TumCar,
        Self::TumTruck,
        Self::Ferry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Digits => "digits",
            Self::Boat => "boat",
            Self::Box => "box",
            Self::Bus => "bus",
            Self::Car => "car",
            Self::Object => "object",
            Self::Ped => "ped",
            Self::Speedo => "speedo",
            Self::Tank => "tank",
            Self::TrafficLights => "traffic_lights",
            Self::Train => "train",
            Self::TrDoors => "trdoors",
            Self::Bike => "bike",
            Self::Tram => "tram",
            Self::WBus => "wbus",
            Self::WCar => "wcar",
            Self::Ex => "ex",
            Self::TumCar => "tumcar",
            Self::TumTruck => "tumtruck",
            Self::Ferry => "ferry",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    fn position(self) -> usize {
        self as usize
    }
}

/// Size of the sprite number section
pub const SPRITE_NUMBERS_SIZE: usize = SpriteCategory::COUNT * 2;

/// How many sprites each category owns.
///
/// Categories occupy consecutive ranges of the sprite directory in
/// [`SpriteCategory::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteNumbers {
    pub counts: [u16; SpriteCategory::COUNT],
}

impl SpriteNumbers {
    /// Read the section; an empty section means the style has none
    pub fn read(reader: &mut SectionReader<'_>) -> Result<Option<Self>> {
        match reader.remaining() {
            0 => Ok(None),
            SPRITE_NUMBERS_SIZE => {
                let values = reader.read_u16_array("sprite_numbers", SpriteCategory::COUNT)?;
                let mut counts = [0; SpriteCategory::COUNT];
                counts.copy_from_slice(&values);
                Ok(Some(Self { counts }))
            }
            other => Err(StyleError::corrupt(
                "sprite_numbers",
                format!("size {other}, expected 0 or {SPRITE_NUMBERS_SIZE}"),
            )),
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.put_u16_slice(&self.counts);
    }

    pub fn count(&self, category: SpriteCategory) -> u16 {
        self.counts[category.position()]
    }

    pub fn set_count(&mut self, category: SpriteCategory, count: u16) {
        self.counts[category.position()] = count;
    }

    /// Index of the category's first sprite in the directory
    pub fn base(&self, category: SpriteCategory) -> usize {
        self.counts[..category.position()]
            .iter()
            .map(|&c| usize::from(c))
            .sum()
    }

    /// `(category, base)` for every category
    pub fn bases(&self) -> Vec<(SpriteCategory, usize)> {
        let mut base = 0;
        SpriteCategory::ALL
            .into_iter()
            .map(|category| {
                let start = base;
                base += usize::from(self.count(category));
                (category, start)
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| usize::from(c)).sum()
    }

    /// Directory index of a category-relative sprite number
    pub fn global_index(&self, category: SpriteCategory, local: usize) -> usize {
        self.base(category) + local
    }

    /// Category and category-relative number of a directory index
    pub fn category_of(&self, index: usize) -> Option<(SpriteCategory, usize)> {
        self.bases()
            .into_iter()
            .find(|&(category, base)| {
                index >= base && index < base + usize::from(self.count(category))
            })
            .map(|(category, base)| (category, index - base))
    }
}
