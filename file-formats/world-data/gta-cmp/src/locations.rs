//! The fixed service-location block

use std::fmt;
use std::str::FromStr;

use gta_data::SectionReader;

use crate::LOCATION_BLOCK_SIZE;
use crate::error::Result;

/// Slots per location group
pub const SLOTS_PER_GROUP: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Location {
    /// All-zero slots are unused
    pub fn is_unused(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

/// The six location groups, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationGroup {
    PoliceStation,
    Hospital,
    Unused1,
    Unused2,
    FireStation,
    Unused3,
}

impl LocationGroup {
    pub const ALL: [Self; 6] = [
        Self::PoliceStation,
        Self::Hospital,
        Self::Unused1,
        Self::Unused2,
        Self::FireStation,
        Self::Unused3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PoliceStation => "police_station",
            Self::Hospital => "hospital",
            Self::Unused1 => "unused1",
            Self::Unused2 => "unused2",
            Self::FireStation => "fire_station",
            Self::Unused3 => "unused3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LocationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocationGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.name() == s)
            .ok_or_else(|| format!("unknown location group '{s}'"))
    }
}

/// Six groups of six `(x, y, z)` slots, always 108 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locations {
    groups: [[Location; SLOTS_PER_GROUP]; 6],
}

impl Locations {
    pub fn group(&self, group: LocationGroup) -> &[Location; SLOTS_PER_GROUP] {
        &self.groups[group.index()]
    }

    pub fn group_mut(&mut self, group: LocationGroup) -> &mut [Location; SLOTS_PER_GROUP] {
        &mut self.groups[group.index()]
    }

    /// Used slots across every group
    pub fn iter_used(&self) -> impl Iterator<Item = (LocationGroup, usize, &Location)> {
        LocationGroup::ALL.into_iter().flat_map(move |group| {
            self.group(group)
                .iter()
                .enumerate()
                .filter(|(_, loc)| !loc.is_unused())
                .map(move |(slot, loc)| (group, slot, loc))
        })
    }

    pub fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        let bytes = reader.take("locations", LOCATION_BLOCK_SIZE)?;
        let mut locations = Self::default();
        for (slot, xyz) in locations
            .groups
            .iter_mut()
            .flatten()
            .zip(bytes.chunks_exact(3))
        {
            *slot = Location {
                x: xyz[0],
                y: xyz[1],
                z: xyz[2],
            };
        }
        Ok(locations)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        for loc in self.groups.iter().flatten() {
            out.extend_from_slice(&[loc.x, loc.y, loc.z]);
        }
    }
}
