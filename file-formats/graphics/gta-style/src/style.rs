//! The decoded style and its read-only queries

use custom_debug::Debug;
use gta_data::debug::{byte_len_fmt, trimmed_collection_fmt};
use gta_data::{Decoded, Encoded, FieldKind, FieldValue};

use crate::animation::AnimationTable;
use crate::builder::StyleBuilder;
use crate::color::{ColorData, LegacyColors, PagedColors};
use crate::error::Result;
use crate::header::{StyleHeader, StyleVersion};
use crate::object_info::ObjectInfo;
use crate::sprite::{PAGE_SIZE, Sprite};
use crate::sprite_numbers::{SpriteCategory, SpriteNumbers};
use crate::tiles::{Tile, TileAtlas, TileKind};
use crate::vehicle::VehicleInfo;
use crate::{fields, parser, writer};

/// Every section of a style, shared by [`StyleFile`] and [`StyleBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleSections {
    pub(crate) header: StyleHeader,
    pub(crate) tiles: TileAtlas,
    pub(crate) animations: AnimationTable,
    pub(crate) colors: ColorData,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) object_info: Vec<ObjectInfo>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) vehicles: Vec<VehicleInfo>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) sprites: Vec<Sprite>,
    #[debug(with = byte_len_fmt)]
    pub(crate) sprite_graphics: Vec<u8>,
    pub(crate) sprite_numbers: Option<SpriteNumbers>,
    #[debug(with = byte_len_fmt)]
    pub(crate) trailing: Vec<u8>,
}

impl StyleSections {
    pub(crate) fn empty(version: StyleVersion) -> Self {
        Self {
            header: StyleHeader::empty(version),
            tiles: TileAtlas::default(),
            animations: AnimationTable::default(),
            colors: match version {
                StyleVersion::Legacy => ColorData::Legacy(LegacyColors::default()),
                StyleVersion::Extended => ColorData::Paged(PagedColors::default()),
            },
            object_info: Vec::new(),
            vehicles: Vec::new(),
            sprites: Vec::new(),
            sprite_graphics: Vec::new(),
            sprite_numbers: None,
            trailing: Vec::new(),
        }
    }
}

/// A decoded `.GRY` or `.G24` style.
///
/// `StyleFile` is read-only; edits go through [`StyleBuilder`], obtained
/// with [`StyleFile::into_builder`].
///
/// Encoding rewrites every directory and metadata section, but the sprite
/// atlas and the colour data are written back exactly as they were read.
/// Changing sprite pixels or palettes means editing those byte blobs
/// directly through the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleFile {
    pub(crate) sections: StyleSections,
}

impl StyleFile {
    /// Parse a whole style file
    pub fn decode(bytes: &[u8]) -> Result<Decoded<Self>> {
        parser::decode(bytes)
    }

    /// Serialize the style. Section sizes are recomputed.
    pub fn encode(&self) -> Result<Encoded> {
        writer::encode(&self.sections)
    }

    pub fn into_builder(self) -> StyleBuilder {
        StyleBuilder::from_sections(self.sections)
    }

    pub fn version(&self) -> StyleVersion {
        self.sections.header.style_version()
    }

    /// Header as decoded
    pub fn header(&self) -> &StyleHeader {
        &self.sections.header
    }

    pub fn tiles(&self) -> &TileAtlas {
        &self.sections.tiles
    }

    pub fn tile(&self, kind: TileKind, index: usize) -> Option<&Tile> {
        self.sections.tiles.tile(kind, index)
    }

    pub fn animations(&self) -> &AnimationTable {
        &self.sections.animations
    }

    pub fn colors(&self) -> &ColorData {
        &self.sections.colors
    }

    pub fn object_info(&self) -> &[ObjectInfo] {
        &self.sections.object_info
    }

    pub fn vehicles(&self) -> &[VehicleInfo] {
        &self.sections.vehicles
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sections.sprites
    }

    pub fn sprite(&self, index: usize) -> Option<&Sprite> {
        self.sections.sprites.get(index)
    }

    /// The raw sprite atlas
    pub fn sprite_graphics(&self) -> &[u8] {
        &self.sections.sprite_graphics
    }

    /// Whole 256×256 pages of the sprite atlas. A partial page at the end
    /// (delta data usually) is not included.
    pub fn sprite_pages(&self) -> impl Iterator<Item = &[u8]> {
        self.sections.sprite_graphics.chunks_exact(PAGE_SIZE)
    }

    pub fn sprite_page_count(&self) -> usize {
        self.sections.sprite_graphics.len() / PAGE_SIZE
    }

    pub fn sprite_numbers(&self) -> Option<&SpriteNumbers> {
        self.sections.sprite_numbers.as_ref()
    }

    /// Directory index of a category-relative sprite number
    pub fn sprite_index(&self, category: SpriteCategory, local: usize) -> Option<usize> {
        self.sections
            .sprite_numbers
            .as_ref()
            .map(|numbers| numbers.global_index(category, local))
    }

    /// Directory index of the first sprite of an object type
    pub fn object_sprite(&self, object_type: usize) -> Option<usize> {
        let info = self.sections.object_info.get(object_type)?;
        self.sprite_index(SpriteCategory::Object, usize::from(info.spr_num))
    }

    /// Directory index of a vehicle model's sprite
    pub fn vehicle_sprite(&self, vehicle: usize) -> Option<usize> {
        let info = self.sections.vehicles.get(vehicle)?;
        let local = usize::try_from(info.spr_num).ok()?;
        self.sprite_index(info.vehicle_type().sprite_category(), local)
    }

    /// Bytes found after the sprite number section
    pub fn trailing(&self) -> &[u8] {
        &self.sections.trailing
    }

    /// Read a field by path, e.g. `vehicles[2].max_speed`
    pub fn get_field(&self, path: &str) -> Result<FieldValue> {
        Ok(fields::table().get(&self.sections, path)?)
    }

    /// Every addressable field pattern with its kind and writability
    pub fn field_patterns() -> Vec<(&'static str, FieldKind, bool)> {
        fields::table()
            .specs()
            .iter()
            .map(|spec| (spec.pattern, spec.kind, spec.set.is_some()))
            .collect()
    }
}
