//! Owned, mutable style editor

use gta_data::{Diagnostics, FieldValue, SectionReader};

use crate::animation::Animation;
use crate::color::ColorData;
use crate::error::{Result, StyleError};
use crate::fields;
use crate::header::{StyleHeader, StyleVersion};
use crate::object_info::ObjectInfo;
use crate::sprite::{Sprite, read_sprites};
use crate::sprite_numbers::SpriteNumbers;
use crate::style::{StyleFile, StyleSections};
use crate::tiles::{Tile, TileKind};
use crate::vehicle::VehicleInfo;

/// Editor for a style.
///
/// Obtained from [`StyleFile::into_builder`] or [`StyleBuilder::new`].
/// [`StyleBuilder::build`] freezes the result into a [`StyleFile`] that can
/// be encoded.
///
/// # Examples
///
/// ```
/// use gta_style::{StyleBuilder, StyleVersion, Tile, TileKind};
///
/// let mut builder = StyleBuilder::new(StyleVersion::Extended);
/// builder.add_tile(TileKind::Lid, Tile::blank());
/// builder.set_field("sprite_numbers.car", "12")?;
///
/// let style = builder.build()?;
/// assert_eq!(style.tiles().lid.len(), 1);
/// assert_eq!(style.tiles().padding.len(), 3);
/// # Ok::<(), gta_style::StyleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StyleBuilder {
    sections: StyleSections,
}

impl StyleBuilder {
    /// An empty style of the given layout
    pub fn new(version: StyleVersion) -> Self {
        Self {
            sections: StyleSections::empty(version),
        }
    }

    pub(crate) fn from_sections(sections: StyleSections) -> Self {
        Self { sections }
    }

    pub fn version(&self) -> StyleVersion {
        self.sections.header.style_version()
    }

    pub fn header(&self) -> &StyleHeader {
        &self.sections.header
    }

    /// Header fields that are not section sizes (the `.G24` sub-CLUT sizes)
    /// are written as set here
    pub fn header_mut(&mut self) -> &mut StyleHeader {
        &mut self.sections.header
    }

    /// Append a tile to a set, returning its index in that set. Padding is
    /// adjusted to keep whole rows.
    ///
    /// In `.G24` styles tile palettes are addressed by position across all
    /// sets, so adding side or lid tiles shifts the slots of later sets.
    pub fn add_tile(&mut self, kind: TileKind, tile: Tile) -> usize {
        let set = self.sections.tiles.set_mut(kind);
        set.push(tile);
        let index = set.len() - 1;
        self.sections.tiles.normalize_padding();
        index
    }

    pub fn tile_mut(&mut self, kind: TileKind, index: usize) -> Option<&mut Tile> {
        self.sections.tiles.set_mut(kind).get_mut(index)
    }

    pub fn add_animation(&mut self, animation: Animation) -> &mut Self {
        self.sections.animations.entries.push(animation);
        self
    }

    pub fn animations_mut(&mut self) -> &mut Vec<Animation> {
        &mut self.sections.animations.entries
    }

    /// Replace the colour data; it must match the style version
    pub fn set_colors(&mut self, colors: ColorData) -> Result<()> {
        check_colors(self.version(), &colors)?;
        self.sections.colors = colors;
        Ok(())
    }

    pub fn colors_mut(&mut self) -> &mut ColorData {
        &mut self.sections.colors
    }

    pub fn add_object_info(&mut self, info: ObjectInfo) -> usize {
        self.sections.object_info.push(info);
        self.sections.object_info.len() - 1
    }

    pub fn object_info_mut(&mut self) -> &mut Vec<ObjectInfo> {
        &mut self.sections.object_info
    }

    pub fn add_vehicle(&mut self, vehicle: VehicleInfo) -> usize {
        self.sections.vehicles.push(vehicle);
        self.sections.vehicles.len() - 1
    }

    pub fn vehicles_mut(&mut self) -> &mut Vec<VehicleInfo> {
        &mut self.sections.vehicles
    }

    /// Sprite directory entries. Only the directory fields are written
    /// back; pixel copies are refreshed by [`StyleBuilder::set_sprite_graphics`].
    pub fn sprites_mut(&mut self) -> &mut Vec<Sprite> {
        &mut self.sections.sprites
    }

    /// Replace the sprite atlas and re-read every sprite's pixels and
    /// patches from it
    pub fn set_sprite_graphics(&mut self, atlas: Vec<u8>) -> Result<Diagnostics> {
        let version = self.version();
        let mut directory = Vec::new();
        for sprite in &self.sections.sprites {
            sprite.write(&mut directory, version)?;
        }
        let mut diagnostics = Diagnostics::new();
        self.sections.sprites = read_sprites(
            &mut SectionReader::new(&directory),
            version,
            &atlas,
            &mut diagnostics,
        )?;
        self.sections.sprite_graphics = atlas;
        Ok(diagnostics)
    }

    pub fn set_sprite_numbers(&mut self, numbers: Option<SpriteNumbers>) {
        self.sections.sprite_numbers = numbers;
    }

    /// Replace the bytes written after the sprite numbers
    pub fn set_trailing(&mut self, bytes: Vec<u8>) {
        self.sections.trailing = bytes;
    }

    pub fn get_field(&self, path: &str) -> Result<FieldValue> {
        Ok(fields::table().get(&self.sections, path)?)
    }

    /// Set a field from its textual form, e.g. `("vehicles[3].grip", "12")`
    pub fn set_field(&mut self, path: &str, value: &str) -> Result<FieldValue> {
        Ok(fields::table().set(&mut self.sections, path, value)?)
    }

    /// Check the colour layout against the header and freeze the style
    pub fn build(mut self) -> Result<StyleFile> {
        check_colors(self.version(), &self.sections.colors)?;
        self.sections.tiles.normalize_padding();
        Ok(StyleFile {
            sections: self.sections,
        })
    }
}

fn check_colors(version: StyleVersion, colors: &ColorData) -> Result<()> {
    match (version, colors) {
        (StyleVersion::Legacy, ColorData::Legacy(_))
        | (StyleVersion::Extended, ColorData::Paged(_)) => Ok(()),
        (_, ColorData::Legacy(_)) => Err(StyleError::VersionMismatch("palette")),
        (_, ColorData::Paged(_)) => Err(StyleError::VersionMismatch("CLUT")),
    }
}
