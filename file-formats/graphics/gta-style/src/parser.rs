//! Style decoding

use gta_data::{Decoded, DiagnosticCode, Diagnostics, SectionReader};

use crate::animation::AnimationTable;
use crate::color::{ColorData, LegacyColors, PagedColors};
use crate::error::Result;
use crate::header::StyleHeader;
use crate::object_info::ObjectInfo;
use crate::sprite::read_sprites;
use crate::sprite_numbers::SpriteNumbers;
use crate::style::{StyleFile, StyleSections};
use crate::tiles::{TILE_BYTES, TileAtlas, deinterleave, padding_for};
use crate::vehicle::VehicleInfo;

/// Whole tiles in a tile set of `size` bytes
fn tile_count(size: u32, set: &str, diagnostics: &mut Diagnostics) -> usize {
    let size = size as usize;
    if size % TILE_BYTES != 0 {
        diagnostics.push(
            DiagnosticCode::TileSizeMisaligned,
            format!("header.{set}_size"),
            format!("{size} is not a multiple of {TILE_BYTES}, the partial tile is not read"),
        );
    }
    size / TILE_BYTES
}

/// Parse a style file.
///
/// The version word picks the header layout and the colour section that
/// follows the animations; everything else is read the same way for both.
pub(crate) fn decode(bytes: &[u8]) -> Result<Decoded<StyleFile>> {
    let mut diagnostics = Diagnostics::new();
    let mut reader = SectionReader::new(bytes);

    let header = StyleHeader::read(&mut reader)?;
    let version = header.style_version();
    log::debug!("{:?}", header);

    let side = tile_count(header.side_size(), "side", &mut diagnostics);
    let lid = tile_count(header.lid_size(), "lid", &mut diagnostics);
    let aux = tile_count(header.aux_size(), "aux", &mut diagnostics);
    let total = side + lid + aux;
    let stored = total + padding_for(total);
    log::debug!(
        "tiles at offset {}: {side} side, {lid} lid, {aux} aux, {} padding",
        reader.offset(),
        stored - total
    );
    let tile_blob = reader.take("tiles", stored * TILE_BYTES)?;
    let mut tiles = TileAtlas::from_tiles(deinterleave(tile_blob)?, side, lid, aux)?;
    tiles.size_remainder = [header.side_size(), header.lid_size(), header.aux_size()]
        .map(|size| size % TILE_BYTES as u32);

    log::debug!("animations at offset {}", reader.offset());
    let animations =
        AnimationTable::read(&mut reader.section("animations", header.anim_size() as usize)?)?;
    log::debug!("{} animations", animations.entries.len());

    log::debug!("colour data at offset {}", reader.offset());
    let colors = match &header {
        StyleHeader::Legacy(h) => {
            ColorData::Legacy(LegacyColors::read(&mut reader, h, &mut diagnostics)?)
        }
        StyleHeader::Extended(h) => {
            ColorData::Paged(PagedColors::read(&mut reader, h, &mut diagnostics)?)
        }
    };
    log::debug!("{} palettes", colors.palette_count());

    log::debug!("object info at offset {}", reader.offset());
    let object_info = ObjectInfo::read_all(
        &mut reader.section("object_info", header.object_info_size() as usize)?,
        &mut diagnostics,
    )?;
    log::debug!("{} objects", object_info.len());

    log::debug!("vehicles at offset {}", reader.offset());
    let vehicles =
        VehicleInfo::read_all(&mut reader.section("vehicles", header.car_size() as usize)?)?;
    log::debug!("{} vehicles", vehicles.len());

    // The directory is decoded after the atlas it points into
    log::debug!("sprite info at offset {}", reader.offset());
    let mut sprite_info = reader.section("sprite_info", header.sprite_info_size() as usize)?;
    log::debug!("sprite graphics at offset {}", reader.offset());
    let sprite_graphics = reader
        .take("sprite_graphics", header.sprite_graphics_size() as usize)?
        .to_vec();
    let sprites = read_sprites(&mut sprite_info, version, &sprite_graphics, &mut diagnostics)?;
    log::debug!("{} sprites", sprites.len());

    log::debug!("sprite numbers at offset {}", reader.offset());
    let sprite_numbers = SpriteNumbers::read(
        &mut reader.section("sprite_numbers", header.sprite_numbers_size() as usize)?,
    )?;

    let trailing = reader.take_rest().to_vec();
    if !trailing.is_empty() {
        log::debug!("{} trailing bytes", trailing.len());
    }

    let sections = StyleSections {
        header,
        tiles,
        animations,
        colors,
        object_info,
        vehicles,
        sprites,
        sprite_graphics,
        sprite_numbers,
        trailing,
    };
    Ok(Decoded::new(StyleFile { sections }, diagnostics))
}
