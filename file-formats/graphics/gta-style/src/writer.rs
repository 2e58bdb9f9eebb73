//! Style encoding

use gta_data::io_ext::write_record;
use gta_data::{DiagnosticCode, Diagnostics, Encoded};

use crate::color::{ColorData, clut_padded_len};
use crate::error::{Result, StyleError};
use crate::header::{ExtendedHeader, LegacyHeader, StyleHeader};
use crate::style::StyleSections;
use crate::tiles::TileKind;

fn section_len(section: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| StyleError::Encode {
        section,
        message: format!("{len} bytes do not fit a u32 size"),
    })
}

/// Freshly packed sections
struct Packed {
    tiles: Vec<u8>,
    animations: Vec<u8>,
    colors: Vec<u8>,
    object_info: Vec<u8>,
    vehicles: Vec<u8>,
    sprite_info: Vec<u8>,
    sprite_numbers: Vec<u8>,
}

/// Pack every section and prepend a header whose sizes match them.
///
/// The sprite atlas and colour bytes are copied through untouched.
pub(crate) fn encode(sections: &StyleSections) -> Result<Encoded> {
    let mut diagnostics = Diagnostics::new();
    let version = sections.header.style_version();

    let tiles = sections.tiles.pack()?;

    let mut animations = Vec::with_capacity(sections.animations.packed_len());
    sections.animations.write(&mut animations)?;

    let mut colors = Vec::new();
    match &sections.colors {
        ColorData::Legacy(c) => c.write(&mut colors),
        ColorData::Paged(c) => c.write(&mut colors),
    }

    let mut object_info = Vec::new();
    for object in &sections.object_info {
        object.write(&mut object_info)?;
    }

    let mut vehicles = Vec::new();
    for vehicle in &sections.vehicles {
        vehicle.write(&mut vehicles)?;
    }

    let mut sprite_info = Vec::new();
    for sprite in &sections.sprites {
        sprite.write(&mut sprite_info, version)?;
    }

    let mut sprite_numbers = Vec::new();
    if let Some(numbers) = &sections.sprite_numbers {
        numbers.write(&mut sprite_numbers);
    }

    let packed = Packed {
        tiles,
        animations,
        colors,
        object_info,
        vehicles,
        sprite_info,
        sprite_numbers,
    };
    let header = match (&sections.header, &sections.colors) {
        (StyleHeader::Legacy(h), ColorData::Legacy(c)) => StyleHeader::Legacy(LegacyHeader {
            palette_size: section_len("palette", c.palette.len())?,
            remap_size: section_len("remap_tables", c.remap_len())?,
            remap_index_size: section_len("remap_index", c.remap_index.len())?,
            ..legacy_sizes(sections, &packed, *h)?
        }),
        (StyleHeader::Extended(h), ColorData::Paged(c)) => {
            let mut clut_size = h.clut_size;
            if clut_padded_len(clut_size as usize) != c.clut.len() {
                diagnostics.push(
                    DiagnosticCode::SectionSizeMismatch,
                    "header.clut_size",
                    format!(
                        "clut_size {clut_size} does not describe the {}-byte CLUT, writing its length",
                        c.clut.len()
                    ),
                );
                clut_size = section_len("clut", c.clut.len())?;
            }
            StyleHeader::Extended(ExtendedHeader {
                clut_size,
                palette_index_size: section_len("palette_index", c.palette_index.len() * 2)?,
                ..extended_sizes(sections, &packed, *h)?
            })
        }
        (_, ColorData::Legacy(_)) => return Err(StyleError::VersionMismatch("palette")),
        (_, ColorData::Paged(_)) => return Err(StyleError::VersionMismatch("CLUT")),
    };

    let mut out = Vec::with_capacity(
        version.header_size()
            + packed.tiles.len()
            + packed.colors.len()
            + sections.sprite_graphics.len(),
    );
    match &header {
        StyleHeader::Legacy(h) => write_record(&mut out, "header", h)?,
        StyleHeader::Extended(h) => write_record(&mut out, "header", h)?,
    }
    for part in [
        &packed.tiles,
        &packed.animations,
        &packed.colors,
        &packed.object_info,
        &packed.vehicles,
        &packed.sprite_info,
        &sections.sprite_graphics,
        &packed.sprite_numbers,
        &sections.trailing,
    ] {
        out.extend_from_slice(part);
    }

    Ok(Encoded::new(out, diagnostics))
}

fn tile_sizes(sections: &StyleSections) -> Result<[u32; 3]> {
    let tiles = &sections.tiles;
    Ok([
        section_len("side", tiles.declared_size(TileKind::Side))?,
        section_len("lid", tiles.declared_size(TileKind::Lid))?,
        section_len("aux", tiles.declared_size(TileKind::Aux))?,
    ])
}

fn legacy_sizes(sections: &StyleSections, packed: &Packed, h: LegacyHeader) -> Result<LegacyHeader> {
    let [side_size, lid_size, aux_size] = tile_sizes(sections)?;
    Ok(LegacyHeader {
        side_size,
        lid_size,
        aux_size,
        anim_size: section_len("animations", packed.animations.len())?,
        object_info_size: section_len("object_info", packed.object_info.len())?,
        car_size: section_len("vehicles", packed.vehicles.len())?,
        sprite_info_size: section_len("sprite_info", packed.sprite_info.len())?,
        sprite_graphics_size: section_len("sprite_graphics", sections.sprite_graphics.len())?,
        sprite_numbers_size: section_len("sprite_numbers", packed.sprite_numbers.len())?,
        ..h
    })
}

fn extended_sizes(
    sections: &StyleSections,
    packed: &Packed,
    h: ExtendedHeader,
) -> Result<ExtendedHeader> {
    let [side_size, lid_size, aux_size] = tile_sizes(sections)?;
    Ok(ExtendedHeader {
        side_size,
        lid_size,
        aux_size,
        anim_size: section_len("animations", packed.animations.len())?,
        object_info_size: section_len("object_info", packed.object_info.len())?,
        car_size: section_len("vehicles", packed.vehicles.len())?,
        sprite_info_size: section_len("sprite_info", packed.sprite_info.len())?,
        sprite_graphics_size: section_len("sprite_graphics", sections.sprite_graphics.len())?,
        sprite_numbers_size: section_len("sprite_numbers", packed.sprite_numbers.len())?,
        ..h
    })
}
