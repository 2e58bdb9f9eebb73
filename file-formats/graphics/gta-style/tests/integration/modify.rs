//! Decode, edit, encode, decode again

use gta_style::{
    ColorData, DiagnosticCode, FieldValue, StyleError, StyleFile, Tile, TileKind,
};
use pretty_assertions::assert_eq;

use crate::fixtures::RawStyle;

fn legacy() -> StyleFile {
    StyleFile::decode(&RawStyle::legacy().bytes()).unwrap().model
}

fn extended() -> StyleFile {
    StyleFile::decode(&RawStyle::extended().bytes()).unwrap().model
}

fn reencode(style: StyleFile) -> (StyleFile, gta_style::Diagnostics) {
    let encoded = style.encode().unwrap();
    let decoded = StyleFile::decode(&encoded.bytes).unwrap();
    (decoded.model, encoded.diagnostics)
}

#[test]
fn test_vehicle_fields() {
    let mut builder = legacy().into_builder();
    assert_eq!(builder.set_field("vehicles[0].max_speed", "250").unwrap(), FieldValue::Int(250));
    builder.set_field("vehicles[0].remap8[11]", "0x40").unwrap();
    builder.set_field("vehicles[0].doors[0].rpx", "-7").unwrap();
    let (style, diagnostics) = reencode(builder.build().unwrap());

    assert!(diagnostics.is_empty());
    assert_eq!(style.vehicles()[0].max_speed, 250);
    assert_eq!(style.get_field("vehicles[0].remap8[11]").unwrap(), FieldValue::Int(0x40));
    assert_eq!(style.vehicles()[0].doors[0].rpx, -7);
}

#[test]
fn test_field_errors() {
    let mut builder = legacy().into_builder();
    assert!(matches!(
        builder.set_field("vehicles[3].grip", "1"),
        Err(StyleError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("vehicles[0].cx", "300"),
        Err(StyleError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("header.side_size", "0"),
        Err(StyleError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("vehicles[0].no_such_field", "1"),
        Err(StyleError::Field(_))
    ));
}

#[test]
fn test_object_into_grows_record() {
    let mut builder = legacy().into_builder();
    builder.object_info_mut()[0].into.push(9);
    let before = RawStyle::legacy().bytes().len();
    let style = builder.build().unwrap();
    let encoded = style.encode().unwrap();
    assert_eq!(encoded.bytes.len(), before + 2);

    let style = StyleFile::decode(&encoded.bytes).unwrap().model;
    assert_eq!(style.object_info()[0].into, vec![3, 9]);
    // Later sections moved along with it
    assert_eq!(style.vehicles()[0].max_speed, 200);
    assert_eq!(style.sprite(0).unwrap().pixels, vec![5, 0, 0, 5]);
}

#[test]
fn test_added_tile_repads_atlas() {
    let mut builder = legacy().into_builder();
    let mut tile = Tile::blank();
    tile.pixels_mut()[0] = 9;
    builder.add_tile(TileKind::Aux, tile);
    builder.add_tile(TileKind::Aux, Tile::blank());
    builder.add_tile(TileKind::Aux, Tile::blank());
    let (style, _) = reencode(builder.build().unwrap());

    assert_eq!(style.tiles().aux.len(), 3);
    assert_eq!(style.tiles().padding.len(), 3);
    assert_eq!(style.tile(TileKind::Aux, 0).unwrap().pixel(0, 0), Some(9));
    assert_eq!(style.tile(TileKind::Lid, 0).unwrap().pixel(0, 0), Some(2));
}

#[test]
fn test_stale_clut_size_is_rewritten() {
    let mut builder = extended().into_builder();
    let ColorData::Paged(colors) = builder.colors_mut() else {
        panic!("G24 style decoded with a legacy palette");
    };
    colors.clut.extend(std::iter::repeat_n(0, 65_536));
    let encoded = builder.build().unwrap().encode().unwrap();

    let hits: Vec<_> = encoded
        .diagnostics
        .with_code(DiagnosticCode::SectionSizeMismatch)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, "header.clut_size");

    let decoded = StyleFile::decode(&encoded.bytes).unwrap();
    assert!(!decoded.diagnostics.has(DiagnosticCode::ClutSizeMismatch));
    assert_eq!(decoded.model.get_field("header.clut_size").unwrap(), FieldValue::Int(131_072));
    assert_eq!(decoded.model.colors().palette_count(), 128);
}

#[test]
fn test_sprite_numbers_created_by_field() {
    let mut raw = RawStyle::legacy();
    raw.sprite_numbers.clear();
    let style = StyleFile::decode(&raw.bytes()).unwrap().model;
    assert_eq!(style.get_field("sprite_numbers.car").unwrap(), FieldValue::Int(0));

    let mut builder = style.into_builder();
    builder.set_field("sprite_numbers.car", "1").unwrap();
    let (style, _) = reencode(builder.build().unwrap());
    assert_eq!(style.header().sprite_numbers_size(), 42);
    assert_eq!(style.vehicle_sprite(0), Some(0));
}

#[test]
fn test_trailing_bytes_survive_edits() {
    let mut builder = extended().into_builder();
    builder.set_field("object_info[0].weight", "12").unwrap();
    let (style, _) = reencode(builder.build().unwrap());
    assert_eq!(style.trailing(), &[0xBE, 0xEF]);
    assert_eq!(style.object_info()[0].weight, 12);
}
