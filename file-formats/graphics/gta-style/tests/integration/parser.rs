//! Decoding hand-assembled styles

use gta_style::{
    AnimFrame, AnimTarget, ColorData, DiagnosticCode, ObjectStatus, SpriteCategory, StyleError,
    StyleFile, StyleVersion, TileKind, VehicleType,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::fixtures::{MARKER, RawStyle};

#[test]
fn test_decode_legacy() {
    let decoded = StyleFile::decode(&RawStyle::legacy().bytes()).expect("legacy style decodes");
    assert!(decoded.diagnostics.is_empty());
    let style = decoded.model;

    assert_eq!(style.version(), StyleVersion::Legacy);
    assert_eq!(style.tiles().side.len(), 1);
    assert_eq!(style.tiles().lid.len(), 1);
    assert_eq!(style.tiles().padding.len(), 2);

    let lid = style.tile(TileKind::Lid, 0).unwrap();
    assert_eq!(lid.pixel(0, 0), Some(2));
    assert_eq!(lid.pixels()[MARKER], 102);
    assert_eq!(style.tile(TileKind::Side, 0).unwrap().pixel(1, 1), Some(101));

    let anim = style.animations().find(0, AnimTarget::Lid).unwrap();
    assert_eq!(anim.speed, 2);
    assert_eq!(anim.frame_at(0), AnimFrame::Base);
    assert_eq!(anim.frames, vec![0]);

    let ColorData::Legacy(colors) = style.colors() else {
        panic!("GRY style decoded with paged colours");
    };
    assert_eq!(colors.remap_tables.len(), 2);
    assert_eq!(colors.lid_remap(0, 1), Some(1));
    assert_eq!(style.colors().palette_count(), 2);

    let object = &style.object_info()[0];
    assert_eq!(object.status_kind(), Some(ObjectStatus::Animation));
    assert_eq!(object.into, vec![3]);
    assert_eq!(object.sprite_count(), 4);

    let car = &style.vehicles()[0];
    assert_eq!(car.vehicle_type(), VehicleType::Car);
    assert_eq!(car.max_speed, 200);
    assert_eq!(car.remap8[1], 33);
    assert_eq!(car.doors.len(), 1);
    assert_eq!(car.doors[0].rpy, -4);

    assert_eq!(style.sprites().len(), 2);
    let sprite = style.sprite(0).unwrap();
    assert_eq!((sprite.width, sprite.height), (2, 2));
    assert_eq!(sprite.pixels, vec![5, 0, 0, 5]);
    assert_eq!(sprite.deltas[0].data, vec![1, 0, 1, 7]);
    assert_eq!(style.sprite(1).unwrap().pixels, vec![5]);

    let numbers = style.sprite_numbers().unwrap();
    assert_eq!(numbers.count(SpriteCategory::Car), 1);
    assert_eq!(style.vehicle_sprite(0), Some(0));
    assert_eq!(style.object_sprite(0), Some(1));
    assert!(style.trailing().is_empty());
}

#[test]
fn test_legacy_remap_lookup() {
    let style = StyleFile::decode(&RawStyle::legacy().bytes()).unwrap().model;
    let colors = style.colors();

    // Table 1 sends everything to palette entry 7; colour 0 stays clear
    assert_eq!(colors.color(1, 0), Some([252, 0, 0, 0]));
    assert_eq!(colors.color(1, 9), Some([252, 0, 0, 255]));
    assert_eq!(colors.color(0, 5), Some([4, 8, 12, 255]));
    assert_eq!(colors.color(2, 5), None);
}

#[test]
fn test_decode_extended() {
    let decoded = StyleFile::decode(&RawStyle::extended().bytes()).unwrap();
    let codes: Vec<_> = decoded.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::ClutSizeMismatch]);
    let style = decoded.model;

    assert_eq!(style.version(), StyleVersion::Extended);
    assert_eq!(style.header().version(), 336);
    assert!(style.animations().entries.is_empty());

    let ColorData::Paged(colors) = style.colors() else {
        panic!("G24 style decoded with a legacy palette");
    };
    assert_eq!(colors.clut.len(), 65_536);
    assert_eq!(colors.palette_count(), 64);
    assert_eq!(colors.slot(8), Some(1));
    assert_eq!(style.colors().color(2, 1), Some([10, 20, 30, 255]));

    let ranges = style.clut_ranges().unwrap();
    assert_eq!((ranges.tile, ranges.sprite, ranges.vehicle, ranges.font), (8, 1, 0, 0));
    assert_eq!(style.sprite(0).unwrap().clut, 0);
    assert_eq!(style.trailing(), &[0xBE, 0xEF]);
}

#[test_case(StyleVersion::Legacy ; "gry")]
#[test_case(StyleVersion::Extended ; "g24")]
fn test_roundtrip_is_byte_exact(version: StyleVersion) {
    let raw = match version {
        StyleVersion::Legacy => RawStyle::legacy(),
        StyleVersion::Extended => RawStyle::extended(),
    };
    let bytes = raw.bytes();
    let style = StyleFile::decode(&bytes).unwrap().model;
    let encoded = style.encode().unwrap();
    assert!(encoded.diagnostics.is_empty());
    assert_eq!(encoded.bytes.len(), bytes.len());
    assert!(encoded.bytes == bytes, "re-encoded style differs from its source");
}

#[test_case(0 ; "zero")]
#[test_case(291 ; "near gry")]
#[test_case(337 ; "near g24")]
fn test_unknown_version(version: u32) {
    let mut raw = RawStyle::legacy();
    raw.version = version;
    let err = StyleFile::decode(&raw.bytes()).unwrap_err();
    assert!(matches!(err, StyleError::UnsupportedVersion(v) if v == version));
}

#[test]
fn test_truncated_header() {
    let bytes = RawStyle::extended().bytes();
    let err = StyleFile::decode(&bytes[..40]).unwrap_err();
    assert!(matches!(err, StyleError::TruncatedInput { .. }), "{err:?}");
}

#[test]
fn test_truncated_sprite_graphics() {
    let mut bytes = RawStyle::legacy().bytes();
    // Cut inside the atlas, after the directory
    let cut = bytes.len() - 42 - 200;
    bytes.truncate(cut);
    let err = StyleFile::decode(&bytes).unwrap_err();
    assert!(matches!(err, StyleError::TruncatedInput { .. }), "{err:?}");
}

#[test]
fn test_suspicious_remap_index() {
    let mut raw = RawStyle::legacy();
    let index_start = 768 + 512;
    raw.colors[index_start + 4] = 3;
    let decoded = StyleFile::decode(&raw.bytes()).unwrap();
    assert!(decoded.diagnostics.has(DiagnosticCode::SuspiciousRemapIndex));
}

#[test]
fn test_misaligned_remap_keeps_tail() {
    let mut raw = RawStyle::legacy();
    // Drop the last 16 bytes of table 1
    raw.colors.drain(768 + 496..768 + 512);
    raw.color_sizes[1] = 496;
    let decoded = StyleFile::decode(&raw.bytes()).unwrap();
    assert!(decoded.diagnostics.has(DiagnosticCode::RemapSizeMisaligned));

    let ColorData::Legacy(colors) = decoded.model.colors() else {
        panic!("GRY style decoded with paged colours");
    };
    assert_eq!(colors.remap_tables.len(), 1);
    assert_eq!(colors.remap_tail.len(), 240);

    let encoded = decoded.model.encode().unwrap();
    assert!(encoded.bytes == raw.bytes());
}

#[test]
fn test_sprite_numbers_absent() {
    let mut raw = RawStyle::legacy();
    raw.sprite_numbers.clear();
    let style = StyleFile::decode(&raw.bytes()).unwrap().model;
    assert!(style.sprite_numbers().is_none());
    assert_eq!(style.vehicle_sprite(0), None);
}

#[test]
fn test_sprite_numbers_bad_size() {
    let mut raw = RawStyle::legacy();
    raw.sprite_numbers.truncate(40);
    let err = StyleFile::decode(&raw.bytes()).unwrap_err();
    assert!(matches!(err, StyleError::CorruptSection { section: "sprite_numbers", .. }), "{err:?}");
}

#[test]
fn test_unknown_object_status() {
    let mut raw = RawStyle::legacy();
    raw.object_info[18] = 12;
    let decoded = StyleFile::decode(&raw.bytes()).unwrap();
    let hits: Vec<_> = decoded
        .diagnostics
        .with_code(DiagnosticCode::UnknownObjectStatus)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, "object_info[0]");
    assert_eq!(decoded.model.object_info()[0].status_kind(), None);
}

#[test]
fn test_sprite_past_atlas() {
    let mut raw = RawStyle::legacy();
    // Second sprite's ptr moves past the atlas end
    let ptr_at = 10 + 6 + 6;
    raw.sprite_info[ptr_at..ptr_at + 4].copy_from_slice(&10_000u32.to_le_bytes());
    let decoded = StyleFile::decode(&raw.bytes()).unwrap();
    assert!(decoded.diagnostics.has(DiagnosticCode::SpriteOutOfAtlas));
    assert_eq!(decoded.model.sprite(1).unwrap().pixels, vec![0]);
}

#[test]
fn test_tile_size_misaligned() {
    let mut raw = RawStyle::legacy();
    raw.aux.clear();
    let mut bytes = raw.bytes();
    // aux_size = 100 bytes: no whole tile, so no change to the atlas
    bytes[12..16].copy_from_slice(&100u32.to_le_bytes());
    let decoded = StyleFile::decode(&bytes).unwrap();
    let hits: Vec<_> = decoded
        .diagnostics
        .with_code(DiagnosticCode::TileSizeMisaligned)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, "header.aux_size");
    let style = decoded.model;
    assert!(style.tiles().aux.is_empty());
    assert_eq!(style.tiles().size_remainder, [0, 0, 100]);

    // The odd size goes back into the header unchanged
    let encoded = style.encode().unwrap();
    assert!(encoded.bytes == bytes, "re-encoded style differs from its source");
}
