//! Styles assembled from nothing

use gta_style::{
    Animation, ColorData, Door, LegacyColors, ObjectInfo, PagedColors, Sprite, SpriteCategory,
    SpriteNumbers, StyleBuilder, StyleError, StyleFile, StyleVersion, Tile, TileKind, VehicleInfo,
};
use pretty_assertions::assert_eq;

fn legacy_colors() -> LegacyColors {
    let mut palette = vec![0u8; 768];
    palette[3..6].copy_from_slice(&[10, 20, 30]);
    LegacyColors {
        palette,
        remap_tables: vec![(0..=255).collect()],
        remap_tail: Vec::new(),
        remap_index: vec![0; 1024],
    }
}

#[test]
fn test_empty_styles_encode() {
    for version in [StyleVersion::Legacy, StyleVersion::Extended] {
        let style = StyleBuilder::new(version).build().unwrap();
        let encoded = style.encode().unwrap();
        assert_eq!(encoded.bytes.len(), version.header_size());

        let decoded = StyleFile::decode(&encoded.bytes).unwrap().model;
        assert_eq!(decoded.version(), version);
        assert_eq!(decoded.tiles().count(), 0);
        assert!(decoded.sprites().is_empty());
    }
}

#[test]
fn test_colour_layout_must_match_version() {
    let mut builder = StyleBuilder::new(StyleVersion::Extended);
    let err = builder
        .set_colors(ColorData::Legacy(legacy_colors()))
        .unwrap_err();
    assert!(matches!(err, StyleError::VersionMismatch(_)));

    let mut builder = StyleBuilder::new(StyleVersion::Legacy);
    *builder.colors_mut() = ColorData::Paged(PagedColors::default());
    assert!(matches!(builder.build(), Err(StyleError::VersionMismatch(_))));
}

#[test_log::test]
fn test_build_legacy_style() {
    let mut builder = StyleBuilder::new(StyleVersion::Legacy);
    builder.set_colors(ColorData::Legacy(legacy_colors())).unwrap();

    let mut lid = Tile::blank();
    lid.pixels_mut().fill(1);
    builder.add_tile(TileKind::Side, Tile::blank());
    builder.add_tile(TileKind::Lid, lid);
    builder.add_animation(Animation {
        block: 0,
        which: 1,
        speed: 3,
        frames: vec![0, 0],
    });
    builder.add_object_info(ObjectInfo {
        width: 1,
        spr_num: 0,
        ..ObjectInfo::default()
    });
    builder.add_vehicle(VehicleInfo {
        vtype: 4,
        max_speed: 90,
        doors: vec![Door {
            rpx: 1,
            rpy: 2,
            object: 3,
            delta: 4,
        }],
        ..VehicleInfo::default()
    });

    let mut atlas = vec![0u8; 256 * 2];
    atlas[0] = 1;
    builder.sprites_mut().push(Sprite {
        width: 1,
        height: 2,
        size: 2,
        ptr: 0,
        ..Sprite::default()
    });
    let diagnostics = builder.set_sprite_graphics(atlas).unwrap();
    assert!(diagnostics.is_empty());

    let mut numbers = SpriteNumbers::default();
    numbers.set_count(SpriteCategory::Car, 1);
    builder.set_sprite_numbers(Some(numbers));

    let style = builder.build().unwrap();
    assert_eq!(style.sprite(0).unwrap().pixels, vec![1, 0]);

    let encoded = style.encode().unwrap();
    let decoded = StyleFile::decode(&encoded.bytes).unwrap();
    assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
    let style = decoded.model;

    assert_eq!(style.tiles().padding.len(), 2);
    assert_eq!(style.animations().entries[0].frames.len(), 2);
    assert_eq!(style.vehicles()[0].doors[0].delta, 4);
    assert_eq!(style.vehicle_sprite(0), Some(0));
    assert_eq!(style.render_tile(TileKind::Lid, 0, 0).unwrap().pixel(5, 5), Some([40, 80, 120, 255]));
}
