//! Decoding hand-assembled maps

use gta_cmp::{
    CmpError, CmpFile, DiagnosticCode, Directions, GridCell, LocationGroup, ObjectKind,
    TerrainType,
};
use pretty_assertions::assert_eq;

use crate::fixtures::{RawMap, nav_zone, object};

#[test]
fn test_decode_sample() {
    let raw = RawMap::sample();
    let decoded = CmpFile::decode(&raw.bytes()).expect("sample map decodes");
    assert!(decoded.diagnostics.is_empty());
    let map = decoded.model;

    assert_eq!(map.header().version, 331);
    assert_eq!(map.header().sample, 2);
    assert_eq!(map.header().column_size, 10);

    assert_eq!(map.columns().len(), 2);
    assert_eq!(map.columns()[0].height, 4);
    assert_eq!(map.columns()[0].blockd, vec![0, 1]);
    assert_eq!(map.columns()[1].blockd, vec![2]);

    assert_eq!(map.cell(3, 2), Some(GridCell::Column(0)));
    assert_eq!(map.cell(4, 2), Some(GridCell::Column(1)));
    assert_eq!(map.cell(0, 0), Some(GridCell::Empty(10)));

    let blocks = map.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].terrain(), TerrainType::Road);
    assert_eq!(blocks[0].directions(), Directions::UP);
    assert!(blocks[0].is_flat());
    assert_eq!(blocks[1].slope(), 41);
    assert!(blocks[1].is_railway());
    assert_eq!(blocks[2].terrain(), TerrainType::Building);
    assert_eq!(blocks[2].traffic_light(), 3);

    assert_eq!(map.routes().len(), 1);
    assert_eq!(map.routes()[0].route_type, 1);
    assert_eq!(map.routes()[0].vertices.len(), 2);

    let police = map.locations().group(LocationGroup::PoliceStation);
    assert_eq!((police[0].x, police[0].y, police[0].z), (5, 6, 1));
    assert!(police[1].is_unused());

    assert_eq!(map.trailing(), &[0xDE, 0xAD]);
}

#[test]
fn test_object_positions() {
    let map = CmpFile::decode(&RawMap::sample().bytes()).unwrap().model;
    let objects = map.objects();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].world_position(), (10.0, 20.0, 1.0));
    assert_eq!(
        objects[0].kind(),
        ObjectKind::Object {
            object_type: 3,
            remap: 0
        }
    );
    assert_eq!(objects[1].kind(), ObjectKind::Vehicle { model: 22 });
}

#[test]
fn test_single_object_section() {
    let mut raw = RawMap::sample();
    raw.objects = object(640, 1280, 64, 3, 0, 0, 0, 0);
    let map = CmpFile::decode(&raw.bytes()).unwrap().model;
    assert_eq!(map.header().object_pos_size, 16);
    assert_eq!(map.objects().len(), 1);
    assert_eq!(map.objects()[0].world_position(), (10.0, 20.0, 1.0));
}

#[test]
fn test_object_padding_survives() {
    let mut raw = RawMap::sample();
    raw.objects[14..16].copy_from_slice(&[7, 9]);
    let bytes = raw.bytes();
    let map = CmpFile::decode(&bytes).unwrap().model;
    assert_eq!(map.objects()[0].padding, [7, 9]);
    assert_eq!(map.objects()[1].padding, [0, 0]);
    assert_eq!(map.encode().unwrap().bytes, bytes);
}

#[test]
fn test_nav_zone_name_trimmed() {
    let map = CmpFile::decode(&RawMap::sample().bytes()).unwrap().model;
    let zone = &map.nav_zones()[0];
    assert_eq!(zone.rect(), (10, 20, 15, 25));
    assert_eq!(zone.name(), "Downtown");
    assert_eq!(zone.sam, 3);
}

#[test]
fn test_round_trip_is_byte_exact() {
    let bytes = RawMap::sample().bytes();
    let map = CmpFile::decode(&bytes).unwrap().model;
    let encoded = map.encode().unwrap();
    assert!(encoded.diagnostics.is_empty());
    assert_eq!(encoded.bytes, bytes);
}

#[test]
fn test_empty_sections_round_trip() {
    let raw = RawMap {
        grid: vec![0; 65_536],
        columns: Vec::new(),
        blocks: Vec::new(),
        objects: Vec::new(),
        routes: Vec::new(),
        nav: Vec::new(),
        trailing: Vec::new(),
        ..RawMap::sample()
    };
    let bytes = raw.bytes();
    let map = CmpFile::decode(&bytes).unwrap().model;
    assert!(map.columns().is_empty());
    assert_eq!(map.cell(0, 0), Some(GridCell::Empty(0)));
    assert_eq!(map.encode().unwrap().bytes, bytes);
}

#[test]
fn test_truncated_sections() {
    let bytes = RawMap::sample().bytes();

    let err = CmpFile::decode(&bytes[..20]).unwrap_err();
    assert!(matches!(err, CmpError::TruncatedInput { section: "header", .. }));

    let err = CmpFile::decode(&bytes[..1000]).unwrap_err();
    assert!(matches!(err, CmpError::TruncatedInput { section: "base", .. }));

    // Cut inside the navigation zones
    let err = CmpFile::decode(&bytes[..bytes.len() - 40]).unwrap_err();
    assert!(matches!(
        err,
        CmpError::TruncatedInput {
            section: "nav_zones",
            ..
        }
    ));
}

#[test]
fn test_misaligned_fixed_stride_sections() {
    let mut raw = RawMap::sample();
    raw.objects.push(0);
    let err = CmpFile::decode(&raw.bytes()).unwrap_err();
    assert!(matches!(err, CmpError::CorruptSection { section: "objects", .. }));

    let mut raw = RawMap::sample();
    raw.nav = nav_zone(1, 1, 1, 1, 1, "A");
    raw.nav.truncate(34);
    let err = CmpFile::decode(&raw.bytes()).unwrap_err();
    assert!(matches!(
        err,
        CmpError::CorruptSection {
            section: "nav_zones",
            ..
        }
    ));
}

#[test]
fn test_bad_column_height() {
    let mut raw = RawMap::sample();
    raw.columns[6] = 9;
    let err = CmpFile::decode(&raw.bytes()).unwrap_err();
    assert!(matches!(err, CmpError::CorruptSection { section: "columns", .. }));
}

#[test]
fn test_unaligned_offset_is_kept() {
    let mut raw = RawMap::sample();
    raw.grid[7] = 2;
    raw.grid[8] = 4;
    let bytes = raw.bytes();

    let decoded = CmpFile::decode(&bytes).unwrap();
    let diags: Vec<_> = decoded
        .diagnostics
        .with_code(DiagnosticCode::UnalignedColumnOffset)
        .collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].count, 2);

    let map = decoded.model;
    assert_eq!(map.cell(7, 0), Some(GridCell::Unaligned { column: 0, offset: 2 }));
    assert_eq!(map.cell(8, 0), Some(GridCell::Unaligned { column: 0, offset: 4 }));
    assert_eq!(map.encode().unwrap().bytes, bytes);
}
