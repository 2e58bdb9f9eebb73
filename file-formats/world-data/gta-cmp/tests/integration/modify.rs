//! Decode, edit, encode, decode again

use gta_cmp::{CmpError, CmpFile, DiagnosticCode, FieldValue, GridCell};
use pretty_assertions::assert_eq;

use crate::fixtures::{RawMap, column};

fn sample_map() -> CmpFile {
    CmpFile::decode(&RawMap::sample().bytes()).unwrap().model
}

fn reencode(map: CmpFile) -> (CmpFile, gta_cmp::Diagnostics) {
    let encoded = map.encode().unwrap();
    let decoded = CmpFile::decode(&encoded.bytes).unwrap();
    assert!(decoded.diagnostics.is_empty());
    (decoded.model, encoded.diagnostics)
}

#[test_log::test]
fn test_height_mismatch_is_repaired() {
    let mut builder = sample_map().into_builder();
    builder.column_mut(0).unwrap().height = 1;
    let map = builder.build().unwrap();

    let (map, diagnostics) = reencode(map);
    let mismatches: Vec<_> = diagnostics
        .with_code(DiagnosticCode::ColumnHeightMismatch)
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].location, "columns[0]");
    assert_eq!(map.columns()[0].height, 4);
}

#[test_log::test]
fn test_growing_a_column_moves_later_offsets() {
    let mut builder = sample_map().into_builder();
    builder.column_mut(0).unwrap().blockd.push(2);
    let map = builder.build().unwrap();

    let (map, diagnostics) = reencode(map);
    assert_eq!(map.header().column_size, 12);
    assert_eq!(map.cell(3, 2), Some(GridCell::Column(0)));
    assert_eq!(map.cell(4, 2), Some(GridCell::Column(1)));
    assert_eq!(map.column_at(3, 2).unwrap().block_ids, vec![0, 1, 2]);
    assert_eq!(map.column_at(3, 2).unwrap().height, 3);
    assert_eq!(map.column_at(5, 2).unwrap().block_ids, vec![2]);

    // The old sentinel 10 now lands inside the 12-byte column section
    assert!(diagnostics.has(DiagnosticCode::SentinelRelocated));
    assert_eq!(map.cell(0, 0), Some(GridCell::Empty(u32::MAX)));
    assert_eq!(map.column_at(0, 0).unwrap().block_ids, Vec::<u16>::new());
}

#[test]
fn test_shrinking_keeps_sentinel() {
    let mut builder = sample_map().into_builder();
    builder.column_mut(0).unwrap().blockd.pop();
    let (map, diagnostics) = reencode(builder.build().unwrap());

    // height was left at 4 for a single block
    let mismatches: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(mismatches, vec![DiagnosticCode::ColumnHeightMismatch]);
    assert_eq!(map.columns()[0].height, 5);
    assert_eq!(map.header().column_size, 8);
    assert_eq!(map.cell(0, 0), Some(GridCell::Empty(10)));
    assert_eq!(map.cell(5, 2), Some(GridCell::Column(1)));
}

#[test]
fn test_set_object_field() {
    let mut builder = sample_map().into_builder();
    assert_eq!(builder.set_field("objects[0].z", "128").unwrap(), FieldValue::Int(128));
    builder.set_field("objects[1].remap", "0x90").unwrap();
    let (map, _) = reencode(builder.build().unwrap());

    assert_eq!(map.objects()[0].world_position(), (10.0, 20.0, 2.0));
    assert_eq!(map.get_field("objects[1].remap").unwrap(), FieldValue::Int(0x90));
}

#[test]
fn test_set_nav_name_and_cell() {
    let mut builder = sample_map().into_builder();
    builder.set_field("nav_zones[1].name", "Liberty").unwrap();
    builder.set_field("base[0][0]", "1").unwrap();
    let (map, _) = reencode(builder.build().unwrap());

    assert_eq!(map.nav_zones()[1].name(), "Liberty");
    assert_eq!(map.area_name(100, 100), "Liberty");
    assert_eq!(map.cell(0, 0), Some(GridCell::Column(1)));
    assert_eq!(map.get_field("base_offset[0][0]").unwrap(), FieldValue::Int(6));
}

#[test]
fn test_nav_name_keeps_spaces() {
    let mut builder = sample_map().into_builder();
    builder.set_field("nav_zones[0].name", " Dock ").unwrap();
    let (map, _) = reencode(builder.build().unwrap());
    assert_eq!(map.nav_zones()[0].name(), " Dock ");
}

#[test]
fn test_rejected_edits() {
    let mut builder = sample_map().into_builder();
    assert!(matches!(
        builder.set_field("header.column_size", "0"),
        Err(CmpError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("objects[9].x", "1"),
        Err(CmpError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("objects[0].type", "256"),
        Err(CmpError::Field(_))
    ));
    assert!(matches!(
        builder.set_field("base[0][0]", "7"),
        Err(CmpError::Field(_))
    ));
    // Nothing above changed the map
    let bytes = RawMap::sample().bytes();
    assert_eq!(builder.build().unwrap().encode().unwrap().bytes, bytes);
}

#[test]
fn test_generate_fills_region() {
    let mut builder = sample_map().into_builder();
    let written = builder.fill_region((3, 2), 100..120, 100..120).unwrap();
    assert_eq!(written, 400);
    let (map, _) = reencode(builder.build().unwrap());

    assert_eq!(map.cell(100, 100), Some(GridCell::Column(0)));
    assert_eq!(map.cell(119, 119), Some(GridCell::Column(0)));
    assert_eq!(map.cell(120, 119), Some(GridCell::Empty(10)));
    assert_eq!(map.find_block(1).cells.len(), 401);
}

/// Two columns, `[1]` then `[5, 2]`, with cell (7, 0) pointing two bytes
/// into the second. Read from there, the column is height 5 over block 2.
fn unaligned_map() -> CmpFile {
    let mut raw = RawMap::sample();
    raw.columns = column(&[1]);
    raw.columns.extend(column(&[5, 2]));
    raw.grid = vec![10; 65_536];
    raw.grid[7] = 6;
    let decoded = CmpFile::decode(&raw.bytes()).unwrap();
    assert!(decoded.diagnostics.has(DiagnosticCode::UnalignedColumnOffset));
    decoded.model
}

fn decode_quietly(bytes: &[u8]) -> CmpFile {
    CmpFile::decode(bytes).unwrap().model
}

#[test]
fn test_unaligned_cell_reads_inside_column() {
    let map = unaligned_map();
    assert_eq!(map.cell(7, 0), Some(GridCell::Unaligned { column: 1, offset: 2 }));
    let stack = map.column_at(7, 0).unwrap();
    assert_eq!((stack.height, stack.block_ids), (5, vec![2]));
    assert_eq!(map.get_field("base_offset[0][7]").unwrap(), FieldValue::Int(6));
}

#[test]
fn test_removing_earlier_column_rebases_unaligned_cell() {
    let mut builder = unaligned_map().into_builder();
    builder.remove_column(0).unwrap();
    let encoded = builder.build().unwrap().encode().unwrap();
    assert!(encoded.diagnostics.is_empty());

    let map = decode_quietly(&encoded.bytes);
    assert_eq!(map.cell(7, 0), Some(GridCell::Unaligned { column: 0, offset: 2 }));
    assert_eq!(map.column_at(7, 0).unwrap().block_ids, vec![2]);
}

#[test]
fn test_growing_earlier_column_rebases_unaligned_cell() {
    let mut builder = unaligned_map().into_builder();
    builder.column_mut(0).unwrap().blockd.push(3);
    let encoded = builder.build().unwrap().encode().unwrap();

    let map = decode_quietly(&encoded.bytes);
    assert_eq!(map.get_field("base_offset[0][7]").unwrap(), FieldValue::Int(8));
    assert_eq!(map.column_at(7, 0).unwrap().block_ids, vec![2]);
}

#[test]
fn test_removing_containing_column_empties_cell() {
    let mut builder = unaligned_map().into_builder();
    builder.remove_column(1).unwrap();
    assert_eq!(builder.cell(7, 0), Some(GridCell::default()));

    let map = builder.build().unwrap();
    assert_eq!(map.column_at(7, 0).unwrap().block_ids, Vec::<u16>::new());
}

#[test]
fn test_shrinking_containing_column_reports_stale_offset() {
    let mut builder = unaligned_map().into_builder();
    *builder.column_mut(1).unwrap() = gta_cmp::Column::from_blocks(Vec::new());
    let encoded = builder.build().unwrap().encode().unwrap();

    let stale: Vec<_> = encoded
        .diagnostics
        .with_code(DiagnosticCode::StaleColumnOffset)
        .collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].location, "base");

    let map = decode_quietly(&encoded.bytes);
    assert_eq!(map.cell(7, 0), Some(GridCell::Empty(u32::MAX)));
}
