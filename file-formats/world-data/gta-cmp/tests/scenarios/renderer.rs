//! The queries a map viewer makes

use gta_cmp::{CmpFile, slope_heights};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::fixtures::RawMap;

fn sample_map() -> CmpFile {
    CmpFile::decode(&RawMap::sample().bytes()).unwrap().model
}

#[test]
fn test_stack_at_filled_cell() {
    let map = sample_map();
    let stack = map.column_at(3, 2).unwrap();
    assert_eq!(stack.height, 4);
    assert_eq!(stack.block_ids, vec![0, 1]);
    assert!(stack.block(0).unwrap().is_flat());
    assert_eq!(stack.block(1).unwrap().slope(), 41);
    assert!(stack.block(2).is_none());
}

#[test]
fn test_stack_at_empty_cell() {
    let map = sample_map();
    let stack = map.column_at(0, 0).unwrap();
    assert_eq!(stack.height, 6);
    assert!(stack.block_ids.is_empty());
    assert!(map.column_at(256, 0).is_none());
}

#[test]
fn test_missing_block_resolves_to_none() {
    let mut builder = sample_map().into_builder();
    builder.column_mut(1).unwrap().blockd[0] = 99;
    let map = builder.build().unwrap();
    let stack = map.column_at(4, 2).unwrap();
    assert_eq!(stack.block_ids, vec![99]);
    assert_eq!(stack.blocks, vec![None]);
}

#[test_case(12, 22, "Downtown" ; "inner zone wins")]
#[test_case(10, 20, "Downtown" ; "top left corner is inside")]
#[test_case(15, 25, "City" ; "far edge is outside")]
#[test_case(199, 199, "City" ; "outer zone")]
#[test_case(200, 5, "" ; "no zone")]
fn test_area_name(x: usize, y: usize, expected: &str) {
    assert_eq!(sample_map().area_name(x, y), expected);
}

#[test]
fn test_equal_zones_prefer_first() {
    let mut builder = sample_map().into_builder();
    builder.nav_zones_mut()[1] = gta_cmp::NavZone::new(10, 20, 5, 5, 0, "Shadow");
    let map = builder.build().unwrap();
    assert_eq!(map.area_name(11, 21), "Downtown");
}

#[test]
fn test_find_block() {
    let map = sample_map();
    let usage = map.find_block(2);
    assert_eq!(usage.columns, vec![(1, 0)]);
    assert_eq!(usage.cells, vec![(4, 2), (5, 2)]);

    let usage = map.find_block(1);
    assert_eq!(usage.columns, vec![(0, 1)]);
    assert_eq!(usage.cells, vec![(3, 2)]);

    assert_eq!(map.find_block(7), gta_cmp::BlockUsage::default());
}

#[test]
fn test_slope_layer() {
    let map = sample_map();
    let layer = map.slope_layer(1);
    assert_eq!(layer.len(), 65_536);
    assert_eq!(layer[2 * 256 + 3], 41);
    assert_eq!(layer.iter().filter(|&&s| s != 0).count(), 1);
}

#[test]
fn test_lid_heights_of_steep_ramp() {
    let map = sample_map();
    let ramp = map.column_at(3, 2).unwrap().block(1).copied().unwrap();
    assert_eq!(ramp.lid_heights(1.0), slope_heights(1.0, 41));
}
