//! Maps built from nothing

use gta_cmp::{
    Block, CmpFile, Column, Directions, GridCell, LocationGroup, MapBuilder, NavZone,
    ObjectPlacement, Route, RoutePoint, TerrainType,
};
use pretty_assertions::assert_eq;

fn road(directions: Directions) -> Block {
    let mut block = Block::default();
    block.set_terrain(TerrainType::Road);
    block.set_directions(directions);
    block.set_flat(true);
    block.lid = 12;
    block
}

#[test]
fn test_build_small_city() {
    let mut builder = MapBuilder::new().with_style(2).with_sample(3);
    let north = builder.add_block(road(Directions::UP)).unwrap();
    let east = builder.add_block(road(Directions::RIGHT)).unwrap();
    let wall = {
        let mut block = Block::default();
        block.set_terrain(TerrainType::Building);
        block.left = 4;
        block.right = 4;
        builder.add_block(block).unwrap()
    };

    let street = builder.add_column(Column::from_blocks(vec![north]));
    let tower = builder.add_column(Column::from_blocks(vec![east, wall, wall, wall]));
    for y in 0..10 {
        builder.set_column_at(50, y, street).unwrap();
    }
    builder.set_column_at(51, 0, tower).unwrap();

    let mut car = ObjectPlacement::default();
    car.set_world_position(50.5, 2.0, 1.0);
    car.remap = 130;
    builder.add_object(car).add_route(Route {
        route_type: 1,
        vertices: vec![RoutePoint { x: 50, y: 0, z: 1 }, RoutePoint { x: 50, y: 9, z: 1 }],
    });
    builder.locations_mut().group_mut(LocationGroup::Hospital)[0].x = 51;
    builder.add_nav_zone(NavZone::new(48, 0, 6, 12, 2, "Harbour"));

    let encoded = builder.build().unwrap().encode().unwrap();
    assert!(encoded.diagnostics.is_empty());

    let map = CmpFile::decode(&encoded.bytes).unwrap().model;
    assert_eq!(map.header().style, 2);
    assert_eq!(map.header().sample, 3);
    assert_eq!(map.header().column_size, 4 + 10);
    assert_eq!(map.header().block_size, 24);

    let stack = map.column_at(51, 0).unwrap();
    assert_eq!(stack.height, 2);
    assert_eq!(stack.block(0).unwrap().directions(), Directions::RIGHT);
    assert_eq!(stack.block(3).unwrap().terrain(), TerrainType::Building);

    assert_eq!(map.cell(50, 9), Some(GridCell::Column(0)));
    assert_eq!(map.objects()[0].world_position(), (50.5, 2.0, 1.0));
    assert!(map.objects()[0].is_vehicle());
    assert_eq!(map.locations().group(LocationGroup::Hospital)[0].x, 51);
    assert_eq!(map.area_name(50, 11), "Harbour");
    assert_eq!(map.area_name(50, 12), "");
}

#[test]
fn test_empty_builder_encodes() {
    let map = MapBuilder::new().build().unwrap();
    let bytes = map.encode().unwrap().bytes;
    assert_eq!(bytes.len(), 28 + 65_536 * 4 + 108);

    let decoded = CmpFile::decode(&bytes).unwrap();
    assert!(decoded.diagnostics.is_empty());
    assert_eq!(decoded.model.header().version, gta_cmp::CMP_VERSION);
    assert!(decoded.model.grid().iter().all(|cell| cell.column().is_none()));
}

#[test]
fn test_remove_column_then_encode() {
    let mut builder = MapBuilder::new();
    let a = builder.add_column(Column::from_blocks(vec![0]));
    let b = builder.add_column(Column::from_blocks(vec![0, 0]));
    builder.set_column_at(0, 0, a).unwrap();
    builder.set_column_at(1, 0, b).unwrap();
    builder.remove_column(a).unwrap();

    let map = CmpFile::decode(&builder.build().unwrap().encode().unwrap().bytes)
        .unwrap()
        .model;
    assert_eq!(map.columns().len(), 1);
    assert_eq!(map.cell(1, 0), Some(GridCell::Column(0)));
    assert_eq!(map.cell(0, 0).and_then(GridCell::column), None);
}
