//! Property tests over random maps

use gta_cmp::{CmpFile, Column, GridCell, MapBuilder, ObjectPlacement};
use proptest::prelude::*;

fn columns() -> impl Strategy<Value = Vec<Vec<u16>>> {
    prop::collection::vec(prop::collection::vec(0u16..32, 0..=6), 1..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn encoded_maps_decode_to_the_same_model(
        stacks in columns(),
        cells in prop::collection::vec((0usize..256, 0usize..256, any::<prop::sample::Index>()), 0..64),
        objects in prop::collection::vec(any::<(u16, u16, u16, u8)>(), 0..8),
    ) {
        let mut builder = MapBuilder::new();
        for stack in &stacks {
            builder.add_column(Column::from_blocks(stack.clone()));
        }
        for (x, y, column) in &cells {
            builder.set_column_at(*x, *y, column.index(stacks.len())).unwrap();
        }
        for (x, y, z, object_type) in objects {
            builder.add_object(ObjectPlacement { x, y, z, object_type, ..Default::default() });
        }
        let map = builder.build().unwrap();
        let encoded = map.encode().unwrap();
        prop_assert!(encoded.diagnostics.is_empty());

        let decoded = CmpFile::decode(&encoded.bytes).unwrap();
        prop_assert!(decoded.diagnostics.is_empty());
        let again = decoded.model;
        prop_assert_eq!(again.columns(), map.columns());
        prop_assert_eq!(again.objects(), map.objects());
        for (x, y, _) in &cells {
            prop_assert_eq!(again.cell(*x, *y), map.cell(*x, *y));
        }
        prop_assert_eq!(again.encode().unwrap().bytes, encoded.bytes);
    }

    #[test]
    fn column_heights_follow_block_count(
        stacks in columns(),
        edits in prop::collection::vec((any::<prop::sample::Index>(), 0usize..=6, any::<u16>()), 1..16),
    ) {
        let mut builder = MapBuilder::new();
        for stack in &stacks {
            builder.add_column(Column::from_blocks(stack.clone()));
        }
        for (column, len, height) in edits {
            let id = column.index(stacks.len());
            let column = builder.column_mut(id).unwrap();
            column.blockd.resize(len, 0);
            column.height = height;
        }
        let bytes = builder.build().unwrap().encode().unwrap().bytes;
        let map = CmpFile::decode(&bytes).unwrap().model;

        let mut offset = 0;
        for column in map.columns() {
            prop_assert!(column.is_consistent());
            prop_assert_eq!(usize::from(column.height) + column.blockd.len(), 6);
            offset += column.packed_len();
        }
        prop_assert_eq!(offset, map.header().column_size as usize);
        prop_assert!(map.grid().iter().all(|cell| matches!(cell, GridCell::Empty(_))));
    }
}
