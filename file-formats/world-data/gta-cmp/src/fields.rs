//! Field paths over a map's sections.
//!
//! Paths follow the section layout: `header.style`, `base[y][x]`,
//! `columns[i].blockd[j]`, `blocks[i].slope`, `objects[i].remap`,
//! `routes[i].vertices[j].x`, `locations.hospital[k].z`,
//! `nav_zones[i].name` and so on. Section sizes under `header` are
//! read-only and always report the size the section would be written with.

use std::sync::LazyLock;

use gta_data::field::{AccessorTable, FieldError, FieldKind, FieldSpec, FieldValue, at, at_mut};
use gta_data::{FixedRecord, bool_field, int_field};

use crate::GRID_SIZE;
use crate::block::{Block, Directions, TerrainType};
use crate::grid::{GridCell, column_offsets};
use crate::locations::LocationGroup;
use crate::map::MapSections;
use crate::nav::{NAV_NAME_LEN, NavZone};
use crate::objects::ObjectPlacement;

type M = MapSections;

static TABLE: LazyLock<AccessorTable<M>> = LazyLock::new(build);

pub(crate) fn table() -> &'static AccessorTable<M> {
    &TABLE
}

fn limited(kind: FieldKind, spec: FieldSpec<M>) -> FieldSpec<M> {
    FieldSpec { kind, ..spec }
}

fn cell(y: usize, x: usize) -> Result<usize, FieldError> {
    for index in [y, x] {
        if index >= GRID_SIZE {
            return Err(FieldError::IndexOutOfRange {
                index,
                len: GRID_SIZE,
            });
        }
    }
    Ok(y * GRID_SIZE + x)
}

/// `base[y][x]` reads and writes column ids; -1 marks an empty cell
fn base_spec() -> FieldSpec<M> {
    FieldSpec {
        pattern: "base[][]",
        kind: FieldKind::int_range(-1, i64::from(u32::MAX)),
        get: |m: &M, i: &[usize]| -> Result<FieldValue, FieldError> {
            match m.grid[cell(i[0], i[1])?] {
                GridCell::Column(id) => Ok(FieldValue::Int(id as i64)),
                GridCell::Empty(_) => Ok(FieldValue::Int(-1)),
                GridCell::Unaligned { column, offset } => Err(FieldError::InvalidValue {
                    value: format!("{offset} bytes into column {column}"),
                    reason: "cell holds an offset that does not start a column".to_string(),
                }),
            }
        },
        set: Some(|m: &mut M, i: &[usize], v: &FieldValue| -> Result<(), FieldError> {
            let index = cell(i[0], i[1])?;
            let id = v.to_int::<i64>()?;
            m.grid[index] = if id < 0 {
                GridCell::default()
            } else {
                let id = id as usize;
                at(&m.columns, id)?;
                GridCell::Column(id)
            };
            Ok(())
        }),
    }
}

/// Raw grid offsets as they would be written
fn base_offset_spec() -> FieldSpec<M> {
    int_field!(M, "base_offset[][]", u32, |m, i| {
        match m.grid[cell(i[0], i[1])?] {
            GridCell::Column(id) => *at(&column_offsets(&m.columns), id)?,
            GridCell::Unaligned { column, offset } => *at(&column_offsets(&m.columns), column)? + offset,
            GridCell::Empty(raw) => raw,
        }
    })
}

fn nav_name_spec() -> FieldSpec<M> {
    FieldSpec {
        pattern: "nav_zones[].name",
        kind: FieldKind::Text {
            max_len: NAV_NAME_LEN,
        },
        get: |m: &M, i: &[usize]| -> Result<FieldValue, FieldError> {
            Ok(FieldValue::Text(at(&m.nav_zones, i[0])?.name()))
        },
        set: Some(|m: &mut M, i: &[usize], v: &FieldValue| -> Result<(), FieldError> {
            let name = v.to_text()?.to_string();
            at_mut(&mut m.nav_zones, i[0])?.set_name(&name);
            Ok(())
        }),
    }
}

macro_rules! location_fields {
    ($specs:ident, $($name:literal => $group:ident),* $(,)?) => {
        $(
            $specs.push(int_field!(
                M,
                concat!("locations.", $name, "[].x"),
                u8,
                |m, i| at(m.locations.group(LocationGroup::$group), i[0])?.x,
                |m, i, v| at_mut(m.locations.group_mut(LocationGroup::$group), i[0])?.x = v
            ));
            $specs.push(int_field!(
                M,
                concat!("locations.", $name, "[].y"),
                u8,
                |m, i| at(m.locations.group(LocationGroup::$group), i[0])?.y,
                |m, i, v| at_mut(m.locations.group_mut(LocationGroup::$group), i[0])?.y = v
            ));
            $specs.push(int_field!(
                M,
                concat!("locations.", $name, "[].z"),
                u8,
                |m, i| at(m.locations.group(LocationGroup::$group), i[0])?.z,
                |m, i, v| at_mut(m.locations.group_mut(LocationGroup::$group), i[0])?.z = v
            ));
        )*
    };
}

fn build() -> AccessorTable<M> {
    let mut specs = vec![
        int_field!(M, "header.version", u32, |m, _i| m.header.version, |m, _i, v| m.header.version = v),
        int_field!(M, "header.style", u8, |m, _i| m.header.style, |m, _i, v| m.header.style = v),
        int_field!(M, "header.sample", u8, |m, _i| m.header.sample, |m, _i, v| m.header.sample = v),
        int_field!(M, "header.reserved", u16, |m, _i| m.header.reserved, |m, _i, v| m.header.reserved = v),
        int_field!(M, "header.route_size", u32, |m, _i| {
            m.routes.iter().map(|r| r.packed_len() as u32).sum()
        }),
        int_field!(M, "header.object_pos_size", u32, |m, _i| (m.objects.len() * ObjectPlacement::SIZE) as u32),
        int_field!(M, "header.column_size", u32, |m, _i| {
            m.columns.iter().map(|c| c.packed_len() as u32).sum()
        }),
        int_field!(M, "header.block_size", u32, |m, _i| (m.blocks.len() * Block::SIZE) as u32),
        int_field!(M, "header.nav_data_size", u32, |m, _i| (m.nav_zones.len() * NavZone::SIZE) as u32),
        base_spec(),
        base_offset_spec(),
        int_field!(
            M,
            "columns[].height",
            u16,
            |m, i| at(&m.columns, i[0])?.height,
            |m, i, v| at_mut(&mut m.columns, i[0])?.height = v
        ),
        int_field!(
            M,
            "columns[].blockd[]",
            u16,
            |m, i| *at(&at(&m.columns, i[0])?.blockd, i[1])?,
            |m, i, v| *at_mut(&mut at_mut(&mut m.columns, i[0])?.blockd, i[1])? = v
        ),
        int_field!(
            M,
            "blocks[].type_map",
            u16,
            |m, i| at(&m.blocks, i[0])?.type_map,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.type_map = v
        ),
        int_field!(
            M,
            "blocks[].type_map_ext",
            u8,
            |m, i| at(&m.blocks, i[0])?.type_map_ext,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.type_map_ext = v
        ),
        int_field!(
            M,
            "blocks[].left",
            u8,
            |m, i| at(&m.blocks, i[0])?.left,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.left = v
        ),
        int_field!(
            M,
            "blocks[].right",
            u8,
            |m, i| at(&m.blocks, i[0])?.right,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.right = v
        ),
        int_field!(
            M,
            "blocks[].top",
            u8,
            |m, i| at(&m.blocks, i[0])?.top,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.top = v
        ),
        int_field!(
            M,
            "blocks[].bottom",
            u8,
            |m, i| at(&m.blocks, i[0])?.bottom,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.bottom = v
        ),
        int_field!(
            M,
            "blocks[].lid",
            u8,
            |m, i| at(&m.blocks, i[0])?.lid,
            |m, i, v| at_mut(&mut m.blocks, i[0])?.lid = v
        ),
        limited(
            FieldKind::int_range(0, 15),
            int_field!(
                M,
                "blocks[].directions",
                u8,
                |m, i| at(&m.blocks, i[0])?.directions().bits(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?
                    .set_directions(Directions::from_bits_truncate(v))
            ),
        ),
        limited(
            FieldKind::int_range(0, 7),
            int_field!(
                M,
                "blocks[].terrain",
                u8,
                |m, i| at(&m.blocks, i[0])?.terrain().to_bits(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?.set_terrain(TerrainType::from_bits(v))
            ),
        ),
        bool_field!(
            M,
            "blocks[].flat",
            |m, i| at(&m.blocks, i[0])?.is_flat(),
            |m, i, v| at_mut(&mut m.blocks, i[0])?.set_flat(v)
        ),
        limited(
            FieldKind::int_range(0, 63),
            int_field!(
                M,
                "blocks[].slope",
                u8,
                |m, i| at(&m.blocks, i[0])?.slope(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?.set_slope(v)
            ),
        ),
        limited(
            FieldKind::int_range(0, 3),
            int_field!(
                M,
                "blocks[].lid_rotation",
                u8,
                |m, i| at(&m.blocks, i[0])?.lid_rotation(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?.set_lid_rotation(v)
            ),
        ),
        limited(
            FieldKind::int_range(0, 7),
            int_field!(
                M,
                "blocks[].traffic_light",
                u8,
                |m, i| at(&m.blocks, i[0])?.traffic_light(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?.set_traffic_light(v)
            ),
        ),
        limited(
            FieldKind::int_range(0, 3),
            int_field!(
                M,
                "blocks[].lid_remap",
                u8,
                |m, i| at(&m.blocks, i[0])?.lid_remap(),
                |m, i, v| at_mut(&mut m.blocks, i[0])?.set_lid_remap(v)
            ),
        ),
        bool_field!(
            M,
            "blocks[].flip_vertical",
            |m, i| at(&m.blocks, i[0])?.flip_vertical(),
            |m, i, v| at_mut(&mut m.blocks, i[0])?.set_flip_vertical(v)
        ),
        bool_field!(
            M,
            "blocks[].flip_horizontal",
            |m, i| at(&m.blocks, i[0])?.flip_horizontal(),
            |m, i, v| at_mut(&mut m.blocks, i[0])?.set_flip_horizontal(v)
        ),
        bool_field!(
            M,
            "blocks[].railway",
            |m, i| at(&m.blocks, i[0])?.is_railway(),
            |m, i, v| at_mut(&mut m.blocks, i[0])?.set_railway(v)
        ),
        int_field!(
            M,
            "objects[].x",
            u16,
            |m, i| at(&m.objects, i[0])?.x,
            |m, i, v| at_mut(&mut m.objects, i[0])?.x = v
        ),
        int_field!(
            M,
            "objects[].y",
            u16,
            |m, i| at(&m.objects, i[0])?.y,
            |m, i, v| at_mut(&mut m.objects, i[0])?.y = v
        ),
        int_field!(
            M,
            "objects[].z",
            u16,
            |m, i| at(&m.objects, i[0])?.z,
            |m, i, v| at_mut(&mut m.objects, i[0])?.z = v
        ),
        int_field!(
            M,
            "objects[].type",
            u8,
            |m, i| at(&m.objects, i[0])?.object_type,
            |m, i, v| at_mut(&mut m.objects, i[0])?.object_type = v
        ),
        int_field!(
            M,
            "objects[].remap",
            u8,
            |m, i| at(&m.objects, i[0])?.remap,
            |m, i, v| at_mut(&mut m.objects, i[0])?.remap = v
        ),
        int_field!(
            M,
            "objects[].rotation",
            u16,
            |m, i| at(&m.objects, i[0])?.rotation,
            |m, i, v| at_mut(&mut m.objects, i[0])?.rotation = v
        ),
        int_field!(
            M,
            "objects[].pitch",
            u16,
            |m, i| at(&m.objects, i[0])?.pitch,
            |m, i, v| at_mut(&mut m.objects, i[0])?.pitch = v
        ),
        int_field!(
            M,
            "objects[].roll",
            u16,
            |m, i| at(&m.objects, i[0])?.roll,
            |m, i, v| at_mut(&mut m.objects, i[0])?.roll = v
        ),
        int_field!(
            M,
            "routes[].route_type",
            u8,
            |m, i| at(&m.routes, i[0])?.route_type,
            |m, i, v| at_mut(&mut m.routes, i[0])?.route_type = v
        ),
        int_field!(
            M,
            "routes[].vertices[].x",
            u8,
            |m, i| at(&at(&m.routes, i[0])?.vertices, i[1])?.x,
            |m, i, v| at_mut(&mut at_mut(&mut m.routes, i[0])?.vertices, i[1])?.x = v
        ),
        int_field!(
            M,
            "routes[].vertices[].y",
            u8,
            |m, i| at(&at(&m.routes, i[0])?.vertices, i[1])?.y,
            |m, i, v| at_mut(&mut at_mut(&mut m.routes, i[0])?.vertices, i[1])?.y = v
        ),
        int_field!(
            M,
            "routes[].vertices[].z",
            u8,
            |m, i| at(&at(&m.routes, i[0])?.vertices, i[1])?.z,
            |m, i, v| at_mut(&mut at_mut(&mut m.routes, i[0])?.vertices, i[1])?.z = v
        ),
        int_field!(
            M,
            "nav_zones[].x",
            u8,
            |m, i| at(&m.nav_zones, i[0])?.x,
            |m, i, v| at_mut(&mut m.nav_zones, i[0])?.x = v
        ),
        int_field!(
            M,
            "nav_zones[].y",
            u8,
            |m, i| at(&m.nav_zones, i[0])?.y,
            |m, i, v| at_mut(&mut m.nav_zones, i[0])?.y = v
        ),
        int_field!(
            M,
            "nav_zones[].w",
            u8,
            |m, i| at(&m.nav_zones, i[0])?.w,
            |m, i, v| at_mut(&mut m.nav_zones, i[0])?.w = v
        ),
        int_field!(
            M,
            "nav_zones[].h",
            u8,
            |m, i| at(&m.nav_zones, i[0])?.h,
            |m, i, v| at_mut(&mut m.nav_zones, i[0])?.h = v
        ),
        int_field!(
            M,
            "nav_zones[].sam",
            u8,
            |m, i| at(&m.nav_zones, i[0])?.sam,
            |m, i, v| at_mut(&mut m.nav_zones, i[0])?.sam = v
        ),
        nav_name_spec(),
    ];

    location_fields!(
        specs,
        "police_station" => PoliceStation,
        "hospital" => Hospital,
        "unused1" => Unused1,
        "unused2" => Unused2,
        "fire_station" => FireStation,
        "unused3" => Unused3,
    );

    AccessorTable::new(specs)
}
