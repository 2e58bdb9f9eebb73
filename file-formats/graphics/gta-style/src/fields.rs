//! Field paths over a style's sections.
//!
//! Metadata is writable: `animations[i].speed`, `object_info[i].status`,
//! `vehicles[i].grip`, `vehicles[i].remap24[j][k]`,
//! `vehicles[i].doors[j].delta`, `sprite_numbers.car`. The header, the
//! sprite directory and the palette index are read-only views; header
//! values are as decoded.

use std::sync::LazyLock;

use gta_data::field::{AccessorTable, FieldError, at, at_mut};
use gta_data::int_field;

use crate::color::ColorData;
use crate::header::StyleHeader;
use crate::sprite_numbers::{SpriteCategory, SpriteNumbers};
use crate::style::StyleSections;

type M = StyleSections;

static TABLE: LazyLock<AccessorTable<M>> = LazyLock::new(build);

pub(crate) fn table() -> &'static AccessorTable<M> {
    &TABLE
}

fn only_in(layout: &str, field: &str) -> FieldError {
    FieldError::UnknownField(format!("{field} ({layout} styles only)"))
}

macro_rules! shared_header_fields {
    ($specs:ident, $($field:ident),* $(,)?) => {
        $(
            $specs.push(int_field!(
                M,
                concat!("header.", stringify!($field)),
                u32,
                |m, _i| m.header.$field()
            ));
        )*
    };
}

macro_rules! layout_header_fields {
    ($specs:ident, $variant:ident, $layout:literal, $($field:ident),* $(,)?) => {
        $(
            $specs.push(int_field!(M, concat!("header.", stringify!($field)), u32, |m, _i| {
                match &m.header {
                    StyleHeader::$variant(h) => h.$field,
                    _ => return Err(only_in($layout, stringify!($field))),
                }
            }));
        )*
    };
}

/// Writable scalar fields of records in a list
macro_rules! record_fields {
    ($specs:ident, $list:ident, $($field:ident: $ty:ty),* $(,)?) => {
        $(
            $specs.push(int_field!(
                M,
                concat!(stringify!($list), "[].", stringify!($field)),
                $ty,
                |m, i| at(&m.$list, i[0])?.$field,
                |m, i, v| at_mut(&mut m.$list, i[0])?.$field = v
            ));
        )*
    };
}

/// Read-only scalar fields of records in a list
macro_rules! view_fields {
    ($specs:ident, $list:ident, $($field:ident: $ty:ty),* $(,)?) => {
        $(
            $specs.push(int_field!(
                M,
                concat!(stringify!($list), "[].", stringify!($field)),
                $ty,
                |m, i| at(&m.$list, i[0])?.$field
            ));
        )*
    };
}

macro_rules! sprite_number_fields {
    ($specs:ident, $($name:literal => $category:ident),* $(,)?) => {
        $(
            $specs.push(int_field!(
                M,
                concat!("sprite_numbers.", $name),
                u16,
                |m, _i| m.sprite_numbers.map_or(0, |n| n.count(SpriteCategory::$category)),
                |m, _i, v| m
                    .sprite_numbers
                    .get_or_insert_with(SpriteNumbers::default)
                    .set_count(SpriteCategory::$category, v)
            ));
        )*
    };
}

fn build() -> AccessorTable<M> {
    let mut specs = Vec::new();

    shared_header_fields!(
        specs,
        version,
        side_size,
        lid_size,
        aux_size,
        anim_size,
        object_info_size,
        car_size,
        sprite_info_size,
        sprite_graphics_size,
        sprite_numbers_size,
    );
    layout_header_fields!(specs, Legacy, "GRY", palette_size, remap_size, remap_index_size);
    layout_header_fields!(
        specs,
        Extended,
        "G24",
        clut_size,
        tileclut_size,
        spriteclut_size,
        newcarclut_size,
        fontclut_size,
        palette_index_size,
    );

    specs.extend([
        int_field!(
            M,
            "animations[].block",
            u8,
            |m, i| at(&m.animations.entries, i[0])?.block,
            |m, i, v| at_mut(&mut m.animations.entries, i[0])?.block = v
        ),
        int_field!(
            M,
            "animations[].which",
            u8,
            |m, i| at(&m.animations.entries, i[0])?.which,
            |m, i, v| at_mut(&mut m.animations.entries, i[0])?.which = v
        ),
        int_field!(
            M,
            "animations[].speed",
            u8,
            |m, i| at(&m.animations.entries, i[0])?.speed,
            |m, i, v| at_mut(&mut m.animations.entries, i[0])?.speed = v
        ),
    ]);
    specs.push(int_field!(
        M,
        "animations[].frames[]",
        u8,
        |m, i| *at(&at(&m.animations.entries, i[0])?.frames, i[1])?,
        |m, i, v| *at_mut(&mut at_mut(&mut m.animations.entries, i[0])?.frames, i[1])? = v
    ));

    record_fields!(
        specs,
        object_info,
        width: u32,
        height: u32,
        depth: u32,
        spr_num: u16,
        weight: u16,
        aux: u16,
        status: u8,
    );
    specs.push(int_field!(
        M,
        "object_info[].into[]",
        u16,
        |m, i| *at(&at(&m.object_info, i[0])?.into, i[1])?,
        |m, i, v| *at_mut(&mut at_mut(&mut m.object_info, i[0])?.into, i[1])? = v
    ));

    record_fields!(
        specs,
        vehicles,
        width: i16,
        height: i16,
        depth: i16,
        spr_num: i16,
        weight: i16,
        max_speed: i16,
        min_speed: i16,
        acceleration: i16,
        braking: i16,
        grip: i16,
        handling: i16,
        vtype: u8,
        model: u8,
        turning: u8,
        damageable: u8,
        cx: i8,
        cy: i8,
        moment: i32,
        rbp_mass: i32,
        g1_thrust: i32,
        tyre_adhesion_x: i32,
        tyre_adhesion_y: i32,
        handbrake_friction: i32,
        footbrake_friction: i32,
        front_brake_bias: i32,
        turn_ratio: i16,
        drive_wheel_offset: i16,
        steering_wheel_offset: i16,
        back_end_slide_value: i32,
        handbrake_slide_value: i32,
        convertible: u8,
        engine: u8,
        radio: u8,
        horn: u8,
        sound_function: u8,
        fast_change_flag: u8,
    );
    specs.extend([
        int_field!(
            M,
            "vehicles[].remap24[][]",
            i16,
            |m, i| *at(at(&at(&m.vehicles, i[0])?.remap24, i[1])?, i[2])?,
            |m, i, v| *at_mut(at_mut(&mut at_mut(&mut m.vehicles, i[0])?.remap24, i[1])?, i[2])? = v
        ),
        int_field!(
            M,
            "vehicles[].remap8[]",
            u8,
            |m, i| *at(&at(&m.vehicles, i[0])?.remap8, i[1])?,
            |m, i, v| *at_mut(&mut at_mut(&mut m.vehicles, i[0])?.remap8, i[1])? = v
        ),
        int_field!(
            M,
            "vehicles[].value[]",
            u16,
            |m, i| *at(&at(&m.vehicles, i[0])?.value, i[1])?,
            |m, i, v| *at_mut(&mut at_mut(&mut m.vehicles, i[0])?.value, i[1])? = v
        ),
        int_field!(
            M,
            "vehicles[].doors[].rpx",
            i16,
            |m, i| at(&at(&m.vehicles, i[0])?.doors, i[1])?.rpx,
            |m, i, v| at_mut(&mut at_mut(&mut m.vehicles, i[0])?.doors, i[1])?.rpx = v
        ),
        int_field!(
            M,
            "vehicles[].doors[].rpy",
            i16,
            |m, i| at(&at(&m.vehicles, i[0])?.doors, i[1])?.rpy,
            |m, i, v| at_mut(&mut at_mut(&mut m.vehicles, i[0])?.doors, i[1])?.rpy = v
        ),
        int_field!(
            M,
            "vehicles[].doors[].object",
            i16,
            |m, i| at(&at(&m.vehicles, i[0])?.doors, i[1])?.object,
            |m, i, v| at_mut(&mut at_mut(&mut m.vehicles, i[0])?.doors, i[1])?.object = v
        ),
        int_field!(
            M,
            "vehicles[].doors[].delta",
            i16,
            |m, i| at(&at(&m.vehicles, i[0])?.doors, i[1])?.delta,
            |m, i, v| at_mut(&mut at_mut(&mut m.vehicles, i[0])?.doors, i[1])?.delta = v
        ),
    ]);

    sprite_number_fields!(
        specs,
        "arrow" => Arrow,
        "digits" => Digits,
        "boat" => Boat,
        "box" => Box,
        "bus" => Bus,
        "car" => Car,
        "object" => Object,
        "ped" => Ped,
        "speedo" => Speedo,
        "tank" => Tank,
        "traffic_lights" => TrafficLights,
        "train" => Train,
        "trdoors" => TrDoors,
        "bike" => Bike,
        "tram" => Tram,
        "wbus" => WBus,
        "wcar" => WCar,
        "ex" => Ex,
        "tumcar" => TumCar,
        "tumtruck" => TumTruck,
        "ferry" => Ferry,
    );

    view_fields!(
        specs,
        sprites,
        width: u8,
        height: u8,
        ws: u8,
        size: u16,
        clut: u16,
        ptr: u32,
    );
    specs.extend([
        int_field!(M, "sprites[].delta_count", u8, |m, i| {
            at(&m.sprites, i[0])?.deltas.len() as u8
        }),
        int_field!(M, "sprites[].deltas[].size", u16, |m, i| {
            at(&at(&m.sprites, i[0])?.deltas, i[1])?.size
        }),
        int_field!(M, "sprites[].deltas[].ptr", u32, |m, i| {
            at(&at(&m.sprites, i[0])?.deltas, i[1])?.ptr
        }),
        int_field!(M, "palette_index[]", u16, |m, i| match &m.colors {
            ColorData::Paged(c) => *at(&c.palette_index, i[0])?,
            ColorData::Legacy(_) => return Err(only_in("G24", "palette_index")),
        }),
        int_field!(M, "remap_index[]", u8, |m, i| match &m.colors {
            ColorData::Legacy(c) => *at(&c.remap_index, i[0])?,
            ColorData::Paged(_) => return Err(only_in("GRY", "remap_index")),
        }),
    ]);

    AccessorTable::new(specs)
}
