//! Property tests over random styles

use gta_style::{
    Animation, Door, ObjectInfo, StyleBuilder, StyleFile, StyleVersion, VehicleInfo,
};
use proptest::prelude::*;

use crate::fixtures::RawStyle;

fn animations() -> impl Strategy<Value = Vec<Animation>> {
    prop::collection::vec(
        (any::<u8>(), 0u8..2, any::<u8>(), prop::collection::vec(any::<u8>(), 0..8)).prop_map(
            |(block, which, speed, frames)| Animation {
                block,
                which,
                speed,
                frames,
            },
        ),
        0..6,
    )
}

fn objects() -> impl Strategy<Value = Vec<ObjectInfo>> {
    prop::collection::vec(
        (any::<u32>(), any::<u16>(), 0u8..=9, prop::collection::vec(any::<u16>(), 0..4)).prop_map(
            |(width, spr_num, status, into)| ObjectInfo {
                width,
                spr_num,
                status,
                into,
                ..ObjectInfo::default()
            },
        ),
        0..6,
    )
}

fn vehicles() -> impl Strategy<Value = Vec<VehicleInfo>> {
    prop::collection::vec(
        (any::<i16>(), any::<u8>(), any::<[u8; 12]>(), prop::collection::vec(any::<[i16; 4]>(), 0..4))
            .prop_map(|(max_speed, vtype, remap8, doors)| VehicleInfo {
                max_speed,
                vtype,
                remap8,
                doors: doors
                    .into_iter()
                    .map(|[rpx, rpy, object, delta]| Door { rpx, rpy, object, delta })
                    .collect(),
                ..VehicleInfo::default()
            }),
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn metadata_survives_encoding(
        extended in any::<bool>(),
        anims in animations(),
        objs in objects(),
        cars in vehicles(),
    ) {
        let version = if extended { StyleVersion::Extended } else { StyleVersion::Legacy };
        let mut builder = StyleBuilder::new(version);
        for anim in anims {
            builder.add_animation(anim);
        }
        for info in objs {
            builder.add_object_info(info);
        }
        for car in cars {
            builder.add_vehicle(car);
        }
        let style = builder.build().unwrap();
        let encoded = style.encode().unwrap();

        let again = StyleFile::decode(&encoded.bytes).unwrap().model;
        prop_assert_eq!(&again.animations().entries, &style.animations().entries);
        prop_assert_eq!(again.object_info(), style.object_info());
        prop_assert_eq!(again.vehicles(), style.vehicles());
        prop_assert_eq!(again.encode().unwrap().bytes, encoded.bytes);
    }

    #[test]
    fn truncated_styles_fail_cleanly(extended in any::<bool>(), cut in any::<prop::sample::Index>()) {
        let bytes = if extended { RawStyle::extended().bytes() } else { RawStyle::legacy().bytes() };
        let cut = cut.index(bytes.len());
        // Either a model or an error; never a panic
        let _ = StyleFile::decode(&bytes[..cut]);
    }

    #[test]
    fn corrupted_bodies_fail_cleanly(
        extended in any::<bool>(),
        edits in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..16),
    ) {
        let mut bytes = if extended { RawStyle::extended().bytes() } else { RawStyle::legacy().bytes() };
        let header = if extended { 64 } else { 52 };
        let body = bytes.len() - header;
        for (at, value) in edits {
            bytes[header + at.index(body)] = value;
        }
        if let Ok(decoded) = StyleFile::decode(&bytes) {
            for sprite in 0..decoded.model.sprites().len() {
                let _ = decoded.model.render_sprite(sprite, None);
                let _ = decoded.model.render_variant(sprite, 0, None);
            }
        }
    }
}
