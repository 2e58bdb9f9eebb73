//! Reader and writer for GTA1 style containers.
//!
//! A style holds everything a city is drawn with: 64×64 tiles for block
//! sides and lids, tile animations, the colour data, object and vehicle
//! metadata, and the sprite directory with its atlas. Two layouts exist:
//!
//! - `.GRY` (version 290): one 6-bit palette seen through remap tables
//! - `.G24` (version 336): paged CLUTs addressed through a palette index
//!
//! ```text
//! header (52 | 64) | tiles | animations | palette + remaps | CLUT + index
//!                  | object info | vehicles | sprite info | sprite atlas
//!                  | sprite numbers | trailing
//! ```
//!
//! Decoding never fails on questionable data inside a well-formed section;
//! such findings come back as [`Diagnostics`] next to the model.
//!
//! # Examples
//!
//! ```no_run
//! use gta_style::{StyleFile, TileKind};
//!
//! let bytes = std::fs::read("STYLE001.G24")?;
//! let decoded = StyleFile::decode(&bytes)?;
//! for warning in &decoded.diagnostics {
//!     eprintln!("{warning}");
//! }
//!
//! let style = decoded.model;
//! let lid = style.render_tile(TileKind::Lid, 12, 0);
//! println!("{:?}", lid);
//!
//! let mut builder = style.into_builder();
//! builder.set_field("vehicles[0].max_speed", "250")?;
//! let encoded = builder.build()?.encode()?;
//! std::fs::write("STYLE001_EDIT.G24", encoded.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod animation;
pub mod builder;
pub mod color;
pub mod delta;
pub mod error;
#[cfg(feature = "image")]
pub mod export;
mod fields;
pub mod header;
pub mod object_info;
pub mod palette;
mod parser;
pub mod render;
pub mod sprite;
pub mod sprite_numbers;
pub mod style;
pub mod tiles;
pub mod vehicle;
mod writer;

pub use animation::{AnimFrame, AnimTarget, Animation, AnimationTable};
pub use builder::StyleBuilder;
pub use color::{ColorData, LegacyColors, PagedColors, Rgba};
pub use delta::apply_delta;
pub use error::{Result, StyleError};
#[cfg(feature = "image")]
pub use export::ExportError;
pub use header::{ExtendedHeader, G24_VERSION, GRY_VERSION, LegacyHeader, StyleHeader, StyleVersion};
pub use object_info::{ObjectInfo, ObjectStatus};
pub use palette::ClutRanges;
pub use render::Surface;
pub use sprite::{DeltaPatch, PagePosition, Sprite};
pub use sprite_numbers::{SpriteCategory, SpriteNumbers};
pub use style::StyleFile;
pub use tiles::{Tile, TileAtlas, TileKind};
pub use vehicle::{Door, VehicleInfo, VehicleType};

pub use gta_data::{Decoded, Diagnostic, DiagnosticCode, Diagnostics, Encoded, FieldKind, FieldValue};
