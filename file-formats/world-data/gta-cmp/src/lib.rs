//! Reader and writer for GTA1 CMP map containers.
//!
//! A CMP file describes a 256×256 cell city. Each cell of the base grid
//! points at a column: a stack of up to six block ids. Blocks carry the
//! packed type map (traffic directions, terrain class, slope, lid rotation)
//! and the side/lid tile numbers drawn from the style file. After the block
//! table come object placements, routes, a fixed block of service
//! locations and the named navigation zones.
//!
//! ```text
//! header (28) | base u32[65536] | columns | blocks (8) | objects (16)
//!             | routes | locations (108) | nav zones (35) | trailing
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use gta_cmp::CmpFile;
//!
//! let bytes = std::fs::read("NYC.CMP")?;
//! let decoded = CmpFile::decode(&bytes)?;
//! for warning in &decoded.diagnostics {
//!     eprintln!("{warning}");
//! }
//!
//! let map = decoded.model;
//! println!("{}", map.area_name(32, 137));
//!
//! let mut builder = map.into_builder();
//! builder.set_field("objects[0].z", "128")?;
//! let encoded = builder.build()?.encode()?;
//! std::fs::write("NYC_EDIT.CMP", encoded.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod block;
pub mod builder;
pub mod column;
pub mod error;
mod fields;
pub mod grid;
pub mod header;
pub mod locations;
pub mod map;
pub mod nav;
pub mod objects;
mod parser;
pub mod routes;
mod writer;

pub use block::{Block, Directions, TerrainType, slope_deltas, slope_heights};
pub use builder::MapBuilder;
pub use column::Column;
pub use error::{CmpError, Result};
pub use grid::GridCell;
pub use header::{CMP_VERSION, CmpHeader};
pub use locations::{Location, LocationGroup, Locations};
pub use map::{BlockUsage, CellStack, CmpFile};
pub use nav::NavZone;
pub use objects::{ObjectKind, ObjectPlacement};
pub use routes::{Route, RoutePoint};

pub use gta_data::{Decoded, Diagnostic, DiagnosticCode, Diagnostics, Encoded, FieldValue};

/// Cells per grid side
pub const GRID_SIZE: usize = 256;

/// Cells in the base grid
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Levels in a column
pub const MAX_LEVELS: usize = 6;

/// Size of the location block
pub const LOCATION_BLOCK_SIZE: usize = 108;
