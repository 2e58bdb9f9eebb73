//! The decoded map and its read-only queries

use custom_debug::Debug;
use gta_data::debug::{byte_len_fmt, trimmed_collection_fmt};
use gta_data::{Decoded, Encoded, FieldKind, FieldValue};

use crate::block::Block;
use crate::builder::MapBuilder;
use crate::column::Column;
use crate::error::Result;
use crate::grid::{GridCell, PackedColumns, cell_index};
use crate::header::CmpHeader;
use crate::locations::Locations;
use crate::nav::NavZone;
use crate::objects::ObjectPlacement;
use crate::routes::Route;
use crate::{GRID_CELLS, GRID_SIZE, fields, parser, writer};

/// Every section of a map, shared by [`CmpFile`] and [`MapBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MapSections {
    pub(crate) header: CmpHeader,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) grid: Vec<GridCell>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) columns: Vec<Column>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) blocks: Vec<Block>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) objects: Vec<ObjectPlacement>,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) routes: Vec<Route>,
    pub(crate) locations: Locations,
    #[debug(with = trimmed_collection_fmt)]
    pub(crate) nav_zones: Vec<NavZone>,
    #[debug(with = byte_len_fmt)]
    pub(crate) trailing: Vec<u8>,
}

impl Default for MapSections {
    fn default() -> Self {
        Self {
            header: CmpHeader::default(),
            grid: vec![GridCell::default(); GRID_CELLS],
            columns: Vec::new(),
            blocks: Vec::new(),
            objects: Vec::new(),
            routes: Vec::new(),
            locations: Locations::default(),
            nav_zones: Vec::new(),
            trailing: Vec::new(),
        }
    }
}

/// The contents of one map cell, ready for drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStack {
    /// Empty levels above the stack
    pub height: u16,
    pub block_ids: Vec<u16>,
    /// Resolved blocks, bottom first. `None` where an id is past the block table.
    pub blocks: Vec<Option<Block>>,
}

impl CellStack {
    fn empty() -> Self {
        Self {
            height: crate::MAX_LEVELS as u16,
            block_ids: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Block at level `z`, counted from the bottom of the stack
    pub fn block(&self, z: usize) -> Option<&Block> {
        self.blocks.get(z)?.as_ref()
    }
}

/// Where a block id is used
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockUsage {
    /// `(column, level)` pairs
    pub columns: Vec<(usize, usize)>,
    /// `(x, y)` of every cell showing one of those columns
    pub cells: Vec<(usize, usize)>,
}

/// A decoded CMP map.
///
/// `CmpFile` is read-only; edits go through [`MapBuilder`], obtained with
/// [`CmpFile::into_builder`], and come back through [`MapBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmpFile {
    pub(crate) sections: MapSections,
    packed: PackedColumns,
}

impl CmpFile {
    pub(crate) fn from_sections(sections: MapSections) -> Self {
        let packed = PackedColumns::pack(&sections.columns);
        Self { sections, packed }
    }

    /// Parse a whole CMP file
    pub fn decode(bytes: &[u8]) -> Result<Decoded<Self>> {
        parser::decode(bytes)
    }

    /// Serialize the map. Section sizes and column heights are recomputed.
    pub fn encode(&self) -> Result<Encoded> {
        writer::encode(&self.sections)
    }

    pub fn into_builder(self) -> MapBuilder {
        MapBuilder::from_sections(self.sections)
    }

    /// Header as decoded. Size fields may be stale after a rebuild; see
    /// [`CmpFile::encode`].
    pub fn header(&self) -> &CmpHeader {
        &self.sections.header
    }

    /// All 65,536 cells, row-major
    pub fn grid(&self) -> &[GridCell] {
        &self.sections.grid
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<GridCell> {
        cell_index(x, y).map(|i| self.sections.grid[i])
    }

    pub fn columns(&self) -> &[Column] {
        &self.sections.columns
    }

    pub fn blocks(&self) -> &[Block] {
        &self.sections.blocks
    }

    pub fn objects(&self) -> &[ObjectPlacement] {
        &self.sections.objects
    }

    pub fn routes(&self) -> &[Route] {
        &self.sections.routes
    }

    pub fn locations(&self) -> &Locations {
        &self.sections.locations
    }

    pub fn nav_zones(&self) -> &[NavZone] {
        &self.sections.nav_zones
    }

    /// Bytes found after the navigation section
    pub fn trailing(&self) -> &[u8] {
        &self.sections.trailing
    }

    /// The packed column section
    pub fn column_blob(&self) -> &[u8] {
        &self.packed.bytes
    }

    /// Height and blocks of the cell at `(x, y)`.
    ///
    /// Empty cells report six empty levels and no blocks. Returns `None`
    /// outside the grid.
    pub fn column_at(&self, x: usize, y: usize) -> Option<CellStack> {
        let cell = self.sections.grid[cell_index(x, y)?];
        let column = match cell {
            GridCell::Column(id) => self.sections.columns.get(id).cloned(),
            _ => self.packed.read(cell),
        };
        Some(match column {
            Some(column) => CellStack {
                blocks: column
                    .blockd
                    .iter()
                    .map(|&id| self.sections.blocks.get(usize::from(id)).copied())
                    .collect(),
                height: column.height,
                block_ids: column.blockd,
            },
            None => CellStack::empty(),
        })
    }

    /// The smallest navigation zone containing `(x, y)`. Ties go to the
    /// zone stored first.
    pub fn zone_at(&self, x: usize, y: usize) -> Option<&NavZone> {
        self.sections
            .nav_zones
            .iter()
            .filter(|zone| zone.contains(x, y))
            .fold(None, |best: Option<&NavZone>, zone| match best {
                Some(b) if b.area() <= zone.area() => Some(b),
                _ => Some(zone),
            })
    }

    /// Name of the area at `(x, y)`, empty when no zone covers it
    pub fn area_name(&self, x: usize, y: usize) -> String {
        self.zone_at(x, y).map(NavZone::name).unwrap_or_default()
    }

    /// Columns and cells that use `block`
    pub fn find_block(&self, block: u16) -> BlockUsage {
        let mut usage = BlockUsage::default();
        let mut hit = vec![false; self.sections.columns.len()];
        for (id, column) in self.sections.columns.iter().enumerate() {
            for (level, _) in column.blockd.iter().enumerate().filter(|(_, b)| **b == block) {
                usage.columns.push((id, level));
                hit[id] = true;
            }
        }
        for (i, cell) in self.sections.grid.iter().enumerate() {
            if let GridCell::Column(id) = *cell
                && hit.get(id).copied().unwrap_or(false)
            {
                usage.cells.push((i % GRID_SIZE, i / GRID_SIZE));
            }
        }
        usage
    }

    /// Slope type of every cell at level `z`, row-major. Cells without a
    /// block at that level read as 0.
    pub fn slope_layer(&self, z: usize) -> Vec<u8> {
        let mut layer = Vec::with_capacity(GRID_CELLS);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let slope = self
                    .column_at(x, y)
                    .and_then(|stack| stack.block(z).map(Block::slope))
                    .unwrap_or(0);
                layer.push(slope);
            }
        }
        layer
    }

    /// Read a field by path, e.g. `objects[3].x` or `nav_zones[0].name`
    pub fn get_field(&self, path: &str) -> Result<FieldValue> {
        Ok(fields::table().get(&self.sections, path)?)
    }

    /// Every addressable field pattern with its kind and writability
    pub fn field_patterns() -> Vec<(&'static str, FieldKind, bool)> {
        fields::table()
            .specs()
            .iter()
            .map(|spec| (spec.pattern, spec.kind, spec.set.is_some()))
            .collect()
    }
}
