//! Owned, mutable map editor

use std::ops::Range;

use gta_data::FieldValue;

use crate::block::Block;
use crate::column::Column;
use crate::error::{CmpError, Result};
use crate::grid::{GridCell, cell_index};
use crate::header::CmpHeader;
use crate::locations::Locations;
use crate::map::{CmpFile, MapSections};
use crate::nav::NavZone;
use crate::objects::ObjectPlacement;
use crate::routes::Route;
use crate::{MAX_LEVELS, fields};

/// Editor for a map.
///
/// Obtained from [`CmpFile::into_builder`] or [`MapBuilder::new`]. Grid
/// references to columns are kept consistent while columns are added and
/// removed; [`MapBuilder::build`] checks the remaining references and
/// freezes the result into a [`CmpFile`] that can be encoded.
///
/// # Examples
///
/// ```
/// use gta_cmp::{Block, Column, MapBuilder};
///
/// let mut builder = MapBuilder::new();
/// let road = builder.add_block(Block::default())?;
/// let column = builder.add_column(Column::from_blocks(vec![road]));
/// builder.set_column_at(10, 20, column)?;
///
/// let map = builder.build()?;
/// let stack = map.column_at(10, 20).unwrap();
/// assert_eq!(stack.height, 5);
/// # Ok::<(), gta_cmp::CmpError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    sections: MapSections,
}

impl MapBuilder {
    /// An empty map: no columns, blocks or objects, every cell empty
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_sections(sections: MapSections) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn with_style(mut self, style: u8) -> Self {
        self.sections.header.style = style;
        self
    }

    #[must_use]
    pub fn with_sample(mut self, sample: u8) -> Self {
        self.sections.header.sample = sample;
        self
    }

    pub fn header(&self) -> &CmpHeader {
        &self.sections.header
    }

    /// Header fields other than the section sizes are written as set here
    pub fn header_mut(&mut self) -> &mut CmpHeader {
        &mut self.sections.header
    }

    /// Append a block, returning its id
    pub fn add_block(&mut self, block: Block) -> Result<u16> {
        let id = u16::try_from(self.sections.blocks.len()).map_err(|_| {
            CmpError::InvalidReference {
                what: "block",
                index: self.sections.blocks.len(),
                len: usize::from(u16::MAX) + 1,
            }
        })?;
        self.sections.blocks.push(block);
        Ok(id)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.sections.blocks
    }

    pub fn block_mut(&mut self, id: u16) -> Option<&mut Block> {
        self.sections.blocks.get_mut(usize::from(id))
    }

    /// Append a column, returning its id
    pub fn add_column(&mut self, column: Column) -> usize {
        self.sections.columns.push(column);
        self.sections.columns.len() - 1
    }

    pub fn columns(&self) -> &[Column] {
        &self.sections.columns
    }

    pub fn column_mut(&mut self, id: usize) -> Option<&mut Column> {
        self.sections.columns.get_mut(id)
    }

    /// Remove a column. Cells showing it, or pointing inside it, become
    /// empty; cells on later columns are renumbered.
    pub fn remove_column(&mut self, id: usize) -> Result<Column> {
        if id >= self.sections.columns.len() {
            return Err(CmpError::InvalidReference {
                what: "column",
                index: id,
                len: self.sections.columns.len(),
            });
        }
        let removed = self.sections.columns.remove(id);
        let mut cleared = 0usize;
        for cell in &mut self.sections.grid {
            *cell = match *cell {
                GridCell::Column(c) if c == id => GridCell::default(),
                GridCell::Column(c) if c > id => GridCell::Column(c - 1),
                GridCell::Unaligned { column, .. } if column == id => {
                    cleared += 1;
                    GridCell::default()
                }
                GridCell::Unaligned { column, offset } if column > id => GridCell::Unaligned {
                    column: column - 1,
                    offset,
                },
                other => other,
            };
        }
        if cleared > 0 {
            log::warn!("{cleared} cells pointed inside removed column {id} and are now empty");
        }
        Ok(removed)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<GridCell> {
        cell_index(x, y).map(|i| self.sections.grid[i])
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: GridCell) -> Result<()> {
        let index = cell_index(x, y).ok_or(CmpError::OutOfBounds { x, y })?;
        if let Some(id) = cell.containing_column() {
            self.check_column(id)?;
        }
        self.sections.grid[index] = cell;
        Ok(())
    }

    pub fn set_column_at(&mut self, x: usize, y: usize, column: usize) -> Result<()> {
        self.set_cell(x, y, GridCell::Column(column))
    }

    /// Copy the cell at `source` over every cell in the rectangle.
    /// Returns the number of cells written.
    pub fn fill_region(
        &mut self,
        source: (usize, usize),
        xs: Range<usize>,
        ys: Range<usize>,
    ) -> Result<usize> {
        let cell = self.cell(source.0, source.1).ok_or(CmpError::OutOfBounds {
            x: source.0,
            y: source.1,
        })?;
        let mut written = 0;
        for y in ys {
            for x in xs.clone() {
                self.set_cell(x, y, cell)?;
                written += 1;
            }
        }
        log::debug!("filled {written} cells with {cell:?}");
        Ok(written)
    }

    pub fn add_object(&mut self, object: ObjectPlacement) -> &mut Self {
        self.sections.objects.push(object);
        self
    }

    pub fn objects_mut(&mut self) -> &mut Vec<ObjectPlacement> {
        &mut self.sections.objects
    }

    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.sections.routes.push(route);
        self
    }

    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.sections.routes
    }

    pub fn locations_mut(&mut self) -> &mut Locations {
        &mut self.sections.locations
    }

    pub fn add_nav_zone(&mut self, zone: NavZone) -> &mut Self {
        self.sections.nav_zones.push(zone);
        self
    }

    pub fn nav_zones_mut(&mut self) -> &mut Vec<NavZone> {
        &mut self.sections.nav_zones
    }

    /// Replace the bytes written after the navigation zones
    pub fn set_trailing(&mut self, bytes: Vec<u8>) {
        self.sections.trailing = bytes;
    }

    pub fn get_field(&self, path: &str) -> Result<FieldValue> {
        Ok(fields::table().get(&self.sections, path)?)
    }

    /// Set a field from its textual form, e.g. `("objects[2].remap", "130")`
    pub fn set_field(&mut self, path: &str, value: &str) -> Result<FieldValue> {
        Ok(fields::table().set(&mut self.sections, path, value)?)
    }

    fn check_column(&self, id: usize) -> Result<()> {
        if id >= self.sections.columns.len() {
            return Err(CmpError::InvalidReference {
                what: "column",
                index: id,
                len: self.sections.columns.len(),
            });
        }
        Ok(())
    }

    /// Check references and freeze the map.
    ///
    /// Every grid cell must name an existing column and no column may hold
    /// more than six blocks. Block ids inside columns are not checked; they
    /// resolve lazily through [`CmpFile::column_at`].
    pub fn build(self) -> Result<CmpFile> {
        for cell in &self.sections.grid {
            if let Some(id) = cell.containing_column() {
                self.check_column(id)?;
            }
        }
        for (index, column) in self.sections.columns.iter().enumerate() {
            if column.blockd.len() > MAX_LEVELS {
                return Err(CmpError::ColumnTooTall {
                    index,
                    levels: column.blockd.len(),
                });
            }
        }
        Ok(CmpFile::from_sections(self.sections))
    }
}
