//! CMP encoding

use gta_data::io_ext::{write_record, write_records};
use gta_data::{DiagnosticCode, Diagnostics, Encoded, FixedRecord, WriteExt};

use crate::block::Block;
use crate::error::{CmpError, Result};
use crate::grid::{EMPTY_SENTINEL, GridCell, PackedColumns};
use crate::header::CmpHeader;
use crate::map::MapSections;
use crate::nav::NavZone;
use crate::objects::ObjectPlacement;
use crate::{GRID_CELLS, LOCATION_BLOCK_SIZE, MAX_LEVELS};

fn section_len(section: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CmpError::Encode {
        section,
        message: format!("{len} bytes do not fit a u32 size"),
    })
}

/// Pack every section and prepend a header whose sizes match them
pub(crate) fn encode(sections: &MapSections) -> Result<Encoded> {
    let mut diagnostics = Diagnostics::new();

    for (index, column) in sections.columns.iter().enumerate() {
        if column.blockd.len() > MAX_LEVELS {
            return Err(CmpError::ColumnTooTall {
                index,
                levels: column.blockd.len(),
            });
        }
        if !column.is_consistent() {
            diagnostics.push(
                DiagnosticCode::ColumnHeightMismatch,
                format!("columns[{index}]"),
                format!(
                    "height {} != 6 - {} blocks, writing {}",
                    column.height,
                    column.blockd.len(),
                    MAX_LEVELS - column.blockd.len()
                ),
            );
        }
    }

    let packed = PackedColumns::pack(&sections.columns);
    let columns = &packed.bytes;
    let column_start = |id: usize| {
        packed.offsets.get(id).copied().ok_or(CmpError::InvalidReference {
            what: "column",
            index: id,
            len: packed.offsets.len(),
        })
    };
    let mut grid = Vec::with_capacity(GRID_CELLS * 4);
    for (i, cell) in sections.grid.iter().enumerate() {
        let raw = match *cell {
            GridCell::Column(id) => column_start(id)?,
            GridCell::Unaligned { column, offset } => {
                let start = column_start(column)?;
                let len = sections.columns[column].packed_len();
                if (offset as usize) < len {
                    start + offset
                } else {
                    diagnostics.push(
                        DiagnosticCode::StaleColumnOffset,
                        "base",
                        format!(
                            "cell ({}, {}) pointed {offset} bytes into column {column}, which is now {len} bytes; writing it empty",
                            i % 256,
                            i / 256
                        ),
                    );
                    EMPTY_SENTINEL
                }
            }
            GridCell::Empty(sentinel) if (sentinel as usize) < columns.len() => {
                diagnostics.push(
                    DiagnosticCode::SentinelRelocated,
                    "base",
                    format!(
                        "empty cell ({}, {}) sentinel {sentinel} now falls inside the column section",
                        i % 256,
                        i / 256
                    ),
                );
                EMPTY_SENTINEL
            }
            GridCell::Empty(sentinel) => sentinel,
        };
        grid.put_u32_le(raw);
    }

    let mut blocks = Vec::with_capacity(sections.blocks.len() * Block::SIZE);
    write_records(&mut blocks, "blocks", &sections.blocks)?;

    let mut objects = Vec::with_capacity(sections.objects.len() * ObjectPlacement::SIZE);
    write_records(&mut objects, "objects", &sections.objects)?;

    let mut routes = Vec::new();
    for route in &sections.routes {
        route.write(&mut routes)?;
    }

    let mut locations = Vec::with_capacity(LOCATION_BLOCK_SIZE);
    sections.locations.write(&mut locations);

    let mut nav_zones = Vec::with_capacity(sections.nav_zones.len() * NavZone::SIZE);
    write_records(&mut nav_zones, "nav_zones", &sections.nav_zones)?;

    let header = CmpHeader {
        route_size: section_len("routes", routes.len())?,
        object_pos_size: section_len("objects", objects.len())?,
        column_size: section_len("columns", columns.len())?,
        block_size: section_len("blocks", blocks.len())?,
        nav_data_size: section_len("nav_zones", nav_zones.len())?,
        ..sections.header
    };

    let mut out = Vec::with_capacity(header.declared_len()? + sections.trailing.len());
    write_record(&mut out, "header", &header)?;
    for part in [
        &grid,
        columns,
        &blocks,
        &objects,
        &routes,
        &locations,
        &nav_zones,
        &sections.trailing,
    ] {
        out.extend_from_slice(part);
    }

    Ok(Encoded::new(out, diagnostics))
}
