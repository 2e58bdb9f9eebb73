//! CMP decoding

use gta_data::{Decoded, DiagnosticCode, Diagnostics, SectionReader};

use crate::GRID_CELLS;
use crate::column::Column;
use crate::error::Result;
use crate::grid::GridCell;
use crate::header::CmpHeader;
use crate::locations::Locations;
use crate::map::{CmpFile, MapSections};
use crate::routes::Route;

/// Parse a CMP file.
///
/// Sections are read in file order: header, base grid, columns, blocks,
/// objects, routes, locations, navigation zones. Anything after the
/// navigation zones is kept verbatim.
pub(crate) fn decode(bytes: &[u8]) -> Result<Decoded<CmpFile>> {
    let mut diagnostics = Diagnostics::new();
    let mut reader = SectionReader::new(bytes);

    let header: CmpHeader = reader.read_record("header")?;
    header.validate()?;
    log::debug!("{:?}", header);

    log::debug!("base grid at offset {}", reader.offset());
    let raw_grid = reader.read_u32_array("base", GRID_CELLS)?;

    log::debug!("columns at offset {}", reader.offset());
    let mut column_reader = reader.section("columns", header.column_size as usize)?;
    let (columns, offsets) = read_columns(&mut column_reader)?;
    log::debug!("{} columns", columns.len());

    let grid = resolve_grid(&raw_grid, &offsets, header.column_size as usize, &mut diagnostics);

    log::debug!("blocks at offset {}", reader.offset());
    let blocks = reader
        .section("blocks", header.block_size as usize)?
        .read_records("blocks")?;

    log::debug!("objects at offset {}", reader.offset());
    let objects = reader
        .section("objects", header.object_pos_size as usize)?
        .read_records("objects")?;

    log::debug!("routes at offset {}", reader.offset());
    let routes = Route::read_all(&mut reader.section("routes", header.route_size as usize)?)?;

    log::debug!("locations at offset {}", reader.offset());
    let locations = Locations::read(&mut reader)?;

    log::debug!("navigation zones at offset {}", reader.offset());
    let nav_zones = reader
        .section("nav_zones", header.nav_data_size as usize)?
        .read_records("nav_zones")?;

    let trailing = reader.take_rest().to_vec();
    if !trailing.is_empty() {
        log::debug!("{} trailing bytes", trailing.len());
    }

    let sections = MapSections {
        header,
        grid,
        columns,
        blocks,
        objects,
        routes,
        locations,
        nav_zones,
        trailing,
    };
    Ok(Decoded::new(CmpFile::from_sections(sections), diagnostics))
}

/// Walk the column blob front to back, recording where each column starts
fn read_columns(reader: &mut SectionReader<'_>) -> Result<(Vec<Column>, Vec<u32>)> {
    let mut columns = Vec::new();
    let mut offsets = Vec::new();
    while !reader.is_empty() {
        offsets.push(reader.position() as u32);
        columns.push(Column::read(reader)?);
    }
    Ok((columns, offsets))
}

fn resolve_grid(
    raw: &[u32],
    offsets: &[u32],
    blob_len: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<GridCell> {
    raw.iter()
        .enumerate()
        .map(|(i, &value)| {
            let cell = GridCell::resolve(value, offsets, blob_len);
            if let GridCell::Unaligned { column, offset } = cell {
                diagnostics.push(
                    DiagnosticCode::UnalignedColumnOffset,
                    "base",
                    format!(
                        "cell ({}, {}) points at offset {value}, {offset} bytes into column {column}",
                        i % 256,
                        i / 256
                    ),
                );
            }
            cell
        })
        .collect()
}
