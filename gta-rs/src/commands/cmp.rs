//! CMP map command implementations

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use console::style;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gta_cmp::{CmpFile, GRID_SIZE, GridCell, ObjectKind};

use crate::cli::OutputOptions;
use crate::utils::{
    add_table_row, create_table, edit_target, format_bytes, parse_assignment, parse_point,
    print_json, read_input, report_diagnostics, write_output,
};

#[derive(Subcommand)]
pub enum CmpCommands {
    /// Display header and section summary of a CMP file
    Info {
        /// Path to the CMP file
        file: PathBuf,
    },

    /// List the block table with decoded type bits
    Blocks {
        /// Path to the CMP file
        file: PathBuf,

        /// Only show the first N blocks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List object placements
    Objects {
        /// Path to the CMP file
        file: PathBuf,
    },

    /// List routes and their vertices
    Routes {
        /// Path to the CMP file
        file: PathBuf,
    },

    /// List used police, hospital and fire station slots
    Locations {
        /// Path to the CMP file
        file: PathBuf,
    },

    /// List navigation zones, or name the area at a cell
    Nav {
        /// Path to the CMP file
        file: PathBuf,

        /// Cell to look up, as x,y
        #[arg(long, value_name = "X,Y")]
        at: Option<String>,
    },

    /// Show which columns and cells use a block
    FindBlock {
        /// Path to the CMP file
        file: PathBuf,

        /// Block id
        block: u16,
    },

    /// Summarize slope types at one level, optionally writing a PNG map
    Slopes {
        /// Path to the CMP file
        file: PathBuf,

        /// Level, counted from the bottom of each column
        #[arg(short, long, default_value_t = 0)]
        z: usize,

        /// Write the 256×256 slope map as a grayscale PNG
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read a field, or list every field path when none is given
    Get {
        /// Path to the CMP file
        file: PathBuf,

        /// Field path, e.g. objects[3].x or nav_zones[0].name
        path: Option<String>,
    },

    /// Set one or more fields and write the map back
    Set {
        /// Path to the CMP file
        file: PathBuf,

        /// Assignments of the form path=value
        #[arg(required = true)]
        assignments: Vec<String>,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy one cell's column over a rectangle of cells
    Fill {
        /// Path to the CMP file
        file: PathBuf,

        /// Cell to copy from, as x,y
        #[arg(long, value_name = "X,Y")]
        from: String,

        /// First cell of the rectangle, as x,y
        #[arg(long, value_name = "X,Y")]
        start: String,

        /// Last cell of the rectangle (inclusive), as x,y
        #[arg(long, value_name = "X,Y")]
        end: String,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: CmpCommands, output: OutputOptions) -> Result<()> {
    match command {
        CmpCommands::Info { file } => execute_info(&file, output),
        CmpCommands::Blocks { file, limit } => execute_blocks(&file, limit, output),
        CmpCommands::Objects { file } => execute_objects(&file, output),
        CmpCommands::Routes { file } => execute_routes(&file, output),
        CmpCommands::Locations { file } => execute_locations(&file, output),
        CmpCommands::Nav { file, at } => execute_nav(&file, at.as_deref(), output),
        CmpCommands::FindBlock { file, block } => execute_find_block(&file, block, output),
        CmpCommands::Slopes {
            file,
            z,
            output: png,
        } => execute_slopes(&file, z, png, output),
        CmpCommands::Get { file, path } => execute_get(&file, path.as_deref(), output),
        CmpCommands::Set {
            file,
            assignments,
            output: target,
        } => execute_set(&file, &assignments, target, output),
        CmpCommands::Fill {
            file,
            from,
            start,
            end,
            output: target,
        } => execute_fill(&file, &from, &start, &end, target, output),
    }
}

fn load(path: &Path, output: OutputOptions) -> Result<CmpFile> {
    let bytes = read_input(path)?;
    let decoded = CmpFile::decode(&bytes)
        .with_context(|| format!("Failed to parse CMP file: {}", path.display()))?;
    report_diagnostics(&decoded.diagnostics, output);
    Ok(decoded.model)
}

fn save(map: &CmpFile, path: &Path, output: OutputOptions) -> Result<()> {
    let encoded = map
        .encode()
        .with_context(|| format!("Failed to encode CMP file: {}", path.display()))?;
    report_diagnostics(&encoded.diagnostics, output);
    write_output(path, &encoded.bytes)?;
    log::info!("wrote {} to {}", format_bytes(encoded.bytes.len() as u64), path.display());
    Ok(())
}

fn execute_info(path: &Path, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    let header = map.header();
    let (mut used, mut empty, mut unaligned) = (0usize, 0usize, 0usize);
    for cell in map.grid() {
        match cell {
            GridCell::Column(_) => used += 1,
            GridCell::Empty(_) => empty += 1,
            GridCell::Unaligned { .. } => unaligned += 1,
        }
    }

    if output.json {
        return print_json(&json!({
            "header": header,
            "columns": map.columns().len(),
            "blocks": map.blocks().len(),
            "objects": map.objects().len(),
            "routes": map.routes().len(),
            "nav_zones": map.nav_zones().len(),
            "cells": { "column": used, "empty": empty, "unaligned": unaligned },
            "trailing_bytes": map.trailing().len(),
        }));
    }

    println!("\n{}", style("CMP Map Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Version: {}", style(header.version).yellow());
    println!("Style: {}  Sample: {}", style(header.style).green(), style(header.sample).green());

    println!("\n{}", style("Sections").bold());
    let mut table = create_table(vec!["Section", "Records", "Size"]);
    for (name, count, size) in [
        ("columns", map.columns().len(), header.column_size),
        ("blocks", map.blocks().len(), header.block_size),
        ("objects", map.objects().len(), header.object_pos_size),
        ("routes", map.routes().len(), header.route_size),
        ("nav zones", map.nav_zones().len(), header.nav_data_size),
    ] {
        add_table_row(
            &mut table,
            vec![name.to_string(), count.to_string(), format_bytes(u64::from(size))],
        );
    }
    table.printstd();

    println!(
        "\nCells: {} with columns, {} empty, {} unaligned",
        style(used).green(),
        style(empty).dim(),
        style(unaligned).red()
    );
    if !map.trailing().is_empty() {
        println!("Trailing bytes: {}", map.trailing().len());
    }
    Ok(())
}

fn execute_blocks(path: &Path, limit: Option<usize>, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    let blocks = &map.blocks()[..limit.unwrap_or(usize::MAX).min(map.blocks().len())];

    if output.json {
        return print_json(blocks);
    }

    let mut table = create_table(vec![
        "Id", "Terrain", "Dirs", "Flat", "Slope", "Rot", "Faces L/R/T/B/Lid",
    ]);
    for (id, block) in blocks.iter().enumerate() {
        let faces = block.faces();
        add_table_row(
            &mut table,
            vec![
                id.to_string(),
                format!("{:?}", block.terrain()),
                format!("{:?}", block.directions()),
                block.is_flat().to_string(),
                block.slope().to_string(),
                block.lid_rotation().to_string(),
                format!(
                    "{}/{}/{}/{}/{}",
                    faces[0], faces[1], faces[2], faces[3], faces[4]
                ),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn execute_objects(path: &Path, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    if output.json {
        return print_json(map.objects());
    }

    let mut table = create_table(vec!["#", "Position (tiles)", "Kind", "Rotation"]);
    for (i, object) in map.objects().iter().enumerate() {
        let (x, y, z) = object.world_position();
        let kind = match object.kind() {
            ObjectKind::Object { object_type, remap } => {
                format!("object {object_type} (remap {remap})")
            }
            ObjectKind::Vehicle { model } => format!("vehicle {model}"),
        };
        add_table_row(
            &mut table,
            vec![
                i.to_string(),
                format!("{x:.2}, {y:.2}, {z:.2}"),
                kind,
                object.rotation.to_string(),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn execute_routes(path: &Path, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    if output.json {
        return print_json(map.routes());
    }

    for (i, route) in map.routes().iter().enumerate() {
        let vertices: Vec<String> = route
            .vertices
            .iter()
            .map(|v| format!("({}, {}, {})", v.x, v.y, v.z))
            .collect();
        println!(
            "{} type {}: {}",
            style(format!("route {i}")).bold(),
            route.route_type,
            vertices.join(" -> ")
        );
    }
    Ok(())
}

fn execute_locations(path: &Path, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    if output.json {
        return print_json(map.locations());
    }

    let mut table = create_table(vec!["Group", "Slot", "X", "Y", "Z"]);
    for (group, slot, location) in map.locations().iter_used() {
        add_table_row(
            &mut table,
            vec![
                group.name().to_string(),
                slot.to_string(),
                location.x.to_string(),
                location.y.to_string(),
                location.z.to_string(),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn execute_nav(path: &Path, at: Option<&str>, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;

    if let Some(at) = at {
        let (x, y) = parse_point(at)?;
        let name = map.area_name(x, y);
        let sample = map.zone_at(x, y).map(|zone| zone.sample_index());
        if output.json {
            return print_json(&json!({ "x": x, "y": y, "area": name, "sample": sample }));
        }
        if name.is_empty() {
            println!("({x}, {y}) is not inside any zone");
        } else {
            println!("({x}, {y}) is in {}", style(name).cyan());
        }
        return Ok(());
    }

    if output.json {
        let zones: Vec<_> = map
            .nav_zones()
            .iter()
            .map(|zone| {
                json!({
                    "x": zone.x, "y": zone.y, "w": zone.w, "h": zone.h,
                    "sample": zone.sample_index(), "name": zone.name(),
                })
            })
            .collect();
        return print_json(&zones);
    }

    let mut table = create_table(vec!["#", "Name", "X", "Y", "W", "H", "Sample"]);
    for (i, zone) in map.nav_zones().iter().enumerate() {
        add_table_row(
            &mut table,
            vec![
                i.to_string(),
                zone.name(),
                zone.x.to_string(),
                zone.y.to_string(),
                zone.w.to_string(),
                zone.h.to_string(),
                zone.sample_index().to_string(),
            ],
        );
    }
    table.printstd();
    Ok(())
}

fn execute_find_block(path: &Path, block: u16, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    let usage = map.find_block(block);

    if output.json {
        return print_json(&json!({
            "block": block,
            "columns": usage.columns,
            "cells": usage.cells,
        }));
    }

    if usage.columns.is_empty() {
        println!("Block {block} is not used by any column");
        return Ok(());
    }
    println!("\n{}", style(format!("Block {block}")).bold());
    for (column, level) in &usage.columns {
        println!("  column {column}, level {level}");
    }
    println!("Shown in {} cells", style(usage.cells.len()).green());
    for (x, y) in usage.cells.iter().take(20) {
        println!("  ({x}, {y})");
    }
    if usage.cells.len() > 20 {
        println!("  ... and {} more", usage.cells.len() - 20);
    }
    Ok(())
}

fn execute_slopes(path: &Path, z: usize, png: Option<PathBuf>, output: OutputOptions) -> Result<()> {
    let map = load(path, output)?;
    let layer = map.slope_layer(z);

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &slope in layer.iter().filter(|&&s| s != 0) {
        *counts.entry(slope).or_default() += 1;
    }

    if let Some(png) = &png {
        // Slope types run 0-63; stretch them over the grey range
        let pixels: Vec<u8> = layer.iter().map(|&s| s.saturating_mul(4)).collect();
        let image = image::GrayImage::from_raw(GRID_SIZE as u32, GRID_SIZE as u32, pixels)
            .context("Slope layer does not fill the map grid")?;
        image
            .save(png)
            .with_context(|| format!("Failed to write PNG: {}", png.display()))?;
    }

    if output.json {
        return print_json(&json!({ "z": z, "slopes": counts }));
    }

    if counts.is_empty() {
        println!("No sloped blocks at level {z}");
    } else {
        let mut table = create_table(vec!["Slope", "Cells"]);
        for (slope, count) in &counts {
            add_table_row(&mut table, vec![slope.to_string(), count.to_string()]);
        }
        table.printstd();
    }
    if let Some(png) = png {
        println!("Slope map written to {}", style(png.display()).cyan());
    }
    Ok(())
}

fn execute_get(path: &Path, field: Option<&str>, output: OutputOptions) -> Result<()> {
    let Some(field) = field else {
        let patterns = CmpFile::field_patterns();
        if output.json {
            let list: Vec<_> = patterns
                .iter()
                .map(|(pattern, kind, writable)| {
                    json!({ "path": pattern, "kind": kind.to_string(), "writable": writable })
                })
                .collect();
            return print_json(&list);
        }
        let mut table = create_table(vec!["Path", "Kind", "Writable"]);
        for (pattern, kind, writable) in patterns {
            add_table_row(
                &mut table,
                vec![pattern.to_string(), kind.to_string(), writable.to_string()],
            );
        }
        table.printstd();
        return Ok(());
    };

    let map = load(path, output)?;
    let value = map
        .get_field(field)
        .with_context(|| format!("Failed to read {field}"))?;
    if output.json {
        return print_json(&json!({ "path": field, "value": value.to_string() }));
    }
    println!("{value}");
    Ok(())
}

fn execute_set(
    path: &Path,
    assignments: &[String],
    target: Option<PathBuf>,
    output: OutputOptions,
) -> Result<()> {
    let mut builder = load(path, output)?.into_builder();
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)?;
        let stored = builder
            .set_field(field, value)
            .with_context(|| format!("Failed to set {field}"))?;
        log::info!("{field} = {stored}");
    }
    let map = builder.build().context("Edited map is inconsistent")?;
    let target = edit_target(path, target);
    save(&map, &target, output)?;
    if !output.json {
        println!(
            "Set {} field(s), saved to {}",
            assignments.len(),
            style(target.display()).cyan()
        );
    }
    Ok(())
}

fn execute_fill(
    path: &Path,
    from: &str,
    start: &str,
    end: &str,
    target: Option<PathBuf>,
    output: OutputOptions,
) -> Result<()> {
    let source = parse_point(from)?;
    let (x0, y0) = parse_point(start)?;
    let (x1, y1) = parse_point(end)?;
    if x1 < x0 || y1 < y0 {
        bail!("Rectangle end ({x1}, {y1}) lies before its start ({x0}, {y0})");
    }

    let mut builder = load(path, output)?.into_builder();
    let written = builder
        .fill_region(source, x0..x1 + 1, y0..y1 + 1)
        .context("Failed to fill region")?;
    let map = builder.build().context("Filled map is inconsistent")?;
    let target = edit_target(path, target);
    save(&map, &target, output)?;

    if output.json {
        return print_json(&json!({ "cells": written, "output": target }));
    }
    println!(
        "Filled {} cells from ({}, {}), saved to {}",
        style(written).green(),
        source.0,
        source.1,
        style(target.display()).cyan()
    );
    Ok(())
}
