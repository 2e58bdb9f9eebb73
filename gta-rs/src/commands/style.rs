//! GRY/G24 style command implementations

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use console::style;
use serde_json::json;
use std::path::{Path, PathBuf};

use gta_style::{Diagnostics, SpriteCategory, StyleFile, StyleHeader, Surface, TileKind};

use crate::cli::OutputOptions;
use crate::utils::{
    add_table_row, create_table, edit_target, ensure_dir, format_bytes, parse_assignment,
    print_json, read_input, report_diagnostics, write_output,
};

#[derive(Subcommand)]
pub enum StyleCommands {
    /// Display header and section summary of a style file
    Info {
        /// Path to the GRY or G24 file
        file: PathBuf,
    },

    /// Read a field, or list every field path when none is given
    Get {
        /// Path to the GRY or G24 file
        file: PathBuf,

        /// Field path, e.g. vehicles[3].max_speed or sprite_numbers.car
        path: Option<String>,
    },

    /// Set one or more fields and write the style back
    Set {
        /// Path to the GRY or G24 file
        file: PathBuf,

        /// Assignments of the form path=value
        #[arg(required = true)]
        assignments: Vec<String>,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render tiles, sprites, delta variants or atlas pages to PNG files
    Export {
        /// Path to the GRY or G24 file
        file: PathBuf,

        /// Directory to write the images into
        #[arg(short, long)]
        output: PathBuf,

        /// What to export
        #[arg(short, long, value_enum, default_value_t = ExportKind::All)]
        what: ExportKind,

        /// Lid remap (0-3) used for lid tiles
        #[arg(long, default_value_t = 0)]
        lid_remap: usize,

        /// Draw sprites and variants through this remap instead of their own palette
        #[arg(long)]
        remap: Option<usize>,

        /// Physical palette used for atlas pages
        #[arg(long, default_value_t = 0)]
        palette: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Tiles,
    Sprites,
    Deltas,
    Pages,
    All,
}

impl ExportKind {
    fn includes(self, other: Self) -> bool {
        self == Self::All || self == other
    }
}

pub fn execute(command: StyleCommands, output: OutputOptions) -> Result<()> {
    match command {
        StyleCommands::Info { file } => execute_info(&file, output),
        StyleCommands::Get { file, path } => execute_get(&file, path.as_deref(), output),
        StyleCommands::Set {
            file,
            assignments,
            output: target,
        } => execute_set(&file, &assignments, target, output),
        StyleCommands::Export {
            file,
            output: dir,
            what,
            lid_remap,
            remap,
            palette,
        } => {
            let options = ExportOptions {
                what,
                lid_remap,
                remap,
                palette,
            };
            execute_export(&file, &dir, options, output)
        }
    }
}

fn load(path: &Path, output: OutputOptions) -> Result<StyleFile> {
    let bytes = read_input(path)?;
    let decoded = StyleFile::decode(&bytes)
        .with_context(|| format!("Failed to parse style file: {}", path.display()))?;
    report_diagnostics(&decoded.diagnostics, output);
    Ok(decoded.model)
}

fn section_sizes(header: &StyleHeader) -> Vec<(&'static str, u32)> {
    let mut sizes = vec![
        ("side tiles", header.side_size()),
        ("lid tiles", header.lid_size()),
        ("aux tiles", header.aux_size()),
        ("animations", header.anim_size()),
    ];
    match header {
        StyleHeader::Legacy(h) => sizes.extend([
            ("palette", h.palette_size),
            ("remap tables", h.remap_size),
            ("remap index", h.remap_index_size),
        ]),
        StyleHeader::Extended(h) => sizes.extend([
            ("clut", h.clut_size),
            ("palette index", h.palette_index_size),
        ]),
    }
    sizes.extend([
        ("object info", header.object_info_size()),
        ("vehicles", header.car_size()),
        ("sprite info", header.sprite_info_size()),
        ("sprite graphics", header.sprite_graphics_size()),
        ("sprite numbers", header.sprite_numbers_size()),
    ]);
    sizes
}

fn execute_info(path: &Path, output: OutputOptions) -> Result<()> {
    let style_file = load(path, output)?;
    let tiles = style_file.tiles();
    let numbers: Vec<(&str, u16)> = style_file
        .sprite_numbers()
        .map(|n| {
            SpriteCategory::ALL
                .iter()
                .map(|&c| (c.name(), n.count(c)))
                .collect()
        })
        .unwrap_or_default();

    if output.json {
        return print_json(&json!({
            "header": style_file.header(),
            "tiles": {
                "side": tiles.side.len(),
                "lid": tiles.lid.len(),
                "aux": tiles.aux.len(),
                "padding": tiles.padding.len(),
            },
            "animations": style_file.animations().entries.len(),
            "palettes": style_file.colors().palette_count(),
            "clut_ranges": style_file.clut_ranges().map(|r| json!({
                "tile": r.tile, "sprite": r.sprite, "vehicle": r.vehicle, "font": r.font,
            })),
            "object_info": style_file.object_info().len(),
            "vehicles": style_file.vehicles().len(),
            "sprites": style_file.sprites().len(),
            "sprite_pages": style_file.sprite_page_count(),
            "sprite_numbers": numbers.iter().copied().collect::<std::collections::BTreeMap<_, _>>(),
            "trailing_bytes": style_file.trailing().len(),
        }));
    }

    println!("\n{}", style("Style Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Version: {} ({:?})",
        style(style_file.header().version()).yellow(),
        style_file.version()
    );

    println!("\n{}", style("Sections").bold());
    let mut table = create_table(vec!["Section", "Size"]);
    for (name, size) in section_sizes(style_file.header()) {
        add_table_row(&mut table, vec![name.to_string(), format_bytes(u64::from(size))]);
    }
    table.printstd();

    println!(
        "\nTiles: {} side, {} lid, {} aux ({} padding)",
        style(tiles.side.len()).green(),
        style(tiles.lid.len()).green(),
        style(tiles.aux.len()).green(),
        tiles.padding.len()
    );
    println!("Animations: {}", style(style_file.animations().entries.len()).green());
    println!("Palettes: {}", style(style_file.colors().palette_count()).green());
    if let Some(ranges) = style_file.clut_ranges() {
        println!(
            "CLUT ranges: {} tile, {} sprite, {} vehicle, {} font",
            ranges.tile, ranges.sprite, ranges.vehicle, ranges.font
        );
    }
    println!("Object types: {}", style(style_file.object_info().len()).green());
    println!("Vehicle models: {}", style(style_file.vehicles().len()).green());
    println!(
        "Sprites: {} on {} pages",
        style(style_file.sprites().len()).green(),
        style_file.sprite_page_count()
    );

    if !numbers.is_empty() {
        println!("\n{}", style("Sprite Numbers").bold());
        let mut table = create_table(vec!["Category", "Count"]);
        for (name, count) in numbers.iter().filter(|(_, count)| *count > 0) {
            add_table_row(&mut table, vec![name.to_string(), count.to_string()]);
        }
        table.printstd();
    }
    if !style_file.trailing().is_empty() {
        println!("Trailing bytes: {}", style_file.trailing().len());
    }
    Ok(())
}

fn execute_get(path: &Path, field: Option<&str>, output: OutputOptions) -> Result<()> {
    let Some(field) = field else {
        let patterns = StyleFile::field_patterns();
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

    let style_file = load(path, output)?;
    let value = style_file
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
    let style_file = builder.build().context("Edited style is inconsistent")?;
    let encoded = style_file
        .encode()
        .with_context(|| format!("Failed to encode style file: {}", path.display()))?;
    report_diagnostics(&encoded.diagnostics, output);

    let target = edit_target(path, target);
    write_output(&target, &encoded.bytes)?;
    if !output.json {
        println!(
            "Set {} field(s), saved to {}",
            assignments.len(),
            style(target.display()).cyan()
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct ExportOptions {
    what: ExportKind,
    lid_remap: usize,
    remap: Option<usize>,
    palette: usize,
}

/// One image to write
#[derive(Debug, Clone, Copy)]
enum Job {
    Tile(TileKind, usize),
    Sprite(usize),
    Delta(usize, usize),
    Page(usize),
}

fn export_jobs(style_file: &StyleFile, what: ExportKind) -> Vec<Job> {
    let mut jobs = Vec::new();
    if what.includes(ExportKind::Tiles) {
        for kind in TileKind::ALL {
            jobs.extend((0..style_file.tiles().set(kind).len()).map(|i| Job::Tile(kind, i)));
        }
    }
    for (i, sprite) in style_file.sprites().iter().enumerate() {
        if what.includes(ExportKind::Sprites) {
            jobs.push(Job::Sprite(i));
        }
        if what.includes(ExportKind::Deltas) {
            jobs.extend((0..sprite.deltas.len()).map(|d| Job::Delta(i, d)));
        }
    }
    if what.includes(ExportKind::Pages) {
        jobs.extend((0..style_file.sprite_page_count()).map(Job::Page));
    }
    jobs
}

/// Render one job. `None` when the style has no palette for it.
fn render_job(
    style_file: &StyleFile,
    job: Job,
    options: ExportOptions,
) -> Option<(String, Surface, Diagnostics)> {
    let none = Diagnostics::new;
    match job {
        Job::Tile(kind, i) => {
            let remap = if kind == TileKind::Lid { options.lid_remap } else { 0 };
            let surface = style_file.render_tile(kind, i, remap)?;
            Some((format!("{}_{i:03}.png", kind.name()), surface, none()))
        }
        Job::Sprite(i) => {
            let surface = style_file.render_sprite(i, options.remap)?;
            Some((format!("sprite_{i:04}.png"), surface, none()))
        }
        Job::Delta(i, d) => {
            let variant = style_file.render_variant(i, d, options.remap)?;
            Some((format!("sprite_{i:04}_delta_{d:02}.png"), variant.model, variant.diagnostics))
        }
        Job::Page(p) => {
            let surface = style_file.render_page(p, options.palette)?;
            Some((format!("page_{p:02}.png"), surface, none()))
        }
    }
}

/// Render and write one job, returning its diagnostics
fn write_job(
    style_file: &StyleFile,
    job: Job,
    options: ExportOptions,
    dir: &Path,
) -> Result<Option<Diagnostics>> {
    let Some((name, surface, diagnostics)) = render_job(style_file, job, options) else {
        log::warn!("no palette for {job:?}, skipped");
        return Ok(None);
    };
    if surface.width == 0 || surface.height == 0 {
        log::info!("{name} is empty, skipped");
        return Ok(None);
    }
    let path = dir.join(&name);
    surface
        .save_png(&path)
        .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
    Ok(Some(diagnostics))
}

#[cfg(feature = "parallel")]
fn run_jobs(
    style_file: &StyleFile,
    jobs: &[Job],
    options: ExportOptions,
    dir: &Path,
) -> Result<Vec<Option<Diagnostics>>> {
    use rayon::prelude::*;
    jobs.par_iter()
        .map(|&job| write_job(style_file, job, options, dir))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_jobs(
    style_file: &StyleFile,
    jobs: &[Job],
    options: ExportOptions,
    dir: &Path,
) -> Result<Vec<Option<Diagnostics>>> {
    jobs.iter()
        .map(|&job| write_job(style_file, job, options, dir))
        .collect()
}

fn execute_export(
    path: &Path,
    dir: &Path,
    options: ExportOptions,
    output: OutputOptions,
) -> Result<()> {
    let style_file = load(path, output)?;
    ensure_dir(dir)?;

    let jobs = export_jobs(&style_file, options.what);
    log::info!("exporting {} images to {}", jobs.len(), dir.display());
    let results = run_jobs(&style_file, &jobs, options, dir)?;

    let mut written = 0usize;
    for diagnostics in results.iter().flatten() {
        written += 1;
        report_diagnostics(diagnostics, output);
    }
    let skipped = jobs.len() - written;

    if output.json {
        return print_json(&json!({
            "output": dir,
            "written": written,
            "skipped": skipped,
        }));
    }
    println!(
        "Wrote {} images to {}",
        style(written).green(),
        style(dir.display()).cyan()
    );
    if skipped > 0 {
        println!("Skipped {} (empty or without a palette)", style(skipped).yellow());
    }
    Ok(())
}
