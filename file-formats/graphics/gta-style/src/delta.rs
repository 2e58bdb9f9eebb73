//! Delta patches: sparse run overwrites that turn a base sprite into a
//! variant (damage, open doors, lights).
//!
//! A patch is a sequence of `(dx: u8, dy: u8, len: u8, bytes[len])` runs.
//! A cursor starts at (0, 0); each run moves it by `(dx, dy)` and writes
//! its bytes at `y * width + x`. The offsets are relative to a 256-wide
//! page, so whenever `x` lands past the sprite width it wraps back by 256
//! and moves down one line.

use gta_data::{Decoded, DiagnosticCode, Diagnostics};

/// Width of the page the cursor moves over
const PAGE_WIDTH: i64 = 256;

/// Apply `delta` to a copy of `base`, a `width`-wide sprite.
///
/// Runs that would overrun the sprite are clipped to the part inside it; a
/// run starting outside the sprite writes nothing. Both cases, and a patch
/// that ends mid-run, are reported as [`DiagnosticCode::MalformedDelta`]
/// under `location`.
pub fn apply_delta(base: &[u8], width: usize, delta: &[u8], location: &str) -> Decoded<Vec<u8>> {
    let mut pixels = base.to_vec();
    let mut diagnostics = Diagnostics::new();

    if width == 0 {
        if !delta.is_empty() {
            diagnostics.push(
                DiagnosticCode::MalformedDelta,
                location,
                "patch applied to a zero-width sprite",
            );
        }
        return Decoded::new(pixels, diagnostics);
    }

    let width = width as i64;
    let len = pixels.len() as i64;
    let (mut x, mut y) = (0i64, 0i64);
    let mut offset = 0;

    while offset < delta.len() {
        if offset + 3 > delta.len() {
            diagnostics.push(
                DiagnosticCode::MalformedDelta,
                location,
                format!("run header at {offset} cut short by the patch end ({})", delta.len()),
            );
            break;
        }
        x += i64::from(delta[offset]);
        y += i64::from(delta[offset + 1]);
        while x >= width {
            x -= PAGE_WIDTH;
            y += 1;
        }
        let run_len = usize::from(delta[offset + 2]);
        offset += 3;

        let Some(run) = delta.get(offset..offset + run_len) else {
            diagnostics.push(
                DiagnosticCode::MalformedDelta,
                location,
                format!("run of {run_len} at {offset} passes the patch end ({})", delta.len()),
            );
            break;
        };
        offset += run_len;

        let start = x + y * width;
        let end = start + run_len as i64;
        if start < 0 || start >= len {
            if run_len > 0 {
                diagnostics.push(
                    DiagnosticCode::MalformedDelta,
                    location,
                    format!("run at pixel {start} starts outside the {len}-pixel sprite"),
                );
            }
        } else if end > len {
            diagnostics.push(
                DiagnosticCode::MalformedDelta,
                location,
                format!("run {start}..{end} clipped to the {len}-pixel sprite"),
            );
            let keep = (len - start) as usize;
            pixels[start as usize..].copy_from_slice(&run[..keep]);
        } else {
            pixels[start as usize..end as usize].copy_from_slice(run);
        }

        x += run_len as i64;
    }

    Decoded::new(pixels, diagnostics)
}
