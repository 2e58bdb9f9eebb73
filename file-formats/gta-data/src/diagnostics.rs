//! Data-quality warnings collected while decoding and encoding.
//!
//! Structural problems abort a decode with an error. Everything else that
//! looks wrong in an otherwise readable file lands here, so a caller can
//! decide whether to print, count or ignore it.

use std::fmt;

/// Kind of anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    /// A column's stored height disagrees with its block count
    ColumnHeightMismatch,
    /// A grid offset points inside the column blob but not at a column start
    UnalignedColumnOffset,
    /// An unaligned grid offset no longer lands inside its column
    StaleColumnOffset,
    /// An empty-cell sentinel had to be moved past a grown column blob
    SentinelRelocated,
    /// A header size disagrees with what the section actually holds
    SectionSizeMismatch,
    /// The CLUT size was rounded up to a page boundary
    ClutSizeMismatch,
    /// The remap section does not divide into whole tables
    RemapSizeMisaligned,
    /// The remap index is not 1024 bytes
    RemapIndexSize,
    /// A remap index entry has a non-zero first selector
    SuspiciousRemapIndex,
    /// An object status byte outside the known set
    UnknownObjectStatus,
    /// A sprite's stored size differs from width times height
    SpriteSizeMismatch,
    /// A sprite or delta points past the end of the sprite atlas
    SpriteOutOfAtlas,
    /// A delta patch runs off its sprite
    MalformedDelta,
    /// An index resolves outside its target table
    IndexOutOfRange,
    /// A tile section is not a whole number of tiles
    TileSizeMisaligned,
}

impl DiagnosticCode {
    /// Stable name used in logs and CLI output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ColumnHeightMismatch => "column-height-mismatch",
            Self::UnalignedColumnOffset => "unaligned-column-offset",
            Self::StaleColumnOffset => "stale-column-offset",
            Self::SentinelRelocated => "sentinel-relocated",
            Self::SectionSizeMismatch => "section-size-mismatch",
            Self::ClutSizeMismatch => "clut-size-mismatch",
            Self::RemapSizeMisaligned => "remap-size-misaligned",
            Self::RemapIndexSize => "remap-index-size",
            Self::SuspiciousRemapIndex => "suspicious-remap-index",
            Self::UnknownObjectStatus => "unknown-object-status",
            Self::SpriteSizeMismatch => "sprite-size-mismatch",
            Self::SpriteOutOfAtlas => "sprite-out-of-atlas",
            Self::MalformedDelta => "malformed-delta",
            Self::IndexOutOfRange => "index-out-of-range",
            Self::TileSizeMisaligned => "tile-size-misaligned",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deduplicated warning
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// Where it happened, e.g. `columns[12]` or `sprites[40].deltas[1]`
    pub location: String,
    /// Message of the first occurrence
    pub message: String,
    /// How many times it was reported
    pub count: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.location, self.message)?;
        if self.count > 1 {
            write!(f, " (x{})", self.count)?;
        }
        Ok(())
    }
}

/// Ordered collector, deduplicated on `(code, location)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly. A repeat of an existing `(code, location)` only
    /// bumps its count.
    pub fn push(
        &mut self,
        code: DiagnosticCode,
        location: impl Into<String>,
        message: impl Into<String>,
    ) {
        let location = location.into();
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|d| d.code == code && d.location == location)
        {
            existing.count += 1;
            return;
        }
        let message = message.into();
        log::trace!("diagnostic [{code}] {location}: {message}");
        self.entries.push(Diagnostic {
            code,
            location,
            message,
            count: 1,
        });
    }

    /// Fold another collector into this one
    pub fn extend(&mut self, other: Self) {
        for entry in other.entries {
            match self
                .entries
                .iter_mut()
                .find(|d| d.code == entry.code && d.location == entry.location)
            {
                Some(existing) => existing.count += entry.count,
                None => self.entries.push(entry),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total reports including repeats
    pub fn total(&self) -> usize {
        self.entries.iter().map(|d| d.count).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Entries carrying `code`
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.code == code)
    }

    pub fn has(&self, code: DiagnosticCode) -> bool {
        self.with_code(code).next().is_some()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A decoded model plus the warnings raised while reading it
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub model: T,
    pub diagnostics: Diagnostics,
}

impl<T> Decoded<T> {
    pub fn new(model: T, diagnostics: Diagnostics) -> Self {
        Self { model, diagnostics }
    }

    /// Drop the diagnostics
    pub fn into_model(self) -> T {
        self.model
    }
}

/// Encoded bytes plus the warnings raised while writing them
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub diagnostics: Diagnostics,
}

impl Encoded {
    pub fn new(bytes: Vec<u8>, diagnostics: Diagnostics) -> Self {
        Self { bytes, diagnostics }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
