//! Shared building blocks for the GTA1 container codecs.
//!
//! - [`cursor::SectionReader`]: a bounds-checked forward cursor that names the
//!   section being read in every truncation error
//! - [`io_ext`]: little-endian append helpers and binrw record glue
//! - [`bits::BitField`]: get/replace helpers for bit-packed flag words
//! - [`diagnostics`]: the warning collector returned next to decoded models
//! - [`field`]: path-addressed get/set tables for external editing tools

pub mod bits;
pub mod cursor;
pub mod debug;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod io_ext;

pub use bits::BitField;
pub use cursor::SectionReader;
pub use diagnostics::{Decoded, Diagnostic, DiagnosticCode, Diagnostics, Encoded};
pub use error::{DataError, Result};
pub use field::{AccessorTable, FieldError, FieldKind, FieldPath, FieldSpec, FieldValue};
pub use io_ext::{FixedRecord, WriteExt};
