//! Bounds-checked forward cursor over an in-memory container

use std::io::Cursor;

use binrw::BinRead;

use crate::error::{DataError, Result};
use crate::io_ext::FixedRecord;

/// A forward-only reader over a byte slice.
///
/// Every read names the section it belongs to, so running out of input
/// surfaces as [`DataError::TruncatedInput`] pointing at the section and the
/// absolute file offset rather than a bare EOF.
#[derive(Debug, Clone)]
pub struct SectionReader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> SectionReader<'a> {
    /// Create a reader over a whole file
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Offset relative to the start of this reader
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread bytes without consuming them
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn ensure(&self, section: &'static str, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(DataError::TruncatedInput {
                section,
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consume exactly `len` bytes
    pub fn take(&mut self, section: &'static str, len: usize) -> Result<&'a [u8]> {
        self.ensure(section, len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consume everything that is left
    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = self.rest();
        self.pos = self.data.len();
        bytes
    }

    /// Split off the next `len` bytes as a reader of their own.
    ///
    /// The child keeps reporting absolute offsets.
    pub fn section(&mut self, section: &'static str, len: usize) -> Result<SectionReader<'a>> {
        let base = self.offset();
        let data = self.take(section, len)?;
        Ok(SectionReader { data, pos: 0, base })
    }

    fn array<const N: usize>(&mut self, section: &'static str) -> Result<[u8; N]> {
        let bytes = self.take(section, N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    pub fn read_u8(&mut self, section: &'static str) -> Result<u8> {
        Ok(self.array::<1>(section)?[0])
    }

    pub fn read_u16_le(&mut self, section: &'static str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array(section)?))
    }

    pub fn read_u32_le(&mut self, section: &'static str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(section)?))
    }

    pub fn read_i16_le(&mut self, section: &'static str) -> Result<i16> {
        Ok(i16::from_le_bytes(self.array(section)?))
    }

    /// Read `count` little-endian u16 values
    pub fn read_u16_array(&mut self, section: &'static str, count: usize) -> Result<Vec<u16>> {
        let bytes = self.take(section, count * 2)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Read `count` little-endian u32 values
    pub fn read_u32_array(&mut self, section: &'static str, count: usize) -> Result<Vec<u32>> {
        let bytes = self.take(section, count * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|quad| u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
            .collect())
    }

    /// Read one fixed-size binrw record
    pub fn read_record<T>(&mut self, section: &'static str) -> Result<T>
    where
        T: FixedRecord + for<'b> BinRead<Args<'b> = ()>,
    {
        let start = self.offset();
        let bytes = self.take(section, T::SIZE)?;
        let mut cursor = Cursor::new(bytes);
        T::read_le(&mut cursor).map_err(|e| DataError::CorruptSection {
            section,
            message: format!("bad record at offset {start}: {e}"),
        })
    }

    /// Read a tightly packed array of fixed-size records spanning the
    /// whole reader.
    ///
    /// A length that is not a multiple of the record size is a
    /// [`DataError::CorruptSection`].
    pub fn read_records<T>(&mut self, section: &'static str) -> Result<Vec<T>>
    where
        T: FixedRecord + for<'b> BinRead<Args<'b> = ()>,
    {
        let len = self.remaining();
        if len % T::SIZE != 0 {
            return Err(DataError::CorruptSection {
                section,
                message: format!(
                    "size {len} is not a multiple of the {}-byte record",
                    T::SIZE
                ),
            });
        }
        let mut records = Vec::with_capacity(len / T::SIZE);
        while !self.is_empty() {
            records.push(self.read_record(section)?);
        }
        log::debug!("{section}: {} records", records.len());
        Ok(records)
    }
}
