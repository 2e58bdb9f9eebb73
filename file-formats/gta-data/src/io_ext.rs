use std::io::Cursor;

use binrw::BinWrite;

use crate::error::{DataError, Result};

/// A record with a fixed on-disk size
pub trait FixedRecord {
    /// Size of one record in bytes
    const SIZE: usize;
}

/// Extension trait for appending little-endian values to a byte buffer
pub trait WriteExt {
    fn put_u8(&mut self, n: u8);
    fn put_u16_le(&mut self, n: u16);
    fn put_u32_le(&mut self, n: u32);
    fn put_i16_le(&mut self, n: i16);

    fn put_u16_slice(&mut self, values: &[u16]) {
        for &value in values {
            self.put_u16_le(value);
        }
    }

    fn put_u32_slice(&mut self, values: &[u32]) {
        for &value in values {
            self.put_u32_le(value);
        }
    }
}

impl WriteExt for Vec<u8> {
    fn put_u8(&mut self, n: u8) {
        self.push(n);
    }

    fn put_u16_le(&mut self, n: u16) {
        self.extend_from_slice(&n.to_le_bytes());
    }

    fn put_u32_le(&mut self, n: u32) {
        self.extend_from_slice(&n.to_le_bytes());
    }

    fn put_i16_le(&mut self, n: i16) {
        self.extend_from_slice(&n.to_le_bytes());
    }
}

/// Append one binrw record to `out`
pub fn write_record<T>(out: &mut Vec<u8>, section: &'static str, record: &T) -> Result<()>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    let start = out.len();
    let mut cursor = Cursor::new(out);
    cursor.set_position(start as u64);
    record
        .write_le(&mut cursor)
        .map_err(|e| DataError::Encode {
            section,
            message: e.to_string(),
        })
}

/// Append a slice of binrw records to `out`
pub fn write_records<T>(out: &mut Vec<u8>, section: &'static str, records: &[T]) -> Result<()>
where
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    for record in records {
        write_record(out, section, record)?;
    }
    Ok(())
}
