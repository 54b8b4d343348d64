use std::mem;

use crate::endian::{LittleEndian as LE, U32Bytes};
use crate::pe;
use crate::read::{Error, ReadError, ReadStream, Result};

/// A table of zero-terminated strings.
///
/// This is used for the COFF symbol table string table. Offsets are relative
/// to the start of the table, which begins with a 4-byte length field, so
/// the first string is at offset 4.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringTable {
    data: Vec<u8>,
}

impl StringTable {
    /// Interpret the given data as a string table.
    ///
    /// Offset 0 is the first byte of `data`.
    pub fn new(data: Vec<u8>) -> Self {
        StringTable { data }
    }

    /// Read the string table that follows the COFF symbol table.
    ///
    /// The table is empty if the header declares no symbol table, or if the
    /// length field is 4 or less.
    pub fn parse<R: ReadStream + ?Sized>(
        header: &pe::ImageFileHeader,
        stream: &mut R,
    ) -> Result<Self> {
        if !header.has_symbol_table() {
            return Ok(StringTable::default());
        }
        let offset = u64::from(header.pointer_to_symbol_table.get(LE))
            + u64::from(header.number_of_symbols.get(LE)) * pe::IMAGE_SIZEOF_SYMBOL as u64;
        stream
            .seek_to(offset)
            .read_error("string table offset")?;

        // The length includes the length field itself.
        let length_field = stream
            .read_pod::<U32Bytes<LE>>()
            .read_error("string table length")?;
        let length = length_field.get(LE) as usize;
        if length <= mem::size_of::<U32Bytes<LE>>() {
            return Ok(StringTable::default());
        }
        let strings = stream
            .read_bytes(length - mem::size_of::<U32Bytes<LE>>())
            .read_error("string table")?;
        let mut data = Vec::with_capacity(length);
        data.extend_from_slice(&length_field.get(LE).to_le_bytes());
        data.extend(strings);
        Ok(StringTable { data })
    }

    /// Return the raw bytes of the table, including any length prefix.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return true if the table holds no strings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.len() <= mem::size_of::<U32Bytes<LE>>()
    }

    /// Return the string at the given offset, without the terminating null.
    ///
    /// Fails if the offset is outside the table or the string is not terminated.
    /// Offsets within the leading length field are never valid.
    pub fn get(&self, offset: u32) -> Result<&[u8]> {
        if (offset as usize) < mem::size_of::<U32Bytes<LE>>() {
            return Err(Error::StringTable {
                offset,
                reason: "offset is before the start of the string table",
            });
        }
        let tail = match self.data.get(offset as usize..) {
            Some(tail) if !tail.is_empty() => tail,
            _ => {
                return Err(Error::StringTable {
                    offset,
                    reason: "offset is beyond the end of the string table",
                })
            }
        };
        match memchr::memchr(b'\0', tail) {
            Some(end) => Ok(&tail[..end]),
            None => Err(Error::StringTable {
                offset,
                reason: "string is not null terminated",
            }),
        }
    }
}
