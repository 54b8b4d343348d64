use crate::pe;
use crate::read::{ReadError, ReadStream, Result};

/// Read the COFF file header at the current position of the stream.
///
/// For PE images the stream must be positioned after the `PE\0\0` signature.
pub fn read_file_header<R: ReadStream + ?Sized>(stream: &mut R) -> Result<pe::ImageFileHeader> {
    stream
        .read_pod::<pe::ImageFileHeader>()
        .read_error("file header")
}
