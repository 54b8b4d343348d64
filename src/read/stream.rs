use std::io::{self, Read, Seek, SeekFrom};
use std::mem;

use crate::pod::{bytes_of_mut, bytes_of_slice_mut, zeroed, Pod};

/// Sequential record reads from a seekable byte stream.
///
/// This is implemented for every `Read + Seek` type, such as `std::fs::File`
/// or `std::io::Cursor`. Records are read in their on-disk byte order; use the
/// `get(LE)` accessors of the record fields to obtain native values.
///
/// A failed read leaves the stream at an unspecified position.
pub trait ReadStream: Read + Seek {
    /// Seek to an absolute offset from the start of the stream.
    #[inline]
    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    /// Seek forward or backward relative to the current position.
    #[inline]
    fn seek_by(&mut self, delta: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(delta)).map(|_| ())
    }

    /// Return the number of bytes between the current position and the end of the stream.
    ///
    /// The position is unchanged on success.
    fn remaining_len(&mut self) -> io::Result<u64> {
        let position = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(position))?;
        Ok(end.saturating_sub(position))
    }

    /// Fail with `UnexpectedEof` unless at least `size` more bytes are available.
    fn ensure_available(&mut self, size: u64) -> io::Result<()> {
        if self.remaining_len()? < size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "size exceeds the end of the stream",
            ));
        }
        Ok(())
    }

    /// Read a single `Pod` record.
    ///
    /// Fails with `UnexpectedEof` if the stream ends before the whole record is read.
    fn read_pod<T: Pod>(&mut self) -> io::Result<T> {
        let mut val = zeroed::<T>();
        self.read_exact(bytes_of_mut(&mut val))?;
        Ok(val)
    }

    /// Read `count` consecutive `Pod` records.
    ///
    /// No partial records are returned, and nothing is allocated if the stream
    /// is too short to hold them all.
    fn read_pod_slice<T: Pod>(&mut self, count: usize) -> io::Result<Vec<T>> {
        let size = count.checked_mul(mem::size_of::<T>()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "record count overflows")
        })?;
        self.ensure_available(size as u64)?;
        let mut vals = vec![zeroed::<T>(); count];
        self.read_exact(bytes_of_slice_mut(&mut vals))?;
        Ok(vals)
    }

    /// Read exactly `size` bytes.
    ///
    /// Nothing is allocated if the stream is too short.
    fn read_bytes(&mut self, size: usize) -> io::Result<Vec<u8>> {
        self.ensure_available(size as u64)?;
        let mut bytes = vec![0; size];
        self.read_exact(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: Read + Seek + ?Sized> ReadStream for R {}
