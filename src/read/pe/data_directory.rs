use core::mem;

use crate::pe;
use crate::read::{Error, ReadError, ReadStream, Result};

/// Read the data directories that follow an optional header base.
///
/// `size` is the number of bytes of the optional header remaining after the
/// base fields, and `count` is the `number_of_rva_and_sizes` field. These must
/// agree exactly: `size` must be `count` times the size of a directory entry.
/// Nothing is read from the stream if they disagree.
pub fn read_data_directories<R: ReadStream + ?Sized>(
    stream: &mut R,
    size: u16,
    count: u32,
) -> Result<Vec<pe::ImageDataDirectory>> {
    let expected = u64::from(count) * mem::size_of::<pe::ImageDataDirectory>() as u64;
    if u64::from(size) != expected {
        return Err(Error::DataDirectorySize { size, count });
    }
    stream
        .read_pod_slice(count as usize)
        .read_error("data directories")
}

/// Copy directories into the fixed array stored in an optional header.
///
/// Entries beyond the array capacity are dropped.
pub(super) fn directory_array(
    directories: &[pe::ImageDataDirectory],
) -> [pe::ImageDataDirectory; pe::IMAGE_NUMBEROF_DIRECTORY_ENTRIES] {
    let mut array = [pe::ImageDataDirectory::default(); pe::IMAGE_NUMBEROF_DIRECTORY_ENTRIES];
    for (slot, directory) in array.iter_mut().zip(directories) {
        *slot = *directory;
    }
    array
}
