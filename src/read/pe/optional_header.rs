use core::fmt::Debug;
use core::mem;

use crate::endian::{LittleEndian as LE, U16, U32, U64};
use crate::pe;
use crate::pod::Bytes;
use crate::read::{Error, ReadError, ReadStream, Result};

use super::data_directory::{directory_array, read_data_directories};

/// A PE32 optional header, including its data directories.
#[allow(missing_docs)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptionalHeader32 {
    pub magic: u16,
    pub major_linker_version: u8,
    pub minor_linker_version: u8,
    pub size_of_code: u32,
    pub size_of_initialized_data: u32,
    pub size_of_uninitialized_data: u32,
    pub address_of_entry_point: u32,
    pub base_of_code: u32,
    pub base_of_data: u32,
    pub image_base: u32,
    pub section_alignment: u32,
    pub file_alignment: u32,
    pub major_operating_system_version: u16,
    pub minor_operating_system_version: u16,
    pub major_image_version: u16,
    pub minor_image_version: u16,
    pub major_subsystem_version: u16,
    pub minor_subsystem_version: u16,
    pub win32_version_value: u32,
    pub size_of_image: u32,
    pub size_of_headers: u32,
    pub check_sum: u32,
    pub subsystem: u16,
    pub dll_characteristics: u16,
    pub size_of_stack_reserve: u32,
    pub size_of_stack_commit: u32,
    pub size_of_heap_reserve: u32,
    pub size_of_heap_commit: u32,
    pub loader_flags: u32,
    pub number_of_rva_and_sizes: u32,
    /// Only the first `number_of_rva_and_sizes` entries are populated.
    pub data_directory: [pe::ImageDataDirectory; pe::IMAGE_NUMBEROF_DIRECTORY_ENTRIES],
}

/// A PE32+ optional header, including its data directories.
#[allow(missing_docs)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptionalHeader64 {
    pub magic: u16,
    pub major_linker_version: u8,
    pub minor_linker_version: u8,
    pub size_of_code: u32,
    pub size_of_initialized_data: u32,
    pub size_of_uninitialized_data: u32,
    pub address_of_entry_point: u32,
    pub base_of_code: u32,
    pub image_base: u64,
    pub section_alignment: u32,
    pub file_alignment: u32,
    pub major_operating_system_version: u16,
    pub minor_operating_system_version: u16,
    pub major_image_version: u16,
    pub minor_image_version: u16,
    pub major_subsystem_version: u16,
    pub minor_subsystem_version: u16,
    pub win32_version_value: u32,
    pub size_of_image: u32,
    pub size_of_headers: u32,
    pub check_sum: u32,
    pub subsystem: u16,
    pub dll_characteristics: u16,
    pub size_of_stack_reserve: u64,
    pub size_of_stack_commit: u64,
    pub size_of_heap_reserve: u64,
    pub size_of_heap_commit: u64,
    pub loader_flags: u32,
    pub number_of_rva_and_sizes: u32,
    /// Only the first `number_of_rva_and_sizes` entries are populated.
    pub data_directory: [pe::ImageDataDirectory; pe::IMAGE_NUMBEROF_DIRECTORY_ENTRIES],
}

/// A decoded optional header.
///
/// The variant is selected by the magic value at the start of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalHeader {
    /// `IMAGE_NT_OPTIONAL_HDR32_MAGIC`
    Pe32(OptionalHeader32),
    /// `IMAGE_NT_OPTIONAL_HDR64_MAGIC`
    Pe64(OptionalHeader64),
}

impl OptionalHeader {
    /// Parse the optional header at the current position of the stream.
    ///
    /// `size` is the `size_of_optional_header` field of the file header.
    /// Returns `Ok(None)` if `size` is zero.
    ///
    /// On success the stream is positioned after the last data directory.
    pub fn parse<R: ReadStream + ?Sized>(stream: &mut R, size: u16) -> Result<Option<Self>> {
        if size == 0 {
            return Ok(None);
        }
        let magic_size = mem::size_of::<U16<LE>>();
        if usize::from(size) < magic_size {
            return Err(Error::OptionalHeaderTooSmall {
                what: "optional header magic",
                size,
                required: magic_size,
            });
        }
        let magic = stream
            .read_pod::<U16<LE>>()
            .read_error("optional header magic")?
            .get(LE);
        let header = match magic {
            pe::IMAGE_NT_OPTIONAL_HDR32_MAGIC => {
                OptionalHeader::Pe32(OptionalHeader32::parse_tail(stream, size)?)
            }
            pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC => {
                OptionalHeader::Pe64(OptionalHeader64::parse_tail(stream, size)?)
            }
            _ => return Err(Error::UnexpectedMagic(magic)),
        };
        Ok(Some(header))
    }

    /// Parse the optional header using the size declared in the file header.
    ///
    /// The stream must be positioned directly after the file header.
    #[inline]
    pub fn parse_for<R: ReadStream + ?Sized>(
        header: &pe::ImageFileHeader,
        stream: &mut R,
    ) -> Result<Option<Self>> {
        Self::parse(stream, header.size_of_optional_header.get(LE))
    }

    /// Return true for a PE32+ header.
    #[inline]
    pub fn is_64(&self) -> bool {
        match self {
            OptionalHeader::Pe32(_) => false,
            OptionalHeader::Pe64(_) => true,
        }
    }

    /// Return the fields common to both header shapes.
    #[inline]
    pub fn fields(&self) -> &dyn ImageOptionalHeader {
        match self {
            OptionalHeader::Pe32(header) => header,
            OptionalHeader::Pe64(header) => header,
        }
    }

    /// Return the PE32 header, if this is one.
    pub fn as_pe32(&self) -> Option<&OptionalHeader32> {
        match self {
            OptionalHeader::Pe32(header) => Some(header),
            OptionalHeader::Pe64(_) => None,
        }
    }

    /// Return the PE32+ header, if this is one.
    pub fn as_pe64(&self) -> Option<&OptionalHeader64> {
        match self {
            OptionalHeader::Pe32(_) => None,
            OptionalHeader::Pe64(header) => Some(header),
        }
    }
}

/// A trait for generic access to [`OptionalHeader32`] and [`OptionalHeader64`].
///
/// Address-sized fields are widened to `u64`.
#[allow(missing_docs)]
pub trait ImageOptionalHeader: Debug {
    fn magic(&self) -> u16;
    fn address_of_entry_point(&self) -> u32;
    fn image_base(&self) -> u64;
    fn section_alignment(&self) -> u32;
    fn file_alignment(&self) -> u32;
    fn size_of_image(&self) -> u32;
    fn size_of_headers(&self) -> u32;
    fn subsystem(&self) -> u16;
    fn dll_characteristics(&self) -> u16;
    fn size_of_stack_reserve(&self) -> u64;
    fn size_of_stack_commit(&self) -> u64;
    fn size_of_heap_reserve(&self) -> u64;
    fn size_of_heap_commit(&self) -> u64;
    fn number_of_rva_and_sizes(&self) -> u32;

    /// The data directory array, including unpopulated entries.
    fn data_directory_array(&self) -> &[pe::ImageDataDirectory];

    /// The populated data directories.
    ///
    /// This is `number_of_rva_and_sizes` entries, up to a maximum of 16.
    fn data_directories(&self) -> &[pe::ImageDataDirectory] {
        let array = self.data_directory_array();
        let count = (self.number_of_rva_and_sizes() as usize).min(array.len());
        &array[..count]
    }

    /// The data directory for the given slot, if it is populated.
    fn data_directory(&self, entry: pe::ImageDirectoryEntry) -> Option<&pe::ImageDataDirectory> {
        self.data_directories().get(entry.index())
    }
}

macro_rules! impl_image_optional_header {
    ($name:ident) => {
        impl ImageOptionalHeader for $name {
            #[inline]
            fn magic(&self) -> u16 {
                self.magic
            }

            #[inline]
            fn address_of_entry_point(&self) -> u32 {
                self.address_of_entry_point
            }

            #[inline]
            fn image_base(&self) -> u64 {
                self.image_base.into()
            }

            #[inline]
            fn section_alignment(&self) -> u32 {
                self.section_alignment
            }

            #[inline]
            fn file_alignment(&self) -> u32 {
                self.file_alignment
            }

            #[inline]
            fn size_of_image(&self) -> u32 {
                self.size_of_image
            }

            #[inline]
            fn size_of_headers(&self) -> u32 {
                self.size_of_headers
            }

            #[inline]
            fn subsystem(&self) -> u16 {
                self.subsystem
            }

            #[inline]
            fn dll_characteristics(&self) -> u16 {
                self.dll_characteristics
            }

            #[inline]
            fn size_of_stack_reserve(&self) -> u64 {
                self.size_of_stack_reserve.into()
            }

            #[inline]
            fn size_of_stack_commit(&self) -> u64 {
                self.size_of_stack_commit.into()
            }

            #[inline]
            fn size_of_heap_reserve(&self) -> u64 {
                self.size_of_heap_reserve.into()
            }

            #[inline]
            fn size_of_heap_commit(&self) -> u64 {
                self.size_of_heap_commit.into()
            }

            #[inline]
            fn number_of_rva_and_sizes(&self) -> u32 {
                self.number_of_rva_and_sizes
            }

            #[inline]
            fn data_directory_array(&self) -> &[pe::ImageDataDirectory] {
                &self.data_directory
            }
        }
    };
}

impl_image_optional_header!(OptionalHeader32);
impl_image_optional_header!(OptionalHeader64);

impl OptionalHeader32 {
    /// Decode the rest of a PE32 optional header after its magic.
    fn parse_tail<R: ReadStream + ?Sized>(stream: &mut R, size: u16) -> Result<Self> {
        let base_size = mem::size_of::<pe::ImageOptionalHeader32>();
        if usize::from(size) < base_size {
            return Err(Error::OptionalHeaderTooSmall {
                what: "PE32 optional header",
                size,
                required: base_size,
            });
        }
        let data = stream
            .read_bytes(base_size - mem::size_of::<U16<LE>>())
            .read_error("PE32 optional header")?;
        let mut header = Self::decode_fields(Bytes(&data)).read_error("PE32 optional header")?;

        // Only the magic and base fields have been read, so this can't underflow.
        let directories = read_data_directories(
            stream,
            size - base_size as u16,
            header.number_of_rva_and_sizes,
        )?;
        header.data_directory = directory_array(&directories);
        Ok(header)
    }

    fn decode_fields(mut data: Bytes<'_>) -> Option<Self> {
        Some(OptionalHeader32 {
            magic: pe::IMAGE_NT_OPTIONAL_HDR32_MAGIC,
            major_linker_version: data.read_u8()?,
            minor_linker_version: data.read_u8()?,
            size_of_code: read_u32(&mut data)?,
            size_of_initialized_data: read_u32(&mut data)?,
            size_of_uninitialized_data: read_u32(&mut data)?,
            address_of_entry_point: read_u32(&mut data)?,
            base_of_code: read_u32(&mut data)?,
            base_of_data: read_u32(&mut data)?,
            image_base: read_u32(&mut data)?,
            section_alignment: read_u32(&mut data)?,
            file_alignment: read_u32(&mut data)?,
            major_operating_system_version: read_u16(&mut data)?,
            minor_operating_system_version: read_u16(&mut data)?,
            major_image_version: read_u16(&mut data)?,
            minor_image_version: read_u16(&mut data)?,
            major_subsystem_version: read_u16(&mut data)?,
            minor_subsystem_version: read_u16(&mut data)?,
            win32_version_value: read_u32(&mut data)?,
            size_of_image: read_u32(&mut data)?,
            size_of_headers: read_u32(&mut data)?,
            check_sum: read_u32(&mut data)?,
            subsystem: read_u16(&mut data)?,
            dll_characteristics: read_u16(&mut data)?,
            size_of_stack_reserve: read_u32(&mut data)?,
            size_of_stack_commit: read_u32(&mut data)?,
            size_of_heap_reserve: read_u32(&mut data)?,
            size_of_heap_commit: read_u32(&mut data)?,
            loader_flags: read_u32(&mut data)?,
            number_of_rva_and_sizes: read_u32(&mut data)?,
            data_directory: Default::default(),
        })
    }
}

impl OptionalHeader64 {
    /// Decode the rest of a PE32+ optional header after its magic.
    fn parse_tail<R: ReadStream + ?Sized>(stream: &mut R, size: u16) -> Result<Self> {
        let base_size = mem::size_of::<pe::ImageOptionalHeader64>();
        if usize::from(size) < base_size {
            return Err(Error::OptionalHeaderTooSmall {
                what: "PE32+ optional header",
                size,
                required: base_size,
            });
        }
        let data = stream
            .read_bytes(base_size - mem::size_of::<U16<LE>>())
            .read_error("PE32+ optional header")?;
        let mut header = Self::decode_fields(Bytes(&data)).read_error("PE32+ optional header")?;

        let directories = read_data_directories(
            stream,
            size - base_size as u16,
            header.number_of_rva_and_sizes,
        )?;
        header.data_directory = directory_array(&directories);
        Ok(header)
    }

    fn decode_fields(mut data: Bytes<'_>) -> Option<Self> {
        Some(OptionalHeader64 {
            magic: pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC,
            major_linker_version: data.read_u8()?,
            minor_linker_version: data.read_u8()?,
            size_of_code: read_u32(&mut data)?,
            size_of_initialized_data: read_u32(&mut data)?,
            size_of_uninitialized_data: read_u32(&mut data)?,
            address_of_entry_point: read_u32(&mut data)?,
            base_of_code: read_u32(&mut data)?,
            image_base: read_u64(&mut data)?,
            section_alignment: read_u32(&mut data)?,
            file_alignment: read_u32(&mut data)?,
            major_operating_system_version: read_u16(&mut data)?,
            minor_operating_system_version: read_u16(&mut data)?,
            major_image_version: read_u16(&mut data)?,
            minor_image_version: read_u16(&mut data)?,
            major_subsystem_version: read_u16(&mut data)?,
            minor_subsystem_version: read_u16(&mut data)?,
            win32_version_value: read_u32(&mut data)?,
            size_of_image: read_u32(&mut data)?,
            size_of_headers: read_u32(&mut data)?,
            check_sum: read_u32(&mut data)?,
            subsystem: read_u16(&mut data)?,
            dll_characteristics: read_u16(&mut data)?,
            size_of_stack_reserve: read_u64(&mut data)?,
            size_of_stack_commit: read_u64(&mut data)?,
            size_of_heap_reserve: read_u64(&mut data)?,
            size_of_heap_commit: read_u64(&mut data)?,
            loader_flags: read_u32(&mut data)?,
            number_of_rva_and_sizes: read_u32(&mut data)?,
            data_directory: Default::default(),
        })
    }
}

#[inline]
fn read_u16(data: &mut Bytes<'_>) -> Option<u16> {
    data.read::<U16<LE>>().map(|x| x.get(LE))
}

#[inline]
fn read_u32(data: &mut Bytes<'_>) -> Option<u32> {
    data.read::<U32<LE>>().map(|x| x.get(LE))
}

#[inline]
fn read_u64(data: &mut Bytes<'_>) -> Option<u64> {
    data.read::<U64<LE>>().map(|x| x.get(LE))
}
