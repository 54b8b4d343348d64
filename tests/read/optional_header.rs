use pecoff::pe;
use pecoff::read::coff::read_file_header;
use pecoff::read::pe::{
    ImageOptionalHeader, OptionalHeader, OptionalHeader32, OptionalHeader64,
};
use pecoff::read::{Error, ErrorKind};
use pecoff::{LittleEndian as LE, U16, U32, U64};

use super::{file_header, Image};

fn pe32_base(number_of_rva_and_sizes: u32) -> pe::ImageOptionalHeader32 {
    pe::ImageOptionalHeader32 {
        magic: U16::new(LE, pe::IMAGE_NT_OPTIONAL_HDR32_MAGIC),
        major_linker_version: 14,
        minor_linker_version: 29,
        size_of_code: U32::new(LE, 0x1100),
        size_of_initialized_data: U32::new(LE, 0x2200),
        size_of_uninitialized_data: U32::new(LE, 0x3300),
        address_of_entry_point: U32::new(LE, 0x1234),
        base_of_code: U32::new(LE, 0x4400),
        base_of_data: U32::new(LE, 0x5500),
        image_base: U32::new(LE, 0x0040_0000),
        section_alignment: U32::new(LE, 0x1000),
        file_alignment: U32::new(LE, 0x200),
        major_operating_system_version: U16::new(LE, 6),
        minor_operating_system_version: U16::new(LE, 1),
        major_image_version: U16::new(LE, 7),
        minor_image_version: U16::new(LE, 4),
        major_subsystem_version: U16::new(LE, 5),
        minor_subsystem_version: U16::new(LE, 3),
        win32_version_value: U32::new(LE, 0x66),
        size_of_image: U32::new(LE, 0x5000),
        size_of_headers: U32::new(LE, 0x400),
        check_sum: U32::new(LE, 0x0001_2345),
        subsystem: U16::new(LE, pe::IMAGE_SUBSYSTEM_WINDOWS_GUI),
        dll_characteristics: U16::new(LE, 0x8140),
        size_of_stack_reserve: U32::new(LE, 0x10_0000),
        size_of_stack_commit: U32::new(LE, 0x2000),
        size_of_heap_reserve: U32::new(LE, 0x20_0000),
        size_of_heap_commit: U32::new(LE, 0x3000),
        loader_flags: U32::new(LE, 0x77),
        number_of_rva_and_sizes: U32::new(LE, number_of_rva_and_sizes),
    }
}

/// The decoded form of `pe32_base`.
fn pe32_decoded(
    number_of_rva_and_sizes: u32,
    data_directory: [pe::ImageDataDirectory; 16],
) -> OptionalHeader32 {
    OptionalHeader32 {
        magic: 0x10b,
        major_linker_version: 14,
        minor_linker_version: 29,
        size_of_code: 0x1100,
        size_of_initialized_data: 0x2200,
        size_of_uninitialized_data: 0x3300,
        address_of_entry_point: 0x1234,
        base_of_code: 0x4400,
        base_of_data: 0x5500,
        image_base: 0x0040_0000,
        section_alignment: 0x1000,
        file_alignment: 0x200,
        major_operating_system_version: 6,
        minor_operating_system_version: 1,
        major_image_version: 7,
        minor_image_version: 4,
        major_subsystem_version: 5,
        minor_subsystem_version: 3,
        win32_version_value: 0x66,
        size_of_image: 0x5000,
        size_of_headers: 0x400,
        check_sum: 0x0001_2345,
        subsystem: 2,
        dll_characteristics: 0x8140,
        size_of_stack_reserve: 0x10_0000,
        size_of_stack_commit: 0x2000,
        size_of_heap_reserve: 0x20_0000,
        size_of_heap_commit: 0x3000,
        loader_flags: 0x77,
        number_of_rva_and_sizes,
        data_directory,
    }
}

fn pe64_base(number_of_rva_and_sizes: u32) -> pe::ImageOptionalHeader64 {
    pe::ImageOptionalHeader64 {
        magic: U16::new(LE, pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC),
        major_linker_version: 12,
        minor_linker_version: 34,
        size_of_code: U32::new(LE, 0x1800),
        size_of_initialized_data: U32::new(LE, 0x2800),
        size_of_uninitialized_data: U32::new(LE, 0x3800),
        address_of_entry_point: U32::new(LE, 0x1400),
        base_of_code: U32::new(LE, 0x4800),
        image_base: U64::new(LE, 0x1_4000_0000),
        section_alignment: U32::new(LE, 0x2000),
        file_alignment: U32::new(LE, 0x400),
        major_operating_system_version: U16::new(LE, 10),
        minor_operating_system_version: U16::new(LE, 11),
        major_image_version: U16::new(LE, 12),
        minor_image_version: U16::new(LE, 13),
        major_subsystem_version: U16::new(LE, 14),
        minor_subsystem_version: U16::new(LE, 15),
        win32_version_value: U32::new(LE, 0x99),
        size_of_image: U32::new(LE, 0x9000),
        size_of_headers: U32::new(LE, 0x600),
        check_sum: U32::new(LE, 0x0006_789a),
        subsystem: U16::new(LE, pe::IMAGE_SUBSYSTEM_WINDOWS_CUI),
        dll_characteristics: U16::new(
            LE,
            pe::IMAGE_DLLCHARACTERISTICS_DYNAMIC_BASE | pe::IMAGE_DLLCHARACTERISTICS_NX_COMPAT,
        ),
        size_of_stack_reserve: U64::new(LE, 0x10_0000),
        size_of_stack_commit: U64::new(LE, 0x2_0000_0000),
        size_of_heap_reserve: U64::new(LE, 0x30_0000),
        size_of_heap_commit: U64::new(LE, 0x1000),
        loader_flags: U32::new(LE, 0x88),
        number_of_rva_and_sizes: U32::new(LE, number_of_rva_and_sizes),
    }
}

/// The decoded form of `pe64_base`.
fn pe64_decoded(
    number_of_rva_and_sizes: u32,
    data_directory: [pe::ImageDataDirectory; 16],
) -> OptionalHeader64 {
    OptionalHeader64 {
        magic: 0x20b,
        major_linker_version: 12,
        minor_linker_version: 34,
        size_of_code: 0x1800,
        size_of_initialized_data: 0x2800,
        size_of_uninitialized_data: 0x3800,
        address_of_entry_point: 0x1400,
        base_of_code: 0x4800,
        image_base: 0x1_4000_0000,
        section_alignment: 0x2000,
        file_alignment: 0x400,
        major_operating_system_version: 10,
        minor_operating_system_version: 11,
        major_image_version: 12,
        minor_image_version: 13,
        major_subsystem_version: 14,
        minor_subsystem_version: 15,
        win32_version_value: 0x99,
        size_of_image: 0x9000,
        size_of_headers: 0x600,
        check_sum: 0x0006_789a,
        subsystem: 3,
        dll_characteristics: 0x0140,
        size_of_stack_reserve: 0x10_0000,
        size_of_stack_commit: 0x2_0000_0000,
        size_of_heap_reserve: 0x30_0000,
        size_of_heap_commit: 0x1000,
        loader_flags: 0x88,
        number_of_rva_and_sizes,
        data_directory,
    }
}

fn directory(index: u32) -> pe::ImageDataDirectory {
    pe::ImageDataDirectory {
        virtual_address: U32::new(LE, 0x1000 * (index + 1)),
        size: U32::new(LE, 0x10 + index),
    }
}

fn push_directories(image: &mut Image, count: u32) {
    for index in 0..count {
        image.push(&directory(index));
    }
}

#[test]
fn pe32_all_directories() {
    let mut image = Image::default();
    image.push(&pe32_base(16));
    push_directories(&mut image, 16);
    assert_eq!(image.len(), 224);
    let mut stream = image.into_cursor();

    let header = OptionalHeader::parse(&mut stream, 224).unwrap().unwrap();
    assert_eq!(stream.position(), 224);
    let mut directories = [pe::ImageDataDirectory::default(); 16];
    for (index, entry) in directories.iter_mut().enumerate() {
        *entry = directory(index as u32);
    }
    assert_eq!(header.as_pe32(), Some(&pe32_decoded(16, directories)));

    let fields = header.fields();
    assert_eq!(fields.subsystem(), pe::IMAGE_SUBSYSTEM_WINDOWS_GUI);
    assert_eq!(fields.data_directories().len(), 16);
    let reserved = fields
        .data_directory(pe::ImageDirectoryEntry::Reserved)
        .unwrap();
    assert_eq!(*reserved, directory(15));
}

#[test]
fn pe64_without_directories() {
    let mut image = Image::default();
    image.push(&pe64_base(0)).push_bytes(&[0xcc; 8]);
    let mut stream = image.into_cursor();

    let header = OptionalHeader::parse(&mut stream, 112).unwrap().unwrap();
    assert!(header.is_64());
    assert_eq!(stream.position(), 112);

    assert_eq!(
        header.as_pe64(),
        Some(&pe64_decoded(0, Default::default()))
    );

    let fields = header.fields();
    assert_eq!(fields.magic(), pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC);
    assert_eq!(fields.address_of_entry_point(), 0x1400);
    assert!(fields.data_directories().is_empty());
    assert!(fields
        .data_directory(pe::ImageDirectoryEntry::Export)
        .is_none());
}

#[test]
fn pe64_partial_directories() {
    let mut image = Image::default();
    image.push(&pe64_base(3));
    push_directories(&mut image, 3);
    let mut stream = image.into_cursor();

    let header = OptionalHeader::parse(&mut stream, 136).unwrap().unwrap();
    let mut directories = [pe::ImageDataDirectory::default(); 16];
    directories[..3].copy_from_slice(&[directory(0), directory(1), directory(2)]);
    assert_eq!(header.as_pe64(), Some(&pe64_decoded(3, directories)));
    assert_eq!(header.fields().data_directories().len(), 3);
}

#[test]
fn magic_selects_layout() {
    // The magic bytes alone decide the layout, regardless of the declared size.
    let mut image = Image::default();
    image.push(&pe32_base(0));
    let error = OptionalHeader::parse(&mut image.into_cursor(), 112).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Size);

    let mut image = Image::default();
    image.push_bytes(&[0x0b, 0x03]).push_bytes(&[0; 110]);
    match OptionalHeader::parse(&mut image.into_cursor(), 112) {
        Err(Error::UnexpectedMagic(0x30b)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn directory_size_mismatch() {
    // Three directories declared but only 16 bytes of room.
    let mut image = Image::default();
    image.push(&pe32_base(3));
    push_directories(&mut image, 3);
    let mut stream = image.into_cursor();

    let error = OptionalHeader::parse(&mut stream, 112).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Size);
    assert_eq!(
        error.to_string(),
        "Size of data directories 16 is inconsistent with number of data directories 3"
    );
    assert_eq!(stream.position(), 96);
}

#[test]
fn excess_directories_are_dropped() {
    let mut image = Image::default();
    image.push(&pe32_base(18));
    push_directories(&mut image, 18);
    let mut stream = image.into_cursor();

    let header = OptionalHeader::parse(&mut stream, 96 + 18 * 8)
        .unwrap()
        .unwrap();
    assert_eq!(stream.position(), 96 + 18 * 8);
    let pe32 = header.as_pe32().unwrap();
    assert_eq!(pe32.number_of_rva_and_sizes, 18);
    assert_eq!(pe32.data_directory[15], directory(15));
    assert_eq!(header.fields().data_directories().len(), 16);
}

#[test]
fn parse_after_file_header() {
    let mut image = Image::default();
    image.push(&file_header(104, 0, 0)).push(&pe32_base(1));
    push_directories(&mut image, 1);
    let mut stream = image.into_cursor();

    let header = read_file_header(&mut stream).unwrap();
    let optional = OptionalHeader::parse_for(&header, &mut stream)
        .unwrap()
        .unwrap();
    assert_eq!(stream.position(), 124);
    assert_eq!(optional.fields().image_base(), 0x0040_0000);
    assert_eq!(optional.fields().data_directories(), [directory(0)]);

    let mut image = Image::default();
    image.push(&file_header(0, 0, 0)).push(&pe32_base(0));
    let mut stream = image.into_cursor();
    let header = read_file_header(&mut stream).unwrap();
    assert_eq!(OptionalHeader::parse_for(&header, &mut stream).unwrap(), None);
    assert_eq!(stream.position(), 20);
}

#[test]
fn truncated_directories() {
    let mut image = Image::default();
    image.push(&pe32_base(2));
    push_directories(&mut image, 1);
    let error = OptionalHeader::parse(&mut image.into_cursor(), 112).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(std::error::Error::source(&error).is_some());
}
