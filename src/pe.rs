//! PE/COFF definitions.
//!
//! These definitions are independent of read support, although we do implement
//! some traits useful for reading.
//!
//! This module is based heavily on "winnt.h" (10.0.17763.0).

#![allow(missing_docs)]

use crate::endian::{LittleEndian as LE, I16, U16, U32, U64};
use crate::pod::Pod;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageFileHeader {
    pub machine: U16<LE>,
    pub number_of_sections: U16<LE>,
    pub time_date_stamp: U32<LE>,
    pub pointer_to_symbol_table: U32<LE>,
    pub number_of_symbols: U32<LE>,
    pub size_of_optional_header: U16<LE>,
    pub characteristics: U16<LE>,
}

pub const IMAGE_SIZEOF_FILE_HEADER: usize = 20;

/// Relocation info stripped from file.
pub const IMAGE_FILE_RELOCS_STRIPPED: u16 = 0x0001;
/// File is executable  (i.e. no unresolved external references).
pub const IMAGE_FILE_EXECUTABLE_IMAGE: u16 = 0x0002;
/// Line nunbers stripped from file.
pub const IMAGE_FILE_LINE_NUMS_STRIPPED: u16 = 0x0004;
/// Local symbols stripped from file.
pub const IMAGE_FILE_LOCAL_SYMS_STRIPPED: u16 = 0x0008;
/// Aggressively trim working set
pub const IMAGE_FILE_AGGRESIVE_WS_TRIM: u16 = 0x0010;
/// App can handle >2gb addresses
pub const IMAGE_FILE_LARGE_ADDRESS_AWARE: u16 = 0x0020;
/// Bytes of machine word are reversed.
pub const IMAGE_FILE_BYTES_REVERSED_LO: u16 = 0x0080;
/// 32 bit word machine.
pub const IMAGE_FILE_32BIT_MACHINE: u16 = 0x0100;
/// Debugging info stripped from file in .DBG file
pub const IMAGE_FILE_DEBUG_STRIPPED: u16 = 0x0200;
/// If Image is on removable media, copy and run from the swap file.
pub const IMAGE_FILE_REMOVABLE_RUN_FROM_SWAP: u16 = 0x0400;
/// If Image is on Net, copy and run from the swap file.
pub const IMAGE_FILE_NET_RUN_FROM_SWAP: u16 = 0x0800;
/// System File.
pub const IMAGE_FILE_SYSTEM: u16 = 0x1000;
/// File is a DLL.
pub const IMAGE_FILE_DLL: u16 = 0x2000;
/// File should only be run on a UP machine
pub const IMAGE_FILE_UP_SYSTEM_ONLY: u16 = 0x4000;
/// Bytes of machine word are reversed.
pub const IMAGE_FILE_BYTES_REVERSED_HI: u16 = 0x8000;

pub const IMAGE_FILE_MACHINE_UNKNOWN: u16 = 0;
/// Matsushita AM33
pub const IMAGE_FILE_MACHINE_AM33: u16 = 0x01d3;
/// AMD64 (K8)
pub const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;
/// ARM Little-Endian
pub const IMAGE_FILE_MACHINE_ARM: u16 = 0x01c0;
/// ARM Thumb-2 Little-Endian
pub const IMAGE_FILE_MACHINE_ARMNT: u16 = 0x01c4;
/// ARM64 Little-Endian
pub const IMAGE_FILE_MACHINE_ARM64: u16 = 0xaa64;
/// EFI Byte Code
pub const IMAGE_FILE_MACHINE_EBC: u16 = 0x0ebc;
/// Intel 386.
pub const IMAGE_FILE_MACHINE_I386: u16 = 0x014c;
/// Intel 64
pub const IMAGE_FILE_MACHINE_IA64: u16 = 0x0200;
/// M32R little-endian
pub const IMAGE_FILE_MACHINE_M32R: u16 = 0x9041;
/// MIPS
pub const IMAGE_FILE_MACHINE_MIPS16: u16 = 0x0266;
/// MIPS
pub const IMAGE_FILE_MACHINE_MIPSFPU: u16 = 0x0366;
/// MIPS
pub const IMAGE_FILE_MACHINE_MIPSFPU16: u16 = 0x0466;
/// IBM PowerPC Little-Endian
pub const IMAGE_FILE_MACHINE_POWERPC: u16 = 0x01f0;
pub const IMAGE_FILE_MACHINE_POWERPCFP: u16 = 0x01f1;
/// MIPS little-endian, 0x160 big-endian
pub const IMAGE_FILE_MACHINE_R4000: u16 = 0x0166;
/// RISC-V 32-bit address space
pub const IMAGE_FILE_MACHINE_RISCV32: u16 = 0x5032;
/// RISC-V 64-bit address space
pub const IMAGE_FILE_MACHINE_RISCV64: u16 = 0x5064;
/// RISC-V 128-bit address space
pub const IMAGE_FILE_MACHINE_RISCV128: u16 = 0x5128;
/// SH3 little-endian
pub const IMAGE_FILE_MACHINE_SH3: u16 = 0x01a2;
pub const IMAGE_FILE_MACHINE_SH3DSP: u16 = 0x01a3;
/// SH4 little-endian
pub const IMAGE_FILE_MACHINE_SH4: u16 = 0x01a6;
/// SH5
pub const IMAGE_FILE_MACHINE_SH5: u16 = 0x01a8;
/// ARM Thumb/Thumb-2 Little-Endian
pub const IMAGE_FILE_MACHINE_THUMB: u16 = 0x01c2;
/// MIPS little-endian WCE v2
pub const IMAGE_FILE_MACHINE_WCEMIPSV2: u16 = 0x0169;

/// The machine types that can appear in `ImageFileHeader::machine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Machine {
    Unknown,
    Am33,
    Amd64,
    Arm,
    ArmNt,
    Arm64,
    Ebc,
    I386,
    Ia64,
    M32R,
    Mips16,
    MipsFpu,
    MipsFpu16,
    PowerPc,
    PowerPcFp,
    R4000,
    RiscV32,
    RiscV64,
    RiscV128,
    Sh3,
    Sh3Dsp,
    Sh4,
    Sh5,
    Thumb,
    WceMipsV2,
}

impl Machine {
    /// Map a raw `IMAGE_FILE_MACHINE_*` value to a machine type.
    ///
    /// Returns `None` for values that are not listed in this module.
    pub fn from_raw(machine: u16) -> Option<Machine> {
        Some(match machine {
            IMAGE_FILE_MACHINE_UNKNOWN => Machine::Unknown,
            IMAGE_FILE_MACHINE_AM33 => Machine::Am33,
            IMAGE_FILE_MACHINE_AMD64 => Machine::Amd64,
            IMAGE_FILE_MACHINE_ARM => Machine::Arm,
            IMAGE_FILE_MACHINE_ARMNT => Machine::ArmNt,
            IMAGE_FILE_MACHINE_ARM64 => Machine::Arm64,
            IMAGE_FILE_MACHINE_EBC => Machine::Ebc,
            IMAGE_FILE_MACHINE_I386 => Machine::I386,
            IMAGE_FILE_MACHINE_IA64 => Machine::Ia64,
            IMAGE_FILE_MACHINE_M32R => Machine::M32R,
            IMAGE_FILE_MACHINE_MIPS16 => Machine::Mips16,
            IMAGE_FILE_MACHINE_MIPSFPU => Machine::MipsFpu,
            IMAGE_FILE_MACHINE_MIPSFPU16 => Machine::MipsFpu16,
            IMAGE_FILE_MACHINE_POWERPC => Machine::PowerPc,
            IMAGE_FILE_MACHINE_POWERPCFP => Machine::PowerPcFp,
            IMAGE_FILE_MACHINE_R4000 => Machine::R4000,
            IMAGE_FILE_MACHINE_RISCV32 => Machine::RiscV32,
            IMAGE_FILE_MACHINE_RISCV64 => Machine::RiscV64,
            IMAGE_FILE_MACHINE_RISCV128 => Machine::RiscV128,
            IMAGE_FILE_MACHINE_SH3 => Machine::Sh3,
            IMAGE_FILE_MACHINE_SH3DSP => Machine::Sh3Dsp,
            IMAGE_FILE_MACHINE_SH4 => Machine::Sh4,
            IMAGE_FILE_MACHINE_SH5 => Machine::Sh5,
            IMAGE_FILE_MACHINE_THUMB => Machine::Thumb,
            IMAGE_FILE_MACHINE_WCEMIPSV2 => Machine::WceMipsV2,
            _ => return None,
        })
    }

    /// The raw `IMAGE_FILE_MACHINE_*` value.
    pub fn raw(self) -> u16 {
        match self {
            Machine::Unknown => IMAGE_FILE_MACHINE_UNKNOWN,
            Machine::Am33 => IMAGE_FILE_MACHINE_AM33,
            Machine::Amd64 => IMAGE_FILE_MACHINE_AMD64,
            Machine::Arm => IMAGE_FILE_MACHINE_ARM,
            Machine::ArmNt => IMAGE_FILE_MACHINE_ARMNT,
            Machine::Arm64 => IMAGE_FILE_MACHINE_ARM64,
            Machine::Ebc => IMAGE_FILE_MACHINE_EBC,
            Machine::I386 => IMAGE_FILE_MACHINE_I386,
            Machine::Ia64 => IMAGE_FILE_MACHINE_IA64,
            Machine::M32R => IMAGE_FILE_MACHINE_M32R,
            Machine::Mips16 => IMAGE_FILE_MACHINE_MIPS16,
            Machine::MipsFpu => IMAGE_FILE_MACHINE_MIPSFPU,
            Machine::MipsFpu16 => IMAGE_FILE_MACHINE_MIPSFPU16,
            Machine::PowerPc => IMAGE_FILE_MACHINE_POWERPC,
            Machine::PowerPcFp => IMAGE_FILE_MACHINE_POWERPCFP,
            Machine::R4000 => IMAGE_FILE_MACHINE_R4000,
            Machine::RiscV32 => IMAGE_FILE_MACHINE_RISCV32,
            Machine::RiscV64 => IMAGE_FILE_MACHINE_RISCV64,
            Machine::RiscV128 => IMAGE_FILE_MACHINE_RISCV128,
            Machine::Sh3 => IMAGE_FILE_MACHINE_SH3,
            Machine::Sh3Dsp => IMAGE_FILE_MACHINE_SH3DSP,
            Machine::Sh4 => IMAGE_FILE_MACHINE_SH4,
            Machine::Sh5 => IMAGE_FILE_MACHINE_SH5,
            Machine::Thumb => IMAGE_FILE_MACHINE_THUMB,
            Machine::WceMipsV2 => IMAGE_FILE_MACHINE_WCEMIPSV2,
        }
    }
}

impl ImageFileHeader {
    /// The machine type, if it is one of the known values.
    #[inline]
    pub fn machine(&self) -> Option<Machine> {
        Machine::from_raw(self.machine.get(LE))
    }

    /// Return true if the header declares a symbol table.
    ///
    /// Both the file offset and the symbol count must be nonzero.
    #[inline]
    pub fn has_symbol_table(&self) -> bool {
        self.pointer_to_symbol_table.get(LE) != 0 && self.number_of_symbols.get(LE) != 0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageDataDirectory {
    pub virtual_address: U32<LE>,
    pub size: U32<LE>,
}

pub const IMAGE_NUMBEROF_DIRECTORY_ENTRIES: usize = 16;

//
// Optional header format.
//

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageOptionalHeader32 {
    // Standard fields.
    pub magic: U16<LE>,
    pub major_linker_version: u8,
    pub minor_linker_version: u8,
    pub size_of_code: U32<LE>,
    pub size_of_initialized_data: U32<LE>,
    pub size_of_uninitialized_data: U32<LE>,
    pub address_of_entry_point: U32<LE>,
    pub base_of_code: U32<LE>,
    pub base_of_data: U32<LE>,

    // NT additional fields.
    pub image_base: U32<LE>,
    pub section_alignment: U32<LE>,
    pub file_alignment: U32<LE>,
    pub major_operating_system_version: U16<LE>,
    pub minor_operating_system_version: U16<LE>,
    pub major_image_version: U16<LE>,
    pub minor_image_version: U16<LE>,
    pub major_subsystem_version: U16<LE>,
    pub minor_subsystem_version: U16<LE>,
    pub win32_version_value: U32<LE>,
    pub size_of_image: U32<LE>,
    pub size_of_headers: U32<LE>,
    pub check_sum: U32<LE>,
    pub subsystem: U16<LE>,
    pub dll_characteristics: U16<LE>,
    pub size_of_stack_reserve: U32<LE>,
    pub size_of_stack_commit: U32<LE>,
    pub size_of_heap_reserve: U32<LE>,
    pub size_of_heap_commit: U32<LE>,
    pub loader_flags: U32<LE>,
    pub number_of_rva_and_sizes: U32<LE>,
    // Note: DataDirectory is not included.
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageOptionalHeader64 {
    pub magic: U16<LE>,
    pub major_linker_version: u8,
    pub minor_linker_version: u8,
    pub size_of_code: U32<LE>,
    pub size_of_initialized_data: U32<LE>,
    pub size_of_uninitialized_data: U32<LE>,
    pub address_of_entry_point: U32<LE>,
    pub base_of_code: U32<LE>,
    pub image_base: U64<LE>,
    pub section_alignment: U32<LE>,
    pub file_alignment: U32<LE>,
    pub major_operating_system_version: U16<LE>,
    pub minor_operating_system_version: U16<LE>,
    pub major_image_version: U16<LE>,
    pub minor_image_version: U16<LE>,
    pub major_subsystem_version: U16<LE>,
    pub minor_subsystem_version: U16<LE>,
    pub win32_version_value: U32<LE>,
    pub size_of_image: U32<LE>,
    pub size_of_headers: U32<LE>,
    pub check_sum: U32<LE>,
    pub subsystem: U16<LE>,
    pub dll_characteristics: U16<LE>,
    pub size_of_stack_reserve: U64<LE>,
    pub size_of_stack_commit: U64<LE>,
    pub size_of_heap_reserve: U64<LE>,
    pub size_of_heap_commit: U64<LE>,
    pub loader_flags: U32<LE>,
    pub number_of_rva_and_sizes: U32<LE>,
    // Note: DataDirectory is not included.
}

pub const IMAGE_NT_OPTIONAL_HDR32_MAGIC: u16 = 0x10b;
pub const IMAGE_NT_OPTIONAL_HDR64_MAGIC: u16 = 0x20b;
pub const IMAGE_ROM_OPTIONAL_HDR_MAGIC: u16 = 0x107;

// Subsystem Values

/// Unknown subsystem.
pub const IMAGE_SUBSYSTEM_UNKNOWN: u16 = 0;
/// Image doesn't require a subsystem.
pub const IMAGE_SUBSYSTEM_NATIVE: u16 = 1;
/// Image runs in the Windows GUI subsystem.
pub const IMAGE_SUBSYSTEM_WINDOWS_GUI: u16 = 2;
/// Image runs in the Windows character subsystem.
pub const IMAGE_SUBSYSTEM_WINDOWS_CUI: u16 = 3;
/// image runs in the OS/2 character subsystem.
pub const IMAGE_SUBSYSTEM_OS2_CUI: u16 = 5;
/// image runs in the Posix character subsystem.
pub const IMAGE_SUBSYSTEM_POSIX_CUI: u16 = 7;
/// image is a native Win9x driver.
pub const IMAGE_SUBSYSTEM_NATIVE_WINDOWS: u16 = 8;
/// Image runs in the Windows CE subsystem.
pub const IMAGE_SUBSYSTEM_WINDOWS_CE_GUI: u16 = 9;
pub const IMAGE_SUBSYSTEM_EFI_APPLICATION: u16 = 10;
pub const IMAGE_SUBSYSTEM_EFI_BOOT_SERVICE_DRIVER: u16 = 11;
pub const IMAGE_SUBSYSTEM_EFI_RUNTIME_DRIVER: u16 = 12;
pub const IMAGE_SUBSYSTEM_EFI_ROM: u16 = 13;
pub const IMAGE_SUBSYSTEM_XBOX: u16 = 14;
pub const IMAGE_SUBSYSTEM_WINDOWS_BOOT_APPLICATION: u16 = 16;

// DllCharacteristics Entries

/// Image can handle a high entropy 64-bit virtual address space.
pub const IMAGE_DLLCHARACTERISTICS_HIGH_ENTROPY_VA: u16 = 0x0020;
/// DLL can move.
pub const IMAGE_DLLCHARACTERISTICS_DYNAMIC_BASE: u16 = 0x0040;
/// Code Integrity Image
pub const IMAGE_DLLCHARACTERISTICS_FORCE_INTEGRITY: u16 = 0x0080;
/// Image is NX compatible
pub const IMAGE_DLLCHARACTERISTICS_NX_COMPAT: u16 = 0x0100;
/// Image understands isolation and doesn't want it
pub const IMAGE_DLLCHARACTERISTICS_NO_ISOLATION: u16 = 0x0200;
/// Image does not use SEH.  No SE handler may reside in this image
pub const IMAGE_DLLCHARACTERISTICS_NO_SEH: u16 = 0x0400;
/// Do not bind this image.
pub const IMAGE_DLLCHARACTERISTICS_NO_BIND: u16 = 0x0800;
/// Image should execute in an AppContainer
pub const IMAGE_DLLCHARACTERISTICS_APPCONTAINER: u16 = 0x1000;
/// Driver uses WDM model
pub const IMAGE_DLLCHARACTERISTICS_WDM_DRIVER: u16 = 0x2000;
/// Image supports Control Flow Guard.
pub const IMAGE_DLLCHARACTERISTICS_GUARD_CF: u16 = 0x4000;
pub const IMAGE_DLLCHARACTERISTICS_TERMINAL_SERVER_AWARE: u16 = 0x8000;

// Directory Entries

/// Export Directory
pub const IMAGE_DIRECTORY_ENTRY_EXPORT: usize = 0;
/// Import Directory
pub const IMAGE_DIRECTORY_ENTRY_IMPORT: usize = 1;
/// Resource Directory
pub const IMAGE_DIRECTORY_ENTRY_RESOURCE: usize = 2;
/// Exception Directory
pub const IMAGE_DIRECTORY_ENTRY_EXCEPTION: usize = 3;
/// Security Directory
pub const IMAGE_DIRECTORY_ENTRY_SECURITY: usize = 4;
/// Base Relocation Table
pub const IMAGE_DIRECTORY_ENTRY_BASERELOC: usize = 5;
/// Debug Directory
pub const IMAGE_DIRECTORY_ENTRY_DEBUG: usize = 6;
/// Architecture Specific Data
pub const IMAGE_DIRECTORY_ENTRY_ARCHITECTURE: usize = 7;
/// RVA of GP
pub const IMAGE_DIRECTORY_ENTRY_GLOBALPTR: usize = 8;
/// TLS Directory
pub const IMAGE_DIRECTORY_ENTRY_TLS: usize = 9;
/// Load Configuration Directory
pub const IMAGE_DIRECTORY_ENTRY_LOAD_CONFIG: usize = 10;
/// Bound Import Directory in headers
pub const IMAGE_DIRECTORY_ENTRY_BOUND_IMPORT: usize = 11;
/// Import Address Table
pub const IMAGE_DIRECTORY_ENTRY_IAT: usize = 12;
/// Delay Load Import Descriptors
pub const IMAGE_DIRECTORY_ENTRY_DELAY_IMPORT: usize = 13;
/// COM Runtime descriptor
pub const IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR: usize = 14;

/// The meaning of each slot in the optional header data directory array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageDirectoryEntry {
    Export,
    Import,
    Resource,
    Exception,
    Security,
    BaseReloc,
    Debug,
    Architecture,
    GlobalPtr,
    Tls,
    LoadConfig,
    BoundImport,
    Iat,
    DelayImport,
    ComDescriptor,
    /// The last slot has no assigned meaning.
    Reserved,
}

impl ImageDirectoryEntry {
    /// All slots, in index order.
    pub const ALL: [ImageDirectoryEntry; IMAGE_NUMBEROF_DIRECTORY_ENTRIES] = [
        ImageDirectoryEntry::Export,
        ImageDirectoryEntry::Import,
        ImageDirectoryEntry::Resource,
        ImageDirectoryEntry::Exception,
        ImageDirectoryEntry::Security,
        ImageDirectoryEntry::BaseReloc,
        ImageDirectoryEntry::Debug,
        ImageDirectoryEntry::Architecture,
        ImageDirectoryEntry::GlobalPtr,
        ImageDirectoryEntry::Tls,
        ImageDirectoryEntry::LoadConfig,
        ImageDirectoryEntry::BoundImport,
        ImageDirectoryEntry::Iat,
        ImageDirectoryEntry::DelayImport,
        ImageDirectoryEntry::ComDescriptor,
        ImageDirectoryEntry::Reserved,
    ];

    /// The slot at the given index, or `None` if the index is 16 or greater.
    #[inline]
    pub fn from_index(index: usize) -> Option<ImageDirectoryEntry> {
        Self::ALL.get(index).copied()
    }

    /// The index of this slot in the data directory array.
    pub fn index(self) -> usize {
        match self {
            ImageDirectoryEntry::Export => IMAGE_DIRECTORY_ENTRY_EXPORT,
            ImageDirectoryEntry::Import => IMAGE_DIRECTORY_ENTRY_IMPORT,
            ImageDirectoryEntry::Resource => IMAGE_DIRECTORY_ENTRY_RESOURCE,
            ImageDirectoryEntry::Exception => IMAGE_DIRECTORY_ENTRY_EXCEPTION,
            ImageDirectoryEntry::Security => IMAGE_DIRECTORY_ENTRY_SECURITY,
            ImageDirectoryEntry::BaseReloc => IMAGE_DIRECTORY_ENTRY_BASERELOC,
            ImageDirectoryEntry::Debug => IMAGE_DIRECTORY_ENTRY_DEBUG,
            ImageDirectoryEntry::Architecture => IMAGE_DIRECTORY_ENTRY_ARCHITECTURE,
            ImageDirectoryEntry::GlobalPtr => IMAGE_DIRECTORY_ENTRY_GLOBALPTR,
            ImageDirectoryEntry::Tls => IMAGE_DIRECTORY_ENTRY_TLS,
            ImageDirectoryEntry::LoadConfig => IMAGE_DIRECTORY_ENTRY_LOAD_CONFIG,
            ImageDirectoryEntry::BoundImport => IMAGE_DIRECTORY_ENTRY_BOUND_IMPORT,
            ImageDirectoryEntry::Iat => IMAGE_DIRECTORY_ENTRY_IAT,
            ImageDirectoryEntry::DelayImport => IMAGE_DIRECTORY_ENTRY_DELAY_IMPORT,
            ImageDirectoryEntry::ComDescriptor => IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR,
            ImageDirectoryEntry::Reserved => IMAGE_NUMBEROF_DIRECTORY_ENTRIES - 1,
        }
    }
}

//
// Symbol format.
//

// This struct has alignment 1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageSymbol {
    /// If first 4 bytes are 0, then second 4 bytes are offset into string table.
    pub name: [u8; 8],
    pub value: U32<LE>,
    pub section_number: I16<LE>,
    pub typ: U16<LE>,
    pub storage_class: u8,
    pub number_of_aux_symbols: u8,
}

pub const IMAGE_SIZEOF_SYMBOL: usize = 18;

/// Return true if an 8 byte symbol name field holds a string table offset.
///
/// The offset is then stored in the last 4 bytes.
#[inline]
pub fn is_long_name(name: &[u8; 8]) -> bool {
    name[..4] == [0; 4]
}

impl ImageSymbol {
    /// Return true if the name field holds a string table offset.
    #[inline]
    pub fn has_long_name(&self) -> bool {
        is_long_name(&self.name)
    }

    /// Return the base type of the symbol.
    #[inline]
    pub fn base_type(&self) -> u16 {
        self.typ.get(LE) & N_BTMASK
    }

    /// Return the derived type of the symbol.
    #[inline]
    pub fn derived_type(&self) -> u16 {
        (self.typ.get(LE) & N_TMASK) >> N_BTSHFT
    }
}

// Section values.
//
// Symbols have a section number of the section in which they are
// defined. Otherwise, section numbers have the following meanings:

/// Symbol is undefined or is common.
pub const IMAGE_SYM_UNDEFINED: i16 = 0;
/// Symbol is an absolute value.
pub const IMAGE_SYM_ABSOLUTE: i16 = -1;
/// Symbol is a special debug item.
pub const IMAGE_SYM_DEBUG: i16 = -2;

// Type (fundamental) values.

/// no type.
pub const IMAGE_SYM_TYPE_NULL: u16 = 0x0000;
pub const IMAGE_SYM_TYPE_VOID: u16 = 0x0001;
/// type character.
pub const IMAGE_SYM_TYPE_CHAR: u16 = 0x0002;
/// type short integer.
pub const IMAGE_SYM_TYPE_SHORT: u16 = 0x0003;
pub const IMAGE_SYM_TYPE_INT: u16 = 0x0004;
pub const IMAGE_SYM_TYPE_LONG: u16 = 0x0005;
pub const IMAGE_SYM_TYPE_FLOAT: u16 = 0x0006;
pub const IMAGE_SYM_TYPE_DOUBLE: u16 = 0x0007;
pub const IMAGE_SYM_TYPE_STRUCT: u16 = 0x0008;
pub const IMAGE_SYM_TYPE_UNION: u16 = 0x0009;
/// enumeration.
pub const IMAGE_SYM_TYPE_ENUM: u16 = 0x000A;
/// member of enumeration.
pub const IMAGE_SYM_TYPE_MOE: u16 = 0x000B;
pub const IMAGE_SYM_TYPE_BYTE: u16 = 0x000C;
pub const IMAGE_SYM_TYPE_WORD: u16 = 0x000D;
pub const IMAGE_SYM_TYPE_UINT: u16 = 0x000E;
pub const IMAGE_SYM_TYPE_DWORD: u16 = 0x000F;

// Type (derived) values.

/// no derived type.
pub const IMAGE_SYM_DTYPE_NULL: u16 = 0;
/// pointer.
pub const IMAGE_SYM_DTYPE_POINTER: u16 = 1;
/// function.
pub const IMAGE_SYM_DTYPE_FUNCTION: u16 = 2;
/// array.
pub const IMAGE_SYM_DTYPE_ARRAY: u16 = 3;

// Storage classes.
pub const IMAGE_SYM_CLASS_END_OF_FUNCTION: u8 = 0xff;
pub const IMAGE_SYM_CLASS_NULL: u8 = 0x00;
pub const IMAGE_SYM_CLASS_AUTOMATIC: u8 = 0x01;
pub const IMAGE_SYM_CLASS_EXTERNAL: u8 = 0x02;
pub const IMAGE_SYM_CLASS_STATIC: u8 = 0x03;
pub const IMAGE_SYM_CLASS_REGISTER: u8 = 0x04;
pub const IMAGE_SYM_CLASS_EXTERNAL_DEF: u8 = 0x05;
pub const IMAGE_SYM_CLASS_LABEL: u8 = 0x06;
pub const IMAGE_SYM_CLASS_UNDEFINED_LABEL: u8 = 0x07;
pub const IMAGE_SYM_CLASS_MEMBER_OF_STRUCT: u8 = 0x08;
pub const IMAGE_SYM_CLASS_ARGUMENT: u8 = 0x09;
pub const IMAGE_SYM_CLASS_STRUCT_TAG: u8 = 0x0A;
pub const IMAGE_SYM_CLASS_MEMBER_OF_UNION: u8 = 0x0B;
pub const IMAGE_SYM_CLASS_UNION_TAG: u8 = 0x0C;
pub const IMAGE_SYM_CLASS_TYPE_DEFINITION: u8 = 0x0D;
pub const IMAGE_SYM_CLASS_UNDEFINED_STATIC: u8 = 0x0E;
pub const IMAGE_SYM_CLASS_ENUM_TAG: u8 = 0x0F;
pub const IMAGE_SYM_CLASS_MEMBER_OF_ENUM: u8 = 0x10;
pub const IMAGE_SYM_CLASS_REGISTER_PARAM: u8 = 0x11;
pub const IMAGE_SYM_CLASS_BIT_FIELD: u8 = 0x12;

pub const IMAGE_SYM_CLASS_FAR_EXTERNAL: u8 = 0x44;

pub const IMAGE_SYM_CLASS_BLOCK: u8 = 0x64;
pub const IMAGE_SYM_CLASS_FUNCTION: u8 = 0x65;
pub const IMAGE_SYM_CLASS_END_OF_STRUCT: u8 = 0x66;
pub const IMAGE_SYM_CLASS_FILE: u8 = 0x67;
// new
pub const IMAGE_SYM_CLASS_SECTION: u8 = 0x68;
pub const IMAGE_SYM_CLASS_WEAK_EXTERNAL: u8 = 0x69;

pub const IMAGE_SYM_CLASS_CLR_TOKEN: u8 = 0x6B;

// type packing constants

pub const N_BTMASK: u16 = 0x000F;
pub const N_TMASK: u16 = 0x0030;
pub const N_TMASK1: u16 = 0x00C0;
pub const N_TMASK2: u16 = 0x00F0;
pub const N_BTSHFT: usize = 4;
pub const N_TSHIFT: usize = 2;

// Auxiliary entry format.

// Used for both ImageSymbol and ImageSymbolEx (with padding).
// This struct has alignment 1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ImageAuxSymbolSection {
    /// section length
    pub length: U32<LE>,
    /// number of relocation entries
    pub number_of_relocations: U16<LE>,
    /// number of line numbers
    pub number_of_linenumbers: U16<LE>,
    /// checksum for communal
    pub check_sum: U32<LE>,
    /// section number to associate with
    pub number: U16<LE>,
    /// communal selection type
    pub selection: u8,
    pub reserved: u8,
    /// high bits of the section number
    pub high_number: U16<LE>,
}

// Communal selection types.
pub const IMAGE_COMDAT_SELECT_NODUPLICATES: u8 = 1;
pub const IMAGE_COMDAT_SELECT_ANY: u8 = 2;
pub const IMAGE_COMDAT_SELECT_SAME_SIZE: u8 = 3;
pub const IMAGE_COMDAT_SELECT_EXACT_MATCH: u8 = 4;
pub const IMAGE_COMDAT_SELECT_ASSOCIATIVE: u8 = 5;
pub const IMAGE_COMDAT_SELECT_LARGEST: u8 = 6;
pub const IMAGE_COMDAT_SELECT_NEWEST: u8 = 7;

unsafe_impl_pod!(
    ImageFileHeader,
    ImageDataDirectory,
    ImageOptionalHeader32,
    ImageOptionalHeader64,
    ImageSymbol,
    ImageAuxSymbolSection,
);
