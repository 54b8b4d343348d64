//! # `pecoff`
//!
//! The `pecoff` crate decodes the header and symbol table portions of
//! Microsoft PE/COFF files from any seekable byte stream.
//!
//! ## Raw struct definitions
//!
//! The [`pe`] module defines the on-disk records: the COFF file header, the
//! PE32 and PE32+ optional header bases, data directories, and symbol table
//! records. All fields are stored as unaligned little-endian values and are
//! accessed with `get(LE)`.
//!
//! ## Decoding
//!
//! The [`read`] module decodes those records from a `Read + Seek` stream:
//!
//! * [`read::pe::OptionalHeader::parse`] selects the PE32 or PE32+ layout from
//!   the optional header magic and reads the data directories that follow.
//! * [`read::coff::read_symbols`] reads the raw symbol records, and
//!   [`read::coff::SymbolTable`] pairs them with the string table to produce
//!   primary symbols with resolved names.
//!
//! Absence is not an error: a zero optional header size or an undeclared symbol
//! table decode to `None` or an empty list.
//!
//! ## Example
//! ```no_run
//! use std::fs::File;
//! use std::io::{Seek, SeekFrom};
//! use pecoff::read::{coff, pe::OptionalHeader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = File::open("path/to/object.obj")?;
//! let header = coff::read_file_header(&mut file)?;
//! let optional = OptionalHeader::parse_for(&header, &mut file)?;
//! println!("64-bit: {:?}", optional.map(|h| h.is_64()));
//!
//! let symbols = coff::SymbolTable::parse(&header, &mut file)?;
//! for symbol in symbols.symbols()? {
//!     println!("{} {:#x}", symbol.name(), symbol.value());
//! }
//! # file.seek(SeekFrom::Start(0))?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod endian;
pub use endian::*;

#[macro_use]
pub mod pod;

pub mod pe;

pub mod read;
