//! Support for reading PE optional headers.
//!
//! The optional header follows the COFF file header in PE images. It comes in
//! two incompatible shapes, PE32 and PE32+, selected by its leading magic
//! value. [`OptionalHeader::parse`] reads the magic, decodes the matching
//! shape, and then reads the data directories that follow it.
//!
//! ```
//! use std::io::Cursor;
//! use pecoff::read::pe::OptionalHeader;
//!
//! // An optional header size of zero means there is no optional header.
//! let mut stream = Cursor::new(Vec::new());
//! assert!(OptionalHeader::parse(&mut stream, 0).unwrap().is_none());
//! ```

mod data_directory;
pub use data_directory::*;

mod optional_header;
pub use optional_header::*;
