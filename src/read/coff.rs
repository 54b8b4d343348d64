//! Support for reading the COFF file header and symbol table.
//!
//! The symbol table is an array of fixed size [`pe::ImageSymbol`] records,
//! where each primary record may be followed by auxiliary records that
//! belong to it. Names longer than 8 bytes are stored in the string table
//! that immediately follows the symbol table.
//!
//! [`SymbolTable::parse`] reads both tables, and [`SymbolTable::symbols`]
//! produces the primary symbols with their names resolved.
//!
//! [`pe::ImageSymbol`]: crate::pe::ImageSymbol

mod header;
pub use header::*;

mod symbol;
pub use symbol::*;
