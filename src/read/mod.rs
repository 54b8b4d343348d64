//! Interface for reading PE/COFF headers and symbol tables.
//!
//! All decoding happens against a caller-owned byte stream implementing
//! `std::io::Read + std::io::Seek`; see [`ReadStream`].

use std::{error, fmt, io, result};

mod stream;
pub use stream::*;

mod util;
pub use util::*;

#[cfg(feature = "coff")]
pub mod coff;

#[cfg(feature = "pe")]
pub mod pe;

/// The index used to identify a section of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionIndex(pub usize);

/// The index used to identify a raw record in a symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolIndex(pub usize);

/// The category of a read [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A declared length is inconsistent with a fixed record size.
    Size,
    /// The optional header magic is not a recognized value.
    Magic,
    /// The byte stream failed or ended early.
    Io,
    /// A string table offset could not be resolved to a name.
    Name,
    /// A symbol index or auxiliary record lookup was invalid.
    Symbol,
}

/// The error type used within the read module.
#[derive(Debug)]
pub enum Error {
    /// The optional header is too small for the structure it must contain.
    OptionalHeaderTooSmall {
        /// A description of the structure that did not fit.
        what: &'static str,
        /// The declared size of the optional header.
        size: u16,
        /// The minimum size required.
        required: usize,
    },
    /// The byte count of the data directories disagrees with their declared number.
    DataDirectorySize {
        /// The declared byte count remaining after the optional header base.
        size: u16,
        /// The declared number of data directories.
        count: u32,
    },
    /// The optional header magic is neither PE32 nor PE32+.
    UnexpectedMagic(u16),
    /// The stream failed while reading a structure.
    Io {
        /// A description of the structure being read.
        what: &'static str,
        /// The underlying error.
        source: io::Error,
    },
    /// A string table offset could not be resolved.
    StringTable {
        /// The offset that was looked up.
        offset: u32,
        /// Why the lookup failed.
        reason: &'static str,
    },
    /// An invalid symbol table access.
    Symbol {
        /// The symbol index that was accessed.
        index: usize,
        /// Why the access failed.
        reason: &'static str,
    },
}

impl Error {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OptionalHeaderTooSmall { .. } | Error::DataDirectorySize { .. } => {
                ErrorKind::Size
            }
            Error::UnexpectedMagic(_) => ErrorKind::Magic,
            Error::Io { .. } => ErrorKind::Io,
            Error::StringTable { .. } => ErrorKind::Name,
            Error::Symbol { .. } => ErrorKind::Symbol,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OptionalHeaderTooSmall {
                what,
                size,
                required,
            } => write!(
                f,
                "Optional header size {} is less than the {} size {}",
                size, what, required
            ),
            Error::DataDirectorySize { size, count } => write!(
                f,
                "Size of data directories {} is inconsistent with number of data directories {}",
                size, count
            ),
            Error::UnexpectedMagic(magic) => {
                write!(f, "Optional header has unexpected magic {:#x}", magic)
            }
            Error::Io { what, source } => write!(f, "Failed to read {}: {}", what, source),
            Error::StringTable { offset, reason } => {
                write!(f, "String table offset {}: {}", offset, reason)
            }
            Error::Symbol { index, reason } => write!(f, "Symbol {}: {}", index, reason),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The result type used within the read module.
pub type Result<T> = result::Result<T, Error>;

/// Convert a lower level result into an [`Error`] naming the structure being read.
pub trait ReadError<T> {
    /// Annotate a failure with a description of what was being read.
    fn read_error(self, what: &'static str) -> Result<T>;
}

impl<T> ReadError<T> for result::Result<T, io::Error> {
    fn read_error(self, what: &'static str) -> Result<T> {
        self.map_err(|source| Error::Io { what, source })
    }
}

impl<T> ReadError<T> for Option<T> {
    fn read_error(self, what: &'static str) -> Result<T> {
        self.ok_or_else(|| Error::Io {
            what,
            source: io::ErrorKind::UnexpectedEof.into(),
        })
    }
}
