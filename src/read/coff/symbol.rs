use core::fmt;
use core::slice;

use crate::endian::LittleEndian as LE;
use crate::pe;
use crate::pod::{bytes_of, from_bytes};
use crate::read::{Error, ReadError, ReadStream, Result, SectionIndex, StringTable, SymbolIndex};

/// Read the raw COFF symbol records declared by the file header.
///
/// The symbol table may not be present: if either the symbol table offset or
/// the number of symbols is zero then the result is empty. Otherwise all
/// records are read, including auxiliary records, without interpreting them.
pub fn read_symbols<R: ReadStream + ?Sized>(
    header: &pe::ImageFileHeader,
    stream: &mut R,
) -> Result<Vec<pe::ImageSymbol>> {
    if !header.has_symbol_table() {
        return Ok(Vec::new());
    }
    stream
        .seek_to(header.pointer_to_symbol_table.get(LE).into())
        .read_error("symbol table offset")?;
    stream
        .read_pod_slice(header.number_of_symbols.get(LE) as usize)
        .read_error("symbol table")
}

/// Resolve an 8 byte symbol name field.
///
/// If the first 4 bytes are zero then the last 4 bytes are an offset into the
/// string table. Otherwise the name is inline and padded with nulls.
pub fn resolve_name<'a>(name: &'a [u8; 8], strings: &'a StringTable) -> Result<&'a [u8]> {
    if pe::is_long_name(name) {
        let offset = u32::from_le_bytes([name[4], name[5], name[6], name[7]]);
        strings.get(offset)
    } else {
        Ok(match memchr::memchr(b'\0', name) {
            Some(end) => &name[..end],
            None => &name[..],
        })
    }
}

impl pe::ImageSymbol {
    /// Parse a COFF symbol name.
    ///
    /// `strings` must be the string table that follows the symbol table.
    #[inline]
    pub fn name<'a>(&'a self, strings: &'a StringTable) -> Result<&'a [u8]> {
        resolve_name(&self.name, strings)
    }
}

/// Where a COFF symbol is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolSection {
    /// The symbol is undefined, or is a common symbol.
    Undefined,
    /// The symbol has an absolute value.
    Absolute,
    /// The symbol is a special debug item.
    Debug,
    /// The symbol is defined in the given section.
    Section(SectionIndex),
    /// The section number is negative but not one of the special values.
    Unknown(i16),
}

/// A primary COFF symbol with its name resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    value: u32,
    section_number: i16,
    typ: u16,
    storage_class: u8,
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("name", &self.name)
            .field("value", &format_args!("{:#x}", self.value))
            .field("section_number", &self.section_number)
            .field("typ", &format_args!("{:#06x}", self.typ))
            .field("storage_class", &self.storage_class)
            .finish()
    }
}

impl Symbol {
    /// Create a symbol from a primary record, resolving its name.
    pub fn parse(symbol: &pe::ImageSymbol, strings: &StringTable) -> Result<Self> {
        let name = symbol.name(strings)?;
        Ok(Symbol {
            name: String::from_utf8_lossy(name).into_owned(),
            value: symbol.value.get(LE),
            section_number: symbol.section_number.get(LE),
            typ: symbol.typ.get(LE),
            storage_class: symbol.storage_class,
        })
    }

    /// The resolved name. Invalid UTF-8 is replaced.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The symbol value. Its meaning depends on the section and storage class.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The one-based section number, or one of the `IMAGE_SYM_*` special values.
    #[inline]
    pub fn section_number(&self) -> i16 {
        self.section_number
    }

    /// The symbol type.
    #[inline]
    pub fn typ(&self) -> u16 {
        self.typ
    }

    /// One of the `IMAGE_SYM_CLASS_*` values.
    #[inline]
    pub fn storage_class(&self) -> u8 {
        self.storage_class
    }

    /// Return true if the derived type is a function.
    #[inline]
    pub fn is_function(&self) -> bool {
        (self.typ & pe::N_TMASK) >> pe::N_BTSHFT == pe::IMAGE_SYM_DTYPE_FUNCTION
    }

    /// Decode the section number.
    pub fn section(&self) -> SymbolSection {
        match self.section_number {
            pe::IMAGE_SYM_UNDEFINED => SymbolSection::Undefined,
            pe::IMAGE_SYM_ABSOLUTE => SymbolSection::Absolute,
            pe::IMAGE_SYM_DEBUG => SymbolSection::Debug,
            number if number > 0 => SymbolSection::Section(SectionIndex(number as usize - 1)),
            number => SymbolSection::Unknown(number),
        }
    }
}

/// An iterator over the primary records of a raw symbol table.
///
/// Auxiliary records are skipped without being inspected.
#[derive(Debug, Clone)]
pub struct PrimarySymbolIterator<'a> {
    symbols: &'a [pe::ImageSymbol],
    index: usize,
}

impl<'a> PrimarySymbolIterator<'a> {
    /// Iterate over the primary records in `symbols`.
    pub fn new(symbols: &'a [pe::ImageSymbol]) -> Self {
        PrimarySymbolIterator { symbols, index: 0 }
    }
}

impl<'a> Iterator for PrimarySymbolIterator<'a> {
    type Item = (SymbolIndex, &'a pe::ImageSymbol);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let symbol = self.symbols.get(index)?;
        self.index = index
            .saturating_add(1)
            .saturating_add(symbol.number_of_aux_symbols.into());
        Some((SymbolIndex(index), symbol))
    }
}

/// Convert raw symbol records into primary symbols with resolved names.
///
/// Auxiliary records are dropped. The order of the primary symbols is kept.
/// If any name fails to resolve then the whole conversion fails.
pub fn compact_symbols(
    symbols: &[pe::ImageSymbol],
    strings: &StringTable,
) -> Result<Vec<Symbol>> {
    PrimarySymbolIterator::new(symbols)
        .map(|(_, symbol)| Symbol::parse(symbol, strings))
        .collect()
}

/// A COFF symbol table and the string table that follows it.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: Vec<pe::ImageSymbol>,
    strings: StringTable,
}

impl SymbolTable {
    /// Read the symbol table and string table declared by the file header.
    ///
    /// Both tables are empty if the header declares no symbol table.
    pub fn parse<R: ReadStream + ?Sized>(
        header: &pe::ImageFileHeader,
        stream: &mut R,
    ) -> Result<Self> {
        let symbols = read_symbols(header, stream)?;
        let strings = StringTable::parse(header, stream)?;
        Ok(SymbolTable { symbols, strings })
    }

    /// Create a symbol table from records and strings that have already been read.
    pub fn new(symbols: Vec<pe::ImageSymbol>, strings: StringTable) -> Self {
        SymbolTable { symbols, strings }
    }

    /// Return the raw records, including auxiliary records.
    #[inline]
    pub fn raw(&self) -> &[pe::ImageSymbol] {
        &self.symbols
    }

    /// Return the string table.
    #[inline]
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Return the number of raw records, including auxiliary records.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Return true if the symbol table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Return the raw record at the given index.
    #[inline]
    pub fn get(&self, index: SymbolIndex) -> Option<&pe::ImageSymbol> {
        self.symbols.get(index.0)
    }

    /// Iterate over the raw records.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, pe::ImageSymbol> {
        self.symbols.iter()
    }

    /// Iterate over the primary records, skipping auxiliary records.
    #[inline]
    pub fn primary(&self) -> PrimarySymbolIterator<'_> {
        PrimarySymbolIterator::new(&self.symbols)
    }

    /// Return the primary symbols with their names resolved.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        compact_symbols(&self.symbols, &self.strings)
    }

    /// Return the section definition auxiliary record for a static symbol.
    ///
    /// Section symbols and COMDAT symbols carry this record in the first
    /// auxiliary slot.
    pub fn aux_section(&self, index: SymbolIndex) -> Result<&pe::ImageAuxSymbolSection> {
        let symbol = self.get(index).ok_or(Error::Symbol {
            index: index.0,
            reason: "invalid symbol index",
        })?;
        if symbol.storage_class != pe::IMAGE_SYM_CLASS_STATIC {
            return Err(Error::Symbol {
                index: index.0,
                reason: "incorrect symbol storage class",
            });
        }
        let aux = if symbol.number_of_aux_symbols > 0 {
            index
                .0
                .checked_add(1)
                .and_then(|aux_index| self.symbols.get(aux_index))
        } else {
            None
        };
        aux.and_then(|aux| from_bytes::<pe::ImageAuxSymbolSection>(bytes_of(aux)))
            .map(|(aux, _)| aux)
            .ok_or(Error::Symbol {
                index: index.0,
                reason: "aux symbol unavailable",
            })
    }
}
