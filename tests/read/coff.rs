use pecoff::pe;
use pecoff::read::coff::{compact_symbols, read_file_header, read_symbols, SymbolTable};
use pecoff::read::{ErrorKind, SymbolIndex};
use pecoff::{LittleEndian as LE, I16, U16, U32};
use std::io::{Seek, SeekFrom};

use super::{file_header, Image};

fn symbol(name: [u8; 8], section_number: i16, storage_class: u8, aux: u8) -> pe::ImageSymbol {
    pe::ImageSymbol {
        name,
        value: U32::new(LE, 0),
        section_number: I16::new(LE, section_number),
        typ: U16::new(LE, 0),
        storage_class,
        number_of_aux_symbols: aux,
    }
}

fn inline(name: &[u8]) -> [u8; 8] {
    let mut bytes = [0; 8];
    bytes[..name.len()].copy_from_slice(name);
    bytes
}

fn long(offset: u32) -> [u8; 8] {
    let mut bytes = [0; 8];
    bytes[4..].copy_from_slice(&offset.to_le_bytes());
    bytes
}

fn string_table(strings: &[&str]) -> Vec<u8> {
    let mut data = vec![0; 4];
    for s in strings {
        data.extend_from_slice(s.as_bytes());
        data.push(0);
    }
    let len = data.len() as u32;
    data[..4].copy_from_slice(&len.to_le_bytes());
    data
}

/// A file header followed by the given symbols and string table.
fn object(symbols: &[pe::ImageSymbol], strings: &[u8]) -> Image {
    let mut image = Image::default();
    image.push(&file_header(0, 20, symbols.len() as u32));
    for symbol in symbols {
        image.push(symbol);
    }
    image.push_bytes(strings);
    image
}

#[test]
fn absent_symbol_table() {
    let junk = [0xaa; 64];

    for (pointer, count) in [(0, 2), (20, 0), (0, 0)] {
        let mut image = Image::default();
        image.push(&file_header(0, pointer, count)).push_bytes(&junk);
        let mut stream = image.into_cursor();
        let header = read_file_header(&mut stream).unwrap();

        assert!(read_symbols(&header, &mut stream).unwrap().is_empty());
        let table = SymbolTable::parse(&header, &mut stream).unwrap();
        assert!(table.is_empty());
        assert!(table.strings().is_empty());
        assert!(table.symbols().unwrap().is_empty());
    }
}

#[test]
fn aux_records_are_dropped() {
    let symbols = [
        symbol(inline(b"foo"), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 2),
        symbol(inline(b"auxA"), 0, 0, 0),
        symbol(inline(b"auxB"), 0, 0, 0),
        symbol(inline(b"bar"), 0, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
    ];
    let mut stream = object(&symbols, &string_table(&[])).into_cursor();
    let header = read_file_header(&mut stream).unwrap();

    let raw = read_symbols(&header, &mut stream).unwrap();
    assert_eq!(raw, symbols);

    let table = SymbolTable::parse(&header, &mut stream).unwrap();
    assert_eq!(table.len(), 4);
    let names: Vec<_> = table
        .symbols()
        .unwrap()
        .iter()
        .map(|symbol| symbol.name().to_string())
        .collect();
    assert_eq!(names, ["foo", "bar"]);
    let indices: Vec<_> = table.primary().map(|(index, _)| index).collect();
    assert_eq!(indices, [SymbolIndex(0), SymbolIndex(3)]);
}

#[test]
fn long_and_short_names() {
    let strings = string_table(&["_long_symbol_name", "another_long_name"]);
    let symbols = [
        symbol(long(4), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
        symbol(inline(b"abc"), 2, pe::IMAGE_SYM_CLASS_STATIC, 0),
        symbol(long(22), 0, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
        symbol(*b"exactly8", -1, pe::IMAGE_SYM_CLASS_STATIC, 0),
    ];
    let mut stream = object(&symbols, &strings).into_cursor();
    let header = read_file_header(&mut stream).unwrap();
    let table = SymbolTable::parse(&header, &mut stream).unwrap();

    assert_eq!(table.strings().data(), &strings[..]);
    let compacted = table.symbols().unwrap();
    let names: Vec<_> = compacted.iter().map(|symbol| symbol.name()).collect();
    assert_eq!(
        names,
        ["_long_symbol_name", "abc", "another_long_name", "exactly8"]
    );
    assert_eq!(compacted[1].section_number(), 2);
    assert_eq!(compacted[3].section_number(), pe::IMAGE_SYM_ABSOLUTE);
}

#[test]
fn empty_string_table() {
    // A length of 4 or less means there are no strings.
    for strings in [&[][..], &[4, 0, 0, 0][..], &[2, 0, 0, 0, b'x', 0][..]] {
        let symbols = [
            symbol(inline(b"abc"), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
            symbol(long(4), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
        ];
        let mut stream = object(&symbols, strings).into_cursor();
        let header = read_file_header(&mut stream).unwrap();
        let table = match SymbolTable::parse(&header, &mut stream) {
            Ok(table) => table,
            // No length field at all.
            Err(error) => {
                assert!(strings.is_empty());
                assert_eq!(error.kind(), ErrorKind::Io);
                continue;
            }
        };
        assert!(table.strings().is_empty());

        let error = table.symbols().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Name);

        let first = compact_symbols(&table.raw()[..1], table.strings()).unwrap();
        assert_eq!(first[0].name(), "abc");
    }
}

#[test]
fn bad_name_fails_compaction() {
    let strings = string_table(&["ok_name"]);
    let symbols = [
        symbol(long(4), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
        symbol(long(1000), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
    ];
    let mut stream = object(&symbols, &strings).into_cursor();
    let header = read_file_header(&mut stream).unwrap();
    let table = SymbolTable::parse(&header, &mut stream).unwrap();

    let error = table.symbols().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Name);
    assert!(error.to_string().contains("1000"));
}

#[test]
fn truncated_symbol_table() {
    let symbols = [symbol(inline(b"foo"), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0)];
    let mut image = Image::default();
    image.push(&file_header(0, 20, 3));
    image.push(&symbols[0]);
    let mut stream = image.into_cursor();
    let header = read_file_header(&mut stream).unwrap();

    let error = read_symbols(&header, &mut stream).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(error.to_string().contains("symbol table"));
}

#[test]
fn huge_symbol_count() {
    let mut image = Image::default();
    image.push(&file_header(0, 20, 0xffff_ffff));
    image.push(&symbol(inline(b"foo"), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0));
    image.push_bytes(&string_table(&["unused"]));
    let mut stream = image.into_cursor();
    let header = read_file_header(&mut stream).unwrap();

    let error = read_symbols(&header, &mut stream).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(error.to_string().contains("symbol table"));

    stream.seek(SeekFrom::Start(20)).unwrap();
    let error = SymbolTable::parse(&header, &mut stream).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn huge_string_table_length() {
    let symbols = [symbol(long(4), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0)];
    let mut strings = string_table(&["a_long_function_name"]);
    strings[..4].copy_from_slice(&0xffff_fff0u32.to_le_bytes());
    let mut stream = object(&symbols, &strings).into_cursor();
    let header = read_file_header(&mut stream).unwrap();

    let error = SymbolTable::parse(&header, &mut stream).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(error.to_string().starts_with("Failed to read string table:"));
}

#[test]
fn repeated_reads_are_identical() {
    let strings = string_table(&["a_long_function_name"]);
    let symbols = [
        symbol(inline(b".text"), 1, pe::IMAGE_SYM_CLASS_STATIC, 1),
        symbol([0; 8], 0, 0, 0),
        symbol(long(4), 1, pe::IMAGE_SYM_CLASS_EXTERNAL, 0),
    ];
    let mut stream = object(&symbols, &strings).into_cursor();

    let header = read_file_header(&mut stream).unwrap();
    let first = SymbolTable::parse(&header, &mut stream)
        .unwrap()
        .symbols()
        .unwrap();
    stream.seek(SeekFrom::Start(0)).unwrap();
    let header = read_file_header(&mut stream).unwrap();
    let second = SymbolTable::parse(&header, &mut stream)
        .unwrap()
        .symbols()
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn section_aux_record() {
    let aux = pe::ImageAuxSymbolSection {
        length: U32::new(LE, 0x24),
        number_of_relocations: U16::new(LE, 1),
        number_of_linenumbers: U16::new(LE, 0),
        check_sum: U32::new(LE, 0x1234_5678),
        number: U16::new(LE, 0),
        selection: 0,
        ..Default::default()
    };
    let mut image = Image::default();
    image.push(&file_header(0, 20, 2));
    image.push(&symbol(inline(b".text"), 1, pe::IMAGE_SYM_CLASS_STATIC, 1));
    image.push(&aux);
    image.push_bytes(&string_table(&[]));
    let mut stream = image.into_cursor();
    let header = read_file_header(&mut stream).unwrap();
    let table = SymbolTable::parse(&header, &mut stream).unwrap();

    let section = table.aux_section(SymbolIndex(0)).unwrap();
    assert_eq!(section.length.get(LE), 0x24);
    assert_eq!(section.number_of_relocations.get(LE), 1);
    assert_eq!(section.check_sum.get(LE), 0x1234_5678);
    assert_eq!(table.symbols().unwrap().len(), 1);
}
