//! Types for compile-time endianness.
//!
//! PE/COFF structures are always little-endian, but fields are stored as
//! byte arrays so that records can be decoded from any buffer without
//! alignment concerns.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

/// A trait for using an endianness specification.
///
/// Provides methods for converting between the specified endianness and
/// the native endianness of the target machine.
pub trait Endian: Debug + Default + Clone + Copy + PartialEq + Eq + 'static {
    /// Return true for big endian byte order.
    fn is_big_endian(self) -> bool;

    /// Return true for little endian byte order.
    #[inline]
    fn is_little_endian(self) -> bool {
        !self.is_big_endian()
    }

    /// Converts an unaligned unsigned 16 bit integer to native endian.
    #[inline]
    fn read_u16_bytes(self, n: [u8; 2]) -> u16 {
        if self.is_big_endian() {
            u16::from_be_bytes(n)
        } else {
            u16::from_le_bytes(n)
        }
    }

    /// Converts an unaligned unsigned 32 bit integer to native endian.
    #[inline]
    fn read_u32_bytes(self, n: [u8; 4]) -> u32 {
        if self.is_big_endian() {
            u32::from_be_bytes(n)
        } else {
            u32::from_le_bytes(n)
        }
    }

    /// Converts an unaligned unsigned 64 bit integer to native endian.
    #[inline]
    fn read_u64_bytes(self, n: [u8; 8]) -> u64 {
        if self.is_big_endian() {
            u64::from_be_bytes(n)
        } else {
            u64::from_le_bytes(n)
        }
    }

    /// Converts an unaligned signed 16 bit integer to native endian.
    #[inline]
    fn read_i16_bytes(self, n: [u8; 2]) -> i16 {
        if self.is_big_endian() {
            i16::from_be_bytes(n)
        } else {
            i16::from_le_bytes(n)
        }
    }

    /// Converts an unsigned 16 bit integer from native endian.
    #[inline]
    fn write_u16_bytes(self, n: u16) -> [u8; 2] {
        if self.is_big_endian() {
            n.to_be_bytes()
        } else {
            n.to_le_bytes()
        }
    }

    /// Converts an unsigned 32 bit integer from native endian.
    #[inline]
    fn write_u32_bytes(self, n: u32) -> [u8; 4] {
        if self.is_big_endian() {
            n.to_be_bytes()
        } else {
            n.to_le_bytes()
        }
    }

    /// Converts an unsigned 64 bit integer from native endian.
    #[inline]
    fn write_u64_bytes(self, n: u64) -> [u8; 8] {
        if self.is_big_endian() {
            n.to_be_bytes()
        } else {
            n.to_le_bytes()
        }
    }

    /// Converts a signed 16 bit integer from native endian.
    #[inline]
    fn write_i16_bytes(self, n: i16) -> [u8; 2] {
        if self.is_big_endian() {
            n.to_be_bytes()
        } else {
            n.to_le_bytes()
        }
    }
}

/// Compile-time little endian byte order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LittleEndian;

impl Endian for LittleEndian {
    #[inline]
    fn is_big_endian(self) -> bool {
        false
    }
}

/// An alias for [`LittleEndian`].
pub type LE = LittleEndian;

macro_rules! unaligned_int {
    ($(#[$doc:meta])* $name:ident, $int:ty, $size:expr, $read:ident, $write:ident) => {
        $(#[$doc])*
        #[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name<E: Endian>([u8; $size], PhantomData<E>);

        impl<E: Endian> $name<E> {
            /// Construct a new value given bytes that already have the required endianness.
            pub const fn from_bytes(n: [u8; $size]) -> Self {
                Self(n, PhantomData)
            }

            /// Construct a new value given a native endian value.
            pub fn new(e: E, n: $int) -> Self {
                Self(e.$write(n), PhantomData)
            }

            /// Return the value as a native endian value.
            pub fn get(self, e: E) -> $int {
                e.$read(self.0)
            }

            /// Set the value given a native endian value.
            pub fn set(&mut self, e: E, n: $int) {
                self.0 = e.$write(n);
            }
        }

        impl<E: Endian> Debug for $name<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.get(E::default()))
            }
        }
    };
}

unaligned_int!(
    /// An unaligned `u16` value with an externally specified endianness of type `E`.
    U16Bytes, u16, 2, read_u16_bytes, write_u16_bytes
);
unaligned_int!(
    /// An unaligned `u32` value with an externally specified endianness of type `E`.
    U32Bytes, u32, 4, read_u32_bytes, write_u32_bytes
);
unaligned_int!(
    /// An unaligned `u64` value with an externally specified endianness of type `E`.
    U64Bytes, u64, 8, read_u64_bytes, write_u64_bytes
);
unaligned_int!(
    /// An unaligned `i16` value with an externally specified endianness of type `E`.
    I16Bytes, i16, 2, read_i16_bytes, write_i16_bytes
);

/// A `u16` value with an externally specified endianness of type `E`.
pub type U16<E> = U16Bytes<E>;
/// A `u32` value with an externally specified endianness of type `E`.
pub type U32<E> = U32Bytes<E>;
/// A `u64` value with an externally specified endianness of type `E`.
pub type U64<E> = U64Bytes<E>;
/// An `i16` value with an externally specified endianness of type `E`.
pub type I16<E> = I16Bytes<E>;
