//! # Byte/Symbol Mapping Table
//!
//! Byte-level BPE never sees raw bytes; every byte is first swapped for a
//! printable `char`, so that arbitrary (even non-UTF-8) input is ordinary
//! text by the time merging starts.
//!
//! The GPT-2 table keeps the printable ISO/IEC 8859-1 characters
//! ``[0x21-0x7E]``, ``[0xA1-0xAC]``, ``[0xAE-0xFF]`` as themselves,
//! and assigns the remaining 68 bytes (in ascending order) to
//! ``U+0100..U+0144``.

use core::fmt::Debug;

use once_cell::sync::Lazy;

use crate::{
    errors::{TCResult, TokenCostError},
    types::TCHashMap,
};

/// `{ char -> u8 }` map.
///
/// ## Style Hints
/// Instance names should prefer `symbol_bytes`, or `symbol_byte_map`.
pub type SymbolByteMap = TCHashMap<char, u8>;

/// `[char; 256]` array.
///
/// ## Style Hints
/// Instance names should prefer `byte_symbols`, or `byte_symbol_array`.
pub type ByteSymbolArray = [char; 256];

static GPT2_BYTE_SYMBOLS: Lazy<ByteSymbolTable> = Lazy::new(|| {
    ByteSymbolTable::from_byte_symbols(&gpt2_byte_symbols())
        .expect("the GPT-2 byte table is a bijection")
});

/// Is this byte one of the printable latin-1 characters that map to themselves?
fn is_self_mapped(b: u8) -> bool {
    matches!(b, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// Build the GPT-2 ``byte -> char`` table.
pub fn gpt2_byte_symbols() -> ByteSymbolArray {
    let mut byte_symbols: ByteSymbolArray = ['\0'; 256];

    let mut n = 0u32;
    for b in 0..=255u8 {
        byte_symbols[b as usize] = if is_self_mapped(b) {
            char::from(b)
        } else {
            let c = char::from_u32(0x100 + n).expect("U+0100..U+0144 are scalar values");
            n += 1;
            c
        };
    }
    debug_assert_eq!(n, 68);

    byte_symbols
}

/// ``0..=255`` Byte/Symbol Bijection Table
///
/// This will always have 256 entries, one for each byte value,
/// and 256 distinct symbols.
#[derive(Clone, PartialEq)]
pub struct ByteSymbolTable {
    /// Table mapping from byte ordinal (position) to symbol.
    byte_symbols: ByteSymbolArray,

    /// Hash map from symbol to byte ordinal value.
    symbol_bytes: SymbolByteMap,
}

impl Debug for ByteSymbolTable {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteSymbolTable")
            .field("space", &self.byte_symbol(b' '))
            .field("newline", &self.byte_symbol(b'\n'))
            .finish()
    }
}

impl Default for ByteSymbolTable {
    fn default() -> Self {
        Self::gpt2().clone()
    }
}

impl ByteSymbolTable {
    /// The shared GPT-2 table.
    pub fn gpt2() -> &'static ByteSymbolTable {
        &GPT2_BYTE_SYMBOLS
    }

    /// Build a table from a byte-ord => symbol table.
    ///
    /// ## Arguments
    /// * `byte_symbols` - A slice of symbols where the index corresponds to the byte value.
    ///
    /// ## Returns
    /// A new `ByteSymbolTable`, or a `VocabConflict` if the map is not a 256-entry bijection.
    pub fn from_byte_symbols(byte_symbols: &[char]) -> TCResult<Self> {
        let byte_symbols: ByteSymbolArray = byte_symbols.try_into().map_err(|_| {
            TokenCostError::VocabConflict(format!(
                "byte symbol table has {} entries, expected 256",
                byte_symbols.len()
            ))
        })?;

        let mut symbol_bytes: SymbolByteMap = byte_symbols
            .iter()
            .enumerate()
            .map(|(b, &c)| (c, b as u8))
            .collect();
        symbol_bytes.shrink_to_fit();

        if symbol_bytes.len() != 256 {
            return Err(TokenCostError::VocabConflict(format!(
                "byte symbol table is not a bijection: {} distinct symbols",
                symbol_bytes.len()
            )));
        }

        Ok(Self {
            byte_symbols,
            symbol_bytes,
        })
    }

    /// Get the byte-ord => symbol table.
    pub fn byte_symbols(&self) -> &ByteSymbolArray {
        &self.byte_symbols
    }

    /// Get the symbol corresponding to a given byte.
    #[inline(always)]
    pub fn byte_symbol(
        &self,
        byte: u8,
    ) -> char {
        self.byte_symbols[byte as usize]
    }

    /// Get the byte corresponding to a given symbol, if any.
    #[inline(always)]
    pub fn symbol_byte(
        &self,
        symbol: char,
    ) -> Option<u8> {
        self.symbol_bytes.get(&symbol).copied()
    }

    /// Append the translated byte symbols to a target buffer.
    pub fn append_symbols(
        &self,
        bytes: &[u8],
        buf: &mut String,
    ) {
        buf.extend(bytes.iter().map(|&b| self.byte_symbol(b)));
    }

    /// Map raw bytes to their symbol string.
    ///
    /// Total; never fails.
    pub fn bytes_to_symbols(
        &self,
        bytes: &[u8],
    ) -> String {
        let mut buf = String::with_capacity(bytes.len() * 2);
        self.append_symbols(bytes, &mut buf);
        buf
    }

    /// Append the bytes of a symbol string to a target buffer.
    ///
    /// ## Returns
    /// `UnknownSymbol` on the first `char` not in the table;
    /// bytes before it have already been appended.
    pub fn append_bytes(
        &self,
        symbols: &str,
        buf: &mut Vec<u8>,
    ) -> TCResult<()> {
        for c in symbols.chars() {
            match self.symbol_byte(c) {
                Some(b) => buf.push(b),
                None => return Err(TokenCostError::UnknownSymbol(c)),
            }
        }
        Ok(())
    }

    /// Map a symbol string back to raw bytes.
    ///
    /// Exact inverse of [`Self::bytes_to_symbols`].
    pub fn symbols_to_bytes(
        &self,
        symbols: &str,
    ) -> TCResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(symbols.len());
        self.append_bytes(symbols, &mut buf)?;
        Ok(buf)
    }
}
