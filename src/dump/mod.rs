//! Text rendering of binary data

mod hex_view;

pub use hex_view::{HexView, Lines};

/// Printability of every byte value, built once at compile time.
///
/// Printable means a single visible ASCII character. Backslash is excluded
/// since it only ever shows up escaped.
pub static PRINTABLE: [bool; 256] = printable_table();

const fn printable_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut byte = 0x20;
    while byte < 0x7F {
        table[byte] = byte != b'\\' as usize;
        byte += 1;
    }
    table
}

/// Whether `byte` is shown as itself in the ASCII column
pub fn is_printable(byte: u8) -> bool {
    PRINTABLE[byte as usize]
}
