use std::fmt::{self, Write as _};
use std::iter::Enumerate;
use std::slice::Chunks;

use super::is_printable;

/// Minimum number of digits in the address column
const MIN_ADDR_WIDTH: usize = 8;

/// HEX/ASCII dump of a byte slice
///
/// Each line reads `ADDRESS  HEX  | ASCII |`. The address column is padded to
/// fit the largest offset in the data, and the hex column is padded to the
/// width of a full line so every line aligns.
///
/// The group size counts hex digits, two per byte: a group of 2 puts a
/// space between every byte, a group of 4 between every pair of bytes.
#[derive(Debug, Clone, Copy)]
pub struct HexView<'a> {
    /// Bytes to render
    data: &'a [u8],
    /// Added to every displayed address
    addr_offset: usize,
    /// Bytes per line
    bytes_per_line: usize,
    /// Hex digits between spaces in the hex column
    bytes_per_group: usize,
    /// Shown in the ASCII column for non-printable bytes
    placeholder: char,
}

impl<'a> HexView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            addr_offset: 0,
            bytes_per_line: 16,
            bytes_per_group: 4,
            placeholder: '.',
        }
    }

    pub fn addr_offset(mut self, offset: usize) -> Self {
        self.addr_offset = offset;
        self
    }

    pub fn bytes_per_line(mut self, bytes: usize) -> Self {
        self.bytes_per_line = bytes.max(1);
        self
    }

    pub fn bytes_per_group(mut self, bytes: usize) -> Self {
        self.bytes_per_group = bytes.max(1);
        self
    }

    pub fn placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Width of the address column, fixed for the whole dump
    pub fn addr_width(&self) -> usize {
        format!("{:X}", self.data.len()).len().max(MIN_ADDR_WIDTH)
    }

    /// Width of the hex column of a full line
    pub fn hex_width(&self) -> usize {
        let digits = self.bytes_per_line * 2;
        (digits + digits / self.bytes_per_group).saturating_sub(1)
    }

    /// Formatted lines, produced one chunk at a time
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            view: *self,
            chunks: self.data.chunks(self.bytes_per_line).enumerate(),
            addr_width: self.addr_width(),
            hex_width: self.hex_width(),
        }
    }

    fn format_hex(&self, chunk: &[u8]) -> String {
        let line_digits = self.bytes_per_line * 2;
        let mut hex = String::with_capacity(self.hex_width());
        let mut digits = 0;
        for byte in chunk {
            for digit in [byte >> 4, byte & 0x0F] {
                let _ = write!(hex, "{:X}", digit);
                digits += 1;
                if digits % self.bytes_per_group == 0 && digits < line_digits {
                    hex.push(' ');
                }
            }
        }
        hex
    }

    fn format_ascii(&self, chunk: &[u8]) -> String {
        chunk
            .iter()
            .map(|&b| if is_printable(b) { b as char } else { self.placeholder })
            .collect()
    }
}

/// Iterator over the lines of a [`HexView`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    view: HexView<'a>,
    chunks: Enumerate<Chunks<'a, u8>>,
    addr_width: usize,
    hex_width: usize,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (index, chunk) = self.chunks.next()?;
        let addr = (index * self.view.bytes_per_line).saturating_add(self.view.addr_offset);
        Some(format!(
            "{:0aw$X}  {:<hw$}  | {} |",
            addr,
            self.view.format_hex(chunk),
            self.view.format_ascii(chunk),
            aw = self.addr_width,
            hw = self.hex_width,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Lines<'_> {}

impl fmt::Display for HexView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}
