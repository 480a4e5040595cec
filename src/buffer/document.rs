use std::fs::File;
use std::io::{Read, Write};
use std::iter;
use std::path::{Path, PathBuf};

use super::BufferError;

/// Erased-flash fill value used for new files and cleared ranges
pub const SENTINEL: u8 = 0xFF;

/// Whole-file byte buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Backing file, if any
    path: Option<PathBuf>,
    /// File contents
    data: Vec<u8>,
}

impl Document {
    /// Empty buffer without a file
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer over `data` without a file
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { path: None, data }
    }

    /// Buffer of `size` sentinel bytes
    pub fn filled(size: usize) -> Self {
        Self::from_bytes(vec![SENTINEL; size])
    }

    /// Read the whole file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BufferError> {
        let path = path.into();
        let mut file = File::open(&path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        Ok(Self {
            path: Some(path),
            data,
        })
    }

    /// Write the whole buffer to its file, replacing it
    pub fn save(&self) -> Result<(), BufferError> {
        if let Some(ref path) = self.path {
            let mut file = File::create(path)?;
            file.write_all(&self.data)?;
            Ok(())
        } else {
            Err(BufferError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No file path set",
            )))
        }
    }

    /// Set the file path and save
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), BufferError> {
        self.path = Some(path.into());
        self.save()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Backing file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fails unless `address` points at an existing byte.
    pub fn check_address(&self, address: usize) -> Result<(), BufferError> {
        if address < self.data.len() {
            Ok(())
        } else {
            Err(BufferError::OutOfBounds {
                address,
                len: self.data.len(),
            })
        }
    }

    /// Number of bytes actually available for a `size`-byte request at `address`.
    pub fn clamp(&self, address: usize, size: usize) -> usize {
        size.min(self.data.len().saturating_sub(address))
    }

    /// Bytes in `[start, end)`, if within the buffer
    pub fn get_range(&self, start: usize, end: usize) -> Option<&[u8]> {
        if start <= end && end <= self.data.len() {
            Some(&self.data[start..end])
        } else {
            None
        }
    }

    /// Clamped slice of up to `size` bytes starting at `address`.
    pub fn slice(&self, address: usize, size: usize) -> Result<&[u8], BufferError> {
        self.check_address(address)?;
        let size = self.clamp(address, size);
        Ok(&self.data[address..address + size])
    }

    /// Sets up to `size` bytes at `address` to [`SENTINEL`], returns the count written.
    pub fn fill(&mut self, address: usize, size: usize) -> Result<usize, BufferError> {
        self.check_address(address)?;
        let size = self.clamp(address, size);
        self.data[address..address + size].fill(SENTINEL);
        Ok(size)
    }

    /// Writes `bytes` over the buffer starting at `address`.
    ///
    /// Bytes already present are overwritten, not shifted. Anything that does
    /// not fit grows the buffer; if `address` lies past the end, the gap is
    /// padded with [`SENTINEL`] first. Returns the number of padding bytes.
    pub fn overwrite_at(&mut self, address: usize, bytes: &[u8]) -> usize {
        let len = self.data.len();
        let padding = address.saturating_sub(len);
        let start = address.min(len);
        let end = address.saturating_add(bytes.len()).min(len);

        let insert = iter::repeat_n(SENTINEL, padding).chain(bytes.iter().copied());
        self.data.splice(start..end, insert);
        padding
    }
}
