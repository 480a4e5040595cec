//! Byte-range operations on whole binary files
//!
//! Every operation reads its input fully into memory, computes the new
//! contents and writes whole files back out. Requests that run past the end
//! of a file are clamped; a start address past the end is an error, except
//! for extraction under [`Bounds::Legacy`].

mod error;

pub use error::EditError;

use std::io::Write;
use std::path::Path;

use tracing::{debug, error, info};

use crate::buffer::Document;
use crate::dump::HexView;

/// Bytes per line used by [`Editor::show_file`]
pub const SHOW_BYTES_PER_LINE: usize = 16;
/// Hex digits per group used by [`Editor::show_file`] (one space per byte)
pub const SHOW_BYTES_PER_GROUP: usize = 2;

/// Boundary convention for extract and split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// Extract `[address, address + size)`, split into `[0, address)` and
    /// `[address, end)`.
    #[default]
    Lossless,
    /// Output-compatible with older releases: the extract end bound is the
    /// raw byte count, extracting from past the end writes an empty file, and
    /// split drops the byte just before the address.
    Legacy,
}

/// Binary file editor
#[derive(Debug, Clone, Copy, Default)]
pub struct Editor {
    bounds: Bounds,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Create `path` holding `size` sentinel bytes, replacing any existing file.
    pub fn create_file(&self, path: impl AsRef<Path>, size: usize) -> Result<(), EditError> {
        let path = require_path(path.as_ref(), "input")?;
        if size == 0 {
            return Err(EditError::ZeroSize("create a binary file"));
        }
        debug!(path = %path.display(), size, "creating binary file");

        let mut document = Document::filled(size);
        write_whole_file(path, &mut document)
    }

    /// Write a hex dump of up to `size` bytes from `from_address` to `out`.
    ///
    /// A `size` of zero shows everything up to the end of the file.
    /// `addr_offset` is added to the displayed addresses only. Returns the
    /// number of bytes shown.
    pub fn show_file<W: Write>(
        &self,
        out: &mut W,
        path: impl AsRef<Path>,
        from_address: usize,
        size: usize,
        addr_offset: usize,
    ) -> Result<usize, EditError> {
        let path = require_path(path.as_ref(), "input")?;
        let document = read_whole_file(path)?;
        let size = if size == 0 { document.len() } else { size };
        let bytes = document.slice(from_address, size)?;
        debug!(path = %path.display(), from_address, size = bytes.len(), "showing binary file");

        let view = HexView::new(bytes)
            .addr_offset(addr_offset)
            .bytes_per_line(SHOW_BYTES_PER_LINE)
            .bytes_per_group(SHOW_BYTES_PER_GROUP);
        for line in view.lines() {
            writeln!(out, "{}", line).map_err(EditError::Output)?;
        }
        out.flush().map_err(EditError::Output)?;
        Ok(bytes.len())
    }

    /// Reset up to `size` bytes at `address` to the sentinel value in place.
    ///
    /// Returns the number of bytes cleared.
    pub fn clear_data(
        &self,
        path: impl AsRef<Path>,
        address: usize,
        size: usize,
    ) -> Result<usize, EditError> {
        let path = require_path(path.as_ref(), "input")?;
        if size == 0 {
            return Err(EditError::ZeroSize("clear data"));
        }

        let mut document = read_whole_file(path)?;
        let cleared = document.fill(address, size)?;
        debug!(path = %path.display(), address, cleared, "clearing data");

        write_whole_file(path, &mut document)?;
        Ok(cleared)
    }

    /// Copy a byte range of `input` into a new file at `output`.
    ///
    /// A `size` of zero takes the rest of the file from `address`. Returns
    /// the number of bytes extracted.
    pub fn extract_data(
        &self,
        input: impl AsRef<Path>,
        address: usize,
        size: usize,
        output: impl AsRef<Path>,
    ) -> Result<usize, EditError> {
        let input = require_path(input.as_ref(), "input")?;
        let output = require_path(output.as_ref(), "output")?;

        let document = read_whole_file(input)?;
        let rest = document.len().saturating_sub(address);
        let size = if size == 0 { rest } else { size };

        let bytes = match self.bounds {
            Bounds::Lossless => document.slice(address, size)?,
            Bounds::Legacy => document
                .get_range(address, size.min(document.len()))
                .unwrap_or_default(),
        };
        debug!(input = %input.display(), address, size = bytes.len(), "extracting data");

        let mut extracted = Document::from_bytes(bytes.to_vec());
        write_whole_file(output, &mut extracted)?;
        Ok(bytes.len())
    }

    /// Write bytes of `src` over `target` starting at `target_address`.
    ///
    /// Up to `size` bytes (zero meaning the whole source) are taken from
    /// `src_address`. They replace the target's bytes in place; the target
    /// only grows when the data runs past its end. A `target_address` beyond
    /// the end is reached by sentinel padding. Returns the number of source
    /// bytes written.
    pub fn join_files(
        &self,
        src: impl AsRef<Path>,
        src_address: usize,
        size: usize,
        target: impl AsRef<Path>,
        target_address: usize,
    ) -> Result<usize, EditError> {
        let src = require_path(src.as_ref(), "source")?;
        let target = require_path(target.as_ref(), "target")?;

        let source = read_whole_file(src)?;
        let size = if size == 0 { source.len() } else { size };
        let bytes = source.slice(src_address, size)?;

        let mut document = read_whole_file(target)?;
        let padding = document.overwrite_at(target_address, bytes);
        debug!(
            src = %src.display(),
            target = %target.display(),
            target_address,
            size = bytes.len(),
            padding,
            "joining files"
        );

        write_whole_file(target, &mut document)?;
        Ok(bytes.len())
    }

    /// Split `input` at `address` into `first` and `second`.
    ///
    /// Both outputs are always attempted; the split fails if either write fails.
    pub fn split_files(
        &self,
        input: impl AsRef<Path>,
        address: usize,
        first: impl AsRef<Path>,
        second: impl AsRef<Path>,
    ) -> Result<(), EditError> {
        let input = require_path(input.as_ref(), "input")?;
        let first = require_path(first.as_ref(), "first output")?;
        let second = require_path(second.as_ref(), "second output")?;
        if address == 0 {
            return Err(EditError::SplitAtStart);
        }

        let document = read_whole_file(input)?;
        document.check_address(address)?;
        let data = document.data();
        let (head, tail) = match self.bounds {
            Bounds::Lossless => data.split_at(address),
            Bounds::Legacy => (&data[..address - 1], &data[address..]),
        };
        debug!(input = %input.display(), address, head = head.len(), tail = tail.len(), "splitting file");

        let first_written = write_whole_file(first, &mut Document::from_bytes(head.to_vec()));
        let second_written = write_whole_file(second, &mut Document::from_bytes(tail.to_vec()));
        first_written.and(second_written)
    }
}

/// Read the whole content of `path`.
pub fn read_whole_file(path: impl AsRef<Path>) -> Result<Document, EditError> {
    let path = path.as_ref();
    match Document::open(path) {
        Ok(document) => {
            debug!(path = %path.display(), len = document.len(), "read binary file");
            Ok(document)
        }
        Err(source) => {
            error!(path = %path.display(), error = %source, "failed to read binary file");
            Err(EditError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Create or truncate `path` and write `document` to it.
pub fn write_whole_file(path: impl AsRef<Path>, document: &mut Document) -> Result<(), EditError> {
    let path = path.as_ref();
    match document.save_as(path) {
        Ok(()) => {
            info!(path = %path.display(), len = document.len(), "wrote binary file");
            Ok(())
        }
        Err(source) => {
            error!(path = %path.display(), error = %source, "failed to write binary file");
            Err(EditError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn require_path<'p>(path: &'p Path, role: &'static str) -> Result<&'p Path, EditError> {
    if path.as_os_str().is_empty() {
        Err(EditError::MissingPath(role))
    } else {
        Ok(path)
    }
}
