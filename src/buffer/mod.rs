mod document;

pub use document::{Document, SENTINEL};

use thiserror::Error;

/// Errors raised by [`Document`]
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("address 0x{address:02X} out of range ({})", max_address(.len))]
    OutOfBounds { address: usize, len: usize },
}

fn max_address(len: &usize) -> String {
    match len.checked_sub(1) {
        Some(max) => format!("max address: 0x{:02X}", max),
        None => "file is empty".to_string(),
    }
}
