//! binedit - Binary file editor
//!
//! Create sentinel-filled images, dump them as hex, clear, extract, join and
//! split byte ranges. Shared by the `binedit` command-line tool.

pub mod buffer;
pub mod dump;
pub mod editor;

pub use buffer::{BufferError, Document, SENTINEL};
pub use dump::HexView;
pub use editor::{Bounds, EditError, Editor, read_whole_file, write_whole_file};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Release date of [`VERSION`]
pub const DATE: &str = "19/10/2026";

/// Multi-line version banner
pub fn version_info() -> String {
    format!(
        "{}:\n------------------------\nVersion: {}\nDate: {}",
        NAME, VERSION, DATE
    )
}
