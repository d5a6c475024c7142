//! Core domain types, lyric parsing, and slide layout for
//! lyrics-to-presentation conversion.

pub mod convert;
pub mod error;
pub mod intake;
pub mod layout;
pub mod types;

pub use convert::{convert_file, ConvertOptions, DeckWriter};
pub use error::{Error, Result};
pub use intake::{filter_text_files, parse_drop_payload, process_batch, FileOutcome};
pub use layout::{LayoutEngine, LayoutOptions};
pub use types::{
    Alignment, CanvasSize, Color, FontSpec, LyricsDocument, Pt, SlideBlock, SlideSpec,
    TextBoxSpec, VerticalAnchor,
};
