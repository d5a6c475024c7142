//! Error types for lyrics-to-presentation conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a lyric file to a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file (including non-UTF-8 content).
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The input contained no usable slide content.
    #[error("No slide content found in input")]
    EmptyDocument,

    /// Failed to create the output directory or write the output file.
    #[error("Failed to write presentation: {0}")]
    Write(String),

    /// ZIP container error while building the PPTX package.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML generation error while building slide markup.
    #[error("XML error: {0}")]
    Xml(String),
}
