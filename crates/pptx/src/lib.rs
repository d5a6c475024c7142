//! PPTX (Office Open XML) writer backend for lyrics-to-presentation
//! conversion.
//!
//! Builds .pptx files, which are ZIP archives containing XML documents.

pub mod writer;

pub use writer::PptxWriter;
