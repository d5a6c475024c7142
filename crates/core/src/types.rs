//! Domain types for lyric documents and slide specifications.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed lyric file: an ordered sequence of slide blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsDocument {
    /// Title derived from the input filename (without extension).
    pub title: String,

    /// Non-empty lyric blocks in source order.
    pub blocks: Vec<SlideBlock>,
}

impl LyricsDocument {
    /// Parse the full text of a lyric file.
    ///
    /// Line endings are normalized to `\n`, then the text is split on the
    /// literal blank-line delimiter `"\n\n"`. Each block is trimmed; blocks
    /// that are empty after trimming are dropped. Fails with
    /// [`Error::EmptyDocument`] if no usable block remains.
    pub fn parse(title: impl Into<String>, content: &str) -> Result<Self> {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        let blocks: Vec<SlideBlock> = normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(SlideBlock::new)
            .collect();

        if blocks.is_empty() {
            return Err(Error::EmptyDocument);
        }

        Ok(Self {
            title: title.into(),
            blocks,
        })
    }

    /// Number of lyric blocks (one slide each, before any trailing blank).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// One trimmed multi-line lyric block, rendered as a single slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideBlock {
    /// The block's full text, lines joined by `\n`.
    pub text: String,
}

impl SlideBlock {
    /// Create a block from already-trimmed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Iterate over the block's lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Number of lines in the block.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// The block's first line, used as the preview on the preceding slide.
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

/// A point-based measurement (1pt = 12700 EMU in OOXML).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pt(pub f64);

impl Pt {
    /// Convert to English Metric Units for OOXML geometry.
    pub fn emu(self) -> i64 {
        (self.0 * 12700.0).round() as i64
    }

    /// Convert to hundredths of a point for OOXML font sizes.
    pub fn centipoints(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GRAY: Color = Color(128, 128, 128);

    /// Uppercase hex form without a leading `#`, as OOXML expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// The slide canvas dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: Pt,
    pub height: Pt,
}

impl CanvasSize {
    /// The fixed 1920x1080pt canvas all layout constants are tuned for.
    pub const HD: CanvasSize = CanvasSize {
        width: Pt(1920.0),
        height: Pt(1080.0),
    };
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Center,
}

/// Vertical anchoring of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAnchor {
    Top,
    Center,
}

/// Font settings for one text box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,

    /// Font size in points.
    pub size: Pt,

    /// Solid font color.
    pub color: Color,
}

/// A positioned text box on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBoxSpec {
    pub left: Pt,
    pub top: Pt,
    pub width: Pt,
    pub height: Pt,

    /// Text content; lines separated by `\n` become separate paragraphs.
    pub text: String,

    pub font: FontSpec,

    /// Paragraph alignment (always centered in this layout).
    pub align: Alignment,

    /// Vertical anchoring within the box.
    pub anchor: VerticalAnchor,

    /// Line spacing multiplier, if not the renderer default.
    pub line_spacing: Option<f32>,
}

/// One slide: a background color and an ordered list of text boxes.
///
/// Constructed once per lyric block and consumed immediately by the deck
/// writer; never retained or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Full-bleed background color.
    pub background: Color,

    /// Text boxes in z-order.
    pub boxes: Vec<TextBoxSpec>,
}

impl SlideSpec {
    /// Create a slide with the given background and no text boxes.
    pub fn new(background: Color) -> Self {
        Self {
            background,
            boxes: Vec::new(),
        }
    }

    /// Add a text box to the slide.
    pub fn add_box(&mut self, text_box: TextBoxSpec) {
        self.boxes.push(text_box);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_blocks() {
        let doc = LyricsDocument::parse("song", "Hello\nWorld\n\nGoodbye").unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[0].text, "Hello\nWorld");
        assert_eq!(doc.blocks[1].text, "Goodbye");
    }

    #[test]
    fn test_parse_single_block() {
        let doc = LyricsDocument::parse("song", "Just one verse\nwith two lines").unwrap();
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_parse_preserves_order() {
        let doc = LyricsDocument::parse("song", "one\n\ntwo\n\nthree\n\nfour").unwrap();
        let texts: Vec<&str> = doc.blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_parse_trims_blocks() {
        let doc = LyricsDocument::parse("song", "  first  \n\n\tsecond\t").unwrap();
        assert_eq!(doc.blocks[0].text, "first");
        assert_eq!(doc.blocks[1].text, "second");
    }

    #[test]
    fn test_parse_drops_empty_blocks() {
        // Runs of blank lines produce empty blocks after trimming
        let doc = LyricsDocument::parse("song", "one\n\n\n\ntwo").unwrap();
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_parse_normalizes_crlf() {
        let doc = LyricsDocument::parse("song", "Hello\r\nWorld\r\n\r\nGoodbye").unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[0].text, "Hello\nWorld");
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(matches!(
            LyricsDocument::parse("song", ""),
            Err(Error::EmptyDocument)
        ));
        assert!(matches!(
            LyricsDocument::parse("song", "   \n\n  \n\n"),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn test_block_lines() {
        let block = SlideBlock::new("Amazing grace\nhow sweet the sound");
        assert_eq!(block.line_count(), 2);
        assert_eq!(block.first_line(), "Amazing grace");
    }

    #[test]
    fn test_pt_conversions() {
        assert_eq!(Pt(1.0).emu(), 12700);
        assert_eq!(Pt(1920.0).emu(), 24384000);
        assert_eq!(Pt(90.0).centipoints(), 9000);
        assert_eq!(Pt(45.0).centipoints(), 4500);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::BLACK.hex(), "000000");
        assert_eq!(Color::WHITE.hex(), "FFFFFF");
        assert_eq!(Color(128, 128, 128).hex(), "808080");
    }
}
