//! The slide layout transform: lyric blocks to slide specifications.
//!
//! All constants are tuned for a 1920x1080pt canvas. Text sizing is fixed
//! (90pt main, 45pt preview, 1.5 line spacing); the preview box on each slide
//! shows the first line of the following block.

use serde::{Deserialize, Serialize};

use crate::types::{
    Alignment, CanvasSize, Color, FontSpec, LyricsDocument, Pt, SlideBlock, SlideSpec,
    TextBoxSpec, VerticalAnchor,
};

/// Font family for all slide text.
const FONT_FAMILY: &str = "Arial";

/// Main lyric text size in points.
const MAIN_FONT_SIZE: Pt = Pt(90.0);

/// Preview text size in points (half of the main size).
const PREVIEW_FONT_SIZE: Pt = Pt(45.0);

/// Line spacing multiplier for the main text.
const LINE_SPACING: f32 = 1.5;

/// Horizontal margin on each side of every text box.
const SIDE_MARGIN: Pt = Pt(100.0);

/// Top of the preview band near the bottom of the slide.
const PREVIEW_TOP: Pt = Pt(900.0);

/// Height of the preview band.
const PREVIEW_HEIGHT: Pt = Pt(120.0);

/// Top margin for the primary text box, keyed by the block's line count.
///
/// An explicit lookup, not a formula: the values were tuned by eye on the
/// 1920x1080pt canvas.
fn top_margin_for(line_count: usize) -> Pt {
    match line_count {
        0 | 1 => Pt(175.0),
        2 => Pt(325.0),
        _ => Pt(250.0),
    }
}

/// Layout options that vary per invocation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Append one all-black slide with no text after the last lyric slide.
    pub trailing_blank_slide: bool,
}

/// Produces slide specifications from a parsed lyric document.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Create a layout engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout engine with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// The canvas all generated slides target.
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::HD
    }

    /// Lay out the whole document, one slide per block, in source order.
    pub fn layout(&self, doc: &LyricsDocument) -> Vec<SlideSpec> {
        let mut slides = Vec::with_capacity(doc.blocks.len() + 1);

        for (idx, block) in doc.blocks.iter().enumerate() {
            let next = doc.blocks.get(idx + 1);
            slides.push(self.layout_slide(block, next));
        }

        if self.options.trailing_blank_slide {
            slides.push(SlideSpec::new(Color::BLACK));
        }

        log::debug!("Laid out {} slides for '{}'", slides.len(), doc.title);

        slides
    }

    /// Lay out one slide: primary text box plus an optional preview of the
    /// next block's first line.
    fn layout_slide(&self, block: &SlideBlock, next: Option<&SlideBlock>) -> SlideSpec {
        let canvas = self.canvas();
        let mut slide = SlideSpec::new(Color::BLACK);

        let top = top_margin_for(block.line_count());
        let box_width = Pt(canvas.width.0 - 2.0 * SIDE_MARGIN.0);

        slide.add_box(TextBoxSpec {
            left: SIDE_MARGIN,
            top,
            width: box_width,
            height: Pt(PREVIEW_TOP.0 - top.0),
            text: block.text.clone(),
            font: FontSpec {
                family: FONT_FAMILY.to_string(),
                size: MAIN_FONT_SIZE,
                color: Color::WHITE,
            },
            align: Alignment::Center,
            anchor: VerticalAnchor::Top,
            line_spacing: Some(LINE_SPACING),
        });

        if let Some(next) = next {
            slide.add_box(TextBoxSpec {
                left: SIDE_MARGIN,
                top: PREVIEW_TOP,
                width: box_width,
                height: PREVIEW_HEIGHT,
                text: next.first_line().to_string(),
                font: FontSpec {
                    family: FONT_FAMILY.to_string(),
                    size: PREVIEW_FONT_SIZE,
                    color: Color::GRAY,
                },
                align: Alignment::Center,
                anchor: VerticalAnchor::Center,
                line_spacing: None,
            });
        }

        slide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> LyricsDocument {
        LyricsDocument::parse("test", content).unwrap()
    }

    #[test]
    fn test_one_slide_per_block() {
        let engine = LayoutEngine::new();
        assert_eq!(engine.layout(&doc("a")).len(), 1);
        assert_eq!(engine.layout(&doc("a\n\nb")).len(), 2);
        assert_eq!(engine.layout(&doc("a\n\nb\n\nc")).len(), 3);
    }

    #[test]
    fn test_trailing_blank_slide() {
        let engine = LayoutEngine::with_options(LayoutOptions {
            trailing_blank_slide: true,
        });
        let slides = engine.layout(&doc("a\n\nb"));
        assert_eq!(slides.len(), 3);
        assert!(slides[2].boxes.is_empty());
        assert_eq!(slides[2].background, Color::BLACK);
    }

    #[test]
    fn test_hello_world_goodbye_scenario() {
        let engine = LayoutEngine::new();
        let slides = engine.layout(&doc("Hello\nWorld\n\nGoodbye"));

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].boxes[0].text, "Hello\nWorld");
        assert_eq!(slides[0].boxes[1].text, "Goodbye");
        assert_eq!(slides[1].boxes[0].text, "Goodbye");
        assert_eq!(slides[1].boxes.len(), 1);
    }

    #[test]
    fn test_single_block_has_no_preview() {
        let engine = LayoutEngine::new();
        let slides = engine.layout(&doc("only verse"));
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].boxes.len(), 1);
    }

    #[test]
    fn test_preview_is_first_line_of_next_block() {
        let engine = LayoutEngine::new();
        let slides = engine.layout(&doc("verse one\n\nchorus line one\nchorus line two"));
        assert_eq!(slides[0].boxes[1].text, "chorus line one");
    }

    #[test]
    fn test_preview_styling() {
        let engine = LayoutEngine::new();
        let slides = engine.layout(&doc("a\n\nb"));
        let preview = &slides[0].boxes[1];
        assert_eq!(preview.font.size, PREVIEW_FONT_SIZE);
        assert_eq!(preview.font.color, Color::GRAY);
        assert_eq!(preview.top, PREVIEW_TOP);
    }

    #[test]
    fn test_main_text_styling() {
        let engine = LayoutEngine::new();
        let slides = engine.layout(&doc("a"));
        let main = &slides[0].boxes[0];
        assert_eq!(main.font.family, "Arial");
        assert_eq!(main.font.size, MAIN_FONT_SIZE);
        assert_eq!(main.font.color, Color::WHITE);
        assert_eq!(main.line_spacing, Some(1.5));
        assert_eq!(slides[0].background, Color::BLACK);
    }

    #[test]
    fn test_margin_table_by_line_count() {
        let engine = LayoutEngine::new();

        let one = engine.layout(&doc("one line"));
        assert_eq!(one[0].boxes[0].top, Pt(175.0));

        let two = engine.layout(&doc("line one\nline two"));
        assert_eq!(two[0].boxes[0].top, Pt(325.0));

        let three = engine.layout(&doc("one\ntwo\nthree"));
        assert_eq!(three[0].boxes[0].top, Pt(250.0));

        let four = engine.layout(&doc("one\ntwo\nthree\nfour"));
        assert_eq!(four[0].boxes[0].top, Pt(250.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let engine = LayoutEngine::new();
        let d = doc("a\n\nb\n\nc");
        let first = engine.layout(&d);
        let second = engine.layout(&d);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.boxes.len(), b.boxes.len());
            for (ba, bb) in a.boxes.iter().zip(b.boxes.iter()) {
                assert_eq!(ba.text, bb.text);
            }
        }
    }
}
