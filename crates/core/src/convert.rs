//! The per-file conversion pipeline: read, parse, lay out, write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::types::{CanvasSize, LyricsDocument, SlideSpec};

/// The seam between the layout transform and the presentation-file writer.
///
/// Implementations own the output format entirely; `versedeck-pptx` provides
/// the production one, and tests substitute in-memory fakes.
pub trait DeckWriter {
    /// Write the slides as a complete presentation file at `path`,
    /// overwriting any existing file. Must not leave a partial file behind
    /// on failure.
    fn write_deck(&self, canvas: CanvasSize, slides: &[SlideSpec], path: &Path) -> Result<()>;
}

/// Conversion configuration, passed explicitly at call time.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory the output file is written into; created if missing.
    pub output_dir: PathBuf,

    /// Layout options forwarded to the layout engine.
    pub layout: LayoutOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("presentations"),
            layout: LayoutOptions::default(),
        }
    }
}

/// Convert one lyric file into a presentation file.
///
/// Reads the input as UTF-8 text, parses it into blocks, lays out the
/// slides, and delegates persistence to `writer`. The output path is
/// `<output_dir>/<input_stem>.pptx`. Returns the output path on success.
pub fn convert_file(
    path: &Path,
    options: &ConvertOptions,
    writer: &dyn DeckWriter,
) -> Result<PathBuf> {
    let content = fs::read_to_string(path)?;

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("presentation");

    let doc = LyricsDocument::parse(title, &content)?;

    let engine = LayoutEngine::with_options(options.layout);
    let slides = engine.layout(&doc);

    fs::create_dir_all(&options.output_dir).map_err(|e| {
        Error::Write(format!(
            "Failed to create output directory {}: {}",
            options.output_dir.display(),
            e
        ))
    })?;

    let output_path = options.output_dir.join(format!("{}.pptx", title));

    log::info!(
        "Converting {} -> {} ({} slides)",
        path.display(),
        output_path.display(),
        slides.len()
    );

    writer.write_deck(engine.canvas(), &slides, &output_path)?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::sync::Mutex;

    /// Writer that records what it was asked to write instead of producing a file.
    #[derive(Default)]
    struct RecordingWriter {
        decks: Mutex<Vec<(PathBuf, Vec<SlideSpec>)>>,
    }

    impl DeckWriter for RecordingWriter {
        fn write_deck(
            &self,
            _canvas: CanvasSize,
            slides: &[SlideSpec],
            path: &Path,
        ) -> Result<()> {
            self.decks
                .lock()
                .unwrap()
                .push((path.to_path_buf(), slides.to_vec()));
            Ok(())
        }
    }

    fn temp_txt(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("versedeck-convert-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn temp_out() -> PathBuf {
        std::env::temp_dir().join(format!("versedeck-out-{}", std::process::id()))
    }

    #[test]
    fn test_convert_file_names_output_after_stem() {
        let input = temp_txt("my song.txt", "verse one\n\nverse two");
        let writer = RecordingWriter::default();
        let options = ConvertOptions {
            output_dir: temp_out(),
            layout: LayoutOptions::default(),
        };

        let out = convert_file(&input, &options, &writer).unwrap();
        assert_eq!(out.file_name().unwrap(), "my song.pptx");

        let decks = writer.decks.lock().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].1.len(), 2);
    }

    #[test]
    fn test_convert_missing_file_is_io_error() {
        let writer = RecordingWriter::default();
        let options = ConvertOptions::default();
        let result = convert_file(Path::new("/nonexistent/nope.txt"), &options, &writer);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_convert_blank_file_is_empty_document() {
        let input = temp_txt("blank.txt", "\n\n  \n\n");
        let writer = RecordingWriter::default();
        let options = ConvertOptions {
            output_dir: temp_out(),
            layout: LayoutOptions::default(),
        };
        let result = convert_file(&input, &options, &writer);
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_convert_is_idempotent() {
        let input = temp_txt("idem.txt", "a\n\nb\n\nc");
        let writer = RecordingWriter::default();
        let options = ConvertOptions {
            output_dir: temp_out(),
            layout: LayoutOptions::default(),
        };

        convert_file(&input, &options, &writer).unwrap();
        convert_file(&input, &options, &writer).unwrap();

        let decks = writer.decks.lock().unwrap();
        assert_eq!(decks[0].0, decks[1].0);
        assert_eq!(decks[0].1.len(), decks[1].1.len());
        for (a, b) in decks[0].1.iter().zip(decks[1].1.iter()) {
            let texts_a: Vec<&str> = a.boxes.iter().map(|t| t.text.as_str()).collect();
            let texts_b: Vec<&str> = b.boxes.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(texts_a, texts_b);
        }
    }
}
