//! Input collection: drop payload parsing, extension filtering, and the
//! per-file batch loop.

use std::path::{Path, PathBuf};

use crate::convert::{convert_file, ConvertOptions, DeckWriter};
use crate::error::Result;

/// Parse a drag-and-drop payload into candidate paths.
///
/// The payload is a whitespace-separated list of path tokens; tokens may be
/// wrapped in brace delimiters, which are stripped.
pub fn parse_drop_payload(payload: &str) -> Vec<PathBuf> {
    payload
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '{' || c == '}'))
        .filter(|token| !token.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Keep only paths whose extension case-insensitively equals `txt`.
///
/// Non-matching entries are discarded silently.
pub fn filter_text_files<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect()
}

/// The result of converting one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// The input path as supplied by the user.
    pub input: PathBuf,

    /// Output path on success, error on failure.
    pub result: Result<PathBuf>,
}

impl FileOutcome {
    /// The input's filename, for user-facing notifications.
    pub fn basename(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Convert a batch of files sequentially and independently.
///
/// Each file gets its own outcome; a failure never aborts the remaining
/// files.
pub fn process_batch<'a, I>(
    paths: I,
    options: &ConvertOptions,
    writer: &dyn DeckWriter,
) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = &'a Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let result = convert_file(path, options, writer);
            if let Err(e) = &result {
                log::warn!("Failed to convert {}: {}", path.display(), e);
            }
            FileOutcome {
                input: path.to_path_buf(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{CanvasSize, SlideSpec};
    use std::io::Write as _;

    #[test]
    fn test_parse_drop_payload_plain() {
        let paths = parse_drop_payload("/a/one.txt /b/two.txt");
        assert_eq!(paths, vec![PathBuf::from("/a/one.txt"), PathBuf::from("/b/two.txt")]);
    }

    #[test]
    fn test_parse_drop_payload_braces() {
        let paths = parse_drop_payload("{/a/one.txt} /b/two.txt");
        assert_eq!(paths, vec![PathBuf::from("/a/one.txt"), PathBuf::from("/b/two.txt")]);
    }

    #[test]
    fn test_parse_drop_payload_empty() {
        assert!(parse_drop_payload("").is_empty());
        assert!(parse_drop_payload("   ").is_empty());
        assert!(parse_drop_payload("{}").is_empty());
    }

    #[test]
    fn test_filter_text_files_case_insensitive() {
        let kept = filter_text_files(vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.TXT"),
            PathBuf::from("c.Txt"),
        ]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_filter_text_files_drops_others() {
        let kept = filter_text_files(vec![
            PathBuf::from("song.txt"),
            PathBuf::from("cover.png"),
            PathBuf::from("notes.md"),
            PathBuf::from("noext"),
            PathBuf::from("archive.txt.zip"),
        ]);
        assert_eq!(kept, vec![PathBuf::from("song.txt")]);
    }

    /// Writer that fails for nothing; batch failures come from unreadable input.
    struct NullWriter;

    impl DeckWriter for NullWriter {
        fn write_deck(
            &self,
            _canvas: CanvasSize,
            _slides: &[SlideSpec],
            _path: &Path,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = std::env::temp_dir().join(format!("versedeck-intake-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("good.txt");
        let mut f = std::fs::File::create(&good).unwrap();
        f.write_all(b"verse one\n\nverse two").unwrap();
        let missing = dir.join("missing.txt");

        let options = ConvertOptions {
            output_dir: dir.join("out"),
            layout: Default::default(),
        };

        let inputs = [missing.as_path(), good.as_path()];
        let outcomes = process_batch(inputs, &options, &NullWriter);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].result, Err(Error::Io(_))));
        assert_eq!(outcomes[0].basename(), "missing.txt");
        assert!(outcomes[1].result.is_ok());
    }
}
