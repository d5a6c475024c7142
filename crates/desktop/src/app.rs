//! The eframe application: a drop target, a file picker, and per-file
//! notifications.
//!
//! Conversions run synchronously on the UI thread; files dropped together
//! are processed strictly sequentially, and one failure never stops the
//! rest of the batch.

use std::path::PathBuf;

use eframe::egui;
use versedeck_core::{
    filter_text_files, process_batch, ConvertOptions, FileOutcome, LayoutOptions,
};
use versedeck_pptx::PptxWriter;

pub struct VersedeckApp {
    /// Output directory for generated decks.
    output_dir: PathBuf,

    /// Append a final all-black slide to each deck.
    trailing_blank: bool,

    /// One line per processed file, newest last.
    history: Vec<String>,

    writer: PptxWriter,
}

impl VersedeckApp {
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("presentations"),
            trailing_blank: false,
            history: Vec::new(),
            writer: PptxWriter::new(),
        }
    }

    /// Files dropped onto the window.
    fn on_files_dropped(&mut self, paths: Vec<PathBuf>) {
        self.process_files(paths);
    }

    /// Files chosen through the native file dialog.
    fn on_files_picked(&mut self, paths: Vec<PathBuf>) {
        self.process_files(paths);
    }

    /// Convert a batch of candidate paths; non-.txt entries are dropped
    /// silently.
    fn process_files(&mut self, paths: Vec<PathBuf>) {
        let accepted = filter_text_files(paths);
        if accepted.is_empty() {
            return;
        }

        log::info!("Converting {} file(s)", accepted.len());

        let options = ConvertOptions {
            output_dir: self.output_dir.clone(),
            layout: LayoutOptions {
                trailing_blank_slide: self.trailing_blank,
            },
        };

        let outcomes = process_batch(
            accepted.iter().map(PathBuf::as_path),
            &options,
            &self.writer,
        );

        for outcome in &outcomes {
            self.notify(outcome);
        }
    }

    /// Show a modal result dialog and record the outcome in the history.
    fn notify(&mut self, outcome: &FileOutcome) {
        match &outcome.result {
            Ok(output_path) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Success")
                    .set_description(format!("Presentation created for {}", outcome.basename()))
                    .show();
                self.history
                    .push(format!("{} -> {}", outcome.basename(), output_path.display()));
            }
            Err(e) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Error")
                    .set_description(format!("Error processing {}: {}", outcome.basename(), e))
                    .show();
                self.history
                    .push(format!("{}: {}", outcome.basename(), e));
            }
        }
    }
}

impl eframe::App for VersedeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.on_files_dropped(dropped);
        }

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.heading("Lyrics to PPTX Converter");
                ui.add_space(20.0);

                if hovering {
                    ui.label("Release to convert");
                } else {
                    ui.label("Drop .txt files here");
                    ui.label("or select them below");
                }

                ui.add_space(20.0);

                if ui.button("Select Files…").clicked() {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("Text Files", &["txt"])
                        .pick_files()
                    {
                        self.on_files_picked(paths);
                    }
                }

                ui.add_space(10.0);
                ui.checkbox(&mut self.trailing_blank, "End with a blank slide");

                ui.add_space(20.0);
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for line in self.history.iter().rev() {
                        ui.label(line);
                    }
                });
            });
        });
    }
}
