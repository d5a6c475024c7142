//! Desktop drag-and-drop GUI for converting lyric text files to PPTX
//! presentations.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

mod app;

use anyhow::Result;
use app::VersedeckApp;

fn main() -> Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 400.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Versedeck - Lyrics to PPTX"),
        ..Default::default()
    };

    eframe::run_native(
        "Versedeck",
        options,
        Box::new(|_cc| Ok(Box::new(VersedeckApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
