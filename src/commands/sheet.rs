use std::path::PathBuf;

use image::RgbaImage;

use crate::error::{Result, ScheduleError};
use crate::models::{ScheduleConfig, WeekTimeline};
use crate::services::raster::encode_png;
use crate::services::sheet_renderer::{self, SheetOptions, SheetTable};
use crate::services::timeline_engine;
use crate::storage::output::{write_atomic, OutputNaming};

pub const SHEET_BASE_NAME: &str = "schedule_sheet";

#[derive(Debug, Clone)]
pub struct SheetRunOptions {
    /// Pattern to lay over the week; the first declared one when `None`.
    pub pattern: Option<String>,
    pub sheet: SheetOptions,
    pub save: bool,
    pub results_dir: PathBuf,
    pub timestamped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSheet {
    pub csv_path: PathBuf,
    pub png_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SheetRun {
    pub week: WeekTimeline,
    pub table: SheetTable,
    pub image: RgbaImage,
    pub saved: Option<SavedSheet>,
}

impl SheetRun {
    /// Writes the CSV and PNG. Can be retried after a failure without
    /// rebuilding the table.
    pub fn save(&self, naming: &OutputNaming) -> Result<SavedSheet> {
        let csv_path = naming.path_for(SHEET_BASE_NAME, "csv");
        let png_path = naming.path_for(SHEET_BASE_NAME, "png");

        let csv = sheet_renderer::to_csv(&self.table);
        let png = encode_png(&self.image)?;
        write_atomic(&csv_path, csv.as_bytes())?;
        write_atomic(&png_path, &png)?;

        Ok(SavedSheet { csv_path, png_path })
    }
}

/// Builds the week and its sheet without touching the filesystem.
pub fn build_schedule_sheet(settings: &ScheduleConfig, options: &SheetRunOptions) -> Result<SheetRun> {
    let title = match &options.pattern {
        Some(title) => title.clone(),
        None => first_pattern_title(settings)?,
    };

    let week = timeline_engine::build_week(settings, &title)?;
    let table = sheet_renderer::render(&week, options.sheet)?;
    let image = sheet_renderer::to_image(&table, &settings.colors);

    Ok(SheetRun {
        week,
        table,
        image,
        saved: None,
    })
}

/// Builds the sheet and, when `options.save` is set, writes it out.
pub fn run_schedule_sheet(settings: &ScheduleConfig, options: &SheetRunOptions) -> Result<SheetRun> {
    let mut run = build_schedule_sheet(settings, options)?;
    let title = &run.week.pattern_title;

    if options.save {
        let naming = OutputNaming::new(&options.results_dir, options.timestamped);
        let saved = run.save(&naming)?;
        log::info!(
            "schedule sheet for '{}' saved to {} and {}",
            title,
            saved.csv_path.display(),
            saved.png_path.display()
        );
        run.saved = Some(saved);
    } else {
        log::info!("schedule sheet for '{}' built (not saved)", title);
    }

    Ok(run)
}

fn first_pattern_title(settings: &ScheduleConfig) -> Result<String> {
    settings
        .schedule_patterns
        .first()
        .map(|p| p.title.clone())
        .ok_or_else(|| ScheduleError::PatternNotFound {
            title: "(first pattern)".to_string(),
            known: Vec::new(),
        })
}
