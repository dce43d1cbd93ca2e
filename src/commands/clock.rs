use std::path::PathBuf;

use image::RgbaImage;

use crate::error::Result;
use crate::models::ScheduleConfig;
use crate::services::clock_renderer::{self, ClockPlot};
use crate::services::pattern_resolver;
use crate::services::raster::encode_png;
use crate::storage::output::{write_atomic, OutputNaming};
use crate::utils::slugify;

#[derive(Debug, Clone)]
pub struct ClockRunOptions {
    pub size: u32,
    pub save: bool,
    pub results_dir: PathBuf,
    pub timestamped: bool,
}

#[derive(Debug, Clone)]
pub struct ClockRun {
    pub plot: ClockPlot,
    pub image: RgbaImage,
    pub png_path: Option<PathBuf>,
}

impl ClockRun {
    pub fn save(&self, naming: &OutputNaming) -> Result<PathBuf> {
        let path = naming.path_for(&format!("clock_{}", slugify(&self.plot.title)), "png");
        write_atomic(&path, &encode_png(&self.image)?)?;
        Ok(path)
    }
}

/// Plots one pattern by title. The pattern is resolved on its own, not taken
/// from a week, so the dial shows the template regardless of workdays.
pub fn build_clock_plot(settings: &ScheduleConfig, title: &str, size: u32) -> Result<ClockRun> {
    let pattern = settings.pattern(title)?;
    let day = pattern_resolver::resolve(pattern)?;
    let plot = clock_renderer::render(&pattern.title, &day, &settings.colors);
    let image = clock_renderer::to_image(&plot, size);

    Ok(ClockRun {
        plot,
        image,
        png_path: None,
    })
}

pub fn run_clock_plot(settings: &ScheduleConfig, title: &str, options: &ClockRunOptions) -> Result<ClockRun> {
    let mut run = build_clock_plot(settings, title, options.size)?;

    if options.save {
        let naming = OutputNaming::new(&options.results_dir, options.timestamped);
        let path = run.save(&naming)?;
        log::info!("clock plot for '{}' saved to {}", title, path.display());
        run.png_path = Some(path);
    } else {
        log::info!("clock plot for '{}' built (display only)", title);
    }

    Ok(run)
}
