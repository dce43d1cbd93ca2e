//! 24-hour dial: midnight at the top, time running clockwise, one colored arc
//! per segment of the day.

use std::f64::consts::TAU;

use image::RgbaImage;
use serde::Serialize;

use crate::models::{ActivityState, Color, DayTimeline, Palette, WeekTimeline, Weekday, MINUTES_PER_DAY};
use crate::services::raster::{self, INK};

pub const DEFAULT_SIZE: u32 = 600;

const INNER_RATIO: f64 = 0.45;
const TICK_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockArc {
    pub state: ActivityState,
    pub start_minute: u16,
    pub end_minute: u16,
    #[serde(skip)]
    pub color: Color,
}

impl ClockArc {
    /// Degrees clockwise from the top of the dial.
    pub fn start_angle(&self) -> f64 {
        minute_to_degrees(self.start_minute)
    }

    pub fn sweep(&self) -> f64 {
        minute_to_degrees(self.end_minute - self.start_minute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockPlot {
    pub title: String,
    pub arcs: Vec<ClockArc>,
    #[serde(skip)]
    legend: Palette,
    #[serde(skip)]
    day: DayTimeline,
}

impl ClockPlot {
    pub fn state_at(&self, minute: u16) -> ActivityState {
        self.day.state_at(minute)
    }

    pub fn arc_at(&self, minute: u16) -> Option<&ClockArc> {
        let minute = minute % MINUTES_PER_DAY;
        self.arcs
            .iter()
            .find(|a| a.start_minute <= minute && minute < a.end_minute)
    }
}

pub fn minute_to_degrees(minutes: u16) -> f64 {
    f64::from(minutes) * 360.0 / f64::from(MINUTES_PER_DAY)
}

pub fn render(title: &str, day: &DayTimeline, palette: &Palette) -> ClockPlot {
    let arcs = day
        .segments()
        .iter()
        .map(|s| ClockArc {
            state: s.state,
            start_minute: s.start,
            end_minute: s.end,
            color: palette.color(s.state),
        })
        .collect();

    ClockPlot {
        title: title.to_string(),
        arcs,
        legend: palette.filled(),
        day: day.clone(),
    }
}

/// Dial for one day of an already built week.
pub fn render_weekday(week: &WeekTimeline, weekday: Weekday, palette: &Palette) -> ClockPlot {
    let title = format!("{} ({})", week.pattern_title, weekday);
    render(&title, &week.day(weekday).timeline, palette)
}

/// Minute of the day under the point `(dx, dy)` relative to the dial center,
/// with `dy` growing downwards.
fn minute_at(dx: f64, dy: f64) -> u16 {
    let mut angle = dx.atan2(-dy);
    if angle < 0.0 {
        angle += TAU;
    }
    let minute = (angle / TAU * f64::from(MINUTES_PER_DAY)).floor() as u16;
    minute.min(MINUTES_PER_DAY - 1)
}

pub fn to_image(plot: &ClockPlot, size: u32) -> RgbaImage {
    let size = size.max(64);
    let legend_height = size / 20;
    let mut img = RgbaImage::from_pixel(size, size + legend_height * 2, Color::WHITE.to_rgba());

    let center = f64::from(size) / 2.0;
    let outer = center - TICK_LENGTH - 4.0;
    let inner = outer * INNER_RATIO;

    for y in 0..size {
        for x in 0..size {
            let dx = f64::from(x) + 0.5 - center;
            let dy = f64::from(y) + 0.5 - center;
            let dist = dx.hypot(dy);
            if dist < inner - 1.0 || dist > outer + 1.0 {
                continue;
            }
            let color = if (dist - outer).abs() <= 1.0 || (dist - inner).abs() <= 1.0 {
                INK
            } else {
                let minute = minute_at(dx, dy);
                plot.arc_at(minute)
                    .map(|a| a.color)
                    .unwrap_or_else(|| plot.legend.color(ActivityState::Empty))
            };
            img.put_pixel(x, y, color.to_rgba());
        }
    }

    // hour ticks outside the ring, longer every six hours
    for hour in 0..24u16 {
        let angle = minute_to_degrees(hour * 60).to_radians();
        let length = if hour % 6 == 0 { TICK_LENGTH } else { TICK_LENGTH / 2.0 };
        let mut r = outer + 1.0;
        while r <= outer + length {
            let px = center + r * angle.sin();
            let py = center - r * angle.cos();
            if px >= 0.0 && py >= 0.0 && (px as u32) < size && (py as u32) < size {
                img.put_pixel(px as u32, py as u32, INK.to_rgba());
            }
            r += 0.5;
        }
    }

    raster::draw_legend(&mut img, legend_height, size + legend_height / 2, legend_height, &plot.legend);
    img
}
