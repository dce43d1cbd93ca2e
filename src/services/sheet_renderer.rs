//! Weekly schedule sheet: one column per weekday, one row per time slot.

use std::fmt::Write as _;

use image::RgbaImage;
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::models::{ActivityState, Color, DayKind, DayTimeline, Palette, WeekTimeline, MINUTES_PER_DAY};
use crate::services::raster::{self, GRID_LINE, INK};

pub const DEFAULT_SLOT_MINUTES: u16 = 30;
pub const NEXT_WEEK_LABEL: &str = "Next Sunday";

const CELL_WIDTH: u32 = 96;
const GRID_HEIGHT: u32 = 720;
const HEADER_HEIGHT: u32 = 20;
const GUTTER_WIDTH: u32 = 12;
const MARGIN: u32 = 10;
const SWATCH: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetOptions {
    pub slot_minutes: u16,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Day(DayKind),
    /// Spill of Saturday's shift into the following week.
    NextWeek,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetColumn {
    pub label: String,
    pub kind: ColumnKind,
    /// State at the start of each slot.
    pub cells: Vec<ActivityState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetTable {
    pub pattern_title: String,
    pub slot_minutes: u16,
    pub columns: Vec<SheetColumn>,
}

impl SheetTable {
    pub fn slot_count(&self) -> usize {
        usize::from(MINUTES_PER_DAY / self.slot_minutes)
    }

    pub fn slot_start(&self, slot: usize) -> u16 {
        slot as u16 * self.slot_minutes
    }

    pub fn column(&self, label: &str) -> Option<&SheetColumn> {
        self.columns.iter().find(|c| c.label == label)
    }
}

pub fn render(week: &WeekTimeline, options: SheetOptions) -> Result<SheetTable> {
    let slot = options.slot_minutes;
    if slot == 0 || slot > MINUTES_PER_DAY || MINUTES_PER_DAY % slot != 0 {
        return Err(ScheduleError::InvalidSlotWidth(slot));
    }

    let sample = |day: &DayTimeline| -> Vec<ActivityState> {
        (0..MINUTES_PER_DAY)
            .step_by(usize::from(slot))
            .map(|minute| day.state_at(minute))
            .collect()
    };

    let mut columns: Vec<SheetColumn> = week
        .iter()
        .map(|day| SheetColumn {
            label: day.weekday.name().to_string(),
            kind: ColumnKind::Day(day.kind),
            cells: sample(&day.timeline),
        })
        .collect();

    if let Some(next_week) = &week.next_week {
        columns.push(SheetColumn {
            label: NEXT_WEEK_LABEL.to_string(),
            kind: ColumnKind::NextWeek,
            cells: sample(next_week),
        });
    }

    Ok(SheetTable {
        pattern_title: week.pattern_title.clone(),
        slot_minutes: slot,
        columns,
    })
}

pub fn to_csv(table: &SheetTable) -> String {
    let mut out = String::from("time");
    for column in &table.columns {
        out.push(',');
        out.push_str(&csv_field(&column.label));
    }
    out.push('\n');

    for slot in 0..table.slot_count() {
        let minute = table.slot_start(slot);
        let _ = write!(out, "{:02}:{:02}", minute / 60, minute % 60);
        for column in &table.columns {
            out.push(',');
            out.push_str(column.cells[slot].as_str());
        }
        out.push('\n');
    }
    out
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

pub fn to_image(table: &SheetTable, palette: &Palette) -> RgbaImage {
    let slots = table.slot_count() as u32;
    let row_height = (GRID_HEIGHT / slots).max(1);
    let grid_w = table.columns.len() as u32 * CELL_WIDTH;
    let grid_h = slots * row_height;
    let grid_x = MARGIN + GUTTER_WIDTH;
    let grid_y = MARGIN + HEADER_HEIGHT;

    let width = grid_x + grid_w + MARGIN;
    let height = grid_y + grid_h + MARGIN + SWATCH + MARGIN;
    let mut img = RgbaImage::from_pixel(width, height, Color::WHITE.to_rgba());

    for (c, column) in table.columns.iter().enumerate() {
        let x = grid_x + c as u32 * CELL_WIDTH;

        raster::fill_rect(&mut img, x, MARGIN, CELL_WIDTH, HEADER_HEIGHT - 4, header_color(column, palette));
        raster::stroke_rect(&mut img, x, MARGIN, CELL_WIDTH, HEADER_HEIGHT - 4, INK);

        for (slot, state) in column.cells.iter().enumerate() {
            let y = grid_y + slot as u32 * row_height;
            raster::fill_rect(&mut img, x, y, CELL_WIDTH, row_height, palette.color(*state));
        }
        raster::fill_rect(&mut img, x, grid_y, 1, grid_h, GRID_LINE);
    }

    // hour rules across the grid, with a tick in the gutter
    for slot in hour_rule_slots(table) {
        let y = grid_y + slot as u32 * row_height;
        raster::fill_rect(&mut img, grid_x, y, grid_w, 1, GRID_LINE);
        let tick = if table.slot_start(slot) % 360 == 0 { GUTTER_WIDTH } else { GUTTER_WIDTH / 2 };
        raster::fill_rect(&mut img, grid_x - tick, y, tick, 1, INK);
    }
    raster::stroke_rect(&mut img, grid_x, grid_y, grid_w, grid_h, INK);

    raster::draw_legend(&mut img, grid_x, grid_y + grid_h + MARGIN, SWATCH, palette);
    img
}

/// Slots that begin on the hour.
fn hour_rule_slots(table: &SheetTable) -> impl Iterator<Item = usize> + '_ {
    (0..table.slot_count()).filter(|&slot| table.slot_start(slot) % 60 == 0)
}

/// Header bar: workdays in the work color, carried-over days in their carry
/// state shaded darker, everything else plain.
fn header_color(column: &SheetColumn, palette: &Palette) -> Color {
    let lead = column.cells.first().copied().unwrap_or_default();
    match column.kind {
        ColumnKind::Day(DayKind::Workday) => palette.color(ActivityState::Work),
        ColumnKind::Day(DayKind::Carryover) | ColumnKind::NextWeek => palette.color(lead).darken(0.25),
        ColumnKind::Day(DayKind::Off) => GRID_LINE,
    }
}
