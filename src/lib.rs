//! # shiftclock
//!
//! Models a recurring shift schedule and renders it two ways: a weekly sheet
//! (CSV and PNG) and a 24-hour clock plot (PNG).
//!
//! - [`models`]: configuration, activity states, colors and resolved timelines
//! - [`services`]: pattern resolution, the week timeline engine, both renderers
//! - [`storage`]: config load/save and atomic artifact writes
//! - [`commands`]: the entry points a settings editor or CLI calls

pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use error::{Result, ScheduleError};
pub use models::{ActivityState, Color, DayTimeline, Palette, ScheduleConfig, WeekTimeline, Weekday};
