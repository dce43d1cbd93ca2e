use std::path::Path;

use shiftclock::commands::clock::{build_clock_plot, run_clock_plot, ClockRunOptions};
use shiftclock::commands::settings::{get_settings, update_settings};
use shiftclock::commands::sheet::{build_schedule_sheet, run_schedule_sheet, SheetRunOptions};
use shiftclock::models::{ActivityState, Color, DayKind, ScheduleConfig, Weekday};
use shiftclock::services::pattern_resolver::resolve;
use shiftclock::services::sheet_renderer::{self, SheetOptions, NEXT_WEEK_LABEL};
use shiftclock::ScheduleError;

const CONFIG: &str = r##"{
    "workdays": ["Monday", "Tuesday", "Wednesday", "Saturday"],
    "prev_week_night": true,
    "next_week_night": true,
    "colors": {
        "awake": "#f4d03f",
        "asleep": "#2e4053",
        "commute": "#a569bd",
        "work": "#c0392b"
    },
    "schedule_patterns": [
        {
            "title": "Nights 10p-7a",
            "intervals": [
                {"state": "awake", "start": 0, "end": 0},
                {"state": "asleep", "start": "08:00", "end": "15:00"},
                {"state": "commute", "start": 1260, "end": 1320},
                {"state": "work", "start": 1320, "end": 420},
                {"state": "commute", "start": 420, "end": 480}
            ]
        },
        {
            "title": "Days",
            "intervals": [
                {"state": "asleep", "start": 1380, "end": 390},
                {"state": "commute", "start": 420, "end": 480},
                {"state": "work", "start": 480, "end": 960},
                {"state": "commute", "start": 960, "end": 1020}
            ]
        }
    ]
}"##;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, CONFIG).unwrap();
    path
}

fn sheet_options(dir: &Path, pattern: &str, slot_minutes: u16) -> SheetRunOptions {
    SheetRunOptions {
        pattern: Some(pattern.to_string()),
        sheet: SheetOptions { slot_minutes },
        save: true,
        results_dir: dir.join("results"),
        timestamped: false,
    }
}

#[test]
fn night_week_from_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = get_settings(&write_config(dir.path())).unwrap();
    let run = run_schedule_sheet(&settings, &sheet_options(dir.path(), "Nights 10p-7a", 30)).unwrap();
    let week = &run.week;

    let kinds: Vec<_> = week.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DayKind::Carryover, // from the previous week's Saturday
            DayKind::Workday,
            DayKind::Workday,
            DayKind::Workday,
            DayKind::Carryover,
            DayKind::Off,
            DayKind::Workday,
        ]
    );
    assert_eq!(week.carry_in.map(|c| c.until), Some(420));
    assert_eq!(week.carry_out.map(|c| c.state), Some(ActivityState::Work));

    let thursday = &week.day(Weekday::Thursday).timeline;
    assert_eq!(thursday.state_at(0), ActivityState::Work);
    assert_eq!(thursday.state_at(419), ActivityState::Work);
    assert_eq!(thursday.state_at(420), ActivityState::Commute);
    assert_eq!(thursday.state_at(480), ActivityState::Asleep);
    assert_eq!(thursday.state_at(900), ActivityState::Empty);
    // Friday night was off, so Saturday's shift starts fresh
    assert_eq!(week.day(Weekday::Saturday).timeline.state_at(0), ActivityState::Empty);
    assert_eq!(week.day(Weekday::Saturday).timeline.state_at(1380), ActivityState::Work);
    assert!(week.day(Weekday::Friday).timeline.is_uniform(ActivityState::Empty));

    let csv = std::fs::read_to_string(&run.saved.as_ref().unwrap().csv_path).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(
        header,
        format!("time,Sunday,Monday,Tuesday,Wednesday,Thursday,Friday,Saturday,{NEXT_WEEK_LABEL}")
    );
    assert_eq!(csv.lines().count(), 1 + 48);
}

/// Minutes at the start of `day` that are blanked because the night before it
/// was not worked.
fn fresh_start(settings: &ScheduleConfig, title: &str, day: Weekday) -> u16 {
    let worked_night_before = match day {
        Weekday::Sunday => settings.prev_week_night && settings.is_workday(Weekday::Saturday),
        _ => settings.is_workday(day.previous()),
    };
    if worked_night_before {
        return 0;
    }
    let resolved = resolve(settings.pattern(title).unwrap()).unwrap();
    match resolved.carryover() {
        Some(carry) => resolved.without_carry_in(&carry).segments()[0].end,
        None => 0,
    }
}

#[test]
fn sheet_and_clock_agree_on_every_workday_slot() {
    let dir = tempfile::tempdir().unwrap();
    let settings = get_settings(&write_config(dir.path())).unwrap();

    for title in ["Nights 10p-7a", "Days"] {
        let mut options = sheet_options(dir.path(), title, 15);
        options.save = false;
        let sheet = build_schedule_sheet(&settings, &options).unwrap();
        let clock = build_clock_plot(&settings, title, 120).unwrap();

        let csv = sheet_renderer::to_csv(&sheet.table);
        let rows: Vec<Vec<&str>> = csv.lines().skip(1).map(|l| l.split(',').collect()).collect();

        for day in Weekday::ALL {
            if !settings.is_workday(day) {
                continue;
            }
            let column = 1 + day.index();
            let fresh_until = fresh_start(&settings, title, day);
            for (slot, row) in rows.iter().enumerate() {
                let minute = slot as u16 * 15;
                let expected = if minute < fresh_until {
                    ActivityState::Empty
                } else {
                    clock.plot.state_at(minute)
                };
                assert_eq!(row[column], expected.as_str(), "{title} {day} at minute {minute}");
            }
        }
    }
}

#[test]
fn clock_plot_is_display_only_unless_saved() {
    let dir = tempfile::tempdir().unwrap();
    let settings = get_settings(&write_config(dir.path())).unwrap();
    let mut options = ClockRunOptions {
        size: 160,
        save: false,
        results_dir: dir.path().join("results"),
        timestamped: false,
    };

    let run = run_clock_plot(&settings, "Days", &options).unwrap();
    assert!(run.png_path.is_none());
    assert!(!dir.path().join("results").exists());

    options.save = true;
    let run = run_clock_plot(&settings, "Days", &options).unwrap();
    let path = run.png_path.unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("clock_days_") && name.ends_with(".png"), "{name}");
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded, run.image);
}

#[test]
fn unknown_pattern_is_reported_with_known_titles() {
    let dir = tempfile::tempdir().unwrap();
    let settings = get_settings(&write_config(dir.path())).unwrap();

    let err = run_schedule_sheet(&settings, &sheet_options(dir.path(), "Swing", 30)).unwrap_err();
    match err {
        ScheduleError::PatternNotFound { title, known } => {
            assert_eq!(title, "Swing");
            assert_eq!(known, vec!["Nights 10p-7a".to_string(), "Days".to_string()]);
        }
        other => panic!("expected PatternNotFound, got {other:?}"),
    }
    assert!(!dir.path().join("results").exists());
}

#[test]
fn invalid_interval_is_fatal_to_that_pattern_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"workdays": ["Monday"], "schedule_patterns": [
            {"title": "Broken", "intervals": [{"state": "work", "start": 600, "end": 1500}]},
            {"title": "Fine", "intervals": [{"state": "work", "start": 600, "end": 900}]}
        ]}"#,
    )
    .unwrap();
    let settings = get_settings(&path).unwrap();

    assert!(matches!(
        build_clock_plot(&settings, "Broken", 100),
        Err(ScheduleError::InvalidInterval { index: 0, value: 1500, .. })
    ));
    assert!(build_clock_plot(&settings, "Fine", 100).is_ok());
}

#[test]
fn editing_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let mut settings = get_settings(&path).unwrap();
    assert_eq!(settings.colors.len(), 4);
    settings.set_workday(Weekday::Saturday, false);
    settings.set_color(ActivityState::Awake, Color::rgb(0xff, 0xee, 0x00));
    update_settings(&path, &settings).unwrap();

    let reloaded = get_settings(&path).unwrap();
    assert!(!reloaded.is_workday(Weekday::Saturday));
    assert_eq!(reloaded.colors.len(), 5);
    assert_eq!(reloaded.colors.color(ActivityState::Awake), Color::rgb(0xff, 0xee, 0x00));
    assert_eq!(reloaded.colors.color(ActivityState::Empty), Color::WHITE);
    assert_eq!(reloaded.schedule_patterns, settings.schedule_patterns);
}
