use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shiftclock::commands::clock::{run_clock_plot, ClockRunOptions};
use shiftclock::commands::settings::{get_settings, pattern_titles};
use shiftclock::commands::sheet::{run_schedule_sheet, SheetRunOptions};
use shiftclock::models::DayKind;
use shiftclock::services::clock_renderer::DEFAULT_SIZE;
use shiftclock::services::sheet_renderer::{SheetOptions, DEFAULT_SLOT_MINUTES};
use shiftclock::utils::config::{resolve_config_path, resolve_results_dir};

#[derive(Parser)]
#[command(name = "shiftclock")]
#[command(about = "Night shift schedule helper: weekly sheets and 24-hour clock plots")]
struct Cli {
    /// Config file (default: $SHIFTCLOCK_CONFIG or config-files/config.json)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Where artifacts are written (default: $SHIFTCLOCK_RESULTS_DIR or results)
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the schedule patterns in the config
    Titles,
    /// Build the weekly schedule sheet
    Sheet {
        /// Pattern to use; defaults to the first one in the config
        #[arg(long, short)]
        pattern: Option<String>,

        #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
        slot: u16,

        /// Build only, write no CSV/PNG
        #[arg(long)]
        no_save: bool,

        /// Add a timestamp to output file names
        #[arg(long)]
        timestamp: bool,
    },
    /// Build the 24-hour clock plot for one pattern
    Clock {
        #[arg(long, short)]
        pattern: String,

        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: u32,

        #[arg(long)]
        no_save: bool,

        #[arg(long)]
        timestamp: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = resolve_config_path(cli.config);
    let results_dir = resolve_results_dir(cli.results_dir);
    let settings = get_settings(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Commands::Titles => {
            for title in pattern_titles(&settings) {
                println!("{title}");
            }
        }
        Commands::Sheet {
            pattern,
            slot,
            no_save,
            timestamp,
        } => {
            let options = SheetRunOptions {
                pattern,
                sheet: SheetOptions { slot_minutes: slot },
                save: !no_save,
                results_dir,
                timestamped: timestamp,
            };
            let run = run_schedule_sheet(&settings, &options)?;

            println!("Schedule sheet: {}", run.week.pattern_title);
            for day in run.week.iter() {
                let note = match day.kind {
                    DayKind::Workday => "work",
                    DayKind::Carryover => "carryover",
                    DayKind::Off => "off",
                };
                println!("  {:<10} {}", day.weekday.name(), note);
            }
            if let Some(carry) = &run.week.carry_out {
                println!("  > next Sunday: {} until {:02}:{:02}", carry.state, carry.until / 60, carry.until % 60);
            }
            if let Some(saved) = &run.saved {
                println!("Saved {} and {}", saved.csv_path.display(), saved.png_path.display());
            }
        }
        Commands::Clock {
            pattern,
            size,
            no_save,
            timestamp,
        } => {
            let options = ClockRunOptions {
                size,
                save: !no_save,
                results_dir,
                timestamped: timestamp,
            };
            let run = run_clock_plot(&settings, &pattern, &options)?;

            println!("Clock plot: {}", run.plot.title);
            for arc in &run.plot.arcs {
                println!(
                    "  {:02}:{:02}-{:02}:{:02} {}",
                    arc.start_minute / 60,
                    arc.start_minute % 60,
                    arc.end_minute / 60,
                    arc.end_minute % 60,
                    arc.state
                );
            }
            if let Some(path) = &run.png_path {
                println!("Saved {}", path.display());
            }
        }
    }

    Ok(())
}
