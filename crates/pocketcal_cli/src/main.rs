//! Command-line front end for pocketcal.
//!
//! # Responsibility
//! - Parse commands and route them to `pocketcal_core::CalendarService`.
//! - Render month grids and day lists as plain text.
//! - Show validation failures inline and exit non-zero.

use chrono::Datelike;
use clap::{Parser, Subcommand};
use log::{error, warn};
use pocketcal_core::db::open_db;
use pocketcal_core::{
    date_key, export_file_name, init_logging, AppConfig, BlobStatus, CalendarDay, CalendarService,
    Clock, Event, EventColor, EventDraft, EventStore, MonthCursor, ServiceError,
    SqliteKeyValueStore, SystemClock, GRID_COLS,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MAX_EVENTS_PER_CELL: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "pocketcal", version, about = "Single-user month calendar")]
struct Cli {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(long, default_value = "pocketcal.toml")]
    config: PathBuf,
    /// Overrides `storage.db_path` from the config.
    #[arg(long)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show a month grid (defaults to the current month).
    Month {
        year: Option<i32>,
        /// 1-based month; values outside 1..=12 roll into adjacent years.
        month: Option<i32>,
        /// Only show events matching this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// List one day's events in start-time order.
    Day { date: String },
    /// Create an event.
    Add {
        date: String,
        start: String,
        end: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_color)]
        color: Option<EventColor>,
    },
    /// Replace an existing event's fields.
    Edit {
        id: String,
        date: String,
        start: String,
        end: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_color)]
        color: Option<EventColor>,
    },
    /// Move an event to another date, keeping its times.
    Move { id: String, date: String },
    /// Delete an event. Unknown ids are ignored.
    Delete { id: String },
    /// Search titles and descriptions.
    Search { query: String },
    /// Export one month's events as JSON.
    Export {
        year: i32,
        month: i32,
        /// Output file; defaults to `calendar-events-YYYY-M.json`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(ServiceError::Validation(reason)) = err.downcast_ref::<ServiceError>() {
                eprintln!("rejected: {reason}");
            } else {
                error!("event=cli_command module=cli status=error error={err}");
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load(&cli.config)?;
    if let Some(logging) = config.logging.to_logging_config() {
        init_logging(&logging)?;
    }

    let db_path = cli.db.unwrap_or(config.storage.db_path);
    let conn = open_db(&db_path)?;
    let store = EventStore::with_key(SqliteKeyValueStore::new(&conn), config.storage.key);
    let mut service = CalendarService::with_defaults(store);

    if let BlobStatus::Corrupt { reason } = service.load_status()? {
        warn!("event=cli_load module=cli status=corrupt");
        eprintln!("warning: stored events could not be read and were reset ({reason})");
    }

    match cli.command {
        Command::Month {
            year,
            month,
            search,
        } => {
            let cursor = month_cursor(&SystemClock, year, month);
            let days = match search {
                Some(query) => service.search_month_view(cursor, &query)?,
                None => service.month_view(cursor)?,
            };
            print_month(cursor, &days);
        }
        Command::Day { date } => {
            let events = service.day_events(&date)?;
            if events.is_empty() {
                println!("No events on {date}");
            }
            events.iter().for_each(print_event);
        }
        Command::Add {
            date,
            start,
            end,
            title,
            description,
            color,
        } => {
            let draft = build_draft(title, date, start, end, description, color);
            let event = service.create_event(draft)?;
            println!("created {}", event.id);
        }
        Command::Edit {
            id,
            date,
            start,
            end,
            title,
            description,
            color,
        } => {
            let draft = build_draft(title, date, start, end, description, color);
            match service.update_event(&id, draft)? {
                Some(event) => println!("updated {}", event.id),
                None => println!("no event with id {id}"),
            }
        }
        Command::Move { id, date } => match service.reschedule_event(&id, &date)? {
            Some(event) => println!("moved {} to {}", event.id, event.date),
            None => println!("no event with id {id}"),
        },
        Command::Delete { id } => {
            if service.delete_event(&id)? {
                println!("deleted {id}");
            }
        }
        Command::Search { query } => {
            service.store().search(&query)?.iter().for_each(print_event);
        }
        Command::Export { year, month, out } => {
            let cursor = one_based_month(year, month);
            let json = service.export_month(cursor)?;
            let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(cursor)));
            std::fs::write(&path, json)?;
            println!("exported to {}", path.display());
        }
    }

    Ok(())
}

fn month_cursor(clock: &impl Clock, year: Option<i32>, month: Option<i32>) -> MonthCursor {
    let current = MonthCursor::containing(clock.today());
    match (year, month) {
        (None, None) => current,
        (year, month) => one_based_month(
            year.unwrap_or(current.year),
            month.unwrap_or(current.month0 as i32 + 1),
        ),
    }
}

/// Converts a user-facing 1-based month; extreme values roll over years.
fn one_based_month(year: i32, month: i32) -> MonthCursor {
    MonthCursor::new(year, month.saturating_sub(1))
}

fn build_draft(
    title: String,
    date: String,
    start: String,
    end: String,
    description: Option<String>,
    color: Option<EventColor>,
) -> EventDraft {
    EventDraft {
        title,
        description,
        date,
        start_time: start,
        end_time: end,
        color,
    }
}

fn parse_color(value: &str) -> Result<EventColor, String> {
    EventColor::parse(value)
        .ok_or_else(|| format!("unknown color `{value}`; expected work|personal|other"))
}

fn print_month(cursor: MonthCursor, days: &[CalendarDay]) {
    println!("{:04}-{:02}", cursor.year, cursor.month0 + 1);
    println!("{}", WEEKDAY_HEADER.map(|name| format!("{name:>6}")).join(""));

    for row in days.chunks(GRID_COLS) {
        let line = row.iter().map(format_cell).collect::<String>();
        println!("{line}");
    }

    for day in days.iter().filter(|day| day.is_current_month && !day.events.is_empty()) {
        println!();
        println!("{}", date_key(day.date));
        for event in day.events.iter().take(MAX_EVENTS_PER_CELL) {
            print_event(event);
        }
        if day.events.len() > MAX_EVENTS_PER_CELL {
            println!("  +{} more", day.events.len() - MAX_EVENTS_PER_CELL);
        }
    }
}

fn format_cell(day: &CalendarDay) -> String {
    let marker = if day.is_today { '*' } else { ' ' };
    let count = if day.events.is_empty() {
        ' '
    } else {
        char::from_digit(day.events.len().min(9) as u32, 10).unwrap_or('+')
    };
    if day.is_current_month {
        format!("{marker}{:>3}{count} ", day.date.day())
    } else {
        format!("{marker}({:>2}){count}", day.date.day())
    }
}

fn print_event(event: &Event) {
    let color = event.color.map_or("-", EventColor::as_str);
    println!(
        "  {}-{} [{color}] {} ({})",
        event.start_time, event.end_time, event.title, event.id
    );
}
