mod app;
mod calendar;
mod help;
mod theme;
use crate::app::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rangepick::{
    week_start_from_number, CalendarDay, DateConstraints, DateRangePicker, RangeState,
    DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR,
};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};
use tracing::{info, level_filters::LevelFilter, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    start: Option<Date>,
    end: Option<Date>,
    min_date: Option<Date>,
    max_date: Option<Date>,
    selectable: Vec<Date>,
    highlighted: Vec<Date>,
    min_year: Option<i32>,
    max_year: Option<i32>,
    week_start: Option<Weekday>,
    log_file: Option<PathBuf>,
    log_level: Option<Level>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("min-date") => opts.min_date = Some(parse_date(parser.value()?)?),
                Arg::Long("max-date") => opts.max_date = Some(parse_date(parser.value()?)?),
                Arg::Long("selectable") => opts.selectable.push(parse_date(parser.value()?)?),
                Arg::Long("highlight") => opts.highlighted.push(parse_date(parser.value()?)?),
                Arg::Long("min-year") => opts.min_year = Some(parser.value()?.parse()?),
                Arg::Long("max-year") => opts.max_year = Some(parser.value()?.parse()?),
                Arg::Long("week-start") => {
                    opts.week_start = Some(parse_week_start(parser.value()?)?);
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => opts.log_level = Some(parser.value()?.parse()?),
                Arg::Value(value) if opts.start.is_none() => opts.start = Some(parse_date(value)?),
                Arg::Value(value) if opts.end.is_none() => opts.end = Some(parse_date(value)?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path, opts.log_level)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut picker = opts.build_picker(today)?;
                picker.register_listener(|range| info!(%range, "range changed"));
                let accepted = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(App::new(picker).run(&mut terminal)?)
                })?;
                match accepted {
                    Some(range) => {
                        info!(%range, "range accepted");
                        println!("{range}");
                    }
                    None => info!("picking cancelled"),
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [<options>] [START [END]]");
                println!();
                println!("Pick a range of dates in the terminal and print it as");
                println!("\"START END DURATION\"");
                println!();
                println!("Dates are written YYYY-MM-DD.  START defaults to today and END");
                println!("defaults to START.");
                println!();
                println!("Options:");
                println!("  --min-date <DATE>     Earliest date that may be picked");
                println!("  --max-date <DATE>     Latest date that may be picked");
                println!("  --selectable <DATE>   Allow only the given dates to be picked;");
                println!("                        may be given more than once");
                println!("  --highlight <DATE>    Mark the given date in the day grid; may");
                println!("                        be given more than once");
                println!("  --min-year <YEAR>     First year offered by the year lists");
                println!("                        [default: {DEFAULT_MIN_YEAR}]");
                println!("  --max-year <YEAR>     Last year offered by the year lists");
                println!("                        [default: {DEFAULT_MAX_YEAR}]");
                println!("  --week-start <DAY>    First day of the week, as a name or as a");
                println!("                        number from 1 (Sunday) to 7 (Saturday)");
                println!("  --log-file <PATH>     Append logs to the given file");
                println!("  --log-level <LEVEL>   Log level: trace, debug, info, warn, or");
                println!("                        error [default: info, or $RUST_LOG]");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    fn build_picker(&self, today: Date) -> anyhow::Result<DateRangePicker> {
        let mut constraints = DateConstraints::new();
        constraints
            .set_year_range(
                self.min_year.unwrap_or(DEFAULT_MIN_YEAR),
                self.max_year.unwrap_or(DEFAULT_MAX_YEAR),
            )
            .context("invalid year range")?;
        constraints
            .set_min_date(self.min_date.map(CalendarDay::from))
            .context("invalid minimum date")?;
        constraints
            .set_max_date(self.max_date.map(CalendarDay::from))
            .context("invalid maximum date")?;
        constraints.set_selectable_days(self.selectable.iter().copied().map(CalendarDay::from));
        constraints.set_highlighted_days(self.highlighted.iter().copied().map(CalendarDay::from));
        if let Some(weekday) = self.week_start {
            constraints.set_week_start(weekday);
        }
        let start = match self.start {
            Some(date) => CalendarDay::from(date),
            None => constraints.nearest_selectable(CalendarDay::from(today)),
        };
        let end = self.end.map_or(start, CalendarDay::from);
        Ok(DateRangePicker::new(RangeState::new(start, end), constraints))
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    Date::parse(&value, &YMD_FMT).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

fn parse_week_start(value: OsString) -> Result<Weekday, lexopt::Error> {
    let value = value.string()?;
    let weekday = match value.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sunday),
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        other => other
            .parse::<u8>()
            .map_err(anyhow::Error::from)
            .and_then(|n| week_start_from_number(n).map_err(anyhow::Error::from)),
    };
    weekday.map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: e.into(),
    })
}

/// Send logs to `path`.  Without an explicit level, `RUST_LOG` is honored.
fn init_logging(path: &Path, level: Option<Level>) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
