//! Fleet-tracking workbook.
//!
//! One log sheet per aircraft followed by the summary and planning sheets:
//!
//! | Sheet | Content |
//! |---|---|
//! | `<registration>` | daily flight log with running airframe and engine times |
//! | `STATISTIK` | monthly and yearly aggregation per aircraft |
//! | `OVERVIEW` | current status per aircraft |
//! | `STEUERUNG` | carry-over values and monthly flight hour targets |
//! | `WARTUNGEN` | inspection levels every 25 hours up to 12000 |
//! | `WE KW` | inspection scheduling per calendar week |
//!
//! Log sheets are blank unless a demo seed is given, in which case every
//! aircraft gets a reproducible pseudo-random year of flights.

mod demo;
mod logbook;
mod overview;
mod planning;
mod statistics;

pub use demo::demo_log;
pub use logbook::{FlightDay, FlightLog, Totals};

use crate::common::{Error, Metadata, Result};
use crate::config::FleetConfig;
use crate::odf::coordinates::CellCoord;
use crate::odf::{CellStyle, SpreadsheetBuilder};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

/// German month names with their day counts (no leap year).
pub const MONTHS: [(&str, usize); 12] = [
    ("Januar", 31),
    ("Februar", 28),
    ("März", 31),
    ("April", 30),
    ("Mai", 31),
    ("Juni", 30),
    ("Juli", 31),
    ("August", 31),
    ("September", 30),
    ("Oktober", 31),
    ("November", 30),
    ("Dezember", 31),
];

/// Days covered by a log sheet.
pub const DAYS_PER_YEAR: usize = 365;

/// Inspection types; the number is the interval in flight hours.
pub const MAINTENANCE_TYPES: [&str; 6] = ["25WE", "50WE", "75WE", "100WE", "300WE", "1200WE"];

/// Names of the sheets following the log sheets.
pub const SUMMARY_SHEETS: [&str; 5] = ["STATISTIK", "OVERVIEW", "STEUERUNG", "WARTUNGEN", "WE KW"];

/// Spreadsheet row (1-based) of January 1st on a log sheet.
pub(crate) const FIRST_DAY_ROW: usize = 4;
/// Spreadsheet row (1-based) of December 31st on a log sheet.
pub(crate) const LAST_DAY_ROW: usize = FIRST_DAY_ROW + DAYS_PER_YEAR - 1;

/// Coordinate from a 0-based column and a 1-based spreadsheet row.
#[inline]
pub(crate) const fn at(column: usize, row: usize) -> CellCoord {
    CellCoord::new(column, row - 1)
}

/// Index of the first day of `month` (0-based) within the year.
pub(crate) fn first_day_of_month(month: usize) -> usize {
    MONTHS[..month].iter().map(|(_, days)| days).sum()
}

/// Spreadsheet rows (1-based) of the days of `month` on a log sheet.
pub(crate) fn month_rows(month: usize) -> RangeInclusive<usize> {
    let first = FIRST_DAY_ROW + first_day_of_month(month);
    first..=first + MONTHS[month].1 - 1
}

/// Interval in flight hours of an inspection type such as `300WE`.
pub fn maintenance_interval(kind: &str) -> Option<u32> {
    kind.strip_suffix("WE")?.parse().ok()
}

/// Settings of the fleet workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetOptions {
    pub aircraft: Vec<String>,
    pub title: String,
    pub generator: String,
    /// Fill the logs with seeded demo flights
    pub demo_seed: Option<u64>,
}

impl Default for FleetOptions {
    fn default() -> Self {
        Self::from_config(&FleetConfig::default(), None)
    }
}

impl FleetOptions {
    pub fn from_config(config: &FleetConfig, demo_seed: Option<u64>) -> Self {
        Self {
            aircraft: config.aircraft.clone(),
            title: config.title.clone(),
            generator: config.generator.clone(),
            demo_seed,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.aircraft.is_empty() {
            return Err(Error::InvalidInput("fleet must not be empty".to_string()));
        }
        if let Some(name) = self
            .aircraft
            .iter()
            .find(|a| SUMMARY_SHEETS.contains(&a.as_str()))
        {
            return Err(Error::InvalidInput(format!(
                "registration '{}' clashes with a summary sheet",
                name
            )));
        }
        Ok(())
    }
}

/// What was written.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetReport {
    /// Sheet names in workbook order
    pub sheets: Vec<String>,
    /// Number of log sheets
    pub log_sheets: usize,
    /// Whether demo flights were generated
    pub demo: bool,
    /// File size in bytes
    pub size: usize,
}

fn styles(builder: &mut SpreadsheetBuilder) {
    builder
        .add_style(
            CellStyle::new("header")
                .background("#667eea")
                .color("#ffffff")
                .bold()
                .font_size("11pt"),
        )
        .add_style(CellStyle::new("input").background("#f5f5f5"))
        .add_style(CellStyle::new("calculated").background("#e8eaf6"))
        .add_style(CellStyle::new("vortrag").background("#ffeb3b").bold())
        .add_style(
            CellStyle::new("summe")
                .background("#4caf50")
                .color("#ffffff")
                .bold(),
        )
        .add_style(CellStyle::new("remarks").background("#ffffff"));
}

/// Flight logs per aircraft: blank, or demo data when seeded.
fn flight_logs(opts: &FleetOptions) -> Vec<FlightLog> {
    (0..opts.aircraft.len())
        .map(|index| match opts.demo_seed {
            Some(seed) => demo_log(seed, index),
            None => FlightLog::blank(),
        })
        .collect()
}

/// Assemble the workbook.
pub fn build_workbook(opts: &FleetOptions) -> Result<SpreadsheetBuilder> {
    opts.validate()?;
    let logs = flight_logs(opts);
    let today = chrono::Utc::now().date_naive();

    let mut builder = SpreadsheetBuilder::new();
    builder.set_metadata(Metadata {
        title: Some(opts.title.clone()),
        description: Some(format!(
            "Flottenüberwachung für {} Luftfahrzeuge",
            opts.aircraft.len()
        )),
        generator: Some(opts.generator.clone()),
        ..Metadata::default()
    });
    styles(&mut builder);

    for (aircraft, log) in opts.aircraft.iter().zip(&logs) {
        debug!(aircraft = %aircraft, flight_days = log.flight_days(), "log sheet");
        builder.add_sheet(logbook::logbook_sheet(aircraft, log));
    }

    debug!("STATISTIK");
    builder.add_sheet(statistics::statistics_sheet(&opts.aircraft, &logs));
    debug!("OVERVIEW");
    builder.add_sheet(overview::overview_sheet(&opts.aircraft, &logs, today));
    debug!("STEUERUNG");
    builder.add_sheet(overview::control_sheet(&opts.aircraft));
    debug!("WARTUNGEN");
    builder.add_sheet(planning::maintenance_sheet(&opts.aircraft, &logs));
    debug!("WE KW");
    builder.add_sheet(planning::weeks_sheet());

    Ok(builder)
}

/// Write the workbook to `path`.
pub fn generate<P: AsRef<Path>>(opts: &FleetOptions, path: P) -> Result<FleetReport> {
    let path = path.as_ref();
    let builder = build_workbook(opts)?;
    let size = builder.save(path)?;
    info!(path = %path.display(), size, "fleet workbook written");

    Ok(FleetReport {
        sheets: builder.sheets().iter().map(|s| s.name.clone()).collect(),
        log_sheets: opts.aircraft.len(),
        demo: opts.demo_seed.is_some(),
        size,
    })
}
