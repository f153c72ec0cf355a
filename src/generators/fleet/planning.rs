//! `WARTUNGEN` and `WE KW`: inspection levels and weekly scheduling.

use super::logbook::{COL_TW_HH, FlightLog, SUM_ROW};
use super::{MAINTENANCE_TYPES, at, maintenance_interval};
use crate::odf::coordinates::{local, sheet_cell};
use crate::odf::{Cell, CellValue, Row, Sheet};

/// Step between LSN levels.
pub(crate) const LSN_STEP: u32 = 25;
/// Highest LSN level listed.
pub(crate) const LSN_MAX: u32 = 12_000;
/// Calendar weeks listed on the scheduling sheet.
pub(crate) const CALENDAR_WEEKS: u32 = 53;

const WEEK_HEADERS: [&str; 5] = ["KW", "Kennzeichen", "Wartungstyp", "LSN Soll", "Bemerkungen"];

/// Status formula of an inspection at `level` hours, `None` when it is not due there.
fn due_cell(
    aircraft: &str,
    level: u32,
    interval: u32,
    row: usize,
    engine_hours: u64,
) -> Option<Cell> {
    if level == 0 || level % interval != 0 {
        return None;
    }
    let formula = format!(
        "IF({}>={};\"erledigt\";\"offen\")",
        sheet_cell(aircraft, at(COL_TW_HH, SUM_ROW).absolute()),
        local(at(0, row))
    );
    let status = if engine_hours >= level as u64 {
        "erledigt"
    } else {
        "offen"
    };
    Some(Cell::formula(&formula, CellValue::Text(status.to_string())).styled("calculated"))
}

/// Build the inspection sheet: one row per LSN level, one column per aircraft and type.
pub(crate) fn maintenance_sheet(aircraft: &[String], logs: &[FlightLog]) -> Sheet {
    let mut sheet = Sheet::new("WARTUNGEN");

    let mut header = Row::new();
    header.push(Cell::text("LSN-Stufe").styled("header"));
    for name in aircraft {
        for kind in MAINTENANCE_TYPES {
            header.push(Cell::text(&format!("{} {}", name, kind)).styled("header"));
        }
    }
    sheet.push_row(header);

    let intervals: Vec<u32> = MAINTENANCE_TYPES
        .iter()
        .filter_map(|k| maintenance_interval(k))
        .collect();
    let engine_hours: Vec<u64> = logs.iter().map(|log| log.totals().flight_time().0).collect();

    for (i, level) in (0..=LSN_MAX).step_by(LSN_STEP as usize).enumerate() {
        let row_num = i + 2;
        let mut row = Row::new();
        row.push(Cell::number(level as f64));

        // Runs of cells without a due inspection collapse into one repeated cell
        let mut blank_run = 0;
        for (name, hours) in aircraft.iter().zip(&engine_hours) {
            for &interval in &intervals {
                match due_cell(name, level, interval, row_num, *hours) {
                    Some(cell) => {
                        if blank_run > 0 {
                            row.push(Cell::empty().styled("calculated").repeated(blank_run));
                            blank_run = 0;
                        }
                        row.push(cell);
                    },
                    None => blank_run += 1,
                }
            }
        }
        if blank_run > 0 {
            row.push(Cell::empty().styled("calculated").repeated(blank_run));
        }
        sheet.push_row(row);
    }
    sheet
}

/// Build the calendar week sheet.
pub(crate) fn weeks_sheet() -> Sheet {
    let mut sheet = Sheet::new("WE KW");

    let mut header = Row::new();
    for title in WEEK_HEADERS {
        header.push(Cell::text(title).styled("header"));
    }
    sheet.push_row(header);

    for week in 1..=CALENDAR_WEEKS {
        let mut row = Row::new();
        row.push(Cell::number(week as f64).display(&format!("KW {}", week)))
            .push(Cell::empty().styled("input").repeated(WEEK_HEADERS.len() - 1));
        sheet.push_row(row);
    }
    sheet
}
