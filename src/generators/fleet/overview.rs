//! `OVERVIEW` and `STEUERUNG`: fleet status and flight hour targets.

use super::logbook::{COL_CELL_HH, COL_CELL_MM, COL_TW_HH, COL_TW_MM, FlightLog, SUM_ROW};
use super::statistics::BLOCK_ROWS;
use super::{MONTHS, at};
use crate::odf::coordinates::sheet_cell;
use crate::odf::{Cell, CellValue, Row, Sheet};
use chrono::{Datelike, NaiveDate};

const OVERVIEW_HEADERS: [&str; 13] = [
    "Kennzeichen",
    "Flugklarheit",
    "BDL",
    "KONFIG",
    "Standort",
    "LSN IST",
    "TW-LSN IST",
    "Steuerung offen (Aktuell)",
    "Steuerung offen (Nächstes)",
    "COUNTDOWN WE",
    "ANMERKUNGEN",
    "Wartung (Stunden)",
    "Wartung (Planung)",
];

const CONTROL_CARRY_HEADERS: [&str; 4] = [
    "Vortrag Zelle HH",
    "Vortrag Zelle MM",
    "Vortrag TW HH",
    "Vortrag TW MM",
];

/// First month target column on `STEUERUNG`.
const CONTROL_FIRST_MONTH_COL: usize = 1 + CONTROL_CARRY_HEADERS.len();

/// Interval of the smallest inspection, counted down on the overview.
const COUNTDOWN_INTERVAL: u64 = 25;

/// Reference date of the BDL check.
const BDL_REFERENCE: (i32, u32, u32) = (2024, 1, 1);
/// Days after the reference date from which `BDL` is shown.
const BDL_GRACE_DAYS: i64 = 14;

fn header_row(headers: &[&str]) -> Row {
    let mut row = Row::new();
    for header in headers {
        row.push(Cell::text(header).styled("header"));
    }
    row
}

fn bdl_due(today: NaiveDate) -> bool {
    let (y, m, d) = BDL_REFERENCE;
    NaiveDate::from_ymd_opt(y, m, d)
        .is_some_and(|start| today.signed_duration_since(start).num_days() > BDL_GRACE_DAYS)
}

/// `HH:MM` text of a log sheet's current hours and minutes cells.
fn hours_minutes(aircraft: &str, hh_col: usize, mm_col: usize, value: (u64, u64)) -> Cell {
    let formula = format!(
        "{}&\":\"&TEXT({};\"00\")",
        sheet_cell(aircraft, at(hh_col, SUM_ROW)),
        sheet_cell(aircraft, at(mm_col, SUM_ROW))
    );
    let cached = CellValue::Text(format!("{}:{:02}", value.0, value.1));
    Cell::formula(&formula, cached).styled("calculated")
}

/// Month target of the aircraft at `index` on `STEUERUNG`.
fn target_ref(index: usize, month: usize) -> String {
    sheet_cell("STEUERUNG", at(CONTROL_FIRST_MONTH_COL + month, index + 2))
}

/// Flight hours of the aircraft at `index` in `month` on `STATISTIK`.
fn flown_ref(index: usize, month: usize) -> String {
    sheet_cell("STATISTIK", at(2 + month, 2 + index * BLOCK_ROWS))
}

fn overview_row(index: usize, aircraft: &str, log: &FlightLog, today: NaiveDate) -> Row {
    let month = today.month0() as usize;
    let next = (month + 1) % MONTHS.len();
    let flight_time = log.totals().flight_time();
    let flown = log.month_totals(month).flight_time().0;

    let mut row = Row::new();
    row.push(Cell::text(aircraft))
        .push(Cell::text("VB").styled("input"));

    let bdl = if bdl_due(today) {
        CellValue::Text("BDL".to_string())
    } else {
        CellValue::Empty
    };
    let (y, m, d) = BDL_REFERENCE;
    row.push(
        Cell::formula(
            &format!(
                "IF(TODAY()-DATE({};{};{})>{};\"BDL\";\"\")",
                y, m, d, BDL_GRACE_DAYS
            ),
            bdl,
        )
        .styled("calculated"),
    );
    row.push(Cell::empty().styled("input").repeated(2));

    row.push(hours_minutes(aircraft, COL_CELL_HH, COL_CELL_MM, flight_time))
        .push(hours_minutes(aircraft, COL_TW_HH, COL_TW_MM, flight_time));

    // Targets default to zero, so the open hours start out negative once flown
    row.push(
        Cell::formula(
            &format!("{}-{}", target_ref(index, month), flown_ref(index, month)),
            CellValue::Number(-(flown as f64)),
        )
        .styled("calculated"),
    );
    row.push(Cell::formula(&target_ref(index, next), CellValue::Number(0.0)).styled("calculated"));

    let countdown = COUNTDOWN_INTERVAL - flight_time.0 % COUNTDOWN_INTERVAL;
    row.push(
        Cell::formula(
            &format!(
                "{}-MOD({};{})",
                COUNTDOWN_INTERVAL,
                sheet_cell(aircraft, at(COL_TW_HH, SUM_ROW)),
                COUNTDOWN_INTERVAL
            ),
            CellValue::Number(countdown as f64),
        )
        .styled("calculated"),
    );

    row.push(Cell::empty().styled("input"))
        .push(Cell::empty().styled("calculated").repeated(2));
    row
}

/// Build the overview sheet, with cached values for `today`.
pub(crate) fn overview_sheet(aircraft: &[String], logs: &[FlightLog], today: NaiveDate) -> Sheet {
    let mut sheet = Sheet::new("OVERVIEW");
    sheet.push_row(header_row(&OVERVIEW_HEADERS));
    for (index, (name, log)) in aircraft.iter().zip(logs).enumerate() {
        sheet.push_row(overview_row(index, name, log, today));
    }
    sheet
}

/// Build the control sheet with carry-over inputs and monthly targets.
pub(crate) fn control_sheet(aircraft: &[String]) -> Sheet {
    let mut sheet = Sheet::new("STEUERUNG");

    let mut headers: Vec<String> = vec!["Kennzeichen".to_string()];
    headers.extend(CONTROL_CARRY_HEADERS.iter().map(|h| h.to_string()));
    headers.extend(MONTHS.iter().map(|(month, _)| format!("{} Soll", month)));
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    sheet.push_row(header_row(&headers));

    for name in aircraft {
        let mut row = Row::new();
        row.push(Cell::text(name));
        for _ in 0..CONTROL_CARRY_HEADERS.len() + MONTHS.len() {
            row.push(Cell::number(0.0).styled("input"));
        }
        sheet.push_row(row);
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::fleet::{DAYS_PER_YEAR, FlightDay};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bdl() {
        assert!(!bdl_due(date(2024, 1, 10)));
        assert!(!bdl_due(date(2024, 1, 15)));
        assert!(bdl_due(date(2024, 1, 16)));
    }

    #[test]
    fn test_overview_row() {
        let mut days = vec![None; DAYS_PER_YEAR];
        days[0] = Some(FlightDay {
            hours: 30,
            minutes: 5,
            ..FlightDay::default()
        });
        days[33] = Some(FlightDay {
            hours: 1,
            minutes: 0,
            ..FlightDay::default()
        });
        let log = FlightLog::from_days(days).unwrap();
        let names = vec!["3C-OA".to_string(), "RES1".to_string()];
        let sheet = overview_sheet(&names, &[FlightLog::blank(), log], date(2026, 2, 10));

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 13);
        let row = &sheet.rows[2];
        let cell = |col: usize| row.cell_at(col).unwrap();

        assert_eq!(cell(1).value, CellValue::Text("VB".into()));
        assert_eq!(cell(2).formula.as_deref(), Some("IF(TODAY()-DATE(2024;1;1)>14;\"BDL\";\"\")"));
        assert_eq!(cell(2).value, CellValue::Text("BDL".into()));
        assert_eq!(
            cell(5).formula.as_deref(),
            Some("[$'RES1'.L3]&\":\"&TEXT([$'RES1'.M3];\"00\")")
        );
        assert_eq!(cell(5).value, CellValue::Text("31:05".into()));
        assert_eq!(cell(7).formula.as_deref(), Some("[$'STEUERUNG'.G3]-[$'STATISTIK'.D10]"));
        assert_eq!(cell(7).numeric_value(), Some(-1.0));
        assert_eq!(cell(8).formula.as_deref(), Some("[$'STEUERUNG'.H3]"));
        assert_eq!(cell(9).formula.as_deref(), Some("25-MOD([$'RES1'.N3];25)"));
        assert_eq!(cell(9).numeric_value(), Some(19.0));
    }

    #[test]
    fn test_december_points_to_january() {
        let names = vec!["3C-OA".to_string()];
        let sheet = overview_sheet(&names, &[FlightLog::blank()], date(2026, 12, 1));
        let next = sheet.rows[1].cell_at(8).unwrap();
        assert_eq!(next.formula.as_deref(), Some("[$'STEUERUNG'.F2]"));
    }

    #[test]
    fn test_control_sheet() {
        let names = vec!["3C-OA".to_string(), "RES2".to_string()];
        let sheet = control_sheet(&names);
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 17);
        let header = |col: usize| sheet.rows[0].cell_at(col).unwrap().value.clone();
        assert_eq!(header(5), CellValue::Text("Januar Soll".into()));
        assert_eq!(header(16), CellValue::Text("Dezember Soll".into()));
        assert_eq!(sheet.rows[2].cell_at(16).unwrap().numeric_value(), Some(0.0));
    }
}
