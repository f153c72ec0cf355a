//! Per-aircraft flight log sheets.
//!
//! Layout (1-based rows):
//! - row 1: column headers
//! - row 2: `ÜBERTRAG`, carry-over inputs for airframe (L/M), engine (N/O)
//!   and engine corrections (P/Q)
//! - row 3: `SUMME`, yearly sums and the current airframe/engine times
//! - rows 4..=368: one row per day with inputs and running times

use super::{DAYS_PER_YEAR, FIRST_DAY_ROW, LAST_DAY_ROW, MONTHS, at, first_day_of_month};
use crate::common::{Error, Result};
use crate::odf::coordinates::{local, local_range};
use crate::odf::{Cell, CellValue, Row, Sheet};
use std::ops::Range;

/// Log sheet column headers; the two blank columns separate inputs from times.
pub(crate) const HEADERS: [&str; 17] = [
    "Monat",
    "Tag",
    "HH",
    "MM",
    "LDG",
    "CYC",
    "Fuel-INL",
    "Fuel-AUSL",
    "REMARKS",
    "",
    "",
    "Zellen-LSN HH",
    "Zellen-LSN MM",
    "TW-LSN HH",
    "TW-LSN MM",
    "TW-CORR HH",
    "TW-CORR MM",
];

// Column indices (0-based)
pub(crate) const COL_MONTH: usize = 0;
pub(crate) const COL_HOURS: usize = 2;
pub(crate) const COL_MINUTES: usize = 3;
pub(crate) const COL_FUEL_ABROAD: usize = 7;
pub(crate) const COL_CELL_HH: usize = 11;
pub(crate) const COL_CELL_MM: usize = 12;
pub(crate) const COL_TW_HH: usize = 13;
pub(crate) const COL_TW_MM: usize = 14;
pub(crate) const COL_CORR_HH: usize = 15;
pub(crate) const COL_CORR_MM: usize = 16;

/// Spreadsheet row of the carry-over values.
pub(crate) const CARRY_ROW: usize = 2;
/// Spreadsheet row of the totals.
pub(crate) const SUM_ROW: usize = 3;

/// One day's entries in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightDay {
    pub hours: u32,
    pub minutes: u32,
    pub landings: u32,
    pub cycles: u32,
    pub fuel_inland: u32,
    pub fuel_abroad: u32,
}

/// Sums over a span of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub hours: u64,
    pub minutes: u64,
    pub landings: u64,
    pub cycles: u64,
    pub fuel_inland: u64,
    pub fuel_abroad: u64,
}

impl Totals {
    fn add(&mut self, day: &FlightDay) {
        self.hours += day.hours as u64;
        self.minutes += day.minutes as u64;
        self.landings += day.landings as u64;
        self.cycles += day.cycles as u64;
        self.fuel_inland += day.fuel_inland as u64;
        self.fuel_abroad += day.fuel_abroad as u64;
    }

    /// Flight time as (hours, minutes) with minutes carried into hours.
    ///
    /// ```
    /// use sheetsmith::generators::fleet::Totals;
    ///
    /// let t = Totals { hours: 3, minutes: 135, ..Totals::default() };
    /// assert_eq!(t.flight_time(), (5, 15));
    /// ```
    pub fn flight_time(&self) -> (u64, u64) {
        (self.hours + self.minutes / 60, self.minutes % 60)
    }

    /// The column sums C..H in sheet order.
    fn columns(&self) -> [u64; 6] {
        [
            self.hours,
            self.minutes,
            self.landings,
            self.cycles,
            self.fuel_inland,
            self.fuel_abroad,
        ]
    }
}

/// A year of daily entries; `None` marks a day without flights.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLog {
    days: Vec<Option<FlightDay>>,
}

impl FlightLog {
    /// A log without any flights.
    pub fn blank() -> Self {
        Self {
            days: vec![None; DAYS_PER_YEAR],
        }
    }

    /// Build a log from exactly 365 entries.
    pub fn from_days(days: Vec<Option<FlightDay>>) -> Result<Self> {
        if days.len() != DAYS_PER_YEAR {
            return Err(Error::InvalidInput(format!(
                "a flight log needs {} days, got {}",
                DAYS_PER_YEAR,
                days.len()
            )));
        }
        Ok(Self { days })
    }

    /// Entry for day `index` of the year (0-based).
    pub fn day(&self, index: usize) -> Option<&FlightDay> {
        self.days.get(index).and_then(Option::as_ref)
    }

    /// Number of days with flights.
    pub fn flight_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    /// Sums over the days in `range`; an out-of-bounds range sums nothing.
    pub(crate) fn totals_for(&self, range: Range<usize>) -> Totals {
        let mut totals = Totals::default();
        for day in self.days.get(range).unwrap_or_default().iter().flatten() {
            totals.add(day);
        }
        totals
    }

    /// Sums over the whole year.
    pub fn totals(&self) -> Totals {
        self.totals_for(0..DAYS_PER_YEAR)
    }

    /// Sums over one month (0-based).
    pub(crate) fn month_totals(&self, month: usize) -> Totals {
        let Some(&(_, days)) = MONTHS.get(month) else {
            return Totals::default();
        };
        let first = first_day_of_month(month);
        self.totals_for(first..first + days)
    }

    /// Sums from January 1st through the last day of `month`.
    pub(crate) fn totals_through_month(&self, month: usize) -> Totals {
        let Some(&(_, days)) = MONTHS.get(month) else {
            return self.totals();
        };
        self.totals_for(0..first_day_of_month(month) + days)
    }
}

fn number(value: u64) -> CellValue {
    CellValue::Number(value as f64)
}

/// `SUM` of a log column over all day rows.
fn year_sum(column: usize) -> String {
    format!(
        "SUM({})",
        local_range(at(column, FIRST_DAY_ROW), at(column, LAST_DAY_ROW))
    )
}

/// `SUM` of a log column from January 1st to `row`.
fn running_sum(column: usize, row: usize) -> String {
    format!(
        "SUM({})",
        local_range(at(column, FIRST_DAY_ROW).absolute_row(), at(column, row))
    )
}

/// Formulas for (airframe HH, airframe MM, engine HH, engine MM) given
/// expressions for the hour and minute sums.
fn lsn_formulas(hours: &str, minutes: &str) -> [String; 4] {
    let c = |col| local(at(col, CARRY_ROW));
    [
        format!(
            "{}+{}+INT(({}+{})/60)",
            c(COL_CELL_HH),
            hours,
            c(COL_CELL_MM),
            minutes
        ),
        format!("MOD({}+{};60)", c(COL_CELL_MM), minutes),
        format!(
            "{}+{}+INT(({}+{})/60)+{}+INT(({}+{})/60)",
            c(COL_TW_HH),
            hours,
            c(COL_TW_MM),
            minutes,
            c(COL_CORR_HH),
            c(COL_TW_MM),
            c(COL_CORR_MM)
        ),
        format!(
            "MOD({}+{}+{};60)",
            c(COL_TW_MM),
            minutes,
            c(COL_CORR_MM)
        ),
    ]
}

fn header_row() -> Row {
    let mut row = Row::new();
    for header in HEADERS {
        if header.is_empty() {
            row.push(Cell::empty());
        } else {
            row.push(Cell::text(header).styled("header"));
        }
    }
    row
}

fn carry_row() -> Row {
    let mut row = Row::new();
    row.push(Cell::text("ÜBERTRAG").styled("vortrag"))
        .push_empty(COL_CELL_HH - 1);
    for _ in COL_CELL_HH..=COL_CORR_MM {
        row.push(Cell::number(0.0).styled("input"));
    }
    row
}

fn sum_row(totals: &Totals) -> Row {
    let mut row = Row::new();
    row.push(Cell::text("SUMME").styled("summe")).push_empty(1);
    for (offset, value) in totals.columns().into_iter().enumerate() {
        row.push(Cell::formula(&year_sum(COL_HOURS + offset), number(value)).styled("calculated"));
    }
    row.push_empty(COL_CELL_HH - COL_FUEL_ABROAD - 1);

    // Carry-over inputs start at zero, so airframe and engine times equal the flight time
    let (hh, mm) = totals.flight_time();
    let formulas = lsn_formulas(&year_sum(COL_HOURS), &year_sum(COL_MINUTES));
    for (formula, value) in formulas.iter().zip([hh, mm, hh, mm]) {
        row.push(Cell::formula(formula, number(value)).styled("calculated"));
    }
    row.push_empty(2);
    row
}

fn day_row(
    month: &str,
    day: usize,
    row_num: usize,
    entry: Option<&FlightDay>,
    running: &Totals,
) -> Row {
    let mut row = Row::new();
    row.push(Cell::text(month)).push(Cell::number(day as f64));

    match entry {
        Some(d) => {
            for value in [d.hours, d.minutes, d.landings, d.cycles, d.fuel_inland, d.fuel_abroad] {
                row.push(Cell::number(value as f64).styled("input"));
            }
        },
        None => {
            row.push(Cell::empty().styled("input").repeated(6));
        },
    }
    row.push(Cell::empty().styled("remarks")).push_empty(2);

    let blank_test = format!("{}=\"\"", local(at(COL_HOURS, row_num)));
    let (hh, mm) = running.flight_time();
    let values = [hh, mm, hh, mm];
    let formulas = lsn_formulas(
        &running_sum(COL_HOURS, row_num),
        &running_sum(COL_MINUTES, row_num),
    );
    for (formula, value) in formulas.iter().zip(values) {
        let cached = if entry.is_some() {
            number(value)
        } else {
            CellValue::Empty
        };
        row.push(
            Cell::formula(&format!("IF({};\"\";{})", blank_test, formula), cached)
                .styled("calculated"),
        );
    }

    row.push(Cell::empty().styled("input").repeated(2));
    row
}

/// Build the log sheet of one aircraft.
pub(crate) fn logbook_sheet(aircraft: &str, log: &FlightLog) -> Sheet {
    let mut sheet = Sheet::new(aircraft);
    sheet
        .push_row(header_row())
        .push_row(carry_row())
        .push_row(sum_row(&log.totals()));

    let mut running = Totals::default();
    let mut index = 0;
    for (month, days) in MONTHS {
        for day in 1..=days {
            let entry = log.day(index);
            if let Some(d) = entry {
                running.add(d);
            }
            let row_num = FIRST_DAY_ROW + index;
            sheet.push_row(day_row(month, day, row_num, entry, &running));
            index += 1;
        }
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula_at(sheet: &Sheet, row: usize, col: usize) -> String {
        sheet.rows[row - 1]
            .cell_at(col)
            .and_then(|c| c.formula.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_blank_log_layout() {
        let sheet = logbook_sheet("3C-OA", &FlightLog::blank());
        assert_eq!(sheet.row_count(), 368);
        for row in &sheet.rows {
            assert_eq!(row.span(), 17);
        }
        assert_eq!(sheet.rows[1].cell_at(0).unwrap().value, CellValue::Text("ÜBERTRAG".into()));
        assert_eq!(sheet.rows[2].cell_at(0).unwrap().value, CellValue::Text("SUMME".into()));
        assert_eq!(sheet.rows[3].cell_at(0).unwrap().value, CellValue::Text("Januar".into()));
        assert_eq!(sheet.rows[367].cell_at(0).unwrap().value, CellValue::Text("Dezember".into()));
        assert_eq!(sheet.rows[367].cell_at(1).unwrap().numeric_value(), Some(31.0));
        // Carry-over inputs L..Q start at zero
        for col in COL_CELL_HH..=COL_CORR_MM {
            assert_eq!(sheet.rows[1].cell_at(col).unwrap().numeric_value(), Some(0.0));
        }
    }

    #[test]
    fn test_sum_row_formulas() {
        let sheet = logbook_sheet("3C-OA", &FlightLog::blank());
        assert_eq!(formula_at(&sheet, 3, 2), "SUM([.C4:.C368])");
        assert_eq!(formula_at(&sheet, 3, 7), "SUM([.H4:.H368])");
        assert_eq!(
            formula_at(&sheet, 3, COL_CELL_HH),
            "[.L2]+SUM([.C4:.C368])+INT(([.M2]+SUM([.D4:.D368]))/60)"
        );
        assert_eq!(formula_at(&sheet, 3, COL_CELL_MM), "MOD([.M2]+SUM([.D4:.D368]);60)");
        assert_eq!(
            formula_at(&sheet, 3, COL_TW_HH),
            "[.N2]+SUM([.C4:.C368])+INT(([.O2]+SUM([.D4:.D368]))/60)+[.P2]+INT(([.O2]+[.Q2])/60)"
        );
        assert_eq!(formula_at(&sheet, 3, COL_TW_MM), "MOD([.O2]+SUM([.D4:.D368])+[.Q2];60)");
    }

    #[test]
    fn test_day_row_formulas() {
        let sheet = logbook_sheet("3C-OA", &FlightLog::blank());
        assert_eq!(
            formula_at(&sheet, 10, COL_CELL_MM),
            r#"IF([.C10]="";"";MOD([.M2]+SUM([.D$4:.D10]);60))"#
        );
        let cell = sheet.rows[9].cell_at(COL_CELL_HH).unwrap();
        assert_eq!(cell.value, CellValue::Empty);
        assert_eq!(cell.style.as_deref(), Some("calculated"));
    }

    #[test]
    fn test_cached_running_times() {
        let mut days = vec![None; DAYS_PER_YEAR];
        days[0] = Some(FlightDay {
            hours: 1,
            minutes: 50,
            landings: 2,
            cycles: 2,
            fuel_inland: 100,
            fuel_abroad: 0,
        });
        days[2] = Some(FlightDay {
            hours: 0,
            minutes: 30,
            landings: 1,
            cycles: 1,
            fuel_inland: 0,
            fuel_abroad: 40,
        });
        let log = FlightLog::from_days(days).unwrap();
        let sheet = logbook_sheet("RES1", &log);

        // Day 1 (row 4): 1:50
        assert_eq!(sheet.rows[3].cell_at(COL_CELL_HH).unwrap().numeric_value(), Some(1.0));
        assert_eq!(sheet.rows[3].cell_at(COL_CELL_MM).unwrap().numeric_value(), Some(50.0));
        // Day 2 has no flight, cached as empty
        assert_eq!(sheet.rows[4].cell_at(COL_CELL_HH).unwrap().value, CellValue::Empty);
        // Day 3 (row 6): 1:50 + 0:30 = 2:20
        assert_eq!(sheet.rows[5].cell_at(COL_TW_HH).unwrap().numeric_value(), Some(2.0));
        assert_eq!(sheet.rows[5].cell_at(COL_TW_MM).unwrap().numeric_value(), Some(20.0));
        // Totals row
        assert_eq!(sheet.rows[2].cell_at(COL_HOURS).unwrap().numeric_value(), Some(1.0));
        assert_eq!(sheet.rows[2].cell_at(COL_MINUTES).unwrap().numeric_value(), Some(80.0));
        assert_eq!(sheet.rows[2].cell_at(COL_FUEL_ABROAD).unwrap().numeric_value(), Some(40.0));
        assert_eq!(sheet.rows[2].cell_at(COL_CELL_HH).unwrap().numeric_value(), Some(2.0));
        // Inputs written as numbers
        assert_eq!(sheet.rows[3].cell_at(4).unwrap().numeric_value(), Some(2.0));
    }

    #[test]
    fn test_log_totals() {
        assert!(FlightLog::from_days(vec![None; 10]).is_err());
        let mut days = vec![None; DAYS_PER_YEAR];
        days[31] = Some(FlightDay {
            hours: 2,
            ..FlightDay::default()
        });
        days[364] = Some(FlightDay {
            hours: 3,
            ..FlightDay::default()
        });
        let log = FlightLog::from_days(days).unwrap();
        assert_eq!(log.month_totals(0).hours, 0);
        assert_eq!(log.month_totals(1).hours, 2);
        assert_eq!(log.totals_through_month(10).hours, 2);
        assert_eq!(log.totals().hours, 5);
        assert_eq!(log.flight_days(), 2);
    }

    #[test]
    fn test_totals_out_of_range() {
        let mut days = vec![None; DAYS_PER_YEAR];
        days[364] = Some(FlightDay {
            hours: 3,
            ..FlightDay::default()
        });
        let log = FlightLog::from_days(days).unwrap();
        assert_eq!(log.month_totals(11).hours, 3);
        assert_eq!(log.month_totals(12), Totals::default());
        assert_eq!(log.totals_through_month(12).hours, 3);
        assert_eq!(log.totals_for(360..400), Totals::default());
        assert_eq!(log.totals_for(364..365).hours, 3);
    }
}
