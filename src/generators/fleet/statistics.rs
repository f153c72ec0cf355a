//! `STATISTIK`: monthly and yearly aggregation of the log sheets.

use super::logbook::{
    COL_CORR_HH, COL_CORR_MM, COL_HOURS, COL_MINUTES, COL_MONTH, COL_TW_HH, COL_TW_MM, CARRY_ROW,
    FlightLog, SUM_ROW, Totals,
};
use super::{FIRST_DAY_ROW, LAST_DAY_ROW, MONTHS, at, month_rows};
use crate::odf::coordinates::{local_range, sheet_cell, sheet_range};
use crate::odf::{Cell, CellValue, Row, Sheet};

/// Rows per aircraft block, including the trailing spacer.
pub(crate) const BLOCK_ROWS: usize = 8;

const FLIGHT_HH: &str = "Flugzeit HH";
const FLIGHT_MM: &str = "Flugzeit MM";
/// Plain column sums: parameter, log column (E..H) and the matching total.
const COUNTERS: [(&str, usize, fn(&Totals) -> u64); 4] = [
    ("Landungen", 4, landings),
    ("Cycles", 5, cycles),
    ("Fuel-INL", 6, fuel_inland),
    ("Fuel-AUSL", 7, fuel_abroad),
];

fn landings(t: &Totals) -> u64 {
    t.landings
}

fn cycles(t: &Totals) -> u64 {
    t.cycles
}

fn fuel_inland(t: &Totals) -> u64 {
    t.fuel_inland
}

fn fuel_abroad(t: &Totals) -> u64 {
    t.fuel_abroad
}

/// Formula builders for one log sheet.
struct LogRefs<'a> {
    sheet: &'a str,
}

impl LogRefs<'_> {
    fn column(&self, column: usize, last_row: usize) -> String {
        sheet_range(self.sheet, at(column, FIRST_DAY_ROW), at(column, last_row))
    }

    fn cell(&self, column: usize, row: usize) -> String {
        sheet_cell(self.sheet, at(column, row))
    }

    /// Sum of a log column over the days of `month`, or the whole year.
    fn sum(&self, column: usize, month: Option<usize>) -> String {
        match month {
            Some(m) => format!(
                "SUMIF({};\"{}\";{})",
                self.column(COL_MONTH, LAST_DAY_ROW),
                MONTHS[m].0,
                self.column(column, LAST_DAY_ROW)
            ),
            None => format!("SUM({})", self.column(column, LAST_DAY_ROW)),
        }
    }

    fn hours(&self, month: Option<usize>) -> String {
        format!(
            "{}+INT({}/60)",
            self.sum(COL_HOURS, month),
            self.sum(COL_MINUTES, month)
        )
    }

    fn minutes(&self, month: Option<usize>) -> String {
        format!("MOD({};60)", self.sum(COL_MINUTES, month))
    }

    /// Engine hours at the end of `month`.
    fn engine_hours(&self, month: usize) -> String {
        let last = *month_rows(month).end();
        format!(
            "{}+SUM({})+INT(({}+SUM({}))/60)+{}+INT(({}+{})/60)",
            self.cell(COL_TW_HH, CARRY_ROW),
            self.column(COL_HOURS, last),
            self.cell(COL_TW_MM, CARRY_ROW),
            self.column(COL_MINUTES, last),
            self.cell(COL_CORR_HH, CARRY_ROW),
            self.cell(COL_TW_MM, CARRY_ROW),
            self.cell(COL_CORR_MM, CARRY_ROW)
        )
    }
}

fn number(value: u64) -> CellValue {
    CellValue::Number(value as f64)
}

fn header_row() -> Row {
    let mut row = Row::new();
    row.push(Cell::text("Kennzeichen").styled("header"))
        .push(Cell::text("Parameter").styled("header"));
    for (month, _) in MONTHS {
        row.push(Cell::text(month).styled("header"));
    }
    row.push(Cell::text("JAHR").styled("header"));
    row
}

/// A block row: label cells, twelve month cells and the year cell.
fn block_row(
    aircraft: Option<&str>,
    parameter: &str,
    formula: impl Fn(Option<usize>) -> String,
    value: impl Fn(&Totals) -> u64,
    log: &FlightLog,
) -> Row {
    let mut row = Row::new();
    match aircraft {
        Some(name) => row.push(Cell::text(name)),
        None => row.push(Cell::empty()),
    };
    row.push(Cell::text(parameter));
    for m in 0..MONTHS.len() {
        row.push(Cell::formula(&formula(Some(m)), number(value(&log.month_totals(m)))));
    }
    row.push(Cell::formula(&formula(None), number(value(&log.totals()))));
    row
}

fn aircraft_block(sheet: &mut Sheet, aircraft: &str, log: &FlightLog) {
    let refs = LogRefs { sheet: aircraft };

    sheet.push_row(block_row(
        Some(aircraft),
        FLIGHT_HH,
        |m| refs.hours(m),
        |t| t.flight_time().0,
        log,
    ));
    sheet.push_row(block_row(
        None,
        FLIGHT_MM,
        |m| refs.minutes(m),
        |t| t.flight_time().1,
        log,
    ));
    for (parameter, column, total) in COUNTERS {
        sheet.push_row(block_row(None, parameter, |m| refs.sum(column, m), total, log));
    }

    let mut engine = Row::new();
    engine.push(Cell::empty()).push(Cell::text("TW-LSN Monatsende"));
    for m in 0..MONTHS.len() {
        let (hours, _) = log.totals_through_month(m).flight_time();
        engine.push(Cell::formula(&refs.engine_hours(m), number(hours)));
    }
    engine.push(Cell::formula(
        &refs.cell(COL_TW_HH, SUM_ROW),
        number(log.totals().flight_time().0),
    ));
    sheet.push_row(engine);

    sheet.push_row(Row::spacer());
}

fn period_totals(log: &FlightLog, month: Option<usize>) -> Totals {
    match month {
        Some(m) => log.month_totals(m),
        None => log.totals(),
    }
}

/// Fleet total of the flight hours: hours plus carried minutes of all blocks.
fn fleet_row(block_end: usize, logs: &[FlightLog]) -> Row {
    let mut row = Row::new();
    row.push(Cell::text("FLOTTE GESAMT").styled("summe"))
        .push(Cell::text(FLIGHT_HH).styled("summe"));

    let labels = local_range(at(1, 2), at(1, block_end));
    let months = (0..MONTHS.len()).map(Some).chain([None]);
    for (offset, month) in months.enumerate() {
        let col = 2 + offset;
        let values = local_range(at(col, 2), at(col, block_end));
        let formula = format!(
            "SUMIF({labels};\"{FLIGHT_HH}\";{values})+INT(SUMIF({labels};\"{FLIGHT_MM}\";{values})/60)"
        );
        let (hours, minutes) = logs.iter().fold((0, 0), |(h, mm), log| {
            let (lh, lm) = period_totals(log, month).flight_time();
            (h + lh, mm + lm)
        });
        row.push(Cell::formula(&formula, number(hours + minutes / 60)).styled("summe"));
    }
    row
}

/// Build the statistics sheet for the fleet.
pub(crate) fn statistics_sheet(aircraft: &[String], logs: &[FlightLog]) -> Sheet {
    let mut sheet = Sheet::new("STATISTIK");
    sheet.push_row(header_row());
    for (name, log) in aircraft.iter().zip(logs) {
        aircraft_block(&mut sheet, name, log);
    }
    let block_end = 1 + aircraft.len() * BLOCK_ROWS;
    sheet.push_row(fleet_row(block_end, logs));
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::fleet::FlightDay;
    use crate::generators::fleet::DAYS_PER_YEAR;

    fn fleet(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shape() {
        let names = fleet(&crate::config::DEFAULT_AIRCRAFT);
        let logs = vec![FlightLog::blank(); names.len()];
        let sheet = statistics_sheet(&names, &logs);
        assert_eq!(sheet.row_count(), 98);
        assert_eq!(sheet.column_count(), 15);
        let text = |row: usize, col: usize| sheet.rows[row].cell_at(col).unwrap().value.clone();
        assert_eq!(text(1, 0), CellValue::Text("3C-OA".into()));
        assert_eq!(text(7, 1), CellValue::Text("TW-LSN Monatsende".into()));
        assert_eq!(text(97, 0), CellValue::Text("FLOTTE GESAMT".into()));
    }

    #[test]
    fn test_formulas() {
        let names = fleet(&["3C-OA"]);
        let sheet = statistics_sheet(&names, &[FlightLog::blank()]);
        let formula = |row: usize, col: usize| {
            sheet.rows[row]
                .cell_at(col)
                .unwrap()
                .formula
                .clone()
                .unwrap()
        };

        assert_eq!(
            formula(3, 2),
            "SUMIF([$'3C-OA'.A4:.A368];\"Januar\";[$'3C-OA'.E4:.E368])"
        );
        assert_eq!(formula(2, 14), "MOD(SUM([$'3C-OA'.D4:.D368]);60)");
        assert!(formula(7, 2).contains("SUM([$'3C-OA'.C4:.C34])"));
        assert_eq!(formula(7, 14), "[$'3C-OA'.N3]");
        assert_eq!(
            formula(9, 2),
            "SUMIF([.B2:.B9];\"Flugzeit HH\";[.C2:.C9])+INT(SUMIF([.B2:.B9];\"Flugzeit MM\";[.C2:.C9])/60)"
        );
    }

    #[test]
    fn test_cached_values() {
        let mut days = vec![None; DAYS_PER_YEAR];
        days[0] = Some(FlightDay {
            hours: 1,
            minutes: 40,
            landings: 3,
            ..FlightDay::default()
        });
        days[40] = Some(FlightDay {
            hours: 2,
            minutes: 40,
            landings: 1,
            ..FlightDay::default()
        });
        let log = FlightLog::from_days(days).unwrap();
        let names = fleet(&["A", "B"]);
        let sheet = statistics_sheet(&names, &[log.clone(), log]);
        let value = |row: usize, col: usize| {
            sheet.rows[row]
                .cell_at(col)
                .unwrap()
                .numeric_value()
                .unwrap()
        };

        // January and February hours of the first aircraft
        assert_eq!(value(1, 2), 1.0);
        assert_eq!(value(1, 3), 2.0);
        // Year: 3h 80min = 4h 20min
        assert_eq!(value(1, 14), 4.0);
        assert_eq!(value(2, 14), 20.0);
        assert_eq!(value(3, 14), 4.0);
        // Engine hours at the end of February
        assert_eq!(value(7, 3), 4.0);
        // Fleet: 2 x (4h 20min) = 8h 40min
        assert_eq!(value(17, 14), 8.0);
        // Fleet January: 2 x 1h 40min = 3h 20min
        assert_eq!(value(17, 2), 3.0);
    }
}
