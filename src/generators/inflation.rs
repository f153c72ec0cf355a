//! Inflation calculator spreadsheet.
//!
//! Four sheets: `Rechner` (inputs and adjusted amounts), `Inflationsraten`
//! (yearly rates 2011-2025), `Varianten` (projected rates per pay group for
//! 2026-2030) and `Berechnungen` (the compound factors). The factors are
//! live formulas; the cached values written next to them are computed here.

use crate::common::{Error, Metadata, Result};
use crate::odf::coordinates::{CellCoord, local, sheet_cell};
use crate::odf::{Cell, CellStyle, CellValue, NumberStyle, Row, Sheet, SpreadsheetBuilder};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

/// Published yearly inflation rates in percent.
pub const RATES: [(u16, f64); 15] = [
    (2011, 2.60),
    (2012, 4.91),
    (2013, 4.00),
    (2014, 3.50),
    (2015, 2.00),
    (2016, 17.75),
    (2017, 1.60),
    (2018, 2.80),
    (2019, 4.15),
    (2020, 2.82),
    (2021, 2.25),
    (2022, 3.80),
    (2023, 9.69),
    (2024, 9.72),
    (2025, 4.31),
];

/// Projected rates per year: (year, SR+UR, HR+GF+WD).
pub const VARIANTS: [(u16, f64, f64); 5] = [
    (2026, 3.07, 3.90),
    (2027, 0.00, 0.00),
    (2028, 0.00, 0.00),
    (2029, 0.00, 0.00),
    (2030, 0.00, 0.00),
];

/// Last year with a published rate.
pub const LAST_RATE_YEAR: u16 = 2025;
/// Accepted base years.
pub const BASE_YEARS: RangeInclusive<u16> = 2010..=2025;
/// Accepted target years.
pub const TARGET_YEARS: RangeInclusive<u16> = 2026..=2030;

const RECHNER: &str = "Rechner";
const RATES_SHEET: &str = "Inflationsraten";
const VARIANTS_SHEET: &str = "Varianten";
const CALC_SHEET: &str = "Berechnungen";

/// Pay groups with their own projected rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayGroup {
    /// Groups 1, 2, 3 and 6
    SrUr,
    /// Groups 4 and 5
    HrGfWd,
}

impl PayGroup {
    pub const ALL: [PayGroup; 2] = [PayGroup::SrUr, PayGroup::HrGfWd];

    pub fn label(self) -> &'static str {
        match self {
            PayGroup::SrUr => "SR+UR",
            PayGroup::HrGfWd => "HR+GF+WD",
        }
    }

    fn result_label(self) -> &'static str {
        match self {
            PayGroup::SrUr => "SR+UR (LGrp 1,2,3,6):",
            PayGroup::HrGfWd => "HR+GF+WD (LGrp 4,5):",
        }
    }

    /// Column of this group on the variants and calculation sheets.
    fn column(self) -> usize {
        match self {
            PayGroup::SrUr => 1,
            PayGroup::HrGfWd => 2,
        }
    }

    fn variant_rate(self, entry: &(u16, f64, f64)) -> f64 {
        match self {
            PayGroup::SrUr => entry.1,
            PayGroup::HrGfWd => entry.2,
        }
    }
}

/// Inputs of the calculator sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct InflationOptions {
    pub base_year: u16,
    pub base_amount: f64,
    pub target_year: u16,
}

impl Default for InflationOptions {
    fn default() -> Self {
        Self {
            base_year: 2014,
            base_amount: 400.0,
            target_year: 2026,
        }
    }
}

impl InflationOptions {
    fn validate(&self) -> Result<()> {
        if !BASE_YEARS.contains(&self.base_year) {
            return Err(Error::InvalidInput(format!(
                "base year {} outside {}..={}",
                self.base_year,
                BASE_YEARS.start(),
                BASE_YEARS.end()
            )));
        }
        if !TARGET_YEARS.contains(&self.target_year) {
            return Err(Error::InvalidInput(format!(
                "target year {} outside {}..={}",
                self.target_year,
                TARGET_YEARS.start(),
                TARGET_YEARS.end()
            )));
        }
        if !self.base_amount.is_finite() {
            return Err(Error::InvalidInput("base amount must be finite".to_string()));
        }
        Ok(())
    }
}

/// Compound factor from `base_year` to `target_year` for a pay group.
///
/// Published rates apply to the years after the base year up to 2025, the
/// group's projected rates to 2026 through the target year.
///
/// ```
/// use sheetsmith::generators::inflation::{PayGroup, factor};
///
/// let f = factor(2024, 2026, PayGroup::SrUr).unwrap();
/// assert!((f - 1.0431 * 1.0307).abs() < 1e-12);
/// ```
pub fn factor(base_year: u16, target_year: u16, group: PayGroup) -> Result<f64> {
    InflationOptions {
        base_year,
        base_amount: 0.0,
        target_year,
    }
    .validate()?;

    let published: f64 = RATES
        .iter()
        .filter(|(year, _)| *year > base_year)
        .map(|(_, rate)| 1.0 + rate / 100.0)
        .product();
    let projected: f64 = VARIANTS
        .iter()
        .filter(|entry| entry.0 <= target_year)
        .map(|entry| 1.0 + group.variant_rate(entry) / 100.0)
        .product();
    Ok(published * projected)
}

/// OpenFormula for the factor of `group`, reading the years from `Rechner`.
fn factor_formula(group: PayGroup) -> String {
    let base = sheet_cell(RECHNER, CellCoord::new(1, 2).absolute());
    let target = sheet_cell(RECHNER, CellCoord::new(1, 4).absolute());
    let rates_origin = sheet_cell(RATES_SHEET, CellCoord::new(1, 0).absolute());
    let variants_origin = sheet_cell(VARIANTS_SHEET, CellCoord::new(group.column(), 0).absolute());
    let first_offset = RATES[0].0 - 2;
    format!(
        "IF({b}>={last};1;EXP(SUMPRODUCT(LN(1+OFFSET({rates};{b}-{first};0;{last}-{b};1)/100))))\
         *EXP(SUMPRODUCT(LN(1+OFFSET({variants};1;0;{t}-{last};1)/100)))",
        b = base,
        t = target,
        last = LAST_RATE_YEAR,
        first = first_offset,
        rates = rates_origin,
        variants = variants_origin,
    )
}

fn styles(builder: &mut SpreadsheetBuilder) {
    builder
        .add_number_style(NumberStyle::new("N0", 2))
        .add_style(
            CellStyle::new("ce1")
                .with_default_parent()
                .bold()
                .font_size("14pt"),
        )
        .add_style(
            CellStyle::new("ce2")
                .with_default_parent()
                .background("#667eea")
                .color("#ffffff")
                .bold(),
        )
        .add_style(CellStyle::new("ce3").with_default_parent().background("#e8eaf6"))
        .add_style(
            CellStyle::new("ce4")
                .with_default_parent()
                .data_style("N0")
                .background("#f5f5f5"),
        );
}

fn rechner_sheet(opts: &InflationOptions, factors: &[(PayGroup, f64)]) -> Sheet {
    let mut sheet = Sheet::new(RECHNER);
    sheet
        .push_row(Row::from_cells(vec![
            Cell::text("💶 INFLATIONSRECHNER").styled("ce2"),
            Cell::empty(),
        ]))
        .push_row(Row::spacer())
        .push_row(Row::from_cells(vec![
            Cell::text("Basisjahr:").styled("ce1"),
            Cell::number(opts.base_year as f64).styled("ce3"),
        ]))
        .push_row(Row::from_cells(vec![
            Cell::text("Basisbetrag (€):").styled("ce1"),
            Cell::number(opts.base_amount).styled("ce3"),
        ]))
        .push_row(Row::from_cells(vec![
            Cell::text("Zieljahr:").styled("ce1"),
            Cell::number(opts.target_year as f64).styled("ce3"),
        ]))
        .push_row(Row::spacer())
        .push_row(Row::from_cells(vec![
            Cell::formula(
                &format!(r#""ANGEPASSTE BETRÄGE FÜR "&{}"#, local(CellCoord::new(1, 4))),
                CellValue::Text(format!("ANGEPASSTE BETRÄGE FÜR {}", opts.target_year)),
            )
            .styled("ce2"),
            Cell::empty(),
        ]))
        .push_row(Row::spacer());

    let amount = local(CellCoord::new(1, 3));
    for &(group, factor) in factors {
        let factor_ref = sheet_cell(CALC_SHEET, CellCoord::new(group.column(), 1));
        sheet.push_row(Row::from_cells(vec![
            Cell::text(group.result_label()).styled("ce1"),
            Cell::formula(
                &format!("{}*{}", amount, factor_ref),
                CellValue::Number(opts.base_amount * factor),
            )
            .styled("ce4"),
        ]));
    }
    sheet
}

fn rates_sheet() -> Sheet {
    let mut sheet = Sheet::new(RATES_SHEET);
    sheet.push_row(Row::from_cells(vec![
        Cell::text("Jahr").styled("ce2"),
        Cell::text("Rate (%)").styled("ce2"),
    ]));
    for &(year, rate) in &RATES {
        sheet.push_row(Row::from_cells(vec![Cell::number(year as f64), Cell::number(rate)]));
    }
    sheet
}

fn variants_sheet() -> Sheet {
    let mut sheet = Sheet::new(VARIANTS_SHEET);
    sheet.push_row(Row::from_cells(vec![
        Cell::text("Jahr").styled("ce2"),
        Cell::text("SR+UR (%)").styled("ce2"),
        Cell::text("HR+GF+WD (%)").styled("ce2"),
    ]));
    for &(year, sr_ur, hr_gf_wd) in &VARIANTS {
        sheet.push_row(Row::from_cells(vec![
            Cell::number(year as f64),
            Cell::number(sr_ur),
            Cell::number(hr_gf_wd),
        ]));
    }
    sheet
}

fn calculation_sheet(opts: &InflationOptions, factors: &[(PayGroup, f64)]) -> Sheet {
    let mut sheet = Sheet::new(CALC_SHEET);
    let mut header = Row::new();
    header.push(Cell::text("Beschreibung").styled("ce2"));
    let mut values = Row::new();
    values.push(Cell::text(&format!(
        "Multiplikationsfaktor für Basisjahr → {}",
        opts.target_year
    )));
    for &(group, factor) in factors {
        header.push(Cell::text(&format!("Faktor {}", group.label())).styled("ce2"));
        values.push(Cell::formula(&factor_formula(group), CellValue::Number(factor)));
    }
    sheet.push_row(header).push_row(values);
    sheet
}

/// Assemble the calculator workbook.
pub fn build_workbook(opts: &InflationOptions) -> Result<SpreadsheetBuilder> {
    opts.validate()?;

    let factors = PayGroup::ALL
        .iter()
        .map(|&group| Ok((group, factor(opts.base_year, opts.target_year, group)?)))
        .collect::<Result<Vec<_>>>()?;
    for (group, f) in &factors {
        debug!(group = group.label(), factor = *f, "computed factor");
    }

    let mut builder = SpreadsheetBuilder::new();
    let metadata = Metadata {
        title: Some("Inflationsrechner".to_string()),
        ..Metadata::default()
    };
    builder.set_metadata(metadata.with_description("Berechnung inflationsangepasster Beträge"));
    styles(&mut builder);
    builder
        .add_sheet(rechner_sheet(opts, &factors))
        .add_sheet(rates_sheet())
        .add_sheet(variants_sheet())
        .add_sheet(calculation_sheet(opts, &factors));
    Ok(builder)
}

/// Write the calculator to `path` and return the file size.
pub fn generate<P: AsRef<Path>>(opts: &InflationOptions, path: P) -> Result<usize> {
    let path = path.as_ref();
    let size = build_workbook(opts)?.save(path)?;
    info!(path = %path.display(), size, "inflation calculator written");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_factor_from_2025() {
        assert!(approx(factor(2025, 2026, PayGroup::SrUr).unwrap(), 1.0307));
        assert!(approx(factor(2025, 2026, PayGroup::HrGfWd).unwrap(), 1.039));
        // Later projected years are 0 %
        assert!(approx(factor(2025, 2030, PayGroup::HrGfWd).unwrap(), 1.039));
    }

    #[test]
    fn test_factor_full_range() {
        let expected: f64 = RATES.iter().map(|(_, r)| 1.0 + r / 100.0).product::<f64>() * 1.0307;
        assert!(approx(factor(2010, 2026, PayGroup::SrUr).unwrap(), expected));
        // 2014 skips the 2011-2014 rates
        let expected: f64 =
            RATES[4..].iter().map(|(_, r)| 1.0 + r / 100.0).product::<f64>() * 1.039;
        assert!(approx(factor(2014, 2027, PayGroup::HrGfWd).unwrap(), expected));
    }

    #[test]
    fn test_year_ranges() {
        assert!(factor(2009, 2026, PayGroup::SrUr).is_err());
        assert!(factor(2026, 2026, PayGroup::SrUr).is_err());
        assert!(factor(2014, 2031, PayGroup::SrUr).is_err());
        assert!(build_workbook(&InflationOptions {
            base_amount: f64::NAN,
            ..InflationOptions::default()
        })
        .is_err());
    }

    #[test]
    fn test_factor_formula() {
        assert_eq!(
            factor_formula(PayGroup::SrUr),
            "IF([$'Rechner'.$B$3]>=2025;1;EXP(SUMPRODUCT(LN(1+OFFSET([$'Inflationsraten'.$B$1];[$'Rechner'.$B$3]-2009;0;2025-[$'Rechner'.$B$3];1)/100))))\
             *EXP(SUMPRODUCT(LN(1+OFFSET([$'Varianten'.$B$1];1;0;[$'Rechner'.$B$5]-2025;1)/100)))"
        );
        assert!(factor_formula(PayGroup::HrGfWd).contains("[$'Varianten'.$C$1]"));
    }

    #[test]
    fn test_workbook_layout() {
        let builder = build_workbook(&InflationOptions::default()).unwrap();
        let sheets = builder.sheets();
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, [RECHNER, RATES_SHEET, VARIANTS_SHEET, CALC_SHEET]);
        assert_eq!(sheets[1].row_count(), 16);
        assert_eq!(sheets[2].row_count(), 6);
        assert_eq!(sheets[3].column_count(), 3);

        // Cached amount on the calculator sheet matches the computed factor
        let amount = sheets[0].rows[8].cells[1].numeric_value().unwrap();
        let f = factor(2014, 2026, PayGroup::SrUr).unwrap();
        assert!(approx(amount, 400.0 * f));
    }

    #[test]
    fn test_generate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Inflationsrechner.ods");
        let size = generate(&InflationOptions::default(), &path).unwrap();
        assert!(size > 0);

        let mut zip = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut zip.by_name("content.xml").unwrap(), &mut content)
            .unwrap();
        assert!(content.contains(r#"table:formula="of:=[.B4]*[$&apos;Berechnungen&apos;.B2]""#));
        assert!(content.contains("<text:p>17.75</text:p>"));
    }
}
