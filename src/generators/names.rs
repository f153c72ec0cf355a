//! Attendance list as an Excel workbook.

use crate::common::{Metadata, Result};
use crate::xlsx::{CellFont, CellFormat, HorizontalAlignment, VerticalAlignment, Workbook};
use std::path::Path;
use tracing::info;

/// `(last name, first name)` pairs in list order.
pub const NAMES: [(&str, &str); 44] = [
    ("GMOSER", "Michael"),
    ("PRIBASNIG", "Thomas"),
    ("KLEIN", "Rudolf"),
    ("GEIGER", "Christian"),
    ("GIRITZER", "Markus"),
    ("JURIS", "Markus"),
    ("HORACEK", "Michael"),
    ("NOESTLER", "Stefan"),
    ("FUCHS", "Martin"),
    ("ALLRAM", "Lukas"),
    ("ASCHAUER", "Thomas"),
    ("BERLAKOVITS", "Stefan"),
    ("HÖRMANN", "Armin"),
    ("RIEPL", "Alexander"),
    ("MITTERBÖCK", "Lukas"),
    ("ZEHETMAYER", "Fabian"),
    ("KUGLER", "Daniel"),
    ("URBAN", "Patrick"),
    ("NEKOLA", "Maximilian"),
    ("KONSTANDINOV", "Nikola"),
    ("HOHENAUER", "Matthias"),
    ("KAPPL", "Christian"),
    ("WYHLIDAL", "Jürgen"),
    ("HAAS", "Christopher"),
    ("GUTSCHER", "Christiane"),
    ("BEYRER", "Jürgen"),
    ("FORSTNER", "Patrick"),
    ("WEIß", "Michael"),
    ("PUSCHNIGG", "Andreas"),
    ("TAUCHER", "Armin"),
    ("GRUBER", "Richard"),
    ("JANECZEK", "Raphael"),
    ("FLEISCHHACKER", "Stefan"),
    ("KLEMENS", "Florian"),
    ("HOCHÖRTLER", "Emanuel"),
    ("PETER", "Simon"),
    ("STIEG", "Philip"),
    ("KOLLMANN", "Alexander"),
    ("MAIR", "Wolfgang"),
    ("EISNER", "Alfred"),
    ("BAUER", "Christoph"),
    ("HOFMAIER", "Patrick"),
    ("PFEFFER", "Michael"),
    ("CZERMAK", "Andre"),
];

const HEADERS: [&str; 3] = ["Nr.", "Nachname", "Vorname"];
const COLUMN_WIDTHS: [f64; 3] = [8.0, 20.0, 20.0];

/// What was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamesReport {
    /// Number of names listed
    pub count: usize,
    /// File size in bytes
    pub size: usize,
}

/// Assemble the workbook with a single sheet titled `sheet_title`.
pub fn build_workbook(sheet_title: &str) -> Workbook {
    let header = CellFormat::default()
        .font(CellFont {
            bold: true,
            size: 12,
            color: Some("FFFFFF".to_string()),
            ..CellFont::default()
        })
        .solid_fill("4472C4")
        .align(HorizontalAlignment::Center, VerticalAlignment::Center);
    let centered =
        CellFormat::default().align(HorizontalAlignment::Center, VerticalAlignment::Center);

    let mut workbook = Workbook::new();
    workbook.set_metadata(Metadata {
        title: Some(sheet_title.to_string()),
        ..Metadata::default()
    });

    let sheet = workbook.add_worksheet(sheet_title);
    for (col, (title, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        sheet.write_string(0, col as u16, title, Some(&header));
        sheet.set_column_width(col as u16, width);
    }
    for (idx, (last, first)) in NAMES.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, (idx + 1) as f64, Some(&centered));
        sheet.write_string(row, 1, last, None);
        sheet.write_string(row, 2, first, None);
    }
    workbook
}

/// Write the attendance list to `path`.
pub fn generate<P: AsRef<Path>>(sheet_title: &str, path: P) -> Result<NamesReport> {
    let path = path.as_ref();
    let size = build_workbook(sheet_title).save(path)?;
    info!(path = %path.display(), count = NAMES.len(), "attendance list written");
    Ok(NamesReport {
        count: NAMES.len(),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx::CellData;
    use std::io::Read;

    #[test]
    fn test_sheet_content() {
        let workbook = build_workbook("Namensliste");
        let sheet = workbook.worksheet(0).unwrap();
        assert_eq!(sheet.name(), "Namensliste");
        assert_eq!(sheet.row_count(), 45);
        assert_eq!(sheet.cell(0, 1), Some(&CellData::String("Nachname".into())));
        assert_eq!(sheet.cell(1, 0), Some(&CellData::Number(1.0)));
        assert_eq!(sheet.cell(28, 1), Some(&CellData::String("WEIß".into())));
        assert_eq!(sheet.cell(44, 0), Some(&CellData::Number(44.0)));
        assert_eq!(sheet.cell(44, 2), Some(&CellData::String("Andre".into())));
    }

    #[test]
    fn test_generate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Namensliste.xlsx");
        let report = generate("Namensliste", &path).unwrap();
        assert_eq!(report.count, 44);
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, report.size);

        let mut zip = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let mut styles = String::new();
        zip.by_name("xl/styles.xml").unwrap().read_to_string(&mut styles).unwrap();
        assert!(styles.contains("4472C4"));
        assert!(styles.contains(r#"horizontal="center""#));

        let mut sheet = String::new();
        zip.by_name("xl/worksheets/sheet1.xml").unwrap().read_to_string(&mut sheet).unwrap();
        assert!(sheet.contains(r#"width="8""#));
    }
}
