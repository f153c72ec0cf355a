//! Java snippet rendering.

use super::{DAZ_LOWER_STEP, DAZ_UPPER_STEP, SalaryData, Section};

/// Comment line and variable name of each section's map.
fn section_labels(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::M1 => ("// M1 - Berufsoffiziere", "m1Salaries"),
        Section::M2 => ("// M2 - Berufsunteroffiziere", "m2Salaries"),
        Section::M3 => ("// M3 - Chargen", "m3Salaries"),
        Section::Mbo1 => ("// MBO 1 - Offiziere (6 Funktionsgruppen, je 4 Stufen)", "mbo1"),
        Section::Mbo2 => ("// MBO 2 - Offiziere (9 Funktionsgruppen, je 4 Stufen)", "mbo2"),
        Section::Muo1 => ("// MUO 1 - Unteroffiziere (7 Funktionsgruppen, je 4 Stufen)", "muo1"),
    }
}

fn basic_block(code: &mut Vec<String>, data: &SalaryData, section: Section) {
    let Some(steps) = data.basic(section).filter(|s| !s.is_empty()) else {
        return;
    };
    let (comment, var) = section_labels(section);
    code.push(comment.to_string());
    code.push(format!("Map<Integer, Double> {} = new HashMap<>();", var));
    for (&step, amount) in steps {
        let note = match step {
            DAZ_LOWER_STEP => " // daz",
            DAZ_UPPER_STEP => " // DAZ",
            _ => "",
        };
        code.push(format!("{}.put({}, {:.2});{}", var, step, amount, note));
    }
    code.push(format!("salaryData.put(\"{}\", {});", section, var));
    code.push(String::new());
}

fn allowance_block(code: &mut Vec<String>, data: &SalaryData, section: Section) {
    let Some(groups) = data.allowances(section).filter(|g| !g.is_empty()) else {
        return;
    };
    let (comment, var) = section_labels(section);
    code.push(comment.to_string());
    code.push(format!("Map<Integer, Map<Integer, Double>> {} = new HashMap<>();", var));
    for (group, steps) in groups {
        let group_var = format!("{}_fg{}", var, group);
        code.push(format!("Map<Integer, Double> {} = new HashMap<>();", group_var));
        for (step, amount) in steps {
            code.push(format!("{}.put({}, {:.2});", group_var, step, amount));
        }
        code.push(format!("{}.put({}, {});", var, group, group_var));
    }
    code.push(format!("functionAllowanceData.put(\"{}\", {});", section, var));
    code.push(String::new());
}

/// Render the salary and allowance maps as Java statements.
///
/// Empty sections are left out; keys are emitted in ascending order and
/// amounts with two decimals.
///
/// ```
/// use sheetsmith::salary::{generate_salary_code, parse_template};
///
/// let code = generate_salary_code(&parse_template("[M3]\n1=1800\n"));
/// assert!(code.contains("m3Salaries.put(1, 1800.00);"));
/// ```
pub fn generate_salary_code(data: &SalaryData) -> String {
    let mut code = vec![
        "// ===== GRUNDGEHÄLTER (Generated from template) =====".to_string(),
        String::new(),
    ];
    for section in Section::ALL.into_iter().filter(|s| s.is_basic()) {
        basic_block(&mut code, data, section);
    }

    code.push("// ===== FUNKTIONSZULAGEN (Generated from template) =====".to_string());
    code.push(String::new());
    for section in Section::ALL.into_iter().filter(|s| !s.is_basic()) {
        allowance_block(&mut code, data, section);
    }

    code.join("\n")
}

/// Summary lines: entries per salary section and groups per allowance section.
pub fn statistics_lines(data: &SalaryData) -> Vec<String> {
    let mut lines = vec![String::new(), "// ===== STATISTIK =====".to_string()];
    for section in Section::ALL {
        let label = if section.is_basic() {
            "Einträge"
        } else {
            "Funktionsgruppen"
        };
        lines.push(format!("// {} {}: {}", section, label, data.count(section)));
    }
    lines
}
