use crate::config::ColumnNames;
use crate::model::schema::Schema;

const MISSING_TOKENS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "#n/a", "<na>",
];

pub fn is_missing_token(cell: &str) -> bool {
    let trimmed = cell.trim();
    MISSING_TOKENS
        .iter()
        .any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// `None` for missing tokens and for anything that does not parse as a number.
/// Infinities parse; the loader rejects them.
pub fn parse_cell(cell: &str) -> Option<f64> {
    if is_missing_token(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok()
}

/// Every non-identifier column whose non-missing cells all parse as numbers is numeric.
/// A column with no values at all is numeric too (it stays undefined until imputation).
pub fn resolve_schema(header: &[String], rows: &[Vec<String>], columns: &ColumnNames) -> Schema {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();
    for (idx, name) in header.iter().enumerate() {
        if *name == columns.group || *name == columns.student {
            continue;
        }
        let is_numeric = rows.iter().all(|row| {
            let cell = &row[idx];
            is_missing_token(cell) || parse_cell(cell).is_some()
        });
        if is_numeric {
            numeric.push(name.clone());
        } else {
            categorical.push(name.clone());
        }
    }
    Schema {
        group_column: columns.group.clone(),
        student_column: columns.student.clone(),
        numeric,
        categorical,
    }
}

/// For each reference column, its position in `other`. `None` when the column sets differ.
pub fn align_columns(reference: &[String], other: &[String]) -> Option<Vec<usize>> {
    if reference.len() != other.len() {
        return None;
    }
    let mut out = Vec::with_capacity(reference.len());
    for name in reference {
        out.push(other.iter().position(|o| o == name)?);
    }
    Some(out)
}
