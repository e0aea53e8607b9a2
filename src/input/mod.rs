use std::path::{Path, PathBuf};

pub mod csv_table;
pub mod schema;

use crate::config::ColumnNames;
use crate::model::table::{CombinedTable, RawRecord};
use csv_table::{RawTable, read_csv_table};
use schema::{align_columns, resolve_schema};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("no .{extension} files found in {dir}")]
    NoInputFiles { dir: String, extension: String },
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: String, column: String },
    #[error("{path}: columns do not match {reference}")]
    SchemaMismatch { path: String, reference: String },
    #[error("{path}: non-finite value '{value}' in column '{column}'")]
    NonFiniteValue {
        path: String,
        column: String,
        value: String,
    },
}

/// Regular files in `dir` with the given extension (case-insensitive), sorted by path.
pub fn discover_csv_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "input directory {} does not exist",
            dir.display()
        )));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(InputError::NoInputFiles {
            dir: dir.display().to_string(),
            extension: extension.to_string(),
        });
    }
    Ok(files)
}

/// Reads every file and concatenates the rows in file order.
pub fn load_tables(files: &[PathBuf], columns: &ColumnNames) -> Result<CombinedTable, InputError> {
    let mut tables: Vec<RawTable> = Vec::with_capacity(files.len());
    for path in files {
        let table = read_csv_table(path)?;
        crate::info!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            table.rows.len(),
            table.header.len()
        );
        tables.push(table);
    }

    let first = tables
        .first()
        .ok_or_else(|| InputError::MissingInput("no tables to concatenate".to_string()))?;
    let header = first.header.clone();
    let reference = first.path.display().to_string();
    let group_idx = require_column(&header, &columns.group, &reference)?;
    let student_idx = require_column(&header, &columns.student, &reference)?;

    let mut paths: Vec<String> = Vec::with_capacity(tables.len());
    let mut origins: Vec<usize> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for table in tables {
        let path = table.path.display().to_string();
        let aligned = align_columns(&header, &table.header).ok_or_else(|| {
            InputError::SchemaMismatch {
                path: path.clone(),
                reference: reference.clone(),
            }
        })?;
        for row in table.rows {
            rows.push(aligned.iter().map(|&idx| row[idx].clone()).collect());
            origins.push(paths.len());
        }
        paths.push(path);
    }

    let schema = resolve_schema(&header, &rows, columns);
    crate::info!(
        "schema: group={}, student={}, numeric=[{}], categorical=[{}]",
        schema.group_column,
        schema.student_column,
        schema.numeric.join(", "),
        schema.categorical.join(", ")
    );

    // resolve_schema keeps header order, so this lines up with schema.numeric.
    let numeric_idx: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, name)| schema.numeric.contains(*name))
        .map(|(idx, _)| idx)
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for (row, &origin) in rows.iter().zip(&origins) {
        let mut values = Vec::with_capacity(numeric_idx.len());
        for &idx in &numeric_idx {
            let value = schema::parse_cell(&row[idx]);
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(InputError::NonFiniteValue {
                    path: paths[origin].clone(),
                    column: header[idx].clone(),
                    value: row[idx].clone(),
                });
            }
            values.push(value);
        }
        records.push(RawRecord {
            group: row[group_idx].clone(),
            student: row[student_idx].clone(),
            values,
        });
    }

    Ok(CombinedTable { schema, records })
}

fn require_column(header: &[String], name: &str, path: &str) -> Result<usize, InputError> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_string(),
            column: name.to_string(),
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
