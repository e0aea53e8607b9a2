use std::path::{Path, PathBuf};

use crate::input::InputError;

#[derive(Debug, Clone)]
pub struct RawTable {
    pub path: PathBuf,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses a headered CSV file. Ragged rows fail the whole file.
pub fn read_csv_table(path: &Path) -> Result<RawTable, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.iter().all(|h| h.is_empty()) {
        return Err(InputError::MissingInput(format!(
            "{} has an empty header",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable {
        path: path.to_path_buf(),
        header,
        rows,
    })
}
