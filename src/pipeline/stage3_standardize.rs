use nalgebra::DMatrix;

use crate::model::stats::{mean, population_std};
use crate::model::table::CleanTable;

#[derive(Debug, thiserror::Error)]
pub enum StandardizeError {
    #[error("cannot standardize an empty table")]
    Empty,
    #[error("table has no numeric columns")]
    NoFeatures,
}

#[derive(Debug, Clone)]
pub struct Standardized {
    /// `n_records x n_features`, rows in `CleanTable::records` order.
    pub matrix: DMatrix<f64>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

pub fn run_stage3(table: &CleanTable) -> Result<Standardized, StandardizeError> {
    let n = table.n_records();
    let p = table.n_features();
    if n == 0 {
        return Err(StandardizeError::Empty);
    }
    if p == 0 {
        return Err(StandardizeError::NoFeatures);
    }

    let mut means = Vec::with_capacity(p);
    let mut scales = Vec::with_capacity(p);
    let mut column = Vec::with_capacity(n);
    for col in 0..p {
        column.clear();
        column.extend(table.records.iter().map(|r| r.values[col]));
        let m = mean(&column);
        let mut s = population_std(&column);
        if s == 0.0 {
            crate::warn!(
                "column '{}' has zero variance; it standardizes to all zeros",
                table.features[col]
            );
            s = 1.0;
        }
        means.push(m);
        scales.push(s);
    }

    let matrix = DMatrix::from_fn(n, p, |row, col| {
        (table.records[row].values[col] - means[col]) / scales[col]
    });

    Ok(Standardized {
        matrix,
        mean: means,
        scale: scales,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_standardize.rs"]
mod tests;
