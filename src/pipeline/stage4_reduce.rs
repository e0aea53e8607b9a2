use std::cmp::Ordering;

use nalgebra::{DMatrix, SymmetricEigen};

use crate::model::stats::cumulative_sum;

const MAX_EIGEN_ITERATIONS: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("PCA needs at least 2 records, got {0}")]
    TooFewRecords(usize),
    #[error("PCA needs at least one feature column")]
    NoFeatures,
    #[error("requested {requested} components but at most {available} are available")]
    RankTooLarge { requested: usize, available: usize },
    #[error("requested zero components")]
    ZeroRank,
    #[error("input matrix contains non-finite values")]
    NonFinite,
    #[error("eigendecomposition did not converge")]
    NoConvergence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Full,
    Fixed(usize),
}

#[derive(Debug, Clone)]
pub struct PcaResult {
    /// `k x n_features`, one unit-length component per row.
    pub components: Vec<Vec<f64>>,
    pub eigenvalues: Vec<f64>,
    /// Fraction of the total variance of the full decomposition.
    pub explained_variance_ratio: Vec<f64>,
    /// `n_records x k` projected coordinates.
    pub scores: DMatrix<f64>,
}

impl PcaResult {
    pub fn rank(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn cumulative_ratio(&self) -> Vec<f64> {
        cumulative_sum(&self.explained_variance_ratio)
    }

    pub fn score(&self, record: usize, component: usize) -> f64 {
        self.scores[(record, component)]
    }
}

/// Principal components of `data` via the eigendecomposition of its sample covariance.
/// Components are ordered by descending eigenvalue and each is signed so that its
/// largest-magnitude loading is positive.
pub fn reduce(data: &DMatrix<f64>, rank: Rank) -> Result<PcaResult, ReduceError> {
    let n = data.nrows();
    let p = data.ncols();
    if p == 0 {
        return Err(ReduceError::NoFeatures);
    }
    if n < 2 {
        return Err(ReduceError::TooFewRecords(n));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(ReduceError::NonFinite);
    }

    let available = n.min(p);
    let k = match rank {
        Rank::Full => available,
        Rank::Fixed(0) => return Err(ReduceError::ZeroRank),
        Rank::Fixed(k) if k > available => {
            return Err(ReduceError::RankTooLarge {
                requested: k,
                available,
            });
        }
        Rank::Fixed(k) => k,
    };

    let means: Vec<f64> = (0..p).map(|col| data.column(col).mean()).collect();
    let centered = DMatrix::from_fn(n, p, |row, col| data[(row, col)] - means[col]);
    let covariance = (centered.transpose() * &centered) / (n as f64 - 1.0);

    let eigen = SymmetricEigen::try_new(covariance, f64::EPSILON, MAX_EIGEN_ITERATIONS)
        .ok_or(ReduceError::NoConvergence)?;

    let values: Vec<f64> = eigen.eigenvalues.iter().map(|v| v.max(0.0)).collect();
    let mut order: Vec<usize> = (0..p).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(Ordering::Equal));

    let total: f64 = values.iter().sum();

    let mut components = Vec::with_capacity(k);
    let mut eigenvalues = Vec::with_capacity(k);
    let mut ratios = Vec::with_capacity(k);
    for &idx in order.iter().take(k) {
        let mut vector: Vec<f64> = eigen.eigenvectors.column(idx).iter().copied().collect();
        orient(&mut vector);
        components.push(vector);
        eigenvalues.push(values[idx]);
        ratios.push(if total > 0.0 { values[idx] / total } else { 0.0 });
    }

    let scores = DMatrix::from_fn(n, k, |row, comp| {
        components[comp]
            .iter()
            .enumerate()
            .map(|(col, w)| centered[(row, col)] * w)
            .sum::<f64>()
    });

    Ok(PcaResult {
        components,
        eigenvalues,
        explained_variance_ratio: ratios,
        scores,
    })
}

fn orient(vector: &mut [f64]) {
    let mut pivot = 0.0f64;
    for &v in vector.iter() {
        if v.abs() > pivot.abs() {
            pivot = v;
        }
    }
    if pivot < 0.0 {
        for v in vector.iter_mut() {
            *v = -*v;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_reduce.rs"]
mod tests;
