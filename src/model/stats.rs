use std::cmp::Ordering;

/// Mean of the defined values; `None` when nothing is defined.
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for v in values.into_iter().flatten() {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Midpoint median: even counts average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut acc = 0.0f64;
    values
        .iter()
        .map(|v| {
            acc += v;
            acc
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/stats.rs"]
mod tests;
