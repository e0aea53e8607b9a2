pub mod plot;
pub mod text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("plot error: {0}")]
    Plot(String),
}

/// One line of the ranking by first-component score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStudent {
    pub rank: usize,
    pub student: String,
    pub group: String,
    pub score: f64,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_f64_6(*v)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
