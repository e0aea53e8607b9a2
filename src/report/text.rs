use crate::pipeline::stage4_reduce::PcaResult;
use crate::report::{RankedStudent, format_f64_6, format_vector};

/// Eigenvectors, eigenvalues, per-component and cumulative variance ratios, in that order.
pub fn render_eigen_summary(pca: &PcaResult, features: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    out.push(format!(
        "Eigenvectors (principal components) over [{}]:",
        features.join(", ")
    ));
    for (idx, component) in pca.components.iter().enumerate() {
        out.push(format!("  PC{}: {}", idx + 1, format_vector(component)));
    }
    out.push(format!(
        "Eigenvalues (variance along each component): {}",
        format_vector(&pca.eigenvalues)
    ));
    out.extend(render_variance_ratios(pca));
    out
}

pub fn render_variance_ratios(pca: &PcaResult) -> Vec<String> {
    vec![
        format!(
            "Explained variance ratio per component: {}",
            format_vector(&pca.explained_variance_ratio)
        ),
        format!(
            "Cumulative explained variance ratio: {}",
            format_vector(&pca.cumulative_ratio())
        ),
    ]
}

pub fn render_top_table(ranking: &[RankedStudent]) -> Vec<String> {
    let student_width = ranking
        .iter()
        .map(|r| r.student.len())
        .chain(std::iter::once("alumno".len()))
        .max()
        .unwrap_or(0);
    let group_width = ranking
        .iter()
        .map(|r| r.group.len())
        .chain(std::iter::once("grupo".len()))
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(ranking.len() + 2);
    out.push(format!(
        "Top {} students by first principal component:",
        ranking.len()
    ));
    out.push(format!(
        "{:>4}  {:<sw$}  {:<gw$}  {:>12}",
        "rank",
        "alumno",
        "grupo",
        "pc1",
        sw = student_width,
        gw = group_width
    ));
    for r in ranking {
        out.push(format!(
            "{:>4}  {:<sw$}  {:<gw$}  {:>12}",
            r.rank,
            r.student,
            r.group,
            format_f64_6(r.score),
            sw = student_width,
            gw = group_width
        ));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
