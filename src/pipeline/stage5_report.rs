use std::cmp::Ordering;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::model::table::CleanTable;
use crate::pipeline::stage3_standardize::Standardized;
use crate::pipeline::stage4_reduce::{PcaResult, Rank, ReduceError, reduce};
use crate::report::plot::{ScatterPoint, render_scatter, render_scree};
use crate::report::text::{render_eigen_summary, render_top_table, render_variance_ratios};
use crate::report::{RankedStudent, ReportError};

pub const SCREE_FILE: &str = "scree.svg";
pub const SCATTER_FILE: &str = "pca_scatter.svg";

#[derive(Debug, thiserror::Error)]
pub enum Stage5Error {
    #[error(transparent)]
    Reduce(#[from] ReduceError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug)]
pub struct Stage5Output {
    pub full: PcaResult,
    pub scatter: PcaResult,
    pub ranking: PcaResult,
    pub top: Vec<RankedStudent>,
    pub plots: Vec<PathBuf>,
}

/// Full-rank diagnostics and scree plot, then a fresh rank-2 fit for the scatter plot,
/// then a fresh rank-1 fit for the top-N ranking.
pub fn run_stage5(
    standardized: &Standardized,
    table: &CleanTable,
    config: &PipelineConfig,
) -> Result<Stage5Output, Stage5Error> {
    let matrix = &standardized.matrix;
    let mut plots = Vec::with_capacity(2);
    std::fs::create_dir_all(&config.plot_dir).map_err(ReportError::from)?;

    let full = reduce(matrix, Rank::Full)?;
    log_lines(&render_eigen_summary(&full, &table.features));

    let scree_path = config.plot_dir.join(SCREE_FILE);
    render_scree(&scree_path, &full.eigenvalues)?;
    crate::info!("scree plot written to {}", scree_path.display());
    plots.push(scree_path);

    let scatter = reduce(matrix, Rank::Fixed(config.scatter_rank))?;
    log_lines(&render_variance_ratios(&scatter));
    let scatter_path = config.plot_dir.join(SCATTER_FILE);
    render_scatter(&scatter_path, &scatter_points(&scatter, table))?;
    crate::info!("component scatter plot written to {}", scatter_path.display());
    plots.push(scatter_path);

    let ranking = reduce(matrix, Rank::Fixed(config.ranking_rank))?;
    let top = rank_by_component(&ranking, table, 0, config.top_n);
    log_lines(&render_top_table(&top));

    Ok(Stage5Output {
        full,
        scatter,
        ranking,
        top,
        plots,
    })
}

pub fn scatter_points(pca: &PcaResult, table: &CleanTable) -> Vec<ScatterPoint> {
    (0..table.n_records())
        .map(|row| ScatterPoint {
            x: pca.score(row, 0),
            y: if pca.rank() > 1 { pca.score(row, 1) } else { 0.0 },
            label: table.student_label(row).to_string(),
        })
        .collect()
}

/// Records by descending score on `component`; ties keep table order.
pub fn rank_by_component(
    pca: &PcaResult,
    table: &CleanTable,
    component: usize,
    top_n: usize,
) -> Vec<RankedStudent> {
    if component >= pca.rank() {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..table.n_records()).collect();
    order.sort_by(|&a, &b| {
        pca.score(b, component)
            .partial_cmp(&pca.score(a, component))
            .unwrap_or(Ordering::Equal)
    });
    order
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, row)| RankedStudent {
            rank: idx + 1,
            student: table.student_label(row).to_string(),
            group: table.group_label(row).to_string(),
            score: pca.score(row, component),
        })
        .collect()
}

fn log_lines(lines: &[String]) {
    for line in lines {
        crate::info!("{}", line);
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
