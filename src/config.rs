use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub group: String,
    pub student: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            group: "grupo".to_string(),
            student: "alumno".to_string(),
        }
    }
}

/// Fixed run parameters. The binary always uses `PipelineConfig::default()`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub extension: String,
    pub columns: ColumnNames,
    pub scatter_rank: usize,
    pub ranking_rank: usize,
    pub top_n: usize,
    pub plot_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./Datos"),
            extension: "csv".to_string(),
            columns: ColumnNames::default(),
            scatter_rank: 2,
            ranking_rank: 1,
            top_n: 3,
            plot_dir: PathBuf::from("./plots"),
        }
    }
}
