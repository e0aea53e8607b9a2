use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::input::{InputError, discover_csv_files, load_tables};
use crate::model::table::CombinedTable;

#[derive(Debug)]
pub struct Stage1Output {
    pub files: Vec<PathBuf>,
    pub table: CombinedTable,
}

pub fn run_stage1(config: &PipelineConfig) -> Result<Stage1Output, InputError> {
    let files = discover_csv_files(&config.input_dir, &config.extension)?;
    crate::info!(
        "discovered {} input files in {}",
        files.len(),
        config.input_dir.display()
    );
    let table = load_tables(&files, &config.columns)?;
    crate::info!(
        "combined table: {} rows, {} numeric columns",
        table.n_records(),
        table.schema.n_features()
    );
    Ok(Stage1Output { files, table })
}
