pub mod stage1_load;
pub mod stage2_clean;
pub mod stage3_standardize;
pub mod stage4_reduce;
pub mod stage5_report;

use crate::input::InputError;
use stage2_clean::CleanError;
use stage3_standardize::StandardizeError;
use stage5_report::Stage5Error;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("load failed: {0}")]
    Input(#[from] InputError),
    #[error("cleaning failed: {0}")]
    Clean(#[from] CleanError),
    #[error("standardization failed: {0}")]
    Standardize(#[from] StandardizeError),
    #[error("report failed: {0}")]
    Report(#[from] Stage5Error),
}
