mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use crate::config::PipelineConfig;
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::run_stage1;
use crate::pipeline::stage2_clean::run_stage2;
use crate::pipeline::stage3_standardize::run_stage3;
use crate::pipeline::stage5_report::{Stage5Output, run_stage5};

fn main() {
    logging::init();
    match run(&PipelineConfig::default()) {
        Ok(out) => {
            let leader = out.top.first().map(|r| r.student.as_str()).unwrap_or("-");
            crate::info!(
                "done: {} components, top student {}, {} plots written",
                out.full.rank(),
                leader,
                out.plots.len()
            );
        }
        Err(err) => {
            crate::error!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(config: &PipelineConfig) -> Result<Stage5Output, PipelineError> {
    let stage1 = run_stage1(config)?;
    let stage2 = run_stage2(stage1.table)?;
    let stage3 = run_stage3(&stage2.table)?;
    let stage5 = run_stage5(&stage3, &stage2.table, config)?;
    Ok(stage5)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
