use crate::cli::{FinalizeArgs, GlobalFlags};
use crate::context::AppContext;
use crate::pipeline::{self, PipelineOptions};

/// Handle `dochub finalize`.
pub fn handle(args: &FinalizeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let selected = ctx.select(&args.projects)?;
    if selected.is_empty() {
        tracing::warn!("nothing to finalize");
    }

    let options = PipelineOptions {
        generate: !args.no_generate,
        parallel: !flags.serial,
    };
    let graph = pipeline::build_graph(&ctx.layouts, &ctx.config.dartdoc, options)?;

    let names: Vec<String> = selected
        .iter()
        .map(|layout| pipeline::finalize_task(layout.id.as_str()))
        .collect();
    let targets: Vec<&str> = names.iter().map(String::as_str).collect();
    super::execute(&graph, &targets, flags)
}
