use crate::cli::{GlobalFlags, RunArgs};
use crate::context::AppContext;
use crate::pipeline::{self, FINALIZE_ALL, PipelineOptions};

/// Handle `dochub run`.
pub fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = PipelineOptions {
        generate: true,
        parallel: !flags.serial,
    };
    let graph = pipeline::build_graph(&ctx.layouts, &ctx.config.dartdoc, options)?;

    let targets: Vec<&str> = if args.tasks.is_empty() {
        vec![FINALIZE_ALL]
    } else {
        args.tasks.iter().map(String::as_str).collect()
    };
    super::execute(&graph, &targets, flags)
}
