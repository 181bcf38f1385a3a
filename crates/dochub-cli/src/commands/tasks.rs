use dochub_core::responses::TaskEntry;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::{self, PipelineOptions};

/// Handle `dochub tasks`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let graph =
        pipeline::build_graph(&ctx.layouts, &ctx.config.dartdoc, PipelineOptions::default())?;

    let entries: Vec<TaskEntry> = graph
        .names()
        .map(|name| TaskEntry {
            name: name.to_string(),
            depends_on: graph.dependencies(name).unwrap_or_default().to_vec(),
        })
        .collect();

    output(&entries, &entries, &["name", "depends_on"], flags.format)
}
