use dochub_finalize::DocFinalizer;

use crate::cli::{GlobalFlags, PlanArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `dochub plan`.
pub fn handle(args: &PlanArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let layout = ctx.layout(&args.project)?;
    let plan = DocFinalizer::for_layout(layout.clone()).plan()?;
    let response = plan.to_response();

    output(
        &response,
        &response.files,
        &["path", "binary", "patches"],
        flags.format,
    )
}
