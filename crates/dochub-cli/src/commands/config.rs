use std::path::PathBuf;

use dochub_core::ProjectLayout;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConfigResponse<'a> {
    rel_api_doc_dir: &'a PathBuf,
    unified_api_path: &'a PathBuf,
    dartdoc_command: &'a [String],
    projects: &'a [ProjectLayout],
}

/// Handle `dochub config`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ConfigResponse {
        rel_api_doc_dir: &ctx.config.api.rel_api_doc_dir,
        unified_api_path: &ctx.config.api.unified_api_path,
        dartdoc_command: &ctx.config.dartdoc.command,
        projects: &ctx.layouts,
    };

    output(
        &response,
        &ctx.layouts,
        &["id", "package", "source_root", "dest_root"],
        flags.format,
    )
}
