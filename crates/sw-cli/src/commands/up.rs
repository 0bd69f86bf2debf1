//! Up command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::print_report;
use crate::context::RuntimeContext;

/// Execute the up command
pub(crate) async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    ctx.cancel_on_interrupt();

    let report = ctx.run(|migrator| migrator.migrate_latest()).await?;
    print_report(&report, args.output)
}
