//! To command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ToArgs};
use crate::commands::common::print_report;
use crate::context::RuntimeContext;

/// Execute the to command
pub(crate) async fn execute(args: &ToArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    ctx.cancel_on_interrupt();

    let target = args.version;
    let report = ctx.run(move |migrator| migrator.migrate_to(target)).await?;
    print_report(&report, args.output)
}
