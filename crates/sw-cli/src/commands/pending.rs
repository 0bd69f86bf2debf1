//! Pending command implementation

use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, PendingArgs};
use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// Exit status of `pending --check` when migrations are outstanding
const PENDING_EXIT_CODE: u8 = 2;

#[derive(Debug, Serialize)]
struct PendingOutput {
    current: u32,
    latest: u32,
    pending: bool,
    pending_count: u32,
}

/// Execute the pending command
pub(crate) async fn execute(args: &PendingArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let status = ctx
        .run(|migrator| {
            let pending = migrator.has_pending()?;
            let latest = migrator.migrations()?.latest_version();
            let current = migrator.current_version()?;
            Ok(PendingOutput {
                current,
                latest,
                pending,
                pending_count: latest.saturating_sub(current),
            })
        })
        .await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Text if status.pending => println!(
            "{} pending migration(s): at version {}, latest is {}",
            status.pending_count, status.current, status.latest
        ),
        OutputFormat::Text => println!("Up to date at version {}", status.current),
    }

    if args.check && status.pending {
        return Err(ExitCode(PENDING_EXIT_CODE).into());
    }
    Ok(())
}
