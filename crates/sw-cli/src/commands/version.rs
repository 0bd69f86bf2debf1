//! Version command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, OutputFormat, VersionArgs};
use crate::context::RuntimeContext;

/// Execute the version command
pub(crate) async fn execute(args: &VersionArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let version = ctx.run(|migrator| migrator.current_version()).await?;

    match args.output {
        OutputFormat::Text => println!("{version}"),
        OutputFormat::Json => println!("{}", serde_json::json!({ "version": version })),
    }
    Ok(())
}
