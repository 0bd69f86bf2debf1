//! Create command implementation

use anyhow::Result;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the create command
pub(crate) async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let name = args.name.clone();
    let scaffold = ctx.run(move |migrator| migrator.create(&name)).await?;

    println!("Created migration {:04}:", scaffold.version);
    println!("  {}", scaffold.up.display());
    println!("  {}", scaffold.down.display());
    Ok(())
}
