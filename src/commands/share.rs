use crate::api::PromptStore;
use crate::core::link::share_link;
use crate::core::storage::{AppCtx, StorageMedium};
use console::style;

use super::copy::to_clipboard;

/// Print a self-contained share link for a prompt.
pub fn run<M: StorageMedium>(
    ctx: &AppCtx,
    store: &PromptStore<M>,
    id: &str,
    copy: bool,
) -> Result<(), String> {
    let pd = store
        .find(id)
        .ok_or_else(|| format!("No prompt with ID {}", id))?;
    let link = share_link(&ctx.share_origin, &pd.shared());
    println!("{}", link);
    if copy {
        to_clipboard(link)?;
        println!("{} link copied to clipboard", style("•").green().bold());
    }
    Ok(())
}
