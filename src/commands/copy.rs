use crate::api::PromptStore;
use crate::core::storage::StorageMedium;
use console::style;
use copypasta::{ClipboardContext, ClipboardProvider};

/// Copy prompt text to clipboard.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, id: &str) -> Result<(), String> {
    let pd = store
        .find(id)
        .ok_or_else(|| format!("No prompt with ID {}", id))?;
    to_clipboard(pd.prompt)?;
    println!("{} copied to clipboard", style("•").green().bold());
    Ok(())
}

pub(crate) fn to_clipboard(text: String) -> Result<(), String> {
    let mut ctx_clip = ClipboardContext::new().map_err(|e| format!("Clipboard error: {}", e))?;
    ctx_clip
        .set_contents(text)
        .map_err(|e| format!("Clipboard set error: {}", e))
}
