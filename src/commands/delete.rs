use crate::api::PromptStore;
use crate::core::storage::StorageMedium;
use console::style;

/// Delete a prompt.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, id: &str) -> Result<(), String> {
    if store.delete(id).map_err(|e| e.to_string())? {
        println!("{} prompt {} deleted", style("•").green().bold(), id);
        Ok(())
    } else {
        Err(format!("No prompt with ID {}", id))
    }
}
