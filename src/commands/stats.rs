use crate::api::PromptStore;
use crate::core::storage::StorageMedium;
use console::style;

/// Display statistics about the collection.
pub fn run<M: StorageMedium>(store: &PromptStore<M>) -> Result<(), String> {
    let counts = store.stats();
    let total: usize = counts.iter().map(|(_, n)| n).sum();

    println!("{}", style("Gallery Statistics").bold().underlined());
    println!("{}: {}", style("Total Prompts").cyan(), style(total).yellow());
    for (category, count) in counts {
        println!("  - {} ({})", style(category).green(), count);
    }
    Ok(())
}
