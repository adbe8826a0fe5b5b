use crate::api::PromptStore;
use crate::core::filter::GalleryFilter;
use crate::core::storage::{Category, StorageMedium};
use console::style;

use super::list::print_items;

/// Search prompts by title or prompt text, optionally within a category.
pub fn run<M: StorageMedium>(
    store: &PromptStore<M>,
    query: &str,
    category: Option<Category>,
) -> Result<(), String> {
    let hits = store.search(&GalleryFilter::new(category, query));
    if hits.is_empty() {
        println!("{}", style("No match").yellow());
    } else {
        println!("{}", style("Matches:").green().bold());
        print_items(hits);
    }
    Ok(())
}
