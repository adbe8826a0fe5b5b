use crate::api::PromptStore;
use crate::core::filter::GalleryFilter;
use crate::core::storage::{Category, PromptData, StorageMedium};
use chrono::{DateTime, Utc};
use console::style;

/// List every saved prompt, optionally limited to one category.
pub fn run<M: StorageMedium>(
    store: &PromptStore<M>,
    category: Option<Category>,
) -> Result<(), String> {
    let items = store.search(&GalleryFilter::new(category, ""));
    if items.is_empty() {
        println!("{}", style("No saved prompts").green().bold());
        return Ok(());
    }
    println!("{}", style("Saved Prompts:").green().bold());
    print_items(items);
    Ok(())
}

/// One line per prompt, newest first.
pub(crate) fn print_items(mut items: Vec<PromptData>) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    for pd in items {
        println!(
            "  {} {} [{}] {} {}",
            style("•").green(),
            style(&pd.id).yellow(),
            style(pd.category).cyan(),
            pd.title,
            style(format_date(pd.created_at)).dim()
        );
    }
}

pub(crate) fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
