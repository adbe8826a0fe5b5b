use crate::api::PromptStore;
use crate::core::storage::{SharedData, StorageMedium};
use console::style;

use super::list::format_date;

/// Display a prompt.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, id: &str) -> Result<(), String> {
    let pd = store
        .find(id)
        .ok_or_else(|| format!("No prompt with ID {}", id))?;
    print_full(&pd.shared());
    println!(
        "{} {}",
        style("Created:").green().bold(),
        format_date(pd.created_at)
    );
    Ok(())
}

pub(crate) fn print_full(data: &SharedData) {
    println!("{} {}", style("Title:").green().bold(), data.title);
    println!("{} {}", style("Category:").green().bold(), data.category);
    if !data.image_url.is_empty() {
        println!("{} {}", style("Image:").green().bold(), preview(&data.image_url));
    }
    println!("{}", style("Prompt:").green().bold());
    println!("{}", data.prompt);
}

/// Embedded images can be megabytes of base64; only show their head.
fn preview(image_url: &str) -> String {
    if image_url.starts_with("data:") && image_url.len() > 64 {
        let head: String = image_url.chars().take(48).collect();
        format!("{}… ({} bytes)", head, image_url.len())
    } else {
        image_url.to_string()
    }
}
