use crate::api::PromptStore;
use crate::core::storage::{Category, NewPrompt, PromptData, StorageMedium};
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};

/// Field values given on the command line.
#[derive(Debug, Default)]
pub struct NewArgs {
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
}

/// Create a new prompt.
///
/// With both `--title` and `--prompt` nothing is asked; otherwise the missing
/// fields are prompted for.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, args: NewArgs) -> Result<PromptData, String> {
    let draft = match (args.title, args.prompt) {
        (Some(title), Some(prompt)) => NewPrompt {
            title,
            prompt,
            image_url: args.image_url.unwrap_or_default(),
            category: args.category.unwrap_or_default(),
        },
        (title, prompt) => ask(title, prompt, args.image_url, args.category)?,
    };
    if draft.title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    let pd = store.create(draft).map_err(|e| e.to_string())?;
    println!(
        "{} Prompt saved with ID {} and title '{}'",
        style("•").green().bold(),
        style(&pd.id).yellow(),
        pd.title
    );
    Ok(pd)
}

fn ask(
    title: Option<String>,
    prompt: Option<String>,
    image_url: Option<String>,
    category: Option<Category>,
) -> Result<NewPrompt, String> {
    let theme = ColorfulTheme::default();

    let title = match title {
        Some(t) => t,
        None => Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()
            .map_err(|e| format!("Title error: {}", e))?,
    };

    let prompt = match prompt {
        Some(p) => p,
        None => Editor::new()
            .edit("Enter your prompt here.")
            .map_err(|e| format!("Editor error: {}", e))?
            .unwrap_or_default(),
    };

    let image_url = match image_url {
        Some(u) => u,
        None => Input::with_theme(&theme)
            .with_prompt("Image URL (optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Image error: {}", e))?,
    };

    let category = match category {
        Some(c) => c,
        None => pick_category(&theme, Category::default())?,
    };

    Ok(NewPrompt {
        title,
        prompt,
        image_url,
        category,
    })
}

pub(crate) fn pick_category(theme: &ColorfulTheme, current: Category) -> Result<Category, String> {
    let default = Category::ALL
        .iter()
        .position(|c| *c == current)
        .unwrap_or(0);
    let idx = Select::with_theme(theme)
        .with_prompt("Category")
        .default(default)
        .items(&Category::ALL[..])
        .interact()
        .map_err(|e| format!("Category error: {}", e))?;
    Ok(Category::ALL[idx])
}
