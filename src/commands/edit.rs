use crate::api::PromptStore;
use crate::core::storage::{Category, PromptData, StorageMedium};
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};

use super::new::pick_category;

/// Replacement values given on the command line.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.prompt.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
    }

    fn apply(self, pd: &mut PromptData) {
        if let Some(title) = self.title {
            pd.title = title;
        }
        if let Some(prompt) = self.prompt {
            pd.prompt = prompt;
        }
        if let Some(image_url) = self.image_url {
            pd.image_url = image_url;
        }
        if let Some(category) = self.category {
            pd.category = category;
        }
    }
}

/// Edit a prompt's fields. Identity and creation time never change.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, id: &str, args: EditArgs) -> Result<(), String> {
    let original = store
        .find(id)
        .ok_or_else(|| format!("No prompt with ID '{}'", id))?;
    let mut pd = original.clone();

    if args.is_empty() {
        edit_interactively(&mut pd)?;
    } else {
        args.apply(&mut pd);
    }

    if pd.title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if pd == original {
        println!("{}", style("No changes detected. Nothing to save.").yellow());
        return Ok(());
    }

    store.save(pd).map_err(|e| e.to_string())?;
    println!(
        "{} Prompt '{}' updated successfully.",
        style("✔").green().bold(),
        id
    );
    Ok(())
}

fn edit_interactively(pd: &mut PromptData) -> Result<(), String> {
    let theme = ColorfulTheme::default();
    loop {
        let selections = &[
            "Edit Title",
            "Edit Prompt",
            "Edit Image URL",
            "Change Category",
            "Finish Editing",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .default(0)
            .items(&selections[..])
            .interact()
            .map_err(|e| e.to_string())?;

        match selection {
            0 => {
                pd.title = Input::with_theme(&theme)
                    .with_prompt("Title")
                    .with_initial_text(pd.title.clone())
                    .interact_text()
                    .map_err(|e| format!("Title error: {}", e))?;
            }
            1 => {
                // Editor returns None when the file was left unsaved.
                if let Some(edited) = Editor::new()
                    .edit(&pd.prompt)
                    .map_err(|e| format!("Editor error: {}", e))?
                {
                    pd.prompt = edited;
                    println!("{}", style("Prompt updated.").green());
                }
            }
            2 => {
                pd.image_url = Input::with_theme(&theme)
                    .with_prompt("Image URL")
                    .with_initial_text(pd.image_url.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| format!("Image error: {}", e))?;
            }
            3 => pd.category = pick_category(&theme, pd.category)?,
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryMedium;

    #[test]
    fn flag_edit_keeps_identity_and_created_at() {
        let store = PromptStore::new(MemoryMedium::new());
        let pd = store
            .create(crate::core::storage::NewPrompt {
                title: "A".to_string(),
                prompt: "p".to_string(),
                image_url: String::new(),
                category: Category::NanoBanana,
            })
            .expect("create");

        run(
            &store,
            &pd.id,
            EditArgs {
                title: Some("B".to_string()),
                category: Some(Category::Seedream),
                ..EditArgs::default()
            },
        )
        .expect("edit");

        let all = store.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, pd.id);
        assert_eq!(all[0].title, "B");
        assert_eq!(all[0].category, Category::Seedream);
        assert_eq!(all[0].created_at, pd.created_at);
    }

    #[test]
    fn rejects_blank_title() {
        let store = PromptStore::new(MemoryMedium::new());
        let pd = store
            .create(crate::core::storage::NewPrompt {
                title: "A".to_string(),
                prompt: "p".to_string(),
                image_url: String::new(),
                category: Category::NanoBanana,
            })
            .expect("create");
        let args = EditArgs {
            title: Some("  ".to_string()),
            ..EditArgs::default()
        };
        assert!(run(&store, &pd.id, args).is_err());
        assert_eq!(store.find(&pd.id).expect("found").title, "A");
    }

    #[test]
    fn unknown_id_is_an_error() {
        let store = PromptStore::new(MemoryMedium::new());
        assert!(run(&store, "missing", EditArgs::default()).is_err());
    }
}
