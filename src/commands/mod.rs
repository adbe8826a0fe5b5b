use crate::api::PromptStore;
use crate::cli::Cmd;
use crate::core::storage::{AppCtx, StorageMedium};

pub mod copy;
pub mod delete;
pub mod edit;
pub mod get;
pub mod list;
pub mod new;
pub mod open;
pub mod search;
pub mod share;
pub mod stats;

/// Dispatches the parsed command to the appropriate handler.
pub fn dispatch<M: StorageMedium>(
    command: Cmd,
    ctx: &AppCtx,
    store: &PromptStore<M>,
) -> Result<(), String> {
    match command {
        Cmd::List { category } => list::run(store, category),
        Cmd::Search { query, category } => search::run(store, &query, category),
        Cmd::New {
            title,
            prompt,
            image_url,
            category,
        } => new::run(
            store,
            new::NewArgs {
                title,
                prompt,
                image_url,
                category,
            },
        )
        .map(|_| ()),
        Cmd::Get { id } => get::run(store, &id),
        Cmd::Edit {
            id,
            title,
            prompt,
            image_url,
            category,
        } => edit::run(
            store,
            &id,
            edit::EditArgs {
                title,
                prompt,
                image_url,
                category,
            },
        ),
        Cmd::Delete { id } => delete::run(store, &id),
        Cmd::Share { id, copy } => share::run(ctx, store, &id, copy),
        Cmd::Open { link } => open::run(store, &link),
        Cmd::Copy { id } => copy::run(store, &id),
        Cmd::Stats => stats::run(store),
    }
}
