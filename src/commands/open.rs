use crate::api::PromptStore;
use crate::core::link::Route;
use crate::core::share;
use crate::core::storage::StorageMedium;
use console::style;
use log::debug;

use super::get::print_full;

/// Display what a share or view link points to. A bare token is treated as
/// the last segment of a share link.
pub fn run<M: StorageMedium>(store: &PromptStore<M>, link: &str) -> Result<(), String> {
    let route = if link.contains('#') {
        Route::parse(link)
    } else {
        Route::Share(link.trim().to_string())
    };

    match route {
        Route::Share(token) => {
            let data = share::decode(&token).map_err(|e| {
                debug!("{}", e);
                "This link is invalid".to_string()
            })?;
            println!("{}", style("Shared prompt").magenta().bold());
            print_full(&data);
            Ok(())
        }
        Route::View(id) => {
            let pd = store
                .find(&id)
                .ok_or_else(|| format!("No prompt with ID {}", id))?;
            print_full(&pd.shared());
            Ok(())
        }
        Route::Gallery => Err("Not a share or view link".to_string()),
    }
}
