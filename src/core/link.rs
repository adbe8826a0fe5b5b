//! Shareable and view links, and the `#/...` fragment router that resolves
//! them.

use super::share;
use super::storage::{PromptData, SharedData, StorageMedium};
use crate::api::PromptStore;
use log::debug;

const SHARE_PREFIX: &str = "#/share/";
const VIEW_PREFIX: &str = "#/view/";

/// `<origin>/#/share/<token>`
pub fn share_link(origin: &str, fields: &SharedData) -> String {
    format!(
        "{}/{}{}",
        origin.trim_end_matches('/'),
        SHARE_PREFIX,
        share::encode(fields)
    )
}

/// `<origin>/#/view/<id>`
pub fn view_link(origin: &str, id: &str) -> String {
    format!("{}/{}{}", origin.trim_end_matches('/'), VIEW_PREFIX, id)
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Share(String),
    View(String),
    Gallery,
}

/// What a route shows once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Decoded fields from someone else's link.
    Shared(SharedData),
    /// One of the owner's records.
    Owned(PromptData),
    Gallery,
}

impl Route {
    /// Parses a full URL or a bare fragment. Anything that is not a share or
    /// view fragment routes to the gallery.
    pub fn parse(input: &str) -> Route {
        let input = input.trim();
        let fragment = match input.find('#') {
            Some(idx) => &input[idx..],
            None => return Route::Gallery,
        };
        if let Some(token) = fragment.strip_prefix(SHARE_PREFIX) {
            return Route::Share(token.to_string());
        }
        if let Some(id) = fragment.strip_prefix(VIEW_PREFIX) {
            return Route::View(id.to_string());
        }
        Route::Gallery
    }

    /// Invalid tokens and unknown ids fall back to the gallery.
    pub fn resolve<M: StorageMedium>(&self, store: &PromptStore<M>) -> Resolved {
        match self {
            Route::Share(token) => match share::decode(token) {
                Ok(fields) => Resolved::Shared(fields),
                Err(e) => {
                    debug!("share link rejected: {}", e);
                    Resolved::Gallery
                }
            },
            Route::View(id) => match store.find(id) {
                Some(pd) => Resolved::Owned(pd),
                None => {
                    debug!("view link points at unknown prompt (id={})", id);
                    Resolved::Gallery
                }
            },
            Route::Gallery => Resolved::Gallery,
        }
    }
}
