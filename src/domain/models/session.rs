#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Gradient;
use super::Page;
use super::PageCount;

/// The single active generated-comic result set. A session owns its pages'
/// blob URLs until it is superseded; release happens in the session store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicSession {
    pub id: String,
    pub story_idea: String,
    pub pages_requested: PageCount,
    pub pages: Vec<Page>,
    pub gradient_from: String,
    pub gradient_to: String,
}

impl ComicSession {
    pub fn new(
        story_idea: &str,
        pages_requested: PageCount,
        pages: Vec<Page>,
        gradient: Gradient,
    ) -> ComicSession {
        return ComicSession {
            id: ComicSession::create_id(),
            story_idea: story_idea.to_string(),
            pages_requested,
            pages,
            gradient_from: gradient.from.to_string(),
            gradient_to: gradient.to.to_string(),
        };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn has_pages(&self) -> bool {
        return !self.pages.is_empty();
    }
}
