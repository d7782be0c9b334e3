#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A single generated comic page. The image reference is either a remote
/// URL or a `blob:` object URL owned by the session holding the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: usize,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Page {
    pub fn new(page_number: usize, image_url: &str, title: Option<String>) -> Page {
        return Page {
            page_number,
            image_url: image_url.to_string(),
            title,
        };
    }

    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            if !title.trim().is_empty() {
                return title.to_string();
            }
        }

        return format!("Page {}", self.page_number);
    }
}
