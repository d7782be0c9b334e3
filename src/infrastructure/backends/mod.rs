#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

pub mod gemini;
pub mod openai;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Page;
use crate::infrastructure::objects::ObjectStore;

pub const PANELS_PER_PAGE: usize = 4;
pub const STYLE_HINT: &str = "clean comic-book art, bold ink outlines, flat colors, readable composition, square page layout, gently stylized. ";

/// The intermediate page plan a text model writes before any image is
/// generated. Both backends share the format.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPage {
    pub title: Option<String>,
    pub illustration: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicScript {
    pub pages: Vec<ScriptPage>,
}

impl ComicScript {
    pub fn parse(payload: &str) -> Result<ComicScript> {
        let script: ComicScript = serde_json::from_str(payload)?;
        if script.pages.is_empty() {
            bail!("Model returned a script with no pages");
        }

        return Ok(script);
    }

    /// Normalizes the script to the requested page count: short scripts
    /// are padded by repeating the last page, long ones truncated.
    pub fn normalize(mut self, page_total: usize) -> ComicScript {
        if let Some(last) = self.pages.last().cloned() {
            while self.pages.len() < page_total {
                self.pages.push(last.clone());
            }
        }
        self.pages.truncate(page_total);

        return self;
    }
}

pub fn script_prompt(request: &GenerationRequest) -> String {
    let page_total = request.page_count.as_usize();
    let story_idea = &request.story_idea;

    return format!(
        r#"You are a comic writer. Write a {page_total}-page comic about: {story_idea}.
Each page is a single illustrated sheet of {PANELS_PER_PAGE} panels.
Return ONLY valid JSON with a top-level key "pages" (a list of {page_total} objects).
Each object must have:
- "title": a short caption for the page
- "illustration": an image prompt describing the full page (concise, visual, no dialogue)"#
    );
}

/// Backends create blob URLs as pages come together; a failure part-way
/// through must hand those back before the error propagates, since no
/// session will ever own them.
pub(crate) fn discard_pages(pages: &[Page]) {
    for page in pages {
        if ObjectStore::is_managed(&page.image_url) {
            ObjectStore::release(&page.image_url);
        }
    }
}

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> Result<BackendBox> {
        if name == BackendName::Gemini {
            return Ok(Box::<gemini::Gemini>::default());
        }

        if name == BackendName::OpenAI {
            return Ok(Box::<openai::OpenAI>::default());
        }

        bail!(format!("No backend implemented for {name}"))
    }
}
