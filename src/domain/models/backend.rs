#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;

use super::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
    OpenAI,
}

impl BackendName {
    pub fn parse(text: String) -> Result<BackendName> {
        match text.to_lowercase().as_str() {
            "gemini" => return Ok(BackendName::Gemini),
            "openai" => return Ok(BackendName::OpenAI),
            _ => bail!(format!("{text} is not a valid backend name")),
        }
    }
}

/// How many pages the user asked for. Purely informational on the session;
/// the generator decides how many pages actually come back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PageCount {
    One,
    Two,
}

impl PageCount {
    pub fn parse(text: &str) -> Result<PageCount> {
        match text.trim() {
            "1" => return Ok(PageCount::One),
            "2" => return Ok(PageCount::Two),
            _ => bail!(format!("{text} is not a valid page count, expected 1 or 2")),
        }
    }

    pub fn as_usize(&self) -> usize {
        match self {
            PageCount::One => return 1,
            PageCount::Two => return 2,
        }
    }

    pub fn toggle(&self) -> PageCount {
        match self {
            PageCount::One => return PageCount::Two,
            PageCount::Two => return PageCount::One,
        }
    }
}

impl From<PageCount> for u8 {
    fn from(page_count: PageCount) -> u8 {
        return page_count.as_usize() as u8;
    }
}

impl TryFrom<u8> for PageCount {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<PageCount> {
        return PageCount::parse(&value.to_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub story_idea: String,
    pub page_count: PageCount,
}

impl GenerationRequest {
    pub fn new(story_idea: &str, page_count: PageCount) -> GenerationRequest {
        return GenerationRequest {
            story_idea: story_idea.trim().to_string(),
            page_count,
        };
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work
    /// with the backend.
    async fn health_check(&self) -> Result<()>;

    /// Generates the full page sequence for a story idea. There are no
    /// partial results: the call either returns every page or fails, and
    /// any blob URLs created before a failure are released by the backend.
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Page>>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
