#[cfg(test)]
#[path = "exporter_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ComicSession;
use crate::domain::models::Page;
use crate::infrastructure::objects::ObjectStore;

pub const DEFAULT_FILE_NAME: &str = "comic.json";

#[derive(Serialize)]
struct ExportPayload<'a> {
    story: &'a str,
    pages: &'a [Page],
}

pub struct Exporter {
    pub export_dir: path::PathBuf,
}

impl Default for Exporter {
    fn default() -> Exporter {
        let configured = Config::get(ConfigKey::ExportDir);
        if !configured.is_empty() {
            return Exporter::new(path::PathBuf::from(configured));
        }

        let export_dir = dirs::download_dir()
            .unwrap_or_else(|| return dirs::home_dir().unwrap_or_default());
        return Exporter::new(export_dir);
    }
}

impl Exporter {
    pub fn new(export_dir: path::PathBuf) -> Exporter {
        return Exporter { export_dir };
    }

    /// Lowercases and collapses every non-alphanumeric run into a single
    /// dash, with no leading or trailing separator.
    pub fn slugify(text: &str) -> String {
        let mut slug = String::new();
        let mut pending_separator = false;

        for char in text.to_lowercase().chars() {
            if char.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(char);
            } else {
                pending_separator = true;
            }
        }

        return slug;
    }

    pub fn file_name(story_idea: &str) -> String {
        let slug = Exporter::slugify(story_idea);
        if slug.is_empty() {
            return DEFAULT_FILE_NAME.to_string();
        }

        return format!("{slug}.json");
    }

    /// Writes the session as pretty-printed JSON into the export
    /// directory. A session without pages is a no-op and returns None.
    /// The payload travels through a short-lived blob that is released
    /// as soon as the file handle exists, whatever the outcome.
    pub async fn export(&self, session: &ComicSession) -> Result<Option<path::PathBuf>> {
        if session.pages.is_empty() {
            return Ok(None);
        }

        let payload = serde_json::to_string_pretty(&ExportPayload {
            story: &session.story_idea,
            pages: &session.pages,
        })?;
        let url = ObjectStore::create(payload.into_bytes());
        let bytes = ObjectStore::resolve(&url).unwrap_or_default();

        if !self.export_dir.exists() {
            fs::create_dir_all(&self.export_dir).await?;
        }

        let file_path = self.export_dir.join(Exporter::file_name(&session.story_idea));
        let file_res = fs::File::create(&file_path).await;
        ObjectStore::release(&url);

        let mut file = file_res?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        tracing::debug!(path = ?file_path, "exported session");
        return Ok(Some(file_path));
    }
}
