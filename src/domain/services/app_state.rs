#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::sync::mpsc;

use super::example_prompts;
use super::PromptHistory;
use super::SessionStore;
use super::Viewer;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::ComicSession;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GradientPalette;
use crate::domain::models::Page;
use crate::domain::models::PageCount;
use crate::domain::models::StatusMessage;
use crate::infrastructure::backends::BackendManager;

pub struct AppState {
    pub example_cursor: usize,
    pub history: PromptHistory,
    pub page_count: PageCount,
    pub sessions: SessionStore,
    pub status: Option<StatusMessage>,
    pub viewer: Viewer,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub async fn new(backend_name: BackendName) -> Result<AppState> {
        let mut app_state = AppState {
            example_cursor: 0,
            history: PromptHistory::default(),
            page_count: PageCount::parse(&Config::get(ConfigKey::PageCount))?,
            sessions: SessionStore::default(),
            status: None,
            viewer: Viewer::default(),
            waiting_for_backend: false,
        };

        let backend = BackendManager::get(backend_name)?;
        if let Err(err) = backend.health_check().await {
            app_state.status = Some(StatusMessage::error(&format!(
                "Backend {backend_name} isn't reachable, generation will likely fail. Error: {err}"
            )));
        }

        return Ok(app_state);
    }

    /// Sends a generation request for the typed story idea. Rejected (not
    /// queued) while a generation is already in flight, and for blank
    /// input. Returns whether the request was dispatched.
    pub fn submit_prompt(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if self.waiting_for_backend {
            return Ok(false);
        }

        let story_idea = input.trim();
        if story_idea.is_empty() {
            return Ok(false);
        }

        self.waiting_for_backend = true;
        self.status = None;
        tx.send(Action::GenerateComic(GenerationRequest::new(
            story_idea,
            self.page_count,
        )))?;

        return Ok(true);
    }

    /// Resubmits the most recent successful prompt, if any.
    pub fn resubmit_last(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let last = self.history.last().map(|prompt| return prompt.to_string());
        if last.is_none() {
            return Ok(false);
        }

        return self.submit_prompt(&last.unwrap(), tx);
    }

    /// Installs the freshly generated session: gradient pick, superseded
    /// session released, history appended, viewer back on the first page,
    /// busy flag cleared.
    pub fn handle_generation_complete(&mut self, request: GenerationRequest, pages: Vec<Page>) {
        let session = ComicSession::new(
            &request.story_idea,
            request.page_count,
            pages,
            GradientPalette::random(),
        );
        let page_total = session.pages.len();

        self.sessions.replace(Some(session));
        self.history.record(&request.story_idea);
        if self.viewer.is_open() {
            self.viewer.open(0, page_total);
        }
        self.viewer.sync(Some(page_total));
        self.waiting_for_backend = false;
        self.status = Some(StatusMessage::info(&format!(
            "Generated {page_total} page(s) for \"{}\"",
            request.story_idea
        )));
    }

    /// The prior session stays untouched; only the busy flag and the
    /// status line change.
    pub fn handle_generation_failed(&mut self, reason: &str) {
        self.waiting_for_backend = false;
        self.status = Some(StatusMessage::error(&format!(
            "Comic generation failed: {reason}"
        )));
    }

    /// No-op unless the active session has at least one page.
    pub fn request_export(&self, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if let Some(session) = self.sessions.active() {
            if session.has_pages() {
                tx.send(Action::ExportSession(session.clone()))?;
                return Ok(true);
            }
        }

        return Ok(false);
    }

    pub fn handle_export_complete(&mut self, file_path: &path::Path) {
        self.status = Some(StatusMessage::info(&format!(
            "Exported comic to {}",
            file_path.display()
        )));
    }

    pub fn handle_export_failed(&mut self, reason: &str) {
        self.status = Some(StatusMessage::error(&format!("Export failed: {reason}")));
    }

    pub fn open_viewer(&mut self) {
        if let Some(session) = self.sessions.active() {
            self.viewer.open(0, session.pages.len());
        }
    }

    pub fn viewer_next(&mut self) {
        if let Some(session) = self.sessions.active() {
            self.viewer.next(session.pages.len());
        }
    }

    pub fn viewer_prev(&mut self) {
        if let Some(session) = self.sessions.active() {
            self.viewer.prev(session.pages.len());
        }
    }

    pub fn toggle_page_count(&mut self) {
        self.page_count = self.page_count.toggle();
    }

    /// Cycles through the example story ideas, one per call.
    pub fn next_example(&mut self) -> &'static str {
        let prompts = example_prompts();
        let prompt = prompts[self.example_cursor % prompts.len()];
        self.example_cursor += 1;

        return prompt;
    }
}
