#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Exporter;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::ComicSession;
use crate::domain::models::Event;
use crate::domain::models::GenerationRequest;

async fn generate_comic(
    backend: Arc<dyn Backend + Send + Sync>,
    request: GenerationRequest,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match backend.generate(request.clone()).await {
        Ok(pages) => {
            tx.send(Event::GenerationComplete(request, pages))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, story_idea = request.story_idea.as_str(), "comic generation failed");
            tx.send(Event::GenerationFailed(format!("{err}")))?;
        }
    }

    return Ok(());
}

async fn export_session(session: ComicSession, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    match Exporter::default().export(&session).await {
        Ok(Some(file_path)) => {
            tx.send(Event::ExportComplete(file_path))?;
        }
        Ok(None) => (),
        Err(err) => {
            tracing::error!(error = ?err, session_id = session.id.as_str(), "session export failed");
            tx.send(Event::ExportFailed(format!("{err}")))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Drains the action channel for the lifetime of the UI. Generation
    /// runs on its own task so exports stay responsive; overlap is
    /// prevented upstream by the busy guard, not here.
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend: Arc<dyn Backend + Send + Sync> = Arc::from(backend);

        while let Some(action) = rx.recv().await {
            match action {
                Action::GenerateComic(request) => {
                    let worker_backend = backend.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        return generate_comic(worker_backend, request, &worker_tx).await;
                    });
                }
                Action::ExportSession(session) => {
                    export_session(session, &tx).await?;
                }
            }
        }

        return Ok(());
    }
}
