use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Page;
use crate::domain::models::PageCount;

struct StubBackend {
    fail: bool,
}

#[async_trait]
impl Backend for StubBackend {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Page>> {
        if self.fail {
            bail!("stub backend exploded");
        }

        let pages = (1..=request.page_count.as_usize())
            .map(|number| {
                return Page::new(
                    number,
                    &format!("https://example.com/page-{number}.png"),
                    None,
                );
            })
            .collect();

        return Ok(pages);
    }
}

#[tokio::test]
async fn it_turns_generated_pages_into_events() -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let request = GenerationRequest::new("A tomato plant in space", PageCount::Two);
    action_tx.send(Action::GenerateComic(request))?;
    drop(action_tx);

    ActionsService::start(Box::new(StubBackend { fail: false }), event_tx, &mut action_rx).await?;

    match event_rx.recv().await.unwrap() {
        Event::GenerationComplete(request, pages) => {
            assert_eq!(request.story_idea, "A tomato plant in space");
            assert_eq!(pages.len(), 2);
        }
        _ => bail!("Wrong event type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_turns_generation_errors_into_events() -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let request = GenerationRequest::new("A tomato plant in space", PageCount::One);
    action_tx.send(Action::GenerateComic(request))?;
    drop(action_tx);

    ActionsService::start(Box::new(StubBackend { fail: true }), event_tx, &mut action_rx).await?;

    match event_rx.recv().await.unwrap() {
        Event::GenerationFailed(reason) => {
            assert!(reason.contains("stub backend exploded"));
        }
        _ => bail!("Wrong event type from recv"),
    }

    return Ok(());
}
