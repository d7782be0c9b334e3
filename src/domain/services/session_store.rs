#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use crate::domain::models::ComicSession;
use crate::infrastructure::objects::ObjectStore;

/// Holds the single live comic session for the process. Every replacement
/// goes through `replace`, which is the one place a superseded session's
/// blob URLs get released — taking ownership of the old value first makes
/// the release an exactly-once operation.
#[derive(Default)]
pub struct SessionStore {
    current: Option<ComicSession>,
}

impl SessionStore {
    pub fn active(&self) -> Option<&ComicSession> {
        return self.current.as_ref();
    }

    pub fn replace(&mut self, session: Option<ComicSession>) {
        let previous = self.current.take();
        release_session_blobs(previous);
        self.current = session;
    }

    pub fn clear(&mut self) {
        self.replace(None);
    }
}

fn release_session_blobs(session: Option<ComicSession>) {
    if session.is_none() {
        return;
    }

    let session = session.unwrap();
    let mut released = 0;
    for page in &session.pages {
        if ObjectStore::is_managed(&page.image_url) && ObjectStore::release(&page.image_url) {
            released += 1;
        }
    }

    tracing::debug!(
        session_id = session.id.as_str(),
        released = released,
        "released superseded session blobs"
    );
}
