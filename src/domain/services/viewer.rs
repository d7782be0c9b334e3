#[cfg(test)]
#[path = "viewer_test.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

/// Modal page viewer over the active session's pages. Navigation is
/// cyclic; the index is only meaningful while a session with at least one
/// page exists.
#[derive(Default)]
pub struct Viewer {
    state: ViewerState,
}

impl Viewer {
    pub fn state(&self) -> ViewerState {
        return self.state;
    }

    pub fn is_open(&self) -> bool {
        return matches!(self.state, ViewerState::Open { .. });
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            ViewerState::Open { index } => return Some(index),
            ViewerState::Closed => return None,
        }
    }

    /// Opens on the requested page. Invalid without pages; the index is
    /// clamped into range rather than rejected.
    pub fn open(&mut self, requested_index: usize, page_total: usize) -> bool {
        if page_total == 0 {
            return false;
        }

        self.state = ViewerState::Open {
            index: requested_index.min(page_total - 1),
        };
        return true;
    }

    pub fn next(&mut self, page_total: usize) {
        if page_total <= 1 {
            return;
        }

        if let ViewerState::Open { index } = self.state {
            self.state = ViewerState::Open {
                index: (index + 1) % page_total,
            };
        }
    }

    pub fn prev(&mut self, page_total: usize) {
        if page_total <= 1 {
            return;
        }

        if let ViewerState::Open { index } = self.state {
            self.state = ViewerState::Open {
                index: (index + page_total - 1) % page_total,
            };
        }
    }

    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
    }

    /// Reconciles the viewer with the session it points into: no session
    /// (or no pages) forces it closed, an out-of-range index resets to the
    /// first page while staying open.
    pub fn sync(&mut self, page_total: Option<usize>) {
        let total = page_total.unwrap_or(0);
        if total == 0 {
            self.state = ViewerState::Closed;
            return;
        }

        if let ViewerState::Open { index } = self.state {
            if index >= total {
                self.state = ViewerState::Open { index: 0 };
            }
        }
    }
}
