#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback rendered above the prompt input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: &str) -> StatusMessage {
        return StatusMessage {
            kind: StatusKind::Info,
            text: text.to_string(),
        };
    }

    pub fn error(text: &str) -> StatusMessage {
        return StatusMessage {
            kind: StatusKind::Error,
            text: text.to_string(),
        };
    }
}
