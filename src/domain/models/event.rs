use std::path;

use tui_textarea::Input;

use super::GenerationRequest;
use super::Page;

pub enum Event {
    ExportComplete(path::PathBuf),
    ExportFailed(String),
    GenerationComplete(GenerationRequest, Vec<Page>),
    GenerationFailed(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLE(),
    KeyboardCTRLO(),
    KeyboardCTRLP(),
    KeyboardCTRLR(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardLeft(),
    KeyboardPaste(String),
    KeyboardRight(),
    KeyboardTab(),
    UITick(),
}
