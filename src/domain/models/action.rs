use super::ComicSession;
use super::GenerationRequest;

pub enum Action {
    ExportSession(ComicSession),
    GenerateComic(GenerationRequest),
}
