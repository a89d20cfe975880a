//! Backend commands queued from UI to backend worker.

use shared::protocol::ContentRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Content(ContentRequest),
    FetchThumbnail { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Content(ContentRequest::Round { .. }) => "content_round",
            BackendCommand::Content(ContentRequest::Reroll { .. }) => "content_reroll",
            BackendCommand::Content(ContentRequest::Search { .. }) => "content_search",
            BackendCommand::FetchThumbnail { .. } => "fetch_thumbnail",
        }
    }
}
