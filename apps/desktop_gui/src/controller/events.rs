//! Events flowing from the backend worker back to the UI thread.

use shared::protocol::ContentResponse;

/// Decoded RGBA pixels ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(String),
    Content(ContentResponse),
    ThumbnailLoaded { url: String, image: PreviewImage },
    ThumbnailFailed { url: String, reason: String },
}
