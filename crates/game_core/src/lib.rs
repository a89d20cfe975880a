use async_trait::async_trait;
use shared::{domain::ContentItem, error::ContentError};

pub mod cards;
pub mod config;
pub mod content;
pub mod coordinator;
pub mod edit;
pub mod position;
pub mod session;
pub mod wikipedia;

pub use config::{load_settings, load_settings_from, Settings, SettingsError};
pub use content::ContentAdapter;
pub use coordinator::{Dispatch, GameCoordinator};
pub use session::GameSession;
pub use wikipedia::WikipediaProvider;

/// Source of encyclopedia articles. Implementations return raw results;
/// thumbnail filtering and retry live in [`ContentAdapter`].
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn random_batch(&self, count: usize) -> Result<Vec<ContentItem>, ContentError>;

    /// Matches for `query`, best match first.
    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, ContentError>;
}

pub struct MissingContentProvider;

#[async_trait]
impl ContentProvider for MissingContentProvider {
    async fn random_batch(&self, _count: usize) -> Result<Vec<ContentItem>, ContentError> {
        Err(ContentError::Unavailable)
    }

    async fn search(&self, _query: &str) -> Result<Vec<ContentItem>, ContentError> {
        Err(ContentError::Unavailable)
    }
}
