use super::page::HomePage;
use super::promoted::PromotedSet;
use crate::public::pages::PageKind;

/// Storage abstraction for the site's single homepage.
pub trait HomePageStore: Send + Sync {
    fn load(&self) -> Result<Option<HomePage>, HomePageStoreError>;

    /// Atomically replace one section's promotions, leaving the rest of the page untouched.
    ///
    /// Returns `Ok(false)` when no homepage exists yet.
    fn set_promoted(
        &self,
        kind: PageKind,
        promoted: PromotedSet,
    ) -> Result<bool, HomePageStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HomePageStoreError {
    #[error("homepage store unavailable: {0}")]
    Unavailable(String),
}
