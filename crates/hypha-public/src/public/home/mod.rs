//! Homepage content and the related funds, labs and RFPs shown beneath it.

pub mod page;
pub mod promoted;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use page::{HomePage, HomePageContext, HomeSection, OurWorkItem, PageLink};
pub use promoted::{PromotedRelation, PromotedSet, PromotionError};
pub use repository::{HomePageStore, HomePageStoreError};
pub use resolver::{
    EntrySource, RelatedContentResolver, ResolvedEntry, ResolvedList, DEFAULT_RELATED_LIMIT,
};
pub use router::home_router;
pub use service::{HomePageService, HomePageServiceError};
