use std::collections::BTreeSet;

use super::domain::{CatalogPage, PageId, PageKind};

/// Composable filter over catalog pages, mirroring the page tree's queryset API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    kind: PageKind,
    live_only: bool,
    public_only: bool,
    only: Option<BTreeSet<PageId>>,
    excluded: BTreeSet<PageId>,
}

impl PageQuery {
    pub fn of_kind(kind: PageKind) -> Self {
        Self {
            kind,
            live_only: false,
            public_only: false,
            only: None,
            excluded: BTreeSet::new(),
        }
    }

    pub fn live(mut self) -> Self {
        self.live_only = true;
        self
    }

    pub fn public(mut self) -> Self {
        self.public_only = true;
        self
    }

    /// Restrict to the given ids. Calling it twice narrows to the intersection.
    pub fn only<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = PageId>,
    {
        let ids: BTreeSet<PageId> = ids.into_iter().collect();
        self.only = Some(match self.only.take() {
            Some(existing) => existing.intersection(&ids).copied().collect(),
            None => ids,
        });
        self
    }

    pub fn exclude<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = PageId>,
    {
        self.excluded.extend(ids);
        self
    }

    pub fn matches(&self, page: &CatalogPage) -> bool {
        page.kind == self.kind
            && (!self.live_only || page.live)
            && (!self.public_only || page.public)
            && self.only.as_ref().map_or(true, |ids| ids.contains(&page.id))
            && !self.excluded.contains(&page.id)
    }
}

/// Storage abstraction over the CMS page tree so resolution can run against fixtures.
///
/// Implementations return matching pages in catalog order (the order pages were
/// added to the tree); callers rely on that order for stable tie-breaking.
pub trait PageCatalog: Send + Sync {
    fn query(&self, query: &PageQuery) -> Result<Vec<CatalogPage>, CatalogError>;
    fn fetch(&self, id: PageId) -> Result<Option<CatalogPage>, CatalogError>;
}

/// Error enumeration for catalog failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("page catalog unavailable: {0}")]
    Unavailable(String),
}
