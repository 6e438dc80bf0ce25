use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::promoted::PromotedSet;
use crate::public::pages::{CatalogError, CatalogPage, PageCatalog, PageId, PageKind, PageQuery};

/// Number of related items the homepage shows per section.
pub const DEFAULT_RELATED_LIMIT: usize = 6;

/// Where a resolved entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Promoted,
    Backfill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    #[serde(flatten)]
    pub page: CatalogPage,
    pub source: EntrySource,
}

/// Display list for one homepage section: promoted pages first, then backfill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedList {
    pub kind: PageKind,
    pub entries: Vec<ResolvedEntry>,
}

impl ResolvedList {
    pub fn pages(&self) -> impl Iterator<Item = &CatalogPage> + '_ {
        self.entries.iter().map(|entry| &entry.page)
    }

    pub fn page_ids(&self) -> Vec<PageId> {
        self.pages().map(|page| page.id).collect()
    }

    pub fn promoted_count(&self) -> usize {
        self.count(EntrySource::Promoted)
    }

    pub fn backfill_count(&self) -> usize {
        self.count(EntrySource::Backfill)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, source: EntrySource) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.source == source)
            .count()
    }
}

/// Picks the funds, labs or RFPs shown in a homepage section.
///
/// Promoted pages that are still live and public are always shown, in curation
/// order, and are never truncated. Any remaining slots up to the limit are
/// filled with open pages from the catalog, earliest deadline first.
pub struct RelatedContentResolver<C> {
    catalog: Arc<C>,
    limit: usize,
}

impl<C> RelatedContentResolver<C>
where
    C: PageCatalog + 'static,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_limit(catalog, DEFAULT_RELATED_LIMIT)
    }

    pub fn with_limit(catalog: Arc<C>, limit: usize) -> Self {
        Self { catalog, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn resolve(
        &self,
        kind: PageKind,
        promoted: &PromotedSet,
        today: NaiveDate,
    ) -> Result<ResolvedList, CatalogError> {
        let promoted_pages = self.promoted(kind, promoted)?;
        let selected: Vec<PageId> = promoted_pages.iter().map(|page| page.id).collect();
        let extra_needed = self.limit.saturating_sub(selected.len());

        let mut entries: Vec<ResolvedEntry> = promoted_pages
            .into_iter()
            .map(|page| ResolvedEntry {
                page,
                source: EntrySource::Promoted,
            })
            .collect();

        if extra_needed > 0 {
            entries.extend(
                self.backfill(kind, &selected, extra_needed, today)?
                    .map(|page| ResolvedEntry {
                        page,
                        source: EntrySource::Backfill,
                    }),
            );
        }

        let list = ResolvedList { kind, entries };
        debug!(
            kind = kind.segment(),
            curated = promoted.len(),
            promoted = list.promoted_count(),
            backfilled = list.backfill_count(),
            "resolved related content"
        );
        Ok(list)
    }

    /// Live, public pages of `kind` from the curated set, in curation order.
    pub fn promoted(
        &self,
        kind: PageKind,
        promoted: &PromotedSet,
    ) -> Result<Vec<CatalogPage>, CatalogError> {
        if promoted.is_empty() {
            return Ok(Vec::new());
        }

        let query = PageQuery::of_kind(kind)
            .only(promoted.page_ids())
            .live()
            .public();
        let mut visible: HashMap<PageId, CatalogPage> = self
            .catalog
            .query(&query)?
            .into_iter()
            .map(|page| (page.id, page))
            .collect();

        Ok(promoted
            .page_ids()
            .filter_map(|id| visible.remove(&id))
            .collect())
    }

    /// Lazily yields up to `extra_needed` open pages of `kind`, excluding `selected`,
    /// ordered by deadline with undated pages last.
    ///
    /// Closed pages are skipped without counting toward `extra_needed`; scanning
    /// stops as soon as enough pages have been yielded.
    pub fn backfill(
        &self,
        kind: PageKind,
        selected: &[PageId],
        extra_needed: usize,
        today: NaiveDate,
    ) -> Result<impl Iterator<Item = CatalogPage>, CatalogError> {
        let query = PageQuery::of_kind(kind)
            .live()
            .public()
            .exclude(selected.iter().copied());
        let mut pool = self.catalog.query(&query)?;
        // stable: equal deadlines keep catalog order
        pool.sort_by_key(CatalogPage::deadline_key);

        Ok(pool
            .into_iter()
            .filter(move |page| page.is_open(today))
            .take(extra_needed))
    }
}
