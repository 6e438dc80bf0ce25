use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::page::{HomePage, HomePageContext};
use super::promoted::{PromotedSet, PromotionError};
use super::repository::{HomePageStore, HomePageStoreError};
use super::resolver::{RelatedContentResolver, ResolvedList};
use crate::public::pages::{CatalogError, PageCatalog, PageId, PageKind};

/// Service composing the homepage store, the page catalog, and the related-content resolver.
pub struct HomePageService<S, C> {
    store: Arc<S>,
    catalog: Arc<C>,
    resolver: RelatedContentResolver<C>,
}

impl<S, C> HomePageService<S, C>
where
    S: HomePageStore + 'static,
    C: PageCatalog + 'static,
{
    pub fn new(store: Arc<S>, catalog: Arc<C>, related_limit: usize) -> Self {
        let resolver = RelatedContentResolver::with_limit(catalog.clone(), related_limit);
        Self {
            store,
            catalog,
            resolver,
        }
    }

    /// Load the homepage and resolve the lab, fund and RFP lists for rendering.
    pub fn context(&self, today: NaiveDate) -> Result<HomePageContext, HomePageServiceError> {
        let page = self.home_page()?;

        let lab_list = self
            .resolver
            .resolve(PageKind::Lab, &page.promoted_labs, today)?;
        let fund_list = self
            .resolver
            .resolve(PageKind::Fund, &page.promoted_funds, today)?;
        let rfps_list = self
            .resolver
            .resolve(PageKind::Rfp, &page.promoted_rfps, today)?;

        let HomePage {
            title,
            strapline,
            strapline_link,
            our_work_title,
            our_work,
            our_work_link,
            funds,
            labs,
            rfps,
            ..
        } = page;

        Ok(HomePageContext {
            title,
            strapline,
            strapline_link,
            our_work_title,
            our_work,
            our_work_link,
            funds,
            labs,
            rfps,
            lab_list,
            fund_list,
            rfps_list,
        })
    }

    /// Resolve a single homepage section.
    pub fn related(
        &self,
        kind: PageKind,
        today: NaiveDate,
    ) -> Result<ResolvedList, HomePageServiceError> {
        let page = self.home_page()?;
        Ok(self.resolver.resolve(kind, page.promoted(kind), today)?)
    }

    /// Replace the curated promotions for `kind` after checking every page exists and matches.
    ///
    /// At most `limit` pages may be curated. Unpublished or restricted pages are accepted
    /// here; they are dropped when resolving.
    pub fn replace_promoted(
        &self,
        kind: PageKind,
        pages: Vec<PageId>,
    ) -> Result<PromotedSet, HomePageServiceError> {
        let promoted = PromotedSet::from_pages(pages)?;
        let limit = self.resolver.limit();
        if promoted.len() > limit {
            return Err(PromotionError::TooMany {
                limit,
                given: promoted.len(),
            }
            .into());
        }

        for id in promoted.page_ids() {
            let page = self
                .catalog
                .fetch(id)?
                .ok_or(PromotionError::UnknownPage(id))?;
            if page.kind != kind {
                return Err(PromotionError::WrongKind {
                    page: id,
                    expected: kind,
                    actual: page.kind,
                }
                .into());
            }
        }

        if !self.store.set_promoted(kind, promoted.clone())? {
            return Err(HomePageServiceError::MissingHomePage);
        }

        info!(
            kind = kind.segment(),
            promoted = promoted.len(),
            "updated homepage promotions"
        );
        Ok(promoted)
    }

    fn home_page(&self) -> Result<HomePage, HomePageServiceError> {
        self.store
            .load()?
            .ok_or(HomePageServiceError::MissingHomePage)
    }
}

/// Error raised by the homepage service.
#[derive(Debug, thiserror::Error)]
pub enum HomePageServiceError {
    #[error("homepage has not been created")]
    MissingHomePage,
    #[error(transparent)]
    Promotion(#[from] PromotionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] HomePageStoreError),
}
