use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::public::home::{
    home_router, HomePage, HomePageService, HomePageStore, HomePageStoreError, HomeSection,
    OurWorkItem, PageLink, PromotedSet,
};
use crate::public::pages::{CatalogError, CatalogPage, PageCatalog, PageId, PageKind, PageQuery};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
}

pub(super) fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub(super) fn page(id: u64, kind: PageKind, deadline: Option<NaiveDate>) -> CatalogPage {
    CatalogPage {
        id: PageId(id),
        kind,
        title: format!("{} {id}", kind.label()),
        url_path: format!("/{}/{id}/", kind.segment()),
        live: true,
        public: true,
        deadline,
        accepting_applications: true,
    }
}

pub(super) fn fund(id: u64, deadline_in_days: Option<i64>) -> CatalogPage {
    page(id, PageKind::Fund, deadline_in_days.map(days_from_today))
}

pub(super) fn draft(mut page: CatalogPage) -> CatalogPage {
    page.live = false;
    page
}

pub(super) fn restricted(mut page: CatalogPage) -> CatalogPage {
    page.public = false;
    page
}

pub(super) fn closed(mut page: CatalogPage) -> CatalogPage {
    page.accepting_applications = false;
    page
}

pub(super) fn promoted(ids: &[u64]) -> PromotedSet {
    PromotedSet::from_pages(ids.iter().copied().map(PageId)).expect("unique promotions")
}

pub(super) fn ids(values: &[u64]) -> Vec<PageId> {
    values.iter().copied().map(PageId).collect()
}

/// Catalog fixture returning pages in insertion order and counting queries.
#[derive(Default)]
pub(super) struct MemoryCatalog {
    pages: Vec<CatalogPage>,
    queries: Mutex<Vec<PageQuery>>,
}

impl MemoryCatalog {
    pub(super) fn with_pages(pages: Vec<CatalogPage>) -> Self {
        Self {
            pages,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn query_count(&self) -> usize {
        self.queries.lock().expect("catalog mutex poisoned").len()
    }
}

impl PageCatalog for MemoryCatalog {
    fn query(&self, query: &PageQuery) -> Result<Vec<CatalogPage>, CatalogError> {
        self.queries
            .lock()
            .expect("catalog mutex poisoned")
            .push(query.clone());
        Ok(self
            .pages
            .iter()
            .filter(|page| query.matches(page))
            .cloned()
            .collect())
    }

    fn fetch(&self, id: PageId) -> Result<Option<CatalogPage>, CatalogError> {
        Ok(self.pages.iter().find(|page| page.id == id).cloned())
    }
}

pub(super) struct OfflineCatalog;

impl PageCatalog for OfflineCatalog {
    fn query(&self, _query: &PageQuery) -> Result<Vec<CatalogPage>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: PageId) -> Result<Option<CatalogPage>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryHomeStore {
    page: Mutex<Option<HomePage>>,
}

impl MemoryHomeStore {
    pub(super) fn with_page(page: HomePage) -> Self {
        Self {
            page: Mutex::new(Some(page)),
        }
    }

    pub(super) fn current(&self) -> Option<HomePage> {
        self.page.lock().expect("store mutex poisoned").clone()
    }
}

impl HomePageStore for MemoryHomeStore {
    fn load(&self) -> Result<Option<HomePage>, HomePageStoreError> {
        Ok(self.current())
    }

    fn set_promoted(
        &self,
        kind: PageKind,
        promoted: PromotedSet,
    ) -> Result<bool, HomePageStoreError> {
        let mut guard = self.page.lock().expect("store mutex poisoned");
        match guard.as_mut() {
            Some(page) => {
                page.set_promoted(kind, promoted);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub(super) fn home_page() -> HomePage {
    HomePage {
        title: "Open Technology Fund".to_string(),
        strapline: "Supporting open and accessible internet technologies".to_string(),
        strapline_link: PageLink {
            page: PageId(900),
            text: "About us".to_string(),
        },
        our_work_title: "Our work".to_string(),
        our_work: vec![OurWorkItem {
            title: "Circumvention".to_string(),
            description: "Tools that keep the internet reachable.".to_string(),
            link: None,
        }],
        our_work_link: PageLink {
            page: PageId(901),
            text: "See our impact".to_string(),
        },
        funds: HomeSection {
            title: "Funds".to_string(),
            intro: "Open calls for proposals.".to_string(),
            link: Some(PageLink {
                page: PageId(902),
                text: "All funds".to_string(),
            }),
        },
        labs: HomeSection {
            title: "Labs".to_string(),
            intro: String::new(),
            link: Some(PageLink {
                page: PageId(903),
                text: "All labs".to_string(),
            }),
        },
        rfps: HomeSection {
            title: "Requests for proposals".to_string(),
            intro: String::new(),
            link: None,
        },
        promoted_funds: PromotedSet::default(),
        promoted_labs: PromotedSet::default(),
        promoted_rfps: PromotedSet::default(),
    }
}

/// Mixed catalog: funds 1-8, labs 20-22, RFPs 30-31.
pub(super) fn site_catalog() -> Vec<CatalogPage> {
    vec![
        fund(1, Some(30)),
        fund(2, Some(5)),
        draft(fund(3, Some(1))),
        fund(4, None),
        closed(fund(5, Some(2))),
        fund(6, Some(-3)),
        fund(7, Some(12)),
        fund(8, Some(60)),
        page(20, PageKind::Lab, None),
        page(21, PageKind::Lab, None),
        restricted(page(22, PageKind::Lab, None)),
        page(30, PageKind::Rfp, Some(days_from_today(14))),
        page(31, PageKind::Rfp, Some(days_from_today(7))),
    ]
}

pub(super) fn build_service(
    home: HomePage,
) -> (
    HomePageService<MemoryHomeStore, MemoryCatalog>,
    Arc<MemoryHomeStore>,
) {
    let store = Arc::new(MemoryHomeStore::with_page(home));
    let catalog = Arc::new(MemoryCatalog::with_pages(site_catalog()));
    let service = HomePageService::new(store.clone(), catalog, 6);
    (service, store)
}

pub(super) fn router_with_service(
    service: HomePageService<MemoryHomeStore, MemoryCatalog>,
) -> axum::Router {
    home_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
