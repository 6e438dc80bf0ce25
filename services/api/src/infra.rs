use chrono::{Duration, NaiveDate};
use hypha_public::public::home::{
    HomePage, HomePageStore, HomePageStoreError, HomeSection, OurWorkItem, PageLink, PromotedSet,
};
use hypha_public::public::pages::{
    CatalogError, CatalogPage, PageCatalog, PageId, PageKind, PageQuery,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Page tree stand-in keeping pages in the order they were added.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPageCatalog {
    pages: Arc<Mutex<Vec<CatalogPage>>>,
}

impl InMemoryPageCatalog {
    pub(crate) fn with_pages(pages: Vec<CatalogPage>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages)),
        }
    }
}

impl PageCatalog for InMemoryPageCatalog {
    fn query(&self, query: &PageQuery) -> Result<Vec<CatalogPage>, CatalogError> {
        let guard = self.pages.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .filter(|page| query.matches(page))
            .cloned()
            .collect())
    }

    fn fetch(&self, id: PageId) -> Result<Option<CatalogPage>, CatalogError> {
        let guard = self.pages.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|page| page.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHomePageStore {
    page: Arc<Mutex<Option<HomePage>>>,
}

impl InMemoryHomePageStore {
    pub(crate) fn with_page(page: HomePage) -> Self {
        Self {
            page: Arc::new(Mutex::new(Some(page))),
        }
    }
}

impl HomePageStore for InMemoryHomePageStore {
    fn load(&self) -> Result<Option<HomePage>, HomePageStoreError> {
        let guard = self.page.lock().expect("homepage mutex poisoned");
        Ok(guard.clone())
    }

    fn set_promoted(
        &self,
        kind: PageKind,
        promoted: PromotedSet,
    ) -> Result<bool, HomePageStoreError> {
        let mut guard = self.page.lock().expect("homepage mutex poisoned");
        let Some(page) = guard.as_mut() else {
            return Ok(false);
        };
        page.set_promoted(kind, promoted);
        Ok(true)
    }
}

fn seed_page(
    id: u64,
    kind: PageKind,
    title: &str,
    slug: &str,
    deadline: Option<NaiveDate>,
) -> CatalogPage {
    CatalogPage {
        id: PageId(id),
        kind,
        title: title.to_string(),
        url_path: format!("/{}/{slug}/", kind.segment()),
        live: true,
        public: true,
        deadline,
        accepting_applications: true,
    }
}

/// Demo catalog with deadlines relative to `today` so the lists stay interesting.
pub(crate) fn seed_catalog(today: NaiveDate) -> Vec<CatalogPage> {
    let in_days = |days: i64| Some(today + Duration::days(days));

    let mut archived = seed_page(
        5,
        PageKind::Fund,
        "Rapid Response Fund (2019)",
        "rapid-response-2019",
        in_days(-400),
    );
    archived.accepting_applications = false;

    let mut draft = seed_page(
        6,
        PageKind::Fund,
        "Secure Messaging Fund",
        "secure-messaging",
        in_days(45),
    );
    draft.live = false;

    let mut partners_only = seed_page(
        13,
        PageKind::Lab,
        "Partner Security Lab",
        "partner-security",
        None,
    );
    partners_only.public = false;

    vec![
        seed_page(
            1,
            PageKind::Fund,
            "Internet Freedom Fund",
            "internet-freedom",
            in_days(30),
        ),
        seed_page(
            2,
            PageKind::Fund,
            "Core Infrastructure Fund",
            "core-infrastructure",
            in_days(10),
        ),
        seed_page(
            3,
            PageKind::Fund,
            "Technology at Scale Fund",
            "technology-at-scale",
            None,
        ),
        seed_page(
            4,
            PageKind::Fund,
            "Rapid Response Fund",
            "rapid-response",
            None,
        ),
        archived,
        draft,
        seed_page(
            7,
            PageKind::Fund,
            "Digital Integrity Fellowship",
            "digital-integrity-fellowship",
            in_days(3),
        ),
        seed_page(
            8,
            PageKind::Fund,
            "Information Controls Fellowship",
            "information-controls-fellowship",
            in_days(60),
        ),
        seed_page(
            11,
            PageKind::Lab,
            "Security Lab",
            "security-lab",
            None,
        ),
        seed_page(
            12,
            PageKind::Lab,
            "Localization Lab",
            "localization-lab",
            None,
        ),
        partners_only,
        seed_page(
            14,
            PageKind::Lab,
            "Engineering Lab",
            "engineering-lab",
            None,
        ),
        seed_page(
            21,
            PageKind::Rfp,
            "Censorship Measurement Tools",
            "censorship-measurement",
            in_days(21),
        ),
        seed_page(
            22,
            PageKind::Rfp,
            "Usability Audits",
            "usability-audits",
            in_days(-2),
        ),
        seed_page(
            23,
            PageKind::Rfp,
            "Mobile VPN Hardening",
            "mobile-vpn-hardening",
            in_days(7),
        ),
    ]
}

pub(crate) fn seed_home_page() -> HomePage {
    let promoted = |ids: &[u64]| {
        PromotedSet::from_pages(ids.iter().copied().map(PageId)).unwrap_or_default()
    };

    HomePage {
        title: "Home".to_string(),
        strapline: "We support open technologies that counter censorship and surveillance."
            .to_string(),
        strapline_link: PageLink {
            page: PageId(100),
            text: "About".to_string(),
        },
        our_work_title: "Our work".to_string(),
        our_work: vec![
            OurWorkItem {
                title: "Access to the internet".to_string(),
                description: "Circumvention tools used by millions in censored countries."
                    .to_string(),
                link: Some(PageLink {
                    page: PageId(104),
                    text: "Read more".to_string(),
                }),
            },
            OurWorkItem {
                title: "Privacy enhancement".to_string(),
                description: "Secure communications for journalists and activists.".to_string(),
                link: None,
            },
        ],
        our_work_link: PageLink {
            page: PageId(101),
            text: "Explore the projects we support".to_string(),
        },
        funds: HomeSection {
            title: "Funds".to_string(),
            intro: "Apply for support for your project.".to_string(),
            link: Some(PageLink {
                page: PageId(102),
                text: "View all funds".to_string(),
            }),
        },
        labs: HomeSection {
            title: "Labs".to_string(),
            intro: "Free services for the projects we support.".to_string(),
            link: Some(PageLink {
                page: PageId(103),
                text: "View all labs".to_string(),
            }),
        },
        rfps: HomeSection {
            title: "Requests for proposals".to_string(),
            intro: String::new(),
            link: None,
        },
        promoted_funds: promoted(&[4, 6]),
        promoted_labs: promoted(&[12]),
        promoted_rfps: PromotedSet::default(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_kind(raw: &str) -> Result<PageKind, String> {
    PageKind::from_segment(raw).ok_or_else(|| format!("'{raw}' is not one of funds, labs, rfps"))
}
