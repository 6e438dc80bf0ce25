use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use hypha_public::public::home::{
    PromotedSet, RelatedContentResolver, ResolvedList, DEFAULT_RELATED_LIMIT,
};
use hypha_public::public::pages::{
    CatalogError, CatalogPage, PageCatalog, PageId, PageKind, PageQuery,
};

struct FixtureCatalog(Vec<CatalogPage>);

impl PageCatalog for FixtureCatalog {
    fn query(&self, query: &PageQuery) -> Result<Vec<CatalogPage>, CatalogError> {
        Ok(self.0.iter().filter(|page| query.matches(page)).cloned().collect())
    }

    fn fetch(&self, id: PageId) -> Result<Option<CatalogPage>, CatalogError> {
        Ok(self.0.iter().find(|page| page.id == id).cloned())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date")
}

fn lab(id: u64, deadline_in_days: Option<i64>) -> CatalogPage {
    CatalogPage {
        id: PageId(id),
        kind: PageKind::Lab,
        title: format!("Lab {id}"),
        url_path: format!("/labs/{id}/"),
        live: true,
        public: true,
        deadline: deadline_in_days.map(|days| today() + Duration::days(days)),
        accepting_applications: true,
    }
}

fn resolve(pages: Vec<CatalogPage>, promoted: &[u64]) -> ResolvedList {
    let resolver = RelatedContentResolver::new(Arc::new(FixtureCatalog(pages)));
    let promoted =
        PromotedSet::from_pages(promoted.iter().copied().map(PageId)).expect("unique promotions");
    resolver
        .resolve(PageKind::Lab, &promoted, today())
        .expect("fixture catalog never fails")
}

fn ids(list: &ResolvedList) -> Vec<u64> {
    list.page_ids().into_iter().map(|id| id.0).collect()
}

#[test]
fn two_promotions_and_ten_candidates_fill_six_slots() {
    let mut pages: Vec<CatalogPage> = (1..=10).rev().map(|id| lab(id, Some(id as i64))).collect();
    pages.push(lab(40, None));
    pages.push(lab(41, Some(1)));

    let list = resolve(pages, &[41, 40]);

    assert_eq!(DEFAULT_RELATED_LIMIT, 6);
    assert_eq!(ids(&list), vec![41, 40, 1, 2, 3, 4]);
}

#[test]
fn eight_promotions_are_all_shown() {
    let pages: Vec<CatalogPage> = (1..=12).map(|id| lab(id, None)).collect();

    let list = resolve(pages, &[8, 7, 6, 5, 4, 3, 2, 1]);

    assert_eq!(ids(&list), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(list.backfill_count(), 0);
}

#[test]
fn withdrawn_promotion_is_not_replaced_twice() {
    let mut withdrawn = lab(99, Some(1));
    withdrawn.live = false;
    let mut pages: Vec<CatalogPage> = (1..=8).map(|id| lab(id, Some(id as i64))).collect();
    pages.push(withdrawn);

    let list = resolve(pages, &[99]);

    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(list.promoted_count(), 0);
}

#[test]
fn empty_catalog_yields_empty_list() {
    let list = resolve(Vec::new(), &[1, 2]);
    assert!(list.is_empty());
}

#[test]
fn only_promotions_when_nothing_is_open() {
    let pages = vec![lab(1, None), lab(2, Some(-1)), lab(3, Some(-30))];

    let list = resolve(pages, &[1]);

    assert_eq!(ids(&list), vec![1]);
}
