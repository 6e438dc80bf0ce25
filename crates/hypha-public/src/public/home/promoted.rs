use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::public::pages::{PageId, PageKind};

/// Editor-curated link from the homepage to a fund, lab or RFP page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotedRelation {
    pub sort_order: u32,
    pub page: PageId,
}

/// Ordered promotions for one page kind; a page appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PromotedRelation>", into = "Vec<PromotedRelation>")]
pub struct PromotedSet {
    relations: Vec<PromotedRelation>,
}

impl PromotedSet {
    pub fn new(mut relations: Vec<PromotedRelation>) -> Result<Self, PromotionError> {
        let mut seen = HashSet::with_capacity(relations.len());
        for relation in &relations {
            if !seen.insert(relation.page) {
                return Err(PromotionError::Duplicate(relation.page));
            }
        }

        relations.sort_by_key(|relation| relation.sort_order);
        Ok(Self { relations })
    }

    /// Build a set in the given order, numbering `sort_order` by position.
    pub fn from_pages<I>(pages: I) -> Result<Self, PromotionError>
    where
        I: IntoIterator<Item = PageId>,
    {
        let relations = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| PromotedRelation {
                sort_order: index as u32,
                page,
            })
            .collect();
        Self::new(relations)
    }

    /// Page ids in curation order.
    pub fn page_ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.relations.iter().map(|relation| relation.page)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl TryFrom<Vec<PromotedRelation>> for PromotedSet {
    type Error = PromotionError;

    fn try_from(value: Vec<PromotedRelation>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PromotedSet> for Vec<PromotedRelation> {
    fn from(value: PromotedSet) -> Self {
        value.relations
    }
}

/// Reasons a curated promotion list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromotionError {
    #[error("{0} is promoted more than once")]
    Duplicate(PageId),
    #[error("{0} does not exist")]
    UnknownPage(PageId),
    #[error("{given} pages promoted, at most {limit} allowed")]
    TooMany { limit: usize, given: usize },
    #[error("{page} is a {actual} page, expected {expected}")]
    WrongKind {
        page: PageId,
        expected: PageKind,
        actual: PageKind,
    },
}
