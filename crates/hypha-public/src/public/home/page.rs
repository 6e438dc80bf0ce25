use serde::{Deserialize, Serialize};

use super::promoted::PromotedSet;
use super::resolver::ResolvedList;
use crate::public::pages::{PageId, PageKind};

/// Link to another page in the tree with its call-to-action text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: PageId,
    pub text: String,
}

/// One entry of the "our work" block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OurWorkItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<PageLink>,
}

/// Heading block for the funds, labs and RFPs sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSection {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<PageLink>,
}

/// Editable homepage content, including the curated promotions for each section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    pub title: String,
    #[serde(default)]
    pub strapline: String,
    pub strapline_link: PageLink,
    pub our_work_title: String,
    #[serde(default)]
    pub our_work: Vec<OurWorkItem>,
    pub our_work_link: PageLink,
    pub funds: HomeSection,
    pub labs: HomeSection,
    pub rfps: HomeSection,
    #[serde(default)]
    pub promoted_funds: PromotedSet,
    #[serde(default)]
    pub promoted_labs: PromotedSet,
    #[serde(default)]
    pub promoted_rfps: PromotedSet,
}

impl HomePage {
    pub fn promoted(&self, kind: PageKind) -> &PromotedSet {
        match kind {
            PageKind::Fund => &self.promoted_funds,
            PageKind::Lab => &self.promoted_labs,
            PageKind::Rfp => &self.promoted_rfps,
        }
    }

    pub fn set_promoted(&mut self, kind: PageKind, promoted: PromotedSet) {
        match kind {
            PageKind::Fund => self.promoted_funds = promoted,
            PageKind::Lab => self.promoted_labs = promoted,
            PageKind::Rfp => self.promoted_rfps = promoted,
        }
    }
}

/// Render context handed to the homepage template.
#[derive(Debug, Clone, Serialize)]
pub struct HomePageContext {
    pub title: String,
    pub strapline: String,
    pub strapline_link: PageLink,
    pub our_work_title: String,
    pub our_work: Vec<OurWorkItem>,
    pub our_work_link: PageLink,
    pub funds: HomeSection,
    pub labs: HomeSection,
    pub rfps: HomeSection,
    pub lab_list: ResolvedList,
    pub fund_list: ResolvedList,
    pub rfps_list: ResolvedList,
}
