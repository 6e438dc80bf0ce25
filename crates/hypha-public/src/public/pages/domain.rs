use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for CMS pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// Catalog page subtypes that can be promoted on the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Fund,
    Lab,
    Rfp,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::Fund, PageKind::Lab, PageKind::Rfp];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fund => "Fund",
            Self::Lab => "Lab",
            Self::Rfp => "RFP",
        }
    }

    /// Plural URL segment used by the API and CLI (`funds`, `labs`, `rfps`).
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Fund => "funds",
            Self::Lab => "labs",
            Self::Rfp => "rfps",
        }
    }

    pub fn from_segment(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "funds" | "fund" => Some(Self::Fund),
            "labs" | "lab" => Some(Self::Lab),
            "rfps" | "rfp" => Some(Self::Rfp),
            _ => None,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fund, lab or RFP page as exposed by the CMS page tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub id: PageId,
    pub kind: PageKind,
    pub title: String,
    pub url_path: String,
    /// Published.
    pub live: bool,
    /// Not behind a view restriction.
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Whether a round or call is currently taking submissions.
    #[serde(default = "default_accepting")]
    pub accepting_applications: bool,
}

fn default_accepting() -> bool {
    true
}

impl CatalogPage {
    /// A page is open while it accepts applications and its deadline, if any, has not passed.
    pub fn is_open(&self, today: NaiveDate) -> bool {
        self.accepting_applications && self.deadline.map_or(true, |deadline| deadline >= today)
    }

    /// Sort key treating a missing deadline as the latest possible date.
    pub fn deadline_key(&self) -> NaiveDate {
        self.deadline.unwrap_or(NaiveDate::MAX)
    }
}
