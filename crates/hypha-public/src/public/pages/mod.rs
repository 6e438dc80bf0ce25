//! Fund, lab and RFP pages as seen by the public site.

pub mod catalog;
pub mod domain;

pub use catalog::{CatalogError, PageCatalog, PageQuery};
pub use domain::{CatalogPage, PageId, PageKind};
