//! Site structure for LiSA Docs.
//!
//! This crate provides:
//! - [`RouteNode`]: the hand-authored documentation route tree
//! - [`RouteTable`]: the flattened page list with pagination, section
//!   children and validation derived from the tree
//! - [`build_breadcrumbs`]: breadcrumb trails for documentation slugs
//! - [`Locale`] and [`Dictionaries`]: supported locales and their
//!   translation tables
//!
//! # Quick Start
//!
//! ```
//! use lisa_site::{Dictionaries, Locale, RouteTable, build_breadcrumbs, docs_routes};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = RouteTable::new(docs_routes());
//! let dictionaries = Dictionaries::builtin()?;
//! let dict = dictionaries.get(Locale::En);
//!
//! let pagination = table.pagination("/start-here/connect");
//! assert_eq!(pagination.prev.map(|p| p.href.as_str()), Some("/start-here/requirements"));
//!
//! let trail = build_breadcrumbs("/en/docs", dict.docs_label(), &["start-here", "connect"], dict);
//! assert_eq!(trail.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! The table is computed once and handed to consumers explicitly; nothing in
//! this crate holds global state.

mod breadcrumb;
mod dictionary;
mod locale;
mod route;
mod route_table;

pub use breadcrumb::{BreadcrumbItem, build_breadcrumbs, humanize_key, humanize_segment};
pub use dictionary::{Dictionaries, Dictionary, DictionaryError};
pub use locale::{Locale, LocaleError, localized_path, path_has_locale, switch_locale};
pub use route::{Page, RouteError, RouteNode, docs_routes, load_route_tree, load_routes};
pub use route_table::{NavItem, Pagination, RouteIssue, RouteTable, flatten};
