//! Client-side data layer for the Fleetdesk operations console.
//!
//! Every list screen of the console shares the same data flow: a query
//! (page, page size, filters) is serialized into a GET request, the backend
//! answers with one page of records plus paging metadata, and a compact row
//! of page-selector tokens is derived from that metadata. This crate owns
//! that flow end to end: [`ListView`] drives the fetch lifecycle with
//! last-request-wins semantics, [`HttpSource`] talks to the REST backend,
//! and [`access`] gates protected views by role.

pub mod access;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod services;
pub mod transport;

pub use access::{is_authorized, AccessContext, AccessDecision, AccessGuard, Platform};
pub use errors::FetchError;
pub use models::pagination::{page_tokens, Page, PageMeta, PageToken};
pub use models::query::{ListQuery, PageRequest};
pub use services::list_view::ListView;
pub use transport::{HttpSource, ListSource};
