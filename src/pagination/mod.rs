//! Pagination module
//!
//! Supports: structured (`meta` object) and flat (inlined or absent) page
//! metadata, page-number based.
//!
//! # Overview
//!
//! A [`Paginator`] walks any list endpoint through a [`PageFetcher`], either
//! one page at a time ([`Paginator::next_page`]) or as a lazy stream of items
//! ([`Paginator::items`]). Where the page metadata lives is decided per
//! endpoint by a [`PageShape`]; the traversal logic is the same for both.
//!
//! A listing ends on an empty page, on an explicit `has_more: false`, when
//! `total_pages`/`total_results` say so, or (when the server reports none of
//! these) on a page shorter than the requested size. A full page without
//! totals is followed by one more fetch to confirm the end.

mod fetcher;
mod page;
mod paginator;
mod shape;

pub use fetcher::PageFetcher;
pub use page::{
    Page, PageMeta, PageRequest, DEFAULT_PAGE_SIZE, PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM,
};
pub use paginator::{PaginationState, Paginator};
pub use shape::{FlatPagination, PageShape, StructuredPagination, DATA_FIELD, META_FIELD};
