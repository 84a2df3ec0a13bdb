//! Listing-page scraping: fetching, headline extraction and pagination.
//!
//! A request flows through three stages:
//!
//! 1. **Fetching** ([`fetcher`]): download `url?page=N` with a browser
//!    User-Agent; non-2xx responses are failures
//! 2. **Extraction** ([`extractor`]): locate headline/link pairs in the HTML
//!    with tiered heuristics
//! 3. **Aggregation** ([`pagination`]): sweep a small window of pages and cap
//!    the collected articles
//!
//! Failed pages are logged and counted as empty; nothing in this module
//! returns an error to the caller.

pub mod extractor;
pub mod fetcher;
pub mod pagination;
