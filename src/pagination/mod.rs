//! Pagination module
//!
//! Supports: `next_page` objects (`uri`, or `path` + `offset`), bare next URLs
//!
//! # Overview
//!
//! A page response is a JSON object with an items array and a next page
//! field. [`PageResponse::from_value`] validates that shape and
//! [`next_page`] turns the continuation token into the request for the
//! following page.

mod resolver;
mod types;

pub use resolver::next_page;
pub use types::{NextPage, PageResponse, PageShape};

#[cfg(test)]
mod tests;
