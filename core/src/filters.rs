//! The canonical filter set and its conversions.
//!
//! # Design
//! `FilterSet` is the one shape every layer agrees on. It is derived from
//! the URL (`from_query`), sent to the endpoint (`query_params`) and used as
//! the cache key. Absent and empty fields are the same thing: `normalized`
//! folds `Some("")` into `None` so structural equality is equality of the
//! present key/value pairs.

use crate::query_state::QueryState;
use crate::types::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

pub const SEARCH_KEY: &str = "search";
pub const CURRENCY_KEY: &str = "currency";
pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "pageSize";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    pub search: Option<String>,
    pub currency: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fold empty strings into absent fields.
    pub fn normalized(self) -> Self {
        Self {
            search: self.search.filter(|s| !s.is_empty()),
            currency: self.currency.filter(|c| !c.is_empty()),
            ..self
        }
    }

    /// Derive the filter set from the address-bar mapping. `page` and
    /// `pageSize` that are not positive integers count as absent.
    pub fn from_query(state: &QueryState) -> Self {
        Self {
            search: state.get(SEARCH_KEY).map(str::to_string),
            currency: state.get(CURRENCY_KEY).map(str::to_string),
            page: parse_positive(state, PAGE_KEY),
            page_size: parse_positive(state, PAGE_SIZE_KEY),
        }
        .normalized()
    }

    /// True when search text or currency is set.
    pub fn is_active(&self) -> bool {
        let set = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        set(&self.search) || set(&self.currency)
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Request parameters in wire order, absent and empty fields omitted.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push((SEARCH_KEY, search.to_string()));
        }
        if let Some(currency) = self.currency.as_deref().filter(|c| !c.is_empty()) {
            params.push((CURRENCY_KEY, currency.to_string()));
        }
        if let Some(page) = self.page {
            params.push((PAGE_KEY, page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push((PAGE_SIZE_KEY, page_size.to_string()));
        }
        params
    }
}

fn parse_positive(state: &QueryState, key: &str) -> Option<u32> {
    let raw = state.get(key)?;
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            log::debug!("ignoring {key}={raw}: not a positive integer");
            None
        }
    }
}
