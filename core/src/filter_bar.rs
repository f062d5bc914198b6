//! Search/currency form with staged edits.
//!
//! # Design
//! Edits only touch the draft. `submit` and `clear` return the filter set
//! to commit; the caller decides what committing means (the view merges it
//! into the URL). Nothing here fetches. Siblings must never read the draft
//! as canonical state.

use crate::filters::FilterSet;
use crate::messages;
use crate::types::{Currency, UnknownCurrency};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBar {
    draft: FilterSet,
    committed: FilterSet,
}

impl FilterBar {
    /// Seed the draft from the canonical search and currency.
    pub fn new(defaults: &FilterSet) -> Self {
        let seed = FilterSet {
            search: defaults.search.clone(),
            currency: defaults.currency.clone(),
            ..FilterSet::default()
        };
        Self {
            draft: seed.clone(),
            committed: seed,
        }
    }

    pub fn draft(&self) -> &FilterSet {
        &self.draft
    }

    pub fn search_text(&self) -> &str {
        self.draft.search.as_deref().unwrap_or_default()
    }

    pub fn selected_currency(&self) -> &str {
        self.draft.currency.as_deref().unwrap_or_default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.draft.search = Some(search.into());
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.draft.currency = Some(currency.into());
    }

    /// Pick a currency by its code. An empty code selects every currency;
    /// an unknown one leaves the draft untouched.
    pub fn select_currency(&mut self, code: &str) -> Result<Option<Currency>, UnknownCurrency> {
        if code.is_empty() {
            self.draft.currency = None;
            return Ok(None);
        }
        let currency: Currency = code.parse()?;
        self.draft.currency = Some(currency.code().to_string());
        Ok(Some(currency))
    }

    /// Currency codes offered by the selector.
    pub fn currency_options(&self) -> impl Iterator<Item = &'static str> {
        Currency::ALL.into_iter().map(Currency::code)
    }

    /// Promote the draft. The returned set is what the caller commits.
    pub fn submit(&mut self) -> FilterSet {
        self.committed = self.draft.clone();
        log::debug!("filter bar submitted {:?}", self.committed);
        self.draft.clone()
    }

    /// Reset the draft to empty and commit the empty set.
    pub fn clear(&mut self) -> FilterSet {
        self.draft = FilterSet::default();
        self.committed = FilterSet::default();
        FilterSet::default()
    }

    /// Whether the last committed set had a search or currency.
    pub fn is_filter_active(&self) -> bool {
        self.committed.is_active()
    }

    /// The clear button is only offered while a filter is active.
    pub fn shows_clear(&self) -> bool {
        self.is_filter_active()
    }

    pub fn submit_label(&self) -> &'static str {
        messages::SEARCH_BUTTON
    }

    pub fn clear_label(&self) -> Option<&'static str> {
        self.shows_clear().then_some(messages::CLEAR_FILTERS)
    }
}
