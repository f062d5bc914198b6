//! The payments screen as a state machine.
//!
//! # Design
//! `PaymentsView` wires the URL store to the query cache. The URL is the
//! canonical filter state: every render re-derives the `FilterSet` from it
//! and looks that exact key up in the cache, so what is shown always
//! matches the address bar regardless of the order in which fetches
//! complete. Filter commits reset paging to page 1; page changes carry the
//! other filters forward untouched.

use crate::client::PaymentsClient;
use crate::error::QueryResult;
use crate::filter_bar::FilterBar;
use crate::filters::{FilterSet, CURRENCY_KEY, PAGE_KEY, SEARCH_KEY};
use crate::http::{HttpResponse, Transport, TransportError};
use crate::messages;
use crate::navigation::NavigationPort;
use crate::pagination::Pagination;
use crate::query::{FetchTicket, Lookup, PaymentsQueryClient};
use crate::query_state::QueryUpdate;
use crate::types::Payment;
use crate::url_store::UrlQueryStore;

#[derive(Debug)]
pub enum ViewState {
    /// Waiting on the first result for the current filters. `ticket` is
    /// set when this render is the one that must perform the fetch.
    Loading { ticket: Option<FetchTicket> },
    /// Shown in an alert region. Filters and page are left as they are.
    Error { message: String },
    /// The request succeeded but the page holds no rows.
    Empty {
        message: &'static str,
        pagination: Pagination,
    },
    Success {
        payments: Vec<Payment>,
        pagination: Pagination,
    },
}

pub struct PaymentsView<N: NavigationPort> {
    store: UrlQueryStore<N>,
    query: PaymentsQueryClient,
}

impl<N: NavigationPort> PaymentsView<N> {
    pub fn mount(port: N, client: PaymentsClient) -> Self {
        Self {
            store: UrlQueryStore::new(port),
            query: PaymentsQueryClient::new(client),
        }
    }

    /// Canonical filters, straight from the URL. A missing `page` stays
    /// missing here; the endpoint and the pagination treat it as page 1.
    pub fn filters(&self) -> FilterSet {
        FilterSet::from_query(&self.store.get())
    }

    /// A filter bar seeded from the current URL.
    pub fn filter_bar(&self) -> FilterBar {
        FilterBar::new(&self.filters())
    }

    pub fn render(&self) -> ViewState {
        let filters = self.filters();
        match self.query.lookup(&filters) {
            Lookup::Fetch(ticket) => ViewState::Loading {
                ticket: Some(ticket),
            },
            Lookup::InFlight => ViewState::Loading { ticket: None },
            Lookup::Ready(result) => settled(&filters, result),
        }
    }

    /// Hand back the outcome of a ticket obtained from `render`.
    ///
    /// The result is cached under the ticket's key; the next render shows it
    /// only if that key is still the one in the URL.
    pub fn resolve(
        &self,
        ticket: FetchTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> QueryResult {
        self.query.resolve(ticket, outcome)
    }

    /// Render, and if this render owns the fetch, perform it and settle.
    pub fn run<T: Transport>(&self, transport: &T) -> ViewState {
        match self.render() {
            ViewState::Loading {
                ticket: Some(ticket),
            } => {
                let filters = ticket.key().clone();
                let outcome = transport.execute(ticket.request());
                settled(&filters, self.resolve(ticket, outcome))
            }
            state => state,
        }
    }

    /// Commit search and currency, always going back to page 1.
    pub fn on_filter(&self, committed: &FilterSet) {
        self.store.set(
            QueryUpdate::new()
                .with(SEARCH_KEY, committed.search.clone())
                .with(CURRENCY_KEY, committed.currency.clone())
                .with(PAGE_KEY, 1u32),
        );
    }

    pub fn submit_filters(&self, bar: &mut FilterBar) {
        let committed = bar.submit();
        self.on_filter(&committed);
    }

    pub fn clear_filters(&self, bar: &mut FilterBar) {
        let committed = bar.clear();
        self.on_filter(&committed);
    }

    /// Move to `page`, keeping every other key in the URL.
    pub fn on_page_change(&self, page: u32) {
        self.store.set(QueryUpdate::new().with(PAGE_KEY, page));
    }

    /// Drop the cached result for the current filters so the next render
    /// fetches again.
    pub fn refetch(&self) -> bool {
        self.query.invalidate(&self.filters())
    }

    pub fn store(&self) -> &UrlQueryStore<N> {
        &self.store
    }

    pub fn query(&self) -> &PaymentsQueryClient {
        &self.query
    }
}

fn settled(filters: &FilterSet, result: QueryResult) -> ViewState {
    match result {
        Err(e) => ViewState::Error { message: e.message },
        Ok(page) => {
            let pagination = Pagination::new(filters.page_or_default(), page.total, page.page_size);
            if page.payments.is_empty() {
                ViewState::Empty {
                    message: messages::NO_RESULTS,
                    pagination,
                }
            } else {
                ViewState::Success {
                    payments: page.payments,
                    pagination,
                }
            }
        }
    }
}
