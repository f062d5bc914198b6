//! Single-flight, keyed cache of payment pages.
//!
//! # Design
//! The cache is keyed by the normalized `FilterSet`. Looking up a key that
//! is neither cached nor in flight hands the caller a `FetchTicket`; the
//! host executes the ticket's request and passes the outcome back through
//! `resolve`. A second lookup of the same key while the ticket is out joins
//! it instead of issuing another request. Results, including errors, stay
//! cached until `invalidate` is called: there is no automatic retry.
//!
//! Tickets for different keys are independent. A late ticket only ever
//! writes its own key, so a stale response cannot replace the entry for the
//! filters currently on screen. A ticket dropped without being resolved
//! releases its key, and the next lookup issues a fresh fetch.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::client::PaymentsClient;
use crate::error::QueryResult;
use crate::filters::FilterSet;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

type Cache = RefCell<HashMap<FilterSet, Entry>>;

/// Permission, and obligation, to perform one network fetch.
#[derive(Debug)]
#[must_use = "dropping a ticket abandons its fetch"]
pub struct FetchTicket {
    key: FilterSet,
    request: HttpRequest,
    cache: Weak<Cache>,
}

impl FetchTicket {
    pub fn key(&self) -> &FilterSet {
        &self.key
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Take the key out for settling; the drop guard no longer applies.
    fn settle(mut self) -> FilterSet {
        self.cache = Weak::new();
        std::mem::take(&mut self.key)
    }
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        let Some(cache) = self.cache.upgrade() else {
            return;
        };
        let mut cache = cache.borrow_mut();
        if matches!(cache.get(&self.key), Some(Entry::InFlight)) {
            log::debug!("abandoned fetch for {:?}", self.key);
            cache.remove(&self.key);
        }
    }
}

#[derive(Debug)]
pub enum Lookup {
    /// Settled result for the key.
    Ready(QueryResult),
    /// Nothing cached: the caller must perform this fetch.
    Fetch(FetchTicket),
    /// Another caller holds the ticket for this key.
    InFlight,
}

#[derive(Debug)]
enum Entry {
    InFlight,
    Settled(QueryResult),
}

pub struct PaymentsQueryClient {
    client: PaymentsClient,
    cache: Rc<Cache>,
    requests_issued: Cell<u64>,
}

impl PaymentsQueryClient {
    pub fn new(client: PaymentsClient) -> Self {
        Self {
            client,
            cache: Rc::new(RefCell::new(HashMap::new())),
            requests_issued: Cell::new(0),
        }
    }

    pub fn lookup(&self, filters: &FilterSet) -> Lookup {
        let key = filters.clone().normalized();
        let mut cache = self.cache.borrow_mut();
        match cache.get(&key) {
            Some(Entry::Settled(result)) => {
                log::debug!("cache hit for {key:?}");
                Lookup::Ready(result.clone())
            }
            Some(Entry::InFlight) => {
                log::debug!("joining in-flight fetch for {key:?}");
                Lookup::InFlight
            }
            None => {
                let request = self.client.build_list_payments(&key);
                log::debug!("issuing GET {}", request.url);
                self.requests_issued.set(self.requests_issued.get() + 1);
                cache.insert(key.clone(), Entry::InFlight);
                Lookup::Fetch(FetchTicket {
                    key,
                    request,
                    cache: Rc::downgrade(&self.cache),
                })
            }
        }
    }

    /// Settled result for `filters`, without starting a fetch.
    pub fn peek(&self, filters: &FilterSet) -> Option<QueryResult> {
        match self.cache.borrow().get(&filters.clone().normalized()) {
            Some(Entry::Settled(result)) => Some(result.clone()),
            _ => None,
        }
    }

    pub fn is_in_flight(&self, filters: &FilterSet) -> bool {
        matches!(
            self.cache.borrow().get(&filters.clone().normalized()),
            Some(Entry::InFlight)
        )
    }

    /// Settle a ticket. The result is cached under the ticket's own key.
    pub fn resolve(
        &self,
        ticket: FetchTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> QueryResult {
        let key = ticket.settle();
        let result = self.client.parse_outcome(outcome);
        if let Err(e) = &result {
            log::warn!("fetch for {key:?} failed: {e}");
        }
        self.cache
            .borrow_mut()
            .insert(key, Entry::Settled(result.clone()));
        result
    }

    /// Look up `filters` and, if this call owns the fetch, run it through
    /// `transport`. Returns `None` only when another caller's fetch for the
    /// same key is still outstanding.
    pub fn fetch<T: Transport>(&self, filters: &FilterSet, transport: &T) -> Option<QueryResult> {
        match self.lookup(filters) {
            Lookup::Ready(result) => Some(result),
            Lookup::InFlight => None,
            Lookup::Fetch(ticket) => {
                let outcome = transport.execute(ticket.request());
                Some(self.resolve(ticket, outcome))
            }
        }
    }

    /// Drop a settled entry so the next lookup fetches again. In-flight
    /// entries are left to their ticket.
    pub fn invalidate(&self, filters: &FilterSet) -> bool {
        let key = filters.clone().normalized();
        let mut cache = self.cache.borrow_mut();
        if matches!(cache.get(&key), Some(Entry::Settled(_))) {
            cache.remove(&key);
            return true;
        }
        false
    }

    /// Number of network requests handed out since creation.
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;

    const PAGE: &str = r#"{"payments":[],"total":0,"page":1,"pageSize":5}"#;

    struct CountingTransport {
        calls: Cell<u32>,
        status: u16,
        body: &'static str,
    }

    impl CountingTransport {
        fn ok() -> Self {
            Self {
                calls: Cell::new(0),
                status: 200,
                body: PAGE,
            }
        }
    }

    impl Transport for CountingTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    fn query() -> PaymentsQueryClient {
        PaymentsQueryClient::new(PaymentsClient::new("http://localhost:3000"))
    }

    fn ok_response() -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: PAGE.to_string(),
        })
    }

    #[test]
    fn same_filters_fetch_once() {
        let query = query();
        let transport = CountingTransport::ok();
        let a = FilterSet::new().search("a");

        assert!(query.fetch(&a, &transport).unwrap().is_ok());
        assert!(query.fetch(&a.clone(), &transport).unwrap().is_ok());
        assert_eq!(transport.calls.get(), 1);
        assert_eq!(query.requests_issued(), 1);
    }

    #[test]
    fn absent_and_empty_fields_share_an_entry() {
        let query = query();
        let transport = CountingTransport::ok();
        let a = FilterSet::new().search("a");
        let a_with_blank = FilterSet {
            currency: Some(String::new()),
            page: None,
            ..a.clone()
        };

        query.fetch(&a, &transport);
        query.fetch(&a_with_blank, &transport);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn second_lookup_joins_in_flight_fetch() {
        let query = query();
        let a = FilterSet::new().search("a");

        let Lookup::Fetch(ticket) = query.lookup(&a) else {
            panic!("first lookup should issue a fetch");
        };
        assert!(matches!(query.lookup(&a), Lookup::InFlight));
        assert!(query.is_in_flight(&a));

        query.resolve(ticket, ok_response()).unwrap();
        assert!(matches!(query.lookup(&a), Lookup::Ready(Ok(_))));
        assert_eq!(query.requests_issued(), 1);
    }

    #[test]
    fn different_filters_fetch_independently() {
        let query = query();
        let a = FilterSet::new().search("a");
        let b = FilterSet::new().search("b");

        let Lookup::Fetch(first) = query.lookup(&a) else {
            panic!("expected fetch for a");
        };
        let Lookup::Fetch(second) = query.lookup(&b) else {
            panic!("expected fetch for b");
        };

        // b settles first; a arriving late must not touch b's entry.
        query.resolve(second, ok_response()).unwrap();
        query
            .resolve(
                first,
                Ok(HttpResponse {
                    status: 500,
                    headers: Vec::new(),
                    body: r#"{"message":"boom"}"#.to_string(),
                }),
            )
            .unwrap_err();

        assert!(query.peek(&b).unwrap().is_ok());
        assert_eq!(query.peek(&a).unwrap().unwrap_err().message, "boom");
    }

    #[test]
    fn errors_are_cached_without_retry() {
        let query = query();
        let transport = CountingTransport {
            calls: Cell::new(0),
            status: 404,
            body: r#"{"message":"Payment not found"}"#,
        };
        let filters = FilterSet::new().search("pay_404");

        let first = query.fetch(&filters, &transport).unwrap().unwrap_err();
        let second = query.fetch(&filters, &transport).unwrap().unwrap_err();
        assert_eq!(first.kind, ApiErrorKind::NotFound);
        assert_eq!(first, second);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let query = query();
        let transport = CountingTransport::ok();
        let filters = FilterSet::new();

        query.fetch(&filters, &transport);
        assert!(query.invalidate(&filters));
        query.fetch(&filters, &transport);
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn invalidate_keeps_in_flight_entries() {
        let query = query();
        let filters = FilterSet::new();
        let Lookup::Fetch(ticket) = query.lookup(&filters) else {
            panic!("expected fetch");
        };
        assert!(!query.invalidate(&filters));
        assert!(matches!(query.lookup(&filters), Lookup::InFlight));
        query.resolve(ticket, ok_response()).unwrap();
    }

    #[test]
    fn dropped_ticket_releases_its_key() {
        let query = query();
        let transport = CountingTransport::ok();
        let filters = FilterSet::new().currency("USD");

        let Lookup::Fetch(ticket) = query.lookup(&filters) else {
            panic!("expected fetch");
        };
        drop(ticket);
        assert!(!query.is_in_flight(&filters));

        assert!(query.fetch(&filters, &transport).unwrap().is_ok());
        assert_eq!(transport.calls.get(), 1);
        assert_eq!(query.requests_issued(), 2);
    }

    #[test]
    fn resolved_ticket_keeps_its_result() {
        let query = query();
        let filters = FilterSet::new();
        let Lookup::Fetch(ticket) = query.lookup(&filters) else {
            panic!("expected fetch");
        };
        query.resolve(ticket, ok_response()).unwrap();
        assert!(query.peek(&filters).unwrap().is_ok());
    }

    #[test]
    fn ticket_outliving_client_is_harmless() {
        let query = query();
        let Lookup::Fetch(ticket) = query.lookup(&FilterSet::new()) else {
            panic!("expected fetch");
        };
        drop(query);
        drop(ticket);
    }

    #[test]
    fn transport_failure_settles_as_error() {
        let query = query();
        let filters = FilterSet::new();
        let Lookup::Fetch(ticket) = query.lookup(&filters) else {
            panic!("expected fetch");
        };
        let err = query
            .resolve(ticket, Err(TransportError("reset".to_string())))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
        assert!(query.peek(&filters).unwrap().is_err());
    }
}
