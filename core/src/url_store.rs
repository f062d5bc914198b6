//! Query-state store backed by browser navigation.
//!
//! # Design
//! The address bar is the only persisted client state. `UrlQueryStore`
//! keeps an in-memory snapshot of it, pushes a history entry on every
//! change, and resynchronizes from the live URL on back/forward. The
//! navigation listener lives exactly as long as the store.

use std::cell::RefCell;
use std::rc::Rc;

use crate::navigation::{NavigationPort, Subscription};
use crate::query_state::{QueryState, QueryUpdate};

pub struct UrlQueryStore<N: NavigationPort> {
    port: N,
    snapshot: Rc<RefCell<QueryState>>,
    _subscription: Subscription,
}

impl<N: NavigationPort> UrlQueryStore<N> {
    pub fn new(port: N) -> Self {
        let snapshot = Rc::new(RefCell::new(port.read()));
        let sink = Rc::clone(&snapshot);
        let subscription = port.subscribe(Box::new(move |live: QueryState| {
            log::debug!("navigation restored query '{live}'");
            *sink.borrow_mut() = live;
        }));
        Self {
            port,
            snapshot,
            _subscription: subscription,
        }
    }

    /// The current mapping.
    pub fn get(&self) -> QueryState {
        self.snapshot.borrow().clone()
    }

    /// Merge a partial update into the live URL mapping and push it.
    pub fn set(&self, update: QueryUpdate) {
        let mut next = self.port.read();
        next.apply(update);
        self.commit(next);
    }

    /// Replace the mapping with whatever `f` returns. `f` sees the live URL
    /// mapping; nothing is merged back in afterwards.
    pub fn replace_with(&self, f: impl FnOnce(QueryState) -> QueryState) {
        let next = f(self.port.read());
        self.commit(next);
    }

    fn commit(&self, next: QueryState) {
        let location = next.to_location(&self.port.pathname());
        self.port.write(&location);
        *self.snapshot.borrow_mut() = next;
    }

    pub fn port(&self) -> &N {
        &self.port
    }
}
