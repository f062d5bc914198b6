//! The address bar and session history, behind a port.
//!
//! # Design
//! The URL store only talks to a `NavigationPort`: read the live query,
//! push an entry, listen for back/forward. Browser hosts implement the port
//! over `window.location`/`history`; `MemoryHistory` implements it in
//! memory so the rest of the crate runs headless. Everything here is
//! single-threaded, hence `Rc`/`RefCell`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::query_state::QueryState;

/// Callback run on every back/forward navigation with the live mapping.
pub type Listener = Box<dyn Fn(QueryState)>;

pub trait NavigationPort {
    /// The mapping currently in the address bar.
    fn read(&self) -> QueryState;

    fn pathname(&self) -> String;

    /// Push a history entry without reloading. `location` is either
    /// `?query` or a bare path.
    fn write(&self, location: &str);

    /// Listen for back/forward navigation until the returned handle drops.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Keeps a navigation listener registered. Dropping it releases the
/// listener exactly once.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    pathname: String,
    search: String,
}

impl Entry {
    fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

struct HistoryInner {
    entries: Vec<Entry>,
    index: usize,
    listeners: Vec<(u64, Rc<dyn Fn(QueryState)>)>,
    next_listener: u64,
}

impl HistoryInner {
    fn current(&self) -> &Entry {
        &self.entries[self.index]
    }
}

/// In-memory session history with browser `pushState`/`popstate`
/// semantics. Clones share the same history.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
    /// Start at `href`, e.g. `/payments?page=2`.
    pub fn new(href: &str) -> Self {
        let (pathname, search) = split_href(href, "/");
        Self {
            inner: Rc::new(RefCell::new(HistoryInner {
                entries: vec![Entry { pathname, search }],
                index: 0,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Full href of the current entry.
    pub fn href(&self) -> String {
        self.inner.borrow().current().href()
    }

    /// Hrefs of every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.iter().map(Entry::href).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Step back one entry and fire the navigation listeners. Returns
    /// `false` at the start of history.
    pub fn back(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.index == 0 {
                return false;
            }
            inner.index -= 1;
        }
        self.notify();
        true
    }

    /// Step forward one entry and fire the navigation listeners.
    pub fn forward(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.index + 1 >= inner.entries.len() {
                return false;
            }
            inner.index += 1;
        }
        self.notify();
        true
    }

    /// Rewrite the current entry's query without an event, like editing the
    /// address bar before anything observes it.
    pub fn replace_search(&self, search: &str) {
        let mut inner = self.inner.borrow_mut();
        let index = inner.index;
        inner.entries[index].search = normalize_search(search);
    }

    /// Fire the navigation listeners against the current entry.
    pub fn notify(&self) {
        let (state, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<_> = inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (QueryState::parse(&inner.current().search), listeners)
        };
        for listener in listeners {
            listener(state.clone());
        }
    }
}

impl NavigationPort for MemoryHistory {
    fn read(&self) -> QueryState {
        QueryState::parse(&self.inner.borrow().current().search)
    }

    fn pathname(&self) -> String {
        self.inner.borrow().current().pathname.clone()
    }

    fn write(&self, location: &str) {
        let mut inner = self.inner.borrow_mut();
        let current_path = inner.current().pathname.clone();
        let (pathname, search) = split_href(location, &current_path);
        let next = inner.index + 1;
        inner.entries.truncate(next);
        inner.entries.push(Entry { pathname, search });
        inner.index = next;
        log::debug!("pushed history entry {}", inner.current().href());
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener;
            inner.next_listener += 1;
            inner.listeners.push((id, Rc::from(listener)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(l, _)| *l != id);
            }
        })
    }
}

/// Split `href` into pathname and `?search`; a query-only href keeps
/// `current_path`.
fn split_href(href: &str, current_path: &str) -> (String, String) {
    match href.find('?') {
        Some(0) => (current_path.to_string(), normalize_search(href)),
        Some(at) => (href[..at].to_string(), normalize_search(&href[at..])),
        None if href.is_empty() => (current_path.to_string(), String::new()),
        None => (href.to_string(), String::new()),
    }
}

fn normalize_search(search: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn write_pushes_entries_and_keeps_pathname() {
        let history = MemoryHistory::new("/payments");
        history.write("?page=2");
        history.write("/payments");
        assert_eq!(
            history.entries(),
            vec!["/payments", "/payments?page=2", "/payments"]
        );
        assert!(history.read().is_empty());
    }

    #[test]
    fn back_and_forward_notify_listeners() {
        let history = MemoryHistory::new("/payments?page=1");
        history.write("?page=2");

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = history.subscribe(Box::new(move |state: QueryState| {
            sink.borrow_mut().push(state.to_query_string());
        }));

        assert!(history.back());
        assert!(!history.back());
        assert!(history.forward());
        assert_eq!(*seen.borrow(), vec!["page=1", "page=2"]);
    }

    #[test]
    fn write_after_back_discards_forward_entries() {
        let history = MemoryHistory::new("/p");
        history.write("?page=2");
        history.write("?page=3");
        history.back();
        history.write("?page=9");
        assert_eq!(history.entries(), vec!["/p", "/p?page=2", "/p?page=9"]);
        assert!(!history.forward());
    }

    #[test]
    fn dropping_subscription_releases_listener_once() {
        let history = MemoryHistory::new("/");
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = history.subscribe(Box::new(move |_: QueryState| counter.set(counter.get() + 1)));
        assert_eq!(history.listener_count(), 1);

        history.notify();
        drop(sub);
        history.notify();

        assert_eq!(history.listener_count(), 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn subscription_outliving_history_is_harmless() {
        let history = MemoryHistory::new("/");
        let sub = history.subscribe(Box::new(|_: QueryState| {}));
        drop(history);
        sub.unsubscribe();
    }
}
