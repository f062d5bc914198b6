//! Filter, pagination and fetch state for the payments listing screen.
//!
//! # Overview
//! Keeps three sources of truth consistent: the address bar (canonical,
//! persisted), the filter bar draft (uncommitted edits) and the query cache
//! (server state keyed by the canonical filters). Data flows one way:
//! URL → `FilterSet` → cache lookup → `ViewState`.
//!
//! # Design
//! - The browser sits behind `NavigationPort`; `MemoryHistory` runs the
//!   whole machine headless.
//! - Host-does-IO: `PaymentsClient` builds `HttpRequest`s and parses
//!   `HttpResponse`s, the host supplies a `Transport` or resolves
//!   `FetchTicket`s itself.
//! - Every fetch failure becomes an `ApiError` with a displayable message;
//!   callers branch on `Result`, never on the shape of a payload.

pub mod client;
pub mod columns;
pub mod config;
pub mod error;
pub mod filter_bar;
pub mod filters;
pub mod http;
pub mod messages;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod query_state;
pub mod types;
pub mod url_store;
pub mod view;

pub use client::PaymentsClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, QueryResult};
pub use filter_bar::FilterBar;
pub use filters::FilterSet;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use navigation::{MemoryHistory, NavigationPort, Subscription};
pub use pagination::{PageControl, Pagination};
pub use query::{FetchTicket, Lookup, PaymentsQueryClient};
pub use query_state::{ParamValue, QueryState, QueryUpdate};
pub use types::{Currency, Payment, PaymentStatus, PaymentsPage, UnknownCurrency};
pub use url_store::UrlQueryStore;
pub use view::{PaymentsView, ViewState};
