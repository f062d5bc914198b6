//! Wire DTOs for the payments endpoint.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined
//! independently; the end-to-end tests catch drift between the two crates.
//! Field names are camelCase on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size used when neither the URL nor the caller names one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Page requested when the URL carries no `page` key.
pub const DEFAULT_PAGE: u32 = 1;

/// Currency codes the endpoint knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Aud,
    Cad,
    Czk,
    Eur,
    Gbp,
    Jpy,
    Usd,
    Zar,
}

impl Currency {
    /// Every currency in the order the filter bar lists them.
    pub const ALL: [Currency; 8] = [
        Currency::Aud,
        Currency::Cad,
        Currency::Czk,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Usd,
        Currency::Zar,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Czk => "CZK",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Usd => "USD",
            Currency::Zar => "ZAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not one of [`Currency::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single payment record. `date` is an ISO-8601 timestamp kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub customer_name: String,
    pub amount: f64,
    pub customer_address: String,
    pub currency: Currency,
    pub status: PaymentStatus,
    pub date: String,
    pub description: String,
}

/// One page of payments. `total` counts the whole filtered set server-side,
/// not just `payments.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsPage {
    pub payments: Vec<Payment>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Body of every non-2xx response the endpoint sends.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
