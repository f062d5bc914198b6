//! Seeded payment records served by the mock endpoint.

use serde::{Deserialize, Serialize};

const CURRENCIES: [&str; 8] = ["AUD", "CAD", "CZK", "EUR", "GBP", "JPY", "USD", "ZAR"];
const STATUSES: [&str; 4] = ["completed", "pending", "failed", "refunded"];
const BATCHES: [&str; 6] = ["134", "456", "789", "205", "123", "000"];
const PER_BATCH: usize = 4;

const CUSTOMERS: [(&str, &str); 6] = [
    ("Ada Lovelace", "12 Analytical Row, London"),
    ("Grace Hopper", "1 Navy Yard, Arlington"),
    ("Alan Turing", "7 Bletchley Lane, Milton Keynes"),
    ("Katherine Johnson", "44 Langley Road, Hampton"),
    ("Edsger Dijkstra", "3 Shortest Path, Eindhoven"),
    ("Barbara Liskov", "9 Substitution Ave, Cambridge"),
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub customer_name: String,
    pub amount: f64,
    pub customer_address: String,
    pub currency: String,
    pub status: String,
    pub date: String,
    pub description: String,
}

/// The fixed dataset: six batches of four payments, ids `pay_<batch>_<n>`.
/// Currencies and statuses rotate so every code appears three times.
pub fn seed_payments() -> Vec<Payment> {
    BATCHES
        .iter()
        .enumerate()
        .flat_map(|(b, batch)| (0..PER_BATCH).map(move |n| (b * PER_BATCH + n, *batch, n + 1)))
        .map(|(i, batch, n)| {
            let (customer_name, customer_address) = CUSTOMERS[i % CUSTOMERS.len()];
            Payment {
                id: format!("pay_{batch}_{n}"),
                customer_name: customer_name.to_string(),
                amount: (i as f64 + 1.0) * 125.25,
                customer_address: customer_address.to_string(),
                currency: CURRENCIES[i % CURRENCIES.len()].to_string(),
                status: STATUSES[i % STATUSES.len()].to_string(),
                date: format!("2024-{:02}-{:02}T09:{:02}:00Z", i % 12 + 1, i % 28 + 1, i),
                description: format!("Invoice {batch}-{n}"),
            }
        })
        .collect()
}
