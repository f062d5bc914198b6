//! Column descriptors handed to the table renderer.

use crate::messages;
use crate::types::Payment;

pub struct Column {
    pub header: &'static str,
    pub cell: fn(&Payment) -> String,
}

pub const PAYMENT_COLUMNS: [Column; 6] = [
    Column {
        header: messages::TABLE_HEADER_PAYMENT_ID,
        cell: |p| p.id.clone(),
    },
    Column {
        header: messages::TABLE_HEADER_DATE,
        cell: |p| p.date.clone(),
    },
    Column {
        header: messages::TABLE_HEADER_AMOUNT,
        cell: |p| p.amount.to_string(),
    },
    Column {
        header: messages::TABLE_HEADER_CUSTOMER,
        cell: |p| p.customer_name.clone(),
    },
    Column {
        header: messages::TABLE_HEADER_CURRENCY,
        cell: |p| p.currency.to_string(),
    },
    Column {
        header: messages::TABLE_HEADER_STATUS,
        cell: |p| p.status.to_string(),
    },
];

/// Cell text for every column of `payment`, in column order.
pub fn row_cells(payment: &Payment) -> Vec<String> {
    PAYMENT_COLUMNS.iter().map(|c| (c.cell)(payment)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, PaymentStatus};

    #[test]
    fn cells_follow_header_order() {
        let payment = Payment {
            id: "pay_1".to_string(),
            customer_name: "Grace Hopper".to_string(),
            amount: 42.5,
            customer_address: "1 Navy Yard".to_string(),
            currency: Currency::Usd,
            status: PaymentStatus::Pending,
            date: "2024-01-02T03:04:05Z".to_string(),
            description: "Compiler licence".to_string(),
        };
        let headers: Vec<_> = PAYMENT_COLUMNS.iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec!["Payment ID", "Date", "Amount", "Customer", "Currency", "Status"]
        );
        assert_eq!(
            row_cells(&payment),
            vec!["pay_1", "2024-01-02T03:04:05Z", "42.5", "Grace Hopper", "USD", "pending"]
        );
    }
}
