//! User-visible strings.

pub const PAYMENT_NOT_FOUND: &str = "Payment not found for the given filters";
pub const SOMETHING_WENT_WRONG: &str = "An unexpected error occurred";
pub const NO_RESULTS: &str = "No payments to display";

pub const PREVIOUS_BUTTON: &str = "Previous";
pub const NEXT_BUTTON: &str = "Next";
pub const PAGE_LABEL: &str = "Page";
pub const SEARCH_BUTTON: &str = "Search";
pub const CLEAR_FILTERS: &str = "Clear filters";

pub const TABLE_HEADER_PAYMENT_ID: &str = "Payment ID";
pub const TABLE_HEADER_DATE: &str = "Date";
pub const TABLE_HEADER_AMOUNT: &str = "Amount";
pub const TABLE_HEADER_CUSTOMER: &str = "Customer";
pub const TABLE_HEADER_CURRENCY: &str = "Currency";
pub const TABLE_HEADER_STATUS: &str = "Status";
