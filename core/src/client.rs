//! Stateless request builder and response parser for the payments endpoint.
//!
//! # Design
//! `PaymentsClient` holds only the endpoint URL. `build_list_payments`
//! produces an `HttpRequest`, `parse_list_payments` turns the matching
//! `HttpResponse` into a `QueryResult`. Failures are classified here and
//! never escape as anything but an `ApiError`.

use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::{ApiError, QueryResult};
use crate::filters::FilterSet;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
use crate::types::PaymentsPage;

#[derive(Debug, Clone)]
pub struct PaymentsClient {
    endpoint: String,
}

impl PaymentsClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let path = config.endpoint_path.trim_start_matches('/');
        Self {
            endpoint: format!("{}/{path}", config.base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_list_payments(&self, filters: &FilterSet) -> HttpRequest {
        let params = filters.query_params();
        let url = if params.is_empty() {
            self.endpoint.clone()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            format!("{}?{query}", self.endpoint)
        };
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn parse_list_payments(&self, response: HttpResponse) -> QueryResult {
        if !response.is_success() {
            return Err(ApiError::from_response(&response));
        }
        serde_json::from_str::<PaymentsPage>(&response.body).map_err(|e| {
            log::warn!("payments body did not parse: {e}");
            ApiError::malformed()
        })
    }

    /// Parse the outcome of a round-trip that may not have completed.
    pub fn parse_outcome(&self, outcome: Result<HttpResponse, TransportError>) -> QueryResult {
        match outcome {
            Ok(response) => self.parse_list_payments(response),
            Err(e) => {
                log::warn!("payments fetch failed: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::messages;

    fn client() -> PaymentsClient {
        PaymentsClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_without_filters_has_no_query() {
        let req = client().build_list_payments(&FilterSet::new());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/payments");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_serializes_filters_in_wire_order() {
        let filters = FilterSet::new()
            .page_size(10)
            .page(2)
            .currency("USD")
            .search("pay 1");
        let req = client().build_list_payments(&filters);
        assert_eq!(
            req.url,
            "http://localhost:3000/api/payments?search=pay+1&currency=USD&page=2&pageSize=10"
        );
    }

    #[test]
    fn build_omits_blank_fields() {
        let filters = FilterSet::new().search("").currency("EUR");
        let req = client().build_list_payments(&filters);
        assert_eq!(req.url, "http://localhost:3000/api/payments?currency=EUR");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = PaymentsClient::new("http://localhost:3000/").build_list_payments(&FilterSet::new());
        assert_eq!(req.url, "http://localhost:3000/api/payments");
    }

    #[test]
    fn custom_endpoint_path() {
        let config = ClientConfig {
            base_url: "http://svc".to_string(),
            endpoint_path: "v2/payments".to_string(),
        };
        assert_eq!(PaymentsClient::from_config(&config).endpoint(), "http://svc/v2/payments");
    }

    #[test]
    fn parse_success() {
        let body = r#"{
            "payments": [{
                "id": "pay_134_1",
                "customerName": "Ada Lovelace",
                "amount": 1250.5,
                "customerAddress": "12 Analytical Row, London",
                "currency": "GBP",
                "status": "completed",
                "date": "2024-03-01T10:15:00Z",
                "description": "Consulting"
            }],
            "total": 11,
            "page": 1,
            "pageSize": 5
        }"#;
        let page = client().parse_list_payments(response(200, body)).unwrap();
        assert_eq!(page.total, 11);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.payments.len(), 1);
        assert_eq!(page.payments[0].customer_name, "Ada Lovelace");
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse_list_payments(response(404, r#"{"message":"Payment not found"}"#))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.message, messages::PAYMENT_NOT_FOUND);
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_list_payments(response(200, "not json")).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
    }

    #[test]
    fn parse_wrong_shape() {
        let err = client()
            .parse_list_payments(response(200, r#"{"error":{"message":"x"}}"#))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
    }

    #[test]
    fn parse_transport_failure() {
        let err = client()
            .parse_outcome(Err(TransportError("dns".to_string())))
            .unwrap_err();
        assert_eq!(err.message, messages::SOMETHING_WENT_WRONG);
    }
}
