//! JSON envelopes wrapping every API response.

use serde::Serialize;

use crate::pagination::{Paginated, PaginationResult};

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";

/// Successful response: `{"status":"success","message":..,"data":..,"pagination":..}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationResult>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Splits a page into `data` and `pagination`.
    pub fn paginated(message: impl Into<String>, page: Paginated<T>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: Some(page.items),
            pagination: Some(page.pagination),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

/// Failure response: `{"status":"error","message":..,"errors":[..]}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pagination::PaginationRequest;

    #[test]
    fn message_only_response_omits_data_and_pagination() {
        let body = serde_json::to_value(ApiResponse::message("logout success")).unwrap();
        assert_eq!(body, json!({"status": "success", "message": "logout success"}));
    }

    #[test]
    fn paginated_response_carries_metadata() {
        let page = Paginated::new(vec![1, 2], PaginationRequest::new(1, 2).result(5));
        let body = serde_json::to_value(ApiResponse::paginated("ok", page)).unwrap();

        assert_eq!(body["data"], json!([1, 2]));
        assert_eq!(body["pagination"]["total_pages"], json!(3));
        assert!(body["pagination"].get("sort_by").is_none());
    }

    #[test]
    fn error_response_omits_empty_error_list() {
        let body = serde_json::to_value(ErrorResponse::new("tag not found")).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "tag not found"}));

        let body = serde_json::to_value(
            ErrorResponse::new("invalid request body").with_errors(vec!["page".into()]),
        )
        .unwrap();
        assert_eq!(body["errors"], json!(["page"]));
    }
}
