//! Remote data source port.
//!
//! The list is fed by one fixed HTTPS endpoint. [`DataSource`] abstracts the
//! request/response call so the retry loop can run against `window.fetch` in the
//! browser and against scripted responses in tests.

use crate::domain::error::{BlogfrontError, Result};
use crate::domain::Record;
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

/// A completed HTTP exchange: status code plus the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Convenience constructor.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The `Response.ok` rule: any 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Turns the exchange into records, applying the same checks as the page.
    ///
    /// # Errors
    ///
    /// - [`BlogfrontError::Status`] for a non-2xx status
    /// - [`BlogfrontError::UnexpectedResponse`] when the body is not JSON, is JSON
    ///   but not an array, or holds entries that are not JSON objects
    pub fn into_records(self) -> Result<Vec<Record>> {
        if !self.is_success() {
            return Err(BlogfrontError::Status {
                status: self.status,
            });
        }

        let value: Value = serde_json::from_str(&self.body)
            .map_err(|e| BlogfrontError::UnexpectedResponse(format!("body is not JSON: {e}")))?;

        if !value.is_array() {
            return Err(BlogfrontError::UnexpectedResponse(format!(
                "expected an array, got {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| BlogfrontError::UnexpectedResponse(format!("malformed record: {e}")))
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Port for issuing the GET request.
///
/// Futures are `!Send`: everything runs on the page's single thread.
pub trait DataSource {
    /// Requests `url` and resolves to the full response.
    ///
    /// Only transport failures are errors here. A 500 is a successful exchange
    /// with `status == 500`; judging it is the caller's job.
    fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse>> {
        (**self).fetch(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_rejected_before_the_body_is_read() {
        let err = HttpResponse::new(404, "[]").into_records().unwrap_err();
        assert!(matches!(err, BlogfrontError::Status { status: 404 }));
    }

    #[test]
    fn non_array_bodies_are_unexpected() {
        for body in ["{\"posts\": []}", "null", "not json at all", "[\"a\"]"] {
            let err = HttpResponse::new(200, body).into_records().unwrap_err();
            assert!(
                matches!(err, BlogfrontError::UnexpectedResponse(_)),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn array_body_decodes() {
        let records = HttpResponse::new(200, r#"[{"title":"a"},{"title":"b"}]"#)
            .into_records()
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn odd_field_types_do_not_reject_the_collection() {
        let body = r#"[{"title":"ok","tags":"rust"},{"title":42},{"title":"x","reading_time":true}]"#;
        let records = HttpResponse::new(200, body).into_records().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].title_or_empty(), "");
    }
}
