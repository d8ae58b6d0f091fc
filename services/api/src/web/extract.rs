//! services/api/src/web/extract.rs
//!
//! Request extraction helpers that keep every rejection inside the Envelope.

use crate::error::ApiError;
use axum::extract::FromRequest;
use serde_json::Value;

/// `axum::Json`, but a malformed body is answered with a 400 Envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Collects missing required fields so one error can name all of them.
#[derive(Default)]
pub struct FieldCheck {
    missing: Vec<&'static str>,
}

impl FieldCheck {
    /// Takes a required string. Absent, null or blank counts as missing.
    pub fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Requires any non-null JSON value; a blank string counts as missing.
    pub fn value(&mut self, name: &'static str, value: &Option<Value>) {
        let present = match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            self.missing.push(name);
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}
