//! crates/socialmind_core/src/envelope.rs
//!
//! The uniform `{success, data?, error?}` wrapper carried by every API response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Returns the payload only when the call succeeded.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn failed_envelope_yields_no_data_even_if_present() {
        let envelope: ApiResponse<u32> =
            serde_json::from_value(json!({ "success": false, "data": 7, "error": "nope" }))
                .unwrap();
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn missing_data_decodes_as_none() {
        let envelope: ApiResponse<String> =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.into_data(), None);
    }
}
