//! services/api/src/bin/openapi.rs
//!
//! Writes the dashboard API's OpenAPI document to disk so the frontend can
//! generate typed bindings. Usage: `openapi [output-path]`.

use api_lib::{error::ApiError, web::ApiDoc};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), ApiError> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let doc = ApiDoc::openapi();
    let route_count = doc.paths.paths.len();
    let json = doc
        .to_pretty_json()
        .map_err(|e| ApiError::Internal(format!("Failed to serialize OpenAPI document: {}", e)))?;

    std::fs::write(&output, json)?;
    println!("Wrote {} routes to {}", route_count, output);
    Ok(())
}
