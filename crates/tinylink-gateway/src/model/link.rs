use serde::{Deserialize, Serialize};
use tinylink_core::ShortCode;

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub code: ShortCode,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveLinkResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
