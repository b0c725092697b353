// src/models/url.rs - Pure data structures
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validations::{validate_alias, validate_url};

// DTO for creating a new shortened URL
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUrlDto {
    #[validate(custom(function = "validate_url"))]
    pub url: String,

    #[validate(custom(function = "validate_alias"))]
    pub alias: Option<String>,
}

// DTO for response with shortened URL details
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponseDto {
    /// Identifier assigned by the store, monotonically increasing
    pub id: i64,

    /// The alias the URL is reachable under, as saved or as generated
    pub alias: String,

    /// The target address, stored as given
    pub url: String,
}
